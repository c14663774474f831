use async_trait::async_trait;
use bytes::Bytes;
use object_store::{ObjectStore as ApacheObjectStore, azure::MicrosoftAzureBuilder, path::Path as ObjectPath};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

use super::error::map_blob_error;
use crate::{
    domain::{
        errors::StorageResult,
        value_objects::{BlobName, ContainerName},
    },
    ports::storage::BlobStore,
};

enum Backend {
    /// One store for everything; containers are top-level path prefixes
    Shared(Arc<dyn ApacheObjectStore>),
    /// Azure Blob, where every container needs its own client
    Azure(AzureClients),
}

/// Azure clients built on first use of a container and reused afterwards
struct AzureClients {
    builder: MicrosoftAzureBuilder,
    clients: RwLock<HashMap<ContainerName, Arc<dyn ApacheObjectStore>>>,
}

impl AzureClients {
    async fn for_container(
        &self,
        container: &ContainerName,
    ) -> object_store::Result<Arc<dyn ApacheObjectStore>> {
        if let Some(store) = self.clients.read().await.get(container) {
            return Ok(store.clone());
        }

        let mut clients = self.clients.write().await;
        if let Some(store) = clients.get(container) {
            return Ok(store.clone());
        }

        debug!(container = %container, "Building Azure client for container");
        let store: Arc<dyn ApacheObjectStore> = Arc::new(
            self.builder
                .clone()
                .with_container_name(container.as_str())
                .build()?,
        );
        clients.insert(container.clone(), store.clone());

        Ok(store)
    }
}

/// Adapter that implements our BlobStore trait using Apache object_store
pub struct ApacheObjectStoreAdapter {
    backend: Backend,
}

impl ApacheObjectStoreAdapter {
    /// Wrap a single store. Blob `b` of container `c` lives at `c/b`.
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            backend: Backend::Shared(store),
        }
    }

    /// Use Azure Blob storage. The builder carries account and credentials;
    /// the container name is filled in the first time a container is read.
    pub fn azure(builder: MicrosoftAzureBuilder) -> Self {
        Self {
            backend: Backend::Azure(AzureClients {
                builder,
                clients: RwLock::new(HashMap::new()),
            }),
        }
    }

    async fn locate(
        &self,
        container: &ContainerName,
        blob: &BlobName,
    ) -> StorageResult<(Arc<dyn ApacheObjectStore>, ObjectPath)> {
        match &self.backend {
            Backend::Shared(store) => Ok((
                store.clone(),
                ObjectPath::from(format!("{}/{}", container.as_str(), blob.as_str())),
            )),
            Backend::Azure(clients) => {
                let store = clients
                    .for_container(container)
                    .await
                    .map_err(|e| map_blob_error(e, container, blob))?;
                Ok((store, ObjectPath::from(blob.as_str())))
            }
        }
    }
}

#[async_trait]
impl BlobStore for ApacheObjectStoreAdapter {
    async fn exists(&self, container: &ContainerName, blob: &BlobName) -> StorageResult<bool> {
        let (store, path) = self.locate(container, blob).await?;

        match store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(map_blob_error(e, container, blob)),
        }
    }

    async fn download_content(
        &self,
        container: &ContainerName,
        blob: &BlobName,
    ) -> StorageResult<Bytes> {
        let (store, path) = self.locate(container, blob).await?;

        let result = store
            .get(&path)
            .await
            .map_err(|e| map_blob_error(e, container, blob))?;

        result
            .bytes()
            .await
            .map_err(|e| map_blob_error(e, container, blob))
    }
}
