use axum::{Router, http::HeaderName};
use object_store::{ObjectStore as ApacheObjectStore, memory::InMemory};
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::{
    adapters::{
        inbound::http::{
            middleware::DEFAULT_OWNER_HEADER,
            router::{AppState, create_router},
        },
        outbound::{
            storage::{ApacheObjectStoreAdapter, AzureConfig, S3Config, azure_builder, create_s3_store},
            upstream::HttpExportStatusSource,
        },
    },
    domain::{
        models::{ProxyEndpoint, SynthesizedCategories},
        value_objects::ContainerName,
    },
    ports::{storage::BlobStore, upstream::ExportStatusSource},
    services::{ExportCompletionTransformer, StorageResolver},
};

/// Container holding the pre-staged files for synthesized categories
pub const DEFAULT_TEMPLATE_CONTAINER: &str = "export";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    /// Public host export file URLs are rewritten to
    pub proxy_host: String,
    /// Optional API-management path prefix in front of `_export`
    pub api_prefix: Option<String>,
    /// Base URL of the upstream FHIR service running the export jobs
    pub fhir_upstream_url: String,
    pub upstream_token: Option<String>,
    pub template_container: String,
    pub synthesized_categories: SynthesizedCategories,
    pub owner_header: String,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            proxy_host: "localhost".to_string(),
            api_prefix: None,
            fhir_upstream_url: "http://localhost:8080".to_string(),
            upstream_token: None,
            template_container: DEFAULT_TEMPLATE_CONTAINER.to_string(),
            synthesized_categories: SynthesizedCategories::default(),
            owner_header: DEFAULT_OWNER_HEADER.to_string(),
            debug: false,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Azure(AzureConfig),
    S3(S3Config),
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub transformer: Arc<ExportCompletionTransformer>,
    pub resolver: Arc<StorageResolver>,
    pub status_source: Arc<dyn ExportStatusSource>,
    pub owner_header: HeaderName,
    pub debug: bool,
}

impl AppServices {
    pub fn state(&self) -> AppState {
        AppState {
            export_filter: self.transformer.clone(),
            resolver: self.resolver.clone(),
            status_source: self.status_source.clone(),
            owner_header: self.owner_header.clone(),
            debug: self.debug,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state())
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    object_store: Option<Arc<dyn ApacheObjectStore>>,
    status_source: Option<Arc<dyn ExportStatusSource>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            object_store: None,
            status_source: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Read blobs from this store instead of the configured backend.
    /// Containers become top-level prefixes.
    pub fn with_object_store(mut self, store: Arc<dyn ApacheObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    /// Poll export status from this source instead of the upstream URL
    pub fn with_status_source(mut self, source: Arc<dyn ExportStatusSource>) -> Self {
        self.status_source = Some(source);
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let config = &self.config;

        let endpoint = ProxyEndpoint::new(config.proxy_host.clone(), config.api_prefix.clone())
            .map_err(|e| AppError::Configuration {
                message: e.to_string(),
            })?;

        let template_container =
            ContainerName::new(config.template_container.clone()).map_err(|e| {
                AppError::Configuration {
                    message: format!("Invalid template container: {}", e),
                }
            })?;

        let owner_header = HeaderName::from_bytes(config.owner_header.as_bytes()).map_err(|e| {
            AppError::Configuration {
                message: format!("Invalid owner header '{}': {}", config.owner_header, e),
            }
        })?;

        let categories = Arc::new(config.synthesized_categories.clone());
        let blob_store = self.create_blob_store()?;
        let resolver = StorageResolver::new(blob_store, template_container, &categories)
            .map_err(|e| AppError::StorageInit {
                message: e.to_string(),
            })?;
        let transformer = ExportCompletionTransformer::new(endpoint, categories);
        let status_source = self.create_status_source()?;

        info!(
            proxy_host = %config.proxy_host,
            api_prefix = ?config.api_prefix,
            template_container = %config.template_container,
            "Export proxy services built"
        );

        Ok(AppServices {
            transformer: Arc::new(transformer),
            resolver: Arc::new(resolver),
            status_source,
            owner_header,
            debug: config.debug,
        })
    }

    /// Create the blob store based on configuration
    fn create_blob_store(&self) -> Result<Arc<dyn BlobStore>, AppError> {
        if let Some(store) = &self.object_store {
            return Ok(Arc::new(ApacheObjectStoreAdapter::new(store.clone())));
        }

        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(ApacheObjectStoreAdapter::new(Arc::new(
                InMemory::new(),
            )))),
            StorageBackend::Azure(azure) => Ok(Arc::new(ApacheObjectStoreAdapter::azure(
                azure_builder(azure),
            ))),
            StorageBackend::S3(s3) => {
                let store = create_s3_store(s3).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?;
                Ok(Arc::new(ApacheObjectStoreAdapter::new(store)))
            }
        }
    }

    fn create_status_source(&self) -> Result<Arc<dyn ExportStatusSource>, AppError> {
        if let Some(source) = &self.status_source {
            return Ok(source.clone());
        }

        let base_url =
            Url::parse(&self.config.fhir_upstream_url).map_err(|e| AppError::Configuration {
                message: format!(
                    "Invalid FHIR upstream url '{}': {}",
                    self.config.fhir_upstream_url, e
                ),
            })?;

        let mut source = HttpExportStatusSource::new(base_url);
        if let Some(token) = &self.config.upstream_token {
            source = source.with_bearer_token(token.clone());
        }

        Ok(Arc::new(source))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();
        assert_eq!(app.owner_header.as_str(), DEFAULT_OWNER_HEADER);
        assert_eq!(app.resolver.template_container().as_str(), "export");
        assert!(!app.debug);
    }

    #[tokio::test]
    async fn test_invalid_proxy_host_is_rejected() {
        let config = AppConfig {
            proxy_host: "https://api.example.com".to_string(),
            ..AppConfig::default()
        };

        let result = AppBuilder::new().with_config(config).build().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_invalid_template_container_is_rejected() {
        let config = AppConfig {
            template_container: "Export_Templates".to_string(),
            ..AppConfig::default()
        };

        let result = AppBuilder::new().with_config(config).build().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_invalid_upstream_url_is_rejected() {
        let config = AppConfig {
            fhir_upstream_url: "not a url".to_string(),
            ..AppConfig::default()
        };

        let result = AppBuilder::new().with_config(config).build().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
