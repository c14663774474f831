use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderName, Request, StatusCode, request::Parts},
};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

use crate::{adapters::inbound::http::dto::ErrorResponseDto, domain::value_objects::OwnerId};

/// Header the identity layer uses unless configured otherwise
pub const DEFAULT_OWNER_HEADER: &str = "x-owner-id";

/// Layer that turns the trusted owner header set by the identity layer into
/// an `OwnerId` request extension.
#[derive(Debug, Clone)]
pub struct OwnerIdentityLayer {
    header: HeaderName,
}

impl OwnerIdentityLayer {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for OwnerIdentityLayer {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_OWNER_HEADER))
    }
}

impl<S> Layer<S> for OwnerIdentityLayer {
    type Service = OwnerIdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OwnerIdentityService {
            inner,
            header: self.header.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OwnerIdentityService<S> {
    inner: S,
    header: HeaderName,
}

impl<S, B> Service<Request<B>> for OwnerIdentityService<S>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        // Only this layer may attach an owner
        req.extensions_mut().remove::<OwnerId>();

        if let Some(value) = req.headers().get(&self.header) {
            match value
                .to_str()
                .ok()
                .map(|v| OwnerId::new(v.trim().to_string()))
            {
                Some(Ok(owner)) => {
                    req.extensions_mut().insert(owner);
                }
                _ => warn!(header = %self.header, "Ignoring invalid owner identity header"),
            }
        }

        Box::pin(self.inner.call(req))
    }
}

/// Extractor for the verified owner of the current request
#[derive(Debug, Clone)]
pub struct VerifiedOwner(pub OwnerId);

impl<S> FromRequestParts<S> for VerifiedOwner
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponseDto>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OwnerId>()
            .cloned()
            .map(VerifiedOwner)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponseDto::unauthorized(
                        "Request carries no verified owner identity",
                    )),
                )
            })
    }
}
