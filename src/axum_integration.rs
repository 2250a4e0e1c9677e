//! Axum integration: one DI scope per HTTP request.
//!
//! The root [`ServiceProvider`] is installed as a router extension by
//! [`create_app_with_di`]. Handlers take a [`DiScope`] argument, which creates
//! a fresh [`Scope`] for that request. The scope, and with it every scoped
//! instance, is dropped when the handler returns.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Extension, Router,
};
use tracing::{debug, error};

use crate::traits::Resolver;
use crate::{DiResult, Scope, ServiceProvider};

/// Extractor for request-scoped DI container
pub struct DiScope {
    scope: Scope,
}

impl DiScope {
    /// Try to get a service from the request scope
    pub fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.scope.get()
    }

    /// Get the underlying scope
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DiScope
where
    S: Send + Sync,
{
    type Rejection = DiRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let provider = parts
            .extensions
            .get::<Arc<ServiceProvider>>()
            .ok_or(DiRejection::MissingProvider)?;

        let scope = provider.create_scope();
        debug!(scope = scope.id(), method = %parts.method, path = %parts.uri.path(), "request scope opened");
        Ok(DiScope { scope })
    }
}

/// Rejection type for DI extraction failures
#[derive(Debug)]
pub enum DiRejection {
    MissingProvider,
}

impl IntoResponse for DiRejection {
    fn into_response(self) -> Response {
        match self {
            DiRejection::MissingProvider => {
                error!("ServiceProvider not found in request extensions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ServiceProvider not found in extensions. Make sure to use create_app_with_di()",
                )
                    .into_response()
            }
        }
    }
}

/// Helper function to create an Axum app with DI support
///
/// ```rust
/// use axum::{routing::get, Json};
/// use scope_probe::axum_integration::{create_app_with_di, DiScope};
/// use scope_probe::ServiceCollection;
/// use std::sync::Arc;
///
/// async fn answer(scope: DiScope) -> Json<u32> {
///     Json(*scope.get::<u32>().unwrap())
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(42u32);
///
/// let provider = Arc::new(services.build());
/// let app = create_app_with_di(provider, |router| router.route("/answer", get(answer)));
/// ```
pub fn create_app_with_di<F>(provider: Arc<ServiceProvider>, configure: F) -> Router
where
    F: FnOnce(Router) -> Router,
{
    configure(Router::new()).layer(Extension(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceCollection;
    use axum::http::Request;

    #[tokio::test]
    async fn test_each_extraction_opens_a_new_scope() {
        let mut services = ServiceCollection::new();
        services.add_singleton("shared".to_string());
        let provider = Arc::new(services.build());

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(provider.clone());

        let first = DiScope::from_request_parts(&mut parts, &()).await.unwrap();
        let second = DiScope::from_request_parts(&mut parts, &()).await.unwrap();

        assert_ne!(first.scope().id(), second.scope().id());
        assert_eq!(first.get::<String>().unwrap().as_str(), "shared");
    }

    #[tokio::test]
    async fn test_missing_provider_is_rejected() {
        let (mut parts, _) = Request::new(()).into_parts();
        let rejection = DiScope::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
