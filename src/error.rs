//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// # Examples
///
/// ```rust
/// use scope_probe::{DiError, ServiceCollection, Resolver};
///
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>() {
///     Err(DiError::NotFound(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// Service not registered
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Invalid lifetime resolution (e.g., scoped from root)
    #[error("Lifetime error: {0}")]
    WrongLifetime(&'static str),
    /// A factory failed while constructing the service
    #[error("Factory for {service} failed: {message}")]
    Factory {
        service: &'static str,
        message: String,
    },
}

impl DiError {
    /// Wraps any displayable failure raised while constructing `service`.
    pub fn factory(service: &'static str, err: impl std::fmt::Display) -> Self {
        DiError::Factory {
            service,
            message: err.to_string(),
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
