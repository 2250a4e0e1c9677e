//! # scope-probe
//!
//! A web service that makes dependency-injection lifetimes observable. It is
//! built on a small container in the style of
//! Microsoft.Extensions.DependencyInjection.
//!
//! The crate has two halves:
//!
//! - **The container**: [`ServiceCollection`] declares services with a
//!   [`Lifetime`], [`ServiceProvider`] resolves them, and a [`Scope`] is one
//!   request context.
//! - **The probe**: three operation-id services (one per lifetime), two
//!   consumers that depend on all three, and HTTP routes that return the
//!   consumers' ids side by side. Compare the pairs to see the lifetime rules.
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once and shared across the entire application
//! - **Scoped**: Created once per scope (one scope per HTTP request)
//! - **Transient**: Created fresh on every resolution
//!
//! ## Quick Start
//!
//! ```rust
//! use scope_probe::{ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_singleton(Database {
//!     connection_string: "postgres://localhost".to_string(),
//! });
//! services.add_transient_factory::<UserService, _>(|resolver| {
//!     UserService {
//!         db: resolver.get_required::<Database>(),
//!     }
//! });
//!
//! let provider = services.build();
//! let user_service = provider.get_required::<UserService>();
//! assert_eq!(user_service.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Probing lifetimes
//!
//! ```rust
//! use scope_probe::{container, controller, CounterSource, Lifetime};
//! use std::sync::Arc;
//!
//! let provider = container::build_with_source(Arc::new(CounterSource::new()), Lifetime::Transient);
//!
//! let first = provider.create_scope();
//! let second = provider.create_scope();
//!
//! let [a, b] = controller::request_pair(&first).unwrap();
//! let [c, d] = controller::request_pair(&second).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(c, d);
//! assert_ne!(a, c);
//! ```

// Module declarations
pub mod collection;
pub mod config;
pub mod container;
pub mod controller;
pub mod descriptors;
pub mod error;
pub mod identifier;
pub mod key;
pub mod lifetime;
pub mod logging;
pub mod provider;
pub mod services;
pub mod traits;

#[cfg(feature = "axum-integration")]
pub mod axum_integration;
#[cfg(feature = "axum-integration")]
pub mod web;

mod registration;

// Re-export core types
pub use collection::ServiceCollection;
pub use config::{ConfigError, IdSourceKind, ServerConfig};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use identifier::{CounterSource, IdentifierSource, RandomSource, SourceError, UuidSource};
pub use key::{key_of_trait, key_of_type, Key};
pub use lifetime::Lifetime;
pub use provider::{ResolverContext, Scope, ServiceProvider};
pub use services::{
    Consumer, OperationId, OperationService, PrimaryConsumer, RequestOperation, SecondaryConsumer,
    SingletonOperation, TransientOperation,
};
pub use traits::{Resolver, ResolverCore};
