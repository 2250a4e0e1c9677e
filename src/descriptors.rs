//! Service descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::lifetime::Lifetime;

/// Service descriptor for introspection and diagnostics
///
/// The public view of a provider declaration: which service is registered and
/// under which lifetime. Logged at startup by the server binary.
///
/// # Examples
///
/// ```rust
/// use scope_probe::{ServiceCollection, Lifetime};
///
/// struct Database { url: String }
/// struct Repository { name: String }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Database { url: "postgres://localhost".to_string() });
/// services.add_scoped_factory::<Repository, _>(|_| Repository { name: "UserRepo".to_string() });
///
/// let descriptors = services.get_service_descriptors();
/// assert_eq!(descriptors.len(), 2);
/// assert!(descriptors[0].type_name().contains("Database"));
/// assert_eq!(descriptors[0].lifetime, Lifetime::Singleton);
/// assert_eq!(descriptors[1].lifetime, Lifetime::Scoped);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// The service key
    pub key: Key,
    /// Service lifetime
    pub lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// Get the type/trait name
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }
}
