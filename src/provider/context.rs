//! Resolver context for dependency injection.

use crate::traits::ResolverCore;

/// Context passed to factory functions for resolving dependencies.
///
/// Wraps whichever resolver triggered the factory: the root provider for
/// singletons, the current scope for scoped and transient services. This is
/// how the request context travels explicitly through every resolution.
///
/// # Examples
///
/// ```
/// use scope_probe::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Database {
///     url: "postgres://localhost".to_string()
/// });
/// services.add_transient_factory::<UserService, _>(|resolver| {
///     UserService {
///         db: resolver.get_required::<Database>(),
///     }
/// });
/// ```
pub struct ResolverContext<'a> {
    resolver: &'a dyn ResolverCore,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new<T>(resolver: &'a T) -> Self
    where
        T: ResolverCore,
    {
        Self { resolver }
    }
}

impl<'a> ResolverCore for ResolverContext<'a> {
    fn resolve_any(&self, key: &crate::Key) -> crate::DiResult<crate::registration::AnyArc> {
        self.resolver.resolve_any(key)
    }
}
