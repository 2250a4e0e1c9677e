//! Scoped service resolution.
//!
//! A `Scope` is the request context: it caches scoped services for exactly one
//! unit of work and is dropped with it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use super::{ResolverContext, ServiceProvider};
use crate::registration::{AnyArc, Registration};
use crate::traits::ResolverCore;
use crate::{DiError, DiResult, Key, Lifetime};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Scoped service container for request-scoped dependency resolution.
///
/// # Lifetime Behavior
///
/// - **Singleton**: Resolved and cached in the root provider (shared across all scopes)
/// - **Scoped**: Resolved and cached within this specific scope
/// - **Transient**: Created fresh on every resolution (no caching)
///
/// Factories invoked from a scope receive the scope as their resolver, so a
/// transient service sees the scoped instances of the scope that created it.
///
/// # Examples
///
/// ```
/// use scope_probe::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct DatabaseConnection(String);
///
/// struct UserService {
///     db: Arc<DatabaseConnection>,
/// }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_scoped_factory::<DatabaseConnection, _>(|_| {
///     DatabaseConnection("connection-123".to_string())
/// });
/// collection.add_transient_factory::<UserService, _>(|resolver| {
///     UserService {
///         db: resolver.get_required::<DatabaseConnection>(),
///     }
/// });
///
/// let provider = collection.build();
/// let scope = provider.create_scope();
///
/// let user1 = scope.get_required::<UserService>();
/// let user2 = scope.get_required::<UserService>();
/// assert!(!Arc::ptr_eq(&user1, &user2));
/// assert!(Arc::ptr_eq(&user1.db, &user2.db));
/// ```
pub struct Scope {
    id: u64,
    root: ServiceProvider,
    // Slot-based scoped storage, one cell per scoped registration
    scoped_cells: Box<[OnceCell<AnyArc>]>,
}

impl Scope {
    pub(crate) fn new(root: ServiceProvider) -> Self {
        let scoped_count = root.inner().registry.scoped_count;
        let scoped_cells: Box<[OnceCell<AnyArc>]> = (0..scoped_count)
            .map(|_| OnceCell::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(scope = id, "scope created");

        Self {
            id,
            root,
            scoped_cells,
        }
    }

    /// Process-unique identifier of this scope, for correlation in logs.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The root provider this scope was created from.
    pub fn root(&self) -> &ServiceProvider {
        &self.root
    }

    #[inline(always)]
    fn resolve_scoped(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        let slot = reg
            .scoped_slot
            .ok_or(DiError::WrongLifetime("Scoped registration has no slot; was the collection built?"))?;
        let cell = &self.scoped_cells[slot];

        cell.get_or_try_init(|| {
            trace!(scope = self.id, service = key.display_name(), "creating scoped instance");
            let ctx = ResolverContext::new(self);
            (reg.ctor)(&ctx)
        })
        .map(Arc::clone)
    }

    fn resolve_any_impl(&self, key: &Key) -> DiResult<AnyArc> {
        let reg = self
            .root
            .inner()
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))?;

        trace!(scope = self.id, service = key.display_name(), lifetime = %reg.lifetime, "resolving");
        match reg.lifetime {
            Lifetime::Singleton => self.root.resolve_singleton(reg, key),
            Lifetime::Scoped => self.resolve_scoped(reg, key),
            Lifetime::Transient => {
                // The scope, not the root, resolves the transient's dependencies
                let ctx = ResolverContext::new(self);
                (reg.ctor)(&ctx)
            }
        }
    }
}

impl ResolverCore for Scope {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve_any_impl(key)
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let live = self.scoped_cells.iter().filter(|cell| cell.get().is_some()).count();
        debug!(scope = self.id, scoped_instances = live, "scope dropped");
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("scoped_slots", &self.scoped_cells.len())
            .finish()
    }
}
