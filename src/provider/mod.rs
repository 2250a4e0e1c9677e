//! Service provider module for dependency injection.
//!
//! This module contains the ServiceProvider type and related functionality
//! for resolving registered services from the DI container.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::ResolverCore;
use crate::{DiError, DiResult, Key, Lifetime, ServiceDescriptor};

pub mod context;
pub mod scope;
pub use context::ResolverContext;
pub use scope::Scope;

/// Service provider for resolving dependencies from the DI container.
///
/// The root of the container. It owns every registration together with the
/// write-once singleton cells, and it creates one [`Scope`] per unit of work.
/// Cloning is cheap (`Arc` inside) and clones share the same singletons.
///
/// Resolving directly from the provider supports Singleton and Transient
/// services. Scoped services need a scope.
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
/// let mut collection = ServiceCollection::new();
/// collection.add_singleton(Database { url: "postgres://localhost".to_string() });
/// collection.add_transient_factory::<UserService, _>(|resolver| {
///     UserService { db: resolver.get_required::<Database>() }
/// });
///
/// let provider = collection.build();
/// let user_service = provider.get_required::<UserService>();
/// assert_eq!(user_service.db.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) registry: Registry,
    pub(crate) prewarm: Vec<Key>,
}

impl ServiceProvider {
    pub(crate) fn new(registry: Registry, prewarm: Vec<Key>) -> Self {
        Self {
            inner: Arc::new(ProviderInner { registry, prewarm }),
        }
    }

    #[inline]
    pub(crate) fn inner(&self) -> &ProviderInner {
        &self.inner
    }

    /// Creates a new scope for resolving scoped services.
    ///
    /// Each scope has its own slot per scoped registration and still shares
    /// the root provider's singletons.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_probe::{ServiceCollection, Resolver};
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    ///
    /// struct RequestId(String);
    ///
    /// let counter = Arc::new(AtomicU32::new(0));
    /// let counter_clone = counter.clone();
    ///
    /// let mut collection = ServiceCollection::new();
    /// collection.add_scoped_factory::<RequestId, _>(move |_| {
    ///     RequestId(format!("req-{}", counter_clone.fetch_add(1, Ordering::SeqCst) + 1))
    /// });
    ///
    /// let provider = collection.build();
    /// let scope1 = provider.create_scope();
    /// let scope2 = provider.create_scope();
    ///
    /// let req1a = scope1.get_required::<RequestId>();
    /// let req1b = scope1.get_required::<RequestId>();
    /// let req2 = scope2.get_required::<RequestId>();
    ///
    /// assert!(Arc::ptr_eq(&req1a, &req1b));
    /// assert!(!Arc::ptr_eq(&req1a, &req2));
    /// ```
    pub fn create_scope(&self) -> Scope {
        Scope::new(self.clone())
    }

    /// Eagerly resolves every singleton marked with
    /// [`ServiceCollection::prewarm`](crate::ServiceCollection::prewarm).
    ///
    /// Returns the number of services initialized. The first failing factory
    /// aborts prewarm and its error is returned.
    pub fn prewarm(&self) -> DiResult<usize> {
        let mut warmed = 0;
        for key in &self.inner().prewarm {
            let reg = self
                .inner()
                .registry
                .get(key)
                .ok_or(DiError::NotFound(key.display_name()))?;
            if reg.lifetime != Lifetime::Singleton {
                return Err(DiError::WrongLifetime("Only singleton services can be prewarmed"));
            }
            self.resolve_singleton(reg, key)?;
            debug!(service = key.display_name(), "prewarmed singleton");
            warmed += 1;
        }
        Ok(warmed)
    }

    /// Lists every registration with its lifetime, in registration order.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.inner()
            .registry
            .iter()
            .map(|(key, reg)| ServiceDescriptor {
                key: *key,
                lifetime: reg.lifetime,
            })
            .collect()
    }

    /// Singleton resolution through the registration's write-once cell.
    ///
    /// `get_or_try_init` blocks concurrent first resolutions on the single
    /// initializer, so only one value is ever published. A failing factory
    /// leaves the cell empty. The factory must not resolve its own key.
    pub(crate) fn resolve_singleton(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        let cell: &OnceCell<AnyArc> = reg
            .singleton_cell
            .as_ref()
            .ok_or(DiError::WrongLifetime("Singleton registration has no cache cell"))?;

        cell.get_or_try_init(|| {
            trace!(service = key.display_name(), "creating singleton");
            let ctx = ResolverContext::new(self);
            (reg.ctor)(&ctx)
        })
        .map(Arc::clone)
    }

    fn resolve_any_impl(&self, key: &Key) -> DiResult<AnyArc> {
        let reg = self
            .inner()
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))?;

        trace!(service = key.display_name(), lifetime = %reg.lifetime, "resolving from root");
        match reg.lifetime {
            Lifetime::Singleton => self.resolve_singleton(reg, key),
            Lifetime::Scoped => {
                Err(DiError::WrongLifetime("Cannot resolve scoped service from root provider"))
            }
            Lifetime::Transient => {
                let ctx = ResolverContext::new(self);
                (reg.ctor)(&ctx)
            }
        }
    }
}

impl ResolverCore for ServiceProvider {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve_any_impl(key)
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("services", &self.inner().registry.iter().count())
            .field("scoped_slots", &self.inner().registry.scoped_count)
            .finish()
    }
}
