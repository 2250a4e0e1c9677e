//! Service collection module for dependency injection.
//!
//! This module contains the ServiceCollection type used to declare services
//! and their lifetimes before building a [`ServiceProvider`].

use std::sync::Arc;

use crate::key::{key_of_trait, key_of_type};
use crate::provider::ResolverContext;
use crate::registration::{AnyArc, Registration, Registry};
use crate::{DiResult, Key, Lifetime, ServiceDescriptor, ServiceProvider};

/// Registration side of the container.
///
/// Declarations are immutable once the collection is built: `build` consumes
/// the collection.
pub struct ServiceCollection {
    registry: Registry,
    prewarm: Vec<Key>,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            prewarm: Vec::new(),
        }
    }

    // ----- Concrete Type Registrations -----

    /// Registers a singleton instance that will be shared across the entire application.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scope_probe::ServiceCollection;
    /// struct Config {
    ///     database_url: String
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Config {
    ///     database_url: "postgres://localhost".to_string()
    /// });
    /// ```
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> &mut Self {
        let arc = Arc::new(value);
        let ctor = move |_: &ResolverContext| -> DiResult<AnyArc> { Ok(arc.clone()) };
        self.registry
            .insert(key_of_type::<T>(), Registration::new(Lifetime::Singleton, Box::new(ctor)));
        self
    }

    /// Registers a singleton factory that creates the instance on first request.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Singleton, factory)
    }

    /// Registers a scoped factory that creates one instance per scope.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, factory)
    }

    /// Registers a transient factory that creates a new instance on every request.
    ///
    /// No caching is performed: the factory runs on every resolution, even
    /// twice within the same scope.
    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, factory)
    }

    /// Registers an infallible factory under an explicit lifetime.
    pub fn add_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_try_factory::<T, _>(lifetime, move |r| Ok(factory(r)))
    }

    /// Registers a fallible factory under an explicit lifetime.
    ///
    /// An `Err` from the factory is returned to whoever resolved the service
    /// and nothing is cached, whatever the lifetime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scope_probe::{DiError, Lifetime, Resolver, ServiceCollection};
    ///
    /// struct Flaky;
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_try_factory::<Flaky, _>(Lifetime::Singleton, |_| {
    ///     Err(DiError::factory("Flaky", "backend unavailable"))
    /// });
    ///
    /// let provider = services.build();
    /// assert!(matches!(provider.get::<Flaky>(), Err(DiError::Factory { .. })));
    /// ```
    pub fn add_try_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> DiResult<T> + Send + Sync + 'static,
    {
        let ctor = move |r: &ResolverContext| -> DiResult<AnyArc> {
            let value = factory(r)?;
            Ok(Arc::new(value))
        };
        self.registry
            .insert(key_of_type::<T>(), Registration::new(lifetime, Box::new(ctor)));
        self
    }

    // ----- Trait Registrations -----

    /// Registers a singleton trait implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scope_probe::{ServiceCollection, Resolver};
    /// # use std::sync::Arc;
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// struct FixedClock;
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> u64 { 42 }
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton_trait::<dyn Clock>(Arc::new(FixedClock));
    ///
    /// let provider = services.build();
    /// assert_eq!(provider.get_required_trait::<dyn Clock>().now(), 42);
    /// ```
    pub fn add_singleton_trait<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
    {
        let ctor = move |_: &ResolverContext| -> DiResult<AnyArc> {
            Ok(Arc::new(value.clone()) as AnyArc)
        };
        self.registry
            .insert(key_of_trait::<T>(), Registration::new(Lifetime::Singleton, Box::new(ctor)));
        self
    }

    // ----- Startup -----

    /// Marks a singleton for eager initialization by [`ServiceProvider::prewarm`].
    pub fn prewarm<T: 'static + Send + Sync>(&mut self) -> &mut Self {
        let key = key_of_type::<T>();
        if !self.prewarm.contains(&key) {
            self.prewarm.push(key);
        }
        self
    }

    /// Describes every registration, in registration order.
    pub fn get_service_descriptors(&self) -> Vec<ServiceDescriptor> {
        self.registry
            .iter()
            .map(|(key, reg)| ServiceDescriptor {
                key: *key,
                lifetime: reg.lifetime,
            })
            .collect()
    }

    /// Builds the final service provider from this collection.
    pub fn build(mut self) -> ServiceProvider {
        self.registry.finalize();
        ServiceProvider::new(self.registry, self.prewarm)
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}
