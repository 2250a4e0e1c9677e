//! Service registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;

pub(crate) use crate::provider::ResolverContext;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Ctor = Box<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// Service registration with lifetime and constructor
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) ctor: Ctor,
    /// Write-once singleton cache, present only for singletons
    pub(crate) singleton_cell: Option<OnceCell<AnyArc>>,
    /// Index into each scope's cell array, assigned by `Registry::finalize`
    pub(crate) scoped_slot: Option<usize>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, ctor: Ctor) -> Self {
        let singleton_cell = match lifetime {
            Lifetime::Singleton => Some(OnceCell::new()),
            _ => None,
        };

        Self {
            lifetime,
            ctor,
            singleton_cell,
            scoped_slot: None,
        }
    }
}

/// Service registry holding all registrations
pub(crate) struct Registry {
    entries: HashMap<Key, Registration>,
    /// Registration order, kept for stable descriptors and slot assignment
    order: Vec<Key>,
    /// Total count of scoped registrations for slot allocation
    pub(crate) scoped_count: usize,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            scoped_count: 0,
        }
    }

    /// Inserts a registration, replacing any earlier one for the same key
    pub(crate) fn insert(&mut self, key: Key, registration: Registration) {
        if self.entries.insert(key, registration).is_none() {
            self.order.push(key);
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&Registration> {
        self.entries.get(key)
    }

    /// Iterates registrations in the order they were first added
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &Registration)> {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|reg| (key, reg)))
    }

    /// Assigns scoped slot indices. Called once by `ServiceCollection::build`.
    pub(crate) fn finalize(&mut self) {
        let mut next_scoped_slot = 0;

        for key in &self.order {
            if let Some(reg) = self.entries.get_mut(key) {
                if reg.lifetime == Lifetime::Scoped {
                    reg.scoped_slot = Some(next_scoped_slot);
                    next_scoped_slot += 1;
                }
            }
        }

        self.scoped_count = next_scoped_slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::key_of_type;

    fn noop(lifetime: Lifetime) -> Registration {
        Registration::new(lifetime, Box::new(|_: &ResolverContext| -> DiResult<AnyArc> { Ok(Arc::new(())) }))
    }

    #[test]
    fn test_finalize_assigns_dense_scoped_slots() {
        let mut registry = Registry::new();
        registry.insert(key_of_type::<u8>(), noop(Lifetime::Scoped));
        registry.insert(key_of_type::<u16>(), noop(Lifetime::Singleton));
        registry.insert(key_of_type::<u32>(), noop(Lifetime::Scoped));
        registry.insert(key_of_type::<u64>(), noop(Lifetime::Transient));
        registry.finalize();

        assert_eq!(registry.scoped_count, 2);
        assert_eq!(registry.get(&key_of_type::<u8>()).unwrap().scoped_slot, Some(0));
        assert_eq!(registry.get(&key_of_type::<u32>()).unwrap().scoped_slot, Some(1));
        assert_eq!(registry.get(&key_of_type::<u16>()).unwrap().scoped_slot, None);
        assert!(registry.get(&key_of_type::<u16>()).unwrap().singleton_cell.is_some());
        assert!(registry.get(&key_of_type::<u64>()).unwrap().singleton_cell.is_none());
    }

    #[test]
    fn test_reinsert_replaces_without_duplicating_order() {
        let mut registry = Registry::new();
        registry.insert(key_of_type::<u8>(), noop(Lifetime::Singleton));
        registry.insert(key_of_type::<u8>(), noop(Lifetime::Transient));

        let entries: Vec<_> = registry.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.lifetime, Lifetime::Transient);
    }
}
