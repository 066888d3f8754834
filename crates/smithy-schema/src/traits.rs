// SPDX-License-Identifier: Apache-2.0
//! Identity-keyed trait storage: traits are accessed by identity key, so
//! lookups are an array index, not a hash.
//!
//! Each trait class gets an incrementing id from a global mutable
//! counter, touched once per type. Here the counter lives behind a
//! single process-lifetime `Mutex<HashMap<TypeId, usize>>`: the hash
//! lookup happens once per trait *type* (to learn its id), while every
//! subsequent read through a [`TraitMap`] is a plain array index.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

static NEXT_TRAIT_ID: AtomicUsize = AtomicUsize::new(0);

fn registry() -> &'static Mutex<HashMap<TypeId, usize>> {
    static REGISTRY: OnceLock<Mutex<HashMap<TypeId, usize>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

fn id_for(type_id: TypeId) -> usize {
    let mut map = registry().lock().unwrap_or_else(|e| e.into_inner());
    *map.entry(type_id)
        .or_insert_with(|| NEXT_TRAIT_ID.fetch_add(1, Ordering::Relaxed))
}

/// A zero-sized handle identifying one trait's value type `T`.
///
/// Two `TraitKey::<T>::new()` calls for the same `T` always yield the
/// same numeric id, assigned once per `T` the first time it is
/// requested.
pub struct TraitKey<T> {
    id: usize,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: `#[derive(Clone, Copy)]` would require `T: Clone + Copy`,
// but a key identifying `T` doesn't need `T` itself to be copyable.
impl<T> Clone for TraitKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for TraitKey<T> {}

impl<T: Send + Sync + 'static> TraitKey<T> {
    /// Get (assigning on first call) the process-wide id for trait type `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: id_for(TypeId::of::<T>()),
            _marker: PhantomData,
        }
    }

    /// The process-wide numeric id for this trait type.
    #[must_use]
    pub fn id(self) -> usize {
        self.id
    }
}

impl<T: Send + Sync + 'static> Default for TraitKey<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable, array-indexed map from trait id to boxed trait value.
/// A schema's trait map is immutable after construction.
#[derive(Debug, Default, Clone)]
pub struct TraitMap {
    slots: Vec<Option<std::sync::Arc<dyn Any + Send + Sync>>>,
}

impl TraitMap {
    /// Build an empty trait map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trait value, growing the backing array as needed.
    /// Public so callers outside this crate can build the member-level
    /// trait maps passed into [`crate::SchemaBuilder::add_member`] (e.g.
    /// `smithy-http-binding` attaching `httpLabel`/`httpHeader` to an
    /// operation's input members) — there is still no mutation path once
    /// a [`crate::Schema`] exists, since `Schema` never exposes a
    /// `&mut TraitMap`.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: TraitKey<T>, value: T) {
        let id = key.id();
        if self.slots.len() <= id {
            self.slots.resize(id + 1, None);
        }
        self.slots[id] = Some(std::sync::Arc::new(value));
    }

    /// Look up a trait value by key; an array index, not a hash lookup.
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self, key: TraitKey<T>) -> Option<&T> {
        self.slots
            .get(key.id())
            .and_then(|slot| slot.as_ref())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// `true` if a value is present for `key`.
    #[must_use]
    pub fn contains<T: Send + Sync + 'static>(&self, key: TraitKey<T>) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct HttpLabelTrait;
    #[derive(Debug, PartialEq)]
    struct RequiredTrait;

    #[test]
    fn distinct_trait_types_get_distinct_stable_ids() {
        let k1 = TraitKey::<HttpLabelTrait>::new();
        let k2 = TraitKey::<HttpLabelTrait>::new();
        let k3 = TraitKey::<RequiredTrait>::new();
        assert_eq!(k1.id(), k2.id());
        assert_ne!(k1.id(), k3.id());
    }

    #[test]
    fn trait_map_round_trips_by_key() {
        let key = TraitKey::<HttpLabelTrait>::new();
        let mut map = TraitMap::new();
        map.insert(key, HttpLabelTrait);
        assert!(map.contains(key));
        assert_eq!(map.get(key), Some(&HttpLabelTrait));

        let other_key = TraitKey::<RequiredTrait>::new();
        assert!(!map.contains(other_key));
    }
}
