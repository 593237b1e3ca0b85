//! Typed, per-agent scratch storage.
//!
//! Species layers keep their private state (stamina, charge timers, warning
//! timers, ...) here instead of growing the generic agent struct. Keys are
//! typed so a read can never silently reinterpret another species' data.

use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(&key.id)?;
        Some(downcast_or_panic(key.id, value.downcast_ref::<T>()))
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        Some(downcast_or_panic(key.id, value.downcast_mut::<T>()))
    }

    /// Copy of the stored value, if any.
    pub fn get_copied<T: Copy + 'static>(&self, key: BbKey<T>) -> Option<T> {
        self.get(key).copied()
    }

    /// Mutable access, inserting `make()` first when the key is absent.
    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        key: BbKey<T>,
        make: impl FnOnce() -> T,
    ) -> &mut T {
        let value = self
            .values
            .entry(key.id)
            .or_insert_with(|| Box::new(make()));
        downcast_or_panic(key.id, value.downcast_mut::<T>())
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        Some(*downcast_or_panic(key.id, value.downcast::<T>().ok()))
    }
}

// Two keys sharing an id with different types is a programming error in the
// key tables, not a runtime condition.
fn downcast_or_panic<V>(id: u64, value: Option<V>) -> V {
    match value {
        Some(v) => v,
        None => panic!(
            "blackboard type mismatch for key id={} (stored type differs from requested)",
            id
        ),
    }
}
