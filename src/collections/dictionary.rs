//! Keyed observable dictionary

use super::EventResponse;
use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// Receives the notifications of an [`ObservableDictionary`].
pub trait DictionaryObserver<K, V> {
    /// Called before `key` is bound to `value`; may cancel.
    fn before_add(&mut self, _key: &K, _value: &V) -> EventResponse {
        EventResponse::Proceed
    }

    /// Called once the pair is stored.
    fn after_add(&mut self, _key: &K, _value: &mut V) {}

    /// Called before the pair is taken out; may cancel.
    fn before_remove(&mut self, _key: &K, _value: &V) -> EventResponse {
        EventResponse::Proceed
    }

    /// Called once the pair has left the dictionary.
    fn after_remove(&mut self, _key: &K, _value: &mut V) {}
}

struct Silent;

impl<K, V> DictionaryObserver<K, V> for Silent {}

type Observers<K, V> = Vec<Box<dyn DictionaryObserver<K, V>>>;

/// A key-value store raising cancelable before/after notifications.
///
/// Binding a key that is already present replaces the value; the
/// replacement is reported as a remove of the old pair followed by an add
/// of the new pair within one envelope. Iteration follows insertion order.
///
/// As with [`ObservableList`](super::ObservableList), a per-call listener
/// is asked after the subscribed observers and notified before them.
pub struct ObservableDictionary<K, V> {
    entries: IndexMap<K, V>,
    observers: Observers<K, V>,
}

impl<K: Hash + Eq + Clone, V> ObservableDictionary<K, V> {
    /// Create an empty dictionary without observers
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for every subsequent mutation
    pub fn subscribe(&mut self, observer: impl DictionaryObserver<K, V> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutable access to a value in place; raises no notification.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Bind `key` to `value`.
    ///
    /// Returns the replaced value (if any), or the new value back when an
    /// observer cancelled.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, V> {
        self.insert_with(key, value, &mut Silent)
    }

    /// [`insert`](Self::insert) with an extra listener for this call only
    pub fn insert_with(
        &mut self,
        key: K,
        value: V,
        listener: &mut dyn DictionaryObserver<K, V>,
    ) -> Result<Option<V>, V> {
        if let Some(current) = self.entries.get(&key) {
            if vetoed_remove(&mut self.observers, &key, current, listener) {
                return Err(value);
            }
        }
        if vetoed_add(&mut self.observers, &key, &value, listener) {
            return Err(value);
        }

        let mut replaced = self.entries.insert(key.clone(), value);
        if let Some(old) = replaced.as_mut() {
            listener.after_remove(&key, old);
            for observer in self.observers.iter_mut() {
                observer.after_remove(&key, old);
            }
        }
        if let Some(stored) = self.entries.get_mut(&key) {
            listener.after_add(&key, stored);
            for observer in self.observers.iter_mut() {
                observer.after_add(&key, stored);
            }
        }
        Ok(replaced)
    }

    /// Remove the pair bound to `key`. Returns `None` when absent or when an
    /// observer cancelled.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_with(key, &mut Silent)
    }

    /// [`remove`](Self::remove) with an extra listener for this call only
    pub fn remove_with(
        &mut self,
        key: &K,
        listener: &mut dyn DictionaryObserver<K, V>,
    ) -> Option<V> {
        let current = self.entries.get(key)?;
        if vetoed_remove(&mut self.observers, key, current, listener) {
            return None;
        }
        let mut value = self.entries.shift_remove(key)?;
        listener.after_remove(key, &mut value);
        for observer in self.observers.iter_mut() {
            observer.after_remove(key, &mut value);
        }
        Some(value)
    }

    /// Remove every pair; pairs whose removal is cancelled stay.
    pub fn clear(&mut self) -> Vec<(K, V)> {
        let keys: Vec<K> = self.entries.keys().cloned().collect();
        keys.into_iter()
            .filter_map(|key| self.remove(&key).map(|value| (key, value)))
            .collect()
    }

    pub(crate) fn take_entries(&mut self) -> IndexMap<K, V> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn restore_entries(&mut self, entries: IndexMap<K, V>) {
        self.entries = entries;
    }
}

fn vetoed_add<K, V>(
    observers: &mut Observers<K, V>,
    key: &K,
    value: &V,
    listener: &mut dyn DictionaryObserver<K, V>,
) -> bool {
    observers
        .iter_mut()
        .any(|observer| observer.before_add(key, value).is_cancel())
        || listener.before_add(key, value).is_cancel()
}

fn vetoed_remove<K, V>(
    observers: &mut Observers<K, V>,
    key: &K,
    value: &V,
    listener: &mut dyn DictionaryObserver<K, V>,
) -> bool {
    observers
        .iter_mut()
        .any(|observer| observer.before_remove(key, value).is_cancel())
        || listener.before_remove(key, value).is_cancel()
}

impl<K: Hash + Eq + Clone, V> Default for ObservableDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the entries only; observers stay with the original.
impl<K: Clone, V: Clone> Clone for ObservableDictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            observers: Vec::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ObservableDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableDictionary")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<K: PartialEq + Hash + Eq, V: PartialEq> PartialEq for ObservableDictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
