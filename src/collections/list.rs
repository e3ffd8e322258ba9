//! Ordered observable list

use super::EventResponse;
use std::fmt;

/// Receives the notifications of an [`ObservableList`].
///
/// Every method has a no-op default so observers implement only what they
/// need.
pub trait CollectionObserver<T> {
    /// Called before `item` is inserted. Returning [`EventResponse::Cancel`]
    /// keeps it out of the list.
    fn before_add(&mut self, _item: &T) -> EventResponse {
        EventResponse::Proceed
    }

    /// Called once `item` is stored in the list.
    fn after_add(&mut self, _item: &mut T) {}

    /// Called before `item` is taken out. Returning
    /// [`EventResponse::Cancel`] leaves it in place.
    fn before_remove(&mut self, _item: &T) -> EventResponse {
        EventResponse::Proceed
    }

    /// Called once `item` has left the list.
    fn after_remove(&mut self, _item: &mut T) {}
}

/// Observer that accepts everything and does nothing
struct Silent;

impl<T> CollectionObserver<T> for Silent {}

/// An ordered list raising cancelable before/after notifications.
///
/// Observers either subscribe for the lifetime of the list
/// ([`subscribe`](Self::subscribe)) or are passed to a single call
/// (`*_with` methods). In the before phase the subscribed observers are
/// asked first and the per-call listener last, so the listener only sees
/// changes nobody vetoed. In the after phase the listener is notified first.
///
/// # Example
/// ```
/// use dxf_tables::collections::{CollectionObserver, EventResponse, ObservableList};
///
/// struct NoNegatives;
///
/// impl CollectionObserver<i32> for NoNegatives {
///     fn before_add(&mut self, item: &i32) -> EventResponse {
///         if *item < 0 { EventResponse::Cancel } else { EventResponse::Proceed }
///     }
/// }
///
/// let mut list = ObservableList::new();
/// list.subscribe(NoNegatives);
/// assert!(list.push(3).is_ok());
/// assert_eq!(list.push(-1), Err(-1));
/// assert_eq!(list.len(), 1);
/// ```
pub struct ObservableList<T> {
    items: Vec<T>,
    observers: Observers<T>,
}

impl<T> ObservableList<T> {
    /// Create an empty list without observers
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for every subsequent mutation
    pub fn subscribe(&mut self, observer: impl CollectionObserver<T> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Drop every subscribed observer
    pub fn unsubscribe_all(&mut self) {
        self.observers.clear();
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to an item in place. No notification is raised: the
    /// list membership does not change.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Index of the first item matching `pred`
    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }

    /// Append an item. Returns its index, or the item back if an observer
    /// cancelled the insertion.
    pub fn push(&mut self, item: T) -> Result<usize, T> {
        self.push_with(item, &mut Silent)
    }

    /// [`push`](Self::push) with an extra listener for this call only
    pub fn push_with(
        &mut self,
        item: T,
        listener: &mut dyn CollectionObserver<T>,
    ) -> Result<usize, T> {
        let index = self.items.len();
        self.insert_with(index, item, listener).map(|_| index)
    }

    /// Insert an item at `index`, shifting later items.
    ///
    /// # Panics
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), T> {
        self.insert_with(index, item, &mut Silent)
    }

    /// [`insert`](Self::insert) with an extra listener for this call only
    pub fn insert_with(
        &mut self,
        index: usize,
        item: T,
        listener: &mut dyn CollectionObserver<T>,
    ) -> Result<(), T> {
        if vetoed_add(&mut self.observers, &item, listener) {
            return Err(item);
        }
        self.items.insert(index, item);
        self.notify_added(index, listener);
        Ok(())
    }

    /// Remove the item at `index`. Returns `None` when the index is out of
    /// range or an observer cancelled the removal.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.remove_with(index, &mut Silent)
    }

    /// [`remove`](Self::remove) with an extra listener for this call only
    pub fn remove_with(
        &mut self,
        index: usize,
        listener: &mut dyn CollectionObserver<T>,
    ) -> Option<T> {
        let current = self.items.get(index)?;
        if vetoed_remove(&mut self.observers, current, listener) {
            return None;
        }
        let mut item = self.items.remove(index);
        self.notify_removed(&mut item, listener);
        Some(item)
    }

    /// Replace the item at `index`.
    ///
    /// Modelled as a remove followed by an add sharing one envelope: both
    /// `before_remove` (old item) and `before_add` (new item) run first and
    /// either may cancel; then the slot is replaced and `after_remove`,
    /// `after_add` run. Returns the previous item, or the new one back when
    /// cancelled or out of range.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, T> {
        self.set_with(index, item, &mut Silent)
    }

    /// [`set`](Self::set) with an extra listener for this call only
    pub fn set_with(
        &mut self,
        index: usize,
        item: T,
        listener: &mut dyn CollectionObserver<T>,
    ) -> Result<T, T> {
        let Some(current) = self.items.get(index) else {
            return Err(item);
        };
        if vetoed_remove(&mut self.observers, current, listener)
            || vetoed_add(&mut self.observers, &item, listener)
        {
            return Err(item);
        }
        let mut old = std::mem::replace(&mut self.items[index], item);
        self.notify_removed(&mut old, listener);
        self.notify_added(index, listener);
        Ok(old)
    }

    /// Remove every item, one notification pair per item. Items whose
    /// removal is cancelled stay. Returns the removed items.
    pub fn clear(&mut self) -> Vec<T> {
        self.clear_with(&mut Silent)
    }

    /// [`clear`](Self::clear) with an extra listener for this call only
    pub fn clear_with(&mut self, listener: &mut dyn CollectionObserver<T>) -> Vec<T> {
        let mut removed = Vec::new();
        let mut index = self.items.len();
        while index > 0 {
            index -= 1;
            if let Some(item) = self.remove_with(index, listener) {
                removed.push(item);
            }
        }
        removed.reverse();
        removed
    }

    /// Move every item out without notifications, leaving the observers in place.
    pub(crate) fn take_items(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    /// Put items back without notifications.
    fn notify_added(&mut self, index: usize, listener: &mut dyn CollectionObserver<T>) {
        let item = &mut self.items[index];
        listener.after_add(item);
        for observer in self.observers.iter_mut() {
            observer.after_add(item);
        }
    }

    fn notify_removed(&mut self, item: &mut T, listener: &mut dyn CollectionObserver<T>) {
        listener.after_remove(item);
        for observer in self.observers.iter_mut() {
            observer.after_remove(item);
        }
    }
}

type Observers<T> = Vec<Box<dyn CollectionObserver<T>>>;

/// Runs the `before_add` phase; `true` when someone cancelled.
fn vetoed_add<T>(
    observers: &mut Observers<T>,
    item: &T,
    listener: &mut dyn CollectionObserver<T>,
) -> bool {
    observers
        .iter_mut()
        .any(|observer| observer.before_add(item).is_cancel())
        || listener.before_add(item).is_cancel()
}

/// Runs the `before_remove` phase; `true` when someone cancelled.
fn vetoed_remove<T>(
    observers: &mut Observers<T>,
    item: &T,
    listener: &mut dyn CollectionObserver<T>,
) -> bool {
    observers
        .iter_mut()
        .any(|observer| observer.before_remove(item).is_cancel())
        || listener.before_remove(item).is_cancel()
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the items only; observers stay with the original list.
impl<T: Clone> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            observers: Vec::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            observers: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ObservableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
