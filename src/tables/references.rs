//! Per-entry reference counting

use super::TableKind;
use crate::types::Handle;
use indexmap::IndexMap;

/// What kind of object holds a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// An entry of another (or the same) table
    TableEntry(TableKind),
    /// A graphical entity
    Entity,
    /// An attribute definition owned by a block
    AttributeDefinition,
}

/// A referencing object, addressed by its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub handle: Handle,
    pub kind: ObjectKind,
}

impl ObjectRef {
    pub fn new(handle: Handle, kind: ObjectKind) -> Self {
        Self { handle, kind }
    }

    /// Reference held by an entry of table `kind`
    pub fn entry(handle: Handle, kind: TableKind) -> Self {
        Self::new(handle, ObjectKind::TableEntry(kind))
    }

    /// Reference held by an entity
    pub fn entity(handle: Handle) -> Self {
        Self::new(handle, ObjectKind::Entity)
    }
}

/// The uses of one table entry, counted per referencing object.
///
/// A referencing object is dropped from the map once its count reaches
/// zero. An empty count only makes the entry removable; it never removes
/// it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCount {
    uses: IndexMap<Handle, (ObjectKind, usize)>,
}

impl ReferenceCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more use by `referrer`
    pub fn add(&mut self, referrer: ObjectRef) {
        self.uses
            .entry(referrer.handle)
            .and_modify(|(_, count)| *count += 1)
            .or_insert((referrer.kind, 1));
    }

    /// Drop one use by `referrer`. Returns `false` if it held none.
    pub fn remove(&mut self, referrer: Handle) -> bool {
        let Some((_, count)) = self.uses.get_mut(&referrer) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.uses.shift_remove(&referrer);
        }
        true
    }

    /// Uses held by one referrer
    pub fn uses_by(&self, referrer: Handle) -> usize {
        self.uses.get(&referrer).map_or(0, |(_, count)| *count)
    }

    /// Check whether `referrer` holds at least one use
    pub fn contains(&self, referrer: Handle) -> bool {
        self.uses.contains_key(&referrer)
    }

    /// Number of distinct referencing objects
    pub fn len(&self) -> usize {
        self.uses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    /// Sum of all uses
    pub fn total(&self) -> usize {
        self.uses.values().map(|(_, count)| count).sum()
    }

    /// Referencing objects with their use counts
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, usize)> + '_ {
        self.uses
            .iter()
            .map(|(handle, (kind, count))| (ObjectRef::new(*handle, *kind), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_counts_per_referrer() {
        let mut refs = ReferenceCount::new();
        let a = ObjectRef::entity(Handle::new(0x20));
        let b = ObjectRef::entry(Handle::new(0x21), TableKind::Layer);

        refs.add(a);
        refs.add(a);
        refs.add(b);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs.total(), 3);
        assert_eq!(refs.uses_by(a.handle), 2);
    }

    #[test]
    fn test_remove_drops_at_zero() {
        let mut refs = ReferenceCount::new();
        let a = ObjectRef::entity(Handle::new(0x20));
        refs.add(a);
        refs.add(a);

        assert!(refs.remove(a.handle));
        assert!(refs.contains(a.handle));
        assert!(refs.remove(a.handle));
        assert!(!refs.contains(a.handle));
        assert!(refs.is_empty());
        assert!(!refs.remove(a.handle));
    }

    #[test]
    fn test_iter_reports_kind() {
        let mut refs = ReferenceCount::new();
        refs.add(ObjectRef::entry(Handle::new(5), TableKind::DimStyle));
        let listed: Vec<_> = refs.iter().collect();
        assert_eq!(
            listed,
            vec![(ObjectRef::entry(Handle::new(5), TableKind::DimStyle), 1)]
        );
    }
}
