//! Table objects and the generic name-keyed registry
//!
//! Every registry in a document is a [`Table<T>`]: two parallel maps keyed
//! by the folded (case-insensitive) entry name, one holding the entries and
//! one holding each entry's [`ReferenceCount`]. The maps are only mutated
//! together. The cascade rules that keep tables consistent with each other
//! live in [`crate::document`].

use crate::types::Handle;
use indexmap::IndexMap;
use std::fmt;

pub mod appid;
pub mod block_record;
pub mod dimstyle;
pub mod layer;
pub mod linetype;
pub mod references;
pub mod textstyle;
pub mod ucs;
pub mod view;
pub mod vport;

pub use appid::AppId;
pub use block_record::{BlockFlags, BlockRecord};
pub use dimstyle::DimStyle;
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};
pub use references::{ObjectKind, ObjectRef, ReferenceCount};
pub use textstyle::{TextGenerationFlags, TextStyle};
pub use ucs::Ucs;
pub use view::View;
pub use vport::VPort;

/// The kinds of registry a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    AppId,
    BlockRecord,
    DimStyle,
    Group,
    ImageDefinition,
    Layer,
    LayerState,
    Layout,
    LineType,
    MLineStyle,
    MultiLeaderStyle,
    ShapeStyle,
    TextStyle,
    Ucs,
    UnderlayDefinition,
    View,
    VPort,
}

impl TableKind {
    pub const ALL: [TableKind; 17] = [
        TableKind::AppId,
        TableKind::BlockRecord,
        TableKind::DimStyle,
        TableKind::Group,
        TableKind::ImageDefinition,
        TableKind::Layer,
        TableKind::LayerState,
        TableKind::Layout,
        TableKind::LineType,
        TableKind::MLineStyle,
        TableKind::MultiLeaderStyle,
        TableKind::ShapeStyle,
        TableKind::TextStyle,
        TableKind::Ucs,
        TableKind::UnderlayDefinition,
        TableKind::View,
        TableKind::VPort,
    ];

    /// Display name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::AppId => "AppId",
            TableKind::BlockRecord => "BlockRecord",
            TableKind::DimStyle => "DimStyle",
            TableKind::Group => "Group",
            TableKind::ImageDefinition => "ImageDefinition",
            TableKind::Layer => "Layer",
            TableKind::LayerState => "LayerState",
            TableKind::Layout => "Layout",
            TableKind::LineType => "LineType",
            TableKind::MLineStyle => "MLineStyle",
            TableKind::MultiLeaderStyle => "MultiLeaderStyle",
            TableKind::ShapeStyle => "ShapeStyle",
            TableKind::TextStyle => "TextStyle",
            TableKind::Ucs => "Ucs",
            TableKind::UnderlayDefinition => "UnderlayDefinition",
            TableKind::View => "View",
            TableKind::VPort => "VPort",
        }
    }

    /// Maximum number of entries a table of this kind may hold
    pub fn default_capacity(&self) -> usize {
        match self {
            TableKind::Layout => 256,
            TableKind::Group
            | TableKind::LayerState
            | TableKind::ImageDefinition
            | TableKind::UnderlayDefinition => usize::MAX,
            _ => i16::MAX as usize,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fold a name into its lookup key.
///
/// Every table uses this one rule, so "Walls", "WALLS" and "walls" address
/// the same entry. The display name on the entry keeps its original case.
pub fn fold_name(name: &str) -> String {
    name.to_uppercase()
}

/// Case-insensitive name comparison using [`fold_name`]
pub fn same_name(a: &str, b: &str) -> bool {
    a == b || fold_name(a) == fold_name(b)
}

const INVALID_NAME_CHARS: &[char] = &['\\', '<', '>', '/', '?', '"', ':', ';', '*', '|', ',', '=', '`'];

/// Check if `name` can be used as a table entry name.
///
/// A leading `*` marks special and anonymous names and is allowed.
pub fn is_valid_name(name: &str) -> bool {
    let body = name.strip_prefix('*').unwrap_or(name);
    !body.trim().is_empty() && !body.contains(INVALID_NAME_CHARS)
}

/// A cross-registry edge: the name of an entry in another table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub kind: TableKind,
    pub name: String,
}

impl TableRef {
    pub fn new(kind: TableKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Check if this edge targets `name` in table `kind`
    pub fn targets(&self, kind: TableKind, name: &str) -> bool {
        self.kind == kind && same_name(&self.name, name)
    }
}

/// Replace `field` with `new` when it currently names `old`
pub(crate) fn retarget_name(field: &mut String, old: &str, new: &str) {
    if same_name(field, old) {
        *field = new.to_string();
    }
}

/// [`retarget_name`] for optional edges
pub(crate) fn retarget_optional(field: &mut Option<String>, old: &str, new: &str) {
    if let Some(name) = field.as_mut() {
        retarget_name(name, old, new);
    }
}

/// Base trait for everything a registry can hold
pub trait TableObject: fmt::Debug + Clone {
    /// The registry this type lives in
    const KIND: TableKind;

    /// Get the entry's handle (null while detached)
    fn handle(&self) -> Handle;

    /// Set the entry's handle
    fn set_handle(&mut self, handle: Handle);

    /// Handle of the table holding the entry (null while detached)
    fn owner(&self) -> Handle;

    /// Set the owning table handle
    fn set_owner(&mut self, owner: Handle);

    /// Get the entry's name
    fn name(&self) -> &str;

    /// Set the entry's name.
    ///
    /// Only meaningful on detached entries; live entries are renamed
    /// through the document so the registry can re-key its maps.
    fn set_name(&mut self, name: String);

    /// Check if this is a built-in default entry that can never be removed
    fn is_reserved(&self) -> bool {
        false
    }

    /// Entries of other tables this entry depends on.
    ///
    /// Each returned edge holds exactly one use in the target's reference
    /// count while the entry is registered. Repeated edges count repeatedly.
    fn references(&self) -> Vec<TableRef> {
        Vec::new()
    }

    /// Point every edge naming `old` in table `kind` at `new` instead
    fn retarget(&mut self, _kind: TableKind, _old: &str, _new: &str) {}
}

/// Read access to a registry without knowing its entry type
pub trait Registry {
    fn kind(&self) -> TableKind;
    fn handle(&self) -> Handle;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains(&self, name: &str) -> bool;
    /// Handle of the entry called `name`
    fn entry_handle(&self, name: &str) -> Option<Handle>;
    /// Display names of every entry
    fn entry_names(&self) -> Vec<String>;
    fn has_references(&self, name: &str) -> bool;
    fn get_references(&self, name: &str) -> Vec<(ObjectRef, usize)>;
}

/// Reference bookkeeping the document performs through type-erased tables
pub(crate) trait RegistryMut: Registry {
    fn add_use(&mut self, name: &str, referrer: ObjectRef) -> bool;
    fn remove_use(&mut self, name: &str, referrer: Handle) -> bool;
    fn retarget_entry(&mut self, name: &str, kind: TableKind, old: &str, new: &str) -> bool;
}

/// Generic registry storing named entries and their reference counts
#[derive(Debug, Clone)]
pub struct Table<T: TableObject> {
    /// Entries stored by folded name
    entries: IndexMap<String, T>,
    /// Reference count of each entry, same keys as `entries`
    references: IndexMap<String, ReferenceCount>,
    /// Table handle, the owner of every entry
    handle: Handle,
}

impl<T: TableObject> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::with_handle(Handle::NULL)
    }

    /// Create a table with a specific handle
    pub fn with_handle(handle: Handle) -> Self {
        Table {
            entries: IndexMap::new(),
            references: IndexMap::new(),
            handle,
        }
    }

    /// Get the table's handle
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// The kind of entry this table holds
    pub fn kind(&self) -> TableKind {
        T::KIND
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&fold_name(name))
    }

    /// Alias of [`get`](Self::get)
    pub fn try_get(&self, name: &str) -> Option<&T> {
        self.get(name)
    }

    /// Find an entry by handle
    pub fn get_by_handle(&self, handle: Handle) -> Option<&T> {
        if handle.is_null() {
            return None;
        }
        self.entries.values().find(|e| e.handle() == handle)
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_name(name))
    }

    /// Check if this very object (same name and handle) is registered here
    pub fn contains_object(&self, item: &T) -> bool {
        item.handle().is_valid()
            && self
                .get(item.name())
                .is_some_and(|entry| entry.handle() == item.handle())
    }

    /// Check if anything still uses the entry
    pub fn has_references(&self, name: &str) -> bool {
        self.references
            .get(&fold_name(name))
            .is_some_and(|refs| !refs.is_empty())
    }

    /// Objects using the entry, with their use counts
    pub fn get_references(&self, name: &str) -> Vec<(ObjectRef, usize)> {
        self.references
            .get(&fold_name(name))
            .map(|refs| refs.iter().collect())
            .unwrap_or_default()
    }

    /// The full reference count of an entry
    pub fn reference_count(&self, name: &str) -> Option<&ReferenceCount> {
        self.references.get(&fold_name(name))
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Alias of [`len`](Self::len)
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries. No ordering is guaranteed.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&fold_name(name))
    }

    /// Store an entry with an empty reference count. An entry already stored
    /// under the same key is replaced.
    pub(crate) fn insert(&mut self, item: T) {
        let key = fold_name(item.name());
        self.references.insert(key.clone(), ReferenceCount::new());
        self.entries.insert(key, item);
    }

    /// Take an entry out of both maps
    pub(crate) fn take(&mut self, name: &str) -> Option<(T, ReferenceCount)> {
        let key = fold_name(name);
        let item = self.entries.shift_remove(&key)?;
        let refs = self.references.shift_remove(&key).unwrap_or_default();
        Some((item, refs))
    }

    /// Move an entry to a new name, carrying its reference count over
    /// unchanged. The caller has already checked for collisions.
    pub(crate) fn rekey(&mut self, old: &str, new: &str) -> bool {
        let Some((mut item, refs)) = self.take(old) else {
            return false;
        };
        item.set_name(new.to_string());
        let key = fold_name(new);
        self.references.insert(key.clone(), refs);
        self.entries.insert(key, item);
        true
    }
}

impl<T: TableObject> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableObject> Registry for Table<T> {
    fn kind(&self) -> TableKind {
        T::KIND
    }

    fn handle(&self) -> Handle {
        self.handle
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, name: &str) -> bool {
        Table::contains(self, name)
    }

    fn entry_handle(&self, name: &str) -> Option<Handle> {
        self.get(name).map(|e| e.handle())
    }

    fn entry_names(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    fn has_references(&self, name: &str) -> bool {
        Table::has_references(self, name)
    }

    fn get_references(&self, name: &str) -> Vec<(ObjectRef, usize)> {
        Table::get_references(self, name)
    }
}

impl<T: TableObject> RegistryMut for Table<T> {
    fn add_use(&mut self, name: &str, referrer: ObjectRef) -> bool {
        match self.references.get_mut(&fold_name(name)) {
            Some(refs) => {
                refs.add(referrer);
                true
            }
            None => false,
        }
    }

    fn remove_use(&mut self, name: &str, referrer: Handle) -> bool {
        self.references
            .get_mut(&fold_name(name))
            .is_some_and(|refs| refs.remove(referrer))
    }

    fn retarget_entry(&mut self, name: &str, kind: TableKind, old: &str, new: &str) -> bool {
        match self.get_mut(name) {
            Some(entry) => {
                entry.retarget(kind, old, new);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock table entry for testing
    #[derive(Debug, Clone)]
    struct MockEntry {
        handle: Handle,
        owner: Handle,
        name: String,
    }

    impl MockEntry {
        fn new(handle: u64, name: &str) -> Self {
            MockEntry {
                handle: Handle::new(handle),
                owner: Handle::NULL,
                name: name.to_string(),
            }
        }
    }

    impl TableObject for MockEntry {
        const KIND: TableKind = TableKind::AppId;

        fn handle(&self) -> Handle {
            self.handle
        }

        fn set_handle(&mut self, handle: Handle) {
            self.handle = handle;
        }

        fn owner(&self) -> Handle {
            self.owner
        }

        fn set_owner(&mut self, owner: Handle) {
            self.owner = owner;
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }
    }

    #[test]
    fn test_table_insert_and_get() {
        let mut table = Table::new();
        table.insert(MockEntry::new(1, "Test"));

        assert!(table.contains("Test"));
        assert!(table.contains("TEST")); // Case-insensitive
        assert_eq!(table.get("test").map(|e| e.name()), Some("Test"));
        assert_eq!(table.len(), 1);
        assert!(table.reference_count("test").is_some());
    }

    #[test]
    fn test_parallel_maps_leave_together() {
        let mut table = Table::new();
        table.insert(MockEntry::new(1, "Test"));

        let (item, refs) = table.take("test").unwrap();
        assert_eq!(item.name, "Test");
        assert!(refs.is_empty());
        assert!(!table.contains("Test"));
        assert!(table.reference_count("Test").is_none());
    }

    #[test]
    fn test_rekey_carries_references() {
        let mut table = Table::new();
        table.insert(MockEntry::new(1, "Old"));
        assert!(table.add_use("old", ObjectRef::entity(Handle::new(9))));

        assert!(table.rekey("OLD", "New"));
        assert!(!table.contains("Old"));
        assert_eq!(table.get("new").unwrap().name, "New");
        assert!(table.has_references("New"));
        assert_eq!(table.get_references("NEW").len(), 1);
    }

    #[test]
    fn test_use_counting_on_missing_entry() {
        let mut table: Table<MockEntry> = Table::new();
        assert!(!table.add_use("nope", ObjectRef::entity(Handle::new(3))));
        assert!(!table.remove_use("nope", Handle::new(3)));
    }

    #[test]
    fn test_contains_object_checks_handle() {
        let mut table = Table::new();
        table.insert(MockEntry::new(7, "A"));

        assert!(table.contains_object(&MockEntry::new(7, "a")));
        assert!(!table.contains_object(&MockEntry::new(8, "A")));
        assert!(!table.contains_object(&MockEntry::new(0, "A")));
        assert_eq!(table.get_by_handle(Handle::new(7)).map(|e| e.name()), Some("A"));
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_name("Walls"));
        assert!(is_valid_name("*Model_Space"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("*"));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("x*y"));
        assert!(same_name("Dashed", "DASHED"));
        assert_eq!(fold_name("Ab"), "AB");
    }

    #[test]
    fn test_table_ref_targets() {
        let edge = TableRef::new(TableKind::LineType, "Dashed");
        assert!(edge.targets(TableKind::LineType, "DASHED"));
        assert!(!edge.targets(TableKind::Layer, "Dashed"));
    }
}
