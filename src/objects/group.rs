//! Group object - Named collection of entities

use crate::entities::EntityType;
use crate::tables::{TableKind, TableObject};
use crate::types::Handle;

/// Group object - represents a named group of entities
///
/// A group only lists its members; the entities themselves live in a
/// block. Each member carries the group's handle in its reactors while the
/// group is registered.
///
/// # DXF Object Type
/// GROUP
///
/// # Example
/// ```
/// use dxf_tables::objects::Group;
/// use dxf_tables::entities::Line;
///
/// let mut group = Group::new("Fixtures");
/// group.description = "Light fittings".to_string();
/// group.add_new_entity(Line::new());
/// assert_eq!(group.staged_entities().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Group {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle (the group table)
    pub owner: Handle,
    /// Group name
    pub name: String,
    /// Group description (DXF code 300)
    pub description: String,
    /// Group is selectable (DXF code 71, default: true)
    pub selectable: bool,
    /// Member entity handles (DXF code 340)
    entities: Vec<Handle>,
    /// New entities registered in model space when the group is added
    staged: Vec<EntityType>,
}

impl Group {
    /// Object type name
    pub const OBJECT_TYPE: &'static str = "GROUP";

    /// Name given to unnamed groups before the document numbers them
    pub const UNNAMED: &'static str = "*A";

    /// Create a new named group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            description: String::new(),
            selectable: true,
            entities: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Create an unnamed group; the document names it `*A1`, `*A2`, ... on add
    pub fn unnamed() -> Self {
        Self::new(Self::UNNAMED)
    }

    /// Create a group with description
    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut group = Self::new(name);
        group.description = description.into();
        group
    }

    /// Check if this is an unnamed group
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty() || self.name.starts_with('*')
    }

    /// Add an already registered entity by handle.
    ///
    /// On a live group use [`CadDocument::add_to_group`](crate::CadDocument::add_to_group)
    /// so the member gets the group reactor.
    pub fn add_entity(&mut self, handle: Handle) {
        if !handle.is_null() && !self.entities.contains(&handle) {
            self.entities.push(handle);
        }
    }

    /// Stage a new entity on a detached group
    pub fn add_new_entity(&mut self, entity: impl Into<EntityType>) {
        self.staged.push(entity.into());
    }

    /// Builder: Add entity
    pub fn with_entity(mut self, handle: Handle) -> Self {
        self.add_entity(handle);
        self
    }

    /// Builder: Stage a new entity
    pub fn with_new_entity(mut self, entity: impl Into<EntityType>) -> Self {
        self.add_new_entity(entity);
        self
    }

    /// Entities waiting to be registered
    pub fn staged_entities(&self) -> &[EntityType] {
        &self.staged
    }

    /// Member handles
    pub fn entities(&self) -> &[Handle] {
        &self.entities
    }

    /// Get the number of members
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check if the group contains a specific entity
    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains(&handle)
    }

    /// Iterate over entity handles
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.entities.iter()
    }

    pub(crate) fn remove_entity(&mut self, handle: Handle) -> bool {
        let before = self.entities.len();
        self.entities.retain(|h| *h != handle);
        self.entities.len() != before
    }

    pub(crate) fn take_staged(&mut self) -> Vec<EntityType> {
        std::mem::take(&mut self.staged)
    }

    pub(crate) fn take_entities(&mut self) -> Vec<Handle> {
        std::mem::take(&mut self.entities)
    }

    pub(crate) fn set_entities(&mut self, entities: Vec<Handle>) {
        self.entities = entities;
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::unnamed()
    }
}

impl TableObject for Group {
    const KIND: TableKind = TableKind::Group;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;

    #[test]
    fn test_group_creation() {
        let group = Group::new("TestGroup");
        assert_eq!(group.name, "TestGroup");
        assert!(group.is_empty());
        assert!(group.selectable);
        assert!(!group.is_unnamed());
    }

    #[test]
    fn test_group_unnamed() {
        let group = Group::default();
        assert!(group.is_unnamed());
        assert_eq!(group.name, "*A");
    }

    #[test]
    fn test_group_add_duplicate() {
        let mut group = Group::new("Test");
        group.add_entity(Handle::new(100));
        group.add_entity(Handle::new(100));
        group.add_entity(Handle::NULL);

        assert_eq!(group.len(), 1);
        assert!(group.contains(Handle::new(100)));
    }

    #[test]
    fn test_group_remove_entity() {
        let mut group = Group::new("Test")
            .with_entity(Handle::new(100))
            .with_entity(Handle::new(101));

        assert!(group.remove_entity(Handle::new(100)));
        assert_eq!(group.entities(), &[Handle::new(101)]);
        assert!(!group.remove_entity(Handle::new(999)));
    }

    #[test]
    fn test_staging() {
        let mut group = Group::new("Test").with_new_entity(Line::new());
        assert_eq!(group.staged_entities().len(), 1);
        assert!(group.is_empty());

        let staged = group.take_staged();
        assert_eq!(staged.len(), 1);
        assert!(group.staged_entities().is_empty());
    }
}
