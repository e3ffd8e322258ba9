//! Block record table entry

use super::{retarget_name, same_name, TableKind, TableObject, TableRef};
use crate::collections::{ObservableDictionary, ObservableList};
use crate::entities::{AttributeDefinition, EntityType};
use crate::types::{Handle, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Block record flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: i16 {
        /// Block is anonymous
        const ANONYMOUS = 1;
        /// Block has attribute definitions
        const HAS_ATTRIBUTES = 2;
        /// Block is an external reference (xref)
        const XREF = 4;
        /// Block is an xref overlay
        const XREF_OVERLAY = 8;
        /// Block is externally dependent
        const EXTERNAL = 16;
    }
}

/// A block record table entry.
///
/// A block owns its entities and attribute definitions. While the block is
/// registered in a document, both collections are kept in sync with the
/// document through [`CadDocument`](crate::CadDocument) methods; pushing
/// directly onto a live block's lists bypasses registration.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Unique handle for the block record table entry
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Block name
    pub name: String,
    /// Block flags
    pub flags: BlockFlags,
    /// Layer of the block definition itself
    pub layer: String,
    /// Insertion base point
    pub base_point: Vector3,
    /// Block description
    pub description: String,
    /// Layout handle (if this block backs a layout)
    pub layout: Handle,
    /// Explodability flag
    pub explodable: bool,
    /// Can scale uniformly
    pub scale_uniformly: bool,
    /// Entities owned by this block
    pub entities: ObservableList<EntityType>,
    /// Attribute definitions keyed by tag
    pub attribute_definitions: ObservableDictionary<String, AttributeDefinition>,
}

impl BlockRecord {
    pub const MODEL_SPACE: &'static str = "*Model_Space";
    pub const PAPER_SPACE: &'static str = "*Paper_Space";

    /// Create a new block record
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: BlockFlags::empty(),
            layer: "0".to_string(),
            base_point: Vector3::ZERO,
            description: String::new(),
            layout: Handle::NULL,
            explodable: true,
            scale_uniformly: false,
            entities: ObservableList::new(),
            attribute_definitions: ObservableDictionary::new(),
        }
    }

    /// Create the model space block record
    pub fn model_space() -> Self {
        Self::new(Self::MODEL_SPACE)
    }

    /// Create the paper space block record
    pub fn paper_space() -> Self {
        Self::new(Self::PAPER_SPACE)
    }

    /// Name of the paper space block at position `index` among the paper
    /// space layouts: `*Paper_Space`, `*Paper_Space0`, `*Paper_Space1`, ...
    pub fn paper_space_name(index: usize) -> String {
        match index {
            0 => Self::PAPER_SPACE.to_string(),
            n => format!("{}{}", Self::PAPER_SPACE, n - 1),
        }
    }

    /// Stage an entity in a detached block; it is registered when the block
    /// is added to a document.
    ///
    /// Silent: if an observer subscribed to [`entities`](Self::entities)
    /// cancels the push, the entity is dropped. Stage entities before
    /// subscribing, or push through the list to see the outcome.
    pub fn with_entity(mut self, entity: impl Into<EntityType>) -> Self {
        let _ = self.entities.push(entity.into());
        self
    }

    /// Check if this is the model space block
    pub fn is_model_space(&self) -> bool {
        same_name(&self.name, Self::MODEL_SPACE)
    }

    /// Check if this is a paper space block
    pub fn is_paper_space(&self) -> bool {
        self.name
            .to_uppercase()
            .starts_with(&Self::PAPER_SPACE.to_uppercase())
    }

    /// Check if this block backs a layout
    pub fn is_layout(&self) -> bool {
        !self.layout.is_null()
    }

    /// Check if this block is anonymous
    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(BlockFlags::ANONYMOUS) || self.name.starts_with('*')
    }

    /// Get an entity by handle
    pub fn entity(&self, handle: Handle) -> Option<&EntityType> {
        self.entities.iter().find(|e| e.common().handle == handle)
    }
}

impl TableObject for BlockRecord {
    const KIND: TableKind = TableKind::BlockRecord;

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

    fn is_reserved(&self) -> bool {
        self.is_model_space()
    }

    fn references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::Layer, &self.layer)]
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::Layer {
            retarget_name(&mut self.layer, old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{CollectionObserver, EventResponse};
    use crate::entities::Line;

    struct Full;

    impl CollectionObserver<EntityType> for Full {
        fn before_add(&mut self, _item: &EntityType) -> EventResponse {
            EventResponse::Cancel
        }
    }

    #[test]
    fn test_with_entity_drops_vetoed_entity() {
        let block = BlockRecord::new("Door").with_entity(Line::new());
        assert_eq!(block.entities.len(), 1);

        let mut block = BlockRecord::new("Window");
        block.entities.subscribe(Full);
        let block = block.with_entity(Line::new());
        assert!(block.entities.is_empty());
    }

    #[test]
    fn test_block_record_creation() {
        let block = BlockRecord::new("MyBlock");
        assert_eq!(block.name, "MyBlock");
        assert_eq!(block.layer, "0");
        assert!(block.explodable);
        assert!(block.entities.is_empty());
    }

    #[test]
    fn test_model_space() {
        let block = BlockRecord::model_space();
        assert!(block.is_model_space());
        assert!(block.is_reserved());
        assert!(!block.is_paper_space());
    }

    #[test]
    fn test_paper_space() {
        let block = BlockRecord::paper_space();
        assert!(block.is_paper_space());
        assert!(!block.is_reserved());
        assert!(!block.is_model_space());
        assert!(BlockRecord::new("*PAPER_SPACE3").is_paper_space());
    }

    #[test]
    fn test_paper_space_names() {
        assert_eq!(BlockRecord::paper_space_name(0), "*Paper_Space");
        assert_eq!(BlockRecord::paper_space_name(1), "*Paper_Space0");
        assert_eq!(BlockRecord::paper_space_name(3), "*Paper_Space2");
    }

    #[test]
    fn test_staged_entities() {
        let block = BlockRecord::new("Door")
            .with_entity(Line::new())
            .with_entity(Line::new());
        assert_eq!(block.entities.len(), 2);
        assert!(block.entity(Handle::new(1)).is_none());
    }
}
