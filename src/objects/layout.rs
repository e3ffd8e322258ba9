//! Layout object - A model or paper space sheet

use crate::tables::{retarget_name, same_name, BlockRecord, TableKind, TableObject, TableRef};
use crate::types::{Handle, Vector2};

/// Layout object
///
/// Every layout is backed by a block record holding its entities. A paper
/// space layout added without a block gets a new `*Paper_Space` block; the
/// document renumbers those blocks by tab order when a layout goes away.
///
/// # DXF Object Type
/// LAYOUT
#[derive(Debug, Clone)]
pub struct Layout {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle (the layout table)
    pub owner: Handle,
    /// Layout name
    pub name: String,
    /// Tab order; 0 for model space
    pub tab_order: i16,
    /// Minimum limits
    pub min_limits: Vector2,
    /// Maximum limits
    pub max_limits: Vector2,
    /// Name of the backing block record; empty to have one created
    pub block_record: String,
}

impl Layout {
    /// Object type name
    pub const OBJECT_TYPE: &'static str = "LAYOUT";

    /// Name of the model space layout
    pub const MODEL_NAME: &'static str = "Model";

    /// Create a new paper space layout; its block is created on add
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            tab_order: 0,
            min_limits: Vector2::ZERO,
            max_limits: Vector2::new(12.0, 9.0),
            block_record: String::new(),
        }
    }

    /// Create the model space layout
    pub fn model() -> Self {
        Self {
            block_record: BlockRecord::MODEL_SPACE.to_string(),
            ..Self::new(Self::MODEL_NAME)
        }
    }

    /// Builder: bind to an existing block record
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block_record = block.into();
        self
    }

    /// Check if this is a paper space layout
    pub fn is_paper_space(&self) -> bool {
        !same_name(&self.block_record, BlockRecord::MODEL_SPACE)
    }
}

impl TableObject for Layout {
    const KIND: TableKind = TableKind::Layout;

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
        same_name(&self.name, Self::MODEL_NAME)
    }

    fn references(&self) -> Vec<TableRef> {
        if self.block_record.is_empty() {
            return Vec::new();
        }
        vec![TableRef::new(TableKind::BlockRecord, &self.block_record)]
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::BlockRecord {
            retarget_name(&mut self.block_record, old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_layout() {
        let layout = Layout::model();
        assert!(layout.is_reserved());
        assert!(!layout.is_paper_space());
        assert_eq!(
            layout.references(),
            vec![TableRef::new(TableKind::BlockRecord, "*Model_Space")]
        );
    }

    #[test]
    fn test_unbound_layout_has_no_edges() {
        let layout = Layout::new("Sheet");
        assert!(layout.is_paper_space());
        assert!(layout.references().is_empty());
        assert!(!layout.is_reserved());
    }
}
