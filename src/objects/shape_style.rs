//! ShapeStyle object - A registered shape file

use crate::tables::{TableKind, TableObject};
use crate::types::Handle;

/// A shape file whose shapes are drawn by shape entities
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// Style name
    pub name: String,
    /// Compiled shape file (.shx)
    pub file_name: String,
    /// Default shape size
    pub size: f64,
}

impl ShapeStyle {
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            file_name: file_name.into(),
            size: 1.0,
        }
    }
}

impl TableObject for ShapeStyle {
    const KIND: TableKind = TableKind::ShapeStyle;

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
