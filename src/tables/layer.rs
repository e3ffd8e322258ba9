//! Layer table entry

use super::{retarget_name, same_name, TableKind, TableObject, TableRef};
use crate::types::{Color, Handle, LineWeight};
use bitflags::bitflags;

bitflags! {
    /// Layer state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        /// Layer is frozen
        const FROZEN = 1;
        /// Layer is frozen by default in new viewports
        const FROZEN_IN_NEW_VIEWPORTS = 2;
        /// Layer is locked
        const LOCKED = 4;
        /// Layer comes from an external reference
        const XREF_DEPENDENT = 16;
    }
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Layer name
    pub name: String,
    /// Layer flags
    pub flags: LayerFlags,
    /// Layer color
    pub color: Color,
    /// Line type name, kept registered in the line type table
    pub line_type: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Is the layer on
    pub is_on: bool,
    /// Is this layer plottable?
    pub is_plottable: bool,
}

impl Layer {
    /// Name of the default layer
    pub const DEFAULT_NAME: &'static str = "0";

    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: LayerFlags::empty(),
            color: Color::WHITE,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Default,
            is_on: true,
            is_plottable: true,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    /// Create a layer drawn with the given line type
    pub fn with_line_type(name: impl Into<String>, line_type: impl Into<String>) -> Self {
        Layer {
            line_type: line_type.into(),
            ..Self::new(name)
        }
    }

    /// Set the layer as frozen
    pub fn freeze(&mut self) {
        self.flags.insert(LayerFlags::FROZEN);
    }

    /// Set the layer as thawed
    pub fn thaw(&mut self) {
        self.flags.remove(LayerFlags::FROZEN);
    }

    /// Check if the layer is frozen
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn lock(&mut self) {
        self.flags.insert(LayerFlags::LOCKED);
    }

    pub fn unlock(&mut self) {
        self.flags.remove(LayerFlags::LOCKED);
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    /// Check if the layer is visible (on and not frozen)
    pub fn is_visible(&self) -> bool {
        self.is_on && !self.is_frozen()
    }
}

impl TableObject for Layer {
    const KIND: TableKind = TableKind::Layer;

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
        same_name(&self.name, Self::DEFAULT_NAME)
    }

    fn references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::LineType, &self.line_type)]
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::LineType {
            retarget_name(&mut self.line_type, old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_creation() {
        let layer = Layer::new("Walls");
        assert_eq!(layer.name, "Walls");
        assert_eq!(layer.line_type, "Continuous");
        assert!(layer.is_visible());
        assert!(!layer.is_reserved());
    }

    #[test]
    fn test_layer_0_is_reserved() {
        assert!(Layer::layer_0().is_reserved());
    }

    #[test]
    fn test_layer_flags() {
        let mut layer = Layer::new("Test");
        layer.freeze();
        layer.lock();
        assert!(layer.is_frozen());
        assert!(layer.is_locked());
        assert!(!layer.is_visible());

        layer.thaw();
        layer.unlock();
        assert_eq!(layer.flags, LayerFlags::empty());
    }

    #[test]
    fn test_line_type_edge() {
        let mut layer = Layer::with_line_type("Hidden", "Dashed");
        assert_eq!(
            layer.references(),
            vec![TableRef::new(TableKind::LineType, "Dashed")]
        );

        layer.retarget(TableKind::LineType, "DASHED", "Dashed2");
        assert_eq!(layer.line_type, "Dashed2");

        layer.retarget(TableKind::TextStyle, "Dashed2", "Other");
        assert_eq!(layer.line_type, "Dashed2");
    }
}
