//! MLineStyle object - Multiline style definition

use crate::tables::{retarget_name, same_name, TableKind, TableObject, TableRef};
use crate::types::{Color, Handle};
use bitflags::bitflags;

bitflags! {
    /// Multiline style flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MLineStyleFlags: i16 {
        /// Fill is on
        const FILL_ON = 1;
        /// Display miters at joints
        const DISPLAY_JOINTS = 2;
        /// Start square (line) cap
        const START_SQUARE_CAP = 16;
        /// Start round (outer arcs) cap
        const START_ROUND_CAP = 64;
        /// End square (line) cap
        const END_SQUARE_CAP = 256;
        /// End round (outer arcs) cap
        const END_ROUND_CAP = 1024;
    }
}

/// Multiline style element
///
/// Each element is one line of the multiline: its offset from the center
/// line, its color and the line type it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct MLineStyleElement {
    /// Element offset from the center line
    pub offset: f64,
    /// Element color
    pub color: Color,
    /// Element line type name
    pub line_type: String,
}

impl MLineStyleElement {
    /// Create a new element with offset
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            color: Color::ByLayer,
            line_type: "ByLayer".to_string(),
        }
    }

    /// Create an element with all properties
    pub fn full(offset: f64, color: Color, line_type: impl Into<String>) -> Self {
        Self {
            offset,
            color,
            line_type: line_type.into(),
        }
    }
}

impl Default for MLineStyleElement {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Multiline style object
///
/// # DXF Object Type
/// MLINESTYLE
#[derive(Debug, Clone, PartialEq)]
pub struct MLineStyle {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// Style name (DXF code 2)
    pub name: String,
    /// Style description (DXF code 3)
    pub description: String,
    /// Line elements in the style
    pub elements: Vec<MLineStyleElement>,
    /// Start cap angle in radians (DXF code 51, default: π/2)
    pub start_angle: f64,
    /// End cap angle in radians (DXF code 52, default: π/2)
    pub end_angle: f64,
    /// Fill color (DXF code 62)
    pub fill_color: Color,
    /// Style flags (DXF code 70)
    pub flags: MLineStyleFlags,
}

impl MLineStyle {
    /// Object type name
    pub const OBJECT_TYPE: &'static str = "MLINESTYLE";

    /// Default style name
    pub const DEFAULT_NAME: &'static str = "Standard";

    /// Create a new multiline style
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
            start_angle: std::f64::consts::FRAC_PI_2,
            end_angle: std::f64::consts::FRAC_PI_2,
            fill_color: Color::ByLayer,
            flags: MLineStyleFlags::empty(),
        }
    }

    /// Create the default "Standard" style with two elements at ±0.5 offset
    pub fn standard() -> Self {
        let mut style = Self::new(Self::DEFAULT_NAME);
        style.add_element(MLineStyleElement::new(0.5));
        style.add_element(MLineStyleElement::new(-0.5));
        style
    }

    /// Add an element to the style
    pub fn add_element(&mut self, element: MLineStyleElement) {
        self.elements.push(element);
    }

    /// Calculate the total width of the multiline style
    pub fn width(&self) -> f64 {
        let offsets = self.elements.iter().map(|e| e.offset);
        let max = offsets.clone().fold(f64::MIN, f64::max);
        let min = offsets.fold(f64::MAX, f64::min);
        if self.elements.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    /// Enable fill
    pub fn enable_fill(&mut self, color: Color) {
        self.flags.insert(MLineStyleFlags::FILL_ON);
        self.fill_color = color;
    }
}

impl TableObject for MLineStyle {
    const KIND: TableKind = TableKind::MLineStyle;

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
        self.elements
            .iter()
            .map(|e| TableRef::new(TableKind::LineType, &e.line_type))
            .collect()
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::LineType {
            for element in &mut self.elements {
                retarget_name(&mut element.line_type, old, new);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_style() {
        let style = MLineStyle::standard();
        assert!(style.is_reserved());
        assert_eq!(style.elements.len(), 2);
        assert_eq!(style.width(), 1.0);
    }

    #[test]
    fn test_one_edge_per_element() {
        let mut style = MLineStyle::new("Wall");
        style.add_element(MLineStyleElement::full(0.1, Color::RED, "Dashed"));
        style.add_element(MLineStyleElement::full(-0.1, Color::RED, "Dashed"));
        style.add_element(MLineStyleElement::new(0.0));

        let refs = style.references();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[2], TableRef::new(TableKind::LineType, "ByLayer"));

        style.retarget(TableKind::LineType, "DASHED", "Hidden");
        assert_eq!(style.elements[0].line_type, "Hidden");
        assert_eq!(style.elements[1].line_type, "Hidden");
    }

    #[test]
    fn test_empty_width() {
        assert_eq!(MLineStyle::new("Empty").width(), 0.0);
    }
}
