//! Line type table entry

use super::{retarget_optional, same_name, TableKind, TableObject, TableRef};
use crate::types::Handle;

/// Line type element (dash, dot, space), optionally carrying an embedded text
/// or shape drawn from a text style
#[derive(Debug, Clone, PartialEq)]
pub struct LineTypeElement {
    /// Length of the element (positive = dash, negative = space, 0 = dot)
    pub length: f64,
    /// Text style supplying the embedded text or shape
    pub style: Option<String>,
    /// Embedded text
    pub text: Option<String>,
}

impl LineTypeElement {
    /// Create a dash element
    pub fn dash(length: f64) -> Self {
        LineTypeElement {
            length: length.abs(),
            style: None,
            text: None,
        }
    }

    /// Create a space element
    pub fn space(length: f64) -> Self {
        LineTypeElement {
            length: -length.abs(),
            ..Self::dash(0.0)
        }
    }

    /// Create a dot element
    pub fn dot() -> Self {
        Self::dash(0.0)
    }

    /// Create a space element with text drawn in `style`
    pub fn text(length: f64, text: impl Into<String>, style: impl Into<String>) -> Self {
        LineTypeElement {
            length: -length.abs(),
            style: Some(style.into()),
            text: Some(text.into()),
        }
    }

    pub fn is_dash(&self) -> bool {
        self.length > 0.0
    }

    pub fn is_space(&self) -> bool {
        self.length < 0.0
    }

    pub fn is_dot(&self) -> bool {
        self.length == 0.0
    }
}

/// A line type table entry
#[derive(Debug, Clone)]
pub struct LineType {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Line type name
    pub name: String,
    /// Description
    pub description: String,
    /// Pattern elements
    pub elements: Vec<LineTypeElement>,
    /// Alignment (always 'A' for AutoCAD)
    pub alignment: char,
}

impl LineType {
    pub const BY_LAYER: &'static str = "ByLayer";
    pub const BY_BLOCK: &'static str = "ByBlock";
    pub const CONTINUOUS: &'static str = "Continuous";

    /// Create a new line type
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
            alignment: 'A',
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..Self::new(Self::CONTINUOUS)
        }
    }

    /// Create the standard "ByLayer" line type
    pub fn by_layer() -> Self {
        Self::new(Self::BY_LAYER)
    }

    /// Create the standard "ByBlock" line type
    pub fn by_block() -> Self {
        Self::new(Self::BY_BLOCK)
    }

    /// Create a dashed line type
    pub fn dashed() -> Self {
        let mut lt = LineType::new("Dashed");
        lt.description = "__ __ __ __ __ __".to_string();
        lt.add_element(LineTypeElement::dash(0.5));
        lt.add_element(LineTypeElement::space(0.25));
        lt
    }

    /// Add an element to the pattern
    pub fn add_element(&mut self, element: LineTypeElement) {
        self.elements.push(element);
    }

    /// Total pattern length
    pub fn pattern_length(&self) -> f64 {
        self.elements.iter().map(|e| e.length.abs()).sum()
    }

    /// Check if this is a continuous line type
    pub fn is_continuous(&self) -> bool {
        self.elements.is_empty()
    }
}

impl TableObject for LineType {
    const KIND: TableKind = TableKind::LineType;

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
        [Self::BY_LAYER, Self::BY_BLOCK, Self::CONTINUOUS]
            .iter()
            .any(|reserved| same_name(&self.name, reserved))
    }

    fn references(&self) -> Vec<TableRef> {
        self.elements
            .iter()
            .filter_map(|e| e.style.as_ref())
            .map(|style| TableRef::new(TableKind::TextStyle, style))
            .collect()
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::TextStyle {
            for element in &mut self.elements {
                retarget_optional(&mut element.style, old, new);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        assert!(LineType::continuous().is_reserved());
        assert!(LineType::by_layer().is_reserved());
        assert!(LineType::new("BYBLOCK").is_reserved());
        assert!(!LineType::dashed().is_reserved());
    }

    #[test]
    fn test_pattern() {
        let lt = LineType::dashed();
        assert_eq!(lt.elements.len(), 2);
        assert_eq!(lt.pattern_length(), 0.75);
        assert!(!lt.is_continuous());
        assert!(lt.elements[0].is_dash());
        assert!(lt.elements[1].is_space());
    }

    #[test]
    fn test_text_elements_reference_styles() {
        let mut lt = LineType::new("Gas");
        lt.add_element(LineTypeElement::dash(0.5));
        lt.add_element(LineTypeElement::text(0.2, "GAS", "Standard"));
        lt.add_element(LineTypeElement::text(0.2, "GAS", "standard"));

        assert_eq!(lt.references().len(), 2);

        lt.retarget(TableKind::TextStyle, "STANDARD", "Mono");
        assert!(lt
            .references()
            .iter()
            .all(|r| r == &TableRef::new(TableKind::TextStyle, "Mono")));
    }
}
