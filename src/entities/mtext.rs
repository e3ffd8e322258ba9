//! Multi-line text entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A multi-line text entity
#[derive(Debug, Clone)]
pub struct MText {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content with inline formatting codes
    pub value: String,
    /// Insertion point
    pub insertion_point: Vector3,
    /// Text height
    pub height: f64,
    /// Reference rectangle width
    pub rectangle_width: f64,
    /// Text style name
    pub style: String,
}

impl MText {
    /// Create a new multi-line text in the "Standard" style
    pub fn new(value: impl Into<String>) -> Self {
        MText {
            common: EntityCommon::new(),
            value: value.into(),
            insertion_point: Vector3::ZERO,
            height: 0.18,
            rectangle_width: 0.0,
            style: "Standard".to_string(),
        }
    }

    /// Builder: set the text style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MTEXT"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::TextStyle, &self.style)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::TextStyle {
            retarget_name(&mut self.style, old, new);
        }
    }
}
