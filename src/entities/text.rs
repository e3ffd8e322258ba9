//! Text entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A single line text entity
#[derive(Debug, Clone)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content
    pub value: String,
    /// Insertion point
    pub insertion_point: Vector3,
    /// Text height
    pub height: f64,
    /// Rotation angle in radians
    pub rotation: f64,
    /// Text style name
    pub style: String,
}

impl Text {
    /// Create a new text entity in the "Standard" style
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            common: EntityCommon::new(),
            value: value.into(),
            insertion_point: Vector3::ZERO,
            height: 0.18,
            rotation: 0.0,
            style: "Standard".to_string(),
        }
    }

    /// Builder: set the text style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "TEXT"
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
