//! MLine (multiline) entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A multiline entity drawn with a multiline style
#[derive(Debug, Clone)]
pub struct MLine {
    /// Common entity data
    pub common: EntityCommon,
    /// Multiline style name
    pub style_name: String,
    /// Scale factor
    pub scale_factor: f64,
    /// Vertices
    pub vertices: Vec<Vector3>,
}

impl MLine {
    pub fn new() -> Self {
        MLine {
            common: EntityCommon::new(),
            style_name: "Standard".to_string(),
            scale_factor: 1.0,
            vertices: Vec::new(),
        }
    }

    /// Builder: set the multiline style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_name = style.into();
        self
    }
}

impl Default for MLine {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MLine {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MLINE"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::MLineStyle, &self.style_name)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::MLineStyle {
            retarget_name(&mut self.style_name, old, new);
        }
    }
}
