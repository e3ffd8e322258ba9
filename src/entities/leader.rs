//! Leader entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A leader entity drawn with a dimension style
#[derive(Debug, Clone)]
pub struct Leader {
    /// Common entity data
    pub common: EntityCommon,
    /// Dimension style name
    pub dimension_style: String,
    /// Arrowhead enabled
    pub arrow_enabled: bool,
    /// Leader vertices
    pub vertices: Vec<Vector3>,
}

impl Leader {
    pub fn new() -> Self {
        Leader {
            common: EntityCommon::new(),
            dimension_style: "Standard".to_string(),
            arrow_enabled: true,
            vertices: Vec::new(),
        }
    }

    /// Create a leader through the given points
    pub fn from_vertices(vertices: Vec<Vector3>) -> Self {
        Leader {
            vertices,
            ..Self::new()
        }
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Leader {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "LEADER"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::DimStyle, &self.dimension_style)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::DimStyle {
            retarget_name(&mut self.dimension_style, old, new);
        }
    }
}
