//! Underlay entity (PDF, DWF, DGN)

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// An underlay showing a registered underlay definition
#[derive(Debug, Clone)]
pub struct Underlay {
    /// Common entity data
    pub common: EntityCommon,
    /// Underlay definition name
    pub definition: String,
    /// Insertion point
    pub insertion_point: Vector3,
    /// Uniform scale
    pub scale: f64,
    /// Contrast (0-100)
    pub contrast: u8,
}

impl Underlay {
    pub fn new(definition: impl Into<String>, insertion_point: Vector3) -> Self {
        Underlay {
            common: EntityCommon::new(),
            definition: definition.into(),
            insertion_point,
            scale: 1.0,
            contrast: 50,
        }
    }
}

impl Entity for Underlay {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "UNDERLAY"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::UnderlayDefinition, &self.definition)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::UnderlayDefinition {
            retarget_name(&mut self.definition, old, new);
        }
    }
}
