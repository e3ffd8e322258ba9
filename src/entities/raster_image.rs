//! RasterImage entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A raster image showing a registered image definition
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Common entity data
    pub common: EntityCommon,
    /// Image definition name
    pub definition: String,
    /// Insertion point (lower-left corner)
    pub insertion_point: Vector3,
    /// Image size in drawing units
    pub width: f64,
    pub height: f64,
}

impl RasterImage {
    pub fn new(definition: impl Into<String>, insertion_point: Vector3) -> Self {
        RasterImage {
            common: EntityCommon::new(),
            definition: definition.into(),
            insertion_point,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Entity for RasterImage {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "IMAGE"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::ImageDefinition, &self.definition)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::ImageDefinition {
            retarget_name(&mut self.definition, old, new);
        }
    }
}
