//! Shape entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A shape from a registered shape file
#[derive(Debug, Clone)]
pub struct Shape {
    /// Common entity data
    pub common: EntityCommon,
    /// Shape style (shape file) name
    pub style_name: String,
    /// Shape name within the file
    pub shape_name: String,
    /// Insertion point
    pub insertion_point: Vector3,
    /// Size
    pub size: f64,
}

impl Shape {
    pub fn new(style_name: impl Into<String>, shape_name: impl Into<String>) -> Self {
        Shape {
            common: EntityCommon::new(),
            style_name: style_name.into(),
            shape_name: shape_name.into(),
            insertion_point: Vector3::ZERO,
            size: 1.0,
        }
    }
}

impl Entity for Shape {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "SHAPE"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::ShapeStyle, &self.style_name)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::ShapeStyle {
            retarget_name(&mut self.style_name, old, new);
        }
    }
}
