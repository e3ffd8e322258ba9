//! Dimension entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, retarget_optional, TableKind, TableRef};
use crate::types::Vector3;

/// Kind of measurement a dimension shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionType {
    #[default]
    Linear,
    Aligned,
    Angular,
    Diameter,
    Radius,
    Ordinate,
}

/// A dimension entity
///
/// A dimension names its style and, once its graphics have been generated,
/// the anonymous block holding them.
#[derive(Debug, Clone)]
pub struct Dimension {
    /// Common entity data
    pub common: EntityCommon,
    pub dimension_type: DimensionType,
    /// Definition point
    pub definition_point: Vector3,
    /// Middle of the dimension text
    pub text_middle_point: Vector3,
    /// Dimension style name
    pub style_name: String,
    /// Anonymous block with the dimension graphics
    pub block_name: Option<String>,
    /// Measured value
    pub actual_measurement: f64,
}

impl Dimension {
    /// Create a dimension in the "Standard" style
    pub fn new(dimension_type: DimensionType) -> Self {
        Dimension {
            common: EntityCommon::new(),
            dimension_type,
            definition_point: Vector3::ZERO,
            text_middle_point: Vector3::ZERO,
            style_name: "Standard".to_string(),
            block_name: None,
            actual_measurement: 0.0,
        }
    }

    /// Builder: set the dimension style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_name = style.into();
        self
    }
}

impl Entity for Dimension {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "DIMENSION"
    }

    fn own_references(&self) -> Vec<TableRef> {
        let mut refs = vec![TableRef::new(TableKind::DimStyle, &self.style_name)];
        if let Some(block) = &self.block_name {
            refs.push(TableRef::new(TableKind::BlockRecord, block));
        }
        refs
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::DimStyle => retarget_name(&mut self.style_name, old, new),
            TableKind::BlockRecord => retarget_optional(&mut self.block_name, old, new),
            _ => {}
        }
    }
}
