//! Circle entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;

/// A circle entity
#[derive(Debug, Clone)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Create a unit circle at the origin
    pub fn new() -> Self {
        Self::from_center(Vector3::ZERO, 1.0)
    }

    /// Create a circle from center and radius
    pub fn from_center(center: Vector3, radius: f64) -> Self {
        Circle {
            common: EntityCommon::new(),
            center,
            radius,
        }
    }

    /// Builder: place the circle on a layer
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.common.layer = layer.into();
        self
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "CIRCLE"
    }
}
