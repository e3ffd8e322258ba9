//! User Coordinate System table entry

use super::{TableKind, TableObject};
use crate::types::{Handle, Vector3};

/// A User Coordinate System (UCS) table entry
#[derive(Debug, Clone)]
pub struct Ucs {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// UCS name
    pub name: String,
    /// Origin point
    pub origin: Vector3,
    /// X-axis direction
    pub x_axis: Vector3,
    /// Y-axis direction
    pub y_axis: Vector3,
}

impl Ucs {
    /// Create a new UCS aligned with the world axes
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_origin_axes(name, Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y)
    }

    /// Create a UCS with specific origin and axes
    pub fn from_origin_axes(
        name: impl Into<String>,
        origin: Vector3,
        x_axis: Vector3,
        y_axis: Vector3,
    ) -> Self {
        Ucs {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            origin,
            x_axis,
            y_axis,
        }
    }

    /// Get the Z-axis direction (cross product of X and Y)
    pub fn z_axis(&self) -> Vector3 {
        self.x_axis.cross(&self.y_axis)
    }
}

impl TableObject for Ucs {
    const KIND: TableKind = TableKind::Ucs;

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_axes() {
        let ucs = Ucs::new("World2");
        assert_eq!(ucs.z_axis(), Vector3::UNIT_Z);
        assert!(ucs.handle.is_null());
    }
}
