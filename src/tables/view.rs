//! View table entry

use super::{retarget_optional, TableKind, TableObject, TableRef};
use crate::types::{Handle, Vector3};

/// A named view
#[derive(Debug, Clone)]
pub struct View {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// View name
    pub name: String,
    /// View center point
    pub center: Vector3,
    /// View height
    pub height: f64,
    /// View width
    pub width: f64,
    /// View direction (from target)
    pub direction: Vector3,
    /// View target point
    pub target: Vector3,
    /// Lens length
    pub lens_length: f64,
    /// Twist angle
    pub twist_angle: f64,
    /// Named UCS restored with the view
    pub ucs: Option<String>,
}

impl View {
    /// Create a new view
    pub fn new(name: impl Into<String>) -> Self {
        View {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            center: Vector3::ZERO,
            height: 1.0,
            width: 1.0,
            direction: Vector3::UNIT_Z,
            target: Vector3::ZERO,
            lens_length: 50.0,
            twist_angle: 0.0,
            ucs: None,
        }
    }
}

impl TableObject for View {
    const KIND: TableKind = TableKind::View;

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

    fn references(&self) -> Vec<TableRef> {
        self.ucs
            .iter()
            .map(|ucs| TableRef::new(TableKind::Ucs, ucs))
            .collect()
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::Ucs {
            retarget_optional(&mut self.ucs, old, new);
        }
    }
}
