//! Viewport table entry

use super::{same_name, TableKind, TableObject};
use crate::types::{Handle, Vector2, Vector3};

/// A viewport table entry.
///
/// The viewport table is fixed: it holds the single reserved `*Active`
/// entry seeded by the document and rejects every caller mutation.
#[derive(Debug, Clone)]
pub struct VPort {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Viewport name
    pub name: String,
    /// Lower-left corner
    pub lower_left: Vector2,
    /// Upper-right corner
    pub upper_right: Vector2,
    /// View center point
    pub view_center: Vector2,
    /// Grid spacing
    pub grid_spacing: Vector2,
    /// View direction
    pub view_direction: Vector3,
    /// View height
    pub view_height: f64,
    /// Aspect ratio
    pub aspect_ratio: f64,
}

impl VPort {
    pub const ACTIVE: &'static str = "*Active";

    /// Create a new viewport
    pub fn new(name: impl Into<String>) -> Self {
        VPort {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            lower_left: Vector2::ZERO,
            upper_right: Vector2::new(1.0, 1.0),
            view_center: Vector2::ZERO,
            grid_spacing: Vector2::new(10.0, 10.0),
            view_direction: Vector3::UNIT_Z,
            view_height: 10.0,
            aspect_ratio: 1.0,
        }
    }

    /// Create the standard "*Active" viewport
    pub fn active() -> Self {
        Self::new(Self::ACTIVE)
    }
}

impl TableObject for VPort {
    const KIND: TableKind = TableKind::VPort;

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

    fn is_reserved(&self) -> bool {
        same_name(&self.name, Self::ACTIVE)
    }
}
