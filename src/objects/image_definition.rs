//! ImageDefinition object - Raster image definition

use crate::tables::{TableKind, TableObject};
use crate::types::Handle;

/// Resolution unit for image definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionUnit {
    /// No units specified
    #[default]
    None = 0,
    /// Centimeters
    Centimeters = 2,
    /// Inches
    Inches = 5,
}

impl ResolutionUnit {
    /// Create from DXF code value
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => ResolutionUnit::Centimeters,
            5 => ResolutionUnit::Inches,
            _ => ResolutionUnit::None,
        }
    }
}

/// Image definition object
///
/// Defines a raster image that image entities display. Image entities
/// reference the definition by name, and the definition must be registered
/// before such an entity is added.
///
/// # DXF Object Type
/// IMAGEDEF
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDefinition {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// Definition name
    pub name: String,
    /// Image file path (DXF code 1)
    pub file_name: String,
    /// Whether the image file is loaded (DXF code 280)
    pub is_loaded: bool,
    /// Image size in pixels (width, height)
    pub size_in_pixels: (u32, u32),
    /// Pixel size in drawing units (width, height)
    pub pixel_size: (f64, f64),
    /// Resolution unit (DXF code 281)
    pub resolution_unit: ResolutionUnit,
}

impl ImageDefinition {
    /// Object type name
    pub const OBJECT_TYPE: &'static str = "IMAGEDEF";

    /// Create a new image definition
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            file_name: file_name.into(),
            is_loaded: false,
            size_in_pixels: (0, 0),
            pixel_size: (1.0, 1.0),
            resolution_unit: ResolutionUnit::None,
        }
    }

    /// Builder: set the pixel dimensions
    pub fn with_size_pixels(mut self, width: u32, height: u32) -> Self {
        self.size_in_pixels = (width, height);
        self
    }

    /// Width over height, if the image has a size
    pub fn aspect_ratio(&self) -> Option<f64> {
        let (w, h) = self.size_in_pixels;
        (h > 0).then(|| w as f64 / h as f64)
    }
}

impl TableObject for ImageDefinition {
    const KIND: TableKind = TableKind::ImageDefinition;

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
    fn test_aspect_ratio() {
        let def = ImageDefinition::new("Photo", "photo.jpg").with_size_pixels(1024, 768);
        assert!((def.aspect_ratio().unwrap() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(ImageDefinition::new("Empty", "x.png").aspect_ratio(), None);
        assert_eq!(ResolutionUnit::from_code(5), ResolutionUnit::Inches);
    }
}
