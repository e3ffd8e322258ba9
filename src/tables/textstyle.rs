//! Text style table entry

use super::{same_name, TableKind, TableObject};
use crate::types::Handle;
use bitflags::bitflags;

bitflags! {
    /// Text generation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextGenerationFlags: i16 {
        /// Text is backward (mirrored in X)
        const BACKWARD = 2;
        /// Text is upside down (mirrored in Y)
        const UPSIDE_DOWN = 4;
    }
}

/// A text style table entry
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Style name
    pub name: String,
    /// Text generation flags
    pub flags: TextGenerationFlags,
    /// Fixed text height (0 = variable)
    pub height: f64,
    /// Width factor
    pub width_factor: f64,
    /// Oblique angle in radians
    pub oblique_angle: f64,
    /// Primary font file name
    pub font_file: String,
    /// Big font file name (for Asian languages)
    pub big_font_file: String,
    /// True Type font name
    pub true_type_font: String,
}

impl TextStyle {
    pub const DEFAULT_NAME: &'static str = "Standard";

    /// Create a new text style
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: TextGenerationFlags::empty(),
            height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            font_file: "txt".to_string(),
            big_font_file: String::new(),
            true_type_font: String::new(),
        }
    }

    /// Create the standard "Standard" text style
    pub fn standard() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    /// Create a text style with a TrueType font
    pub fn with_truetype(name: impl Into<String>, font: impl Into<String>) -> Self {
        TextStyle {
            true_type_font: font.into(),
            ..Self::new(name)
        }
    }

    pub fn set_backward(&mut self, backward: bool) {
        self.flags.set(TextGenerationFlags::BACKWARD, backward);
    }

    pub fn set_upside_down(&mut self, upside_down: bool) {
        self.flags.set(TextGenerationFlags::UPSIDE_DOWN, upside_down);
    }

    pub fn is_backward(&self) -> bool {
        self.flags.contains(TextGenerationFlags::BACKWARD)
    }

    pub fn is_upside_down(&self) -> bool {
        self.flags.contains(TextGenerationFlags::UPSIDE_DOWN)
    }

    /// Check if this style has a fixed height
    pub fn has_fixed_height(&self) -> bool {
        self.height > 0.0
    }
}

impl TableObject for TextStyle {
    const KIND: TableKind = TableKind::TextStyle;

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
        same_name(&self.name, Self::DEFAULT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textstyle_creation() {
        let style = TextStyle::new("MyStyle");
        assert_eq!(style.name, "MyStyle");
        assert_eq!(style.width_factor, 1.0);
        assert!(!style.has_fixed_height());
        assert!(!style.is_reserved());
    }

    #[test]
    fn test_textstyle_standard() {
        let style = TextStyle::standard();
        assert_eq!(style.name, "Standard");
        assert!(style.is_reserved());
    }

    #[test]
    fn test_textstyle_flags() {
        let mut style = TextStyle::new("Test");
        assert!(!style.is_backward());
        assert!(!style.is_upside_down());

        style.set_backward(true);
        assert!(style.is_backward());

        style.set_upside_down(true);
        assert!(style.is_upside_down());
        assert_eq!(
            style.flags,
            TextGenerationFlags::BACKWARD | TextGenerationFlags::UPSIDE_DOWN
        );
    }
}
