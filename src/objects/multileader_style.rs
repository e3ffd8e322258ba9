//! MultiLeaderStyle object implementation.
//!
//! Defines the visual properties of MultiLeader entities. A style names a
//! leader line type, a text style and optionally an arrowhead block and a
//! content block.

use crate::tables::{retarget_name, retarget_optional, same_name, TableKind, TableObject, TableRef};
use crate::types::{Color, Handle, LineWeight};

/// Content type for multileader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum LeaderContentType {
    /// No content.
    None = 0,
    /// Block content.
    Block = 1,
    /// MText content (default).
    #[default]
    MText = 2,
    /// Tolerance content.
    Tolerance = 3,
}

impl From<i16> for LeaderContentType {
    fn from(value: i16) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Block,
            3 => Self::Tolerance,
            _ => Self::MText,
        }
    }
}

/// Path type for leader lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum MultiLeaderPathType {
    /// Invisible leader lines.
    Invisible = 0,
    /// Straight line segments (default).
    #[default]
    StraightLineSegments = 1,
    /// Spline curve.
    Spline = 2,
}

/// Multileader style object
///
/// # DXF Object Type
/// MLEADERSTYLE
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLeaderStyle {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// Style name
    pub name: String,
    /// Style description
    pub description: String,

    // Leader line
    pub path_type: MultiLeaderPathType,
    pub line_color: Color,
    /// Leader line type
    pub line_type: String,
    pub line_weight: LineWeight,
    pub landing_gap: f64,

    // Arrowhead
    /// Arrowhead block, `None` for the default arrow
    pub arrowhead: Option<String>,
    pub arrowhead_size: f64,

    // Content
    pub content_type: LeaderContentType,
    /// Text style of text content
    pub text_style: String,
    pub text_height: f64,
    /// Block used as content
    pub block_content: Option<String>,
    pub scale_factor: f64,
}

impl MultiLeaderStyle {
    /// Object type name
    pub const OBJECT_TYPE: &'static str = "MLEADERSTYLE";

    /// Default style name.
    pub const STANDARD: &'static str = "Standard";

    /// Creates a new MultiLeaderStyle with default values.
    pub fn new(name: impl Into<String>) -> Self {
        MultiLeaderStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            description: String::new(),
            path_type: MultiLeaderPathType::StraightLineSegments,
            line_color: Color::ByBlock,
            line_type: "ByBlock".to_string(),
            line_weight: LineWeight::ByBlock,
            landing_gap: 0.09,
            arrowhead: None,
            arrowhead_size: 0.18,
            content_type: LeaderContentType::MText,
            text_style: "Standard".to_string(),
            text_height: 0.18,
            block_content: None,
            scale_factor: 1.0,
        }
    }

    /// Creates the standard MultiLeaderStyle.
    pub fn standard() -> Self {
        Self::new(Self::STANDARD)
    }

    /// Use a block as content
    pub fn with_block_content(mut self, block: impl Into<String>) -> Self {
        self.content_type = LeaderContentType::Block;
        self.block_content = Some(block.into());
        self
    }

    pub fn has_text_content(&self) -> bool {
        self.content_type == LeaderContentType::MText
    }

    pub fn has_block_content(&self) -> bool {
        self.content_type == LeaderContentType::Block
    }
}

impl TableObject for MultiLeaderStyle {
    const KIND: TableKind = TableKind::MultiLeaderStyle;

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
        same_name(&self.name, Self::STANDARD)
    }

    fn references(&self) -> Vec<TableRef> {
        let mut refs = vec![
            TableRef::new(TableKind::LineType, &self.line_type),
            TableRef::new(TableKind::TextStyle, &self.text_style),
        ];
        refs.extend(
            [&self.arrowhead, &self.block_content]
                .into_iter()
                .flatten()
                .map(|block| TableRef::new(TableKind::BlockRecord, block)),
        );
        refs
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::LineType => retarget_name(&mut self.line_type, old, new),
            TableKind::TextStyle => retarget_name(&mut self.text_style, old, new),
            TableKind::BlockRecord => {
                retarget_optional(&mut self.arrowhead, old, new);
                retarget_optional(&mut self.block_content, old, new);
            }
            _ => {}
        }
    }
}
