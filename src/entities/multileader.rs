//! MultiLeader entity

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// A multileader entity drawn with a multileader style
#[derive(Debug, Clone)]
pub struct MultiLeader {
    /// Common entity data
    pub common: EntityCommon,
    /// Multileader style name
    pub style_name: String,
    /// Text content
    pub text: String,
    /// Content location
    pub content_location: Vector3,
}

impl MultiLeader {
    pub fn new(text: impl Into<String>) -> Self {
        MultiLeader {
            common: EntityCommon::new(),
            style_name: "Standard".to_string(),
            text: text.into(),
            content_location: Vector3::ZERO,
        }
    }

    /// Builder: set the multileader style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_name = style.into();
        self
    }
}

impl Entity for MultiLeader {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MULTILEADER"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::MultiLeaderStyle, &self.style_name)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::MultiLeaderStyle {
            retarget_name(&mut self.style_name, old, new);
        }
    }
}
