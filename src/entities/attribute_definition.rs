//! AttributeDefinition entity - Block attribute template

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;
use bitflags::bitflags;

bitflags! {
    /// Attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttributeFlags: i16 {
        /// Attribute is invisible
        const INVISIBLE = 1;
        /// Attribute is constant (value cannot be changed)
        const CONSTANT = 2;
        /// Verification required on input
        const VERIFY = 4;
        /// Attribute is preset (no prompt during insertion)
        const PRESET = 8;
    }
}

/// An attribute template stored in a block record, keyed by its tag
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    /// Common entity data
    pub common: EntityCommon,
    /// Attribute tag
    pub tag: String,
    /// Prompt shown on insertion
    pub prompt: String,
    /// Default value
    pub default_value: String,
    /// Text style name
    pub style: String,
    pub flags: AttributeFlags,
    pub insertion_point: Vector3,
    pub height: f64,
}

impl AttributeDefinition {
    pub fn new(tag: impl Into<String>, prompt: impl Into<String>) -> Self {
        AttributeDefinition {
            common: EntityCommon::new(),
            tag: tag.into(),
            prompt: prompt.into(),
            default_value: String::new(),
            style: "Standard".to_string(),
            flags: AttributeFlags::empty(),
            insertion_point: Vector3::ZERO,
            height: 0.18,
        }
    }

    /// Dictionary key of the definition in its block
    pub fn key(&self) -> String {
        self.tag.to_uppercase()
    }
}

impl Entity for AttributeDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTDEF"
    }

    fn own_references(&self) -> Vec<TableRef> {
        vec![TableRef::new(TableKind::TextStyle, &self.style)]
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::TextStyle {
            retarget_name(&mut self.style, old, new);
        }
    }
}
