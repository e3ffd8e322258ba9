//! Insert entity (block reference)

use super::{Entity, EntityCommon};
use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::Vector3;

/// An attribute value attached to an insert
#[derive(Debug, Clone)]
pub struct AttributeEntity {
    /// Common entity data
    pub common: EntityCommon,
    /// Attribute tag
    pub tag: String,
    /// Attribute value
    pub value: String,
    /// Text style name
    pub style: String,
}

impl AttributeEntity {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        AttributeEntity {
            common: EntityCommon::new(),
            tag: tag.into(),
            value: value.into(),
            style: "Standard".to_string(),
        }
    }
}

impl Entity for AttributeEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTRIB"
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

/// Insert entity - a reference to a block definition
///
/// The insert names its block and carries its attributes; the tables the
/// attributes use are counted as uses by the insert.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Block name (references a BlockRecord)
    pub block_name: String,
    /// Insertion point (in WCS)
    pub insert_point: Vector3,
    /// Uniform scale factor
    pub scale: f64,
    /// Rotation angle in radians
    pub rotation: f64,
    /// Attribute values
    pub attributes: Vec<AttributeEntity>,
}

impl Insert {
    /// Create a new insert entity
    pub fn new(block_name: impl Into<String>, insert_point: Vector3) -> Self {
        Self {
            common: EntityCommon::new(),
            block_name: block_name.into(),
            insert_point,
            scale: 1.0,
            rotation: 0.0,
            attributes: Vec::new(),
        }
    }

    /// Builder: attach an attribute
    pub fn with_attribute(mut self, attribute: AttributeEntity) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Get an attribute by tag (case-insensitive)
    pub fn attribute(&self, tag: &str) -> Option<&AttributeEntity> {
        self.attributes
            .iter()
            .find(|a| a.tag.eq_ignore_ascii_case(tag))
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "INSERT"
    }

    fn own_references(&self) -> Vec<TableRef> {
        let mut refs = vec![TableRef::new(TableKind::BlockRecord, &self.block_name)];
        refs.extend(self.attributes.iter().flat_map(|a| a.references()));
        refs
    }

    fn retarget_own(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::BlockRecord {
            retarget_name(&mut self.block_name, old, new);
        }
        for attribute in &mut self.attributes {
            attribute.retarget(kind, old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_count_as_insert_uses() {
        let mut attribute = AttributeEntity::new("NUMBER", "101");
        attribute.common.layer = "Tags".to_string();
        let insert = Insert::new("Door", Vector3::ZERO).with_attribute(attribute);

        let refs = insert.references();
        assert!(refs.contains(&TableRef::new(TableKind::BlockRecord, "Door")));
        assert!(refs.contains(&TableRef::new(TableKind::Layer, "Tags")));
        assert!(refs.contains(&TableRef::new(TableKind::TextStyle, "Standard")));
        assert_eq!(
            refs.iter().filter(|r| r.kind == TableKind::Layer).count(),
            2
        );
    }

    #[test]
    fn test_retarget_attribute_style() {
        let mut insert = Insert::new("Door", Vector3::ZERO)
            .with_attribute(AttributeEntity::new("NUMBER", "101"));
        insert.retarget(TableKind::TextStyle, "standard", "Mono");
        assert_eq!(insert.attribute("number").unwrap().style, "Mono");
    }
}
