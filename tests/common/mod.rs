//! Shared test utilities for dxf-tables integration tests.
//!
//! Document builders and consistency checks that all test crates import
//! via `mod common;`.

#![allow(dead_code)]

use dxf_tables::entities::{AttributeEntity, Dimension, DimensionType, Insert, Line, Text};
use dxf_tables::objects::{Group, Layout};
use dxf_tables::tables::{BlockRecord, DimStyle, Layer, TableKind};
use dxf_tables::types::{Color, Handle, Vector3};
use dxf_tables::CadDocument;
use std::collections::HashSet;

// ===========================================================================
// Builders
// ===========================================================================

/// A document exercising most cross-registry edges:
///
/// - block `Door` with two lines on layer `Doors`
/// - an insert of `Door` in model space carrying a `TAG` attribute
/// - dimension style `Arch` used by a dimension on layer `Dims`
/// - paper space layout `Sheet` holding one text
/// - group `Frame` over the model space line
pub fn sample_document() -> CadDocument {
    let mut doc = CadDocument::new();

    doc.add(Layer::with_color("Doors", Color::RED)).unwrap();
    doc.add(
        BlockRecord::new("Door")
            .with_entity(Line::new().on_layer("Doors"))
            .with_entity(Line::new().on_layer("Doors")),
    )
    .unwrap();

    doc.add_entity(
        Insert::new("Door", Vector3::new(10.0, 0.0, 0.0))
            .with_attribute(AttributeEntity::new("TAG", "D-01")),
    )
    .unwrap();

    doc.add(DimStyle::new("Arch")).unwrap();
    let mut dimension = Dimension::new(DimensionType::Linear).with_style("Arch");
    dimension.common.layer = "Dims".to_string();
    doc.add_entity(dimension).unwrap();

    doc.add(Layout::new("Sheet")).unwrap();
    doc.add_entity_to_layout("Sheet", Text::new("Title")).unwrap();

    let frame = doc.add_entity(Line::new()).unwrap();
    doc.add(Group::new("Frame").with_entity(frame)).unwrap();

    doc
}

// ===========================================================================
// Consistency checks
// ===========================================================================

/// Every referrer counted by any registry is a live object
pub fn assert_references_live(doc: &CadDocument) {
    for kind in TableKind::ALL {
        let registry = doc.registry(kind);
        for name in registry.entry_names() {
            for (referrer, _) in registry.get_references(&name) {
                assert!(
                    doc.contains_handle(referrer.handle),
                    "{} \"{}\" is referenced by dead object {}",
                    kind,
                    name,
                    referrer.handle
                );
            }
        }
    }
}

/// Handles of every registry entry and entity, checked for duplicates
pub fn collect_handles(doc: &CadDocument) -> Vec<Handle> {
    let mut handles = Vec::new();
    for kind in TableKind::ALL {
        let registry = doc.registry(kind);
        handles.push(registry.handle());
        for name in registry.entry_names() {
            if let Some(handle) = registry.entry_handle(&name) {
                handles.push(handle);
            }
        }
    }
    for block in doc.block_records().iter() {
        handles.extend(block.entities.iter().map(|e| e.handle()));
        handles.extend(block.attribute_definitions.values().map(|a| a.common.handle));
    }

    let unique: HashSet<Handle> = handles.iter().copied().collect();
    assert_eq!(unique.len(), handles.len(), "duplicate handles in document");
    assert!(handles.iter().all(|h| !h.is_null()), "null handle on a live object");
    handles
}
