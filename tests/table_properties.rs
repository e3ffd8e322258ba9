//! Behavioural properties of the registries, driven through the public API

mod common;

use dxf_tables::entities::Line;
use dxf_tables::objects::{Group, Layout};
use dxf_tables::tables::{BlockRecord, Layer, LineType};
use dxf_tables::types::Color;
use dxf_tables::{CadDocument, DxfError};

// ===========================================================================
// Add
// ===========================================================================

#[test]
fn add_with_taken_name_returns_first_entry() {
    let mut doc = CadDocument::new();
    let first = doc.add(Layer::with_color("Walls", Color::RED)).unwrap();
    let count = doc.layers().count();

    // The second instance is discarded, whatever it carries.
    let second = doc.add(Layer::with_color("WALLS", Color::BLUE)).unwrap();

    assert_eq!(first, second);
    assert_eq!(doc.layers().count(), count);
    let walls = doc.layers().get("walls").unwrap();
    assert_eq!(walls.name, "Walls");
    assert_eq!(walls.color, Color::RED);
}

#[test]
fn add_rejects_empty_name_before_any_change() {
    let mut doc = CadDocument::new();
    let next = doc.next_handle();

    assert!(matches!(
        doc.add(Layer::new("")),
        Err(DxfError::InvalidArgument(_))
    ));
    assert_eq!(doc.next_handle(), next);
}

#[test]
fn overflow_leaves_registry_untouched() {
    let mut doc = CadDocument::with_configuration(
        dxf_tables::DocumentConfiguration::default().with_table_capacity(3),
    );
    while doc.layers().count() < 3 {
        let name = format!("L{}", doc.layers().count());
        doc.add(Layer::new(name)).unwrap();
    }

    let result = doc.add(Layer::new("Overflow"));
    assert!(matches!(result, Err(DxfError::TableOverflow { .. })));
    assert_eq!(doc.layers().count(), 3);
    assert!(!doc.layers().contains("Overflow"));
}

// ===========================================================================
// Remove
// ===========================================================================

#[test]
fn references_gate_removal() {
    let mut doc = CadDocument::new();
    doc.add(Layer::with_line_type("Hidden", "Dashed")).unwrap();

    assert!(doc.line_types().contains("Dashed"));
    assert!(!doc.remove::<LineType>("Dashed"));

    assert!(doc.remove::<Layer>("Hidden"));
    assert!(doc.remove::<LineType>("Dashed"));
    assert!(!doc.line_types().contains("Dashed"));
}

#[test]
fn reserved_entries_are_never_removed() {
    let mut doc = CadDocument::new();
    assert!(!doc.line_types().has_references("Continuous"));

    assert!(!doc.remove::<LineType>("Continuous"));
    assert!(!doc.remove::<LineType>("ByLayer"));
    assert!(!doc.remove::<Layer>("0"));
    assert!(!doc.remove::<BlockRecord>("*Model_Space"));
    assert!(doc.line_types().contains("Continuous"));
}

#[test]
fn missing_entry_is_not_an_error() {
    let mut doc = CadDocument::new();
    assert!(!doc.remove::<Layer>("Nowhere"));
}

// ===========================================================================
// Rename
// ===========================================================================

#[test]
fn rename_collision_changes_nothing() {
    let mut doc = CadDocument::new();
    doc.add(Layer::with_color("L1", Color::CYAN)).unwrap();
    doc.add(Layer::new("L2")).unwrap();
    let before = doc.layers().get("L1").unwrap().clone();

    let result = doc.rename::<Layer>("L1", "l2");

    assert!(matches!(result, Err(DxfError::NameCollision { .. })));
    assert!(doc.layers().contains("L1"));
    assert_eq!(doc.layers().get("L1").unwrap(), &before);
}

#[test]
fn rename_follows_every_referrer() {
    let mut doc = common::sample_document();
    doc.rename::<Layer>("Doors", "Openings").unwrap();
    doc.rename::<BlockRecord>("Door", "Opening").unwrap();

    let block = doc.block_records().get("Opening").unwrap();
    assert!(block.entities.iter().all(|e| e.common().layer == "Openings"));
    assert_eq!(doc.block_records().get_references("Opening").len(), 1);
    assert!(!doc.layers().contains("Doors"));
    common::assert_references_live(&doc);
}

// ===========================================================================
// Handles
// ===========================================================================

#[test]
fn handles_are_unique_and_increasing() {
    let mut doc = CadDocument::new();
    let mut handles = vec![
        doc.add(Layer::new("A")).unwrap(),
        doc.add(LineType::new("Dots")).unwrap(),
        doc.add_entity(Line::new().on_layer("B")).unwrap(),
        doc.add(BlockRecord::new("Block")).unwrap(),
        doc.add(Group::unnamed()).unwrap(),
        doc.add(Layout::new("Sheet")).unwrap(),
    ];

    let sorted = {
        let mut sorted = handles.clone();
        sorted.sort();
        sorted
    };
    assert_eq!(handles, sorted);
    handles.dedup();
    assert_eq!(handles.len(), 6);
    common::collect_handles(&doc);
}

// ===========================================================================
// Cascades
// ===========================================================================

#[test]
fn block_removal_takes_its_entities() {
    let mut doc = CadDocument::new();
    doc.add(
        BlockRecord::new("Detail")
            .with_entity(Line::new().on_layer("A"))
            .with_entity(Line::new().on_layer("A")),
    )
    .unwrap();
    let handles: Vec<_> = doc
        .block_records()
        .get("Detail")
        .unwrap()
        .entities
        .iter()
        .map(|e| e.handle())
        .collect();
    assert_eq!(doc.layers().reference_count("A").unwrap().total(), 2);

    assert!(doc.remove::<BlockRecord>("Detail"));

    for handle in handles {
        assert!(doc.get_entity(handle).is_none());
        assert!(!doc.contains_handle(handle));
    }
    assert_eq!(doc.layers().reference_count("A").unwrap().total(), 0);
    assert!(doc.remove::<Layer>("A"));
}

#[test]
fn paper_space_blocks_stay_contiguous() {
    let mut doc = CadDocument::new();
    doc.add(Layout::new("Layout2")).unwrap();
    doc.add(Layout::new("Layout3")).unwrap();
    let blocks = |doc: &CadDocument| -> Vec<String> {
        doc.paper_space_layouts()
            .iter()
            .map(|l| l.block_record.clone())
            .collect()
    };
    assert_eq!(
        blocks(&doc),
        vec!["*Paper_Space", "*Paper_Space0", "*Paper_Space1"]
    );

    assert!(doc.remove::<Layout>("Layout2"));

    assert_eq!(blocks(&doc), vec!["*Paper_Space", "*Paper_Space0"]);
    assert!(doc.block_records().contains("*Paper_Space0"));
    assert!(!doc.block_records().contains("*Paper_Space1"));
    common::assert_references_live(&doc);
}

#[test]
fn ungroup_keeps_members_remove_deletes_them() {
    let mut doc = CadDocument::new();
    let a = doc.add_entity(Line::new()).unwrap();
    let b = doc.add_entity(Line::new()).unwrap();
    doc.add(Group::new("Kept").with_entity(a)).unwrap();
    doc.add(Group::new("Dropped").with_entity(b)).unwrap();

    assert!(doc.ungroup("Kept"));
    assert!(!doc.groups().contains("Kept"));
    assert!(doc.get_entity(a).is_some());

    assert!(doc.remove::<Group>("Dropped"));
    assert!(!doc.groups().contains("Dropped"));
    assert!(doc.get_entity(b).is_none());
}

#[test]
fn clear_counts_what_went() {
    let mut doc = CadDocument::new();
    doc.add(Layer::new("Free")).unwrap();
    doc.add_entity(Line::new().on_layer("Busy")).unwrap();

    // "0" is reserved and "Busy" is referenced.
    assert_eq!(doc.clear::<Layer>(), 1);
    assert!(doc.layers().contains("Busy"));
    assert!(doc.layers().contains("0"));
}
