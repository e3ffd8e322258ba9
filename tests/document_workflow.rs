//! End-to-end document scenarios

mod common;

use dxf_tables::entities::{EntityType, Insert, Line, MultiLeader, RasterImage, Text};
use dxf_tables::objects::{ImageDefinition, Layout, MultiLeaderStyle};
use dxf_tables::tables::{BlockRecord, DimStyle, Layer, TableKind, TextStyle};
use dxf_tables::types::Vector3;
use dxf_tables::xdata::{ExtendedDataRecord, XDataValue};
use dxf_tables::{CadDocument, DocumentConfiguration, DxfError, NotificationType};

#[test]
fn sample_document_is_consistent() {
    let doc = common::sample_document();

    common::assert_references_live(&doc);
    let handles = common::collect_handles(&doc);
    assert_eq!(handles.len(), doc.object_count());
    // Two lines in the block, insert, dimension, frame line, sheet text
    assert_eq!(doc.entity_count(), 6);
}

#[test]
fn styles_in_use_stay_until_their_users_go() {
    let mut doc = common::sample_document();
    assert!(!doc.remove::<DimStyle>("Arch"));

    let dimension = doc
        .entities()
        .find(|e| matches!(e, EntityType::Dimension(_)))
        .map(|e| e.handle())
        .unwrap();
    assert!(doc.remove_entity(dimension));
    assert!(doc.remove::<DimStyle>("Arch"));
    assert!(doc.remove::<Layer>("Dims"));
}

#[test]
fn reserved_names_cannot_be_renamed() {
    let mut doc = CadDocument::new();
    assert!(matches!(
        doc.rename::<TextStyle>("Standard", "Default"),
        Err(DxfError::ReservedObject { .. })
    ));
    assert!(matches!(
        doc.rename::<Layer>("0", "Zero"),
        Err(DxfError::ReservedObject { .. })
    ));
}

#[test]
fn removing_a_layout_drops_its_content() {
    let mut doc = common::sample_document();
    let text = doc
        .layout_block("Sheet")
        .and_then(|b| b.entities.iter().next())
        .map(|e| e.handle())
        .unwrap();

    assert!(doc.remove::<Layout>("Sheet"));
    assert!(doc.get_entity(text).is_none());
    assert!(!doc.block_records().contains("*Paper_Space0"));
    common::assert_references_live(&doc);
}

#[test]
fn inserted_blocks_are_kept() {
    let mut doc = common::sample_document();
    assert!(!doc.remove::<BlockRecord>("Door"));

    let insert = doc
        .entities()
        .find(|e| matches!(e, EntityType::Insert(_)))
        .map(|e| e.handle())
        .unwrap();
    assert!(doc.remove_entity(insert));
    assert!(doc.remove::<BlockRecord>("Door"));
    assert!(doc.remove::<Layer>("Doors"));
}

#[test]
fn multileader_styles_pull_in_blocks() {
    let mut doc = CadDocument::new();
    doc.add(MultiLeaderStyle::new("Callout").with_block_content("_Tag"))
        .unwrap();
    doc.add_entity(MultiLeader::new("A").with_style("Callout"))
        .unwrap();

    assert!(doc.block_records().contains("_Tag"));
    assert!(!doc.remove::<BlockRecord>("_Tag"));
    assert!(!doc.remove::<MultiLeaderStyle>("Callout"));
}

#[test]
fn image_definitions_must_exist() {
    let mut doc = CadDocument::new();
    let image = RasterImage::new("Site", Vector3::ZERO);
    assert!(matches!(
        doc.add_entity(image.clone()),
        Err(DxfError::UnresolvedReference {
            kind: TableKind::ImageDefinition,
            ..
        })
    ));

    doc.add(ImageDefinition::new("Site", "site.png")).unwrap();
    let handle = doc.add_entity(image).unwrap();
    assert!(!doc.remove::<ImageDefinition>("Site"));
    assert!(doc.remove_entity(handle));
    assert!(doc.remove::<ImageDefinition>("Site"));
}

#[test]
fn extended_data_registers_applications() {
    let mut doc = CadDocument::new();
    let line = doc.add_entity(Line::new()).unwrap();
    doc.add_xdata(
        line,
        ExtendedDataRecord::new("Survey").with_value(XDataValue::LayerName("Marks".into())),
    )
    .unwrap();

    assert!(doc.app_ids().contains("Survey"));
    assert!(doc.layers().contains("Marks"));

    doc.rename::<Layer>("Marks", "Points").unwrap();
    let record = doc
        .get_entity(line)
        .unwrap()
        .common()
        .extended_data
        .get_record("Survey")
        .unwrap()
        .clone();
    assert_eq!(record.values[0], XDataValue::LayerName("Points".into()));
}

#[test]
fn insert_attributes_count_their_styles() {
    let mut doc = CadDocument::new();
    doc.add(BlockRecord::new("Tag")).unwrap();
    let insert = Insert::new("Tag", Vector3::ZERO).with_attribute({
        let mut attribute = dxf_tables::entities::AttributeEntity::new("NO", "1");
        attribute.style = "Labels".to_string();
        attribute
    });
    let handle = doc.add_entity(insert).unwrap();

    assert!(doc.text_styles().has_references("Labels"));
    assert!(doc.remove_entity(handle));
    assert!(!doc.text_styles().has_references("Labels"));
}

#[test]
fn notifications_can_be_turned_off() {
    let mut quiet = CadDocument::with_configuration(
        DocumentConfiguration::default().with_notifications(false),
    );
    quiet.add_entity(Line::new().on_layer("Busy")).unwrap();
    quiet.clear::<Layer>();
    assert!(quiet.notifications.is_empty());

    let mut loud = CadDocument::new();
    loud.add_entity(Line::new().on_layer("Busy")).unwrap();
    loud.clear::<Layer>();
    assert!(loud.notifications.has_type(NotificationType::RemovalSkipped));
}

#[test]
fn handle_seed_is_respected() {
    let mut doc = CadDocument::with_configuration(
        DocumentConfiguration::default()
            .with_handle_seed(0x1000)
            .without_defaults(),
    );
    let handle = doc.add(Layer::new("First")).unwrap();
    assert!(handle.value() >= 0x1000);
}

#[test]
fn entities_in_layouts_follow_renamed_styles() {
    let mut doc = CadDocument::new();
    let handle = doc
        .add_entity_to_layout("Layout1", Text::new("Note").with_style("Notes"))
        .unwrap();

    doc.rename::<TextStyle>("notes", "Annotations").unwrap();
    match doc.get_entity(handle) {
        Some(EntityType::Text(text)) => assert_eq!(text.style, "Annotations"),
        other => panic!("unexpected {:?}", other),
    }
}
