//! Random operation sequences keep handles unique and reference counts live

mod common;

use dxf_tables::entities::Line;
use dxf_tables::objects::Group;
use dxf_tables::tables::{BlockRecord, Layer, LineType};
use dxf_tables::types::Handle;
use dxf_tables::CadDocument;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddLayer(u8),
    AddLineType(u8),
    AddEntity(u8),
    AddBlock(u8),
    AddGroup,
    RemoveLayer(u8),
    RemoveBlock(u8),
    RemoveFirstEntity,
    RenameLayer(u8, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::AddLayer),
        (0u8..4).prop_map(Op::AddLineType),
        (0u8..6).prop_map(Op::AddEntity),
        (0u8..4).prop_map(Op::AddBlock),
        Just(Op::AddGroup),
        (0u8..6).prop_map(Op::RemoveLayer),
        (0u8..4).prop_map(Op::RemoveBlock),
        Just(Op::RemoveFirstEntity),
        (0u8..6, 0u8..6).prop_map(|(a, b)| Op::RenameLayer(a, b)),
    ]
}

fn apply(doc: &mut CadDocument, op: Op) -> Option<Handle> {
    match op {
        Op::AddLayer(n) => doc
            .add(Layer::with_line_type(format!("L{}", n), format!("T{}", n % 3)))
            .ok(),
        Op::AddLineType(n) => doc.add(LineType::new(format!("T{}", n))).ok(),
        Op::AddEntity(n) => doc
            .add_entity(Line::new().on_layer(format!("L{}", n)))
            .ok(),
        Op::AddBlock(n) => doc
            .add(BlockRecord::new(format!("B{}", n)).with_entity(Line::new().on_layer("L0")))
            .ok(),
        Op::AddGroup => {
            let member = doc.entities().next().map(|e| e.handle());
            let group = match member {
                Some(handle) => Group::unnamed().with_entity(handle),
                None => Group::unnamed(),
            };
            doc.add(group).ok()
        }
        Op::RemoveLayer(n) => {
            doc.remove::<Layer>(&format!("L{}", n));
            None
        }
        Op::RemoveBlock(n) => {
            doc.remove::<BlockRecord>(&format!("B{}", n));
            None
        }
        Op::RemoveFirstEntity => {
            let first = doc.entities().next().map(|e| e.handle());
            if let Some(handle) = first {
                doc.remove_entity(handle);
            }
            None
        }
        Op::RenameLayer(a, b) => {
            let _ = doc.rename::<Layer>(&format!("L{}", a), &format!("L{}", b));
            None
        }
    }
}

proptest! {
    #[test]
    fn handles_stay_unique(ops in prop::collection::vec(op(), 1..40)) {
        let mut doc = CadDocument::new();
        let mut last_issued = Handle::NULL;

        for op in ops {
            let issued_from = doc.next_handle();
            if let Some(handle) = apply(&mut doc, op) {
                prop_assert!(doc.contains_handle(handle));
                if handle.value() >= issued_from {
                    prop_assert!(handle > last_issued);
                    last_issued = handle;
                }
            }
        }

        common::collect_handles(&doc);
        common::assert_references_live(&doc);
    }

    #[test]
    fn removed_layers_leave_no_uses(names in prop::collection::vec("[A-Z]{1,6}", 1..10)) {
        let mut doc = CadDocument::new();
        for name in &names {
            doc.add(Layer::with_line_type(name.as_str(), "Phantom")).unwrap();
        }
        for name in &names {
            doc.remove::<Layer>(name);
        }

        prop_assert!(!doc.line_types().has_references("Phantom"));
        prop_assert!(doc.remove::<LineType>("Phantom"));
    }
}
