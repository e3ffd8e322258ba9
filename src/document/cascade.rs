//! Per-registry cascade rules
//!
//! The generic engine in `engine.rs` knows nothing about individual table
//! kinds. Everything one kind must do to its siblings when an entry comes
//! or goes is written here as a [`Cascade`](private::Cascade) policy.

use super::CadDocument;
use crate::error::Result;
use crate::objects::{
    Group, ImageDefinition, LayerState, Layout, MLineStyle, MultiLeaderStyle, ShapeStyle,
    UnderlayDefinition,
};
use crate::tables::{AppId, BlockRecord, DimStyle, Layer, LineType, Table, TextStyle, Ucs, VPort, View};
use crate::types::Handle;

/// Whether callers may add and remove entries of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Entries come and go through the document
    Mutable,
    /// Only the pre-seeded reserved entry exists; add fails and remove
    /// returns `false`
    Fixed,
}

pub mod private {
    use super::{CadDocument, Mutability};
    use crate::error::Result;
    use crate::tables::{Table, TableObject};
    use crate::types::Handle;

    /// Cascade policy of one registry kind
    pub trait Cascade: TableObject {
        const MUTABILITY: Mutability = Mutability::Mutable;

        fn table(doc: &CadDocument) -> &Table<Self>;

        fn table_mut(doc: &mut CadDocument) -> &mut Table<Self>;

        /// Settle the final name of an entry being added
        fn claim_name(&mut self, _doc: &mut CadDocument) {}

        /// Create or check everything the entry depends on. Runs before the
        /// entry gets its handle.
        fn prepare(&mut self, doc: &mut CadDocument) -> Result<()> {
            doc.ensure_references(&self.references())
        }

        /// Register the children of an entry once it is stored
        fn link(_doc: &mut CadDocument, _handle: Handle, _name: &str) -> Result<()> {
            Ok(())
        }

        /// Release the children of an entry that has left its registry
        fn unlink(&mut self, _doc: &mut CadDocument) -> Result<()> {
            Ok(())
        }

        /// Copy document-managed state of the stored entry onto an edited copy
        fn preserve(&mut self, _stored: &Self) {}

        /// Move owned children from the stored entry into its replacement
        fn transfer(&mut self, _stored: &mut Self) {}
    }
}

use private::Cascade;

/// Entry types the document can add, remove and rename.
///
/// Implemented for every table entry and registry-held object; the cascade
/// rules themselves are internal to the document.
pub trait TableCascade: Cascade {}

impl<T: Cascade> TableCascade for T {}

macro_rules! impl_cascade {
    ($ty:ty, $field:ident $(, $($body:tt)*)?) => {
        impl Cascade for $ty {
            fn table(doc: &CadDocument) -> &Table<Self> {
                &doc.$field
            }

            fn table_mut(doc: &mut CadDocument) -> &mut Table<Self> {
                &mut doc.$field
            }

            $($($body)*)?
        }
    };
}

impl_cascade!(Layer, layers);
impl_cascade!(LineType, line_types);
impl_cascade!(TextStyle, text_styles);
impl_cascade!(DimStyle, dim_styles);
impl_cascade!(MLineStyle, mline_styles);
impl_cascade!(MultiLeaderStyle, mleader_styles);
impl_cascade!(AppId, app_ids);
impl_cascade!(View, views);
impl_cascade!(Ucs, ucss);
impl_cascade!(ImageDefinition, image_definitions);
impl_cascade!(UnderlayDefinition, underlay_definitions);
impl_cascade!(ShapeStyle, shape_styles);

impl_cascade!(VPort, vports,
    const MUTABILITY: Mutability = Mutability::Fixed;
);

impl_cascade!(BlockRecord, block_records,
    fn link(doc: &mut CadDocument, _handle: Handle, name: &str) -> Result<()> {
        doc.adopt_block_content(name)
    }

    fn unlink(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.release_block_content(self);
        Ok(())
    }

    fn preserve(&mut self, stored: &Self) {
        self.layout = stored.layout;
    }

    fn transfer(&mut self, stored: &mut Self) {
        std::mem::swap(&mut self.entities, &mut stored.entities);
        std::mem::swap(
            &mut self.attribute_definitions,
            &mut stored.attribute_definitions,
        );
    }
);

impl_cascade!(Layout, layouts,
    fn prepare(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.prepare_layout(self)
    }

    fn link(doc: &mut CadDocument, handle: Handle, name: &str) -> Result<()> {
        doc.link_layout(handle, name);
        Ok(())
    }

    fn unlink(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.unlink_layout(self)
    }

    fn preserve(&mut self, stored: &Self) {
        self.block_record = stored.block_record.clone();
    }
);

impl_cascade!(Group, groups,
    fn claim_name(&mut self, doc: &mut CadDocument) {
        doc.claim_group_name(self);
    }

    fn prepare(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.prepare_group(self)
    }

    fn link(doc: &mut CadDocument, handle: Handle, name: &str) -> Result<()> {
        doc.link_group(handle, name);
        Ok(())
    }

    fn unlink(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.unlink_group(self);
        Ok(())
    }

    fn preserve(&mut self, stored: &Self) {
        self.take_staged();
        self.set_entities(stored.entities().to_vec());
    }
);

impl_cascade!(LayerState, layer_states,
    fn prepare(&mut self, doc: &mut CadDocument) -> Result<()> {
        doc.prepare_layer_state(self)
    }
);
