//! Layout ↔ block record bookkeeping

use super::CadDocument;
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::objects::Layout;
use crate::tables::{same_name, BlockRecord, TableObject};
use crate::types::Handle;

impl CadDocument {
    /// Get the block record backing a layout
    pub fn layout_block(&self, layout: &str) -> Option<&BlockRecord> {
        let layout = self.layouts.get(layout)?;
        self.block_records.get(&layout.block_record)
    }

    /// Paper space layouts in tab order
    pub fn paper_space_layouts(&self) -> Vec<&Layout> {
        let mut layouts: Vec<&Layout> = self
            .layouts
            .iter()
            .filter(|l| l.is_paper_space())
            .collect();
        layouts.sort_by_key(|l| l.tab_order);
        layouts
    }

    pub(crate) fn prepare_layout(&mut self, layout: &mut Layout) -> Result<()> {
        if layout.block_record.is_empty() {
            let mut index = self
                .layouts
                .iter()
                .filter(|l| l.is_paper_space())
                .count();
            while self
                .block_records
                .contains(&BlockRecord::paper_space_name(index))
            {
                index += 1;
            }
            let name = BlockRecord::paper_space_name(index);
            self.add(BlockRecord::new(name.as_str()))?;
            layout.block_record = name;
        }

        if let Some(block) = self.block_records.get(&layout.block_record) {
            if block.layout.is_valid() && block.layout != layout.handle {
                return Err(DxfError::InvalidArgument(format!(
                    "block \"{}\" already backs another layout",
                    block.name
                )));
            }
        }

        if layout.tab_order == 0 && layout.is_paper_space() {
            let last = self.layouts.iter().map(|l| l.tab_order).max().unwrap_or(0);
            layout.tab_order = last + 1;
        }

        self.ensure_references(&layout.references())
    }

    pub(crate) fn link_layout(&mut self, handle: Handle, name: &str) {
        let Some(block) = self.layouts.get(name).map(|l| l.block_record.clone()) else {
            return;
        };
        if let Some(record) = self.block_records.get_mut(&block) {
            record.layout = handle;
        }
    }

    /// Drop the backing block of a removed layout along with its entities
    pub(crate) fn unlink_layout(&mut self, layout: &mut Layout) -> Result<()> {
        let block = std::mem::take(&mut layout.block_record);
        if block.is_empty() {
            return Ok(());
        }
        if let Some(record) = self.block_records.get_mut(&block) {
            if record.layout == layout.handle {
                record.layout = Handle::NULL;
            }
        }

        let removed = self.clear_block_entities(&block);
        tracing::debug!(layout = %layout.name, block = %block, removed, "layout entities removed");

        if self.block_records.contains(&block) && !self.remove::<BlockRecord>(&block) {
            tracing::warn!(block = %block, "layout block kept: still referenced");
            self.notify(
                NotificationType::RemovalSkipped,
                format!("Block \"{}\" of layout \"{}\" is still referenced", block, layout.name),
            );
        }

        self.renumber_paper_blocks()
    }

    /// Rename paper space blocks so their numbering follows tab order
    /// without gaps.
    ///
    /// Runs in two passes through temporary names, so a block never takes a
    /// name another block still holds.
    fn renumber_paper_blocks(&mut self) -> Result<()> {
        let mut blocks: Vec<(i16, String)> = self
            .layouts
            .iter()
            .filter(|l| l.is_paper_space())
            .filter(|l| {
                self.block_records
                    .get(&l.block_record)
                    .is_some_and(BlockRecord::is_paper_space)
            })
            .map(|l| (l.tab_order, l.block_record.clone()))
            .collect();
        blocks.sort_by_key(|(tab_order, _)| *tab_order);

        let mut pending = Vec::new();
        for (index, (_, name)) in blocks.iter().enumerate() {
            let target = BlockRecord::paper_space_name(index);
            if same_name(name, &target) {
                continue;
            }
            let temporary = format!("{}~{}", BlockRecord::PAPER_SPACE, index);
            self.rename::<BlockRecord>(name, &temporary)?;
            pending.push((temporary, target));
        }

        for (temporary, target) in pending {
            tracing::debug!(block = %target, "paper space block renumbered");
            self.rename::<BlockRecord>(&temporary, &target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;
    use crate::tables::Layer;

    fn layout_block_name(doc: &CadDocument, layout: &str) -> String {
        doc.layouts().get(layout).unwrap().block_record.clone()
    }

    #[test]
    fn test_layout_gets_paper_block() {
        let mut doc = CadDocument::new();
        let handle = doc.add(Layout::new("Sheet")).unwrap();

        let layout = doc.layouts().get("Sheet").unwrap();
        assert_eq!(layout.block_record, "*Paper_Space0");
        assert_eq!(layout.tab_order, 2);
        assert_eq!(doc.layout_block("Sheet").unwrap().layout, handle);
        assert!(doc.block_records().has_references("*Paper_Space0"));
    }

    #[test]
    fn test_block_backs_one_layout() {
        let mut doc = CadDocument::new();
        let result = doc.add(Layout::new("Sheet").with_block(BlockRecord::PAPER_SPACE));
        assert!(matches!(result, Err(DxfError::InvalidArgument(_))));
        assert!(!doc.layouts().contains("Sheet"));
    }

    #[test]
    fn test_paper_space_renumbering() {
        let mut doc = CadDocument::new();
        doc.add(Layout::new("Layout2")).unwrap();
        doc.add(Layout::new("Layout3")).unwrap();
        assert_eq!(layout_block_name(&doc, "Layout3"), "*Paper_Space1");

        let kept = doc.add_entity_to_layout("Layout3", Line::new()).unwrap();
        doc.add_entity_to_layout("Layout2", Line::new().on_layer("Gone"))
            .unwrap();

        assert!(doc.remove::<Layout>("Layout2"));
        assert_eq!(layout_block_name(&doc, "Layout1"), "*Paper_Space");
        assert_eq!(layout_block_name(&doc, "Layout3"), "*Paper_Space0");
        assert!(!doc.block_records().contains("*Paper_Space1"));

        let block = doc.layout_block("Layout3").unwrap();
        assert_eq!(doc.get_entity(kept).unwrap().common().owner, block.handle);
        assert!(!doc.layers().has_references("Gone"));
        assert!(doc.remove::<Layer>("Gone"));
    }

    #[test]
    fn test_removing_first_layout_shifts_names() {
        let mut doc = CadDocument::new();
        doc.add(Layout::new("Layout2")).unwrap();

        assert!(doc.remove::<Layout>("Layout1"));
        assert_eq!(layout_block_name(&doc, "Layout2"), "*Paper_Space");
        assert_eq!(doc.layout_block("Layout2").unwrap().name, "*Paper_Space");
        assert_eq!(doc.paper_space_layouts().len(), 1);
    }

    #[test]
    fn test_model_layout_is_reserved() {
        let mut doc = CadDocument::new();
        assert!(!doc.remove::<Layout>("Model"));
        assert!(doc.block_records().contains(BlockRecord::MODEL_SPACE));
    }

    #[test]
    fn test_paper_layouts_in_tab_order() {
        let mut doc = CadDocument::new();
        let mut early = Layout::new("Early");
        early.tab_order = 1;
        doc.add(Layout::new("Late")).unwrap();
        doc.add(early).unwrap();

        let names: Vec<&str> = doc
            .paper_space_layouts()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Layout1", "Early", "Late"]);
    }
}
