//! LayerState object - A named snapshot of layer properties

use crate::tables::{fold_name, retarget_name, same_name, Layer, LayerFlags, TableKind, TableObject, TableRef};
use crate::types::{Color, Handle, LineWeight};
use indexmap::IndexMap;

/// The captured properties of one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStateEntry {
    /// Layer name
    pub layer: String,
    pub is_on: bool,
    pub is_frozen: bool,
    pub is_locked: bool,
    pub is_plottable: bool,
    pub color: Color,
    /// Line type name
    pub line_type: String,
    pub line_weight: LineWeight,
}

impl LayerStateEntry {
    /// Snapshot a layer
    pub fn capture(layer: &Layer) -> Self {
        Self {
            layer: layer.name.clone(),
            is_on: layer.is_on,
            is_frozen: layer.is_frozen(),
            is_locked: layer.is_locked(),
            is_plottable: layer.is_plottable,
            color: layer.color,
            line_type: layer.line_type.clone(),
            line_weight: layer.line_weight,
        }
    }

    /// Write the snapshot back onto `layer`, leaving its name alone
    pub fn apply(&self, layer: &mut Layer) {
        layer.is_on = self.is_on;
        layer.flags.set(LayerFlags::FROZEN, self.is_frozen);
        layer.flags.set(LayerFlags::LOCKED, self.is_locked);
        layer.is_plottable = self.is_plottable;
        layer.color = self.color;
        layer.line_type = self.line_type.clone();
        layer.line_weight = self.line_weight;
    }

    /// Build a detached layer carrying the snapshot
    pub fn to_layer(&self) -> Layer {
        let mut layer = Layer::new(self.layer.clone());
        self.apply(&mut layer);
        layer
    }
}

/// Layer state object
///
/// Held by the layer state manager. Every snapshot entry keeps its layer
/// and line type registered; missing layers are created from the snapshot
/// when the state is added.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// State name
    pub name: String,
    pub description: String,
    /// Snapshots by folded layer name
    entries: IndexMap<String, LayerStateEntry>,
}

impl LayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            description: String::new(),
            entries: IndexMap::new(),
        }
    }

    /// Add or replace the snapshot of one layer
    pub fn set_entry(&mut self, entry: LayerStateEntry) {
        self.entries.insert(fold_name(&entry.layer), entry);
    }

    /// Builder: add a snapshot
    pub fn with_entry(mut self, entry: LayerStateEntry) -> Self {
        self.set_entry(entry);
        self
    }

    /// Get the snapshot of a layer (case-insensitive)
    pub fn entry(&self, layer: &str) -> Option<&LayerStateEntry> {
        self.entries.get(&fold_name(layer))
    }

    pub(crate) fn entry_mut(&mut self, layer: &str) -> Option<&mut LayerStateEntry> {
        self.entries.get_mut(&fold_name(layer))
    }

    pub(crate) fn clear_entries(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &LayerStateEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TableObject for LayerState {
    const KIND: TableKind = TableKind::LayerState;

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

    fn references(&self) -> Vec<TableRef> {
        self.entries
            .values()
            .flat_map(|e| {
                [
                    TableRef::new(TableKind::Layer, &e.layer),
                    TableRef::new(TableKind::LineType, &e.line_type),
                ]
            })
            .collect()
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::LineType => {
                for entry in self.entries.values_mut() {
                    retarget_name(&mut entry.line_type, old, new);
                }
            }
            TableKind::Layer => {
                if !self.entries.contains_key(&fold_name(old)) {
                    return;
                }
                // Re-key in place so the snapshot keeps its position.
                self.entries = std::mem::take(&mut self.entries)
                    .into_iter()
                    .map(|(key, mut entry)| {
                        if same_name(&entry.layer, old) {
                            entry.layer = new.to_string();
                            (fold_name(new), entry)
                        } else {
                            (key, entry)
                        }
                    })
                    .collect();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_apply() {
        let mut layer = Layer::with_line_type("Walls", "Dashed");
        layer.color = Color::RED;
        layer.freeze();

        let entry = LayerStateEntry::capture(&layer);
        let mut other = Layer::new("Other");
        entry.apply(&mut other);

        assert_eq!(other.name, "Other");
        assert_eq!(other.color, Color::RED);
        assert_eq!(other.line_type, "Dashed");
        assert!(other.is_frozen());
        assert_eq!(entry.to_layer().name, "Walls");
    }

    #[test]
    fn test_references_per_entry() {
        let state = LayerState::new("Plot")
            .with_entry(LayerStateEntry::capture(&Layer::new("A")))
            .with_entry(LayerStateEntry::capture(&Layer::with_line_type("B", "Dashed")));

        assert_eq!(state.len(), 2);
        assert_eq!(state.references().len(), 4);
        assert!(state.entry("b").is_some());
    }

    #[test]
    fn test_layer_retarget_rekeys() {
        let mut state = LayerState::new("Plot")
            .with_entry(LayerStateEntry::capture(&Layer::new("A")))
            .with_entry(LayerStateEntry::capture(&Layer::new("B")));

        state.retarget(TableKind::Layer, "a", "Z");
        assert!(state.entry("A").is_none());
        assert_eq!(state.entry("z").map(|e| e.layer.as_str()), Some("Z"));
        let order: Vec<_> = state.entries().map(|e| e.layer.as_str()).collect();
        assert_eq!(order, vec!["Z", "B"]);
    }
}
