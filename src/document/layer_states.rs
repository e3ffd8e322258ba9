//! Layer state manager

use super::CadDocument;
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::objects::{LayerState, LayerStateEntry};
use crate::tables::{Layer, LineType, TableKind, TableObject};
use crate::types::Handle;

impl CadDocument {
    /// Snapshot every layer under `name`, replacing an earlier snapshot of
    /// the same name
    pub fn capture_layer_state(&mut self, name: &str) -> Result<Handle> {
        let entries: Vec<LayerStateEntry> =
            self.layers.iter().map(LayerStateEntry::capture).collect();

        if let Some(state) = self.layer_states.get(name) {
            let handle = state.handle;
            self.modify::<LayerState, _>(name, |state| {
                state.clear_entries();
                for entry in entries {
                    state.set_entry(entry);
                }
            })?;
            return Ok(handle);
        }

        let mut state = LayerState::new(name);
        for entry in entries {
            state.set_entry(entry);
        }
        self.add(state)
    }

    /// Apply a snapshot back onto the layers, creating the ones that have
    /// gone. Returns the number of layers restored.
    pub fn restore_layer_state(&mut self, name: &str) -> Result<usize> {
        let state = self
            .layer_states
            .get(name)
            .cloned()
            .ok_or_else(|| DxfError::EntryNotFound {
                kind: TableKind::LayerState,
                name: name.to_string(),
            })?;

        let mut restored = 0;
        for entry in state.entries() {
            if self.layers.contains(&entry.layer) {
                self.modify::<Layer, _>(&entry.layer, |layer| entry.apply(layer))?;
            } else {
                self.add(entry.to_layer())?;
            }
            restored += 1;
        }
        tracing::debug!(state = %name, restored, "layer state restored");
        Ok(restored)
    }

    pub(crate) fn prepare_layer_state(&mut self, state: &mut LayerState) -> Result<()> {
        let orphans: Vec<(String, String)> = state
            .entries()
            .filter(|e| !self.line_types.contains(&e.line_type))
            .map(|e| (e.layer.clone(), e.line_type.clone()))
            .collect();
        for (layer, line_type) in orphans {
            tracing::warn!(
                state = %state.name,
                layer = %layer,
                line_type = %line_type,
                "missing line type, using Continuous"
            );
            self.notify(
                NotificationType::Fallback,
                format!(
                    "Layer state \"{}\": line type \"{}\" of layer \"{}\" replaced by {}",
                    state.name,
                    line_type,
                    layer,
                    LineType::CONTINUOUS
                ),
            );
            if let Some(entry) = state.entry_mut(&layer) {
                entry.line_type = LineType::CONTINUOUS.to_string();
            }
        }

        let missing: Vec<Layer> = state
            .entries()
            .filter(|e| !self.layers.contains(&e.layer))
            .map(LayerStateEntry::to_layer)
            .collect();
        for layer in missing {
            self.add(layer)?;
        }

        self.ensure_references(&state.references())
    }
}
