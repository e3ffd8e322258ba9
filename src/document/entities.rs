//! Entities and attribute definitions owned by block records
//!
//! A block keeps its children in observable containers. The document
//! inserts and removes through those containers with a per-call listener,
//! so registration (handle, owner, references) happens inside the
//! container's notifications. The listener is asked after the block's own
//! observers, so a vetoed insertion creates nothing.

use super::{CadDocument, ObjectLocation};
use crate::collections::{
    CollectionObserver, DictionaryObserver, EventResponse, ObservableDictionary, ObservableList,
};
use crate::entities::{AttributeDefinition, Entity, EntityCommon, EntityType};
use crate::error::{DxfError, Result};
use crate::tables::{BlockFlags, BlockRecord, ObjectKind, ObjectRef, TableKind, TableRef};
use crate::types::Handle;
use crate::xdata::ExtendedDataRecord;

/// Registers entities joining a block and releases the ones leaving it
struct BlockEntityListener<'a> {
    doc: &'a mut CadDocument,
    block: Handle,
    /// Handle claimed for the insertion in flight
    pending: Handle,
    error: Option<DxfError>,
}

impl<'a> BlockEntityListener<'a> {
    fn new(doc: &'a mut CadDocument, block: Handle) -> Self {
        Self {
            doc,
            block,
            pending: Handle::NULL,
            error: None,
        }
    }
}

impl CollectionObserver<EntityType> for BlockEntityListener<'_> {
    fn before_add(&mut self, entity: &EntityType) -> EventResponse {
        match self.doc.check_child(entity.common(), &entity.references()) {
            Ok(handle) => {
                self.pending = handle;
                EventResponse::Proceed
            }
            Err(err) => {
                self.error = Some(err);
                EventResponse::Cancel
            }
        }
    }

    fn after_add(&mut self, entity: &mut EntityType) {
        let location = ObjectLocation::Entity { block: self.block };
        let handle = std::mem::take(&mut self.pending);
        self.doc
            .register_child(entity.common_mut(), handle, self.block, location);
        self.doc
            .add_uses(&entity.references(), ObjectRef::entity(handle));
        tracing::trace!(handle = %handle, kind = entity.entity_type(), "entity registered");
    }

    fn after_remove(&mut self, entity: &mut EntityType) {
        self.doc.release_entity(entity);
    }
}

/// [`BlockEntityListener`] for attribute definitions
struct BlockAttributeListener<'a> {
    doc: &'a mut CadDocument,
    block: Handle,
    pending: Handle,
    error: Option<DxfError>,
}

impl<'a> BlockAttributeListener<'a> {
    fn new(doc: &'a mut CadDocument, block: Handle) -> Self {
        Self {
            doc,
            block,
            pending: Handle::NULL,
            error: None,
        }
    }
}

impl DictionaryObserver<String, AttributeDefinition> for BlockAttributeListener<'_> {
    fn before_add(&mut self, _tag: &String, attdef: &AttributeDefinition) -> EventResponse {
        match self.doc.check_child(&attdef.common, &attdef.references()) {
            Ok(handle) => {
                self.pending = handle;
                EventResponse::Proceed
            }
            Err(err) => {
                self.error = Some(err);
                EventResponse::Cancel
            }
        }
    }

    fn after_add(&mut self, tag: &String, attdef: &mut AttributeDefinition) {
        let location = ObjectLocation::AttributeDefinition {
            block: self.block,
            tag: tag.clone(),
        };
        let handle = std::mem::take(&mut self.pending);
        self.doc
            .register_child(&mut attdef.common, handle, self.block, location);
        self.doc.add_uses(
            &attdef.references(),
            ObjectRef::new(handle, ObjectKind::AttributeDefinition),
        );
    }

    fn after_remove(&mut self, _tag: &String, attdef: &mut AttributeDefinition) {
        self.doc.release_attribute_definition(attdef);
    }
}

impl CadDocument {
    /// Add an entity to model space
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> Result<Handle> {
        self.add_entity_to_block(BlockRecord::MODEL_SPACE, entity)
    }

    /// Add an entity to the block backing a layout
    pub fn add_entity_to_layout(
        &mut self,
        layout: &str,
        entity: impl Into<EntityType>,
    ) -> Result<Handle> {
        let block = self
            .layouts
            .get(layout)
            .map(|l| l.block_record.clone())
            .ok_or_else(|| DxfError::EntryNotFound {
                kind: TableKind::Layout,
                name: layout.to_string(),
            })?;
        self.add_entity_to_block(&block, entity)
    }

    /// Add an entity to a block.
    ///
    /// The entity must not belong to a block yet (its owner is null);
    /// everything it names is created or checked as for table entries.
    pub fn add_entity_to_block(
        &mut self,
        block: &str,
        entity: impl Into<EntityType>,
    ) -> Result<Handle> {
        let entity = entity.into();
        let (outcome, error) = self.with_block_entities(block, |entities, listener| {
            entities
                .push_with(entity, listener)
                .map(|index| entities.get(index).map_or(Handle::NULL, EntityType::handle))
        })?;
        outcome.map_err(|_| {
            error.unwrap_or_else(|| {
                DxfError::Cancelled(format!("entity insertion into block \"{}\"", block))
            })
        })
    }

    /// Remove an entity from its block and the document.
    ///
    /// Returns `false` if the handle is not a live entity or an observer
    /// of the block cancelled.
    pub fn remove_entity(&mut self, handle: Handle) -> bool {
        let Some(ObjectLocation::Entity { block }) = self.objects.get(&handle).cloned() else {
            return false;
        };
        let Some(name) = self.entry_name(block).map(str::to_string) else {
            return false;
        };
        self.with_block_entities(&name, |entities, listener| {
            entities
                .position(|e| e.handle() == handle)
                .and_then(|index| entities.remove_with(index, listener))
                .is_some()
        })
        .is_ok_and(|(removed, _)| removed)
    }

    /// Get an entity by handle, whichever block owns it
    pub fn get_entity(&self, handle: Handle) -> Option<&EntityType> {
        let ObjectLocation::Entity { block } = self.objects.get(&handle)? else {
            return None;
        };
        let name = self.entry_name(*block)?;
        self.block_records.get(name)?.entity(handle)
    }

    pub(crate) fn entity_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        let ObjectLocation::Entity { block } = self.objects.get(&handle)? else {
            return None;
        };
        let name = self.entry_name(*block)?.to_string();
        self.block_records
            .get_mut(&name)?
            .entities
            .iter_mut()
            .find(|e| e.handle() == handle)
    }

    /// Iterate over model space entities
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.model_space()
            .into_iter()
            .flat_map(|block| block.entities.iter())
    }

    /// Number of entities registered in any block
    pub fn entity_count(&self) -> usize {
        self.objects
            .values()
            .filter(|location| matches!(location, ObjectLocation::Entity { .. }))
            .count()
    }

    /// Edit a live entity.
    ///
    /// The closure works on a copy; handle, owner and reactors are restored
    /// afterwards and changed references are recounted.
    pub fn modify_entity<F>(&mut self, handle: Handle, edit: F) -> Result<()>
    where
        F: FnOnce(&mut EntityType),
    {
        let entity = self
            .get_entity(handle)
            .ok_or(DxfError::ObjectNotFound(handle.value()))?;
        let old_references = entity.references();
        let owner = entity.common().owner;
        let reactors = entity.common().reactors.clone();
        let mut edited = entity.clone();

        edit(&mut edited);
        let common = edited.common_mut();
        common.handle = handle;
        common.owner = owner;
        common.reactors = reactors;

        let new_references = edited.references();
        self.ensure_references(&new_references)?;
        self.remove_uses(&old_references, handle);
        self.add_uses(&new_references, ObjectRef::entity(handle));

        if let Some(slot) = self.entity_mut(handle) {
            *slot = edited;
        }
        Ok(())
    }

    /// Attach extended data to an entity, registering its application id
    pub fn add_xdata(&mut self, handle: Handle, record: ExtendedDataRecord) -> Result<()> {
        let mut outcome = Ok(());
        self.modify_entity(handle, |entity| {
            if let Err(record) = entity.common_mut().extended_data.add_record(record) {
                outcome = Err(DxfError::Cancelled(format!(
                    "extended data of \"{}\"",
                    record.application_name
                )));
            }
        })?;
        outcome
    }

    /// Add an attribute definition to a block, replacing one with the same tag
    pub fn add_attribute_definition(
        &mut self,
        block: &str,
        attdef: AttributeDefinition,
    ) -> Result<Handle> {
        let key = attdef.key();
        let (outcome, error) = self.with_block_attributes(block, |definitions, listener| {
            definitions
                .insert_with(key.clone(), attdef, listener)
                .map(|_| definitions.get(&key).map_or(Handle::NULL, |d| d.common.handle))
        })?;
        let handle = outcome.map_err(|_| {
            error.unwrap_or_else(|| {
                DxfError::Cancelled(format!("attribute definition in block \"{}\"", block))
            })
        })?;
        if let Some(record) = self.block_records.get_mut(block) {
            record.flags.insert(BlockFlags::HAS_ATTRIBUTES);
        }
        Ok(handle)
    }

    /// Remove an attribute definition by tag (case-insensitive)
    pub fn remove_attribute_definition(&mut self, block: &str, tag: &str) -> bool {
        let key = tag.to_uppercase();
        let removed = self
            .with_block_attributes(block, |definitions, listener| {
                definitions.remove_with(&key, listener).is_some()
            })
            .is_ok_and(|(removed, _)| removed);
        if let Some(record) = self.block_records.get_mut(block) {
            if record.attribute_definitions.is_empty() {
                record.flags.remove(BlockFlags::HAS_ATTRIBUTES);
            }
        }
        removed
    }

    /// Get an attribute definition of a block by tag (case-insensitive)
    pub fn attribute_definition(&self, block: &str, tag: &str) -> Option<&AttributeDefinition> {
        self.block_records
            .get(block)?
            .attribute_definitions
            .get(&tag.to_uppercase())
    }

    pub(crate) fn attribute_definition_mut(
        &mut self,
        block: Handle,
        tag: &str,
    ) -> Option<&mut AttributeDefinition> {
        let name = self.entry_name(block)?.to_string();
        self.block_records
            .get_mut(&name)?
            .attribute_definitions
            .get_mut(&tag.to_string())
    }

    /// Register the children a block carried when it was added
    pub(crate) fn adopt_block_content(&mut self, block: &str) -> Result<()> {
        let Some(record) = self.block_records.get_mut(block) else {
            return Ok(());
        };
        let staged = record.entities.take_items();
        let definitions = record.attribute_definitions.take_entries();
        for entity in staged {
            self.add_entity_to_block(block, entity)?;
        }
        for (_, attdef) in definitions {
            self.add_attribute_definition(block, attdef)?;
        }
        Ok(())
    }

    /// Unregister every child of a block that has left the registry
    pub(crate) fn release_block_content(&mut self, block: &mut BlockRecord) {
        let mut listener = BlockEntityListener::new(self, block.handle);
        block.entities.clear_with(&mut listener);
        let tags: Vec<String> = block.attribute_definitions.keys().cloned().collect();
        let mut listener = BlockAttributeListener::new(self, block.handle);
        for tag in tags {
            block.attribute_definitions.remove_with(&tag, &mut listener);
        }

        // Observers may have kept some; they stay with the detached block.
        for entity in block.entities.iter_mut() {
            self.release_entity(entity);
        }
        for attdef in block.attribute_definitions.values_mut() {
            self.release_attribute_definition(attdef);
        }
    }

    /// Remove every entity of a block, returning how many went
    pub(crate) fn clear_block_entities(&mut self, block: &str) -> usize {
        self.with_block_entities(block, |entities, listener| {
            entities.clear_with(listener).len()
        })
        .map_or(0, |(count, _)| count)
    }

    pub(crate) fn release_entity(&mut self, entity: &mut EntityType) {
        let handle = entity.handle();
        if handle.is_null() {
            return;
        }
        self.remove_uses(&entity.references(), handle);
        self.objects.remove(&handle);
        let common = entity.common_mut();
        for group in std::mem::take(&mut common.reactors) {
            self.drop_group_member(group, handle);
        }
        let common = entity.common_mut();
        common.handle = Handle::NULL;
        common.owner = Handle::NULL;
        tracing::trace!(handle = %handle, "entity released");
    }

    fn release_attribute_definition(&mut self, attdef: &mut AttributeDefinition) {
        let handle = attdef.common.handle;
        if handle.is_null() {
            return;
        }
        self.remove_uses(&attdef.references(), handle);
        self.objects.remove(&handle);
        attdef.common.handle = Handle::NULL;
        attdef.common.owner = Handle::NULL;
    }

    /// Checks run once nobody vetoed a child joining a block.
    ///
    /// Claims the child's handle (its loaded one, reserved before any
    /// dependency is created) and makes sure every entry it names exists.
    fn check_child(&mut self, common: &EntityCommon, references: &[TableRef]) -> Result<Handle> {
        if common.owner.is_valid() {
            return Err(DxfError::ForeignObject(common.handle.value()));
        }
        if common.handle.is_valid() {
            self.reserve_handle(common.handle)?;
        }
        self.ensure_references(references)?;
        Ok(if common.handle.is_valid() {
            common.handle
        } else {
            self.allocate_handle()
        })
    }

    fn register_child(
        &mut self,
        common: &mut EntityCommon,
        handle: Handle,
        block: Handle,
        location: ObjectLocation,
    ) {
        common.handle = handle;
        common.owner = block;
        self.objects.insert(handle, location);
    }

    /// Run `f` on a block's entity list with a registering listener.
    ///
    /// The list is moved out of the block for the duration, so the listener
    /// can hold the whole document.
    fn with_block_entities<R>(
        &mut self,
        block: &str,
        f: impl FnOnce(&mut ObservableList<EntityType>, &mut BlockEntityListener<'_>) -> R,
    ) -> Result<(R, Option<DxfError>)> {
        let record = self
            .block_records
            .get_mut(block)
            .ok_or_else(|| DxfError::EntryNotFound {
                kind: TableKind::BlockRecord,
                name: block.to_string(),
            })?;
        let handle = record.handle;
        let mut entities = std::mem::take(&mut record.entities);

        let mut listener = BlockEntityListener::new(self, handle);
        let outcome = f(&mut entities, &mut listener);
        let error = listener.error.take();

        if let Some(record) = self.block_records.get_mut(block) {
            record.entities = entities;
        }
        Ok((outcome, error))
    }

    fn with_block_attributes<R>(
        &mut self,
        block: &str,
        f: impl FnOnce(
            &mut ObservableDictionary<String, AttributeDefinition>,
            &mut BlockAttributeListener<'_>,
        ) -> R,
    ) -> Result<(R, Option<DxfError>)> {
        let record = self
            .block_records
            .get_mut(block)
            .ok_or_else(|| DxfError::EntryNotFound {
                kind: TableKind::BlockRecord,
                name: block.to_string(),
            })?;
        let handle = record.handle;
        let mut definitions = std::mem::take(&mut record.attribute_definitions);

        let mut listener = BlockAttributeListener::new(self, handle);
        let outcome = f(&mut definitions, &mut listener);
        let error = listener.error.take();

        if let Some(record) = self.block_records.get_mut(block) {
            record.attribute_definitions = definitions;
        }
        Ok((outcome, error))
    }
}
