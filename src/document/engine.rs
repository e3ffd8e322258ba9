//! The generic add, remove and rename protocol shared by every registry

use super::cascade::{Mutability, TableCascade};
use super::{CadDocument, ObjectLocation};
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::objects::{MLineStyle, MultiLeaderStyle};
use crate::tables::{
    is_valid_name, same_name, AppId, BlockRecord, DimStyle, Layer, LineType, ObjectRef,
    TableKind, TableRef, TextStyle,
};
use crate::types::Handle;

/// Who is asking for an entry to be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Caller,
    /// Document defaults: fixed tables and capacity limits do not apply
    Seed,
}

impl CadDocument {
    /// Add an entry to its registry.
    ///
    /// If an entry with the same name (case-insensitive) already exists,
    /// nothing changes and the handle of the existing entry is returned;
    /// the passed entry is dropped even if it differs. Otherwise every entry
    /// the new one names is created or checked first, then the entry
    /// receives a handle (its pre-assigned one, if any) and its references
    /// are counted.
    ///
    /// A failure after the dependencies were created leaves them in place.
    pub fn add<T: TableCascade>(&mut self, item: T) -> Result<Handle> {
        self.admit(item, Admission::Caller)
    }

    pub(super) fn seed<T: TableCascade>(&mut self, item: T) -> Result<Handle> {
        self.admit(item, Admission::Seed)
    }

    fn admit<T: TableCascade>(&mut self, mut item: T, admission: Admission) -> Result<Handle> {
        if item.name().is_empty() {
            return Err(DxfError::InvalidArgument(format!(
                "{} entries need a name",
                T::KIND
            )));
        }
        if admission == Admission::Caller && T::MUTABILITY == Mutability::Fixed {
            return Err(DxfError::ReadOnlyTable(T::KIND));
        }
        item.claim_name(self);
        if let Some(existing) = T::table(self).get(item.name()) {
            tracing::trace!(kind = %T::KIND, name = item.name(), "entry already present");
            return Ok(existing.handle());
        }
        if admission == Admission::Caller {
            let capacity = self.capacity(T::KIND);
            if T::table(self).len() >= capacity {
                return Err(DxfError::TableOverflow {
                    kind: T::KIND,
                    capacity,
                });
            }
        }
        if !is_valid_name(item.name()) {
            return Err(DxfError::InvalidName {
                kind: T::KIND,
                name: item.name().to_string(),
            });
        }
        // A loaded handle is claimed before the cascade allocates any.
        let preassigned = item.handle();
        if preassigned.is_valid() {
            self.reserve_handle(preassigned)?;
        }

        item.prepare(self)?;

        let handle = if preassigned.is_valid() {
            preassigned
        } else {
            self.allocate_handle()
        };
        item.set_handle(handle);
        item.set_owner(T::table(self).handle());

        let name = item.name().to_string();
        let references = item.references();
        T::table_mut(self).insert(item);
        self.objects.insert(
            handle,
            ObjectLocation::TableEntry {
                kind: T::KIND,
                name: name.clone(),
            },
        );
        self.add_uses(&references, ObjectRef::entry(handle, T::KIND));
        tracing::debug!(kind = %T::KIND, name = %name, handle = %handle, "entry added");

        T::link(self, handle, &name)?;
        Ok(handle)
    }

    /// Remove an entry by name.
    ///
    /// Returns `false` without changing anything when the entry does not
    /// exist, is reserved, is still referenced, or the registry is fixed.
    /// Otherwise the entry's children are released, the uses it held are
    /// dropped and it leaves the handle map.
    pub fn remove<T: TableCascade>(&mut self, name: &str) -> bool {
        if T::MUTABILITY == Mutability::Fixed {
            return false;
        }
        let table = T::table(self);
        match table.get(name) {
            Some(entry) if !entry.is_reserved() && !table.has_references(name) => {}
            _ => return false,
        }
        self.detach::<T>(name).is_some()
    }

    /// Remove the very entry passed in.
    ///
    /// An entry of the same name but a different handle is left alone.
    pub fn remove_object<T: TableCascade>(&mut self, item: &T) -> bool {
        T::table(self).contains_object(item) && self.remove::<T>(item.name())
    }

    /// Remove every removable entry of a registry.
    ///
    /// Reserved and referenced entries are skipped with a warning. Returns
    /// the number of entries removed.
    pub fn clear<T: TableCascade>(&mut self) -> usize {
        let names: Vec<String> = T::table(self).names().map(str::to_string).collect();
        let mut removed = 0;
        for name in names {
            // An earlier removal may have cascaded to this one.
            if !T::table(self).contains(&name) {
                continue;
            }
            if self.remove::<T>(&name) {
                removed += 1;
            } else {
                tracing::warn!(kind = %T::KIND, name = %name, "entry kept by clear");
                self.notify(
                    NotificationType::RemovalSkipped,
                    format!("{} \"{}\" is reserved or referenced", T::KIND, name),
                );
            }
        }
        removed
    }

    /// Take an entry out of its registry and release everything it held
    fn detach<T: TableCascade>(&mut self, name: &str) -> Option<T> {
        let (mut item, _) = T::table_mut(self).take(name)?;
        let handle = item.handle();
        self.remove_uses(&item.references(), handle);
        self.objects.remove(&handle);

        if let Err(err) = item.unlink(self) {
            tracing::warn!(kind = %T::KIND, name = item.name(), error = %err, "cascade incomplete");
            self.notify(
                NotificationType::Warning,
                format!("removing {} \"{}\": {}", T::KIND, item.name(), err),
            );
        }

        item.set_handle(Handle::NULL);
        item.set_owner(Handle::NULL);
        tracing::debug!(kind = %T::KIND, name = item.name(), handle = %handle, "entry removed");
        Some(item)
    }

    /// Rename an entry.
    ///
    /// Every object naming the entry is updated. Fails without changing
    /// anything if the entry is reserved or the new name is invalid or
    /// taken by another entry; a change of case only is allowed.
    pub fn rename<T: TableCascade>(&mut self, name: &str, new_name: &str) -> Result<()> {
        let new_name = new_name.to_string();
        self.modify::<T, _>(name, move |entry| entry.set_name(new_name))
    }

    /// Edit a live entry in place.
    ///
    /// The closure works on a copy. Afterwards the copy's identity is
    /// restored, a changed name runs the rename rules and changed
    /// references are recounted (new targets are created as on add). If a
    /// check fails the stored entry is left untouched.
    pub fn modify<T, F>(&mut self, name: &str, edit: F) -> Result<()>
    where
        T: TableCascade,
        F: FnOnce(&mut T),
    {
        let stored = T::table(self).get(name).ok_or_else(|| DxfError::EntryNotFound {
            kind: T::KIND,
            name: name.to_string(),
        })?;
        let old_name = stored.name().to_string();
        let old_references = stored.references();
        let mut edited = stored.clone();
        edit(&mut edited);
        edited.set_handle(stored.handle());
        edited.set_owner(stored.owner());
        edited.preserve(stored);

        let new_name = edited.name().to_string();
        let renamed = new_name != old_name;
        if renamed {
            if stored.is_reserved() {
                return Err(DxfError::ReservedObject {
                    kind: T::KIND,
                    name: old_name,
                });
            }
            if !is_valid_name(&new_name) {
                return Err(DxfError::InvalidName {
                    kind: T::KIND,
                    name: new_name,
                });
            }
            if !same_name(&new_name, &old_name) && T::table(self).contains(&new_name) {
                return Err(DxfError::NameCollision {
                    kind: T::KIND,
                    name: new_name,
                });
            }
        }

        edited.prepare(self)?;

        let handle = edited.handle();
        let new_references = edited.references();
        self.remove_uses(&old_references, handle);
        self.add_uses(&new_references, ObjectRef::entry(handle, T::KIND));

        let Some(slot) = T::table_mut(self).get_mut(&old_name) else {
            return Err(DxfError::EntryNotFound {
                kind: T::KIND,
                name: old_name,
            });
        };
        edited.transfer(slot);
        *slot = edited;

        if renamed {
            T::table_mut(self).rekey(&old_name, &new_name);
            self.objects.insert(
                handle,
                ObjectLocation::TableEntry {
                    kind: T::KIND,
                    name: new_name.clone(),
                },
            );
            self.retarget_referrers(T::KIND, &old_name, &new_name);
            tracing::debug!(kind = %T::KIND, from = %old_name, to = %new_name, "entry renamed");
        }
        Ok(())
    }

    /// Point every object using `kind` entry `old` at `new`
    fn retarget_referrers(&mut self, kind: TableKind, old: &str, new: &str) {
        let referrers: Vec<ObjectRef> = self
            .registry(kind)
            .get_references(new)
            .into_iter()
            .map(|(referrer, _)| referrer)
            .collect();

        for referrer in referrers {
            match self.objects.get(&referrer.handle).cloned() {
                Some(ObjectLocation::TableEntry {
                    kind: owner_kind,
                    name,
                }) => {
                    self.registry_mut(owner_kind)
                        .retarget_entry(&name, kind, old, new);
                }
                Some(ObjectLocation::Entity { .. }) => {
                    if let Some(entity) = self.entity_mut(referrer.handle) {
                        entity.retarget(kind, old, new);
                    }
                }
                Some(ObjectLocation::AttributeDefinition { block, tag }) => {
                    if let Some(attdef) = self.attribute_definition_mut(block, &tag) {
                        crate::entities::Entity::retarget(attdef, kind, old, new);
                    }
                }
                Some(ObjectLocation::Table(_)) | None => {
                    tracing::warn!(handle = %referrer.handle, "dangling referrer");
                }
            }
        }
    }

    /// Make sure every target of `references` exists.
    ///
    /// Missing styles, layers, line types, blocks and application ids are
    /// created with default settings. Definitions and coordinate systems
    /// cannot be made up and fail with [`DxfError::UnresolvedReference`].
    pub(crate) fn ensure_references(&mut self, references: &[TableRef]) -> Result<()> {
        for edge in references {
            if self.registry(edge.kind).contains(&edge.name) {
                continue;
            }
            let name = edge.name.clone();
            match edge.kind {
                TableKind::Layer => self.add(Layer::new(name))?,
                TableKind::LineType => self.add(LineType::new(name))?,
                TableKind::TextStyle => self.add(TextStyle::new(name))?,
                TableKind::BlockRecord => self.add(BlockRecord::new(name))?,
                TableKind::DimStyle => self.add(DimStyle::new(name))?,
                TableKind::MLineStyle => self.add(MLineStyle::new(name))?,
                TableKind::MultiLeaderStyle => self.add(MultiLeaderStyle::new(name))?,
                TableKind::AppId => self.add(AppId::new(name))?,
                kind => return Err(DxfError::UnresolvedReference { kind, name }),
            };
            tracing::debug!(kind = %edge.kind, name = %edge.name, "referenced entry created");
        }
        Ok(())
    }

    /// Count one use of every target by `referrer`
    pub(crate) fn add_uses(&mut self, references: &[TableRef], referrer: ObjectRef) {
        for edge in references {
            if self.registry_mut(edge.kind).add_use(&edge.name, referrer) {
                tracing::trace!(kind = %edge.kind, name = %edge.name, referrer = %referrer.handle, "use added");
            }
        }
    }

    /// Drop one use of every target by `referrer`
    pub(crate) fn remove_uses(&mut self, references: &[TableRef], referrer: Handle) {
        for edge in references {
            if self.registry_mut(edge.kind).remove_use(&edge.name, referrer) {
                tracing::trace!(kind = %edge.kind, name = %edge.name, referrer = %referrer, "use dropped");
            }
        }
    }
}
