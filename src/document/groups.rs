//! Group membership

use super::{CadDocument, ObjectLocation};
use crate::error::{DxfError, Result};
use crate::objects::Group;
use crate::tables::{same_name, TableKind};
use crate::types::Handle;

impl CadDocument {
    /// Add a live entity to a group
    pub fn add_to_group(&mut self, group: &str, entity: Handle) -> Result<()> {
        if !matches!(self.objects.get(&entity), Some(ObjectLocation::Entity { .. })) {
            return Err(DxfError::ObjectNotFound(entity.value()));
        }
        let record = self
            .groups
            .get_mut(group)
            .ok_or_else(|| DxfError::EntryNotFound {
                kind: TableKind::Group,
                name: group.to_string(),
            })?;
        record.add_entity(entity);
        let handle = record.handle;
        if let Some(member) = self.entity_mut(entity) {
            member.common_mut().add_reactor(handle);
        }
        Ok(())
    }

    /// Take an entity out of a group; the entity stays in the document
    pub fn remove_from_group(&mut self, group: &str, entity: Handle) -> bool {
        let Some(record) = self.groups.get_mut(group) else {
            return false;
        };
        if !record.remove_entity(entity) {
            return false;
        }
        let handle = record.handle;
        if let Some(member) = self.entity_mut(entity) {
            member.common_mut().remove_reactor(handle);
        }
        true
    }

    /// Dissolve a group, leaving its member entities in place.
    ///
    /// Use [`remove`](Self::remove) with [`Group`] to delete the members as
    /// well.
    pub fn ungroup(&mut self, name: &str) -> bool {
        let Some(record) = self.groups.get_mut(name) else {
            return false;
        };
        let handle = record.handle;
        let members = record.take_entities();
        for member in &members {
            if let Some(entity) = self.entity_mut(*member) {
                entity.common_mut().remove_reactor(handle);
            }
        }
        tracing::debug!(group = %name, members = members.len(), "ungrouped");
        self.remove::<Group>(name)
    }

    /// Name unnamed groups `*A1`, `*A2`, ...
    pub(crate) fn claim_group_name(&mut self, group: &mut Group) {
        if !group.name.is_empty() && !same_name(&group.name, Group::UNNAMED) {
            return;
        }
        loop {
            self.group_index += 1;
            let name = format!("{}{}", Group::UNNAMED, self.group_index);
            if !self.groups.contains(&name) {
                group.name = name;
                return;
            }
        }
    }

    pub(crate) fn prepare_group(&mut self, group: &mut Group) -> Result<()> {
        if let Some(missing) = group
            .entities()
            .iter()
            .find(|h| !matches!(self.objects.get(*h), Some(ObjectLocation::Entity { .. })))
        {
            return Err(DxfError::ObjectNotFound(missing.value()));
        }
        for entity in group.take_staged() {
            let handle = self.add_entity(entity)?;
            group.add_entity(handle);
        }
        Ok(())
    }

    pub(crate) fn link_group(&mut self, handle: Handle, name: &str) {
        let members = match self.groups.get(name) {
            Some(group) => group.entities().to_vec(),
            None => return,
        };
        for member in members {
            if let Some(entity) = self.entity_mut(member) {
                entity.common_mut().add_reactor(handle);
            }
        }
    }

    /// Delete the member entities of a removed group
    pub(crate) fn unlink_group(&mut self, group: &mut Group) {
        for member in group.take_entities() {
            if !self.remove_entity(member) {
                tracing::warn!(group = %group.name, entity = %member, "group member kept");
            }
        }
    }

    /// Forget a member that left the document
    pub(crate) fn drop_group_member(&mut self, group: Handle, member: Handle) {
        let Some(name) = self.entry_name(group).map(str::to_string) else {
            return;
        };
        if let Some(record) = self.groups.get_mut(&name) {
            record.remove_entity(member);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line};

    #[test]
    fn test_unnamed_groups_are_numbered() {
        let mut doc = CadDocument::new();
        doc.add(Group::unnamed()).unwrap();
        doc.add(Group::unnamed()).unwrap();
        doc.add(Group::new("Named")).unwrap();

        assert!(doc.groups().contains("*A1"));
        assert!(doc.groups().contains("*A2"));
        assert!(doc.groups().contains("Named"));
        assert_eq!(doc.groups().len(), 3);
    }

    #[test]
    fn test_staged_entities_join_model_space() {
        let mut doc = CadDocument::new();
        let group = Group::new("Fixtures")
            .with_new_entity(Line::new())
            .with_new_entity(Circle::new());
        let handle = doc.add(group).unwrap();

        let group = doc.groups().get("Fixtures").unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.staged_entities().is_empty());
        for member in group.iter() {
            let entity = doc.get_entity(*member).unwrap();
            assert_eq!(entity.common().reactors, vec![handle]);
        }
        assert_eq!(doc.entities().count(), 2);
    }

    #[test]
    fn test_members_must_be_live() {
        let mut doc = CadDocument::new();
        let result = doc.add(Group::new("Ghosts").with_entity(Handle::new(0x9999)));
        assert!(matches!(result, Err(DxfError::ObjectNotFound(0x9999))));
        assert!(!doc.groups().contains("Ghosts"));
    }

    #[test]
    fn test_ungroup_keeps_members() {
        let mut doc = CadDocument::new();
        let line = doc.add_entity(Line::new()).unwrap();
        doc.add(Group::new("G").with_entity(line)).unwrap();

        assert!(doc.ungroup("G"));
        assert!(!doc.groups().contains("G"));
        let entity = doc.get_entity(line).unwrap();
        assert!(entity.common().reactors.is_empty());
    }

    #[test]
    fn test_remove_group_deletes_members() {
        let mut doc = CadDocument::new();
        let line = doc.add_entity(Line::new()).unwrap();
        let other = doc.add_entity(Line::new()).unwrap();
        doc.add(Group::new("G").with_entity(line)).unwrap();

        assert!(doc.remove::<Group>("G"));
        assert!(doc.get_entity(line).is_none());
        assert!(doc.get_entity(other).is_some());
    }

    #[test]
    fn test_removed_entity_leaves_group() {
        let mut doc = CadDocument::new();
        let line = doc.add_entity(Line::new()).unwrap();
        doc.add(Group::new("G").with_entity(line)).unwrap();

        assert!(doc.remove_entity(line));
        assert!(doc.groups().get("G").unwrap().is_empty());
    }

    #[test]
    fn test_add_and_remove_members() {
        let mut doc = CadDocument::new();
        let line = doc.add_entity(Line::new()).unwrap();
        let group = doc.add(Group::new("G")).unwrap();

        doc.add_to_group("G", line).unwrap();
        assert!(doc.groups().get("G").unwrap().contains(line));
        assert_eq!(doc.get_entity(line).unwrap().common().reactors, vec![group]);

        assert!(doc.remove_from_group("G", line));
        assert!(!doc.remove_from_group("G", line));
        assert!(doc.get_entity(line).unwrap().common().reactors.is_empty());

        assert!(matches!(
            doc.add_to_group("G", Handle::new(0x9999)),
            Err(DxfError::ObjectNotFound(_))
        ));
        assert!(matches!(
            doc.add_to_group("Missing", line),
            Err(DxfError::EntryNotFound { .. })
        ));
    }
}
