//! Application ID table entry

use super::{same_name, TableKind, TableObject};
use crate::types::Handle;

/// An application ID table entry (registers the owner of extended data)
#[derive(Debug, Clone)]
pub struct AppId {
    /// Unique handle
    pub handle: Handle,
    /// Owning table handle
    pub owner: Handle,
    /// Application name
    pub name: String,
}

impl AppId {
    pub const ACAD: &'static str = "ACAD";

    /// Create a new application ID
    pub fn new(name: impl Into<String>) -> Self {
        AppId {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
        }
    }

    /// Create the standard "ACAD" application ID
    pub fn acad() -> Self {
        Self::new(Self::ACAD)
    }
}

impl TableObject for AppId {
    const KIND: TableKind = TableKind::AppId;

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

    fn is_reserved(&self) -> bool {
        same_name(&self.name, Self::ACAD)
    }
}
