//! UnderlayDefinition object - PDF, DWF and DGN underlay definitions

use crate::tables::{TableKind, TableObject};
use crate::types::Handle;

/// File format of an underlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlayFormat {
    #[default]
    Pdf,
    Dwf,
    Dgn,
}

impl UnderlayFormat {
    /// DXF object type of definitions in this format
    pub fn object_type(&self) -> &'static str {
        match self {
            UnderlayFormat::Pdf => "PDFDEFINITION",
            UnderlayFormat::Dwf => "DWFDEFINITION",
            UnderlayFormat::Dgn => "DGNDEFINITION",
        }
    }
}

/// Underlay definition object
///
/// One sheet or page of an external document displayed by underlay
/// entities.
#[derive(Debug, Clone, PartialEq)]
pub struct UnderlayDefinition {
    /// Unique handle
    pub handle: Handle,
    /// Owner handle
    pub owner: Handle,
    /// Definition name
    pub name: String,
    /// Underlay file path
    pub file_name: String,
    /// Page (PDF) or sheet (DWF, DGN) shown
    pub page: String,
    /// Underlay file format
    pub format: UnderlayFormat,
}

impl UnderlayDefinition {
    /// Create a new underlay definition showing page "1"
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, format: UnderlayFormat) -> Self {
        Self {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            file_name: file_name.into(),
            page: "1".to_string(),
            format,
        }
    }

    /// Create a PDF underlay definition
    pub fn pdf(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::new(name, file_name, UnderlayFormat::Pdf)
    }
}

impl TableObject for UnderlayDefinition {
    const KIND: TableKind = TableKind::UnderlayDefinition;

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
}
