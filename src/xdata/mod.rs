//! Extended Data (XDATA) support
//!
//! Extended data is application-specific data that can be attached to entities.
//! Every record belongs to an application registered in the application id
//! table, and layer names stored in the data keep their layers alive.

use crate::collections::{DictionaryObserver, ObservableDictionary};
use crate::tables::{fold_name, retarget_name, TableKind, TableRef};
use crate::types::{Handle, Vector3};

/// Extended data value types
#[derive(Debug, Clone, PartialEq)]
pub enum XDataValue {
    /// String value (group code 1000)
    String(String),
    /// Control string (group code 1002) - "{" or "}"
    ControlString(String),
    /// Layer name (group code 1003)
    LayerName(String),
    /// Binary data (group code 1004)
    BinaryData(Vec<u8>),
    /// Database handle (group code 1005)
    Handle(Handle),
    /// 3D point (group codes 1010, 1020, 1030)
    Point3D(Vector3),
    /// Real value (group code 1040)
    Real(f64),
    /// 16-bit integer (group code 1070)
    Integer16(i16),
    /// 32-bit integer (group code 1071)
    Integer32(i32),
}

/// Extended data record for a single application
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedDataRecord {
    /// Application name (from group code 1001)
    pub application_name: String,
    /// Extended data values
    pub values: Vec<XDataValue>,
}

impl ExtendedDataRecord {
    /// Create a new extended data record
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the extended data
    pub fn add_value(&mut self, value: XDataValue) {
        self.values.push(value);
    }

    /// Builder: add a value
    pub fn with_value(mut self, value: XDataValue) -> Self {
        self.add_value(value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The application id and every layer the record names
    pub fn references(&self) -> Vec<TableRef> {
        let mut refs = vec![TableRef::new(TableKind::AppId, &self.application_name)];
        refs.extend(self.values.iter().filter_map(|value| match value {
            XDataValue::LayerName(layer) => Some(TableRef::new(TableKind::Layer, layer)),
            _ => None,
        }));
        refs
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::AppId => retarget_name(&mut self.application_name, old, new),
            TableKind::Layer => {
                for value in &mut self.values {
                    if let XDataValue::LayerName(layer) = value {
                        retarget_name(layer, old, new);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Extended data collection for an entity, one record per application
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedData {
    /// Records keyed by folded application name
    records: ObservableDictionary<String, ExtendedDataRecord>,
}

impl ExtendedData {
    /// Create a new extended data collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer on the record dictionary
    pub fn subscribe(
        &mut self,
        observer: impl DictionaryObserver<String, ExtendedDataRecord> + 'static,
    ) {
        self.records.subscribe(observer);
    }

    /// Add a record, replacing the one of the same application.
    ///
    /// Returns the replaced record, or the new record back when an observer
    /// cancelled.
    pub fn add_record(
        &mut self,
        record: ExtendedDataRecord,
    ) -> Result<Option<ExtendedDataRecord>, ExtendedDataRecord> {
        self.records
            .insert(fold_name(&record.application_name), record)
    }

    /// Remove the record of an application
    pub fn remove_record(&mut self, application_name: &str) -> Option<ExtendedDataRecord> {
        self.records.remove(&fold_name(application_name))
    }

    /// Get a record by application name (case-insensitive)
    pub fn get_record(&self, application_name: &str) -> Option<&ExtendedDataRecord> {
        self.records.get(&fold_name(application_name))
    }

    /// Get all records
    pub fn records(&self) -> impl Iterator<Item = &ExtendedDataRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Edges of every record
    pub fn references(&self) -> Vec<TableRef> {
        self.records.values().flat_map(|r| r.references()).collect()
    }

    pub(crate) fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        if kind == TableKind::AppId && self.records.contains_key(&fold_name(old)) {
            // The dictionary key follows the application name.
            let entries = self
                .records
                .take_entries()
                .into_values()
                .map(|mut record| {
                    record.retarget(kind, old, new);
                    (fold_name(&record.application_name), record)
                })
                .collect();
            self.records.restore_entries(entries);
            return;
        }
        for record in self.records.values_mut() {
            record.retarget(kind, old, new);
        }
    }
}
