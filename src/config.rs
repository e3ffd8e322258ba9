//! Document configuration

/// Settings applied when a [`CadDocument`](crate::CadDocument) is created.
#[derive(Debug, Clone)]
pub struct DocumentConfiguration {
    /// First handle value issued by the document counter.
    ///
    /// Default: `0x10`, leaving the low values free for well-known handles.
    pub handle_seed: u64,

    /// Optional global cap on the number of entries per table. The effective
    /// capacity of a table is the lower of this value and the table kind's
    /// own maximum.
    ///
    /// Default: `None`.
    pub table_capacity: Option<usize>,

    /// When `true`, the reserved default entries (layer "0", line type
    /// "Continuous", viewport "*Active", ...) are created.
    ///
    /// Default: `true`.
    pub create_defaults: bool,

    /// When `true`, non-fatal events are recorded in the document's
    /// notification collection in addition to being logged.
    ///
    /// Default: `true`.
    pub collect_notifications: bool,
}

impl DocumentConfiguration {
    /// Builder: set the first handle value
    pub fn with_handle_seed(mut self, seed: u64) -> Self {
        self.handle_seed = seed;
        self
    }

    /// Builder: cap every table at `capacity` entries
    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = Some(capacity);
        self
    }

    /// Builder: skip the reserved default entries
    pub fn without_defaults(mut self) -> Self {
        self.create_defaults = false;
        self
    }

    /// Builder: enable or disable notification collection
    pub fn with_notifications(mut self, collect: bool) -> Self {
        self.collect_notifications = collect;
        self
    }
}

impl Default for DocumentConfiguration {
    fn default() -> Self {
        Self {
            handle_seed: 0x10,
            table_capacity: None,
            create_defaults: true,
            collect_notifications: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DocumentConfiguration::default();
        assert_eq!(cfg.handle_seed, 0x10);
        assert!(cfg.table_capacity.is_none());
        assert!(cfg.create_defaults);
    }

    #[test]
    fn test_builder() {
        let cfg = DocumentConfiguration::default()
            .with_handle_seed(0x100)
            .with_table_capacity(8)
            .without_defaults()
            .with_notifications(false);
        assert_eq!(cfg.handle_seed, 0x100);
        assert_eq!(cfg.table_capacity, Some(8));
        assert!(!cfg.create_defaults);
        assert!(!cfg.collect_notifications);
    }
}
