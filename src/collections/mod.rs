//! Observable containers
//!
//! Ordered lists and keyed dictionaries that raise notifications around
//! every mutation. `before_*` notifications run strictly before the backing
//! store changes and may cancel the mutation; `after_*` notifications run
//! strictly after it. Block records hold their entities and attribute
//! definitions in these containers, and the document hooks its registration
//! logic into them.

pub mod dictionary;
pub mod list;

pub use dictionary::{DictionaryObserver, ObservableDictionary};
pub use list::{CollectionObserver, ObservableList};

/// Answer of a cancelable `before_*` notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResponse {
    /// Let the mutation happen
    #[default]
    Proceed,
    /// Abort the mutation; the container is left unchanged
    Cancel,
}

impl EventResponse {
    /// Check if the mutation was vetoed
    pub fn is_cancel(&self) -> bool {
        matches!(self, EventResponse::Cancel)
    }
}
