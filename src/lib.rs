//! # dxf-tables
//!
//! The table object model of a CAD drawing: the named registries (layers,
//! line types, text and dimension styles, blocks, layouts, groups, ...)
//! that entities and each other refer to, kept consistent while entries
//! are added, removed and renamed.
//!
//! ## Features
//!
//! - Seventeen registries with case-insensitive names and reference counting
//! - Cascading add: everything an entry or entity names is created on demand
//! - Guarded remove: reserved and still-referenced entries stay
//! - Rename that rewrites every referrer
//! - Document-wide handle allocation
//! - Observable lists and dictionaries with cancellable notifications
//!
//! ## Quick Start
//!
//! ```rust
//! use dxf_tables::{CadDocument, Line, tables::Layer};
//!
//! let mut doc = CadDocument::new();
//!
//! // The layer "Walls" is created on the way in
//! let line = doc.add_entity(Line::new().on_layer("Walls"))?;
//! assert!(doc.layers().contains("Walls"));
//!
//! // Referenced entries cannot go
//! assert!(!doc.remove::<Layer>("Walls"));
//!
//! // Renaming reaches the entity
//! doc.rename::<Layer>("Walls", "Partitions")?;
//! assert_eq!(doc.get_entity(line).unwrap().common().layer, "Partitions");
//! # Ok::<(), dxf_tables::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Table`](tables::Table) - Name-keyed store with per-entry reference counts
//! - [`TableObject`](tables::TableObject) - Trait for anything a registry holds
//! - [`Entity`] - Trait for graphical entities owned by block records
//! - [`CadDocument`] - Owns every registry and runs the cascades

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod collections;
pub mod config;
pub mod document;
pub mod entities;
pub mod error;
pub mod notification;
pub mod objects;
pub mod tables;
pub mod types;
pub mod xdata;

// Re-export commonly used types
pub use config::DocumentConfiguration;
pub use document::{CadDocument, Mutability, ObjectLocation, TableCascade};
pub use error::{DxfError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{Color, Handle, LineWeight, Vector2, Vector3};

// Re-export entity types
pub use entities::{
    AttributeDefinition, Circle, Dimension, Entity, EntityType, Insert, Leader, Line, MLine,
    MText, MultiLeader, RasterImage, Shape, Text, Underlay,
};
