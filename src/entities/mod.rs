//! CAD entity types and traits
//!
//! Only the parts of an entity the registries care about are modelled:
//! identity, ownership and the table entries each entity names.

use crate::tables::{retarget_name, TableKind, TableRef};
use crate::types::{Color, Handle, LineWeight};
use crate::xdata::ExtendedData;

pub mod attribute_definition;
pub mod circle;
pub mod dimension;
pub mod insert;
pub mod leader;
pub mod line;
pub mod mline;
pub mod mtext;
pub mod multileader;
pub mod raster_image;
pub mod shape;
pub mod text;
pub mod underlay;

pub use attribute_definition::{AttributeDefinition, AttributeFlags};
pub use circle::Circle;
pub use dimension::{Dimension, DimensionType};
pub use insert::{AttributeEntity, Insert};
pub use leader::Leader;
pub use line::Line;
pub use mline::MLine;
pub use mtext::MText;
pub use multileader::MultiLeader;
pub use raster_image::RasterImage;
pub use shape::Shape;
pub use text::Text;
pub use underlay::Underlay;

/// Base trait for all CAD entities
pub trait Entity {
    /// Common entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable common entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Get the entity type name
    fn entity_type(&self) -> &'static str;

    /// Table entries named by the entity's own fields.
    ///
    /// Layer, line type and extended data edges are added by
    /// [`references`](Self::references).
    fn own_references(&self) -> Vec<TableRef> {
        Vec::new()
    }

    /// Retarget the entity's own fields
    fn retarget_own(&mut self, _kind: TableKind, _old: &str, _new: &str) {}

    /// Get the entity's unique handle
    fn handle(&self) -> Handle {
        self.common().handle
    }

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }

    /// Every table entry the entity depends on
    fn references(&self) -> Vec<TableRef> {
        let mut refs = self.common().references();
        refs.extend(self.own_references());
        refs
    }

    /// Point every edge naming `old` in table `kind` at `new`
    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        self.common_mut().retarget(kind, old, new);
        self.retarget_own(kind, old, new);
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle
    pub handle: Handle,
    /// Handle of the owning block record
    pub owner: Handle,
    /// Layer name
    pub layer: String,
    /// Line type name
    pub line_type: String,
    /// Color
    pub color: Color,
    /// Line weight
    pub line_weight: LineWeight,
    /// Visibility flag
    pub invisible: bool,
    /// Extended data (XDATA)
    pub extended_data: ExtendedData,
    /// Objects notified about changes to this entity (groups)
    pub reactors: Vec<Handle>,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            layer: "0".to_string(),
            line_type: "ByLayer".to_string(),
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            invisible: false,
            extended_data: ExtendedData::new(),
            reactors: Vec::new(),
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Check if the entity is registered in a document
    pub fn is_attached(&self) -> bool {
        !self.owner.is_null()
    }

    fn references(&self) -> Vec<TableRef> {
        let mut refs = vec![
            TableRef::new(TableKind::Layer, &self.layer),
            TableRef::new(TableKind::LineType, &self.line_type),
        ];
        refs.extend(self.extended_data.references());
        refs
    }

    fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        match kind {
            TableKind::Layer => retarget_name(&mut self.layer, old, new),
            TableKind::LineType => retarget_name(&mut self.line_type, old, new),
            _ => {}
        }
        self.extended_data.retarget(kind, old, new);
    }

    pub(crate) fn add_reactor(&mut self, reactor: Handle) {
        if !self.reactors.contains(&reactor) {
            self.reactors.push(reactor);
        }
    }

    pub(crate) fn remove_reactor(&mut self, reactor: Handle) {
        self.reactors.retain(|r| *r != reactor);
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    Line(Line),
    Circle(Circle),
    Text(Text),
    MText(MText),
    /// Block reference
    Insert(Insert),
    Dimension(Dimension),
    Leader(Leader),
    MultiLeader(MultiLeader),
    MLine(MLine),
    RasterImage(RasterImage),
    /// PDF, DWF or DGN underlay
    Underlay(Underlay),
    Shape(Shape),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Leader(e) => e,
            EntityType::MultiLeader(e) => e,
            EntityType::MLine(e) => e,
            EntityType::RasterImage(e) => e,
            EntityType::Underlay(e) => e,
            EntityType::Shape(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Leader(e) => e,
            EntityType::MultiLeader(e) => e,
            EntityType::MLine(e) => e,
            EntityType::RasterImage(e) => e,
            EntityType::Underlay(e) => e,
            EntityType::Shape(e) => e,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    pub fn entity_type(&self) -> &'static str {
        self.as_entity().entity_type()
    }

    pub fn references(&self) -> Vec<TableRef> {
        self.as_entity().references()
    }

    pub fn retarget(&mut self, kind: TableKind, old: &str, new: &str) {
        self.as_entity_mut().retarget(kind, old, new);
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EntityType {
                fn from(entity: $variant) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(
    Line,
    Circle,
    Text,
    MText,
    Insert,
    Dimension,
    Leader,
    MultiLeader,
    MLine,
    RasterImage,
    Underlay,
    Shape,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdata::{ExtendedDataRecord, XDataValue};

    #[test]
    fn test_common_references() {
        let mut line = Line::new();
        line.common.layer = "Walls".to_string();
        line.common
            .extended_data
            .add_record(
                ExtendedDataRecord::new("MyApp")
                    .with_value(XDataValue::LayerName("Notes".to_string())),
            )
            .unwrap();

        let entity = EntityType::from(line);
        assert_eq!(
            entity.references(),
            vec![
                TableRef::new(TableKind::Layer, "Walls"),
                TableRef::new(TableKind::LineType, "ByLayer"),
                TableRef::new(TableKind::AppId, "MyApp"),
                TableRef::new(TableKind::Layer, "Notes"),
            ]
        );
    }

    #[test]
    fn test_retarget_common_and_xdata() {
        let mut line = Line::new();
        line.common
            .extended_data
            .add_record(
                ExtendedDataRecord::new("MyApp")
                    .with_value(XDataValue::LayerName("0".to_string())),
            )
            .unwrap();
        let mut entity = EntityType::from(line);

        entity.retarget(TableKind::Layer, "0", "Base");
        assert_eq!(entity.common().layer, "Base");
        let record = entity.common().extended_data.get_record("MYAPP").unwrap();
        assert_eq!(record.values[0], XDataValue::LayerName("Base".to_string()));
    }

    #[test]
    fn test_reactors_are_unique() {
        let mut common = EntityCommon::new();
        common.add_reactor(Handle::new(5));
        common.add_reactor(Handle::new(5));
        assert_eq!(common.reactors, vec![Handle::new(5)]);
        common.remove_reactor(Handle::new(5));
        assert!(common.reactors.is_empty());
        assert!(!common.is_attached());
    }
}
