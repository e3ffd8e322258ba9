//! Non-graphical objects held in document registries
//!
//! Unlike the symbol tables these live in dictionaries in a drawing file,
//! but the document manages them with the same name-keyed registry and
//! reference counting.

mod group;
mod image_definition;
mod layer_state;
mod layout;
mod mlinestyle;
mod multileader_style;
mod shape_style;
mod underlay_definition;

pub use group::Group;
pub use image_definition::{ImageDefinition, ResolutionUnit};
pub use layer_state::{LayerState, LayerStateEntry};
pub use layout::Layout;
pub use mlinestyle::{MLineStyle, MLineStyleElement, MLineStyleFlags};
pub use multileader_style::{LeaderContentType, MultiLeaderPathType, MultiLeaderStyle};
pub use shape_style::ShapeStyle;
pub use underlay_definition::{UnderlayDefinition, UnderlayFormat};
