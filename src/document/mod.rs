//! CAD document structure
//!
//! [`CadDocument`] owns every registry, the shared handle counter and the
//! global handle map. All cross-registry bookkeeping runs through it:
//! registries never mutate each other directly, they are handed the
//! document explicitly.

mod cascade;
mod engine;
mod entities;
mod groups;
mod layer_states;
mod layouts;

pub use cascade::{Mutability, TableCascade};

use crate::config::DocumentConfiguration;
use crate::notification::{NotificationCollection, NotificationType};
use crate::objects::{
    Group, ImageDefinition, LayerState, Layout, MLineStyle, MultiLeaderStyle, ShapeStyle,
    UnderlayDefinition,
};
use crate::tables::{
    AppId, BlockRecord, DimStyle, Layer, LineType, Registry, RegistryMut, Table, TableKind,
    TextStyle, Ucs, VPort, View,
};
use crate::types::Handle;
use ahash::AHashMap;

/// Where a live handle points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLocation {
    /// One of the document's registries
    Table(TableKind),
    /// An entry of a registry, by its current name
    TableEntry { kind: TableKind, name: String },
    /// An entity owned by the block record with handle `block`
    Entity { block: Handle },
    /// An attribute definition of a block, by folded tag
    AttributeDefinition { block: Handle, tag: String },
}

/// A CAD document: the registries, their entries and the entities
/// held by block records.
///
/// # Example
/// ```
/// use dxf_tables::CadDocument;
/// use dxf_tables::tables::{Layer, LineType};
///
/// let mut doc = CadDocument::new();
/// doc.add(Layer::with_line_type("Walls", "Dashed")).unwrap();
///
/// // The layer created its line type and holds a use of it.
/// assert!(doc.line_types().contains("DASHED"));
/// assert!(!doc.remove::<LineType>("Dashed"));
///
/// assert!(doc.remove::<Layer>("Walls"));
/// assert!(doc.remove::<LineType>("Dashed"));
/// ```
#[derive(Debug, Clone)]
pub struct CadDocument {
    layers: Table<Layer>,
    line_types: Table<LineType>,
    text_styles: Table<TextStyle>,
    block_records: Table<BlockRecord>,
    dim_styles: Table<DimStyle>,
    mline_styles: Table<MLineStyle>,
    mleader_styles: Table<MultiLeaderStyle>,
    app_ids: Table<AppId>,
    groups: Table<Group>,
    layouts: Table<Layout>,
    views: Table<View>,
    vports: Table<VPort>,
    ucss: Table<Ucs>,
    image_definitions: Table<ImageDefinition>,
    underlay_definitions: Table<UnderlayDefinition>,
    shape_styles: Table<ShapeStyle>,
    layer_states: Table<LayerState>,

    /// Every live handle and what it belongs to
    objects: AHashMap<Handle, ObjectLocation>,
    /// Next handle value to issue
    next_handle: u64,
    /// Last number given to an unnamed group
    group_index: usize,
    config: DocumentConfiguration,

    /// Non-fatal events raised while editing
    pub notifications: NotificationCollection,
}

impl CadDocument {
    /// Create a new document with the default entries
    pub fn new() -> Self {
        Self::with_configuration(DocumentConfiguration::default())
    }

    /// Create a document with a specific configuration
    pub fn with_configuration(config: DocumentConfiguration) -> Self {
        let mut doc = CadDocument {
            layers: Table::new(),
            line_types: Table::new(),
            text_styles: Table::new(),
            block_records: Table::new(),
            dim_styles: Table::new(),
            mline_styles: Table::new(),
            mleader_styles: Table::new(),
            app_ids: Table::new(),
            groups: Table::new(),
            layouts: Table::new(),
            views: Table::new(),
            vports: Table::new(),
            ucss: Table::new(),
            image_definitions: Table::new(),
            underlay_definitions: Table::new(),
            shape_styles: Table::new(),
            layer_states: Table::new(),
            objects: AHashMap::new(),
            next_handle: config.handle_seed,
            group_index: 0,
            config,
            notifications: NotificationCollection::new(),
        };

        // Registry handles come first, they own the entries.
        for kind in TableKind::ALL {
            let handle = doc.allocate_handle();
            doc.table_handle_mut(kind, handle);
            doc.objects.insert(handle, ObjectLocation::Table(kind));
        }

        if doc.config.create_defaults {
            if let Err(err) = doc.initialize_defaults() {
                tracing::warn!(error = %err, "default entries incomplete");
                doc.notify(
                    NotificationType::Warning,
                    format!("default entries incomplete: {}", err),
                );
            }
        }
        doc
    }

    /// Seed the reserved entries every drawing carries
    fn initialize_defaults(&mut self) -> crate::Result<()> {
        self.seed(LineType::by_layer())?;
        self.seed(LineType::by_block())?;
        self.seed(LineType::continuous())?;
        self.seed(Layer::layer_0())?;
        self.seed(TextStyle::standard())?;
        self.seed(AppId::acad())?;
        self.seed(DimStyle::standard())?;
        self.seed(MLineStyle::standard())?;
        self.seed(MultiLeaderStyle::standard())?;

        self.seed(BlockRecord::model_space())?;
        self.seed(BlockRecord::paper_space())?;
        self.seed(Layout::model())?;
        let mut layout1 = Layout::new("Layout1").with_block(BlockRecord::PAPER_SPACE);
        layout1.tab_order = 1;
        self.seed(layout1)?;

        // The viewport table accepts nothing else.
        self.seed(VPort::active())?;
        Ok(())
    }

    /// The configuration the document was created with
    pub fn configuration(&self) -> &DocumentConfiguration {
        &self.config
    }

    // ===== Handles =====

    /// Allocate a new unique handle
    pub fn allocate_handle(&mut self) -> Handle {
        let (handle, next) = Handle::assign(self.next_handle);
        self.next_handle = next;
        handle
    }

    /// Get the next handle value (without allocating)
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    /// Claim a pre-assigned handle, e.g. one read from a file.
    ///
    /// The counter is advanced past it so later allocations never collide.
    pub fn reserve_handle(&mut self, handle: Handle) -> crate::Result<()> {
        if handle.is_null() {
            return Err(crate::DxfError::InvalidArgument(
                "cannot reserve the null handle".to_string(),
            ));
        }
        if self.objects.contains_key(&handle) {
            return Err(crate::DxfError::DuplicateHandle(handle.value()));
        }
        if handle.value() >= self.next_handle {
            self.next_handle = handle.value() + 1;
        }
        Ok(())
    }

    /// Look up what a live handle belongs to
    pub fn object(&self, handle: Handle) -> Option<&ObjectLocation> {
        self.objects.get(&handle)
    }

    /// Number of live handles, registries included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check if a handle is live in this document
    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.objects.contains_key(&handle)
    }

    // ===== Registries =====

    /// The registry holding entries of type `T`
    pub fn table<T: TableCascade>(&self) -> &Table<T> {
        T::table(self)
    }

    pub fn layers(&self) -> &Table<Layer> {
        &self.layers
    }

    pub fn line_types(&self) -> &Table<LineType> {
        &self.line_types
    }

    pub fn text_styles(&self) -> &Table<TextStyle> {
        &self.text_styles
    }

    pub fn block_records(&self) -> &Table<BlockRecord> {
        &self.block_records
    }

    pub fn dim_styles(&self) -> &Table<DimStyle> {
        &self.dim_styles
    }

    pub fn mline_styles(&self) -> &Table<MLineStyle> {
        &self.mline_styles
    }

    pub fn mleader_styles(&self) -> &Table<MultiLeaderStyle> {
        &self.mleader_styles
    }

    pub fn app_ids(&self) -> &Table<AppId> {
        &self.app_ids
    }

    pub fn groups(&self) -> &Table<Group> {
        &self.groups
    }

    pub fn layouts(&self) -> &Table<Layout> {
        &self.layouts
    }

    pub fn views(&self) -> &Table<View> {
        &self.views
    }

    pub fn vports(&self) -> &Table<VPort> {
        &self.vports
    }

    pub fn ucss(&self) -> &Table<Ucs> {
        &self.ucss
    }

    pub fn image_definitions(&self) -> &Table<ImageDefinition> {
        &self.image_definitions
    }

    pub fn underlay_definitions(&self) -> &Table<UnderlayDefinition> {
        &self.underlay_definitions
    }

    pub fn shape_styles(&self) -> &Table<ShapeStyle> {
        &self.shape_styles
    }

    pub fn layer_states(&self) -> &Table<LayerState> {
        &self.layer_states
    }

    /// The model space block record, if the defaults were created
    pub fn model_space(&self) -> Option<&BlockRecord> {
        self.block_records.get(BlockRecord::MODEL_SPACE)
    }

    /// Registry of a kind, without knowing its entry type
    pub fn registry(&self, kind: TableKind) -> &dyn Registry {
        match kind {
            TableKind::AppId => &self.app_ids,
            TableKind::BlockRecord => &self.block_records,
            TableKind::DimStyle => &self.dim_styles,
            TableKind::Group => &self.groups,
            TableKind::ImageDefinition => &self.image_definitions,
            TableKind::Layer => &self.layers,
            TableKind::LayerState => &self.layer_states,
            TableKind::Layout => &self.layouts,
            TableKind::LineType => &self.line_types,
            TableKind::MLineStyle => &self.mline_styles,
            TableKind::MultiLeaderStyle => &self.mleader_styles,
            TableKind::ShapeStyle => &self.shape_styles,
            TableKind::TextStyle => &self.text_styles,
            TableKind::Ucs => &self.ucss,
            TableKind::UnderlayDefinition => &self.underlay_definitions,
            TableKind::View => &self.views,
            TableKind::VPort => &self.vports,
        }
    }

    pub(crate) fn registry_mut(&mut self, kind: TableKind) -> &mut dyn RegistryMut {
        match kind {
            TableKind::AppId => &mut self.app_ids,
            TableKind::BlockRecord => &mut self.block_records,
            TableKind::DimStyle => &mut self.dim_styles,
            TableKind::Group => &mut self.groups,
            TableKind::ImageDefinition => &mut self.image_definitions,
            TableKind::Layer => &mut self.layers,
            TableKind::LayerState => &mut self.layer_states,
            TableKind::Layout => &mut self.layouts,
            TableKind::LineType => &mut self.line_types,
            TableKind::MLineStyle => &mut self.mline_styles,
            TableKind::MultiLeaderStyle => &mut self.mleader_styles,
            TableKind::ShapeStyle => &mut self.shape_styles,
            TableKind::TextStyle => &mut self.text_styles,
            TableKind::Ucs => &mut self.ucss,
            TableKind::UnderlayDefinition => &mut self.underlay_definitions,
            TableKind::View => &mut self.views,
            TableKind::VPort => &mut self.vports,
        }
    }

    fn table_handle_mut(&mut self, kind: TableKind, handle: Handle) {
        match kind {
            TableKind::AppId => self.app_ids.set_handle(handle),
            TableKind::BlockRecord => self.block_records.set_handle(handle),
            TableKind::DimStyle => self.dim_styles.set_handle(handle),
            TableKind::Group => self.groups.set_handle(handle),
            TableKind::ImageDefinition => self.image_definitions.set_handle(handle),
            TableKind::Layer => self.layers.set_handle(handle),
            TableKind::LayerState => self.layer_states.set_handle(handle),
            TableKind::Layout => self.layouts.set_handle(handle),
            TableKind::LineType => self.line_types.set_handle(handle),
            TableKind::MLineStyle => self.mline_styles.set_handle(handle),
            TableKind::MultiLeaderStyle => self.mleader_styles.set_handle(handle),
            TableKind::ShapeStyle => self.shape_styles.set_handle(handle),
            TableKind::TextStyle => self.text_styles.set_handle(handle),
            TableKind::Ucs => self.ucss.set_handle(handle),
            TableKind::UnderlayDefinition => self.underlay_definitions.set_handle(handle),
            TableKind::View => self.views.set_handle(handle),
            TableKind::VPort => self.vports.set_handle(handle),
        }
    }

    /// Maximum number of entries the table of `kind` may hold
    pub fn capacity(&self, kind: TableKind) -> usize {
        let default = kind.default_capacity();
        self.config
            .table_capacity
            .map_or(default, |cap| cap.min(default))
    }

    /// Current name of the registry entry behind `handle`
    pub(crate) fn entry_name(&self, handle: Handle) -> Option<&str> {
        match self.objects.get(&handle) {
            Some(ObjectLocation::TableEntry { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Record a non-fatal event when collection is enabled
    pub(crate) fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        if self.config.collect_notifications {
            self.notifications.notify(notification_type, message);
        }
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}
