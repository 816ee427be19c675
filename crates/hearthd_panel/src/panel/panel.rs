use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;
use tracing::warn;

use super::collapser::DisabledCollapser;
use super::view::ListItem;
use super::view::PanelBody;
use super::view::PanelView;
use super::view::StaticEntry;
use crate::context::Context;
use crate::delegates::Delegates;
use crate::delegates::EditorRequest;
use crate::entity::compute_state_name;
use crate::entity::is_blank;
use crate::entity::strip_device_name;
use crate::localize::ADD_ENTITIES_TO_VIEW;
use crate::localize::NO_ENTITIES;
use crate::registry::EntityRegistryEntry;
use crate::rows::MoreInfo;
use crate::rows::MoreInfoReceiver;
use crate::rows::MoreInfoSender;
use crate::rows::RowConfig;
use crate::rows::RowElement;
use crate::rows::RowId;

/// Inputs the owner of a panel can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PanelInput {
    Context,
    Header,
    DeviceName,
    Entities,
    ShowDisabled,
}

/// Initial values for a panel's inputs.
#[derive(Debug, Clone, Default)]
pub struct PanelInputs {
    pub header: String,
    pub device_name: String,
    pub entities: Vec<EntityRegistryEntry>,
    pub show_disabled: bool,
}

/// A registry entry rendered without a live row.
#[derive(Debug, Clone)]
struct RenderedEntry {
    entry: EntityRegistryEntry,
    view: StaticEntry,
}

impl RenderedEntry {
    fn new(entry: &EntityRegistryEntry, device_name: &str) -> Self {
        Self {
            entry: entry.clone(),
            view: StaticEntry::new(entry, device_name),
        }
    }
}

#[derive(Debug)]
enum Slot {
    /// Index into the row index
    Row(usize),
    Entry(RenderedEntry),
}

/// Result of the last structural render, minus the rows themselves.
#[derive(Debug, Default)]
struct Layout {
    header: String,
    empty: bool,
    slots: Vec<Slot>,
    disabled: Vec<RenderedEntry>,
}

/// Lists the entities of one device.
///
/// Inputs are set through the `set_*` methods and take effect on the next
/// [`update`](Self::update). An update that only carries a new context is
/// forwarded to the live rows; anything else rebuilds every row.
pub struct DeviceEntitiesPanel {
    header: String,
    device_name: String,
    context: Arc<Context>,
    entities: Vec<EntityRegistryEntry>,
    collapser: DisabledCollapser,

    /// Live rows of the last structural render, in list order
    rows: Vec<Box<dyn RowElement>>,

    /// Registry entry of every live row, looked up when a row asks for more info
    row_entries: HashMap<RowId, EntityRegistryEntry>,

    layout: Layout,

    /// Inputs changed since the last update
    changed: BTreeSet<PanelInput>,

    next_row_id: u64,
    renders: u64,
    delegates: Delegates,
    more_info_tx: MoreInfoSender,
    more_info_rx: MoreInfoReceiver,
}

impl DeviceEntitiesPanel {
    /// Create a panel and perform its first structural render.
    pub fn new(inputs: PanelInputs, context: Arc<Context>, delegates: Delegates) -> Self {
        let (more_info_tx, more_info_rx) = mpsc::unbounded_channel();
        let mut panel = Self {
            header: inputs.header,
            device_name: inputs.device_name,
            context,
            entities: inputs.entities,
            collapser: DisabledCollapser::new(inputs.show_disabled),
            rows: Vec::new(),
            row_entries: HashMap::new(),
            layout: Layout::default(),
            changed: BTreeSet::new(),
            next_row_id: 0,
            renders: 0,
            delegates,
            more_info_tx,
            more_info_rx,
        };
        panel.render();
        panel
    }

    pub fn set_context(&mut self, context: Arc<Context>) {
        if Arc::ptr_eq(&self.context, &context) {
            return;
        }
        self.context = context;
        self.changed.insert(PanelInput::Context);
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        let header = header.into();
        if header != self.header {
            self.header = header;
            self.changed.insert(PanelInput::Header);
        }
    }

    pub fn set_device_name(&mut self, device_name: impl Into<String>) {
        let device_name = device_name.into();
        if device_name != self.device_name {
            self.device_name = device_name;
            self.changed.insert(PanelInput::DeviceName);
        }
    }

    /// Replace the entity list. A list equal to the current one is not a
    /// change and does not trigger a structural render; to rebuild the rows
    /// anyway, change another structural input or recreate the panel.
    pub fn set_entities(&mut self, entities: Vec<EntityRegistryEntry>) {
        if entities != self.entities {
            self.entities = entities;
            self.changed.insert(PanelInput::Entities);
        }
    }

    pub fn set_show_disabled(&mut self, show_disabled: bool) {
        if show_disabled != self.collapser.is_expanded() {
            self.collapser.set_expanded(show_disabled);
            self.changed.insert(PanelInput::ShowDisabled);
        }
    }

    /// Apply pending input changes. Returns whether a structural render ran.
    pub fn update(&mut self) -> bool {
        let changed = std::mem::take(&mut self.changed);
        if !self.should_update(&changed) {
            return false;
        }

        debug!("Structural render of '{}', changed: {:?}", self.device_name, changed);
        self.render();
        true
    }

    /// Decide whether `changed` needs a structural render.
    ///
    /// A change of the context alone is handled here by handing the new
    /// context to every live row.
    pub fn should_update(&mut self, changed: &BTreeSet<PanelInput>) -> bool {
        if changed.len() == 1 && changed.contains(&PanelInput::Context) {
            for row in &mut self.rows {
                row.set_context(Arc::clone(&self.context));
            }
            debug!("Forwarded context to {} rows", self.rows.len());
            return false;
        }
        !changed.is_empty()
    }

    /// Rebuild the row index, the side-table and the layout from scratch.
    fn render(&mut self) {
        let mut rows: Vec<Box<dyn RowElement>> = Vec::new();
        let mut row_entries = HashMap::new();
        let mut slots = Vec::with_capacity(self.entities.len());
        let mut disabled = Vec::new();

        for entry in &self.entities {
            if entry.is_disabled() {
                disabled.push(RenderedEntry::new(entry, &self.device_name));
                continue;
            }

            if !self.context.has_state(&entry.entity_id) {
                slots.push(Slot::Entry(RenderedEntry::new(entry, &self.device_name)));
                continue;
            }

            let row_id = RowId::new(self.next_row_id);
            self.next_row_id += 1;

            let row = self.build_row(row_id, entry);
            row_entries.insert(row_id, entry.clone());
            slots.push(Slot::Row(rows.len()));
            rows.push(row);
        }

        debug!(
            "Rendered '{}': {} rows, {} static entries, {} disabled",
            self.device_name,
            rows.len(),
            slots.len() - rows.len(),
            disabled.len()
        );

        self.rows = rows;
        self.row_entries = row_entries;
        self.layout = Layout {
            header: self.header.clone(),
            empty: self.entities.is_empty(),
            slots,
            disabled,
        };
        self.renders += 1;
    }

    fn build_row(&self, row_id: RowId, entry: &EntityRegistryEntry) -> Box<dyn RowElement> {
        let mut config = RowConfig::new(entry.entity_id.clone());
        if let Some(state) = self.context.state(&entry.entity_id) {
            let name = strip_device_name(&compute_state_name(state), &self.device_name);
            if !is_blank(&name) {
                config.name = Some(name);
            }
        }

        let more_info = MoreInfo::new(row_id, self.more_info_tx.clone());
        let mut row = self.delegates.rows.create_row(config, more_info);
        row.set_context(Arc::clone(&self.context));
        row
    }

    /// Current output: live rows render against the context they last received.
    pub fn view(&self) -> PanelView {
        let body = if self.layout.empty {
            PanelBody::Empty {
                message: self.context.localize(NO_ENTITIES, &[]),
            }
        } else {
            let items = self
                .layout
                .slots
                .iter()
                .map(|slot| match slot {
                    Slot::Row(index) => {
                        let row = &self.rows[*index];
                        ListItem::Row {
                            row_id: row.id(),
                            view: row.render(),
                        }
                    }
                    Slot::Entry(rendered) => ListItem::Entry(rendered.view.clone()),
                })
                .collect();

            let disabled: Vec<StaticEntry> = self
                .layout
                .disabled
                .iter()
                .map(|rendered| rendered.view.clone())
                .collect();

            PanelBody::Entities {
                items,
                disabled: self.collapser.render(&disabled, &self.context),
                add_to_view: self.context.localize(ADD_ENTITIES_TO_VIEW, &[]),
            }
        };

        PanelView {
            header: self.layout.header.clone(),
            body,
        }
    }

    /// Show or hide the disabled entities. Rows are left untouched.
    pub fn toggle_disabled(&mut self) -> bool {
        let expanded = self.collapser.toggle();
        debug!("Disabled entities of '{}' expanded: {}", self.device_name, expanded);
        expanded
    }

    /// Open the editor for every row that asked for more info since the last
    /// call. Returns how many editors were opened.
    pub fn handle_more_info(&mut self) -> usize {
        let mut opened = 0;
        while let Ok(row_id) = self.more_info_rx.try_recv() {
            match self.row_entries.get(&row_id) {
                Some(entry) => {
                    self.open_editor(entry);
                    opened += 1;
                }
                None => warn!("Ignoring more-info from {}, it is no longer rendered", row_id),
            }
        }
        opened
    }

    /// Click on a static entry. Returns false when no such entry is visible.
    pub fn open_entry(&self, entity_id: &str) -> bool {
        let visible_disabled: &[RenderedEntry] = if self.collapser.is_expanded() {
            self.layout.disabled.as_slice()
        } else {
            &[]
        };

        let rendered = self
            .layout
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Entry(rendered) => Some(rendered),
                Slot::Row(_) => None,
            })
            .chain(visible_disabled)
            .find(|rendered| rendered.entry.entity_id == entity_id);

        match rendered {
            Some(rendered) => {
                self.open_editor(&rendered.entry);
                true
            }
            None => {
                debug!("No visible entry for {}", entity_id);
                false
            }
        }
    }

    /// Hand every enabled entity, with or without live state, to the view adder.
    pub fn add_to_view(&self) {
        let entity_ids: Vec<String> = self
            .entities
            .iter()
            .filter(|entry| !entry.is_disabled())
            .map(|entry| entry.entity_id.clone())
            .collect();

        if let Err(e) =
            self.delegates
                .view_adder
                .add_to_view(&self.context, entity_ids, &self.device_name)
        {
            warn!("Failed to add entities of '{}' to a view: {}", self.device_name, e);
        }
    }

    fn open_editor(&self, entry: &EntityRegistryEntry) {
        if let Err(e) = self.delegates.editor.open_editor(EditorRequest::from(entry)) {
            warn!("Failed to open entity editor for {}: {}", entry.entity_id, e);
        }
    }

    /// Live rows in list order.
    pub fn rows(&self) -> impl Iterator<Item = &dyn RowElement> {
        self.rows.iter().map(|row| row.as_ref())
    }

    pub fn row(&self, row_id: RowId) -> Option<&dyn RowElement> {
        self.rows().find(|row| row.id() == row_id)
    }

    /// Registry entry recorded for a live row.
    pub fn row_entry(&self, row_id: RowId) -> Option<&EntityRegistryEntry> {
        self.row_entries.get(&row_id)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn entities(&self) -> &[EntityRegistryEntry] {
        &self.entities
    }

    pub fn show_disabled(&self) -> bool {
        self.collapser.is_expanded()
    }

    /// Number of structural renders so far, including the initial one.
    pub fn render_count(&self) -> u64 {
        self.renders
    }
}
