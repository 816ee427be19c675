use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::context::Context;
use crate::context::EntityState;
use crate::entity::compute_state_name;
use crate::entity::domain_icon;
use crate::entity::domain_of;
use crate::entity::is_blank;

/// Identity of a row within a panel. Never reused by the panel that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Channel types for "more info" signals FROM rows TO the panel
pub type MoreInfoSender = mpsc::UnboundedSender<RowId>;
pub type MoreInfoReceiver = mpsc::UnboundedReceiver<RowId>;

/// Callback handed to a row at construction; firing it tells the owning panel
/// that the user asked for more information about this row.
#[derive(Debug, Clone)]
pub struct MoreInfo {
    row: RowId,
    tx: MoreInfoSender,
}

impl MoreInfo {
    pub fn new(row: RowId, tx: MoreInfoSender) -> Self {
        Self { row, tx }
    }

    pub fn row(&self) -> RowId {
        self.row
    }

    pub fn fire(&self) {
        if self.tx.send(self.row).is_err() {
            debug!("More-info for {} dropped, panel is gone", self.row);
        }
    }
}

/// Configuration a row is created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowConfig {
    pub entity: String,

    /// Label override; the entity's display name is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RowConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RowKind {
    Toggle,
    Sensor,
    SimpleEntity,
}

/// What a row shows for its entity at the time it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub kind: RowKind,
    pub entity_id: String,
    pub name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A live row bound to one entity.
pub trait RowElement: Send + Sync {
    fn id(&self) -> RowId;

    fn config(&self) -> &RowConfig;

    fn entity_id(&self) -> &str {
        &self.config().entity
    }

    /// Point the row at a newer context snapshot.
    fn set_context(&mut self, context: Arc<Context>);

    fn render(&self) -> RowView;

    /// The user asked for more information about this row.
    fn more_info(&self);
}

/// State shared by the built-in row types.
#[derive(Debug)]
pub struct RowBase {
    config: RowConfig,
    context: Option<Arc<Context>>,
    more_info: MoreInfo,
}

impl RowBase {
    pub fn new(config: RowConfig, more_info: MoreInfo) -> Self {
        Self {
            config,
            context: None,
            more_info,
        }
    }

    pub fn id(&self) -> RowId {
        self.more_info.row()
    }

    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    pub fn set_context(&mut self, context: Arc<Context>) {
        self.context = Some(context);
    }

    pub fn state(&self) -> Option<&EntityState> {
        self.context.as_deref()?.state(&self.config.entity)
    }

    pub fn name(&self) -> String {
        if let Some(name) = self.config.name.as_deref().filter(|n| !is_blank(n)) {
            return name.to_string();
        }
        match self.state() {
            Some(state) => compute_state_name(state),
            None => self.config.entity.clone(),
        }
    }

    pub fn icon(&self) -> String {
        self.state()
            .and_then(|s| s.attribute_str("icon"))
            .unwrap_or_else(|| domain_icon(domain_of(&self.config.entity)))
            .to_string()
    }

    pub fn view(&self, kind: RowKind, state: Option<String>) -> RowView {
        RowView {
            kind,
            entity_id: self.config.entity.clone(),
            name: self.name(),
            icon: self.icon(),
            state,
        }
    }

    pub fn more_info(&self) {
        self.more_info.fire();
    }
}
