use std::sync::Arc;

use linkme::distributed_slice;

use super::factory::RowType;
use super::factory::ROW_TYPES;
use super::row::MoreInfo;
use super::row::RowBase;
use super::row::RowConfig;
use super::row::RowElement;
use super::row::RowId;
use super::row::RowKind;
use super::row::RowView;
use crate::context::Context;

#[distributed_slice(ROW_TYPES)]
static TOGGLE_ROW: RowType = RowType {
    name: "toggle",
    domains: &["automation", "fan", "input_boolean", "light", "switch"],
    create: ToggleRow::create,
};

/// Row for entities that can be switched on and off.
#[derive(Debug)]
pub struct ToggleRow {
    base: RowBase,
}

impl ToggleRow {
    pub fn create(config: RowConfig, more_info: MoreInfo) -> Box<dyn RowElement> {
        Box::new(Self {
            base: RowBase::new(config, more_info),
        })
    }

    /// `None` when the entity is neither on nor off (e.g. unavailable).
    pub fn is_on(&self) -> Option<bool> {
        match self.base.state()?.state.as_str() {
            "on" => Some(true),
            "off" => Some(false),
            _ => None,
        }
    }
}

impl RowElement for ToggleRow {
    fn id(&self) -> RowId {
        self.base.id()
    }

    fn config(&self) -> &RowConfig {
        self.base.config()
    }

    fn set_context(&mut self, context: Arc<Context>) {
        self.base.set_context(context);
    }

    fn render(&self) -> RowView {
        let state = match self.is_on() {
            Some(true) => Some("On".to_string()),
            Some(false) => Some("Off".to_string()),
            None => self.base.state().map(|s| s.state.clone()),
        };
        self.base.view(RowKind::Toggle, state)
    }

    fn more_info(&self) {
        self.base.more_info();
    }
}
