use std::sync::Arc;

use super::row::MoreInfo;
use super::row::RowBase;
use super::row::RowConfig;
use super::row::RowElement;
use super::row::RowId;
use super::row::RowKind;
use super::row::RowView;
use crate::context::Context;

/// Fallback row: name, icon and the raw state value.
#[derive(Debug)]
pub struct SimpleEntityRow {
    base: RowBase,
}

impl SimpleEntityRow {
    pub fn create(config: RowConfig, more_info: MoreInfo) -> Box<dyn RowElement> {
        Box::new(Self {
            base: RowBase::new(config, more_info),
        })
    }
}

impl RowElement for SimpleEntityRow {
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
        let state = self.base.state().map(|s| s.state.clone());
        self.base.view(RowKind::SimpleEntity, state)
    }

    fn more_info(&self) {
        self.base.more_info();
    }
}
