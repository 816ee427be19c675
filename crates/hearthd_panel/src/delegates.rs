//! Outward hand-offs from the panel.
//!
//! The panel only decides *what* to hand off; opening the entity editor and
//! adding entities to a dashboard view belong to whoever implements these
//! traits.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::context::Context;
use crate::registry::EntityRegistryEntry;
use crate::rows::DefaultRowFactory;
use crate::rows::RowFactory;

/// Request to open the entity editor dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorRequest {
    pub entry: EntityRegistryEntry,
    pub entity_id: String,
}

impl From<&EntityRegistryEntry> for EditorRequest {
    fn from(entry: &EntityRegistryEntry) -> Self {
        Self {
            entity_id: entry.entity_id.clone(),
            entry: entry.clone(),
        }
    }
}

pub trait EntityEditor: Send + Sync {
    fn open_editor(&self, request: EditorRequest) -> anyhow::Result<()>;
}

pub trait ViewAdder: Send + Sync {
    /// Add `entity_ids` to a dashboard view; `device_name` seeds default naming.
    fn add_to_view(
        &self,
        context: &Context,
        entity_ids: Vec<String>,
        device_name: &str,
    ) -> anyhow::Result<()>;
}

/// Collaborators a panel is wired to.
#[derive(Clone)]
pub struct Delegates {
    pub rows: Arc<dyn RowFactory>,
    pub editor: Arc<dyn EntityEditor>,
    pub view_adder: Arc<dyn ViewAdder>,
}

impl Delegates {
    /// Built-in rows, with editor and view requests only logged.
    pub fn logging() -> Self {
        Self {
            rows: Arc::new(DefaultRowFactory),
            editor: Arc::new(LoggingDelegate),
            view_adder: Arc::new(LoggingDelegate),
        }
    }
}

/// Logs hand-offs instead of performing them. Used by the standalone binary,
/// which has no dialog system or dashboard to talk to.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDelegate;

impl EntityEditor for LoggingDelegate {
    fn open_editor(&self, request: EditorRequest) -> anyhow::Result<()> {
        info!(
            "Open entity editor: {} (disabled_by: {:?})",
            request.entity_id, request.entry.disabled_by
        );
        Ok(())
    }
}

impl ViewAdder for LoggingDelegate {
    fn add_to_view(
        &self,
        _context: &Context,
        entity_ids: Vec<String>,
        device_name: &str,
    ) -> anyhow::Result<()> {
        info!(
            "Add {} entities of '{}' to a view: {:?}",
            entity_ids.len(),
            device_name,
            entity_ids
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DisabledBy;

    #[test]
    fn test_editor_request_from_entry() {
        let entry = EntityRegistryEntry::new("sensor.kitchen_temp").disabled_by(DisabledBy::User);
        let request = EditorRequest::from(&entry);

        assert_eq!(request.entity_id, "sensor.kitchen_temp");
        assert_eq!(request.entry, entry);
    }

    #[test]
    fn test_logging_delegate_succeeds() {
        let entry = EntityRegistryEntry::new("light.kitchen");
        assert!(LoggingDelegate.open_editor(EditorRequest::from(&entry)).is_ok());
        assert!(LoggingDelegate
            .add_to_view(&Context::default(), vec!["light.kitchen".to_string()], "Kitchen")
            .is_ok());
    }
}
