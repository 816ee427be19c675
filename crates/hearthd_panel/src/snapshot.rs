//! JSON snapshot of a device: its registry entries and the live states the
//! panel should be rendered against.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::context::Context;
use crate::context::EntityState;
use crate::localize::Translations;
use crate::panel::PanelInputs;
use crate::registry::EntityRegistryEntry;

fn default_header() -> String {
    "Entities".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Device name, stripped from the front of entity names
    pub name: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default)]
    pub entities: Vec<EntityRegistryEntry>,

    #[serde(default)]
    pub states: Vec<EntityState>,
}

impl DeviceSnapshot {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SnapshotError::Io(path.as_ref().to_path_buf(), e))?;

        serde_json::from_str(&contents).map_err(SnapshotError::Parse)
    }

    pub fn context(&self, translations: Translations) -> Context {
        Context::new(self.states.iter().cloned(), translations)
    }

    pub fn inputs(&self, show_disabled: bool) -> PanelInputs {
        PanelInputs {
            header: self.header.clone(),
            device_name: self.name.clone(),
            entities: self.entities.clone(),
            show_disabled,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
