use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::localize::Translations;

/// Live state of a single entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,

    /// Current state value, e.g. "on" or "21.5"
    pub state: String,

    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// String attribute lookup; non-string values are ignored.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

/// Shared context handed to the panel and every row it builds.
///
/// Owned by whoever produces state snapshots. Readers hold it behind an `Arc`;
/// a newer snapshot is a new `Context`, never an in-place mutation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    states: HashMap<String, EntityState>,
    translations: Translations,
}

impl Context {
    pub fn new(states: impl IntoIterator<Item = EntityState>, translations: Translations) -> Self {
        Self {
            states: states
                .into_iter()
                .map(|s| (s.entity_id.clone(), s))
                .collect(),
            translations,
        }
    }

    pub fn with_state(mut self, state: EntityState) -> Self {
        self.states.insert(state.entity_id.clone(), state);
        self
    }

    pub fn state(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    pub fn has_state(&self, entity_id: &str) -> bool {
        self.states.contains_key(entity_id)
    }

    pub fn localize(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translations.localize(key, args)
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }
}
