use serde::Deserialize;
use serde::Serialize;

use crate::entity::domain_of;

/// Reason an entity was administratively disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DisabledBy {
    Integration,
    User,
    ConfigEntry,
    Device,
}

/// An entity registry entry bound to a device.
///
/// Entries are supplied by the owner of the panel in display order and are
/// never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistryEntry {
    /// Full entity ID (domain.object_id)
    pub entity_id: String,

    /// Set when the entity is disabled; disabled entities have no live state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_by: Option<DisabledBy>,

    /// Display name computed upstream, used when there is no live state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
}

impl EntityRegistryEntry {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            disabled_by: None,
            state_name: None,
        }
    }

    pub fn disabled_by(mut self, by: DisabledBy) -> Self {
        self.disabled_by = Some(by);
        self
    }

    pub fn with_state_name(mut self, name: impl Into<String>) -> Self {
        self.state_name = Some(name.into());
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_by.is_some()
    }

    pub fn domain(&self) -> Option<&str> {
        domain_of(&self.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disabled_entry() {
        let entry: EntityRegistryEntry = serde_json::from_str(
            r#"{"entity_id": "sensor.kitchen_temp", "disabled_by": "config_entry"}"#,
        )
        .unwrap();

        assert_eq!(entry.disabled_by, Some(DisabledBy::ConfigEntry));
        assert!(entry.is_disabled());
        assert_eq!(entry.domain(), Some("sensor"));
        assert_eq!(entry.state_name, None);
    }

    #[test]
    fn test_null_disabled_by_is_enabled() {
        let entry: EntityRegistryEntry =
            serde_json::from_str(r#"{"entity_id": "light.kitchen", "disabled_by": null}"#)
                .unwrap();

        assert!(!entry.is_disabled());
    }

    #[test]
    fn test_disabled_by_display() {
        assert_eq!(DisabledBy::ConfigEntry.to_string(), "config_entry");
        assert_eq!(DisabledBy::User.to_string(), "user");
    }
}
