use std::fmt;

use serde::Serialize;

use crate::entity::domain_icon;
use crate::entity::is_blank;
use crate::entity::strip_device_name;
use crate::registry::EntityRegistryEntry;
use crate::rows::RowId;
use crate::rows::RowView;

/// Rendered output of a device-entities panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub header: String,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelBody {
    /// The device has no entities at all
    Empty { message: String },
    Entities {
        items: Vec<ListItem>,
        #[serde(skip_serializing_if = "Option::is_none")]
        disabled: Option<DisabledSection>,
        /// Label of the add-to-view action
        add_to_view: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListItem {
    Row {
        row_id: RowId,
        #[serde(flatten)]
        view: RowView,
    },
    Entry(StaticEntry),
}

/// Read-only rendering of a registry entry without live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticEntry {
    pub entity_id: String,
    pub icon: String,
    pub name: String,
    pub disabled: bool,
}

impl StaticEntry {
    pub fn new(entry: &EntityRegistryEntry, device_name: &str) -> Self {
        let name = match entry.state_name.as_deref().filter(|n| !is_blank(n)) {
            Some(name) => strip_device_name(name, device_name),
            None => entry.entity_id.clone(),
        };

        Self {
            entity_id: entry.entity_id.clone(),
            icon: domain_icon(entry.domain()).to_string(),
            name,
            disabled: entry.is_disabled(),
        }
    }
}

/// The disabled entities and the toggle that reveals or hides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledSection {
    pub expanded: bool,
    /// Empty while collapsed
    pub entries: Vec<StaticEntry>,
    pub toggle: String,
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# {}", self.header)?;
        match &self.body {
            PanelBody::Empty { message } => write!(f, "\n  {}", message),
            PanelBody::Entities {
                items,
                disabled,
                add_to_view,
            } => {
                for item in items {
                    write!(f, "\n  {}", item)?;
                }
                if let Some(section) = disabled {
                    for entry in &section.entries {
                        write!(f, "\n  {}", entry)?;
                    }
                    write!(f, "\n  > {}", section.toggle)?;
                }
                write!(f, "\n  [{}]", add_to_view)
            }
        }
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListItem::Row { view, .. } => {
                let name = label(&view.name, &view.entity_id);
                match &view.state {
                    Some(state) => write!(f, "{} {}: {}", view.icon, name, state),
                    None => write!(f, "{} {}", view.icon, name),
                }
            }
            ListItem::Entry(entry) => write!(f, "{}", entry),
        }
    }
}

impl fmt::Display for StaticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, label(&self.name, &self.entity_id))?;
        if self.disabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

fn label<'a>(name: &'a str, entity_id: &'a str) -> &'a str {
    if is_blank(name) {
        entity_id
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DisabledBy;

    #[test]
    fn test_static_entry_strips_device_name() {
        let entry = EntityRegistryEntry::new("sensor.kitchen_temp")
            .with_state_name("Kitchen Temperature")
            .disabled_by(DisabledBy::User);
        let static_entry = StaticEntry::new(&entry, "Kitchen");

        assert_eq!(static_entry.name, "Temperature");
        assert_eq!(static_entry.icon, "mdi:eye");
        assert!(static_entry.disabled);
    }

    #[test]
    fn test_static_entry_without_name_uses_entity_id() {
        let entry = EntityRegistryEntry::new("kitchen_thing");
        let static_entry = StaticEntry::new(&entry, "Kitchen");

        assert_eq!(static_entry.name, "kitchen_thing");
        assert_eq!(static_entry.icon, "mdi:bookmark");
        assert!(!static_entry.disabled);
    }

    #[test]
    fn test_static_entry_blank_name_uses_entity_id() {
        let entry = EntityRegistryEntry::new("sensor.kitchen_temp").with_state_name("");
        assert_eq!(StaticEntry::new(&entry, "Kitchen").name, "sensor.kitchen_temp");

        let entry = EntityRegistryEntry::new("sensor.kitchen_temp").with_state_name("   ");
        assert_eq!(StaticEntry::new(&entry, "Kitchen").name, "sensor.kitchen_temp");
    }

    #[test]
    fn test_display_blank_row_name_uses_entity_id() {
        let item = ListItem::Row {
            row_id: RowId::new(0),
            view: RowView {
                kind: crate::rows::RowKind::Toggle,
                entity_id: "light.kitchen".to_string(),
                name: String::new(),
                icon: "mdi:lightbulb".to_string(),
                state: Some("On".to_string()),
            },
        };
        assert_eq!(item.to_string(), "mdi:lightbulb light.kitchen: On");

        let entry = StaticEntry {
            entity_id: "sensor.kitchen_temp".to_string(),
            icon: "mdi:eye".to_string(),
            name: " ".to_string(),
            disabled: true,
        };
        assert_eq!(entry.to_string(), "mdi:eye sensor.kitchen_temp (disabled)");
    }

    #[test]
    fn test_serialize_row_item() {
        let item = ListItem::Row {
            row_id: RowId::new(3),
            view: RowView {
                kind: crate::rows::RowKind::Toggle,
                entity_id: "light.kitchen".to_string(),
                name: "Light".to_string(),
                icon: "mdi:lightbulb".to_string(),
                state: Some("On".to_string()),
            },
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "type": "row",
                "row_id": 3,
                "kind": "toggle",
                "entity_id": "light.kitchen",
                "name": "Light",
                "icon": "mdi:lightbulb",
                "state": "On",
            })
        );
    }
}
