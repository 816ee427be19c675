//! Message lookup for the strings the panel renders.
//!
//! Messages use `{name}` placeholders. A message may carry a singular form
//! which is chosen when the `count` argument is exactly `1`.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

pub const DISABLED_ENTITIES: &str = "ui.panel.config.devices.entities.disabled_entities";
pub const HIDE_DISABLED: &str = "ui.panel.config.devices.entities.hide_disabled";
pub const ADD_ENTITIES_TO_VIEW: &str = "ui.panel.config.devices.entities.add_entities_lovelace";
pub const NO_ENTITIES: &str = "ui.panel.config.devices.entities.none";

/// A single translatable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Form used when `count` is 1
    #[serde(default)]
    pub one: Option<String>,

    /// Form used otherwise
    pub other: String,
}

impl Message {
    pub fn new(other: impl Into<String>) -> Self {
        Self {
            one: None,
            other: other.into(),
        }
    }

    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            one: Some(one.into()),
            other: other.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    messages: HashMap<String, Message>,
}

impl Translations {
    /// The built-in English table.
    pub fn english() -> Self {
        let messages = [
            (
                DISABLED_ENTITIES,
                Message::plural("+{count} disabled entity", "+{count} disabled entities"),
            ),
            (HIDE_DISABLED, Message::new("Hide disabled")),
            (ADD_ENTITIES_TO_VIEW, Message::new("Add to Lovelace")),
            (NO_ENTITIES, Message::new("This device has no entities")),
        ]
        .into_iter()
        .map(|(key, message)| (key.to_string(), message))
        .collect();

        Self { messages }
    }

    /// Replace or add messages, keeping the rest of the table.
    pub fn with_overrides(mut self, overrides: HashMap<String, Message>) -> Self {
        self.messages.extend(overrides);
        self
    }

    /// Render `key` with the given arguments.
    ///
    /// Unknown keys render as the key itself so a missing translation is
    /// visible instead of blank.
    pub fn localize(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(message) = self.messages.get(key) else {
            return key.to_string();
        };

        let singular = args.iter().any(|(name, value)| *name == "count" && *value == "1");
        let template = match (&message.one, singular) {
            (Some(one), true) => one,
            _ => &message.other,
        };

        args.iter().fold(template.clone(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}
