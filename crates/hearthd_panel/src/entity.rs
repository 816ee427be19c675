//! Helpers for deriving display data from entity IDs and states.

use crate::context::EntityState;

/// Icon used when a domain is missing or not known.
pub const DEFAULT_ICON: &str = "mdi:bookmark";

/// Domain of an entity ID: the segment before the first `.`.
pub fn domain_of(entity_id: &str) -> Option<&str> {
    entity_id
        .split_once('.')
        .map(|(domain, _)| domain)
        .filter(|domain| !domain.is_empty())
}

/// Object ID of an entity ID: everything after the first `.`.
pub fn object_id(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map(|(_, object)| object)
        .unwrap_or(entity_id)
}

/// Default icon for a domain.
pub fn domain_icon(domain: Option<&str>) -> &'static str {
    match domain {
        Some("alarm_control_panel") => "mdi:shield",
        Some("automation") => "mdi:robot",
        Some("binary_sensor") => "mdi:radiobox-blank",
        Some("button") => "mdi:button-pointer",
        Some("camera") => "mdi:video",
        Some("climate") => "mdi:thermostat",
        Some("cover") => "mdi:window-open",
        Some("device_tracker") => "mdi:account",
        Some("fan") => "mdi:fan",
        Some("input_boolean") => "mdi:toggle-switch-outline",
        Some("light") => "mdi:lightbulb",
        Some("lock") => "mdi:lock",
        Some("media_player") => "mdi:cast",
        Some("number") => "mdi:ray-vertex",
        Some("scene") => "mdi:palette",
        Some("select") => "mdi:format-list-bulleted",
        Some("sensor") => "mdi:eye",
        Some("siren") => "mdi:bullhorn",
        Some("switch") => "mdi:flash",
        Some("update") => "mdi:package-up",
        Some("vacuum") => "mdi:robot-vacuum",
        Some("weather") => "mdi:weather-cloudy",
        _ => DEFAULT_ICON,
    }
}

/// Display name of a live entity: its `friendly_name`, falling back to the
/// object ID with underscores turned into spaces. Never blank unless the
/// entity ID itself is.
pub fn compute_state_name(state: &EntityState) -> String {
    if let Some(name) = state.attribute_str("friendly_name").filter(|n| !is_blank(n)) {
        return name.to_string();
    }

    let name = object_id(&state.entity_id).replace('_', " ");
    if is_blank(&name) {
        state.entity_id.clone()
    } else {
        name
    }
}

pub(crate) fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Strip a leading `"<device_name> "` from `name`, ignoring case.
///
/// Returns the name unchanged when it does not start with the device name or
/// when nothing but whitespace would be left.
pub fn strip_device_name(name: &str, device_name: &str) -> String {
    if device_name.is_empty() {
        return name.to_string();
    }

    let prefix = format!("{} ", device_name);
    match strip_prefix_ignore_case(name, &prefix) {
        Some(rest) if !is_blank(rest) => rest.to_string(),
        _ => name.to_string(),
    }
}

/// Case-insensitive `str::strip_prefix`, comparing lowercase forms char by
/// char so the returned slice stays on a char boundary of `name`.
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let mut expected = prefix.chars().flat_map(char::to_lowercase).peekable();

    for (idx, c) in name.char_indices() {
        if expected.peek().is_none() {
            return Some(&name[idx..]);
        }
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
    }

    if expected.peek().is_none() {
        Some("")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("light.kitchen"), Some("light"));
        assert_eq!(domain_of("sensor.kitchen.temp"), Some("sensor"));
        assert_eq!(domain_of("kitchen"), None);
        assert_eq!(domain_of(".kitchen"), None);
    }

    #[test]
    fn test_unknown_domain_icon() {
        assert_eq!(domain_icon(Some("light")), "mdi:lightbulb");
        assert_eq!(domain_icon(Some("made_up")), DEFAULT_ICON);
        assert_eq!(domain_icon(None), DEFAULT_ICON);
    }

    #[test]
    fn test_compute_state_name() {
        let named = EntityState::new("light.kitchen", "on")
            .with_attribute("friendly_name", "Kitchen Light");
        assert_eq!(compute_state_name(&named), "Kitchen Light");

        let unnamed = EntityState::new("sensor.kitchen_temp", "21");
        assert_eq!(compute_state_name(&unnamed), "kitchen temp");
    }

    #[test]
    fn test_compute_state_name_blank_friendly_name() {
        let blank = EntityState::new("light.kitchen", "on").with_attribute("friendly_name", "");
        assert_eq!(compute_state_name(&blank), "kitchen");

        let spaces = EntityState::new("light.kitchen", "on").with_attribute("friendly_name", "  ");
        assert_eq!(compute_state_name(&spaces), "kitchen");

        let no_object = EntityState::new("light._", "on").with_attribute("friendly_name", "");
        assert_eq!(compute_state_name(&no_object), "light._");
    }

    #[test]
    fn test_strip_device_name_prefix() {
        assert_eq!(
            strip_device_name("Kitchen Light Brightness", "Kitchen Light"),
            "Brightness"
        );
    }

    #[test]
    fn test_strip_device_name_no_prefix() {
        assert_eq!(strip_device_name("Brightness", "Kitchen Light"), "Brightness");
    }

    #[test]
    fn test_strip_device_name_would_be_empty() {
        assert_eq!(strip_device_name("Kitchen Light", "Kitchen Light"), "Kitchen Light");
        assert_eq!(strip_device_name("Kitchen Light ", "Kitchen Light"), "Kitchen Light ");
    }

    #[test]
    fn test_strip_device_name_ignores_case() {
        assert_eq!(strip_device_name("kitchen light Power", "Kitchen Light"), "Power");
        assert_eq!(strip_device_name("KÜCHE Licht", "Küche"), "Licht");
    }

    #[test]
    fn test_strip_device_name_requires_word_boundary() {
        assert_eq!(strip_device_name("Kitchenette Lamp", "Kitchen"), "Kitchenette Lamp");
    }

    #[test]
    fn test_strip_empty_device_name() {
        assert_eq!(strip_device_name(" Lamp", ""), " Lamp");
    }
}
