use super::view::DisabledSection;
use super::view::StaticEntry;
use crate::context::Context;
use crate::localize::DISABLED_ENTITIES;
use crate::localize::HIDE_DISABLED;

/// Show/hide state for the disabled entities of a panel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisabledCollapser {
    expanded: bool,
}

impl DisabledCollapser {
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Render the section for this pass's disabled entries. `None` when there
    /// are no disabled entries.
    pub fn render(&self, disabled: &[StaticEntry], context: &Context) -> Option<DisabledSection> {
        if disabled.is_empty() {
            return None;
        }

        let section = if self.expanded {
            DisabledSection {
                expanded: true,
                entries: disabled.to_vec(),
                toggle: context.localize(HIDE_DISABLED, &[]),
            }
        } else {
            let count = disabled.len().to_string();
            DisabledSection {
                expanded: false,
                entries: Vec::new(),
                toggle: context.localize(DISABLED_ENTITIES, &[("count", count.as_str())]),
            }
        };
        Some(section)
    }
}
