//! The device-entities panel.

mod collapser;
#[allow(clippy::module_inception)]
mod panel;
mod view;


pub use collapser::DisabledCollapser;
pub use panel::DeviceEntitiesPanel;
pub use panel::PanelInput;
pub use panel::PanelInputs;
pub use view::DisabledSection;
pub use view::ListItem;
pub use view::PanelBody;
pub use view::PanelView;
pub use view::StaticEntry;
