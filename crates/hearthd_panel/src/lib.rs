pub mod api;
pub mod config;
pub mod context;
pub mod delegates;
pub mod entity;
pub mod localize;
pub mod panel;
pub mod registry;
pub mod rows;
pub mod snapshot;

pub use config::LogLevel;
pub use config::PanelConfig;
pub use context::Context;
pub use context::EntityState;
pub use delegates::Delegates;
pub use delegates::EditorRequest;
pub use delegates::EntityEditor;
pub use delegates::ViewAdder;
pub use localize::Translations;
pub use panel::DeviceEntitiesPanel;
pub use panel::PanelInput;
pub use panel::PanelInputs;
pub use panel::PanelView;
pub use registry::DisabledBy;
pub use registry::EntityRegistryEntry;
pub use snapshot::DeviceSnapshot;
