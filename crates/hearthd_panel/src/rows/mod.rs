//! Live rows shown for entities that currently report state.
//!
//! Row types register themselves in [`ROW_TYPES`] keyed by entity domain;
//! [`DefaultRowFactory`] picks one per entity.

mod factory;
mod row;
mod sensor;
mod simple;
mod toggle;

pub use factory::DefaultRowFactory;
pub use factory::RowFactory;
pub use factory::RowType;
pub use factory::ROW_TYPES;
pub use row::MoreInfo;
pub use row::MoreInfoReceiver;
pub use row::MoreInfoSender;
pub use row::RowBase;
pub use row::RowConfig;
pub use row::RowElement;
pub use row::RowId;
pub use row::RowKind;
pub use row::RowView;
pub use sensor::SensorRow;
pub use simple::SimpleEntityRow;
pub use toggle::ToggleRow;
