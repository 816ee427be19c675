use std::sync::Arc;

use linkme::distributed_slice;

use super::factory::RowType;
use super::factory::ROW_TYPES;
use super::row::MoreInfo;
use super::row::RowBase;
use super::row::RowConfig;
use super::row::RowElement;
use super::row::RowId;
use super::row::RowKind;
use super::row::RowView;
use crate::context::Context;

#[distributed_slice(ROW_TYPES)]
static SENSOR_ROW: RowType = RowType {
    name: "sensor",
    domains: &["binary_sensor", "sensor"],
    create: SensorRow::create,
};

/// Read-only row showing a sensor value with its unit.
#[derive(Debug)]
pub struct SensorRow {
    base: RowBase,
}

impl SensorRow {
    pub fn create(config: RowConfig, more_info: MoreInfo) -> Box<dyn RowElement> {
        Box::new(Self {
            base: RowBase::new(config, more_info),
        })
    }

    fn value(&self) -> Option<String> {
        let state = self.base.state()?;
        Some(match state.attribute_str("unit_of_measurement") {
            Some(unit) => format!("{} {}", state.state, unit),
            None => state.state.clone(),
        })
    }
}

impl RowElement for SensorRow {
    fn id(&self) -> RowId {
        self.base.id()
    }

    fn config(&self) -> &RowConfig {
        self.base.config()
    }

    fn set_context(&mut self, context: Arc<Context>) {
        self.base.set_context(context);
    }

    fn render(&self) -> RowView {
        self.base.view(RowKind::Sensor, self.value())
    }

    fn more_info(&self) {
        self.base.more_info();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::context::EntityState;

    #[test]
    fn test_render_value_with_unit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut row = SensorRow::create(
            RowConfig::new("sensor.kitchen_temp"),
            MoreInfo::new(RowId::new(1), tx),
        );
        row.set_context(Arc::new(Context::default().with_state(
            EntityState::new("sensor.kitchen_temp", "21.5")
                .with_attribute("unit_of_measurement", "°C"),
        )));

        let view = row.render();
        assert_eq!(view.kind, RowKind::Sensor);
        assert_eq!(view.name, "kitchen temp");
        assert_eq!(view.state.as_deref(), Some("21.5 °C"));
    }

    #[test]
    fn test_render_without_context_has_no_value() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let row = SensorRow::create(
            RowConfig::new("sensor.kitchen_temp"),
            MoreInfo::new(RowId::new(1), tx),
        );

        assert_eq!(row.render().state, None);
    }
}
