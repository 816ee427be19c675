use linkme::distributed_slice;

use super::row::MoreInfo;
use super::row::RowConfig;
use super::row::RowElement;
use super::simple::SimpleEntityRow;
use crate::entity::domain_of;

/// A row type and the entity domains it handles.
pub struct RowType {
    pub name: &'static str,
    pub domains: &'static [&'static str],
    pub create: fn(RowConfig, MoreInfo) -> Box<dyn RowElement>,
}

impl RowType {
    fn handles(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| *d == domain)
    }
}

#[distributed_slice]
pub static ROW_TYPES: [RowType];

/// Creates the row element for an entity.
pub trait RowFactory: Send + Sync {
    fn create_row(&self, config: RowConfig, more_info: MoreInfo) -> Box<dyn RowElement>;
}

/// Picks the registered row type for the entity's domain, falling back to a
/// simple entity row.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRowFactory;

impl DefaultRowFactory {
    pub fn row_type(domain: Option<&str>) -> Option<&'static RowType> {
        let domain = domain?;
        ROW_TYPES.iter().find(|t| t.handles(domain))
    }
}

impl RowFactory for DefaultRowFactory {
    fn create_row(&self, config: RowConfig, more_info: MoreInfo) -> Box<dyn RowElement> {
        match Self::row_type(domain_of(&config.entity)) {
            Some(row_type) => (row_type.create)(config, more_info),
            None => SimpleEntityRow::create(config, more_info),
        }
    }
}
