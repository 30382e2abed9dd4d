pub mod app_config;
pub mod booking_data;
pub mod customer_data;
pub mod flight_data;

pub use app_config::Config;
pub use booking_data::BookingDataManager;
pub use customer_data::CustomerDataManager;
pub use flight_data::FlightDataManager;

use chrono::NaiveDate;
use skylane_core::Registry;

/// Field separator used consistently for writing records and splitting
/// them back on load.
pub const SEPARATOR: &str = "::";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse {field} '{value}' on line {line}")]
    MalformedField {
        field: &'static str,
        line: usize,
        value: String,
    },

    #[error("Record on line {line} has {found} fields, expected {expected}")]
    ShortRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Registry(#[from] skylane_core::RegistryError),
}

/// One persisted collection. Loading replays records into the registry;
/// storing writes the registry's current view back out.
pub trait DataManager {
    fn load(&self, registry: &mut Registry) -> Result<(), StoreError>;
    fn store(&self, registry: &Registry) -> Result<(), StoreError>;
}

/// Facade over the per-collection managers. Load order matters: booking
/// records resolve customer and flight ids, so those files load first.
pub struct FlatFileStore {
    managers: Vec<Box<dyn DataManager>>,
}

impl FlatFileStore {
    pub fn new(config: &Config) -> Self {
        Self {
            managers: vec![
                Box::new(CustomerDataManager::new(&config.data.customers_path)),
                Box::new(FlightDataManager::new(&config.data.flights_path)),
                Box::new(BookingDataManager::new(&config.data.bookings_path)),
            ],
        }
    }

    /// Rebuild the registry from the record files. Any malformed record
    /// aborts the whole load.
    pub fn load(&self, registry: &mut Registry) -> Result<(), StoreError> {
        for manager in &self.managers {
            manager.load(registry)?;
        }
        tracing::info!(
            "Loaded {} customers, {} flights, {} bookings",
            registry.customers().len(),
            registry.flights().len(),
            registry.bookings().len()
        );
        Ok(())
    }

    /// Write the registry's current state back to the record files.
    pub fn store(&self, registry: &Registry) -> Result<(), StoreError> {
        for manager in &self.managers {
            manager.store(registry)?;
        }
        Ok(())
    }
}

pub(crate) fn split_record(
    line: &str,
    line_no: usize,
    expected: usize,
) -> Result<Vec<&str>, StoreError> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() < expected {
        return Err(StoreError::ShortRecord {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

pub(crate) fn parse_u32(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<u32, StoreError> {
    value.parse().map_err(|_| StoreError::MalformedField {
        field,
        line,
        value: value.to_string(),
    })
}

pub(crate) fn parse_i32(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<i32, StoreError> {
    value.parse().map_err(|_| StoreError::MalformedField {
        field,
        line,
        value: value.to_string(),
    })
}

pub(crate) fn parse_bool(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<bool, StoreError> {
    value.parse().map_err(|_| StoreError::MalformedField {
        field,
        line,
        value: value.to_string(),
    })
}

pub(crate) fn parse_date(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| StoreError::MalformedField {
        field,
        line,
        value: value.to_string(),
    })
}
