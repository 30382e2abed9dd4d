use crate::{parse_bool, parse_date, parse_i32, parse_u32, split_record, DataManager, StoreError, SEPARATOR};
use skylane_core::{Flight, Registry};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Flight records, one per line: id, flight number, origin, destination,
/// departure date, seats, price, deleted flag. Soft-deleted flights are
/// written too so historical bookings survive a restart.
pub struct FlightDataManager {
    path: PathBuf,
}

impl FlightDataManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataManager for FlightDataManager {
    fn load(&self, registry: &mut Registry) -> Result<(), StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        for (idx, line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            if line.is_empty() {
                continue;
            }
            let fields = split_record(line, line_no, 8)?;
            let id = parse_u32(fields[0], "flight id", line_no)?;
            let departure_date = parse_date(fields[4], "departure date", line_no)?;
            let seats = parse_i32(fields[5], "seat count", line_no)?;
            let price = parse_i32(fields[6], "price", line_no)?;
            let deleted = parse_bool(fields[7], "deleted flag", line_no)?;

            let mut flight = Flight::new(
                id,
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
                departure_date,
                seats,
                price,
            );
            flight.deleted = deleted;
            registry.add_flight(flight)?;
        }
        Ok(())
    }

    fn store(&self, registry: &Registry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&self.path)?;
        for flight in registry.all_flights() {
            writeln!(
                out,
                "{}",
                [
                    flight.id.to_string(),
                    flight.flight_number.clone(),
                    flight.origin.clone(),
                    flight.destination.clone(),
                    flight.departure_date.format("%Y-%m-%d").to_string(),
                    flight.seats.to_string(),
                    flight.price.to_string(),
                    flight.deleted.to_string(),
                ]
                .join(SEPARATOR)
            )?;
        }
        Ok(())
    }
}
