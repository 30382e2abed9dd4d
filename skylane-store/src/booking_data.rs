use crate::{parse_date, parse_i32, parse_u32, split_record, DataManager, StoreError, SEPARATOR};
use skylane_core::{Booking, Registry};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Booking records, one per line, fields in fixed order: customer id,
/// name, phone, email, flight id, flight number, origin, destination,
/// departure date, seat count, price, booking date.
///
/// The customer and flight fields are a denormalized snapshot; reload
/// resolves both sides by id against the already-loaded collections and
/// replays the booking through the direct add path, which skips capacity
/// checks (historical records are taken as-is).
pub struct BookingDataManager {
    path: PathBuf,
}

impl BookingDataManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataManager for BookingDataManager {
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
            let fields = split_record(line, line_no, 12)?;
            let customer_id = parse_u32(fields[0], "customer id", line_no)?;
            let flight_id = parse_u32(fields[4], "flight id", line_no)?;
            // The snapshot fields are validated even though the ids drive
            // reconstruction; a corrupt record fails the whole load.
            parse_date(fields[8], "departure date", line_no)?;
            parse_i32(fields[9], "seat count", line_no)?;
            parse_i32(fields[10], "price", line_no)?;
            let booking_date = parse_date(fields[11], "booking date", line_no)?;

            registry.add_booking(Booking::new(customer_id, flight_id, booking_date))?;
        }
        Ok(())
    }

    fn store(&self, registry: &Registry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&self.path)?;
        for booking in registry.bookings() {
            let customer = registry.customer(booking.customer_id)?;
            let flight = registry.flight(booking.flight_id)?;
            writeln!(
                out,
                "{}",
                [
                    customer.id.to_string(),
                    customer.name.clone(),
                    customer.phone.clone(),
                    customer.email.clone(),
                    flight.id.to_string(),
                    flight.flight_number.clone(),
                    flight.origin.clone(),
                    flight.destination.clone(),
                    flight.departure_date.format("%Y-%m-%d").to_string(),
                    flight.seats.to_string(),
                    flight.price.to_string(),
                    booking.booking_date.format("%Y-%m-%d").to_string(),
                ]
                .join(SEPARATOR)
            )?;
        }
        Ok(())
    }
}
