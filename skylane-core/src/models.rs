use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A seat reservation linking one customer to one flight.
///
/// The (customer, flight, booking date) triple identifies a booking; the
/// registry rejects a second booking with the same triple on every
/// creation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub customer_id: u32,
    pub flight_id: u32,
    pub booking_date: NaiveDate,
}

impl Booking {
    pub fn new(customer_id: u32, flight_id: u32, booking_date: NaiveDate) -> Self {
        Self {
            customer_id,
            flight_id,
            booking_date,
        }
    }

    /// True if this booking links the given customer and flight.
    pub fn links(&self, customer_id: u32, flight_id: u32) -> bool {
        self.customer_id == customer_id && self.flight_id == flight_id
    }
}

/// A customer on record, together with the bookings they currently hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub bookings: Vec<Booking>,
}

impl Customer {
    pub fn new(id: u32, name: String, phone: String, email: String) -> Self {
        Self {
            id,
            name,
            phone,
            email,
            bookings: Vec::new(),
        }
    }

    /// Append a booking to this customer's list.
    pub fn add_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Remove the booking matching the given flight and date, if present.
    pub fn remove_booking(&mut self, flight_id: u32, booking_date: NaiveDate) {
        if let Some(pos) = self
            .bookings
            .iter()
            .position(|b| b.flight_id == flight_id && b.booking_date == booking_date)
        {
            self.bookings.remove(pos);
        }
    }

    /// One-line summary used by the list views.
    pub fn details_short(&self) -> String {
        format!(
            "Customer #{} - {} - {} - {}",
            self.id, self.name, self.phone, self.email
        )
    }
}

/// A scheduled flight with seat-capacity accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: u32,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub seats: i32,
    pub price: i32,
    /// Cached seat count; the registry keeps it equal to the derived
    /// capacity-minus-live-bookings value.
    pub remaining_seats: i32,
    /// Soft-delete flag. A deleted flight is hidden from listings but
    /// stays resolvable for historical bookings.
    pub deleted: bool,
    /// Ids of customers currently booked, deduplicated by identity.
    pub passengers: BTreeSet<u32>,
}

impl Flight {
    pub fn new(
        id: u32,
        flight_number: String,
        origin: String,
        destination: String,
        departure_date: NaiveDate,
        seats: i32,
        price: i32,
    ) -> Self {
        Self {
            id,
            flight_number,
            origin,
            destination,
            departure_date,
            seats,
            price,
            remaining_seats: seats,
            deleted: false,
            passengers: BTreeSet::new(),
        }
    }

    /// One-line summary used by the list views.
    pub fn details_short(&self) -> String {
        format!(
            "Flight #{} - {} - {} to {} on {} price {} Number of seats {}",
            self.id,
            self.flight_number,
            self.origin,
            self.destination,
            self.departure_date.format("%d/%m/%Y"),
            self.price,
            self.seats
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flight_creation() {
        let flight = Flight::new(
            1,
            "FL123".to_string(),
            "London".to_string(),
            "New York".to_string(),
            date(2025, 6, 1),
            200,
            500,
        );

        assert_eq!(flight.id, 1);
        assert_eq!(flight.flight_number, "FL123");
        assert_eq!(flight.origin, "London");
        assert_eq!(flight.destination, "New York");
        assert_eq!(flight.seats, 200);
        assert_eq!(flight.price, 500);
        assert_eq!(flight.remaining_seats, 200);
        assert!(!flight.deleted);
        assert!(flight.passengers.is_empty());
    }

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new(
            1,
            "John Doe".to_string(),
            "1234567890".to_string(),
            "john.doe@example.com".to_string(),
        );

        assert_eq!(customer.id, 1);
        assert_eq!(customer.name, "John Doe");
        assert_eq!(customer.phone, "1234567890");
        assert_eq!(customer.email, "john.doe@example.com");
        assert!(customer.bookings.is_empty());
    }

    #[test]
    fn test_booking_links() {
        let booking = Booking::new(3, 7, date(2025, 5, 1));

        assert!(booking.links(3, 7));
        assert!(!booking.links(3, 8));
        assert!(!booking.links(4, 7));
    }

    #[test]
    fn test_remove_booking_matches_date() {
        let mut customer = Customer::new(1, "Ann".into(), "555".into(), "ann@x.com".into());
        customer.add_booking(Booking::new(1, 2, date(2025, 5, 1)));
        customer.add_booking(Booking::new(1, 2, date(2025, 5, 2)));

        customer.remove_booking(2, date(2025, 5, 1));

        assert_eq!(customer.bookings.len(), 1);
        assert_eq!(customer.bookings[0].booking_date, date(2025, 5, 2));
    }
}
