use crate::models::{Booking, Customer, Flight};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Owns the customer, flight, and booking collections and enforces their
/// invariants. Every mutation either completes or fails before any state
/// is touched.
pub struct Registry {
    customers: BTreeMap<u32, Customer>,
    flights: BTreeMap<u32, Flight>,
    bookings: Vec<Booking>,
    // Monotonic id counters, never derived from the ids currently present.
    next_customer_id: u32,
    next_flight_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            customers: BTreeMap::new(),
            flights: BTreeMap::new(),
            bookings: Vec::new(),
            next_customer_id: 1,
            next_flight_id: 1,
        }
    }

    /// Add a flight that already carries an id (persistence reload path).
    ///
    /// The id counter is fast-forwarded past the supplied id so later
    /// assignments stay unique.
    pub fn add_flight(&mut self, flight: Flight) -> Result<(), RegistryError> {
        if self.flights.contains_key(&flight.id) {
            return Err(RegistryError::DuplicateId(flight.id));
        }
        let conflict = self.flights.values().any(|existing| {
            !existing.deleted
                && existing.flight_number == flight.flight_number
                && existing.departure_date == flight.departure_date
        });
        if conflict {
            return Err(RegistryError::ConflictingSchedule {
                flight_number: flight.flight_number.clone(),
                departure_date: flight.departure_date,
            });
        }

        self.next_flight_id = self.next_flight_id.max(flight.id + 1);
        self.flights.insert(flight.id, flight);
        Ok(())
    }

    /// Create a flight with a registry-assigned id and return the id.
    pub fn create_flight(
        &mut self,
        flight_number: String,
        origin: String,
        destination: String,
        departure_date: NaiveDate,
        seats: i32,
        price: i32,
    ) -> Result<u32, RegistryError> {
        let id = self.next_flight_id;
        let flight = Flight::new(
            id,
            flight_number,
            origin,
            destination,
            departure_date,
            seats,
            price,
        );
        self.add_flight(flight)?;
        info!("Flight {} added", id);
        Ok(id)
    }

    /// Add a customer that already carries an id (persistence reload path).
    pub fn add_customer(&mut self, customer: Customer) -> Result<(), RegistryError> {
        if self.customers.contains_key(&customer.id) {
            return Err(RegistryError::DuplicateId(customer.id));
        }
        let conflict = self
            .customers
            .values()
            .any(|existing| existing.name == customer.name && existing.phone == customer.phone);
        if conflict {
            return Err(RegistryError::ConflictingIdentity {
                name: customer.name.clone(),
                phone: customer.phone.clone(),
            });
        }

        self.next_customer_id = self.next_customer_id.max(customer.id + 1);
        self.customers.insert(customer.id, customer);
        Ok(())
    }

    /// Create a customer with a registry-assigned id and return the id.
    pub fn create_customer(
        &mut self,
        name: String,
        phone: String,
        email: String,
    ) -> Result<u32, RegistryError> {
        let id = self.next_customer_id;
        let customer = Customer::new(id, name, phone, email);
        self.add_customer(customer)?;
        info!("Customer {} added", id);
        Ok(id)
    }

    /// Record a booking without checking capacity.
    ///
    /// Callers must have verified capacity already; the persistence loader
    /// uses this path to replay historical records as-is. The four-way
    /// update (global list, customer list, passenger set, seat counter)
    /// happens as a unit once all checks have passed.
    pub fn add_booking(&mut self, booking: Booking) -> Result<(), RegistryError> {
        if !self.customers.contains_key(&booking.customer_id) {
            return Err(RegistryError::UnknownCustomer(booking.customer_id));
        }
        if !self.flights.contains_key(&booking.flight_id) {
            return Err(RegistryError::UnknownFlight(booking.flight_id));
        }
        if self.bookings.contains(&booking) {
            return Err(RegistryError::DuplicateBooking {
                customer_id: booking.customer_id,
                flight_id: booking.flight_id,
                booking_date: booking.booking_date,
            });
        }

        if let Some(customer) = self.customers.get_mut(&booking.customer_id) {
            customer.add_booking(booking.clone());
        }
        if let Some(flight) = self.flights.get_mut(&booking.flight_id) {
            flight.passengers.insert(booking.customer_id);
            flight.remaining_seats -= 1;
        }
        self.bookings.push(booking);
        Ok(())
    }

    /// Book a seat for a customer, checking capacity first.
    ///
    /// Remaining seats are derived from the live booking count, not the
    /// cached counter.
    pub fn add_booking_by_ids(
        &mut self,
        customer_id: u32,
        flight_id: u32,
        booking_date: NaiveDate,
    ) -> Result<(), RegistryError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(RegistryError::UnknownCustomer(customer_id));
        }
        if self.remaining_seats(flight_id)? <= 0 {
            return Err(RegistryError::FlightFull(flight_id));
        }

        self.add_booking(Booking::new(customer_id, flight_id, booking_date))?;
        info!(
            "Customer {} booked flight {} on {}",
            customer_id, flight_id, booking_date
        );
        Ok(())
    }

    /// Cancel the first booking matching the customer and flight.
    pub fn cancel_booking(&mut self, customer_id: u32, flight_id: u32) -> Result<(), RegistryError> {
        let pos = self
            .bookings
            .iter()
            .position(|b| b.links(customer_id, flight_id))
            .ok_or(RegistryError::BookingNotFound {
                customer_id,
                flight_id,
            })?;
        let booking = self.bookings.remove(pos);

        if let Some(customer) = self.customers.get_mut(&customer_id) {
            customer.remove_booking(flight_id, booking.booking_date);
        }
        // The passenger set is deduplicated by identity: only drop the
        // customer once no live booking still implies membership.
        let still_booked = self.bookings.iter().any(|b| b.links(customer_id, flight_id));
        if let Some(flight) = self.flights.get_mut(&flight_id) {
            if !still_booked {
                flight.passengers.remove(&customer_id);
            }
            flight.remaining_seats += 1;
        }
        info!(
            "Booking for customer {} on flight {} cancelled",
            customer_id, flight_id
        );
        Ok(())
    }

    /// Re-point a booking to a new flight and/or date.
    ///
    /// Runs as validate-then-cancel-and-rebook so seat counters and
    /// passenger sets stay correct on both flights. All validation happens
    /// before the first mutation.
    pub fn update_booking(
        &mut self,
        customer_id: u32,
        flight_id: u32,
        new_flight_id: u32,
        new_date: Option<NaiveDate>,
    ) -> Result<(), RegistryError> {
        let pos = self
            .bookings
            .iter()
            .position(|b| b.links(customer_id, flight_id))
            .ok_or(RegistryError::BookingNotFound {
                customer_id,
                flight_id,
            })?;
        let booking_date = new_date.unwrap_or(self.bookings[pos].booking_date);

        if !self.flights.contains_key(&new_flight_id) {
            return Err(RegistryError::UnknownFlight(new_flight_id));
        }
        // Moving within the same flight reuses the seat freed by the
        // cancellation, so only a genuine move needs a capacity check.
        if new_flight_id != flight_id && self.remaining_seats(new_flight_id)? <= 0 {
            return Err(RegistryError::FlightFull(new_flight_id));
        }
        let replacement = Booking::new(customer_id, new_flight_id, booking_date);
        if self
            .bookings
            .iter()
            .enumerate()
            .any(|(i, b)| i != pos && *b == replacement)
        {
            return Err(RegistryError::DuplicateBooking {
                customer_id,
                flight_id: new_flight_id,
                booking_date,
            });
        }

        self.cancel_booking(customer_id, flight_id)?;
        self.add_booking(replacement)?;
        info!(
            "Booking for customer {} moved from flight {} to flight {}",
            customer_id, flight_id, new_flight_id
        );
        Ok(())
    }

    /// Update customer details. Each field is applied only when supplied
    /// non-blank; blank or missing fields keep their current value.
    pub fn update_customer(
        &mut self,
        id: u32,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), RegistryError> {
        let customer = self
            .customers
            .get_mut(&id)
            .ok_or(RegistryError::UnknownCustomer(id))?;

        if let Some(name) = name.filter(|v| !v.trim().is_empty()) {
            customer.name = name.to_string();
        }
        if let Some(phone) = phone.filter(|v| !v.trim().is_empty()) {
            customer.phone = phone.to_string();
        }
        if let Some(email) = email.filter(|v| !v.trim().is_empty()) {
            customer.email = email.to_string();
        }
        Ok(())
    }

    /// Overwrite a flight's capacity and price. Unlike customer update,
    /// both fields are mandatory and validated.
    pub fn update_flight(&mut self, id: u32, seats: i32, price: i32) -> Result<(), RegistryError> {
        if !self.flights.contains_key(&id) {
            return Err(RegistryError::UnknownFlight(id));
        }
        if seats <= 0 {
            return Err(RegistryError::InvalidSeats(seats));
        }
        if price < 0 {
            return Err(RegistryError::InvalidPrice(price));
        }

        let live = self.live_booking_count(id);
        if let Some(flight) = self.flights.get_mut(&id) {
            flight.seats = seats;
            flight.price = price;
            // Re-derive the cache so it tracks the new capacity.
            flight.remaining_seats = seats - live;
        }
        Ok(())
    }

    /// Soft-delete a flight. Existing bookings stay intact and resolvable.
    pub fn delete_flight(&mut self, id: u32) -> Result<(), RegistryError> {
        let flight = self
            .flights
            .get_mut(&id)
            .ok_or(RegistryError::UnknownFlight(id))?;
        flight.deleted = true;
        info!("Flight {} marked deleted", id);
        Ok(())
    }

    /// Remove a customer outright, cancelling their live bookings first so
    /// no booking is left pointing at a missing customer.
    pub fn delete_customer(&mut self, id: u32) -> Result<(), RegistryError> {
        if !self.customers.contains_key(&id) {
            return Err(RegistryError::UnknownCustomer(id));
        }

        while let Some(flight_id) = self
            .bookings
            .iter()
            .find(|b| b.customer_id == id)
            .map(|b| b.flight_id)
        {
            self.cancel_booking(id, flight_id)?;
        }
        self.customers.remove(&id);
        info!("Customer {} removed", id);
        Ok(())
    }

    /// All flights not marked deleted, in id order.
    pub fn flights(&self) -> Vec<&Flight> {
        self.flights.values().filter(|f| !f.deleted).collect()
    }

    /// Every flight on record, soft-deleted ones included, in id order.
    /// The persistence writer uses this so history survives a restart.
    pub fn all_flights(&self) -> Vec<&Flight> {
        self.flights.values().collect()
    }

    /// All customers, in id order.
    pub fn customers(&self) -> Vec<&Customer> {
        self.customers.values().collect()
    }

    /// The global booking list, in insertion order.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Look up a flight by id. Soft-deleted flights still resolve.
    pub fn flight(&self, id: u32) -> Result<&Flight, RegistryError> {
        self.flights.get(&id).ok_or(RegistryError::UnknownFlight(id))
    }

    /// Look up a customer by id.
    pub fn customer(&self, id: u32) -> Result<&Customer, RegistryError> {
        self.customers
            .get(&id)
            .ok_or(RegistryError::UnknownCustomer(id))
    }

    /// Bookings held by the given customer, in insertion order.
    pub fn bookings_by_customer(&self, customer_id: u32) -> Result<Vec<&Booking>, RegistryError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(RegistryError::UnknownCustomer(customer_id));
        }
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .collect())
    }

    /// Seats still available on a flight: capacity minus the live booking
    /// count. This derivation is authoritative; the cached counter on the
    /// flight record must always agree with it.
    pub fn remaining_seats(&self, flight_id: u32) -> Result<i32, RegistryError> {
        let flight = self
            .flights
            .get(&flight_id)
            .ok_or(RegistryError::UnknownFlight(flight_id))?;
        Ok(flight.seats - self.live_booking_count(flight_id))
    }

    /// Customers booked on the given flight. An unknown id yields an empty
    /// list rather than an error.
    pub fn passengers_by_flight(&self, flight_id: u32) -> Vec<&Customer> {
        self.bookings
            .iter()
            .filter(|b| b.flight_id == flight_id)
            .filter_map(|b| self.customers.get(&b.customer_id))
            .collect()
    }

    /// Customer identity, attributes, and booked flights as a printable
    /// block.
    pub fn customer_details_long(&self, id: u32) -> Result<String, RegistryError> {
        let customer = self.customer(id)?;
        let mut details = format!(
            "Customer #{} - {} - {} - {}\n",
            id, customer.name, customer.phone, customer.email
        );
        for booking in self.bookings.iter().filter(|b| b.customer_id == id) {
            let flight = self.flight(booking.flight_id)?;
            details.push_str(&format!(
                " Flight #{} Origin {} Destination {} Date {} Price {}\n",
                flight.flight_number,
                flight.origin,
                flight.destination,
                flight.departure_date.format("%d/%m/%Y"),
                flight.price
            ));
        }
        Ok(details)
    }

    /// Flight identity, schedule, and passenger roster as a printable
    /// block. Works for soft-deleted flights too.
    pub fn flight_details_long(&self, id: u32) -> Result<String, RegistryError> {
        let flight = self.flight(id)?;
        let mut details = format!(
            "Flight #{} - {} - {} to {} on {}\n",
            id,
            flight.flight_number,
            flight.origin,
            flight.destination,
            flight.departure_date.format("%d/%m/%Y")
        );
        for customer in self.passengers_by_flight(id) {
            details.push_str(&format!(
                " Passenger Name: {} Phone Number: {} Email: {}\n",
                customer.name, customer.phone, customer.email
            ));
        }
        Ok(details)
    }

    fn live_booking_count(&self, flight_id: u32) -> i32 {
        self.bookings
            .iter()
            .filter(|b| b.flight_id == flight_id)
            .count() as i32
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No customer with ID {0}")]
    UnknownCustomer(u32),

    #[error("No flight with ID {0}")]
    UnknownFlight(u32),

    #[error("No booking found for customer ID {customer_id} and flight ID {flight_id}")]
    BookingNotFound { customer_id: u32, flight_id: u32 },

    #[error("Duplicate ID {0}")]
    DuplicateId(u32),

    #[error("A flight with number {flight_number} already departs on {departure_date}")]
    ConflictingSchedule {
        flight_number: String,
        departure_date: NaiveDate,
    },

    #[error("A customer named {name} with phone {phone} is already on record")]
    ConflictingIdentity { name: String, phone: String },

    #[error("Customer {customer_id} already booked flight {flight_id} on {booking_date}")]
    DuplicateBooking {
        customer_id: u32,
        flight_id: u32,
        booking_date: NaiveDate,
    },

    #[error("Seats for flight {0} are fully booked")]
    FlightFull(u32),

    #[error("Number of seats must be positive, got {0}")]
    InvalidSeats(i32),

    #[error("Price must not be negative, got {0}")]
    InvalidPrice(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One flight (BA100, 1 seat) and one customer (Ann), both id 1.
    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .create_flight(
                "BA100".into(),
                "LHR".into(),
                "JFK".into(),
                date(2025, 6, 1),
                1,
                500,
            )
            .unwrap();
        registry
            .create_customer("Ann".into(), "555".into(), "ann@x.com".into())
            .unwrap();
        registry
    }

    fn assert_cache_matches_derived(registry: &Registry, flight_id: u32) {
        let derived = registry.remaining_seats(flight_id).unwrap();
        assert_eq!(registry.flight(flight_id).unwrap().remaining_seats, derived);
    }

    #[test]
    fn test_booking_decrements_remaining_seats() {
        let mut registry = Registry::new();
        let flight_id = registry
            .create_flight(
                "BA200".into(),
                "LHR".into(),
                "CDG".into(),
                date(2025, 6, 1),
                10,
                120,
            )
            .unwrap();
        let customer_id = registry
            .create_customer("Ann".into(), "555".into(), "ann@x.com".into())
            .unwrap();

        let before = registry.remaining_seats(flight_id).unwrap();
        registry
            .add_booking_by_ids(customer_id, flight_id, date(2025, 5, 1))
            .unwrap();

        assert_eq!(registry.remaining_seats(flight_id).unwrap(), before - 1);
        let passengers = registry.passengers_by_flight(flight_id);
        assert_eq!(passengers.len(), 1);
        assert_eq!(passengers[0].id, customer_id);
        assert_cache_matches_derived(&registry, flight_id);
    }

    #[test]
    fn test_cancel_round_trips_to_pre_booking_state() {
        let mut registry = sample_registry();

        let remaining_before = registry.remaining_seats(1).unwrap();
        let global_before = registry.bookings().len();

        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();
        registry.cancel_booking(1, 1).unwrap();

        assert_eq!(registry.remaining_seats(1).unwrap(), remaining_before);
        assert_eq!(registry.bookings().len(), global_before);
        assert!(registry.flight(1).unwrap().passengers.is_empty());
        assert!(registry.customer(1).unwrap().bookings.is_empty());
        assert_cache_matches_derived(&registry, 1);
    }

    #[test]
    fn test_full_flight_rejects_booking() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();
        let bea = registry
            .create_customer("Bea".into(), "556".into(), "bea@x.com".into())
            .unwrap();

        let err = registry
            .add_booking_by_ids(bea, 1, date(2025, 5, 2))
            .unwrap_err();

        assert!(matches!(err, RegistryError::FlightFull(1)));
        assert_eq!(registry.bookings().len(), 1);
    }

    #[test]
    fn test_last_seat_drives_remaining_to_zero() {
        let mut registry = sample_registry();
        assert_eq!(registry.remaining_seats(1).unwrap(), 1);

        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        assert_eq!(registry.remaining_seats(1).unwrap(), 0);
        assert_cache_matches_derived(&registry, 1);
    }

    #[test]
    fn test_example_scenario() {
        let mut registry = Registry::new();
        let flight_id = registry
            .create_flight(
                "BA100".into(),
                "LHR".into(),
                "JFK".into(),
                date(2025, 6, 1),
                1,
                500,
            )
            .unwrap();
        let ann = registry
            .create_customer("Ann".into(), "555".into(), "ann@x.com".into())
            .unwrap();
        assert_eq!(flight_id, 1);
        assert_eq!(ann, 1);

        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();
        assert_eq!(registry.remaining_seats(1).unwrap(), 0);

        let bea = registry
            .create_customer("Bea".into(), "556".into(), "bea@x.com".into())
            .unwrap();
        let err = registry
            .add_booking_by_ids(bea, 1, date(2025, 5, 2))
            .unwrap_err();
        assert!(matches!(err, RegistryError::FlightFull(1)));

        registry.cancel_booking(1, 1).unwrap();
        assert_eq!(registry.remaining_seats(1).unwrap(), 1);
    }

    #[test]
    fn test_conflicting_schedule_rejected() {
        let mut registry = sample_registry();

        let err = registry
            .create_flight(
                "BA100".into(),
                "MAN".into(),
                "JFK".into(),
                date(2025, 6, 1),
                50,
                300,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConflictingSchedule { .. }));

        // Same number on a different date is a different flight.
        registry
            .create_flight(
                "BA100".into(),
                "LHR".into(),
                "JFK".into(),
                date(2025, 6, 2),
                50,
                300,
            )
            .unwrap();
    }

    #[test]
    fn test_conflicting_identity_rejected() {
        let mut registry = sample_registry();

        let err = registry
            .create_customer("Ann".into(), "555".into(), "other@x.com".into())
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConflictingIdentity { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = sample_registry();

        let err = registry
            .add_flight(Flight::new(
                1,
                "ZZ999".into(),
                "AMS".into(),
                "OSL".into(),
                date(2025, 7, 1),
                10,
                100,
            ))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(1)));

        let err = registry
            .add_customer(Customer::new(1, "Cal".into(), "557".into(), "cal@x.com".into()))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(1)));
    }

    #[test]
    fn test_duplicate_booking_triple_rejected() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        let err = registry
            .add_booking(Booking::new(1, 1, date(2025, 5, 1)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateBooking { .. }));
    }

    #[test]
    fn test_direct_add_booking_skips_capacity_check() {
        // The reload path trusts historical records even past capacity.
        let mut registry = sample_registry();
        registry.add_booking(Booking::new(1, 1, date(2025, 5, 1))).unwrap();
        let bea = registry
            .create_customer("Bea".into(), "556".into(), "bea@x.com".into())
            .unwrap();

        registry.add_booking(Booking::new(bea, 1, date(2025, 5, 2))).unwrap();

        assert_eq!(registry.remaining_seats(1).unwrap(), -1);
        assert_cache_matches_derived(&registry, 1);
    }

    #[test]
    fn test_soft_delete_hides_flight_but_keeps_details() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        registry.delete_flight(1).unwrap();

        assert!(registry.flights().is_empty());
        let details = registry.flight_details_long(1).unwrap();
        assert!(details.contains("BA100"));
        assert!(details.contains("Ann"));
        // The booking is still resolvable against the deleted flight.
        assert_eq!(registry.bookings().len(), 1);
    }

    #[test]
    fn test_add_flight_has_no_seat_floor_but_update_does() {
        let mut registry = Registry::new();
        // Creation accepts a zero-capacity flight...
        let id = registry
            .create_flight(
                "XX1".into(),
                "AAA".into(),
                "BBB".into(),
                date(2025, 6, 1),
                0,
                100,
            )
            .unwrap();

        // ...but updating to zero seats is rejected.
        let err = registry.update_flight(id, 0, 100).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSeats(0)));
    }

    #[test]
    fn test_update_flight_validates_and_rederives_cache() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        let err = registry.update_flight(1, 10, -5).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPrice(-5)));

        registry.update_flight(1, 10, 450).unwrap();
        let flight = registry.flight(1).unwrap();
        assert_eq!(flight.seats, 10);
        assert_eq!(flight.price, 450);
        assert_eq!(registry.remaining_seats(1).unwrap(), 9);
        assert_cache_matches_derived(&registry, 1);
    }

    #[test]
    fn test_update_customer_partial_fields() {
        let mut registry = sample_registry();

        registry
            .update_customer(1, Some("Anna"), Some("   "), None)
            .unwrap();

        let customer = registry.customer(1).unwrap();
        assert_eq!(customer.name, "Anna");
        assert_eq!(customer.phone, "555");
        assert_eq!(customer.email, "ann@x.com");
    }

    #[test]
    fn test_update_booking_moves_seat_accounting() {
        let mut registry = sample_registry();
        let second = registry
            .create_flight(
                "BA200".into(),
                "LHR".into(),
                "CDG".into(),
                date(2025, 7, 1),
                2,
                200,
            )
            .unwrap();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        registry.update_booking(1, 1, second, None).unwrap();

        assert_eq!(registry.remaining_seats(1).unwrap(), 1);
        assert_eq!(registry.remaining_seats(second).unwrap(), 1);
        assert!(registry.flight(1).unwrap().passengers.is_empty());
        assert!(registry.flight(second).unwrap().passengers.contains(&1));
        assert_eq!(registry.bookings()[0].flight_id, second);
        assert_cache_matches_derived(&registry, 1);
        assert_cache_matches_derived(&registry, second);
    }

    #[test]
    fn test_update_booking_checks_capacity_on_new_flight() {
        let mut registry = sample_registry();
        let second = registry
            .create_flight(
                "BA200".into(),
                "LHR".into(),
                "CDG".into(),
                date(2025, 7, 1),
                1,
                200,
            )
            .unwrap();
        let bea = registry
            .create_customer("Bea".into(), "556".into(), "bea@x.com".into())
            .unwrap();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();
        registry
            .add_booking_by_ids(bea, second, date(2025, 5, 1))
            .unwrap();

        let err = registry.update_booking(1, 1, second, None).unwrap_err();

        assert!(matches!(err, RegistryError::FlightFull(f) if f == second));
        // Nothing moved on failure.
        assert_eq!(registry.remaining_seats(1).unwrap(), 0);
        assert_eq!(registry.bookings()[0].flight_id, 1);
    }

    #[test]
    fn test_update_booking_same_flight_new_date() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        // Re-dating on a full flight works: the freed seat covers it.
        registry
            .update_booking(1, 1, 1, Some(date(2025, 5, 3)))
            .unwrap();

        assert_eq!(registry.bookings().len(), 1);
        assert_eq!(registry.bookings()[0].booking_date, date(2025, 5, 3));
        assert_eq!(registry.remaining_seats(1).unwrap(), 0);
        assert_cache_matches_derived(&registry, 1);
    }

    #[test]
    fn test_update_booking_unknown_target_flight() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        let err = registry.update_booking(1, 1, 99, None).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownFlight(99)));
    }

    #[test]
    fn test_delete_customer_cascades_bookings() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        registry.delete_customer(1).unwrap();

        assert!(registry.bookings().is_empty());
        assert_eq!(registry.remaining_seats(1).unwrap(), 1);
        assert!(registry.flight(1).unwrap().passengers.is_empty());
        assert!(matches!(
            registry.customer(1),
            Err(RegistryError::UnknownCustomer(1))
        ));
    }

    #[test]
    fn test_ids_stay_monotonic_after_deleting_highest() {
        let mut registry = sample_registry();
        let bea = registry
            .create_customer("Bea".into(), "556".into(), "bea@x.com".into())
            .unwrap();
        assert_eq!(bea, 2);

        registry.delete_customer(bea).unwrap();
        let cal = registry
            .create_customer("Cal".into(), "557".into(), "cal@x.com".into())
            .unwrap();

        assert_eq!(cal, 3);
    }

    #[test]
    fn test_cancel_keeps_passenger_with_second_booking() {
        let mut registry = Registry::new();
        registry
            .create_flight(
                "BA300".into(),
                "LHR".into(),
                "EDI".into(),
                date(2025, 6, 1),
                5,
                80,
            )
            .unwrap();
        registry
            .create_customer("Ann".into(), "555".into(), "ann@x.com".into())
            .unwrap();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 2)).unwrap();

        registry.cancel_booking(1, 1).unwrap();

        // One booking remains, so the passenger set keeps the customer.
        assert!(registry.flight(1).unwrap().passengers.contains(&1));
        assert_eq!(registry.remaining_seats(1).unwrap(), 4);
        assert_cache_matches_derived(&registry, 1);

        registry.cancel_booking(1, 1).unwrap();
        assert!(registry.flight(1).unwrap().passengers.is_empty());
    }

    #[test]
    fn test_query_error_asymmetry_for_unknown_ids() {
        let registry = Registry::new();

        assert!(matches!(
            registry.bookings_by_customer(42),
            Err(RegistryError::UnknownCustomer(42))
        ));
        assert!(matches!(
            registry.remaining_seats(42),
            Err(RegistryError::UnknownFlight(42))
        ));
        // Passenger projection tolerates unknown flights.
        assert!(registry.passengers_by_flight(42).is_empty());
    }

    #[test]
    fn test_cancel_unknown_booking() {
        let mut registry = sample_registry();

        let err = registry.cancel_booking(1, 1).unwrap_err();
        assert!(matches!(err, RegistryError::BookingNotFound { .. }));
    }

    #[test]
    fn test_details_long_rendering() {
        let mut registry = sample_registry();
        registry.add_booking_by_ids(1, 1, date(2025, 5, 1)).unwrap();

        let customer_details = registry.customer_details_long(1).unwrap();
        assert!(customer_details.starts_with("Customer #1 - Ann - 555 - ann@x.com"));
        assert!(customer_details.contains("Flight #BA100"));
        assert!(customer_details.contains("01/06/2025"));

        let flight_details = registry.flight_details_long(1).unwrap();
        assert!(flight_details.starts_with("Flight #1 - BA100 - LHR to JFK"));
        assert!(flight_details.contains("Passenger Name: Ann"));
    }
}
