use chrono::NaiveDate;
use skylane_core::{Registry, RegistryError};

/// One parsed user command. Each variant executes exactly one registry
/// operation against an explicitly passed registry handle and returns the
/// text to display.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddFlight {
        flight_number: String,
        origin: String,
        destination: String,
        departure_date: NaiveDate,
        seats: i32,
        price: i32,
    },
    AddCustomer {
        name: String,
        phone: String,
        email: String,
    },
    AddBooking {
        customer_id: u32,
        flight_id: u32,
        booking_date: NaiveDate,
    },
    EditBooking {
        customer_id: u32,
        flight_id: u32,
        new_flight_id: u32,
        new_date: Option<NaiveDate>,
    },
    CancelBooking {
        customer_id: u32,
        flight_id: u32,
    },
    EditCustomer {
        id: u32,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    },
    EditFlight {
        id: u32,
        seats: i32,
        price: i32,
    },
    DeleteFlight { id: u32 },
    DeleteCustomer { id: u32 },
    ListFlights,
    ListCustomers,
    ListBookings,
    ShowFlight { id: u32 },
    ShowCustomer { id: u32 },
    CustomerBookingList { id: u32 },
    RemainingSeats { id: u32 },
    Help,
    Exit,
}

impl Command {
    pub fn execute(self, registry: &mut Registry) -> Result<String, RegistryError> {
        match self {
            Command::AddFlight {
                flight_number,
                origin,
                destination,
                departure_date,
                seats,
                price,
            } => {
                let id = registry.create_flight(
                    flight_number,
                    origin,
                    destination,
                    departure_date,
                    seats,
                    price,
                )?;
                Ok(format!("Flight #{} added.", id))
            }
            Command::AddCustomer { name, phone, email } => {
                let id = registry.create_customer(name, phone, email)?;
                Ok(format!("Customer #{} added.", id))
            }
            Command::AddBooking {
                customer_id,
                flight_id,
                booking_date,
            } => {
                registry.add_booking_by_ids(customer_id, flight_id, booking_date)?;
                Ok(format!(
                    "Booking added for customer #{} on flight #{}.",
                    customer_id, flight_id
                ))
            }
            Command::EditBooking {
                customer_id,
                flight_id,
                new_flight_id,
                new_date,
            } => {
                registry.update_booking(customer_id, flight_id, new_flight_id, new_date)?;
                Ok(format!(
                    "Booking for customer #{} moved to flight #{}.",
                    customer_id, new_flight_id
                ))
            }
            Command::CancelBooking {
                customer_id,
                flight_id,
            } => {
                registry.cancel_booking(customer_id, flight_id)?;
                Ok(format!(
                    "Booking cancelled for customer #{} on flight #{}.",
                    customer_id, flight_id
                ))
            }
            Command::EditCustomer {
                id,
                name,
                phone,
                email,
            } => {
                registry.update_customer(id, name.as_deref(), phone.as_deref(), email.as_deref())?;
                Ok(format!("Customer #{} updated.", id))
            }
            Command::EditFlight { id, seats, price } => {
                registry.update_flight(id, seats, price)?;
                Ok(format!("Flight #{} updated.", id))
            }
            Command::DeleteFlight { id } => {
                registry.delete_flight(id)?;
                Ok(format!("Flight #{} deleted.", id))
            }
            Command::DeleteCustomer { id } => {
                registry.delete_customer(id)?;
                Ok(format!("Customer #{} deleted.", id))
            }
            Command::ListFlights => {
                let flights = registry.flights();
                let mut lines: Vec<String> =
                    flights.iter().map(|f| f.details_short()).collect();
                lines.push(format!("{} flight(s)", flights.len()));
                Ok(lines.join("\n"))
            }
            Command::ListCustomers => {
                let customers = registry.customers();
                let mut lines: Vec<String> =
                    customers.iter().map(|c| c.details_short()).collect();
                lines.push(format!("{} customer(s)", customers.len()));
                Ok(lines.join("\n"))
            }
            Command::ListBookings => {
                let bookings = registry.bookings();
                let mut lines: Vec<String> = bookings
                    .iter()
                    .map(|b| {
                        format!(
                            "Customer #{} Flight #{} Date {}",
                            b.customer_id,
                            b.flight_id,
                            b.booking_date.format("%d/%m/%Y")
                        )
                    })
                    .collect();
                lines.push(format!("{} booking(s)", bookings.len()));
                Ok(lines.join("\n"))
            }
            Command::ShowFlight { id } => registry.flight_details_long(id),
            Command::ShowCustomer { id } => registry.customer_details_long(id),
            Command::CustomerBookingList { id } => {
                let bookings = registry.bookings_by_customer(id)?;
                let mut lines: Vec<String> = bookings
                    .iter()
                    .map(|b| {
                        format!(
                            "Flight #{} Date {}",
                            b.flight_id,
                            b.booking_date.format("%d/%m/%Y")
                        )
                    })
                    .collect();
                lines.push(format!("{} booking(s)", bookings.len()));
                Ok(lines.join("\n"))
            }
            Command::RemainingSeats { id } => Ok(format!(
                "Remaining seats on flight #{}: {}",
                id,
                registry.remaining_seats(id)?
            )),
            Command::Help => Ok(HELP.to_string()),
            Command::Exit => Ok(String::new()),
        }
    }
}

pub const HELP: &str = "Commands:
  addflight <number> <origin> <destination> <YYYY-MM-DD> <seats> <price>
  addcustomer <name> <phone> <email>
  addbooking <customer id> <flight id> <YYYY-MM-DD>
  editbooking <customer id> <flight id> <new flight id> [YYYY-MM-DD]
  cancelbooking <customer id> <flight id>
  editcustomer <id> <name|-> <phone|-> <email|->   ('-' keeps the current value)
  editflight <id> <seats> <price>
  deleteflight <id>
  deletecustomer <id>
  listflights | listcustomers | listbookings
  showflight <id> | showcustomer <id>
  customerbookinglist <id>
  remainingseats <id>
  help | exit";
