use crate::commands::Command;
use chrono::NaiveDate;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {command} {usage}")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Unable to parse number '{0}'")]
    InvalidNumber(String),

    #[error("Date must be in YYYY-MM-DD format, got '{0}'")]
    InvalidDate(String),

    #[error("Empty command line")]
    Empty,
}

/// Parse one line of input into a command. Parse failures never reach the
/// registry; the caller reports them and prompts again.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    match cmd {
        "listflights" => Ok(Command::ListFlights),
        "listcustomers" => Ok(Command::ListCustomers),
        "listbookings" => Ok(Command::ListBookings),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        "addflight" => match args {
            [number, origin, destination, departure, seats, price] => Ok(Command::AddFlight {
                flight_number: (*number).to_string(),
                origin: (*origin).to_string(),
                destination: (*destination).to_string(),
                departure_date: date(departure)?,
                seats: number_arg(seats)?,
                price: number_arg(price)?,
            }),
            _ => Err(usage(
                "addflight",
                "<number> <origin> <destination> <YYYY-MM-DD> <seats> <price>",
            )),
        },
        "addcustomer" => match args {
            [name, phone, email] => Ok(Command::AddCustomer {
                name: (*name).to_string(),
                phone: (*phone).to_string(),
                email: (*email).to_string(),
            }),
            _ => Err(usage("addcustomer", "<name> <phone> <email>")),
        },
        "addbooking" => match args {
            [customer_id, flight_id, booking_date] => Ok(Command::AddBooking {
                customer_id: number_arg(customer_id)?,
                flight_id: number_arg(flight_id)?,
                booking_date: date(booking_date)?,
            }),
            _ => Err(usage("addbooking", "<customer id> <flight id> <YYYY-MM-DD>")),
        },
        "editbooking" => match args {
            [customer_id, flight_id, new_flight_id] => Ok(Command::EditBooking {
                customer_id: number_arg(customer_id)?,
                flight_id: number_arg(flight_id)?,
                new_flight_id: number_arg(new_flight_id)?,
                new_date: None,
            }),
            [customer_id, flight_id, new_flight_id, new_date] => Ok(Command::EditBooking {
                customer_id: number_arg(customer_id)?,
                flight_id: number_arg(flight_id)?,
                new_flight_id: number_arg(new_flight_id)?,
                new_date: Some(date(new_date)?),
            }),
            _ => Err(usage(
                "editbooking",
                "<customer id> <flight id> <new flight id> [YYYY-MM-DD]",
            )),
        },
        "cancelbooking" => match args {
            [customer_id, flight_id] => Ok(Command::CancelBooking {
                customer_id: number_arg(customer_id)?,
                flight_id: number_arg(flight_id)?,
            }),
            _ => Err(usage("cancelbooking", "<customer id> <flight id>")),
        },
        "editcustomer" => match args {
            [id, name, phone, email] => Ok(Command::EditCustomer {
                id: number_arg(id)?,
                name: optional(name),
                phone: optional(phone),
                email: optional(email),
            }),
            _ => Err(usage("editcustomer", "<id> <name|-> <phone|-> <email|->")),
        },
        "editflight" => match args {
            [id, seats, price] => Ok(Command::EditFlight {
                id: number_arg(id)?,
                seats: number_arg(seats)?,
                price: number_arg(price)?,
            }),
            _ => Err(usage("editflight", "<id> <seats> <price>")),
        },
        "deleteflight" => id_command(args, "deleteflight", |id| Command::DeleteFlight { id }),
        "deletecustomer" => id_command(args, "deletecustomer", |id| Command::DeleteCustomer { id }),
        "showflight" => id_command(args, "showflight", |id| Command::ShowFlight { id }),
        "showcustomer" => id_command(args, "showcustomer", |id| Command::ShowCustomer { id }),
        "customerbookinglist" => {
            id_command(args, "customerbookinglist", |id| Command::CustomerBookingList { id })
        }
        "remainingseats" => id_command(args, "remainingseats", |id| Command::RemainingSeats { id }),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn id_command(
    args: &[&str],
    command: &'static str,
    build: impl FnOnce(u32) -> Command,
) -> Result<Command, ParseError> {
    match args {
        [id] => Ok(build(number_arg(id)?)),
        _ => Err(usage(command, "<id>")),
    }
}

fn usage(command: &'static str, usage: &'static str) -> ParseError {
    ParseError::Usage { command, usage }
}

fn number_arg<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn date(token: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(token.to_string()))
}

fn optional(token: &str) -> Option<String> {
    (token != "-").then(|| token.to_string())
}
