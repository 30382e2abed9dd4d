pub mod models;
pub mod registry;

pub use models::{Booking, Customer, Flight};
pub use registry::{Registry, RegistryError};
