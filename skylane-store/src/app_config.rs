use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub customers_path: String,
    pub flights_path: String,
    pub bookings_path: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("data.customers_path", "resources/data/customers.txt")?
            .set_default("data.flights_path", "resources/data/flights.txt")?
            .set_default("data.bookings_path", "resources/data/bookings.txt")?
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in settings from the environment (with a prefix of SKYLANE)
            // Eg.. `SKYLANE__DATA__BOOKINGS_PATH=...` would set the bookings path
            .add_source(config::Environment::with_prefix("SKYLANE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
