//! Client library for the OpenWeatherMap current weather API.
//!
//! Builds authenticated requests, decodes JSON responses into typed
//! structures and surfaces API failures as typed errors.
//!
//! ```no_run
//! # async fn run() -> openweather::Result<()> {
//! let client = openweather::Client::from_env()?;
//! let location = client.current().by_city("Montreal").await?;
//! println!("{}: {:?}", location.name, location.weather);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod models;

pub use api::{
    Client, ClientBuilder, CurrentService, Destination, Json, Raw, Units, API_KEY_ENV, NO_BODY,
};
pub use error::{Error, ErrorResponse, Result};
pub use models::Location;
