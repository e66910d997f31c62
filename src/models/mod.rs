//! Defines the data structures decoded from the OpenWeatherMap API.

mod openweather;

pub use openweather::*;
