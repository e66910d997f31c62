//! Provides the client and services for the OpenWeatherMap API.
//!
//! Includes:
//! - `client`: request building and execution shared by every service.
//! - `options`: the builder used to configure a client.
//! - `destination`: where successful response bodies are written.
//! - `current`: the current weather service.

mod client;
mod current;
mod destination;
mod options;


pub use client::*;
pub use current::*;
pub use destination::*;
pub use options::*;
