//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes argument parsing, building the API client from flags and the
//! environment, and rendering the result for a terminal.

mod commands;

pub use commands::*;
