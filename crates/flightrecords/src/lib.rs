//! `flightrecords` - Flight operations records over SQLite
//!
//! This library provides the record store for airports, aircraft, pilots,
//! flights and crew assignments, the seed data used to populate it, and the
//! command-line and interactive front ends of the `flightrec` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod seed;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{
    Aircraft, Airport, Assignment, DestinationFlight, Flight, NewFlight, Pilot, PilotSelector,
    Role, ScheduleEntry,
};
pub use storage::{FlightStore, StoreStats};
