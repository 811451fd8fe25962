//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::output::OutputFormat;
use crate::model::{
    format_timestamp, normalize_iata, parse_timestamp, NewFlight, PilotSelector, Role,
    STATUS_ON_TIME,
};

/// Output selection shared by listing commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl OutputArgs {
    /// The requested format, or `fallback` when none was given.
    #[must_use]
    pub fn resolve(self, fallback: OutputFormat) -> OutputFormat {
        self.format.unwrap_or(fallback)
    }
}

/// Flight commands.
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// List every flight
    List {
        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List flights whose FIELD equals VALUE
    Find {
        /// Field to match (e.g. FlightStatus, ArrivalAirport, Departure)
        field: String,

        /// Value to match exactly
        value: String,

        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one flight and its crew
    Show {
        /// Flight id
        id: i64,

        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add a flight under the next free id
    Add(AddFlightArgs),

    /// Remove a flight and its crew assignments
    Remove {
        /// Flight id
        id: i64,
    },

    /// Set one field of a flight
    Update {
        /// Flight id
        id: i64,

        /// Field to change
        field: String,

        /// New value
        value: String,
    },

    /// List the pilots assigned to a flight
    Crew {
        /// Flight id
        id: i64,

        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List flights that have no Captain
    MissingCaptain {
        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments for adding a flight.
#[derive(Debug, Args)]
pub struct AddFlightArgs {
    /// Published flight number
    #[arg(long)]
    pub number: i64,

    /// Operating airline
    #[arg(long)]
    pub airline: String,

    /// Aircraft id
    #[arg(long)]
    pub aircraft: i64,

    /// Origin IATA code
    #[arg(long, value_parser = iata_arg)]
    pub from: String,

    /// Destination IATA code
    #[arg(long, value_parser = iata_arg)]
    pub to: String,

    /// Departure time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = timestamp_arg)]
    pub departure: String,

    /// Arrival time (YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = timestamp_arg)]
    pub arrival: String,

    /// Flight status
    #[arg(long, default_value = STATUS_ON_TIME)]
    pub status: String,
}

impl From<AddFlightArgs> for NewFlight {
    fn from(args: AddFlightArgs) -> Self {
        Self {
            flight_number: args.number,
            airline_name: args.airline,
            aircraft_id: args.aircraft,
            departure_airport: args.from,
            arrival_airport: args.to,
            departure: args.departure,
            arrival: args.arrival,
            status: args.status,
        }
    }
}

/// Pilot commands.
#[derive(Debug, Subcommand)]
pub enum PilotsCommand {
    /// List the pilot roster
    List {
        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Assign a pilot to a flight
    Assign {
        /// Flight id
        flight_id: i64,

        /// Pilot id
        pilot_id: i64,

        /// Crew role ("Captain" or "First Officer")
        #[arg(value_parser = role_arg)]
        role: Role,
    },

    /// Remove a pilot from a flight
    Unassign {
        /// Flight id
        flight_id: i64,

        /// Pilot id
        pilot_id: i64,
    },

    /// Show the flights a pilot (or every pilot) is assigned to
    Schedule {
        /// Pilot id, or ALL
        #[arg(default_value = "ALL", value_parser = selector_arg)]
        pilot: PilotSelector,

        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Airport commands.
#[derive(Debug, Subcommand)]
pub enum AirportsCommand {
    /// List every airport
    List {
        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List flights arriving at an airport
    Arrivals {
        /// Destination IATA code
        #[arg(value_parser = iata_arg)]
        iata: String,

        /// Output selection
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Set the City, Country or Timezone of an airport
    Update {
        /// IATA code
        #[arg(value_parser = iata_arg)]
        iata: String,

        /// Field to change
        field: String,

        /// New value
        value: String,
    },
}

/// Aircraft command arguments.
#[derive(Debug, Args)]
pub struct AircraftCommand {
    /// Output selection
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Seed command arguments.
#[derive(Debug, Args)]
pub struct SeedCommand {
    /// Also insert the sample flights and crews when no flights exist
    #[arg(long)]
    pub sample: bool,

    /// Also generate random crewed flights (count defaults to the configured value)
    #[arg(long, value_name = "COUNT")]
    pub random: Option<Option<usize>>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn iata_arg(s: &str) -> Result<String, String> {
    normalize_iata(s).map_err(|e| e.to_string())
}

fn timestamp_arg(s: &str) -> Result<String, String> {
    parse_timestamp(s)
        .map(|dt| format_timestamp(&dt))
        .map_err(|e| e.to_string())
}

fn role_arg(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn selector_arg(s: &str) -> Result<PilotSelector, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_args_resolve() {
        let unset = OutputArgs::default();
        assert_eq!(unset.resolve(OutputFormat::Json), OutputFormat::Json);

        let set = OutputArgs {
            format: Some(OutputFormat::Plain),
        };
        assert_eq!(set.resolve(OutputFormat::Json), OutputFormat::Plain);
    }

    #[test]
    fn test_iata_arg() {
        assert_eq!(iata_arg("lax").unwrap(), "LAX");
        assert!(iata_arg("LAXX").is_err());
    }

    #[test]
    fn test_timestamp_arg_normalizes() {
        assert_eq!(timestamp_arg(" 2023-01-01T08:00 ").unwrap(), "2023-01-01T08:00");
        assert!(timestamp_arg("2023-01-01 08:00").is_err());
        assert!(timestamp_arg("2023-13-01T08:00").is_err());
    }

    #[test]
    fn test_role_arg() {
        assert_eq!(role_arg("captain").unwrap(), Role::Captain);
        assert_eq!(role_arg("First Officer").unwrap(), Role::FirstOfficer);
        assert!(role_arg("Navigator").unwrap_err().contains("Navigator"));
    }

    #[test]
    fn test_selector_arg() {
        assert_eq!(selector_arg("all").unwrap(), PilotSelector::All);
        assert_eq!(selector_arg("7").unwrap(), PilotSelector::One(7));
        assert!(selector_arg("seven").is_err());
    }

    #[test]
    fn test_add_args_into_new_flight() {
        let args = AddFlightArgs {
            number: 1001,
            airline: "Delta Airlines".to_string(),
            aircraft: 1,
            from: "JFK".to_string(),
            to: "LAX".to_string(),
            departure: "2023-01-01T08:00".to_string(),
            arrival: "2023-01-01T11:00".to_string(),
            status: STATUS_ON_TIME.to_string(),
        };
        let flight = NewFlight::from(args);
        assert_eq!(flight.departure_airport, "JFK");
        assert_eq!(flight.arrival_airport, "LAX");
        assert_eq!(flight.status, "On Time");
    }
}
