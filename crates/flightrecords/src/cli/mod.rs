//! Command-line interface for flightrecords.
//!
//! This module provides the CLI structure, the interactive menu, and the
//! output renderers for the `flightrec` binary.

mod commands;
pub mod menu;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddFlightArgs, AircraftCommand, AirportsCommand, ConfigCommand, FlightsCommand, OutputArgs,
    PilotsCommand, SeedCommand, StatusCommand,
};
pub use menu::Menu;
pub use output::{render, OutputFormat, Tabular};

use crate::error::Result;
use crate::model::Flight;
use crate::storage::fields::FlightField;
use crate::storage::FlightStore;

/// flightrec - Manage flight operations records
///
/// Keeps airports, aircraft, pilots, flights and crew assignments in a local
/// SQLite database. Run without a command for the interactive menu.
#[derive(Debug, Parser)]
#[command(name = "flightrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the database file (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query and edit flights
    #[command(subcommand)]
    Flights(FlightsCommand),

    /// Query pilots and manage crew assignments
    #[command(subcommand)]
    Pilots(PilotsCommand),

    /// Query and edit airports
    #[command(subcommand)]
    Airports(AirportsCommand),

    /// List the fleet
    Aircraft(AircraftCommand),

    /// Insert reference data, sample flights, or random flights
    Seed(SeedCommand),

    /// Show database location and record counts
    Status(StatusCommand),

    /// Start the interactive menu
    Menu,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                2 => crate::logging::Verbosity::Debug,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

/// Flights whose `field` matches operator text.
///
/// Airport codes are matched case-insensitively; timestamps are matched as
/// typed.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidField`] for an unrecognized field, or any
/// error from [`FlightStore::find_flights`].
pub fn find_flights(store: &FlightStore, field: &str, value: &str) -> Result<Vec<Flight>> {
    let field: FlightField = field.parse()?;
    store.find_flights(field.name(), &field.normalize_criterion(value))
}

/// Set one field of a flight from operator text.
///
/// A missing flight is reported first. Timestamps must be
/// `YYYY-MM-DDTHH:MM` and airport codes are upper-cased before the write.
///
/// # Errors
///
/// Returns [`crate::Error::NotFound`] for a missing flight,
/// [`crate::Error::InvalidField`] for an unrecognized field,
/// [`crate::Error::InvalidInput`] for a malformed timestamp or code, or any
/// error from [`FlightStore::update_flight_field`].
pub fn update_flight(
    store: &FlightStore,
    flight_id: i64,
    field: &str,
    value: &str,
) -> Result<()> {
    store.get_flight(flight_id)?;
    let field: FlightField = field.parse()?;
    let value = field.normalize_input(value)?;
    store.update_flight_field(flight_id, field.name(), &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use crate::model::{PilotSelector, Role};
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            database: None,
            verbose,
            quiet,
            command: Some(Command::Status(StatusCommand { json: false })),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "flightrec");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Debug);
        assert_eq!(cli_with(5, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_no_command_is_menu() {
        let cli = Cli::try_parse_from(["flightrec"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["flightrec", "menu"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Menu)));
    }

    #[test]
    fn test_parse_global_database() {
        let cli = Cli::try_parse_from(["flightrec", "status", "--database", "/tmp/f.db"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/f.db")));
    }

    #[test]
    fn test_parse_flights_find() {
        let cli =
            Cli::try_parse_from(["flightrec", "flights", "find", "FlightStatus", "Delayed"])
                .unwrap();
        match cli.command {
            Some(Command::Flights(FlightsCommand::Find { field, value, output })) => {
                assert_eq!(field, "FlightStatus");
                assert_eq!(value, "Delayed");
                assert!(output.format.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flights_add() {
        let cli = Cli::try_parse_from([
            "flightrec",
            "flights",
            "add",
            "--number",
            "1001",
            "--airline",
            "Delta Airlines",
            "--aircraft",
            "1",
            "--from",
            "jfk",
            "--to",
            "LAX",
            "--departure",
            "2023-01-01T08:00",
            "--arrival",
            "2023-01-01T12:00",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Flights(FlightsCommand::Add(args))) => {
                assert_eq!(args.from, "JFK");
                assert_eq!(args.status, "On Time");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flights_add_rejects_bad_timestamp() {
        let result = Cli::try_parse_from([
            "flightrec",
            "flights",
            "add",
            "--number",
            "1001",
            "--airline",
            "Delta Airlines",
            "--aircraft",
            "1",
            "--from",
            "JFK",
            "--to",
            "LAX",
            "--departure",
            "tomorrow",
            "--arrival",
            "2023-01-01T12:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_pilots_assign() {
        let cli = Cli::try_parse_from(["flightrec", "pilots", "assign", "3", "4", "First Officer"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Pilots(PilotsCommand::Assign {
                flight_id: 3,
                pilot_id: 4,
                role: Role::FirstOfficer,
            }))
        ));
    }

    #[test]
    fn test_parse_pilots_schedule_defaults_to_all() {
        let cli = Cli::try_parse_from(["flightrec", "pilots", "schedule"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Pilots(PilotsCommand::Schedule {
                pilot: PilotSelector::All,
                ..
            }))
        ));

        let cli = Cli::try_parse_from(["flightrec", "pilots", "schedule", "7", "-f", "json"])
            .unwrap();
        match cli.command {
            Some(Command::Pilots(PilotsCommand::Schedule { pilot, output })) => {
                assert_eq!(pilot, PilotSelector::One(7));
                assert_eq!(output.format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_seed_random_optional_count() {
        let cli = Cli::try_parse_from(["flightrec", "seed"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Seed(SeedCommand {
                sample: false,
                random: None
            }))
        ));

        let cli = Cli::try_parse_from(["flightrec", "seed", "--random"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Seed(SeedCommand {
                random: Some(None),
                ..
            }))
        ));

        let cli = Cli::try_parse_from(["flightrec", "seed", "--sample", "--random", "50"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Seed(SeedCommand {
                sample: true,
                random: Some(Some(50))
            }))
        ));
    }

    #[test]
    fn test_parse_airports_update_normalizes_code() {
        let cli =
            Cli::try_parse_from(["flightrec", "airports", "update", "ord", "City", "Chicago"])
                .unwrap();
        match cli.command {
            Some(Command::Airports(AirportsCommand::Update { iata, .. })) => {
                assert_eq!(iata, "ORD");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["flightrec", "config", "validate", "-f", "/tmp/c.toml"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Validate { file: Some(_) }))
        ));
    }

    fn sample_store() -> FlightStore {
        let store = FlightStore::open_in_memory().unwrap();
        crate::seed::seed_reference(&store).unwrap();
        crate::seed::seed_sample_flights(&store).unwrap();
        store
    }

    #[test]
    fn test_update_flight_rejects_bad_timestamp() {
        let store = sample_store();
        let before = store.get_flight(1).unwrap();

        let err = update_flight(&store, 1, "Departure", "tomorrow").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
        assert_eq!(store.get_flight(1).unwrap(), before);
    }

    #[test]
    fn test_update_flight_normalizes_timestamp_and_airport() {
        let store = sample_store();
        update_flight(&store, 2, "ArrivalAirport", "sfo").unwrap();
        update_flight(&store, 2, "Departure", " 2023-01-02T07:30 ").unwrap();

        let flight = store.get_flight(2).unwrap();
        assert_eq!(flight.arrival_airport, "SFO");
        assert_eq!(flight.departure, "2023-01-02T07:30");
    }

    #[test]
    fn test_update_flight_reports_missing_flight_first() {
        let store = sample_store();
        let err = update_flight(&store, 999, "Gate", "B7").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_flights_airport_case_insensitive() {
        let store = sample_store();
        let flights = find_flights(&store, "departure_airport", "jfk").unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_id, 1);
    }

    #[test]
    fn test_find_flights_matches_timestamps_with_seconds() {
        let store = sample_store();
        let mut flight = store.get_flight(1).unwrap();
        flight.flight_id = 50;
        flight.departure = "2023-03-01T08:00:00".to_string();
        store.insert_flight(&flight).unwrap();

        let flights = find_flights(&store, "Departure", "2023-03-01T08:00:00").unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_id, 50);
    }
}
