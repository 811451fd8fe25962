//! `flightrec` - CLI for flightrecords
//!
//! This binary provides one-shot commands and an interactive menu over the
//! flight records database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use flightrecords::cli::{
    find_flights, render, update_flight, AircraftCommand, AirportsCommand, Cli, Command,
    ConfigCommand, FlightsCommand, Menu, OutputFormat, PilotsCommand, SeedCommand,
};
use flightrecords::config::MAX_RANDOM_FLIGHTS;
use flightrecords::seed::{generate_flights, rng_from_seed, seed_reference, seed_sample_flights};
use flightrecords::{init_logging, Config, FlightStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    let db_path = cli.database.unwrap_or_else(|| config.database_path());
    let open_store = || -> anyhow::Result<FlightStore> {
        debug!("Using database at {}", db_path.display());
        FlightStore::open(&db_path)
            .with_context(|| format!("cannot open flight records at {}", db_path.display()))
    };

    let format = config.display.format;
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Flights(cmd) => handle_flights(&open_store()?, cmd, format, &mut out),
        Command::Pilots(cmd) => handle_pilots(&open_store()?, cmd, format, &mut out),
        Command::Airports(cmd) => handle_airports(&open_store()?, cmd, format, &mut out),
        Command::Aircraft(AircraftCommand { output }) => {
            let aircraft = open_store()?.list_aircraft()?;
            render(&mut out, &aircraft, output.resolve(format), "No aircraft on record.")?;
            Ok(())
        }
        Command::Seed(cmd) => handle_seed(&open_store()?, &config, &cmd, &mut out),
        Command::Status(cmd) => handle_status(&open_store()?, cmd.json, &mut out),
        Command::Menu => {
            let store = open_store()?;
            Menu::new(&store, io::stdin().lock(), &mut out, format).run()?;
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_flights(
    store: &FlightStore,
    cmd: FlightsCommand,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        FlightsCommand::List { output } => {
            let flights = store.list_flights()?;
            render(out, &flights, output.resolve(format), "No flights on record.")?;
        }
        FlightsCommand::Find {
            field,
            value,
            output,
        } => {
            let flights = find_flights(store, &field, &value)?;
            render(
                out,
                &flights,
                output.resolve(format),
                "No flights exist for the given criteria.",
            )?;
        }
        FlightsCommand::Show { id, output } => {
            let format = output.resolve(format);
            let flight = store.get_flight(id)?;
            let crew = store.flight_crew(id)?;
            if format == OutputFormat::Json {
                let value = serde_json::json!({ "flight": flight, "crew": crew });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                render(out, &[flight], format, "")?;
                writeln!(out)?;
                render(out, &crew, format, "No crew assigned.")?;
            }
        }
        FlightsCommand::Add(args) => {
            let flight = store.add_flight(args.into())?;
            writeln!(out, "Flight {} added successfully!", flight.flight_id)?;
        }
        FlightsCommand::Remove { id } => {
            store.remove_flight(id)?;
            writeln!(out, "Flight {id} removed successfully!")?;
        }
        FlightsCommand::Update { id, field, value } => {
            update_flight(store, id, &field, &value)?;
            writeln!(out, "Flight {id} updated successfully!")?;
        }
        FlightsCommand::Crew { id, output } => {
            let crew = store.flight_crew(id)?;
            render(out, &crew, output.resolve(format), "No crew assigned.")?;
        }
        FlightsCommand::MissingCaptain { output } => {
            let ids = store.flights_without_captain()?;
            let flights = ids
                .into_iter()
                .map(|id| store.get_flight(id))
                .collect::<flightrecords::Result<Vec<_>>>()?;
            render(
                out,
                &flights,
                output.resolve(format),
                "Every flight has a Captain.",
            )?;
        }
    }
    Ok(())
}

fn handle_pilots(
    store: &FlightStore,
    cmd: PilotsCommand,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        PilotsCommand::List { output } => {
            let pilots = store.list_pilots()?;
            render(out, &pilots, output.resolve(format), "No pilots on record.")?;
        }
        PilotsCommand::Assign {
            flight_id,
            pilot_id,
            role,
        } => {
            store.assign_pilot(flight_id, pilot_id, role)?;
            writeln!(out, "Pilot {pilot_id} assigned to flight {flight_id} as {role}.")?;
        }
        PilotsCommand::Unassign {
            flight_id,
            pilot_id,
        } => {
            store.unassign_pilot(flight_id, pilot_id)?;
            writeln!(out, "Pilot {pilot_id} removed from flight {flight_id}.")?;
        }
        PilotsCommand::Schedule { pilot, output } => {
            let schedule = store.pilot_schedule(pilot)?;
            render(
                out,
                &schedule,
                output.resolve(format),
                "No flights scheduled.",
            )?;
        }
    }
    Ok(())
}

fn handle_airports(
    store: &FlightStore,
    cmd: AirportsCommand,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        AirportsCommand::List { output } => {
            let airports = store.list_airports()?;
            render(out, &airports, output.resolve(format), "No airports on record.")?;
        }
        AirportsCommand::Arrivals { iata, output } => {
            let flights = store.flights_to_destination(&iata)?;
            render(
                out,
                &flights,
                output.resolve(format),
                &format!("No flights arrive at {iata}."),
            )?;
        }
        AirportsCommand::Update { iata, field, value } => {
            store.update_airport_field(&iata, &field, &value)?;
            writeln!(out, "Airport {iata} updated successfully!")?;
        }
    }
    Ok(())
}

fn handle_seed(
    store: &FlightStore,
    config: &Config,
    cmd: &SeedCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut report = seed_reference(store).context("failed to seed reference data")?;

    if cmd.sample {
        report += seed_sample_flights(store).context("failed to seed sample flights")?;
    }

    if let Some(count) = cmd.random {
        let count = count.unwrap_or(config.seed.random_flights);
        if count > MAX_RANDOM_FLIGHTS {
            bail!("cannot generate more than {MAX_RANDOM_FLIGHTS} flights at once");
        }
        let mut rng = rng_from_seed(config.seed.rng_seed);
        report += generate_flights(store, count, &mut rng)?;
    }

    writeln!(
        out,
        "Inserted {} airports, {} aircraft, {} pilots, {} flights, {} assignments.",
        report.airports, report.aircraft, report.pilots, report.flights, report.assignments
    )?;
    Ok(())
}

fn handle_status(store: &FlightStore, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let stats = store.stats()?;
    let unmanned = store.flights_without_captain()?.len();

    if json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "stats": stats,
            "flights_without_captain": unmanned,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
    } else {
        writeln!(out, "flightrec status")?;
        writeln!(out, "----------------")?;
        writeln!(out, "Database:      {}", store.path().display())?;
        writeln!(out, "Size:          {} bytes", stats.db_size_bytes)?;
        writeln!(out, "Airports:      {}", stats.airports)?;
        writeln!(out, "Aircraft:      {}", stats.aircraft)?;
        writeln!(out, "Pilots:        {}", stats.pilots)?;
        writeln!(out, "Flights:       {}", stats.flights)?;
        writeln!(out, "Assignments:   {}", stats.assignments)?;
        writeln!(out, "No Captain:    {unmanned}")?;
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Seed]");
                println!("  Random flights:     {}", config.seed.random_flights);
                match config.seed.rng_seed {
                    Some(seed) => println!("  RNG seed:           {seed}"),
                    None => println!("  RNG seed:           (random)"),
                }
                println!();
                println!("[Display]");
                println!("  Format:             {:?}", config.display.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
