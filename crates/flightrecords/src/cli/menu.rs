//! Interactive numbered menu over the flight store.
//!
//! The menu reads operator answers line by line from any [`BufRead`] and
//! writes prompts and results to any [`Write`], so sessions can be scripted.
//! A rejected operation prints its error and returns to the menu; only end of
//! input, option 9, or a failure writing to the terminal ends the session.

use std::io::{BufRead, ErrorKind, Write};

use tracing::{debug, error, warn};

use super::output::{render, OutputFormat};
use crate::error::{Error, Result};
use crate::model::{
    format_timestamp, normalize_iata, parse_timestamp, NewFlight, PilotSelector, Role,
    STATUS_ON_TIME,
};
use crate::storage::fields::{AirportField, FlightField};
use crate::storage::FlightStore;

const MENU: &str = "\
Please choose an option:
 1. View flights by criteria
 2. Add a new flight
 3. Remove a flight
 4. Update flight information
 5. Assign a pilot to a flight
 6. View pilot schedule
 7. View destination information
 8. Update destination information
 9. Quit";

/// What the loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive session bound to one store.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    store: &'a FlightStore,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(store: &'a FlightStore, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            store,
            input,
            output,
            format,
        }
    }

    /// Run the menu until the operator quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the output fails; every other
    /// error is shown to the operator and the menu carries on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let choice = match self.prompt("Enter your choice (1-9): ") {
                Ok(choice) => choice,
                Err(e) if is_end_of_input(&e) => return Ok(()),
                Err(e) => return Err(e),
            };

            match self.dispatch(&choice) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(e) if is_end_of_input(&e) => return Ok(()),
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => {
                    if e.is_recoverable() {
                        warn!("Menu option {} rejected: {}", choice, e);
                    } else {
                        error!("Menu option {} failed: {}", choice, e);
                    }
                    writeln!(self.output, "Error: {e}")?;
                }
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        debug!("Menu choice: {}", choice);
        match choice {
            "1" => self.view_flights()?,
            "2" => self.add_flight()?,
            "3" => self.remove_flight()?,
            "4" => self.update_flight()?,
            "5" => self.assign_pilot()?,
            "6" => self.pilot_schedule()?,
            "7" => self.destination_flights()?,
            "8" => self.update_destination()?,
            "9" => {
                writeln!(self.output, "Exited program")?;
                return Ok(Flow::Quit);
            }
            _ => writeln!(self.output, "Invalid choice. Please enter a number from 1 to 9.")?,
        }
        Ok(Flow::Continue)
    }

    /// Print `message` and read one trimmed line of input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(ErrorKind::UnexpectedEof.into()));
        }
        Ok(line.trim().to_string())
    }

    fn prompt_id(&mut self, message: &str) -> Result<i64> {
        let answer = self.prompt(message)?;
        answer
            .parse()
            .map_err(|_| Error::invalid_input(format!("'{answer}' is not a valid id")))
    }

    fn prompt_timestamp(&mut self, message: &str) -> Result<String> {
        let answer = self.prompt(message)?;
        Ok(format_timestamp(&parse_timestamp(&answer)?))
    }

    fn prompt_iata(&mut self, message: &str) -> Result<String> {
        let answer = self.prompt(message)?;
        normalize_iata(&answer)
    }

    /// Read raw text for a flight field, hinting at the expected form.
    fn prompt_flight_value(&mut self, field: FlightField) -> Result<String> {
        if field.is_timestamp() {
            self.prompt(&format!("Enter {field} (YYYY-MM-DDTHH:MM): "))
        } else if field.is_airport() {
            self.prompt(&format!("Enter {field} (IATA code): "))
        } else {
            self.prompt(&format!("Enter {field}: "))
        }
    }

    fn view_flights(&mut self) -> Result<()> {
        let names: Vec<&str> = FlightField::ALL.iter().map(|f| f.name()).collect();
        writeln!(self.output, "Fields: {}", names.join(", "))?;

        let criteria = self.prompt("Enter a field to filter by, or ALL: ")?;
        let flights = if criteria.eq_ignore_ascii_case("all") {
            self.store.list_flights()?
        } else {
            let field: FlightField = criteria.parse()?;
            let value = self.prompt_flight_value(field)?;
            super::find_flights(self.store, field.name(), &value)?
        };

        render(
            &mut self.output,
            &flights,
            self.format,
            "No flights exist for the given criteria.",
        )
    }

    fn add_flight(&mut self) -> Result<()> {
        let flight_number = self.prompt_id("Enter flight number: ")?;
        let airline_name = self.prompt("Enter airline name: ")?;
        let aircraft_id = self.prompt_id("Enter aircraft id: ")?;
        let departure_airport = self.prompt_iata("Enter departure airport (IATA code): ")?;
        let arrival_airport = self.prompt_iata("Enter arrival airport (IATA code): ")?;
        let departure = self.prompt_timestamp("Enter departure time (YYYY-MM-DDTHH:MM): ")?;
        let arrival = self.prompt_timestamp("Enter arrival time (YYYY-MM-DDTHH:MM): ")?;
        let status = self.prompt(&format!("Enter flight status [{STATUS_ON_TIME}]: "))?;
        let status = if status.is_empty() {
            STATUS_ON_TIME.to_string()
        } else {
            status
        };

        let flight = self.store.add_flight(NewFlight {
            flight_number,
            airline_name,
            aircraft_id,
            departure_airport,
            arrival_airport,
            departure,
            arrival,
            status,
        })?;
        writeln!(self.output, "Flight {} added successfully!", flight.flight_id)?;
        Ok(())
    }

    fn remove_flight(&mut self) -> Result<()> {
        let flight_id = self.prompt_id("Enter the id of the flight to remove: ")?;
        self.store.remove_flight(flight_id)?;
        writeln!(self.output, "Flight {flight_id} removed successfully!")?;
        Ok(())
    }

    fn update_flight(&mut self) -> Result<()> {
        let flight_id = self.prompt_id("Enter the id of the flight to update: ")?;
        // Report a missing flight before asking for the field.
        self.store.get_flight(flight_id)?;

        let names: Vec<&str> = FlightField::ALL.iter().map(|f| f.name()).collect();
        writeln!(self.output, "Fields: {}", names.join(", "))?;
        let field: FlightField = self.prompt("Enter the field to update: ")?.parse()?;
        let value = self.prompt_flight_value(field)?;

        super::update_flight(self.store, flight_id, field.name(), &value)?;
        writeln!(self.output, "Flight {flight_id} updated successfully!")?;
        Ok(())
    }

    fn assign_pilot(&mut self) -> Result<()> {
        let flight_id = self.prompt_id("Enter flight id: ")?;
        let pilot_id = self.prompt_id("Enter pilot id: ")?;
        let role: Role = self.prompt("Enter role (Captain or First Officer): ")?.parse()?;

        self.store.assign_pilot(flight_id, pilot_id, role)?;
        writeln!(
            self.output,
            "Pilot {pilot_id} assigned to flight {flight_id} as {role}."
        )?;
        Ok(())
    }

    fn pilot_schedule(&mut self) -> Result<()> {
        let selector: PilotSelector = self
            .prompt("Enter a pilot id, or ALL for every pilot: ")?
            .parse()?;
        let schedule = self.store.pilot_schedule(selector)?;

        let empty = match selector {
            PilotSelector::All => "No pilots are assigned to any flight.".to_string(),
            PilotSelector::One(id) => format!("Pilot {id} is not assigned to any flight."),
        };
        render(&mut self.output, &schedule, self.format, &empty)
    }

    fn destination_flights(&mut self) -> Result<()> {
        let iata = self.prompt_iata("Enter destination airport (IATA code): ")?;
        let airport = self.store.get_airport(&iata)?;
        let flights = self.store.flights_to_destination(&iata)?;

        writeln!(
            self.output,
            "{} - {}, {} ({})",
            airport.iata, airport.city, airport.country, airport.timezone
        )?;
        render(
            &mut self.output,
            &flights,
            self.format,
            &format!("No flights arrive at {iata}."),
        )
    }

    fn update_destination(&mut self) -> Result<()> {
        let iata = self.prompt_iata("Enter airport (IATA code): ")?;
        // Report a missing airport before asking for the field.
        self.store.get_airport(&iata)?;

        let names: Vec<&str> = AirportField::ALL.iter().map(|f| f.name()).collect();
        let field: AirportField = self
            .prompt(&format!("Enter the field to update ({}): ", names.join(", ")))?
            .parse()?;
        let value = self.prompt(&format!("Enter new {field}: "))?;

        self.store
            .update_airport_field(&iata, field.name(), &value)?;
        writeln!(self.output, "Airport {iata} updated successfully!")?;
        Ok(())
    }
}

fn is_end_of_input(err: &Error) -> bool {
    matches!(err, Error::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
}
