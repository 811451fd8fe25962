//! Storage layer for flightrecords.
//!
//! This module provides the `SQLite`-backed flight records store: CRUD over
//! flights and reference data, pilot assignments, and the reporting joins.
//!
//! Referential rules are enforced here rather than left to callers:
//! - new or edited flights must point at an existing aircraft and airports
//! - removing a flight removes its crew assignments
//! - a flight holds at most one Captain

pub mod fields;
pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, ToSql};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{
    Aircraft, Airport, Assignment, DestinationFlight, Flight, NewFlight, Pilot, PilotSelector,
    Role, ScheduleEntry,
};

use fields::{AirportField, FieldValue, FlightField};
use schema::FLIGHT_COLUMNS;

/// Flight records store.
///
/// Owns one database connection for the lifetime of a session; the
/// connection is closed when the store is dropped. Every write runs in its
/// own transaction, so a rejected operation leaves the dataset untouched.
#[derive(Debug)]
pub struct FlightStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl FlightStore {
    /// Open or create a flight records database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::prepare(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::prepare(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    fn prepare(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::initialize_schema(conn)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    // === Flights ===

    /// Every flight, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_flights(&self) -> Result<Vec<Flight>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {FLIGHT_COLUMNS} FROM Flights ORDER BY rowid"))?;
        let flights = stmt
            .query_map([], Self::row_to_flight)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(flights)
    }

    /// Flights whose `field` equals `value` exactly.
    ///
    /// `field` is any name accepted by [`FlightField`]. No match yields an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] for an unrecognized field,
    /// [`Error::InvalidValue`] for non-integer text on an integer field, or
    /// an error if the database operation fails.
    pub fn find_flights(&self, field: &str, value: &str) -> Result<Vec<Flight>> {
        let field: FlightField = field.parse()?;
        let value = field.parse_value(value)?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM Flights WHERE {} = ?1 ORDER BY rowid",
            field.column()
        ))?;
        let flights = stmt
            .query_map([&value], Self::row_to_flight)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("{} = {} matched {} flights", field, value, flights.len());
        Ok(flights)
    }

    /// Get a flight by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such flight exists.
    pub fn get_flight(&self, flight_id: i64) -> Result<Flight> {
        self.conn
            .query_row(
                &format!("SELECT {FLIGHT_COLUMNS} FROM Flights WHERE Flight_ID = ?1"),
                [flight_id],
                Self::row_to_flight,
            )
            .optional()?
            .ok_or_else(|| Error::not_found("flight", flight_id))
    }

    /// The id the next added flight will receive: one past the largest
    /// existing id, or 1 for an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn next_flight_id(&self) -> Result<i64> {
        next_flight_id(&self.conn)
    }

    /// Add a flight under the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the aircraft or either airport does not
    /// exist, or an error if the database operation fails.
    pub fn add_flight(&self, flight: NewFlight) -> Result<Flight> {
        let tx = self.conn.unchecked_transaction()?;

        check_flight_references(
            &tx,
            flight.aircraft_id,
            &flight.departure_airport,
            &flight.arrival_airport,
        )?;
        let flight = flight.with_id(next_flight_id(&tx)?);
        insert_flight_row(&tx, &flight)?;

        tx.commit()?;
        info!(
            "Added flight {} ({} {} -> {})",
            flight.flight_id, flight.flight_number, flight.departure_airport, flight.arrival_airport
        );
        Ok(flight)
    }

    /// Insert a flight under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightIdTaken`] if the id is in use,
    /// [`Error::NotFound`] for a missing aircraft or airport, or an error if
    /// the database operation fails.
    pub fn insert_flight(&self, flight: &Flight) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        if flight_exists(&tx, flight.flight_id)? {
            return Err(Error::FlightIdTaken(flight.flight_id));
        }
        check_flight_references(
            &tx,
            flight.aircraft_id,
            &flight.departure_airport,
            &flight.arrival_airport,
        )?;
        insert_flight_row(&tx, flight)?;

        tx.commit()?;
        debug!("Inserted flight {}", flight.flight_id);
        Ok(())
    }

    /// Remove a flight and its crew assignments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such flight exists, or an error if
    /// the database operation fails.
    pub fn remove_flight(&self, flight_id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        if !flight_exists(&tx, flight_id)? {
            return Err(Error::not_found("flight", flight_id));
        }
        let crew = tx.execute("DELETE FROM Flight_Pilot WHERE Flight_ID = ?1", [flight_id])?;
        tx.execute("DELETE FROM Flights WHERE Flight_ID = ?1", [flight_id])?;

        tx.commit()?;
        info!("Removed flight {} and {} crew assignments", flight_id, crew);
        Ok(())
    }

    /// Overwrite a single column of one flight.
    ///
    /// Changing `FlightID` carries the flight's assignments over to the new id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the flight (or a referenced aircraft or
    /// airport) does not exist, [`Error::InvalidField`] for an unrecognized
    /// field, [`Error::InvalidValue`] for a badly typed value,
    /// [`Error::FlightIdTaken`] when renumbering onto an existing id, or an
    /// error if the database operation fails.
    pub fn update_flight_field(&self, flight_id: i64, field: &str, value: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        if !flight_exists(&tx, flight_id)? {
            return Err(Error::not_found("flight", flight_id));
        }
        let field: FlightField = field.parse()?;
        let value = field.parse_value(value)?;

        match (field, &value) {
            (FlightField::FlightId, FieldValue::Integer(new_id)) => {
                if *new_id != flight_id && flight_exists(&tx, *new_id)? {
                    return Err(Error::FlightIdTaken(*new_id));
                }
            }
            (FlightField::AircraftId, FieldValue::Integer(aircraft_id)) => {
                ensure_aircraft(&tx, *aircraft_id)?;
            }
            (f, FieldValue::Text(code)) if f.is_airport() => ensure_airport(&tx, code)?,
            _ => {}
        }

        tx.execute(
            &format!("UPDATE Flights SET {} = ?1 WHERE Flight_ID = ?2", field.column()),
            params![value, flight_id],
        )?;
        if let (FlightField::FlightId, FieldValue::Integer(new_id)) = (field, &value) {
            // Covered by ON UPDATE CASCADE on current schemas; older datasets
            // have no foreign key on Flight_Pilot.
            tx.execute(
                "UPDATE Flight_Pilot SET Flight_ID = ?1 WHERE Flight_ID = ?2",
                [*new_id, flight_id],
            )?;
        }

        tx.commit()?;
        info!("Updated flight {}: {} = {}", flight_id, field, value);
        Ok(())
    }

    // === Assignments ===

    /// Bind a pilot to a flight in the given role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the flight or pilot does not exist,
    /// [`Error::AlreadyAssigned`] if the pilot is already on the flight,
    /// [`Error::CaptainAlreadyAssigned`] when adding a second Captain, or an
    /// error if the database operation fails.
    pub fn assign_pilot(&self, flight_id: i64, pilot_id: i64, role: Role) -> Result<Assignment> {
        let tx = self.conn.unchecked_transaction()?;

        if !flight_exists(&tx, flight_id)? {
            return Err(Error::not_found("flight", flight_id));
        }
        if !pilot_exists(&tx, pilot_id)? {
            return Err(Error::not_found("pilot", pilot_id));
        }
        if assignment_exists(&tx, flight_id, pilot_id)? {
            warn!("Pilot {} is already assigned to flight {}", pilot_id, flight_id);
            return Err(Error::AlreadyAssigned {
                flight_id,
                pilot_id,
            });
        }
        if role == Role::Captain && has_captain(&tx, flight_id)? {
            warn!("Flight {} already has a Captain", flight_id);
            return Err(Error::CaptainAlreadyAssigned { flight_id });
        }

        tx.execute(
            "INSERT INTO Flight_Pilot (Flight_ID, Pilot_ID, Role) VALUES (?1, ?2, ?3)",
            params![flight_id, pilot_id, role],
        )?;

        tx.commit()?;
        info!("Assigned pilot {} to flight {} as {}", pilot_id, flight_id, role);
        Ok(Assignment {
            flight_id,
            pilot_id,
            role,
        })
    }

    /// Remove a pilot from a flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the pilot is not assigned to the
    /// flight, or an error if the database operation fails.
    pub fn unassign_pilot(&self, flight_id: i64, pilot_id: i64) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM Flight_Pilot WHERE Flight_ID = ?1 AND Pilot_ID = ?2",
            [flight_id, pilot_id],
        )?;
        if affected == 0 {
            return Err(Error::not_found(
                "assignment",
                format!("flight {flight_id} / pilot {pilot_id}"),
            ));
        }
        info!("Unassigned pilot {} from flight {}", pilot_id, flight_id);
        Ok(())
    }

    /// The crew assigned to one flight, Captain first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the flight does not exist, or an error
    /// if the database operation fails. A stored role other than Captain or
    /// First Officer fails the whole listing with a conversion error naming
    /// it.
    pub fn flight_crew(&self, flight_id: i64) -> Result<Vec<Assignment>> {
        if !flight_exists(&self.conn, flight_id)? {
            return Err(Error::not_found("flight", flight_id));
        }

        let mut stmt = self.conn.prepare(
            r"
            SELECT Flight_ID, Pilot_ID, Role FROM Flight_Pilot
            WHERE Flight_ID = ?1
            ORDER BY Role = 'Captain' DESC, Pilot_ID
            ",
        )?;
        let crew = stmt
            .query_map([flight_id], |row| {
                Ok(Assignment {
                    flight_id: row.get(0)?,
                    pilot_id: row.get(1)?,
                    role: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(crew)
    }

    /// Ids of flights with no Captain assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn flights_without_captain(&self) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT f.Flight_ID FROM Flights f
            WHERE NOT EXISTS (
                SELECT 1 FROM Flight_Pilot fp
                WHERE fp.Flight_ID = f.Flight_ID AND fp.Role = 'Captain'
            )
            ORDER BY f.Flight_ID
            ",
        )?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Flights flown by one pilot or by every pilot, ordered by pilot then
    /// flight id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if a selected pilot does not exist, or an
    /// error if the database operation fails.
    pub fn pilot_schedule(&self, selector: PilotSelector) -> Result<Vec<ScheduleEntry>> {
        let pilot_filter = match selector {
            PilotSelector::All => None,
            PilotSelector::One(pilot_id) => {
                if !pilot_exists(&self.conn, pilot_id)? {
                    return Err(Error::not_found("pilot", pilot_id));
                }
                Some(pilot_id)
            }
        };

        let mut stmt = self.conn.prepare(
            r"
            SELECT p.Pilot_ID, p.Full_Name, f.Flight_ID, f.Flight_Number, f.Departure,
                   f.Arrival, f.Flight_Status, f.Departure_Airport_IATA, f.Arrival_Airport_IATA
            FROM Pilots p
            JOIN Flight_Pilot fp ON fp.Pilot_ID = p.Pilot_ID
            JOIN Flights f ON f.Flight_ID = fp.Flight_ID
            WHERE ?1 IS NULL OR p.Pilot_ID = ?1
            ORDER BY p.Pilot_ID, f.Flight_ID
            ",
        )?;
        let schedule = stmt
            .query_map([pilot_filter], |row| {
                Ok(ScheduleEntry {
                    pilot_id: row.get(0)?,
                    full_name: row.get(1)?,
                    flight_id: row.get(2)?,
                    flight_number: row.get(3)?,
                    departure: row.get(4)?,
                    arrival: row.get(5)?,
                    status: row.get(6)?,
                    departure_airport: row.get(7)?,
                    arrival_airport: row.get(8)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Schedule for {} has {} entries", selector, schedule.len());
        Ok(schedule)
    }

    // === Reference data ===

    /// Insert an airport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if the IATA code exists, or an error if
    /// the database operation fails.
    pub fn insert_airport(&self, airport: &Airport) -> Result<()> {
        if airport_exists(&self.conn, &airport.iata)? {
            return Err(Error::duplicate("airport", &airport.iata));
        }
        self.conn.execute(
            "INSERT INTO Airport (Airport_IATA, City, Country, Timezone) VALUES (?1, ?2, ?3, ?4)",
            params![airport.iata, airport.city, airport.country, airport.timezone],
        )?;
        debug!("Inserted airport {}", airport.iata);
        Ok(())
    }

    /// Insert an aircraft.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if the id exists, or an error if the
    /// database operation fails.
    pub fn insert_aircraft(&self, aircraft: &Aircraft) -> Result<()> {
        if aircraft_exists(&self.conn, aircraft.aircraft_id)? {
            return Err(Error::duplicate("aircraft", aircraft.aircraft_id));
        }
        self.conn.execute(
            r"
            INSERT INTO Aircraft (Aircraft_ID, Aircraft_Model, Age, Registration_Number)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                aircraft.aircraft_id,
                aircraft.model,
                aircraft.age,
                aircraft.registration_number,
            ],
        )?;
        debug!("Inserted aircraft {}", aircraft.aircraft_id);
        Ok(())
    }

    /// Insert a pilot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if the id exists, or an error if the
    /// database operation fails.
    pub fn insert_pilot(&self, pilot: &Pilot) -> Result<()> {
        if pilot_exists(&self.conn, pilot.pilot_id)? {
            return Err(Error::duplicate("pilot", pilot.pilot_id));
        }
        self.conn.execute(
            r"
            INSERT INTO Pilots (Pilot_ID, Full_Name, Licence_Number, Rank, Years_Of_Experience)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                pilot.pilot_id,
                pilot.full_name,
                pilot.licence_number,
                pilot.rank,
                pilot.years_of_experience,
            ],
        )?;
        debug!("Inserted pilot {}", pilot.pilot_id);
        Ok(())
    }

    /// Every airport, by IATA code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_airports(&self) -> Result<Vec<Airport>> {
        let mut stmt = self.conn.prepare(
            "SELECT Airport_IATA, City, Country, Timezone FROM Airport ORDER BY Airport_IATA",
        )?;
        let airports = stmt
            .query_map([], Self::row_to_airport)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(airports)
    }

    /// Get an airport by IATA code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such airport exists.
    pub fn get_airport(&self, iata: &str) -> Result<Airport> {
        self.conn
            .query_row(
                "SELECT Airport_IATA, City, Country, Timezone FROM Airport WHERE Airport_IATA = ?1",
                [iata],
                Self::row_to_airport,
            )
            .optional()?
            .ok_or_else(|| Error::not_found("airport", iata))
    }

    /// Every aircraft, by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_aircraft(&self) -> Result<Vec<Aircraft>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT Aircraft_ID, Aircraft_Model, Age, Registration_Number
            FROM Aircraft ORDER BY Aircraft_ID
            ",
        )?;
        let aircraft = stmt
            .query_map([], |row| {
                Ok(Aircraft {
                    aircraft_id: row.get(0)?,
                    model: row.get(1)?,
                    age: row.get(2)?,
                    registration_number: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(aircraft)
    }

    /// Every pilot, by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails, including a stored
    /// rank other than Captain or First Officer, which is named in the
    /// message.
    pub fn list_pilots(&self) -> Result<Vec<Pilot>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT Pilot_ID, Full_Name, Licence_Number, Rank, Years_Of_Experience
            FROM Pilots ORDER BY Pilot_ID
            ",
        )?;
        let pilots = stmt
            .query_map([], |row| {
                Ok(Pilot {
                    pilot_id: row.get(0)?,
                    full_name: row.get(1)?,
                    licence_number: row.get(2)?,
                    rank: row.get(3)?,
                    years_of_experience: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pilots)
    }

    /// Overwrite one descriptive column of an airport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the airport does not exist,
    /// [`Error::InvalidField`] for an unrecognized field, or an error if the
    /// database operation fails.
    pub fn update_airport_field(&self, iata: &str, field: &str, value: &str) -> Result<()> {
        if !airport_exists(&self.conn, iata)? {
            return Err(Error::not_found("airport", iata));
        }
        let field: AirportField = field.parse()?;

        self.conn.execute(
            &format!("UPDATE Airport SET {} = ?1 WHERE Airport_IATA = ?2", field.column()),
            params![value, iata],
        )?;
        info!("Updated airport {}: {} = {}", iata, field, value);
        Ok(())
    }

    /// Flights arriving at an airport, with the origin city, by arrival time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the airport does not exist, or an error
    /// if the database operation fails.
    pub fn flights_to_destination(&self, iata: &str) -> Result<Vec<DestinationFlight>> {
        if !airport_exists(&self.conn, iata)? {
            return Err(Error::not_found("airport", iata));
        }

        let mut stmt = self.conn.prepare(
            r"
            SELECT f.Flight_ID, f.Flight_Number, f.Airline_Name, f.Departure_Airport_IATA,
                   COALESCE(o.City, ''), f.Arrival, f.Flight_Status
            FROM Flights f
            LEFT JOIN Airport o ON o.Airport_IATA = f.Departure_Airport_IATA
            WHERE f.Arrival_Airport_IATA = ?1
            ORDER BY f.Arrival, f.Flight_ID
            ",
        )?;
        let flights = stmt
            .query_map([iata], |row| {
                Ok(DestinationFlight {
                    flight_id: row.get(0)?,
                    flight_number: row.get(1)?,
                    airline_name: row.get(2)?,
                    origin: row.get(3)?,
                    origin_city: row.get(4)?,
                    arrival: row.get(5)?,
                    status: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(flights)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let count = |table: &str| -> Result<i64> {
            let n = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            airports: count("Airport")?,
            aircraft: count("Aircraft")?,
            pilots: count("Pilots")?,
            flights: count("Flights")?,
            assignments: count("Flight_Pilot")?,
            db_size_bytes,
        })
    }

    /// Convert a database row to a Flight struct.
    fn row_to_flight(row: &rusqlite::Row) -> rusqlite::Result<Flight> {
        Ok(Flight {
            flight_id: row.get(0)?,
            flight_number: row.get(1)?,
            airline_name: row.get(2)?,
            aircraft_id: row.get(3)?,
            departure: row.get(4)?,
            arrival: row.get(5)?,
            status: row.get(6)?,
            departure_airport: row.get(7)?,
            arrival_airport: row.get(8)?,
        })
    }

    fn row_to_airport(row: &rusqlite::Row) -> rusqlite::Result<Airport> {
        Ok(Airport {
            iata: row.get(0)?,
            city: row.get(1)?,
            country: row.get(2)?,
            timezone: row.get(3)?,
        })
    }
}

/// Row counts and file size of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of airports.
    pub airports: i64,
    /// Number of aircraft.
    pub aircraft: i64,
    /// Number of pilots.
    pub pilots: i64,
    /// Number of flights.
    pub flights: i64,
    /// Number of flight/pilot assignments.
    pub assignments: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

fn exists(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<bool> {
    Ok(conn.query_row(sql, params, |_| Ok(())).optional()?.is_some())
}

fn flight_exists(conn: &Connection, flight_id: i64) -> Result<bool> {
    exists(conn, "SELECT 1 FROM Flights WHERE Flight_ID = ?1", [flight_id])
}

fn pilot_exists(conn: &Connection, pilot_id: i64) -> Result<bool> {
    exists(conn, "SELECT 1 FROM Pilots WHERE Pilot_ID = ?1", [pilot_id])
}

fn aircraft_exists(conn: &Connection, aircraft_id: i64) -> Result<bool> {
    exists(conn, "SELECT 1 FROM Aircraft WHERE Aircraft_ID = ?1", [aircraft_id])
}

fn airport_exists(conn: &Connection, iata: &str) -> Result<bool> {
    exists(conn, "SELECT 1 FROM Airport WHERE Airport_IATA = ?1", [iata])
}

fn assignment_exists(conn: &Connection, flight_id: i64, pilot_id: i64) -> Result<bool> {
    exists(
        conn,
        "SELECT 1 FROM Flight_Pilot WHERE Flight_ID = ?1 AND Pilot_ID = ?2",
        [flight_id, pilot_id],
    )
}

fn has_captain(conn: &Connection, flight_id: i64) -> Result<bool> {
    exists(
        conn,
        "SELECT 1 FROM Flight_Pilot WHERE Flight_ID = ?1 AND Role = ?2",
        params![flight_id, Role::Captain],
    )
}

fn ensure_aircraft(conn: &Connection, aircraft_id: i64) -> Result<()> {
    if aircraft_exists(conn, aircraft_id)? {
        Ok(())
    } else {
        Err(Error::not_found("aircraft", aircraft_id))
    }
}

fn ensure_airport(conn: &Connection, iata: &str) -> Result<()> {
    if airport_exists(conn, iata)? {
        Ok(())
    } else {
        Err(Error::not_found("airport", iata))
    }
}

fn check_flight_references(
    conn: &Connection,
    aircraft_id: i64,
    departure_airport: &str,
    arrival_airport: &str,
) -> Result<()> {
    ensure_aircraft(conn, aircraft_id)?;
    ensure_airport(conn, departure_airport)?;
    ensure_airport(conn, arrival_airport)
}

fn next_flight_id(conn: &Connection) -> Result<i64> {
    let max: Option<i64> = conn.query_row("SELECT MAX(Flight_ID) FROM Flights", [], |row| {
        row.get(0)
    })?;
    Ok(max.map_or(1, |id| id + 1))
}

fn insert_flight_row(conn: &Connection, flight: &Flight) -> Result<()> {
    let values: [&dyn ToSql; 9] = [
        &flight.flight_id,
        &flight.flight_number,
        &flight.airline_name,
        &flight.aircraft_id,
        &flight.departure,
        &flight.arrival,
        &flight.status,
        &flight.departure_airport,
        &flight.arrival_airport,
    ];
    conn.execute(
        &format!(
            "INSERT INTO Flights ({FLIGHT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        values.as_slice(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{STATUS_CANCELLED, STATUS_DELAYED, STATUS_ON_TIME};

    fn create_test_store() -> FlightStore {
        FlightStore::open_in_memory().expect("failed to create test store")
    }

    fn airport(iata: &str, city: &str) -> Airport {
        Airport {
            iata: iata.to_string(),
            city: city.to_string(),
            country: "USA".to_string(),
            timezone: "UTC-05:00".to_string(),
        }
    }

    fn pilot(pilot_id: i64, name: &str, rank: Role) -> Pilot {
        Pilot {
            pilot_id,
            full_name: name.to_string(),
            licence_number: pilot_id * 11_111,
            rank,
            years_of_experience: 10,
        }
    }

    /// A store holding three airports, two aircraft and three pilots.
    fn create_seeded_store() -> FlightStore {
        let store = create_test_store();
        store.insert_airport(&airport("JFK", "New York")).unwrap();
        store.insert_airport(&airport("LAX", "Los Angeles")).unwrap();
        store.insert_airport(&airport("ORD", "Chicago")).unwrap();
        for (id, model) in [(1, "Boeing 737"), (2, "Airbus A320")] {
            store
                .insert_aircraft(&Aircraft {
                    aircraft_id: id,
                    model: model.to_string(),
                    age: 8,
                    registration_number: Some(12_345 + id),
                })
                .unwrap();
        }
        store.insert_pilot(&pilot(1, "John Doe", Role::Captain)).unwrap();
        store
            .insert_pilot(&pilot(2, "Jane Smith", Role::FirstOfficer))
            .unwrap();
        store.insert_pilot(&pilot(3, "Jim Brown", Role::Captain)).unwrap();
        store
    }

    fn new_flight(flight_number: i64, from: &str, to: &str, status: &str) -> NewFlight {
        NewFlight {
            flight_number,
            airline_name: "Test Air".to_string(),
            aircraft_id: 1,
            departure_airport: from.to_string(),
            arrival_airport: to.to_string(),
            departure: "2024-01-01T08:00".to_string(),
            arrival: "2024-01-01T11:00".to_string(),
            status: status.to_string(),
        }
    }

    fn add(store: &FlightStore, flight_number: i64, status: &str) -> Flight {
        store
            .add_flight(new_flight(flight_number, "JFK", "LAX", status))
            .unwrap()
    }

    #[test]
    fn test_open_in_memory() {
        let store = FlightStore::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let store = create_test_store();
        let enabled: i64 = store
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_next_flight_id_empty() {
        let store = create_test_store();
        assert_eq!(store.next_flight_id().unwrap(), 1);
    }

    #[test]
    fn test_next_flight_id_after_gaps() {
        let store = create_seeded_store();
        for id in [1, 3, 7] {
            let flight = new_flight(1000 + id, "JFK", "LAX", STATUS_ON_TIME).with_id(id);
            store.insert_flight(&flight).unwrap();
        }
        assert_eq!(store.next_flight_id().unwrap(), 8);
    }

    #[test]
    fn test_add_flight_assigns_sequential_ids() {
        let store = create_seeded_store();
        assert_eq!(add(&store, 1001, STATUS_ON_TIME).flight_id, 1);
        assert_eq!(add(&store, 1002, STATUS_ON_TIME).flight_id, 2);
        assert_eq!(store.list_flights().unwrap().len(), 2);
    }

    #[test]
    fn test_add_flight_unknown_aircraft() {
        let store = create_seeded_store();
        let mut flight = new_flight(1001, "JFK", "LAX", STATUS_ON_TIME);
        flight.aircraft_id = 99;

        let err = store.add_flight(flight).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "aircraft", .. }));
        assert!(store.list_flights().unwrap().is_empty());
    }

    #[test]
    fn test_add_flight_unknown_airport() {
        let store = create_seeded_store();
        let err = store
            .add_flight(new_flight(1001, "JFK", "SYD", STATUS_ON_TIME))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "airport", .. }));
    }

    #[test]
    fn test_add_flight_same_departure_and_arrival_allowed() {
        let store = create_seeded_store();
        let flight = store
            .add_flight(new_flight(1001, "JFK", "JFK", STATUS_ON_TIME))
            .unwrap();
        assert_eq!(flight.departure_airport, flight.arrival_airport);
    }

    #[test]
    fn test_insert_flight_id_taken() {
        let store = create_seeded_store();
        let flight = add(&store, 1001, STATUS_ON_TIME);
        let err = store.insert_flight(&flight).unwrap_err();
        assert!(matches!(err, Error::FlightIdTaken(1)));
    }

    #[test]
    fn test_list_flights_storage_order() {
        let store = create_seeded_store();
        for id in [5, 2, 9] {
            let flight = new_flight(1000 + id, "JFK", "LAX", STATUS_ON_TIME).with_id(id);
            store.insert_flight(&flight).unwrap();
        }
        let ids: Vec<i64> = store
            .list_flights()
            .unwrap()
            .iter()
            .map(|f| f.flight_id)
            .collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_find_flights_by_status() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_CANCELLED);
        add(&store, 1003, STATUS_DELAYED);
        add(&store, 1004, STATUS_CANCELLED);

        let cancelled = store.find_flights("FlightStatus", "Cancelled").unwrap();
        assert_eq!(cancelled.len(), 2);
        assert!(cancelled.iter().all(|f| f.status == STATUS_CANCELLED));
        let numbers: Vec<i64> = cancelled.iter().map(|f| f.flight_number).collect();
        assert_eq!(numbers, vec![1002, 1004]);
    }

    #[test]
    fn test_find_flights_exact_match_only() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_CANCELLED);
        assert!(store.find_flights("FlightStatus", "cancelled").unwrap().is_empty());
        assert!(store.find_flights("FlightStatus", "Cancel").unwrap().is_empty());
    }

    #[test]
    fn test_find_flights_invalid_field() {
        let store = create_seeded_store();
        let err = store.find_flights("NotAColumn", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidField { .. }));
    }

    #[test]
    fn test_find_flights_integer_field() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_ON_TIME);

        let found = store.find_flights("Flight_Number", "1002").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].flight_id, 2);

        let err = store.find_flights("FlightID", "two").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn test_find_flights_no_match_is_empty() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        assert!(store.find_flights("ArrivalAirport", "ORD").unwrap().is_empty());
    }

    #[test]
    fn test_get_flight_missing() {
        let store = create_test_store();
        assert!(store.get_flight(1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_flight() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        let doomed = add(&store, 1002, STATUS_ON_TIME);
        let before = store.list_flights().unwrap().len();

        store.remove_flight(doomed.flight_id).unwrap();

        let after = store.list_flights().unwrap();
        assert_eq!(after.len(), before - 1);
        assert!(after.iter().all(|f| f.flight_id != doomed.flight_id));
    }

    #[test]
    fn test_remove_flight_missing() {
        let store = create_seeded_store();
        let err = store.remove_flight(42).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "flight", .. }));
    }

    #[test]
    fn test_remove_flight_removes_assignments() {
        let store = create_seeded_store();
        let flight = add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(flight.flight_id, 1, Role::Captain).unwrap();
        store
            .assign_pilot(flight.flight_id, 2, Role::FirstOfficer)
            .unwrap();

        store.remove_flight(flight.flight_id).unwrap();

        assert_eq!(store.stats().unwrap().assignments, 0);
        assert!(store.pilot_schedule(PilotSelector::One(1)).unwrap().is_empty());
    }

    #[test]
    fn test_update_flight_field() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        let before = store.get_flight(1).unwrap();

        store.update_flight_field(1, "AirlineName", "New Air").unwrap();

        let after = store.get_flight(1).unwrap();
        assert_eq!(after.airline_name, "New Air");
        assert_eq!(
            Flight {
                airline_name: before.airline_name.clone(),
                ..after
            },
            before
        );
    }

    #[test]
    fn test_update_flight_field_missing_flight() {
        let store = create_seeded_store();
        let err = store
            .update_flight_field(7, "FlightStatus", STATUS_DELAYED)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_flight_missing_flight_reported_before_field() {
        let store = create_seeded_store();
        let err = store.update_flight_field(7, "NotAColumn", "x").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_flight_field_invalid_field() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        let err = store.update_flight_field(1, "Gate", "B12").unwrap_err();
        assert!(matches!(err, Error::InvalidField { .. }));
    }

    #[test]
    fn test_update_flight_field_checks_references() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);

        let err = store.update_flight_field(1, "AircraftID", "99").unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "aircraft", .. }));
        let err = store
            .update_flight_field(1, "ArrivalAirport", "SYD")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "airport", .. }));

        store.update_flight_field(1, "ArrivalAirport", "ORD").unwrap();
        store.update_flight_field(1, "AircraftID", "2").unwrap();
        let flight = store.get_flight(1).unwrap();
        assert_eq!(flight.arrival_airport, "ORD");
        assert_eq!(flight.aircraft_id, 2);
    }

    #[test]
    fn test_update_flight_id_moves_assignments() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 1, Role::Captain).unwrap();

        store.update_flight_field(1, "FlightID", "50").unwrap();

        assert!(store.get_flight(1).unwrap_err().is_not_found());
        assert_eq!(store.get_flight(50).unwrap().flight_number, 1001);
        let crew = store.flight_crew(50).unwrap();
        assert_eq!(crew.len(), 1);
        assert_eq!(crew[0].pilot_id, 1);
        assert_eq!(store.next_flight_id().unwrap(), 51);
    }

    #[test]
    fn test_update_flight_id_taken() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_ON_TIME);
        let err = store.update_flight_field(1, "FlightID", "2").unwrap_err();
        assert!(matches!(err, Error::FlightIdTaken(2)));
    }

    #[test]
    fn test_assign_pilot() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);

        let assignment = store.assign_pilot(1, 2, Role::FirstOfficer).unwrap();
        assert_eq!(assignment.role, Role::FirstOfficer);
        assert_eq!(store.flight_crew(1).unwrap(), vec![assignment]);
    }

    #[test]
    fn test_assign_pilot_twice() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 1, Role::Captain).unwrap();

        let err = store.assign_pilot(1, 1, Role::Captain).unwrap_err();
        assert!(matches!(
            err,
            Error::AlreadyAssigned {
                flight_id: 1,
                pilot_id: 1
            }
        ));
        let pair_rows: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM Flight_Pilot WHERE Flight_ID = 1 AND Pilot_ID = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(pair_rows, 1);
    }

    #[test]
    fn test_assign_pilot_missing_flight_then_pilot() {
        let store = create_seeded_store();
        let err = store.assign_pilot(9, 99, Role::Captain).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "flight", .. }));

        add(&store, 1001, STATUS_ON_TIME);
        let err = store.assign_pilot(1, 99, Role::Captain).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "pilot", .. }));
    }

    #[test]
    fn test_assign_second_captain_rejected() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 1, Role::Captain).unwrap();

        let err = store.assign_pilot(1, 3, Role::Captain).unwrap_err();
        assert!(matches!(err, Error::CaptainAlreadyAssigned { flight_id: 1 }));

        // A second pilot in another role is fine.
        store.assign_pilot(1, 3, Role::FirstOfficer).unwrap();
        assert_eq!(store.flight_crew(1).unwrap().len(), 2);
    }

    #[test]
    fn test_flight_crew_captain_first() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 2, Role::FirstOfficer).unwrap();
        store.assign_pilot(1, 3, Role::Captain).unwrap();

        let crew = store.flight_crew(1).unwrap();
        assert_eq!(crew[0].role, Role::Captain);
        assert_eq!(crew[0].pilot_id, 3);
    }

    #[test]
    fn test_unassign_pilot() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 1, Role::Captain).unwrap();

        store.unassign_pilot(1, 1).unwrap();
        assert!(store.flight_crew(1).unwrap().is_empty());

        let err = store.unassign_pilot(1, 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_flights_without_captain() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_ON_TIME);
        add(&store, 1003, STATUS_ON_TIME);
        store.assign_pilot(2, 1, Role::Captain).unwrap();
        store.assign_pilot(3, 2, Role::FirstOfficer).unwrap();

        assert_eq!(store.flights_without_captain().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_pilot_schedule_single_pilot() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_DELAYED);
        add(&store, 1003, STATUS_ON_TIME);
        store.assign_pilot(3, 2, Role::FirstOfficer).unwrap();
        store.assign_pilot(1, 2, Role::FirstOfficer).unwrap();
        store.assign_pilot(2, 1, Role::Captain).unwrap();

        let schedule = store.pilot_schedule(PilotSelector::One(2)).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].flight_id, 1);
        assert_eq!(schedule[1].flight_id, 3);
        assert!(schedule.iter().all(|e| e.full_name == "Jane Smith"));
    }

    #[test]
    fn test_pilot_schedule_all_ordered() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        add(&store, 1002, STATUS_ON_TIME);
        store.assign_pilot(2, 3, Role::Captain).unwrap();
        store.assign_pilot(2, 1, Role::FirstOfficer).unwrap();
        store.assign_pilot(1, 3, Role::FirstOfficer).unwrap();

        let keys: Vec<(i64, i64)> = store
            .pilot_schedule(PilotSelector::All)
            .unwrap()
            .iter()
            .map(|e| (e.pilot_id, e.flight_id))
            .collect();
        assert_eq!(keys, vec![(1, 2), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_pilot_schedule_unknown_pilot() {
        let store = create_seeded_store();
        let err = store.pilot_schedule(PilotSelector::One(77)).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "pilot", .. }));
    }

    #[test]
    fn test_pilot_schedule_pilot_without_flights() {
        let store = create_seeded_store();
        assert!(store.pilot_schedule(PilotSelector::One(3)).unwrap().is_empty());
    }

    #[test]
    fn test_end_to_end_add_update_find() {
        let store = create_test_store();
        store.insert_airport(&airport("JFK", "New York")).unwrap();
        store
            .insert_aircraft(&Aircraft {
                aircraft_id: 1,
                model: "Boeing 737".to_string(),
                age: 10,
                registration_number: None,
            })
            .unwrap();

        let flight = store
            .add_flight(NewFlight {
                flight_number: 1001,
                airline_name: "Test Air".to_string(),
                aircraft_id: 1,
                departure_airport: "JFK".to_string(),
                arrival_airport: "JFK".to_string(),
                departure: "2024-01-01T08:00".to_string(),
                arrival: "2024-01-01T09:00".to_string(),
                status: STATUS_ON_TIME.to_string(),
            })
            .unwrap();
        assert_eq!(flight.flight_id, 1);

        store
            .update_flight_field(1, "FlightStatus", STATUS_DELAYED)
            .unwrap();
        let found = store.find_flights("FlightID", "1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, "Delayed");
    }

    #[test]
    fn test_insert_duplicate_reference_data() {
        let store = create_seeded_store();
        let err = store.insert_airport(&airport("JFK", "New York")).unwrap_err();
        assert!(matches!(err, Error::Duplicate { entity: "airport", .. }));
        let err = store
            .insert_pilot(&pilot(1, "John Doe", Role::Captain))
            .unwrap_err();
        assert!(matches!(err, Error::Duplicate { entity: "pilot", .. }));
    }

    #[test]
    fn test_list_reference_data() {
        let store = create_seeded_store();
        let iatas: Vec<String> = store
            .list_airports()
            .unwrap()
            .into_iter()
            .map(|a| a.iata)
            .collect();
        assert_eq!(iatas, vec!["JFK", "LAX", "ORD"]);
        assert_eq!(store.list_aircraft().unwrap().len(), 2);

        let pilots = store.list_pilots().unwrap();
        assert_eq!(pilots.len(), 3);
        assert_eq!(pilots[1].rank, Role::FirstOfficer);
    }

    #[test]
    fn test_update_airport_field() {
        let store = create_seeded_store();
        store.update_airport_field("ORD", "Timezone", "UTC-06:00").unwrap();
        assert_eq!(store.get_airport("ORD").unwrap().timezone, "UTC-06:00");

        let err = store.update_airport_field("SYD", "City", "Sydney").unwrap_err();
        assert!(err.is_not_found());
        let err = store.update_airport_field("ORD", "Runways", "8").unwrap_err();
        assert!(matches!(err, Error::InvalidField { entity: "airport", .. }));
    }

    #[test]
    fn test_flights_to_destination() {
        let store = create_seeded_store();
        let mut late = new_flight(1001, "ORD", "LAX", STATUS_ON_TIME);
        late.arrival = "2024-01-02T10:00".to_string();
        store.add_flight(late).unwrap();
        store
            .add_flight(new_flight(1002, "JFK", "LAX", STATUS_DELAYED))
            .unwrap();
        store
            .add_flight(new_flight(1003, "LAX", "JFK", STATUS_ON_TIME))
            .unwrap();

        let arrivals = store.flights_to_destination("LAX").unwrap();
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].flight_number, 1002);
        assert_eq!(arrivals[0].origin_city, "New York");
        assert_eq!(arrivals[1].origin, "ORD");

        let err = store.flights_to_destination("SYD").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_stats() {
        let store = create_seeded_store();
        add(&store, 1001, STATUS_ON_TIME);
        store.assign_pilot(1, 1, Role::Captain).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(
            stats,
            StoreStats {
                airports: 3,
                aircraft: 2,
                pilots: 3,
                flights: 1,
                assignments: 1,
                db_size_bytes: 0,
            }
        );
    }

    #[test]
    fn test_path() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("flightrecords_test_{}.db", std::process::id()));

        {
            let store = FlightStore::open(&db_path).unwrap();
            store.insert_airport(&airport("JFK", "New York")).unwrap();
            assert_eq!(store.path(), db_path);
            assert!(store.stats().unwrap().db_size_bytes > 0);
        }

        // Data survives reopening
        let store = FlightStore::open(&db_path).unwrap();
        assert_eq!(store.list_airports().unwrap().len(), 1);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let root = temp_dir.join(format!("flightrecords_test_{}", std::process::id()));
        let nested_path = root.join("nested/FlightManagement.db");
        let _ = std::fs::remove_dir_all(&root);

        let store = FlightStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_unknown_stored_rank_fails_listing() {
        let store = create_seeded_store();
        store
            .conn
            .execute(
                "INSERT INTO Pilots (Pilot_ID, Full_Name, Licence_Number, Rank, Years_Of_Experience) \
                 VALUES (9, 'Ann Lee', 99999, 'Navigator', 4)",
                [],
            )
            .unwrap();

        let err = store.list_pilots().unwrap_err();
        assert!(matches!(err, Error::DatabaseQuery(_)));
        assert!(err.to_string().contains("invalid role 'Navigator'"));
    }

    #[test]
    fn test_unknown_stored_role_fails_crew_listing() {
        let store = create_seeded_store();
        let flight = add(&store, 1001, STATUS_ON_TIME);
        store
            .conn
            .execute(
                "INSERT INTO Flight_Pilot (Flight_ID, Pilot_ID, Role) VALUES (?1, 1, 'Purser')",
                [flight.flight_id],
            )
            .unwrap();

        let err = store.flight_crew(flight.flight_id).unwrap_err();
        assert!(err.to_string().contains("Purser"));
    }
}
