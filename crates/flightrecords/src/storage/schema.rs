//! `SQLite` schema definitions for flightrecords.
//!
//! Table and column names follow the `FlightManagement.db` layout, so those
//! datasets open without a rebuild. Their rows keep whatever timestamp text
//! they were written with; only new writes are held to `YYYY-MM-DDTHH:MM`.

/// SQL statement to create the airport table.
pub const CREATE_AIRPORT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Airport (
    Airport_IATA TEXT PRIMARY KEY,
    City TEXT NOT NULL,
    Country TEXT NOT NULL,
    Timezone TEXT NOT NULL
)
";

/// SQL statement to create the aircraft table.
pub const CREATE_AIRCRAFT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Aircraft (
    Aircraft_ID INTEGER PRIMARY KEY,
    Aircraft_Model TEXT NOT NULL,
    Age INTEGER NOT NULL,
    Registration_Number INTEGER
)
";

/// SQL statement to create the pilots table.
pub const CREATE_PILOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Pilots (
    Pilot_ID INTEGER PRIMARY KEY,
    Full_Name TEXT NOT NULL,
    Licence_Number INTEGER NOT NULL,
    Rank TEXT NOT NULL,
    Years_Of_Experience INTEGER NOT NULL
)
";

/// SQL statement to create the flights table.
pub const CREATE_FLIGHTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Flights (
    Flight_ID INTEGER PRIMARY KEY,
    Flight_Number INTEGER NOT NULL,
    Airline_Name TEXT NOT NULL,
    Aircraft_ID INTEGER NOT NULL,
    Departure TEXT NOT NULL,
    Arrival TEXT NOT NULL,
    Flight_Status TEXT NOT NULL,
    Departure_Airport_IATA TEXT NOT NULL,
    Arrival_Airport_IATA TEXT NOT NULL,
    FOREIGN KEY(Aircraft_ID) REFERENCES Aircraft(Aircraft_ID),
    FOREIGN KEY(Departure_Airport_IATA) REFERENCES Airport(Airport_IATA),
    FOREIGN KEY(Arrival_Airport_IATA) REFERENCES Airport(Airport_IATA)
)
";

/// SQL statement to create the flight/pilot assignment table.
///
/// Assignments follow their flight on delete and on id change.
pub const CREATE_FLIGHT_PILOT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Flight_Pilot (
    Flight_ID INTEGER NOT NULL,
    Pilot_ID INTEGER NOT NULL,
    Role TEXT NOT NULL,
    PRIMARY KEY(Flight_ID, Pilot_ID),
    FOREIGN KEY(Flight_ID) REFERENCES Flights(Flight_ID) ON DELETE CASCADE ON UPDATE CASCADE,
    FOREIGN KEY(Pilot_ID) REFERENCES Pilots(Pilot_ID)
)
";

/// SQL statement to create an index for pilot schedule lookups.
pub const CREATE_ASSIGNMENT_PILOT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_flight_pilot_pilot ON Flight_Pilot(Pilot_ID, Flight_ID)
";

/// SQL statement to create an index for destination lookups.
pub const CREATE_ARRIVAL_AIRPORT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_flights_arrival_airport ON Flights(Arrival_Airport_IATA)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in dependency order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_AIRPORT_TABLE,
    CREATE_AIRCRAFT_TABLE,
    CREATE_PILOTS_TABLE,
    CREATE_FLIGHTS_TABLE,
    CREATE_FLIGHT_PILOT_TABLE,
    CREATE_ASSIGNMENT_PILOT_INDEX,
    CREATE_ARRIVAL_AIRPORT_INDEX,
    CREATE_METADATA_TABLE,
];

/// Columns selected for a full flight row, in [`crate::model::Flight`] order.
pub const FLIGHT_COLUMNS: &str = "Flight_ID, Flight_Number, Airline_Name, Aircraft_ID, \
     Departure, Arrival, Flight_Status, Departure_Airport_IATA, Arrival_Airport_IATA";
