//! Record types for the flight dataset.
//!
//! These mirror the five tables of the store: airports, aircraft, pilots,
//! flights, and the flight/pilot assignment join table, plus the row shapes
//! produced by the reporting joins.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Format of departure and arrival timestamps: ISO-8601, minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Status for a flight running to schedule.
pub const STATUS_ON_TIME: &str = "On Time";
/// Status for a flight running late.
pub const STATUS_DELAYED: &str = "Delayed";
/// Status for a flight that will not operate.
pub const STATUS_CANCELLED: &str = "Cancelled";

/// Well-known flight statuses. The store accepts any text.
pub const KNOWN_STATUSES: &[&str] = &[STATUS_ON_TIME, STATUS_DELAYED, STATUS_CANCELLED];

/// Crew role on a flight, also used as a pilot's rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Pilot in command.
    Captain,
    /// Second in command.
    #[serde(rename = "First Officer")]
    FirstOfficer,
}

impl Role {
    /// The text stored in the database for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Captain => "Captain",
            Self::FirstOfficer => "First Officer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "captain" => Ok(Self::Captain),
            "first officer" => Ok(Self::FirstOfficer),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Reads a `Role` or `Rank` column.
///
/// Text other than the two roles fails the conversion with the
/// [`Error::InvalidRole`] naming the stored value, so a single such row fails
/// the whole read it belongs to.
impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// An airport, keyed by IATA code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// Three-letter IATA code.
    pub iata: String,
    /// City served.
    pub city: String,
    /// Country.
    pub country: String,
    /// UTC offset, e.g. `UTC-05:00`.
    pub timezone: String,
}

/// An aircraft in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Fleet identifier.
    pub aircraft_id: i64,
    /// Manufacturer and model name.
    pub model: String,
    /// Age in years.
    pub age: i64,
    /// Registration number, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<i64>,
}

/// A pilot on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    /// Roster identifier.
    pub pilot_id: i64,
    /// Full name.
    pub full_name: String,
    /// Licence number.
    pub licence_number: i64,
    /// Rank held.
    pub rank: Role,
    /// Years of flying experience.
    pub years_of_experience: i64,
}

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Store-assigned identifier.
    pub flight_id: i64,
    /// Published flight number.
    pub flight_number: i64,
    /// Operating airline.
    pub airline_name: String,
    /// Aircraft flying the route.
    pub aircraft_id: i64,
    /// Departure time, `YYYY-MM-DDTHH:MM`.
    pub departure: String,
    /// Arrival time, `YYYY-MM-DDTHH:MM`.
    pub arrival: String,
    /// Free-text status, usually one of [`KNOWN_STATUSES`].
    pub status: String,
    /// IATA code of the origin.
    pub departure_airport: String,
    /// IATA code of the destination.
    pub arrival_airport: String,
}

/// Field values for a flight that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlight {
    /// Published flight number.
    pub flight_number: i64,
    /// Operating airline.
    pub airline_name: String,
    /// Aircraft flying the route.
    pub aircraft_id: i64,
    /// IATA code of the origin.
    pub departure_airport: String,
    /// IATA code of the destination.
    pub arrival_airport: String,
    /// Departure time, `YYYY-MM-DDTHH:MM`.
    pub departure: String,
    /// Arrival time, `YYYY-MM-DDTHH:MM`.
    pub arrival: String,
    /// Free-text status.
    pub status: String,
}

impl NewFlight {
    /// Attach an id, producing a full flight record.
    #[must_use]
    pub fn with_id(self, flight_id: i64) -> Flight {
        Flight {
            flight_id,
            flight_number: self.flight_number,
            airline_name: self.airline_name,
            aircraft_id: self.aircraft_id,
            departure: self.departure,
            arrival: self.arrival,
            status: self.status,
            departure_airport: self.departure_airport,
            arrival_airport: self.arrival_airport,
        }
    }
}

/// A pilot bound to a flight in a given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Flight flown.
    pub flight_id: i64,
    /// Pilot flying it.
    pub pilot_id: i64,
    /// Role on this flight.
    pub role: Role,
}

/// One row of a pilot schedule report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Pilot identifier.
    pub pilot_id: i64,
    /// Pilot name.
    pub full_name: String,
    /// Flight identifier.
    pub flight_id: i64,
    /// Published flight number.
    pub flight_number: i64,
    /// Departure time.
    pub departure: String,
    /// Arrival time.
    pub arrival: String,
    /// Flight status.
    pub status: String,
    /// Origin IATA code.
    pub departure_airport: String,
    /// Destination IATA code.
    pub arrival_airport: String,
}

/// One row of a destination arrivals report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationFlight {
    /// Flight identifier.
    pub flight_id: i64,
    /// Published flight number.
    pub flight_number: i64,
    /// Operating airline.
    pub airline_name: String,
    /// Origin IATA code.
    pub origin: String,
    /// City of the origin airport.
    pub origin_city: String,
    /// Arrival time.
    pub arrival: String,
    /// Flight status.
    pub status: String,
}

/// Which pilots a schedule report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PilotSelector {
    /// Every pilot with at least one assignment.
    #[default]
    All,
    /// A single pilot.
    One(i64),
}

impl FromStr for PilotSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::One)
            .map_err(|_| Error::invalid_input(format!("expected 'ALL' or a pilot id, got '{s}'")))
    }
}

impl fmt::Display for PilotSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::One(id) => write!(f, "{id}"),
        }
    }
}

/// Parse a `YYYY-MM-DDTHH:MM` timestamp.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the text is not in that format.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        Error::invalid_input(format!(
            "'{s}' is not a timestamp in YYYY-MM-DDTHH:MM format"
        ))
    })
}

/// Format a timestamp the way the store keeps it.
#[must_use]
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Upper-case an IATA code and check it is three ASCII letters.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for anything else.
pub fn normalize_iata(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(Error::invalid_input(format!(
            "'{code}' is not a three-letter IATA code"
        )))
    }
}
