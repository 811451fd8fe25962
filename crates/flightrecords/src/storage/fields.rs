//! Column selectors for field-addressed queries and updates.
//!
//! Operators name columns as free text. Those names are resolved here into
//! closed enums whose column names are compile-time constants, so no caller
//! text ever reaches SQL except as a bound parameter.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{ToSql, ToSqlOutput};

use crate::error::{Error, Result};
use crate::model::{format_timestamp, normalize_iata, parse_timestamp};

/// Lower-case a field name and drop separators, so `Flight_Status`,
/// `FlightStatus` and `flight status` all compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A typed value bound for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Value for an INTEGER column.
    Integer(i64),
    /// Value for a TEXT column.
    Text(String),
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Integer(i) => Ok(ToSqlOutput::from(*i)),
            Self::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The recognized columns of the flights table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightField {
    /// `Flight_ID`
    FlightId,
    /// `Flight_Number`
    FlightNumber,
    /// `Airline_Name`
    AirlineName,
    /// `Aircraft_ID`
    AircraftId,
    /// `Departure`
    Departure,
    /// `Arrival`
    Arrival,
    /// `Flight_Status`
    FlightStatus,
    /// `Departure_Airport_IATA`
    DepartureAirport,
    /// `Arrival_Airport_IATA`
    ArrivalAirport,
}

impl FlightField {
    /// Every flight field, in column order.
    pub const ALL: [Self; 9] = [
        Self::FlightId,
        Self::FlightNumber,
        Self::AirlineName,
        Self::AircraftId,
        Self::Departure,
        Self::Arrival,
        Self::FlightStatus,
        Self::DepartureAirport,
        Self::ArrivalAirport,
    ];

    /// The name operators use for this field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FlightId => "FlightID",
            Self::FlightNumber => "FlightNumber",
            Self::AirlineName => "AirlineName",
            Self::AircraftId => "AircraftID",
            Self::Departure => "Departure",
            Self::Arrival => "Arrival",
            Self::FlightStatus => "FlightStatus",
            Self::DepartureAirport => "DepartureAirport",
            Self::ArrivalAirport => "ArrivalAirport",
        }
    }

    /// The SQL column backing this field.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::FlightId => "Flight_ID",
            Self::FlightNumber => "Flight_Number",
            Self::AirlineName => "Airline_Name",
            Self::AircraftId => "Aircraft_ID",
            Self::Departure => "Departure",
            Self::Arrival => "Arrival",
            Self::FlightStatus => "Flight_Status",
            Self::DepartureAirport => "Departure_Airport_IATA",
            Self::ArrivalAirport => "Arrival_Airport_IATA",
        }
    }

    /// Whether the column holds integers.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::FlightId | Self::FlightNumber | Self::AircraftId)
    }

    /// Whether the column holds a departure or arrival timestamp.
    #[must_use]
    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::Departure | Self::Arrival)
    }

    /// Whether the column holds an airport code.
    #[must_use]
    pub fn is_airport(self) -> bool {
        matches!(self, Self::DepartureAirport | Self::ArrivalAirport)
    }

    /// Convert raw operator text into a value of this column's type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if an integer column gets non-integer text.
    pub fn parse_value(self, raw: &str) -> Result<FieldValue> {
        if self.is_integer() {
            raw.trim()
                .parse()
                .map(FieldValue::Integer)
                .map_err(|_| Error::InvalidValue {
                    field: self.column(),
                    value: raw.to_string(),
                    expected: "an integer",
                })
        } else {
            Ok(FieldValue::Text(raw.to_string()))
        }
    }

    /// Check operator text destined for this column before a write.
    ///
    /// Timestamps must parse as `YYYY-MM-DDTHH:MM` and come back in that
    /// form; airport codes are upper-cased and must be three letters. Other
    /// columns pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a malformed timestamp or code.
    pub fn normalize_input(self, raw: &str) -> Result<String> {
        if self.is_timestamp() {
            Ok(format_timestamp(&parse_timestamp(raw)?))
        } else if self.is_airport() {
            normalize_iata(raw)
        } else {
            Ok(raw.to_string())
        }
    }

    /// Prepare operator text used as a lookup criterion for this column.
    ///
    /// Airport codes are upper-cased. Timestamps are matched verbatim so
    /// that rows stored with seconds (`2023-01-01T08:00:00`) stay findable.
    #[must_use]
    pub fn normalize_criterion(self, raw: &str) -> String {
        if self.is_airport() {
            raw.trim().to_ascii_uppercase()
        } else {
            raw.trim().to_string()
        }
    }
}

impl fmt::Display for FlightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlightField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let field = match normalize(s).as_str() {
            "flightid" => Self::FlightId,
            "flightnumber" => Self::FlightNumber,
            "airlinename" | "airline" => Self::AirlineName,
            "aircraftid" => Self::AircraftId,
            "departure" => Self::Departure,
            "arrival" => Self::Arrival,
            "flightstatus" | "status" => Self::FlightStatus,
            "departureairport" | "departureairportiata" => Self::DepartureAirport,
            "arrivalairport" | "arrivalairportiata" => Self::ArrivalAirport,
            _ => {
                return Err(Error::InvalidField {
                    entity: "flight",
                    field: s.to_string(),
                })
            }
        };
        Ok(field)
    }
}

/// The updatable columns of the airport table.
///
/// The IATA code is the key and is not updatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirportField {
    /// `City`
    City,
    /// `Country`
    Country,
    /// `Timezone`
    Timezone,
}

impl AirportField {
    /// Every updatable airport field.
    pub const ALL: [Self; 3] = [Self::City, Self::Country, Self::Timezone];

    /// The name operators use for this field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Country => "Country",
            Self::Timezone => "Timezone",
        }
    }

    /// The SQL column backing this field.
    #[must_use]
    pub fn column(self) -> &'static str {
        // Operator names and column names coincide for airports.
        self.name()
    }
}

impl fmt::Display for AirportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AirportField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "city" => Ok(Self::City),
            "country" => Ok(Self::Country),
            "timezone" | "utcoffset" => Ok(Self::Timezone),
            _ => Err(Error::InvalidField {
                entity: "airport",
                field: s.to_string(),
            }),
        }
    }
}
