//! Seed data for a fresh flight records database.
//!
//! Three layers, each a plain caller of [`FlightStore`]:
//! - reference data (airports, aircraft, pilots), inserted when missing
//! - ten fixed sample flights with crews for the first five
//! - randomly generated flights, each crewed with one Captain and one
//!   First Officer through [`FlightStore::assign_pilot`]

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{
    format_timestamp, parse_timestamp, Aircraft, Airport, Assignment, Flight, NewFlight, Pilot,
    Role, KNOWN_STATUSES,
};
use crate::storage::FlightStore;

/// Airlines used for generated flights.
pub const AIRLINES: &[&str] = &[
    "Delta Airlines",
    "American Airlines",
    "United Airlines",
    "Southwest Airlines",
    "Alaska Airlines",
    "JetBlue Airways",
    "Spirit Airlines",
    "Frontier Airlines",
    "Hawaiian Airlines",
    "Allegiant Air",
];

/// Generated departures fall within the year starting here.
const GENERATION_EPOCH: &str = "2024-01-01T00:00";

/// Rows written by a seeding step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Airports inserted.
    pub airports: usize,
    /// Aircraft inserted.
    pub aircraft: usize,
    /// Pilots inserted.
    pub pilots: usize,
    /// Flights inserted.
    pub flights: usize,
    /// Crew assignments inserted.
    pub assignments: usize,
}

impl std::ops::AddAssign for SeedReport {
    fn add_assign(&mut self, other: Self) {
        self.airports += other.airports;
        self.aircraft += other.aircraft;
        self.pilots += other.pilots;
        self.flights += other.flights;
        self.assignments += other.assignments;
    }
}

/// Build an RNG, seeded when a seed is configured.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn airport(iata: &str, city: &str, timezone: &str) -> Airport {
    Airport {
        iata: iata.to_string(),
        city: city.to_string(),
        country: "USA".to_string(),
        timezone: timezone.to_string(),
    }
}

/// The reference airports.
#[must_use]
pub fn reference_airports() -> Vec<Airport> {
    vec![
        airport("JFK", "New York", "UTC-05:00"),
        airport("LAX", "Los Angeles", "UTC-08:00"),
        airport("ORD", "Chicago", "UTC-06:00"),
        airport("DFW", "Dallas", "UTC-06:00"),
        airport("DEN", "Denver", "UTC-07:00"),
        airport("ATL", "Atlanta", "UTC-05:00"),
        airport("SEA", "Seattle", "UTC-08:00"),
        airport("MIA", "Miami", "UTC-05:00"),
        airport("SFO", "San Francisco", "UTC-08:00"),
        airport("LAS", "Las Vegas", "UTC-08:00"),
    ]
}

/// The reference fleet.
#[must_use]
pub fn reference_aircraft() -> Vec<Aircraft> {
    [
        (1, "Boeing 737", 10, 12_345),
        (2, "Airbus A320", 8, 23_456),
        (3, "Boeing 777", 12, 34_567),
        (4, "Airbus A380", 5, 45_678),
        (5, "Boeing 787", 7, 56_789),
        (6, "Airbus A350", 6, 67_890),
        (7, "Boeing 747", 15, 78_901),
        (8, "Airbus A330", 9, 89_012),
        (9, "Boeing 767", 11, 90_123),
        (10, "Airbus A340", 13, 12_346),
    ]
    .into_iter()
    .map(|(aircraft_id, model, age, registration)| Aircraft {
        aircraft_id,
        model: model.to_string(),
        age,
        registration_number: Some(registration),
    })
    .collect()
}

/// The reference roster; odd ids are Captains.
#[must_use]
pub fn reference_pilots() -> Vec<Pilot> {
    [
        (1, "John Doe", 11_111, 20),
        (2, "Jane Smith", 22_222, 15),
        (3, "Jim Brown", 33_333, 18),
        (4, "Jake White", 44_444, 12),
        (5, "Jill Green", 55_555, 22),
        (6, "Jerry Black", 66_666, 14),
        (7, "Janet Blue", 77_777, 19),
        (8, "Jack Yellow", 88_888, 16),
        (9, "Julie Red", 99_999, 21),
        (10, "Jason Purple", 10_101, 13),
    ]
    .into_iter()
    .map(|(pilot_id, name, licence_number, years)| Pilot {
        pilot_id,
        full_name: name.to_string(),
        licence_number,
        rank: if pilot_id % 2 == 1 {
            Role::Captain
        } else {
            Role::FirstOfficer
        },
        years_of_experience: years,
    })
    .collect()
}

/// The ten sample flights, ids 1 through 10, one per day from 2023-01-01.
#[must_use]
pub fn sample_flights() -> Vec<Flight> {
    let legs = [
        ("Delta Airlines", "JFK", "LAX", "On Time"),
        ("American Airlines", "LAX", "ORD", "Delayed"),
        ("United Airlines", "ORD", "DFW", "Cancelled"),
        ("Southwest Airlines", "DFW", "DEN", "On Time"),
        ("Alaska Airlines", "DEN", "ATL", "Delayed"),
        ("JetBlue Airways", "ATL", "SEA", "On Time"),
        ("Spirit Airlines", "SEA", "MIA", "Cancelled"),
        ("Frontier Airlines", "MIA", "SFO", "On Time"),
        ("Hawaiian Airlines", "SFO", "LAS", "Delayed"),
        ("Allegiant Air", "LAS", "JFK", "On Time"),
    ];

    (1_i64..)
        .zip(legs)
        .map(|(id, (airline, from, to, status))| {
            let day = id;
            let hour = id + 7;
            Flight {
                flight_id: id,
                flight_number: 1000 + id,
                airline_name: airline.to_string(),
                aircraft_id: id,
                departure: format!("2023-01-{day:02}T{hour:02}:00"),
                arrival: format!("2023-01-{day:02}T{:02}:00", hour + 4),
                status: status.to_string(),
                departure_airport: from.to_string(),
                arrival_airport: to.to_string(),
            }
        })
        .collect()
}

/// Crews for sample flights 1 through 5.
#[must_use]
pub fn sample_assignments() -> Vec<Assignment> {
    (1_i64..=5)
        .flat_map(|flight_id| {
            [
                Assignment {
                    flight_id,
                    pilot_id: flight_id * 2 - 1,
                    role: Role::Captain,
                },
                Assignment {
                    flight_id,
                    pilot_id: flight_id * 2,
                    role: Role::FirstOfficer,
                },
            ]
        })
        .collect()
}

/// Count an insert, treating an existing row as already seeded.
fn insert_if_missing(result: Result<()>) -> Result<usize> {
    match result {
        Ok(()) => Ok(1),
        Err(Error::Duplicate { .. }) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Insert any reference airports, aircraft and pilots that are missing.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed_reference(store: &FlightStore) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for airport in reference_airports() {
        report.airports += insert_if_missing(store.insert_airport(&airport))?;
    }
    for aircraft in reference_aircraft() {
        report.aircraft += insert_if_missing(store.insert_aircraft(&aircraft))?;
    }
    for pilot in reference_pilots() {
        report.pilots += insert_if_missing(store.insert_pilot(&pilot))?;
    }

    info!(
        "Seeded {} airports, {} aircraft, {} pilots",
        report.airports, report.aircraft, report.pilots
    );
    Ok(report)
}

/// Insert the sample flights and crews into a store with no flights.
///
/// Does nothing if any flight already exists.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the reference data is missing, or an error
/// if the database operation fails.
pub fn seed_sample_flights(store: &FlightStore) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if store.stats()?.flights > 0 {
        info!("Flights already present, skipping sample flights");
        return Ok(report);
    }

    for flight in sample_flights() {
        store.insert_flight(&flight)?;
        report.flights += 1;
    }
    for assignment in sample_assignments() {
        store.assign_pilot(assignment.flight_id, assignment.pilot_id, assignment.role)?;
        report.assignments += 1;
    }

    info!(
        "Seeded {} sample flights with {} assignments",
        report.flights, report.assignments
    );
    Ok(report)
}

/// Pick one element of a non-empty slice.
fn pick<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Add `count` random flights, each with a Captain and a First Officer.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the store lacks the reference data
/// needed (two airports, one aircraft, one pilot of each rank), or an error
/// if the database operation fails.
pub fn generate_flights<R: Rng>(
    store: &FlightStore,
    count: usize,
    rng: &mut R,
) -> Result<SeedReport> {
    let airports = store.list_airports()?;
    let aircraft = store.list_aircraft()?;
    let (captains, first_officers): (Vec<Pilot>, Vec<Pilot>) = store
        .list_pilots()?
        .into_iter()
        .partition(|p| p.rank == Role::Captain);

    if airports.len() < 2 || aircraft.is_empty() || captains.is_empty() || first_officers.is_empty()
    {
        return Err(Error::invalid_input(
            "generating flights needs two airports, one aircraft, and a Captain and \
             First Officer on the roster; run `seed` first",
        ));
    }

    let epoch = parse_timestamp(GENERATION_EPOCH)?;
    let mut report = SeedReport::default();

    for _ in 0..count {
        let from = pick(&airports, rng);
        let to = loop {
            let candidate = pick(&airports, rng);
            if candidate.iata != from.iata {
                break candidate;
            }
        };

        let departure = epoch
            + Duration::days(rng.gen_range(0..366))
            + Duration::hours(rng.gen_range(5..22));
        let arrival = departure
            + Duration::hours(rng.gen_range(1..=6))
            + Duration::minutes(15 * rng.gen_range(0..4));

        let flight = store.add_flight(NewFlight {
            flight_number: rng.gen_range(1000..10_000),
            airline_name: (*pick(AIRLINES, rng)).to_string(),
            aircraft_id: pick(&aircraft, rng).aircraft_id,
            departure_airport: from.iata.clone(),
            arrival_airport: to.iata.clone(),
            departure: format_timestamp(&departure),
            arrival: format_timestamp(&arrival),
            status: (*pick(KNOWN_STATUSES, rng)).to_string(),
        })?;
        report.flights += 1;

        store.assign_pilot(
            flight.flight_id,
            pick(&captains, rng).pilot_id,
            Role::Captain,
        )?;
        store.assign_pilot(
            flight.flight_id,
            pick(&first_officers, rng).pilot_id,
            Role::FirstOfficer,
        )?;
        report.assignments += 2;
        debug!("Generated flight {}", flight.flight_id);
    }

    info!("Generated {} random flights", report.flights);
    Ok(report)
}
