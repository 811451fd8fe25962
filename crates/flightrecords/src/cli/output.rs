//! Rendering of record listings.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    Aircraft, Airport, Assignment, DestinationFlight, Flight, Pilot, ScheduleEntry,
};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One comma-separated line per record
    Plain,
    /// Aligned columns with a header
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
}

/// A record that can be shown as a row of cells.
pub trait Tabular {
    /// Column headers, in cell order.
    fn headers() -> &'static [&'static str];
    /// The record's cells.
    fn cells(&self) -> Vec<String>;
}

/// Write `rows` in the requested format.
///
/// For plain and table output an empty listing prints `empty_message`
/// instead; JSON output always prints an array.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn render<T, W>(
    out: &mut W,
    rows: &[T],
    format: OutputFormat,
    empty_message: &str,
) -> Result<()>
where
    T: Tabular + Serialize,
    W: Write + ?Sized,
{
    if rows.is_empty() && format != OutputFormat::Json {
        writeln!(out, "{empty_message}")?;
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for row in rows {
                writeln!(out, "{}", row.cells().join(", "))?;
            }
        }
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();
            write_table(out, T::headers(), &cells)?;
        }
    }
    Ok(())
}

fn write_table<W: Write + ?Sized>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", format_row(headers.iter().copied(), &widths))?;
    writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    )?;
    for row in rows {
        writeln!(out, "{}", format_row(row.iter().map(String::as_str), &widths))?;
    }
    Ok(())
}

/// Pad each cell to its column width; trailing padding is dropped.
fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

impl Tabular for Flight {
    fn headers() -> &'static [&'static str] {
        &[
            "FlightID",
            "Number",
            "Airline",
            "Aircraft",
            "Departure",
            "Arrival",
            "Status",
            "From",
            "To",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.flight_number.to_string(),
            self.airline_name.clone(),
            self.aircraft_id.to_string(),
            self.departure.clone(),
            self.arrival.clone(),
            self.status.clone(),
            self.departure_airport.clone(),
            self.arrival_airport.clone(),
        ]
    }
}

impl Tabular for Airport {
    fn headers() -> &'static [&'static str] {
        &["IATA", "City", "Country", "Timezone"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.iata.clone(),
            self.city.clone(),
            self.country.clone(),
            self.timezone.clone(),
        ]
    }
}

impl Tabular for Aircraft {
    fn headers() -> &'static [&'static str] {
        &["AircraftID", "Model", "Age", "Registration"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.aircraft_id.to_string(),
            self.model.clone(),
            self.age.to_string(),
            self.registration_number
                .map(|r| r.to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Tabular for Pilot {
    fn headers() -> &'static [&'static str] {
        &["PilotID", "Name", "Licence", "Rank", "Experience"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pilot_id.to_string(),
            self.full_name.clone(),
            self.licence_number.to_string(),
            self.rank.to_string(),
            self.years_of_experience.to_string(),
        ]
    }
}

impl Tabular for Assignment {
    fn headers() -> &'static [&'static str] {
        &["FlightID", "PilotID", "Role"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.pilot_id.to_string(),
            self.role.to_string(),
        ]
    }
}

impl Tabular for ScheduleEntry {
    fn headers() -> &'static [&'static str] {
        &[
            "PilotID",
            "Name",
            "FlightID",
            "Number",
            "Departure",
            "Arrival",
            "Status",
            "From",
            "To",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pilot_id.to_string(),
            self.full_name.clone(),
            self.flight_id.to_string(),
            self.flight_number.to_string(),
            self.departure.clone(),
            self.arrival.clone(),
            self.status.clone(),
            self.departure_airport.clone(),
            self.arrival_airport.clone(),
        ]
    }
}

impl Tabular for DestinationFlight {
    fn headers() -> &'static [&'static str] {
        &["FlightID", "Number", "Airline", "Origin", "City", "Arrival", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.flight_number.to_string(),
            self.airline_name.clone(),
            self.origin.clone(),
            self.origin_city.clone(),
            self.arrival.clone(),
            self.status.clone(),
        ]
    }
}
