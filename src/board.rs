//! Display-board rules: time formatting, the visibility window and the row
//! shape shown on arrival and departure monitors.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{FlightReport, FlightType};

/// Flights stay on the board until this many minutes after their scheduled time.
pub const WINDOW_MINUTES: i64 = 30;

pub const BLANK_TIME: &str = "--:--";
pub const BLANK_LOGO: &str = "/images/blank.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    Arrivals,
    Departures,
    Mixed,
}

impl BoardKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "arrivals" => Some(BoardKind::Arrivals),
            "departures" => Some(BoardKind::Departures),
            "mixed" => Some(BoardKind::Mixed),
            _ => None,
        }
    }

    fn shows(&self, flight_type: FlightType) -> bool {
        match self {
            BoardKind::Arrivals => flight_type == FlightType::Arrival,
            BoardKind::Departures => flight_type == FlightType::Departure,
            BoardKind::Mixed => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    pub id: i64,
    pub time: String,
    pub estimated: String,
    pub airline: String,
    pub logo: String,
    pub flight_number: String,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub kind: BoardKind,
    pub generated_at: NaiveDateTime,
    pub arrivals: Vec<BoardRow>,
    pub departures: Vec<BoardRow>,
}

/// `"0930"` becomes `"09:30"`; anything that is not four characters long is blank.
pub fn format_time(hhmm: Option<&str>) -> String {
    match hhmm {
        Some(t) if t.len() == 4 && t.is_char_boundary(2) => format!("{}:{}", &t[..2], &t[2..]),
        _ => BLANK_TIME.to_string(),
    }
}

/// Scheduled moment of a flight. A missing or malformed date means "today".
pub fn scheduled_at(date: &str, time: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let time = time.trim();
    if time.len() != 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let time = NaiveTime::parse_from_str(time, "%H%M").ok()?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y%m%d").unwrap_or(today);
    Some(date.and_time(time))
}

/// True when the flight is scheduled in the future or at most
/// [`WINDOW_MINUTES`] ago. The boundary itself is visible.
pub fn within_window(scheduled: NaiveDateTime, now: NaiveDateTime) -> bool {
    scheduled >= now - Duration::minutes(WINDOW_MINUTES)
}

pub fn board_row(flight: &FlightReport) -> BoardRow {
    let flight_number = if !flight.airline_code.is_empty() && !flight.flight_number.is_empty() {
        format!("{} {}", flight.airline_code, flight.flight_number)
    } else {
        "N/A".to_string()
    };

    BoardRow {
        id: flight.id,
        time: format_time(Some(&flight.scheduled_time)),
        estimated: format_time(flight.estimated_time.as_deref()),
        airline: non_empty_or(flight.airline_name.as_deref(), "Unknown"),
        logo: non_empty_or(flight.logo_path.as_deref(), BLANK_LOGO),
        flight_number,
        location: non_empty_or(flight.airport_name.as_deref(), "Unknown"),
        status: non_empty_or(flight.remark_name.as_deref(), "Scheduled"),
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Visible rows of one panel, earliest first, truncated to `max_rows`.
pub fn panel(
    flights: &[FlightReport],
    flight_type: FlightType,
    now: NaiveDateTime,
    max_rows: usize,
) -> Vec<BoardRow> {
    let mut visible: Vec<(NaiveDateTime, &FlightReport)> = flights
        .iter()
        .filter(|f| f.flight_type == flight_type)
        .filter_map(|f| {
            scheduled_at(&f.scheduled_date, &f.scheduled_time, now.date()).map(|at| (at, f))
        })
        .filter(|(at, _)| within_window(*at, now))
        .collect();

    // Stable sort keeps insertion order for flights scheduled at the same minute.
    visible.sort_by_key(|(at, _)| *at);

    visible
        .into_iter()
        .take(max_rows)
        .map(|(_, f)| board_row(f))
        .collect()
}

pub fn build_board(
    flights: &[FlightReport],
    kind: BoardKind,
    now: NaiveDateTime,
    max_rows: usize,
) -> Board {
    let arrivals = if kind.shows(FlightType::Arrival) {
        panel(flights, FlightType::Arrival, now, max_rows)
    } else {
        Vec::new()
    };

    let departures = if kind.shows(FlightType::Departure) {
        panel(flights, FlightType::Departure, now, max_rows)
    } else {
        Vec::new()
    };

    Board {
        kind,
        generated_at: now,
        arrivals,
        departures,
    }
}
