use rocket::FromForm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Airport {
    #[serde(rename = "AirportCode")]
    pub code: String,
    #[serde(rename = "AirportName")]
    pub name: String,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "UseYn")]
    pub use_yn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Airline {
    #[serde(rename = "AirlineCode")]
    pub code: String,
    #[serde(rename = "AirlineName")]
    pub name: String,
    #[serde(rename = "LogoPath")]
    pub logo_path: Option<String>,
    #[serde(rename = "UseYn")]
    pub use_yn: String,
}

/// Status code shown in the remark column of a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Remark {
    #[serde(rename = "RemarkCode")]
    pub code: String,
    #[serde(rename = "RemarkName")]
    pub name: String,
    #[serde(rename = "UseYn")]
    pub use_yn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    #[serde(rename = "RoleID")]
    pub id: String,
    #[serde(rename = "RoleName")]
    pub name: String,
}

/// Public profile of a user. The stored credential never leaves the store layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    #[serde(rename = "UserID")]
    pub id: String,
    #[serde(rename = "UserName")]
    pub name: String,
    #[serde(rename = "AirlineCode")]
    pub airline_code: Option<String>,
    #[serde(rename = "AirportCode")]
    pub airport_code: Option<String>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbUserCredentials {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRole {
    #[serde(rename = "UserRoleID")]
    pub id: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "RoleID")]
    pub role_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightType {
    #[serde(rename = "A")]
    Arrival,
    #[serde(rename = "D")]
    Departure,
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::Arrival => "A",
            FlightType::Departure => "D",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(FlightType::Arrival),
            "D" => Some(FlightType::Departure),
            _ => None,
        }
    }
}

/// Values written by a flight create or full-row update.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub flight_number: String,
    pub airport_code: String,
    pub airline_code: String,
    pub flight_type: FlightType,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_date: Option<String>,
    pub estimated_time: Option<String>,
    pub origin_dest_airport: String,
    pub remark_code: Option<String>,
}

/// A flight joined with the names of everything it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightReport {
    #[serde(rename = "FlightId")]
    pub id: i64,
    #[serde(rename = "FlightNumber")]
    pub flight_number: String,
    #[serde(rename = "AirportCode")]
    pub airport_code: String,
    #[serde(rename = "AirlineCode")]
    pub airline_code: String,
    #[serde(rename = "FlightType")]
    pub flight_type: FlightType,
    #[serde(rename = "ScheduledDate")]
    pub scheduled_date: String,
    #[serde(rename = "ScheduledTime")]
    pub scheduled_time: String,
    #[serde(rename = "EstimatedDate")]
    pub estimated_date: Option<String>,
    #[serde(rename = "EstimatedTime")]
    pub estimated_time: Option<String>,
    #[serde(rename = "OriginDestAirport")]
    pub origin_dest_airport: String,
    #[serde(rename = "Remarks")]
    pub remark_code: Option<String>,
    #[serde(rename = "HomeAirportName")]
    pub home_airport_name: Option<String>,
    #[serde(rename = "AirportName")]
    pub airport_name: Option<String>,
    #[serde(rename = "DepartureAirport")]
    pub departure_airport: Option<String>,
    #[serde(rename = "ArrivalAirport")]
    pub arrival_airport: Option<String>,
    #[serde(rename = "AirlineName")]
    pub airline_name: Option<String>,
    #[serde(rename = "LogoPath")]
    pub logo_path: Option<String>,
    #[serde(rename = "RemarkName")]
    pub remark_name: Option<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbFlightReport {
    pub id: Option<i64>,
    pub flight_number: Option<String>,
    pub airport_code: Option<String>,
    pub airline_code: Option<String>,
    pub flight_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub estimated_date: Option<String>,
    pub estimated_time: Option<String>,
    pub origin_dest_airport: Option<String>,
    pub remark_code: Option<String>,
    pub home_airport_name: Option<String>,
    pub airport_name: Option<String>,
    pub airline_name: Option<String>,
    pub logo_path: Option<String>,
    pub remark_name: Option<String>,
}

impl From<DbFlightReport> for FlightReport {
    fn from(db: DbFlightReport) -> Self {
        let flight_type = db
            .flight_type
            .as_deref()
            .and_then(FlightType::parse)
            .unwrap_or(FlightType::Arrival);

        // The home airport is where an arrival lands and a departure leaves.
        let (departure_airport, arrival_airport) = match flight_type {
            FlightType::Arrival => (db.airport_name.clone(), db.home_airport_name.clone()),
            FlightType::Departure => (db.home_airport_name.clone(), db.airport_name.clone()),
        };

        Self {
            id: db.id.unwrap_or_default(),
            flight_number: db.flight_number.unwrap_or_default(),
            airport_code: db.airport_code.unwrap_or_default(),
            airline_code: db.airline_code.unwrap_or_default(),
            flight_type,
            scheduled_date: db.scheduled_date.unwrap_or_default(),
            scheduled_time: db.scheduled_time.unwrap_or_default(),
            estimated_date: db.estimated_date,
            estimated_time: db.estimated_time,
            origin_dest_airport: db.origin_dest_airport.unwrap_or_default(),
            remark_code: db.remark_code,
            home_airport_name: db.home_airport_name,
            airport_name: db.airport_name,
            departure_airport,
            arrival_airport,
            airline_name: db.airline_name,
            logo_path: db.logo_path,
            remark_name: db.remark_name,
        }
    }
}

#[derive(Debug, Default, FromForm)]
pub struct AirportFilter {
    pub code: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub yn: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct AirlineFilter {
    pub code: Option<String>,
    pub name: Option<String>,
    pub logopath: Option<String>,
    pub yn: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct RemarkFilter {
    pub code: Option<String>,
    pub name: Option<String>,
    pub yn: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct RoleFilter {
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct UserFilter {
    pub code: Option<String>,
    pub name: Option<String>,
    pub airline: Option<String>,
    pub airport: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct UserRoleFilter {
    pub user: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Clone, FromForm)]
pub struct FlightFilter {
    pub airline: Option<String>,
    pub airport: Option<String>,
    #[field(name = "flightNumber")]
    pub flight_number: Option<String>,
    /// Accepts `YYYY-MM-DD` or `YYYYMMDD`.
    pub date: Option<String>,
    #[field(name = "type")]
    pub flight_type: Option<String>,
}
