#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
    use rocket::http::Status;
    use serde_json::Value;

    use crate::board::{
        BLANK_LOGO, BLANK_TIME, BoardKind, board_row, build_board, format_time, panel,
        scheduled_at, within_window,
    };
    use crate::models::{FlightReport, FlightType};
    use crate::test::test_utils::{TestDbBuilder, setup_test_client};

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y%m%d %H%M")
            .expect("bad test timestamp")
    }

    fn flight(id: i64, flight_type: FlightType, date: &str, time: &str) -> FlightReport {
        FlightReport {
            id,
            flight_number: format!("{}", 100 + id),
            airport_code: "ICN".to_string(),
            airline_code: "KE".to_string(),
            flight_type,
            scheduled_date: date.to_string(),
            scheduled_time: time.to_string(),
            estimated_date: None,
            estimated_time: None,
            origin_dest_airport: "NRT".to_string(),
            remark_code: None,
            home_airport_name: Some("Incheon".to_string()),
            airport_name: Some("Narita".to_string()),
            departure_airport: None,
            arrival_airport: None,
            airline_name: Some("Korean Air".to_string()),
            logo_path: Some("/images/ke.png".to_string()),
            remark_name: None,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Some("0930")), "09:30");
        assert_eq!(format_time(Some("2359")), "23:59");
        assert_eq!(format_time(None), BLANK_TIME);
        assert_eq!(format_time(Some("930")), BLANK_TIME);
        assert_eq!(format_time(Some("09300")), BLANK_TIME);
        assert_eq!(format_time(Some("")), BLANK_TIME);
    }

    #[test]
    fn test_thirty_minute_window() {
        let now = at("20250101", "1000");

        assert!(within_window(at("20250101", "0931"), now));
        assert!(within_window(at("20250101", "0930"), now));
        assert!(!within_window(at("20250101", "0929"), now));
        assert!(within_window(at("20250101", "1500"), now));
        assert!(!within_window(at("20241231", "1000"), now));
    }

    #[test]
    fn test_scheduled_at_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");

        assert_eq!(
            scheduled_at("", "0930", today),
            Some(at("20250101", "0930"))
        );
        assert_eq!(
            scheduled_at("2025XX01", "0930", today),
            Some(at("20250101", "0930"))
        );
        assert_eq!(
            scheduled_at("20250105", "0930", today),
            Some(at("20250105", "0930"))
        );
        assert_eq!(scheduled_at("20250101", "9:30", today), None);
        assert_eq!(scheduled_at("20250101", "2460", today), None);
    }

    #[test]
    fn test_board_row_fallbacks() {
        let mut report = flight(1, FlightType::Arrival, "20250101", "0930");
        report.airline_name = None;
        report.logo_path = Some(String::new());
        report.airport_name = None;
        report.estimated_time = Some("0945".to_string());
        report.remark_name = Some("Delayed".to_string());

        let row = board_row(&report);

        assert_eq!(row.time, "09:30");
        assert_eq!(row.estimated, "09:45");
        assert_eq!(row.airline, "Unknown");
        assert_eq!(row.logo, BLANK_LOGO);
        assert_eq!(row.flight_number, "KE 101");
        assert_eq!(row.location, "Unknown");
        assert_eq!(row.status, "Delayed");

        report.flight_number = String::new();
        report.remark_name = None;
        let row = board_row(&report);
        assert_eq!(row.flight_number, "N/A");
        assert_eq!(row.status, "Scheduled");
        assert_eq!(row.estimated, "09:45");
    }

    #[test]
    fn test_panel_filters_sorts_and_truncates() {
        let now = at("20250101", "1000");
        let flights = vec![
            flight(1, FlightType::Arrival, "20250101", "1200"),
            flight(2, FlightType::Arrival, "20250101", "0929"),
            flight(3, FlightType::Arrival, "20250101", "0931"),
            flight(4, FlightType::Departure, "20250101", "1010"),
            flight(5, FlightType::Arrival, "20250101", "1100"),
            flight(6, FlightType::Arrival, "20250101", "bad"),
        ];

        let rows = panel(&flights, FlightType::Arrival, now, 10);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5, 1]);

        let truncated = panel(&flights, FlightType::Arrival, now, 2);
        let ids: Vec<i64> = truncated.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_build_board_by_kind() {
        let now = at("20250101", "1000");
        let flights = vec![
            flight(1, FlightType::Arrival, "20250101", "1030"),
            flight(2, FlightType::Departure, "20250101", "1040"),
        ];

        let arrivals = build_board(&flights, BoardKind::Arrivals, now, 12);
        assert_eq!(arrivals.arrivals.len(), 1);
        assert!(arrivals.departures.is_empty());

        let departures = build_board(&flights, BoardKind::Departures, now, 12);
        assert!(departures.arrivals.is_empty());
        assert_eq!(departures.departures.len(), 1);

        let mixed = build_board(&flights, BoardKind::Mixed, now, 12);
        assert_eq!(mixed.arrivals.len(), 1);
        assert_eq!(mixed.departures.len(), 1);
        assert_eq!(mixed.generated_at, now);
    }

    #[test]
    fn test_board_kind_parse() {
        assert_eq!(BoardKind::parse("arrivals"), Some(BoardKind::Arrivals));
        assert_eq!(BoardKind::parse("departures"), Some(BoardKind::Departures));
        assert_eq!(BoardKind::parse("mixed"), Some(BoardKind::Mixed));
        assert_eq!(BoardKind::parse("Arrivals"), None);
    }

    #[rocket::async_test]
    async fn test_board_endpoint() {
        let soon = Local::now().naive_local() + Duration::hours(1);
        let date = soon.format("%Y%m%d").to_string();
        let time = soon.format("%H%M").to_string();

        let test_db = TestDbBuilder::new()
            .airport("ICN", "Incheon")
            .airport("NRT", "Narita")
            .airline("KE", "Korean Air")
            .flight("KE", "701", FlightType::Departure, "ICN", "NRT", &date, &time)
            .flight("KE", "702", FlightType::Arrival, "ICN", "NRT", &date, &time)
            .flight("KE", "001", FlightType::Departure, "ICN", "NRT", "20000101", "0000")
            .build()
            .await
            .expect("Failed to build test database");
        let (client, _) = setup_test_client(test_db).await;

        let response = client.get("/api/boards/departures").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.expect("Board is not JSON");
        assert_eq!(body["kind"], "departures");
        assert!(body["generatedAt"].is_string());
        assert_eq!(body["arrivals"].as_array().map(Vec::len), Some(0));

        let rows = body["departures"].as_array().expect("No departures");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["flightNumber"], "KE 701");
        assert_eq!(rows[0]["airline"], "Korean Air");
        assert_eq!(rows[0]["location"], "Narita");
        assert_eq!(rows[0]["logo"], "/images/ke.png");
        assert_eq!(rows[0]["status"], "Scheduled");

        let mixed: Value = client
            .get("/api/boards/mixed?limit=1")
            .dispatch()
            .await
            .into_json()
            .await
            .expect("Board is not JSON");
        assert_eq!(mixed["arrivals"].as_array().map(Vec::len), Some(1));
        assert_eq!(mixed["departures"].as_array().map(Vec::len), Some(1));
    }

    #[rocket::async_test]
    async fn test_unknown_board_is_not_found() {
        let test_db = TestDbBuilder::new()
            .build()
            .await
            .expect("Failed to build test database");
        let (client, _) = setup_test_client(test_db).await;

        let response = client.get("/api/boards/baggage").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);

        let body: Value = response.into_json().await.expect("Error body is not JSON");
        assert_eq!(body["code"], "not_found");
    }
}
