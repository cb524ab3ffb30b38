#[cfg(test)]
mod tests {
    use rocket::tokio;
    use sqlx::{QueryBuilder, Sqlite};

    use crate::db::filter::{Filter, Predicate};
    use crate::db::{list_airports, list_flights, list_users, normalize_date};
    use crate::models::{AirportFilter, FlightFilter, FlightReport, UserFilter};
    use crate::test::test_db::{TestDbBuilder, create_standard_test_db};

    fn numbers(flights: &[FlightReport]) -> Vec<String> {
        flights
            .iter()
            .map(|f| format!("{}{}", f.airline_code, f.flight_number))
            .collect()
    }

    #[test]
    fn test_blank_values_add_no_predicate() {
        let filter = Filter::new()
            .equals("a", None)
            .contains("b", Some(""))
            .equals_any(&["c", "d"], Some("   "));

        assert!(filter.is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let filter = Filter::new().contains("name", Some("  Inch "));
        assert_eq!(filter.predicates(), &[Predicate::Contains("name", "Inch")]);
    }

    #[test]
    fn test_predicates_render_as_bound_conjunction() {
        let filter = Filter::new()
            .equals("airline_code", Some("AA"))
            .contains("flight_number", Some("12"))
            .equals_any(&["airport_code", "origin_dest_airport"], Some("ICN"));

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM flights");
        filter.push_where(&mut qb);

        assert_eq!(
            qb.sql(),
            "SELECT * FROM flights WHERE airline_code = ? AND instr(flight_number, ?) > 0 \
             AND (airport_code = ? OR origin_dest_airport = ?)"
        );
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2025-01-02"), "20250102");
        assert_eq!(normalize_date("20250102"), "20250102");
        assert_eq!(normalize_date(" 2025-01-02 "), "20250102");
    }

    #[tokio::test]
    async fn test_flight_filter_composition() {
        let test_db = create_standard_test_db().await;

        let all = list_flights(&test_db.pool, &FlightFilter::default())
            .await
            .expect("Failed to list flights");
        assert_eq!(numbers(&all), vec!["AA123", "AA456", "BA127"]);

        let aa_only = list_flights(
            &test_db.pool,
            &FlightFilter {
                airline: Some("AA".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");
        assert_eq!(numbers(&aa_only), vec!["AA123", "AA456"]);

        let aa_with_12 = list_flights(
            &test_db.pool,
            &FlightFilter {
                airline: Some("AA".to_string()),
                flight_number: Some("12".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");
        assert_eq!(numbers(&aa_with_12), vec!["AA123"]);
    }

    #[tokio::test]
    async fn test_flight_filter_by_date_with_hyphens() {
        let test_db = create_standard_test_db().await;

        let flights = list_flights(
            &test_db.pool,
            &FlightFilter {
                date: Some("2025-01-02".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");

        assert_eq!(numbers(&flights), vec!["BA127"]);
    }

    #[tokio::test]
    async fn test_flight_filter_airport_matches_either_column() {
        let test_db = create_standard_test_db().await;

        let nrt = list_flights(
            &test_db.pool,
            &FlightFilter {
                airport: Some("NRT".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");
        assert_eq!(numbers(&nrt), vec!["AA123"]);

        let icn = list_flights(
            &test_db.pool,
            &FlightFilter {
                airport: Some("ICN".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");
        assert_eq!(icn.len(), 3);
    }

    #[tokio::test]
    async fn test_flight_filter_by_type() {
        let test_db = create_standard_test_db().await;

        let arrivals = list_flights(
            &test_db.pool,
            &FlightFilter {
                flight_type: Some("A".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter flights");

        assert_eq!(numbers(&arrivals), vec!["AA456", "BA127"]);
    }

    #[tokio::test]
    async fn test_airport_substring_filter_is_case_sensitive() {
        let test_db = create_standard_test_db().await;

        let matched = list_airports(
            &test_db.pool,
            &AirportFilter {
                name: Some("row".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter airports");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].code, "LHR");

        let unmatched = list_airports(
            &test_db.pool,
            &AirportFilter {
                name: Some("ROW".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter airports");
        assert!(unmatched.is_empty());
    }

    #[tokio::test]
    async fn test_airports_sorted_by_name_and_filtered_by_flag() {
        let test_db = create_standard_test_db().await;

        let airports = list_airports(&test_db.pool, &AirportFilter::default())
            .await
            .expect("Failed to list airports");
        let names: Vec<&str> = airports.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Heathrow", "Incheon", "Narita"]);

        let inactive = list_airports(
            &test_db.pool,
            &AirportFilter {
                yn: Some("N".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter airports");
        assert!(inactive.is_empty());
    }

    #[tokio::test]
    async fn test_user_filter_by_airline() {
        let test_db = TestDbBuilder::new()
            .airline("AA", "American Airlines")
            .airline("BA", "British Airways")
            .user("alice", "Alice", Some("AA"))
            .user("bob", "Bob", Some("BA"))
            .user("carol", "Carol", None)
            .build()
            .await
            .expect("Failed to build test database");

        let users = list_users(
            &test_db.pool,
            &UserFilter {
                airline: Some("BA".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter users");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "bob");

        let by_name = list_users(
            &test_db.pool,
            &UserFilter {
                name: Some("o".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter users");
        let ids: Vec<&str> = by_name.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["bob", "carol"]);
    }
}
