#[cfg(test)]
pub mod test_db {
    use std::str::FromStr;
    use std::sync::Once;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::{Pool, Sqlite};

    use crate::auth::hash_credential;
    use crate::db::{
        MIGRATOR, create_airline, create_airport, create_flight, create_remark, create_user,
    };
    use crate::error::AppError;
    use crate::models::{Airline, Airport, FlightType, NewFlight, Remark, User};

    static INIT: Once = Once::new();

    /// SHA-256 of "password", the digest the browser client would send.
    pub const STANDARD_DIGEST: &str =
        "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
    pub const TEST_HASH_COST: u32 = 4;

    pub struct TestUser {
        pub id: String,
        pub name: String,
        pub airline_code: Option<String>,
        pub digest: String,
    }

    #[derive(Default)]
    pub struct TestDbBuilder {
        airports: Vec<Airport>,
        airlines: Vec<Airline>,
        remarks: Vec<Remark>,
        users: Vec<TestUser>,
        flights: Vec<NewFlight>,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn airport(mut self, code: &str, name: &str) -> Self {
            self.airports.push(Airport {
                code: code.to_string(),
                name: name.to_string(),
                city: None,
                country: None,
                use_yn: "Y".to_string(),
            });
            self
        }

        pub fn airline(mut self, code: &str, name: &str) -> Self {
            self.airlines.push(Airline {
                code: code.to_string(),
                name: name.to_string(),
                logo_path: Some(format!("/images/{}.png", code.to_lowercase())),
                use_yn: "Y".to_string(),
            });
            self
        }

        /// Remarks beyond the seeded status codes.
        pub fn remark(mut self, code: &str, name: &str) -> Self {
            self.remarks.push(Remark {
                code: code.to_string(),
                name: name.to_string(),
                use_yn: "Y".to_string(),
            });
            self
        }

        pub fn user(self, id: &str, name: &str, airline_code: Option<&str>) -> Self {
            self.user_with_digest(id, name, airline_code, STANDARD_DIGEST)
        }

        pub fn user_with_digest(
            mut self,
            id: &str,
            name: &str,
            airline_code: Option<&str>,
            digest: &str,
        ) -> Self {
            self.users.push(TestUser {
                id: id.to_string(),
                name: name.to_string(),
                airline_code: airline_code.map(String::from),
                digest: digest.to_string(),
            });
            self
        }

        #[allow(clippy::too_many_arguments)]
        pub fn flight(
            mut self,
            airline_code: &str,
            flight_number: &str,
            flight_type: FlightType,
            airport_code: &str,
            origin_dest_airport: &str,
            scheduled_date: &str,
            scheduled_time: &str,
        ) -> Self {
            self.flights.push(NewFlight {
                flight_number: flight_number.to_string(),
                airport_code: airport_code.to_string(),
                airline_code: airline_code.to_string(),
                flight_type,
                scheduled_date: scheduled_date.to_string(),
                scheduled_time: scheduled_time.to_string(),
                estimated_date: None,
                estimated_time: None,
                origin_dest_airport: origin_dest_airport.to_string(),
                remark_code: None,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .parse_filters("debug")
                    .is_test(true)
                    .try_init();
            });

            let pool = memory_pool().await?;
            MIGRATOR.run(&pool).await?;

            for airport in &self.airports {
                create_airport(&pool, airport).await?;
            }

            for airline in &self.airlines {
                create_airline(&pool, airline).await?;
            }

            for remark in &self.remarks {
                create_remark(&pool, remark).await?;
            }

            for user in &self.users {
                let hash = hash_credential(&user.digest, TEST_HASH_COST)?;
                let profile = User {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    airline_code: user.airline_code.clone(),
                    airport_code: None,
                };
                create_user(&pool, &profile, &hash).await?;
            }

            let mut flight_ids = Vec::new();
            for flight in &self.flights {
                flight_ids.push(create_flight(&pool, flight).await?);
            }

            Ok(TestDb { pool, flight_ids })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub flight_ids: Vec<i64>,
    }

    impl TestDb {
        pub fn flight_id(&self, index: usize) -> Option<i64> {
            self.flight_ids.get(index).copied()
        }

        pub async fn count(&self, table: &str) -> i64 {
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&self.pool)
                .await
                .expect("Failed to count rows")
        }
    }

    /// A single never-recycled connection, so the in-memory database lives
    /// as long as the pool.
    pub async fn memory_pool() -> Result<Pool<Sqlite>, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        Ok(SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?)
    }

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .airport("ICN", "Incheon")
            .airport("NRT", "Narita")
            .airport("LHR", "Heathrow")
            .airline("AA", "American Airlines")
            .airline("BA", "British Airways")
            .user("u1", "Operator One", Some("AA"))
            .flight("AA", "123", FlightType::Departure, "ICN", "NRT", "20250101", "0930")
            .flight("AA", "456", FlightType::Arrival, "ICN", "LHR", "20250101", "1015")
            .flight("BA", "127", FlightType::Arrival, "ICN", "LHR", "20250102", "1100")
            .build()
            .await
            .expect("Failed to build standard test database")
    }
}

#[cfg(test)]
pub mod test_utils {
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::{Value, json};

    use super::test_db::{TEST_HASH_COST, TestDb};
    use crate::config::FidsConfig;
    use crate::init_rocket;

    pub use super::test_db::{STANDARD_DIGEST, TestDbBuilder, create_standard_test_db};

    pub fn test_config() -> FidsConfig {
        FidsConfig {
            password_hash_cost: TEST_HASH_COST,
            board_max_rows: 5,
            ..FidsConfig::default()
        }
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        setup_test_client_with(test_db, test_config()).await
    }

    pub async fn setup_test_client_with(test_db: TestDb, config: FidsConfig) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone(), config);
        let client = Client::tracked(rocket)
            .await
            .expect("Failed to create test client");

        (client, test_db)
    }

    /// Logs in and returns the bearer token.
    pub async fn login_test_user(client: &Client, user_id: &str, digest: &str) -> String {
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(json!({ "userID": user_id, "password": digest }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok, "Login failed for {}", user_id);

        let body: Value = response
            .into_json()
            .await
            .expect("Login response is not JSON");

        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    pub fn bearer(token: &str) -> Header<'static> {
        Header::new("Authorization", format!("Bearer {}", token))
    }
}
