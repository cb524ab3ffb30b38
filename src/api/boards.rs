use chrono::Local;
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::tokio::select;
use rocket::tokio::time::{self, Duration};
use rocket::{Shutdown, State};
use sqlx::{Pool, Sqlite};

use crate::board::{Board, BoardKind, build_board};
use crate::config::FidsConfig;
use crate::db::list_flights;
use crate::error::AppError;
use crate::models::FlightFilter;

fn board_kind(kind: &str) -> Result<BoardKind, AppError> {
    BoardKind::parse(kind).ok_or_else(|| AppError::NotFound(format!("Unknown board {}", kind)))
}

pub async fn load_board(
    pool: &Pool<Sqlite>,
    kind: BoardKind,
    max_rows: usize,
) -> Result<Board, AppError> {
    let flights = list_flights(pool, &FlightFilter::default()).await?;
    Ok(build_board(
        &flights,
        kind,
        Local::now().naive_local(),
        max_rows,
    ))
}

#[get("/boards/<kind>?<limit>")]
pub async fn api_board(
    kind: &str,
    limit: Option<usize>,
    db: &State<Pool<Sqlite>>,
    config: &State<FidsConfig>,
) -> Result<Json<Board>, AppError> {
    let kind = board_kind(kind)?;
    let board = load_board(db, kind, limit.unwrap_or(config.board_max_rows)).await?;
    Ok(Json(board))
}

/// Pushes a `board` event every refresh period until the client goes away or
/// the server shuts down. A failed refresh is logged and retried on the next tick.
#[get("/boards/<kind>/stream?<limit>")]
pub fn api_board_stream(
    kind: &str,
    limit: Option<usize>,
    db: &State<Pool<Sqlite>>,
    config: &State<FidsConfig>,
    mut shutdown: Shutdown,
) -> Result<EventStream![], AppError> {
    let kind = board_kind(kind)?;
    let pool = db.inner().clone();
    let max_rows = limit.unwrap_or(config.board_max_rows);
    let period = Duration::from_secs(config.board_refresh_secs.max(1));

    Ok(EventStream! {
        let mut interval = time::interval(period);
        loop {
            select! {
                _ = interval.tick() => {},
                _ = &mut shutdown => break,
            };

            match load_board(&pool, kind, max_rows).await {
                Ok(board) => yield Event::json(&board).event("board"),
                Err(e) => e.log_and_record("Board stream refresh"),
            }
        }
    })
}
