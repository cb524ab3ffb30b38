mod board;
mod filters;
pub mod utils;

pub use utils::{test_db, test_utils};
