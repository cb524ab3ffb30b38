use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::AppError;

/// Verified against when the user id is unknown, one per bcrypt cost, so both
/// failure paths do the same amount of work.
static DUMMY_HASHES: Lazy<Mutex<HashMap<u32, String>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Hashes the digest the client submits. The client digest itself is never stored.
pub fn hash_credential(digest: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(digest, cost)?)
}

/// Hash standing in for an unknown user, built at the same cost as stored credentials.
pub fn dummy_hash(cost: u32) -> Option<String> {
    if let Some(hash) = DUMMY_HASHES.lock().ok()?.get(&cost) {
        return Some(hash.clone());
    }

    let hash = bcrypt::hash("unknown-user", cost).ok()?;
    if let Ok(mut cache) = DUMMY_HASHES.lock() {
        cache.entry(cost).or_insert_with(|| hash.clone());
    }
    Some(hash)
}

pub fn verify_credential(digest: &str, stored: Option<&str>, cost: u32) -> bool {
    match stored {
        Some(hash) => match bcrypt::verify(digest, hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(error = %e, "Stored credential is not a valid hash");
                false
            }
        },
        None => {
            if let Some(hash) = dummy_hash(cost) {
                let _ = bcrypt::verify(digest, &hash);
            }
            false
        }
    }
}
