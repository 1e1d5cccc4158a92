//! Id and clock helpers.
//!
//! Ids look like `1718000000000-3f2a9c1e`: the generation time in epoch
//! millis followed by a random suffix, so they sort roughly by creation
//! time and stay unique when several are minted in the same millisecond.

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh time-stamped id
pub fn generate_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", now_millis(), &suffix[..8])
}
