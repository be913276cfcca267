use chrono::{DateTime, Utc};
use std::time::SystemTime;

pub mod files;

/// Timestamp prefix for progress messages on stderr
pub fn now_str() -> String {
    let dt: DateTime<Utc> = SystemTime::now().into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
