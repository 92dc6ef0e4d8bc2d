//! Time utilities: parsing HH:MM, minutes since midnight, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Minutes since midnight for an `HH:MM` string.
pub fn minutes_of_day(t: &str) -> Option<i64> {
    parse_time(t).map(|nt| (nt.hour() * 60 + nt.minute()) as i64)
}

/// Validate a user-supplied `HH:MM`, normalizing "9:05" to "09:05".
pub fn normalize_time(input: &str) -> AppResult<String> {
    parse_time(input)
        .map(|t| t.format("%H:%M").to_string())
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

/// "14:05" → "2:05 PM", "" → "--"
pub fn format_time12(t: &str) -> String {
    match parse_time(t) {
        Some(nt) => {
            let (pm, h) = nt.hour12();
            format!("{}:{:02} {}", h, nt.minute(), if pm { "PM" } else { "AM" })
        }
        None => "--".to_string(),
    }
}
