//! # Person Module
//!
//! Account holder identity (`PersonalInfo`) plus the timestamp helpers shared
//! by every record that stores a date.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// Format of the account opening date in stored documents
pub const OPENING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identity of an account holder.
///
/// `opened_at` is stamped when the account is created and survives reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfo {
    /// Full name
    pub name: String,
    /// Date of birth as entered (free text)
    pub date_of_birth: String,
    /// National identity number (CNIC)
    pub national_id: String,
    /// Postal address
    pub address: String,
    /// Account opening time
    pub opened_at: DateTime<Utc>,
}

impl PersonalInfo {
    /// Create PersonalInfo stamped with the current time
    pub fn new(name: &str, date_of_birth: &str, national_id: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            date_of_birth: date_of_birth.to_string(),
            national_id: national_id.to_string(),
            address: address.to_string(),
            opened_at: now_seconds(),
        }
    }

    /// Override the opening time (used when rebuilding from storage)
    pub fn opened_at(mut self, opened_at: DateTime<Utc>) -> Self {
        self.opened_at = opened_at;
        self
    }

    /// Opening date as `YYYY-MM-DD HH:MM:SS`
    pub fn formatted_opening_date(&self) -> String {
        self.opened_at.format(OPENING_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for PersonalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "DOB: {}", self.date_of_birth)?;
        writeln!(f, "CNIC: {}", self.national_id)?;
        writeln!(f, "Address: {}", self.address)?;
        write!(f, "Account Opening Date: {}", self.formatted_opening_date())
    }
}

/// Current time truncated to whole seconds (the stored precision)
pub fn now_seconds() -> DateTime<Utc> {
    Utc.timestamp_opt(Utc::now().timestamp(), 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Parse a stored `YYYY-MM-DD HH:MM:SS` string
pub fn parse_formatted(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), OPENING_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert epoch seconds to a timestamp
pub fn from_epoch_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
