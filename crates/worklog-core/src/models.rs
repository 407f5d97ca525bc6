//! Domain models exchanged with the worklog API.
//!
//! All types round-trip through [`crate::codec`]: reads tolerate any
//! property-name casing, writes omit unset optional fields.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// `yyyy-MM-dd`, the date form the API consumes in query parameters.
pub fn format_iso_date(date: Date) -> String {
    date.format(&ISO_DATE_FORMAT)
        .expect("static date format descriptor is valid")
}

/// Parse a `yyyy-MM-dd` date.
pub fn parse_iso_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), &ISO_DATE_FORMAT)
}

/// A single work report ("parte"). Times are zero-padded `HH:MM` strings as
/// served by the API, which also makes lexicographic order chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkEntry {
    /// Minimal entry for a given day; everything else unset.
    pub fn for_date(date: Date) -> Self {
        Self {
            id: None,
            date,
            start_time: None,
            end_time: None,
            client: None,
            site: None,
            action: None,
            ticket: None,
            group: None,
            entry_type: None,
            technician: None,
            status: None,
            notes: None,
        }
    }
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Raw login response; servers either return an explicit token or rely on a
/// session cookie and return neither field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Authenticated-session outcome handed back by
/// [`crate::ApiClient::login`]. `token` is always present: either the
/// server's own token or the cookie-session sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: Option<String>,
}
