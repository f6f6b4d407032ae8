// ABOUTME: Boundary normalization for agent profiles
// ABOUTME: String-or-list coercion and age derivation from date of birth

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::types::AgentProfile;

/// Deserialize a list field that may arrive as a native list, a JSON-encoded
/// list string, a comma-separated string, or null.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Text(String),
    }

    let raw = Option::<ListOrString>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(ListOrString::List(items)) => items,
        Some(ListOrString::Text(text)) => coerce_list_string(&text),
    })
}

/// Coerce a string-typed list field into a list of strings.
fn coerce_list_string(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items;
        }
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl AgentProfile {
    /// Fill in `age` from `dateOfBirth` when absent, using today's date.
    pub fn resolve_age(&mut self) {
        self.resolve_age_at(Local::now().date_naive());
    }

    /// Fill in `age` from `dateOfBirth` when absent, against a fixed date.
    ///
    /// Parse failures are logged and leave the profile unchanged; they never
    /// fail the request.
    pub fn resolve_age_at(&mut self, today: NaiveDate) {
        if self.age.is_some() {
            return;
        }
        let Some(raw) = self.date_of_birth.as_deref() else {
            return;
        };
        match parse_birth_date(raw) {
            Some(dob) => self.age = Some(age_on(dob, today)),
            None => warn!("Unparseable dateOfBirth '{}'; leaving age unset", raw),
        }
    }
}

/// Parse a `YYYY-MM-DD` birth date, truncating any ISO time component.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Whole years elapsed, counting a not-yet-occurred birthday as one less.
fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
