//! Registration rows as stored in the `registrations` table.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

/// Team tag carried by a registration row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    White,
    Black,
    Sub,
}

impl Team {
    /// Human-readable label used in roster output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Sub => "Substitute",
        }
    }
}

/// Lifecycle status of a registration row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Active,
    Cancelled,
}

/// A registration row as returned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub team: Team,
    pub cancel_code: String,
    pub status: RegistrationStatus,
}

impl Registration {
    /// Compact display name: first name plus last-name initial, e.g. `"Peter K."`.
    #[must_use]
    pub fn short_name(&self) -> String {
        short_name(&self.first_name, &self.last_name)
    }
}

/// Insert payload for a new registration. `id` and `created_at` are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub team: Team,
    pub cancel_code: String,
    pub status: RegistrationStatus,
}

fn short_name(first_name: &str, last_name: &str) -> String {
    let initial = last_name
        .trim()
        .chars()
        .next()
        .map(|c| format!("{c}."))
        .unwrap_or_default();
    format!("{first_name} {initial}").trim().to_owned()
}
