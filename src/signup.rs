//! Sign-up action: validate the form, pick a team, append one row.
//!
//! DESIGN
//! ======
//! Capacity is decided client-side against the roster snapshot the player is
//! looking at. A full team downgrades the request to `sub`; the store is
//! never asked. Email uniqueness is the store's job; its error text is
//! matched to tell a duplicate apart from any other write failure.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::registration::{NewRegistration, RegistrationStatus, Team};
use crate::roster::Roster;
use crate::store::{RegistrationStore, StoreError};

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

pub const CANCEL_CODE_LEN: usize = 8;
pub const CANCEL_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const MISSING_FIELDS_MESSAGE: &str = "Fill in first name, last name and email.";
pub const ALREADY_REGISTERED_MESSAGE: &str = "This email is already registered.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Sign-up failed. Check the store's INSERT policy.";
pub const LOAD_FAILED_MESSAGE: &str = "Error: cannot load the list (check the store's SELECT/INSERT policies).";

/// Team a player can ask for. Substitute status is assigned, never chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamPick {
    #[default]
    White,
    Black,
}

impl TeamPick {
    #[must_use]
    pub fn team(self) -> Team {
        match self {
            Self::White => Team::White,
            Self::Black => Team::Black,
        }
    }
}

/// Raw form input as typed by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub team_pick: TeamPick,
    pub remember: bool,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            team_pick: TeamPick::White,
            remember: true,
        }
    }
}

/// Form fields after trimming and normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidSignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub team_pick: TeamPick,
}

impl SignUpForm {
    /// Trim every field and lower-case the email.
    ///
    /// # Errors
    ///
    /// Returns [`SignUpError::MissingFields`] when first name, last name or
    /// email is blank.
    pub fn validate(&self) -> Result<ValidSignUp, SignUpError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim().to_lowercase();
        if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
            return Err(SignUpError::MissingFields);
        }
        let phone = Some(self.phone.trim()).filter(|p| !p.is_empty()).map(str::to_owned);
        Ok(ValidSignUp {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            phone,
            team_pick: self.team_pick,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignUpError {
    #[error("first name, last name and email are required")]
    MissingFields,
    #[error("email already registered: {0}")]
    AlreadyRegistered(StoreError),
    #[error("registration insert failed: {0}")]
    Failed(StoreError),
    #[error("roster unavailable; team capacity unknown")]
    RosterUnavailable,
}

impl SignUpError {
    /// Message shown to the player.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields => MISSING_FIELDS_MESSAGE,
            Self::AlreadyRegistered(_) => ALREADY_REGISTERED_MESSAGE,
            Self::Failed(_) => SIGNUP_FAILED_MESSAGE,
            Self::RosterUnavailable => LOAD_FAILED_MESSAGE,
        }
    }
}

/// Sort a failed insert into duplicate vs anything else by its backend text.
#[must_use]
pub fn classify_insert_error(error: StoreError) -> SignUpError {
    let text = error.message().to_lowercase();
    if text.contains("duplicate") || text.contains("unique") {
        SignUpError::AlreadyRegistered(error)
    } else {
        SignUpError::Failed(error)
    }
}

/// Requested team if it has a free seat in `roster`, otherwise `sub`.
#[must_use]
pub fn target_team(pick: TeamPick, roster: &Roster) -> Team {
    let team = pick.team();
    if roster.has_open_seat(team) { team } else { Team::Sub }
}

/// Random cancel code. Not checked for uniqueness.
#[must_use]
pub fn generate_cancel_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CANCEL_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CANCEL_CODE_ALPHABET.len());
            char::from(CANCEL_CODE_ALPHABET[idx])
        })
        .collect()
}

/// Validate `form`, choose the team against `roster`, and insert one row.
///
/// Returns the inserted row so the caller can show its cancel code.
///
/// # Errors
///
/// [`SignUpError::MissingFields`] before any store call; otherwise the
/// classified store failure.
pub async fn sign_up<S>(store: &S, form: &SignUpForm, roster: &Roster) -> Result<NewRegistration, SignUpError>
where
    S: RegistrationStore + ?Sized,
{
    let valid = form.validate()?;
    let team = target_team(valid.team_pick, roster);
    let cancel_code = generate_cancel_code(&mut rand::rng());

    let registration = NewRegistration {
        first_name: valid.first_name,
        last_name: valid.last_name,
        email: valid.email,
        phone: valid.phone,
        team,
        cancel_code,
        status: RegistrationStatus::Active,
    };

    if let Err(error) = store.insert(&registration).await {
        let error = classify_insert_error(error);
        warn!(error = %error, "sign-up rejected");
        return Err(error);
    }
    info!(team = ?registration.team, requested = ?valid.team_pick, "sign-up accepted");
    Ok(registration)
}
