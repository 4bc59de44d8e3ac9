//! Identity memory: the last-used form fields, kept in one local JSON file.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loaded once when the form mounts and rewritten after a remembered
//! sign-up. Reads are lenient field by field so a hand-edited or
//! half-written file still pre-fills whatever it can; anything that is not a
//! JSON object is ignored outright.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::signup::{SignUpForm, TeamPick};

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity file I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("identity encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Remembered form fields. Keys are camelCase on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub team_pick: TeamPick,
    pub remember: bool,
}

impl RememberedIdentity {
    #[must_use]
    pub fn from_form(form: &SignUpForm) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            team_pick: form.team_pick,
            remember: form.remember,
        }
    }

    /// Copy the remembered fields into `form`.
    pub fn prefill(&self, form: &mut SignUpForm) {
        form.first_name.clone_from(&self.first_name);
        form.last_name.clone_from(&self.last_name);
        form.email.clone_from(&self.email);
        form.phone.clone_from(&self.phone);
        form.team_pick = self.team_pick;
        form.remember = self.remember;
    }

    /// Lenient decode of a stored value. Returns `None` for non-objects.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let text = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();
        let team_pick = match map.get("teamPick").and_then(Value::as_str) {
            Some("black") => TeamPick::Black,
            _ => TeamPick::White,
        };
        let remember = !matches!(map.get("remember"), Some(Value::Bool(false)));
        Some(Self {
            first_name: text("firstName"),
            last_name: text("lastName"),
            email: text("email"),
            phone: text("phone"),
            team_pick,
            remember,
        })
    }
}

/// File-backed identity memory.
#[derive(Clone, Debug)]
pub struct IdentityMemory {
    path: PathBuf,
}

impl IdentityMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remembered identity. Missing, unreadable or malformed files
    /// yield `None`.
    #[must_use]
    pub fn load(&self) -> Option<RememberedIdentity> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) => {
                if error.kind() != ErrorKind::NotFound {
                    debug!(path = %self.path.display(), %error, "identity file unreadable; ignoring");
                }
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => RememberedIdentity::from_value(&value),
            Err(error) => {
                debug!(path = %self.path.display(), %error, "identity file malformed; ignoring");
                None
            }
        }
    }

    /// Overwrite the stored identity, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, identity: &RememberedIdentity) -> Result<(), IdentityError> {
        let raw = serde_json::to_string(identity)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        std::fs::write(&self.path, raw).map_err(|source| self.io_error(source))
    }

    /// Forget the stored identity. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<(), IdentityError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> IdentityError {
        IdentityError::Io { path: self.path.clone(), source }
    }
}
