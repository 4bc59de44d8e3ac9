//! Sign-up page controller: form, roster snapshot and status line.
//!
//! DESIGN
//! ======
//! The page keeps the last successfully fetched rows and the roster derived
//! from them. A failed fetch only swaps the status line to the load error,
//! so the previous roster stays visible until the next poll succeeds.
//! Results may come from `refresh` or from the poller; both go through
//! `apply_fetch`, and whichever lands last wins.

use std::sync::Arc;

use tracing::{info, warn};

use crate::identity::{IdentityMemory, RememberedIdentity};
use crate::registration::{NewRegistration, Registration};
use crate::roster::{Roster, partition};
use crate::signup::{LOAD_FAILED_MESSAGE, SignUpError, SignUpForm, sign_up};
use crate::store::{RegistrationStore, StoreError};

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

#[must_use]
pub fn signed_up_message(cancel_code: &str) -> String {
    format!("Done ✅ You are registered. Cancellation code: {cancel_code}")
}

/// Everything the page renders.
#[derive(Clone, Debug)]
pub struct PageState {
    pub form: SignUpForm,
    pub rows: Vec<Registration>,
    pub roster: Roster,
    pub loading: bool,
    pub message: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            form: SignUpForm::default(),
            rows: Vec::new(),
            roster: Roster::default(),
            loading: true,
            message: None,
        }
    }
}

impl PageState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.message = None;
    }

    /// Apply one fetch result. Returns whether the rows were replaced.
    ///
    /// A successful fetch clears a load error left by an earlier failure;
    /// any other status line (e.g. a sign-up result) is kept.
    pub fn apply_fetch(&mut self, result: Result<Vec<Registration>, StoreError>) -> bool {
        self.loading = false;
        match result {
            Ok(rows) => {
                self.roster = partition(&rows);
                self.rows = rows;
                if self.message.as_deref() == Some(LOAD_FAILED_MESSAGE) {
                    self.message = None;
                }
                true
            }
            Err(error) => {
                warn!(%error, "roster load failed; keeping previous rows");
                self.message = Some(LOAD_FAILED_MESSAGE.to_owned());
                false
            }
        }
    }
}

pub struct SignupPage<S: ?Sized> {
    store: Arc<S>,
    identity: IdentityMemory,
    state: PageState,
}

impl<S> SignupPage<S>
where
    S: RegistrationStore + ?Sized,
{
    pub fn new(store: Arc<S>, identity: IdentityMemory) -> Self {
        Self { store, identity, state: PageState::default() }
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut SignUpForm {
        &mut self.state.form
    }

    /// Pre-fill the form from identity memory. Returns whether anything was found.
    pub fn mount(&mut self) -> bool {
        match self.identity.load() {
            Some(remembered) => {
                remembered.prefill(&mut self.state.form);
                true
            }
            None => false,
        }
    }

    /// Fetch the active list now. Returns whether it loaded.
    pub async fn refresh(&mut self) -> bool {
        self.state.begin_load();
        let result = self.store.list_active().await;
        self.state.apply_fetch(result)
    }

    /// Apply a fetch result delivered by the poller.
    pub fn apply_fetch(&mut self, result: Result<Vec<Registration>, StoreError>) -> bool {
        self.state.apply_fetch(result)
    }

    /// Reload the roster, then submit against it. Nothing is inserted when
    /// the roster cannot be loaded, since team capacity would be unknown.
    ///
    /// # Errors
    ///
    /// [`SignUpError::RosterUnavailable`] when the reload fails; otherwise
    /// as [`SignupPage::submit`].
    pub async fn submit_fresh(&mut self) -> Result<NewRegistration, SignUpError> {
        if !self.refresh().await {
            return Err(SignUpError::RosterUnavailable);
        }
        self.submit().await
    }

    /// Submit the current form against the current roster snapshot.
    ///
    /// On success the identity is remembered (or forgotten when `remember`
    /// is off), the roster is refreshed, and the status line shows the
    /// cancel code.
    ///
    /// # Errors
    ///
    /// Returns the sign-up failure; its user message is already on the
    /// status line.
    pub async fn submit(&mut self) -> Result<NewRegistration, SignUpError> {
        self.state.message = None;
        let inserted = match sign_up(self.store.as_ref(), &self.state.form, &self.state.roster).await {
            Ok(inserted) => inserted,
            Err(error) => {
                self.state.message = Some(error.user_message().to_owned());
                return Err(error);
            }
        };

        self.persist_identity(&inserted);
        if !self.refresh().await {
            warn!("roster reload after sign-up failed");
        }
        self.state.message = Some(signed_up_message(&inserted.cancel_code));
        Ok(inserted)
    }

    fn persist_identity(&self, inserted: &NewRegistration) {
        let form = &self.state.form;
        let outcome = if form.remember {
            let mut remembered = RememberedIdentity::from_form(form);
            remembered.first_name.clone_from(&inserted.first_name);
            remembered.last_name.clone_from(&inserted.last_name);
            remembered.email.clone_from(&inserted.email);
            remembered.phone = inserted.phone.clone().unwrap_or_default();
            self.identity.save(&remembered)
        } else {
            self.identity.clear()
        };
        match outcome {
            Ok(()) => info!(remember = form.remember, path = %self.identity.path().display(), "identity memory updated"),
            Err(error) => warn!(%error, "identity memory update failed"),
        }
    }
}
