//! Waitlist form controller.
//!
//! One tagged state replaces the usual `submitted` / `duplicate` / `loading`
//! flags, so combinations like "duplicate while loading" cannot exist.
//!
//! ```text
//! Idle --begin_submit (valid)--> Loading
//! Loading --Registered--> SubmittedNew        (count + 1, large burst)
//! Loading --AlreadyPresent--> SubmittedDuplicate  (small burst)
//! Loading --error--> Idle
//! Submitted* --reset--> Idle
//! ```

use tracing::{debug, info};

use crate::api::{SignupSubmission, SubmitOutcome};
use crate::email::is_valid_email;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Loading,
    SubmittedNew,
    SubmittedDuplicate,
}

impl FormState {
    pub fn is_submitted(self) -> bool {
        matches!(self, FormState::SubmittedNew | FormState::SubmittedDuplicate)
    }
}

/// Signup total as known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupCount {
    #[default]
    Unknown,
    Known(u64),
}

impl SignupCount {
    pub fn known(self) -> Option<u64> {
        match self {
            SignupCount::Unknown => None,
            SignupCount::Known(n) => Some(n),
        }
    }
}

/// Celebratory burst requested by a successful submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    /// Spread of launch angles, degrees.
    pub spread: f32,
    /// Launch origin as fractions of the overlay (`0.5, 0.6` = centre, a bit low).
    pub origin: (f32, f32),
}

impl Celebration {
    /// Played for a newly registered address.
    pub const fn large() -> Self {
        Self {
            particle_count: 100,
            spread: 70.0,
            origin: (0.5, 0.6),
        }
    }

    /// Played when the address was already on the list.
    pub const fn small() -> Self {
        Self {
            particle_count: 80,
            spread: 70.0,
            origin: (0.5, 0.6),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaitlistController {
    state: FormState,
    count: SignupCount,
    draft: String,
}

impl WaitlistController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn count(&self) -> SignupCount {
        self.count
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.state == FormState::Loading
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Start a submit. Returns the request to send, or `None` when nothing
    /// should happen (invalid draft, or not idle).
    pub fn begin_submit(&mut self) -> Option<SignupSubmission> {
        if self.state != FormState::Idle {
            return None;
        }
        if !is_valid_email(&self.draft) {
            debug!("ignoring submit of malformed email");
            return None;
        }
        self.state = FormState::Loading;
        Some(SignupSubmission {
            email: self.draft.trim().to_string(),
        })
    }

    /// Apply the submit response. Ignored unless a submit is in flight.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitOutcome, ApiError>,
    ) -> Option<Celebration> {
        if self.state != FormState::Loading {
            return None;
        }
        match result {
            Ok(SubmitOutcome::Registered) => {
                self.state = FormState::SubmittedNew;
                if let SignupCount::Known(n) = self.count {
                    self.count = SignupCount::Known(n.saturating_add(1));
                }
                self.draft.clear();
                info!("joined waitlist");
                Some(Celebration::large())
            }
            Ok(SubmitOutcome::AlreadyPresent) => {
                self.state = FormState::SubmittedDuplicate;
                self.draft.clear();
                info!("email already on waitlist");
                Some(Celebration::small())
            }
            Err(_) => {
                self.state = FormState::Idle;
                None
            }
        }
    }

    /// Back to the empty form after a successful submit.
    pub fn reset(&mut self) {
        if self.state.is_submitted() {
            self.state = FormState::Idle;
        }
    }

    /// Apply the mount-time count. The count never moves backwards.
    pub fn count_loaded(&mut self, result: Result<u64, ApiError>) {
        let Ok(n) = result else {
            return;
        };
        self.count = match self.count {
            SignupCount::Known(current) if current >= n => SignupCount::Known(current),
            _ => SignupCount::Known(n),
        };
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(n: u64) -> WaitlistController {
        let mut c = WaitlistController::new();
        c.count_loaded(Ok(n));
        c
    }

    #[test]
    fn invalid_email_is_silently_ignored() {
        let mut c = loaded(3);
        c.set_draft("not-an-email");
        assert!(c.begin_submit().is_none());
        assert_eq!(c.state(), FormState::Idle);
        assert_eq!(c.draft(), "not-an-email");
    }

    #[test]
    fn valid_email_enters_loading_with_trimmed_body() {
        let mut c = loaded(3);
        c.set_draft("  ada@example.com ");
        let s = c.begin_submit().unwrap();
        assert_eq!(s.email, "ada@example.com");
        assert!(c.is_loading());
    }

    #[test]
    fn resubmit_is_blocked_while_loading() {
        let mut c = loaded(3);
        c.set_draft("ada@example.com");
        assert!(c.begin_submit().is_some());
        assert!(c.begin_submit().is_none());
        assert_eq!(c.state(), FormState::Loading);
    }

    #[test]
    fn registered_increments_count_by_one() {
        let mut c = loaded(99);
        c.set_draft("ada@example.com");
        c.begin_submit();
        let burst = c.finish_submit(Ok(SubmitOutcome::Registered)).unwrap();
        assert_eq!(c.state(), FormState::SubmittedNew);
        assert_eq!(c.count(), SignupCount::Known(100));
        assert_eq!(burst, Celebration::large());
        assert_eq!(burst.particle_count, 100);
        assert_eq!(c.draft(), "");
    }

    #[test]
    fn duplicate_leaves_count_alone() {
        let mut c = loaded(99);
        c.set_draft("ada@example.com");
        c.begin_submit();
        let burst = c.finish_submit(Ok(SubmitOutcome::AlreadyPresent)).unwrap();
        assert_eq!(c.state(), FormState::SubmittedDuplicate);
        assert_eq!(c.count(), SignupCount::Known(99));
        assert_eq!(burst.particle_count, 80);
    }

    #[test]
    fn failure_returns_to_idle() {
        let mut c = loaded(5);
        c.set_draft("ada@example.com");
        c.begin_submit();
        let burst = c.finish_submit(Err(ApiError::Status(502)));
        assert!(burst.is_none());
        assert_eq!(c.state(), FormState::Idle);
        assert!(!c.is_loading());
        assert_eq!(c.count(), SignupCount::Known(5));
    }

    #[test]
    fn stray_response_without_submit_is_ignored() {
        let mut c = loaded(5);
        assert!(c.finish_submit(Ok(SubmitOutcome::Registered)).is_none());
        assert_eq!(c.state(), FormState::Idle);
        assert_eq!(c.count(), SignupCount::Known(5));
    }

    #[test]
    fn reset_only_leaves_submitted_states() {
        let mut c = loaded(1);
        c.set_draft("ada@example.com");
        c.begin_submit();
        c.reset();
        assert_eq!(c.state(), FormState::Loading);

        c.finish_submit(Ok(SubmitOutcome::AlreadyPresent));
        c.reset();
        assert_eq!(c.state(), FormState::Idle);
    }

    #[test]
    fn registered_with_unknown_count_stays_unknown() {
        let mut c = WaitlistController::new();
        c.set_draft("ada@example.com");
        c.begin_submit();
        c.finish_submit(Ok(SubmitOutcome::Registered));
        assert_eq!(c.count(), SignupCount::Unknown);
    }

    #[test]
    fn count_never_decreases() {
        let mut c = loaded(10);
        c.count_loaded(Ok(4));
        assert_eq!(c.count(), SignupCount::Known(10));
        c.count_loaded(Ok(12));
        assert_eq!(c.count(), SignupCount::Known(12));
        c.count_loaded(Err(ApiError::Network("offline".into())));
        assert_eq!(c.count(), SignupCount::Known(12));
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
