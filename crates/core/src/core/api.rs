//! Waitlist backend wire format and transport contract.
//!
//! Two calls exist: `GET {base}/waitlist` for the signup count and
//! `POST {base}/waitlist/put` with `{"email": ...}` to register. The browser
//! crate implements [`WaitlistBackend`] over `fetch`; tests use in-memory
//! fakes.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::ApiError;

pub const COUNT_PATH: &str = "/waitlist";
pub const SUBMIT_PATH: &str = "/waitlist/put";

/// Request body for a signup. Built on submit, sent once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupSubmission {
    pub email: String,
}

impl SignupSubmission {
    pub fn to_json(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The address was new.
    Registered,
    /// The backend already had it.
    AlreadyPresent,
}

impl From<SubmitResponse> for SubmitOutcome {
    fn from(r: SubmitResponse) -> Self {
        if r.result {
            SubmitOutcome::Registered
        } else {
            SubmitOutcome::AlreadyPresent
        }
    }
}

pub fn parse_count(body: &str) -> Result<u64, ApiError> {
    let r: CountResponse = serde_json::from_str(body)?;
    Ok(r.count)
}

pub fn parse_submit(body: &str) -> Result<SubmitOutcome, ApiError> {
    let r: SubmitResponse = serde_json::from_str(body)?;
    Ok(r.into())
}

/// Map a non-2xx status to an error.
pub fn check_status(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

/// Transport for the two waitlist calls.
///
/// Futures are not `Send`: in the browser they wrap JS promises and run on the
/// UI thread.
#[allow(async_fn_in_trait)]
pub trait WaitlistBackend {
    async fn fetch_count(&self) -> Result<u64, ApiError>;
    async fn submit(&self, submission: &SignupSubmission) -> Result<SubmitOutcome, ApiError>;
}

/// Mount-time count request. Failures are logged; the caller hands the
/// result to [`WaitlistController::count_loaded`](crate::waitlist::WaitlistController::count_loaded).
pub async fn request_count<B: WaitlistBackend>(backend: &B) -> Result<u64, ApiError> {
    let result = backend.fetch_count().await;
    if let Err(e) = &result {
        warn!("failed to fetch waitlist count: {e}");
    }
    result
}

/// Send a submission built by
/// [`WaitlistController::begin_submit`](crate::waitlist::WaitlistController::begin_submit).
/// Failures are logged; the caller hands the result to `finish_submit`.
pub async fn send_submission<B: WaitlistBackend>(
    backend: &B,
    submission: &SignupSubmission,
) -> Result<SubmitOutcome, ApiError> {
    let result = backend.submit(submission).await;
    if let Err(e) = &result {
        error!("failed to store email: {e}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waitlist::{Celebration, FormState, WaitlistController};
    use std::cell::{Cell, RefCell};

    /// In-memory backend that records every call.
    struct FakeBackend {
        count: Result<u64, u16>,
        known: RefCell<Vec<String>>,
        fail_submit: bool,
        submit_calls: Cell<usize>,
    }

    impl FakeBackend {
        fn new(count: u64) -> Self {
            Self {
                count: Ok(count),
                known: RefCell::new(Vec::new()),
                fail_submit: false,
                submit_calls: Cell::new(0),
            }
        }
    }

    impl WaitlistBackend for FakeBackend {
        async fn fetch_count(&self) -> Result<u64, ApiError> {
            self.count.map_err(ApiError::Status)
        }

        async fn submit(&self, submission: &SignupSubmission) -> Result<SubmitOutcome, ApiError> {
            self.submit_calls.set(self.submit_calls.get() + 1);
            if self.fail_submit {
                return Err(ApiError::Network("connection reset".into()));
            }
            let mut known = self.known.borrow_mut();
            if known.contains(&submission.email) {
                return Ok(SubmitOutcome::AlreadyPresent);
            }
            known.push(submission.email.clone());
            Ok(SubmitOutcome::Registered)
        }
    }

    /// Count load the way the page runs it.
    fn load(c: &mut WaitlistController, backend: &FakeBackend) {
        c.count_loaded(pollster::block_on(request_count(backend)));
    }

    /// Submit the way the page runs it: the controller is only borrowed
    /// before and after the request, never across it.
    fn submit(c: &mut WaitlistController, backend: &FakeBackend) -> Option<Celebration> {
        let submission = c.begin_submit()?;
        let result = pollster::block_on(send_submission(backend, &submission));
        c.finish_submit(result)
    }

    #[test]
    fn wire_bodies_match_the_backend() {
        let s = SignupSubmission {
            email: "ada@example.com".into(),
        };
        assert_eq!(s.to_json().unwrap(), r#"{"email":"ada@example.com"}"#);
        assert_eq!(parse_count(r#"{"count": 1234}"#).unwrap(), 1234);
        assert_eq!(
            parse_submit(r#"{"result": true}"#).unwrap(),
            SubmitOutcome::Registered
        );
        assert_eq!(
            parse_submit(r#"{"result": false, "extra": 1}"#).unwrap(),
            SubmitOutcome::AlreadyPresent
        );
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        assert!(matches!(parse_count("<html>"), Err(ApiError::Decode(_))));
        assert!(matches!(parse_count(r#"{"count": -1}"#), Err(ApiError::Decode(_))));
        assert!(matches!(parse_submit(r#"{"ok": true}"#), Err(ApiError::Decode(_))));
    }

    #[test]
    fn status_check() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        assert!(matches!(check_status(500), Err(ApiError::Status(500))));
        assert!(matches!(check_status(404), Err(ApiError::Status(404))));
    }

    #[test]
    fn invalid_email_never_reaches_the_backend() {
        let backend = FakeBackend::new(10);
        let mut c = WaitlistController::new();
        load(&mut c, &backend);

        c.set_draft("not-an-email");
        let celebration = submit(&mut c, &backend);

        assert!(celebration.is_none());
        assert_eq!(backend.submit_calls.get(), 0);
        assert_eq!(c.state(), FormState::Idle);
        assert_eq!(c.count().known(), Some(10));
    }

    #[test]
    fn new_then_duplicate_signup() {
        let backend = FakeBackend::new(41);
        let mut c = WaitlistController::new();
        load(&mut c, &backend);

        c.set_draft("ada@example.com");
        let first = submit(&mut c, &backend).unwrap();
        assert_eq!(c.state(), FormState::SubmittedNew);
        assert_eq!(c.count().known(), Some(42));
        assert_eq!(first.particle_count, 100);

        c.reset();
        c.set_draft("ada@example.com");
        let second = submit(&mut c, &backend).unwrap();
        assert_eq!(c.state(), FormState::SubmittedDuplicate);
        assert_eq!(c.count().known(), Some(42));
        assert_eq!(second.particle_count, 80);
        assert_eq!(backend.submit_calls.get(), 2);
    }

    #[test]
    fn network_failure_leaves_form_submittable() {
        let mut backend = FakeBackend::new(7);
        backend.fail_submit = true;
        let mut c = WaitlistController::new();
        load(&mut c, &backend);

        c.set_draft("ada@example.com");
        assert!(submit(&mut c, &backend).is_none());
        assert_eq!(c.state(), FormState::Idle);
        assert!(!c.is_loading());
        assert_eq!(c.count().known(), Some(7));
        assert_eq!(c.draft(), "ada@example.com");
    }

    #[test]
    fn count_failure_keeps_count_unknown() {
        let mut backend = FakeBackend::new(0);
        backend.count = Err(503);
        let mut c = WaitlistController::new();
        load(&mut c, &backend);
        assert_eq!(c.count().known(), None);
    }

    #[test]
    fn results_pass_through_unchanged() {
        let backend = FakeBackend::new(5);
        let s = SignupSubmission {
            email: "ada@example.com".into(),
        };
        assert_eq!(pollster::block_on(request_count(&backend)).unwrap(), 5);
        assert_eq!(
            pollster::block_on(send_submission(&backend, &s)).unwrap(),
            SubmitOutcome::Registered
        );
        assert_eq!(
            pollster::block_on(send_submission(&backend, &s)).unwrap(),
            SubmitOutcome::AlreadyPresent
        );

        let mut failing = FakeBackend::new(0);
        failing.count = Err(502);
        failing.fail_submit = true;
        assert!(matches!(
            pollster::block_on(request_count(&failing)),
            Err(ApiError::Status(502))
        ));
        assert!(matches!(
            pollster::block_on(send_submission(&failing, &s)),
            Err(ApiError::Network(_))
        ));
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let backend = FakeBackend::new(1);
        let mut c = WaitlistController::new();
        c.set_draft("ada@example.com");
        let first = c.begin_submit().unwrap();
        assert!(c.begin_submit().is_none());

        let result = pollster::block_on(send_submission(&backend, &first));
        assert!(c.finish_submit(result).is_some());
        assert_eq!(backend.submit_calls.get(), 1);
    }
}
