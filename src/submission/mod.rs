//! Form submission flow shared by the contact form and comments.
//!
//! A [`SubmissionFlow`] walks `Idle -> Validating -> Submitting -> Success | Failed`.
//! Validation failures never reach the content backend. The [`SubmissionGuard`]
//! is the server side of the disabled submit button: a form's `submission_id`
//! can only be in flight once.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde_json::Value;

use crate::content::{ContentClient, NewObject};
use crate::errors::AppError;
use crate::models::{CommentRequest, ContactRequest};

/// Delay before a successful form resets to an empty `Idle` form.
pub const RESET_DELAY_SECS: u64 = 3;

/// A form that can be written to the bucket.
pub trait Submission {
    /// Required fields as `(name, value)` pairs, untrimmed.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    fn to_new_object(&self) -> NewObject;

    fn submission_id(&self) -> Option<&str>;
}

impl Submission for ContactRequest {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]
    }

    fn to_new_object(&self) -> NewObject {
        ContactRequest::to_new_object(self)
    }

    fn submission_id(&self) -> Option<&str> {
        self.submission_id.as_deref()
    }
}

impl Submission for CommentRequest {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("comment", self.comment.as_str()),
        ]
    }

    fn to_new_object(&self) -> NewObject {
        CommentRequest::to_new_object(self)
    }

    fn submission_id(&self) -> Option<&str> {
        self.submission_id.as_deref()
    }
}

/// Check that every required field is non-empty after trimming.
pub fn validate<S: Submission + ?Sized>(form: &S) -> Result<(), AppError> {
    let missing: Vec<&str> = form
        .required_fields()
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please fill in the required fields: {}",
            missing.join(", ")
        )))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed(AppError),
}

#[derive(Debug)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Enter `Validating`. Refused while a submission is in progress.
    pub fn begin(&mut self) -> Result<(), AppError> {
        if self.is_submitting() {
            return Err(AppError::BadRequest(
                "A submission is already in progress".to_string(),
            ));
        }
        self.state = SubmissionState::Validating;
        Ok(())
    }

    /// Back to `Idle` once the confirmation or error has been shown. Pages
    /// get this from the refresh back to a blank form.
    #[cfg(test)]
    pub fn reset(&mut self) {
        if !self.is_submitting() {
            self.state = SubmissionState::Idle;
        }
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.state = SubmissionState::Failed(err.clone());
        err
    }

    /// Validate and write `form`, returning the created object.
    pub async fn submit<S: Submission + ?Sized>(
        &mut self,
        client: &dyn ContentClient,
        form: &S,
    ) -> Result<Value, AppError> {
        self.begin()?;

        if let Err(err) = validate(form) {
            return Err(self.fail(err));
        }

        self.state = SubmissionState::Submitting;
        let object = form.to_new_object();

        match client.insert_one(&object).await {
            Ok(created) => {
                tracing::info!(
                    "Accepted {} submission from {:?}",
                    object.object_type,
                    object.title
                );
                self.state = SubmissionState::Success;
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Failed to submit {}: {}", object.object_type, e);
                let err = AppError::from(e).into_submission_failure();
                Err(self.fail(err))
            }
        }
    }
}

/// Ids of submissions currently being written.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Mutex<HashSet<String>>,
}

/// Held while a submission is in flight; releases its id on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    guard: &'a SubmissionGuard,
    id: Option<String>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.guard.in_flight.lock().remove(&id);
        }
    }
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Returns `None` when the same id is already in flight.
    /// A form without an id is not tracked.
    pub fn acquire(&self, id: Option<&str>) -> Option<InFlight<'_>> {
        let id = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                return Some(InFlight {
                    guard: self,
                    id: None,
                })
            }
        };

        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(id.clone()) {
            tracing::debug!("Rejecting duplicate submission {}", id);
            return None;
        }
        Some(InFlight {
            guard: self,
            id: Some(id),
        })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// A fresh id for a newly rendered form.
pub fn new_submission_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, ObjectQuery};
    use async_trait::async_trait;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingClient {
        inserts: Mutex<Vec<NewObject>>,
        fail_with: Option<ContentError>,
    }

    #[async_trait]
    impl ContentClient for RecordingClient {
        async fn find(&self, _query: &ObjectQuery) -> Result<Vec<Value>, ContentError> {
            Ok(Vec::new())
        }

        async fn find_one(&self, _query: &ObjectQuery) -> Result<Option<Value>, ContentError> {
            Ok(None)
        }

        async fn insert_one(&self, object: &NewObject) -> Result<Value, ContentError> {
            self.inserts.lock().push(object.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(json!({ "id": "new-id", "title": object.title })),
            }
        }
    }

    fn contact(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            company: String::new(),
            message: message.to_string(),
            submission_id: None,
        }
    }

    #[test]
    fn test_validate_rejects_whitespace_only() {
        let err = validate(&contact("  ", "a@b.c", "\n\t")).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Please fill in the required fields: name, message".to_string())
        );
        assert!(validate(&contact("Ana", "a@b.c", "Hello")).is_ok());
    }

    #[test]
    fn test_guard_keys_on_form_submission_id() {
        let guard = SubmissionGuard::new();
        let mut first = contact("Ana", "a@b.c", "Hi");
        first.submission_id = Some("form-1".to_string());
        let comment = CommentRequest {
            submission_id: Some("form-1".to_string()),
            ..Default::default()
        };

        let held = guard.acquire(first.submission_id());
        assert!(held.is_some());
        assert!(guard.acquire(comment.submission_id()).is_none());
        drop(held);
        assert!(guard.acquire(comment.submission_id()).is_some());
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_backend() {
        let client = RecordingClient::default();
        let mut flow = SubmissionFlow::new();

        let result = flow.submit(&client, &contact("Ana", " ", "Hi")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(matches!(flow.state(), SubmissionState::Failed(AppError::Validation(_))));
        assert!(client.inserts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submission_maps_fields() {
        let client = RecordingClient::default();
        let mut flow = SubmissionFlow::new();
        let mut form = contact(" Ana ", "ana@example.com", " Great game ");
        form.company = "Studio".to_string();

        let created = flow.submit(&client, &form).await.unwrap();

        assert_eq!(created["id"], "new-id");
        assert_eq!(flow.state(), &SubmissionState::Success);
        let inserts = client.inserts.lock();
        assert_eq!(inserts[0].object_type, "form-submissions");
        assert_eq!(inserts[0].title, "Ana");
        assert_eq!(inserts[0].metadata["message"], "Great game");
        assert_eq!(inserts[0].metadata["company"], "Studio");

        drop(inserts);
        flow.reset();
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_submission_failure() {
        let client = RecordingClient {
            fail_with: Some(ContentError::Transport("connection reset".to_string())),
            ..Default::default()
        };
        let mut flow = SubmissionFlow::new();
        let form = CommentRequest {
            name: "Leo".to_string(),
            email: "leo@example.com".to_string(),
            comment: "Nerf the hunter".to_string(),
            submission_id: None,
        };

        let err = flow.submit(&client, &form).await.unwrap_err();

        assert!(matches!(err, AppError::SubmissionFailure(_)));
        assert!(!flow.is_submitting());
        assert_eq!(client.inserts.lock()[0].object_type, "comments");
    }

    #[test]
    fn test_begin_refused_while_submitting() {
        let mut flow = SubmissionFlow::new();
        flow.state = SubmissionState::Submitting;
        assert!(flow.begin().is_err());
        flow.reset();
        assert_eq!(flow.state(), &SubmissionState::Submitting);
    }

    #[test]
    fn test_guard_rejects_same_id_while_in_flight() {
        let guard = SubmissionGuard::new();
        let first = guard.acquire(Some("abc"));
        assert!(first.is_some());
        assert!(guard.acquire(Some("abc")).is_none());
        assert!(guard.acquire(Some("other")).is_some());

        drop(first);
        assert_eq!(guard.in_flight(), 0);
        assert!(guard.acquire(Some("abc")).is_some());
    }

    #[test]
    fn test_guard_ignores_missing_id() {
        let guard = SubmissionGuard::new();
        let a = guard.acquire(None);
        let b = guard.acquire(Some("  "));
        assert!(a.is_some() && b.is_some());
        assert_eq!(guard.in_flight(), 0);
    }
}
