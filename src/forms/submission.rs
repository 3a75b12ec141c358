//! Form submission controller
//!
//! Owns the record of one open form and drives it through
//! `idle -> submitting -> success | error`. Validation runs before anything
//! touches the network; at most one request is in flight per instance; a
//! result that arrives after the form was abandoned is dropped.
//!
//! Submissions carry no idempotency key. Retrying after a network failure can
//! therefore create a second lead on the server if the first request did
//! reach it.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::capabilities::{Notice, NoticeKind, Notifier};
use super::error::{FormFailure, SubmissionError, ValidationErrors};
use super::schema::{FormKind, FormSchema, SuccessBehavior};
use super::value::{FieldValue, FormRequest};

/// Delivers a validated record to its endpoint
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, endpoint: &str, payload: &serde_json::Value)
        -> Result<(), SubmissionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

/// Result of one `submit()` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    Failed(SubmissionError),
    /// Another submission of this form is still in flight; nothing was sent
    AlreadySubmitting,
    /// The form was closed; any result was discarded
    Abandoned,
}

#[derive(Debug)]
struct ControllerState {
    record: FormRequest,
    status: SubmissionStatus,
    failure: Option<FormFailure>,
    generation: u64,
    abandoned: bool,
}

/// Cloneable handle to one form instance's submission state
#[derive(Clone)]
pub struct SubmissionController {
    schema: &'static FormSchema,
    /// What the record resets to after a successful submit
    initial: FormRequest,
    state: Arc<Mutex<ControllerState>>,
    submitter: Arc<dyn FormSubmitter>,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionController {
    /// Start from the schema defaults.
    pub fn new(
        kind: FormKind,
        submitter: Arc<dyn FormSubmitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let schema = kind.schema();
        Self::with_record(kind, schema.defaults(), submitter, notifier)
    }

    /// Start from a prepared record (defaults plus prefill).
    pub fn with_record(
        kind: FormKind,
        initial: FormRequest,
        submitter: Arc<dyn FormSubmitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            schema: kind.schema(),
            state: Arc::new(Mutex::new(ControllerState {
                record: initial.clone(),
                status: SubmissionStatus::Idle,
                failure: None,
                generation: 0,
                abandoned: false,
            })),
            initial,
            submitter,
            notifier,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.lock().status
    }

    /// Snapshot of the current record
    pub fn record(&self) -> FormRequest {
        self.state.lock().record.clone()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        let state = self.state.lock();
        !state.abandoned && state.status != SubmissionStatus::Submitting
    }

    /// Field messages from the last failed validation
    pub fn field_errors(&self) -> ValidationErrors {
        match &self.state.lock().failure {
            Some(FormFailure::Validation(errors)) => errors.clone(),
            _ => ValidationErrors::new(),
        }
    }

    /// Form-level message from the last failed request
    pub fn form_error(&self) -> Option<SubmissionError> {
        match &self.state.lock().failure {
            Some(FormFailure::Submission(error)) => Some(error.clone()),
            _ => None,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.state.lock().abandoned
    }

    pub fn update_field(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let mut state = self.state.lock();
        if state.abandoned {
            return;
        }
        state.record.update_field(name, value);
    }

    /// Add or remove one option of a multi-select field.
    pub fn toggle_option(&self, name: &str, option: &str) -> bool {
        let mut state = self.state.lock();
        if state.abandoned {
            return false;
        }
        state.record.toggle_option(name, option)
    }

    /// Put the record back to its initial values and clear any failure.
    ///
    /// Ignored while a request is in flight; the pending request settles the
    /// status first.
    pub fn reset(&self) -> bool {
        let mut state = self.state.lock();
        if state.status == SubmissionStatus::Submitting {
            debug!(form = %self.schema.kind, "Reset ignored, request already in flight");
            return false;
        }
        state.record = self.initial.clone();
        state.status = SubmissionStatus::Idle;
        state.failure = None;
        state.generation += 1;
        true
    }

    /// Detach this instance: later results are ignored and edits are dropped.
    /// A request already in flight is not cancelled.
    pub fn abandon(&self) {
        let mut state = self.state.lock();
        state.abandoned = true;
        state.generation += 1;
    }

    /// Validate and send the record as it is at the moment of the call.
    pub async fn submit(&self) -> SubmitOutcome {
        let kind = self.schema.kind;
        let (payload, generation) = {
            let mut state = self.state.lock();
            if state.abandoned {
                return SubmitOutcome::Abandoned;
            }
            if state.status == SubmissionStatus::Submitting {
                debug!(form = %kind, "Submit ignored, request already in flight");
                return SubmitOutcome::AlreadySubmitting;
            }

            if let Err(errors) = self.schema.validate(&state.record) {
                state.status = SubmissionStatus::Error;
                state.failure = Some(FormFailure::Validation(errors.clone()));
                drop(state);

                warn!(form = %kind, fields = errors.len(), "Form failed validation");
                self.notifier.notify(Notice::new(
                    NoticeKind::ValidationError,
                    "Please check the form",
                    format!("{} required field(s) need attention", errors.len()),
                ));
                return SubmitOutcome::Invalid(errors);
            }

            state.status = SubmissionStatus::Submitting;
            state.failure = None;
            (state.record.to_json(), state.generation)
        };

        info!(form = %kind, endpoint = self.schema.endpoint, "Submitting form");
        let result = self.submitter.submit(self.schema.endpoint, &payload).await;

        let mut state = self.state.lock();
        if state.abandoned || state.generation != generation {
            debug!(form = %kind, "Discarding result for abandoned form");
            return SubmitOutcome::Abandoned;
        }

        match result {
            Ok(()) => {
                state.status = SubmissionStatus::Success;
                if self.schema.on_success == SuccessBehavior::Reset {
                    state.record = self.initial.clone();
                }
                drop(state);

                info!(form = %kind, "Form submitted");
                self.notifier.notify(Notice::new(
                    NoticeKind::Success,
                    "Thank you!",
                    self.schema.success_message,
                ));
                SubmitOutcome::Submitted
            }
            Err(error) => {
                state.status = SubmissionStatus::Error;
                state.failure = Some(FormFailure::Submission(error.clone()));
                drop(state);

                warn!(form = %kind, error = %error, "Form submission failed");
                self.notifier.notify(Notice::new(
                    NoticeKind::SubmissionError,
                    "Submission failed",
                    format!("{}. Please try again.", error),
                ));
                SubmitOutcome::Failed(error)
            }
        }
    }
}
