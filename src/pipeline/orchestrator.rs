// src/pipeline/orchestrator.rs

//! Submission orchestrator.
//!
//! ```text
//! Idle ──Submit──▶ Submitting ──Completed──▶ Settled(Succeeded)
//!                   │    ▲   │
//!                   └Submit┘ └───Failed─────▶ Settled(Failed)
//! ```
//!
//! `Submit` always starts a new submission, also while one is in flight:
//! nothing debounces a second submit. Every result settles the machine, and
//! the busy indicator is hidden as the last effect of both settling
//! transitions.

use crate::error::Result;
use crate::models::{FormData, ReportReceipt, fields, now_iso8601};
use crate::services::{ReportSubmitter, ReportTransport};
use crate::view::{ReportPage, SuccessMessage};

/// Notification raised after a successful submission.
pub const SUCCESS_ALERT: &str = "Your incident report has been submitted successfully!";

/// Notification raised after any failed submission.
pub const FAILURE_ALERT: &str = "Failed to submit the report. Please try again.";

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { report_id: Option<String> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Settled(Outcome),
}

impl SubmissionState {
    /// Whether no submission is in flight.
    pub fn is_idle(&self) -> bool {
        !matches!(self, SubmissionState::Submitting)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// The form was submitted
    Submit,
    /// The backend accepted the report
    Completed(ReportReceipt),
    /// The submission failed; carries the detail for the log
    Failed(String),
}

/// Side effects requested by a transition, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PreventDefault,
    ShowSpinner,
    SendReport,
    AppendSuccess(SuccessMessage),
    Alert(String),
    LogError(String),
    HideSpinner,
}

/// Compute the next state and the effects of `event`.
pub fn transition(
    state: &SubmissionState,
    event: SubmissionEvent,
) -> (SubmissionState, Vec<Effect>) {
    use SubmissionEvent as E;
    use SubmissionState as S;

    match (state, event) {
        (_, E::Submit) => (
            S::Submitting,
            vec![Effect::PreventDefault, Effect::ShowSpinner, Effect::SendReport],
        ),
        (_, E::Completed(receipt)) => {
            let report_id = receipt.report_id();
            (
                S::Settled(Outcome::Succeeded {
                    report_id: report_id.clone(),
                }),
                vec![
                    Effect::AppendSuccess(SuccessMessage { report_id }),
                    Effect::Alert(SUCCESS_ALERT.to_string()),
                    Effect::HideSpinner,
                ],
            )
        }
        (_, E::Failed(message)) => (
            S::Settled(Outcome::Failed {
                message: message.clone(),
            }),
            vec![
                Effect::LogError(message),
                Effect::Alert(FAILURE_ALERT.to_string()),
                Effect::HideSpinner,
            ],
        ),
    }
}

/// Drives one page's submissions through the state machine.
pub struct SubmissionOrchestrator<T> {
    submitter: ReportSubmitter<T>,
    college_code: String,
    state: SubmissionState,
}

impl<T: ReportTransport> SubmissionOrchestrator<T> {
    pub fn new(submitter: ReportSubmitter<T>, college_code: impl Into<String>) -> Self {
        Self {
            submitter,
            college_code: college_code.into(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Build the payload from the page's form snapshot.
    ///
    /// The college code is forced; category, type and description are
    /// re-read from their controls; a blank date becomes the current time.
    pub fn assemble_payload(&self, page: &ReportPage) -> FormData {
        let mut payload = page.form_data();
        payload.set_text(fields::COLLEGE_CODE, self.college_code.as_str());
        payload.set_text(fields::INCIDENT_CATEGORY, page.category_value());
        payload.set_text(fields::INCIDENT_TYPE, page.type_value());
        payload.set_text(fields::DESCRIPTION, page.description_value());
        let date = match page.date_value() {
            "" => now_iso8601(),
            date => date.to_string(),
        };
        payload.set_text(fields::DATE, date);
        payload
    }

    pub fn submitter(&self) -> &ReportSubmitter<T> {
        &self.submitter
    }

    /// Start a submission from the page's current state.
    ///
    /// Returns the payload to send, or `None` when the page has no form.
    /// The page is not borrowed afterwards, so it stays editable and can be
    /// submitted again while this payload is in flight.
    pub fn begin(&mut self, page: &mut ReportPage) -> Option<FormData> {
        page.form.as_ref()?;

        self.dispatch(SubmissionEvent::Submit, page);

        log::info!("Submitting form...");
        let payload = self.assemble_payload(page);
        if let Some(image) = page.selected_image() {
            log::info!(
                "Image file: name={}, size={}, type={}",
                image.file_name,
                image.size(),
                image.content_type
            );
        }
        Some(payload)
    }

    /// Render the result of a submission on the page.
    pub fn settle(&mut self, page: &mut ReportPage, result: Result<ReportReceipt>) -> Outcome {
        let (event, outcome) = match result {
            Ok(receipt) => {
                log::info!("Report submitted successfully: {}", receipt.0);
                let report_id = receipt.report_id();
                (
                    SubmissionEvent::Completed(receipt),
                    Outcome::Succeeded { report_id },
                )
            }
            Err(e) => {
                let message = e.to_string();
                (
                    SubmissionEvent::Failed(message.clone()),
                    Outcome::Failed { message },
                )
            }
        };
        self.dispatch(event, page);
        outcome
    }

    /// Handle a form submit on `page` and wait for the result.
    ///
    /// Returns `None` when the page has no form. Failures never escape:
    /// they end up as an alert.
    pub async fn handle_submit(&mut self, page: &mut ReportPage) -> Option<Outcome> {
        let payload = self.begin(page)?;
        let result = self.submitter.submit(&payload).await;
        Some(self.settle(page, result))
    }

    fn dispatch(&mut self, event: SubmissionEvent, page: &mut ReportPage) -> Vec<Effect> {
        let (next, effects) = transition(&self.state, event);
        self.state = next;
        for effect in &effects {
            apply(effect, page);
        }
        effects
    }
}

fn apply(effect: &Effect, page: &mut ReportPage) {
    match effect {
        // Nothing is posted natively; the page model has no default action.
        Effect::PreventDefault | Effect::SendReport => {}
        Effect::ShowSpinner => page.set_busy(true),
        Effect::HideSpinner => page.set_busy(false),
        Effect::AppendSuccess(message) => page.append_success(message.clone()),
        Effect::Alert(message) => page.alert(message.clone()),
        Effect::LogError(message) => log::error!("Error: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn receipt(id: &str) -> ReportReceipt {
        ReportReceipt(json!({ "reportId": id }))
    }

    #[test]
    fn submit_from_idle_starts_submission() {
        let (next, effects) = transition(&SubmissionState::Idle, SubmissionEvent::Submit);
        assert_eq!(next, SubmissionState::Submitting);
        assert_eq!(
            effects,
            vec![Effect::PreventDefault, Effect::ShowSpinner, Effect::SendReport]
        );
    }

    #[test]
    fn submit_while_submitting_sends_again() {
        let (next, effects) = transition(&SubmissionState::Submitting, SubmissionEvent::Submit);
        assert_eq!(next, SubmissionState::Submitting);
        assert_eq!(
            effects,
            vec![Effect::PreventDefault, Effect::ShowSpinner, Effect::SendReport]
        );
    }

    #[test]
    fn success_appends_alerts_then_hides_spinner() {
        let (next, effects) = transition(
            &SubmissionState::Submitting,
            SubmissionEvent::Completed(receipt("R9")),
        );
        assert_eq!(
            next,
            SubmissionState::Settled(Outcome::Succeeded {
                report_id: Some("R9".to_string())
            })
        );
        assert_eq!(effects.last(), Some(&Effect::HideSpinner));
        assert!(matches!(effects[0], Effect::AppendSuccess(_)));
        assert_eq!(effects[1], Effect::Alert(SUCCESS_ALERT.to_string()));
    }

    #[test]
    fn failure_logs_alerts_generic_then_hides_spinner() {
        let (next, effects) = transition(
            &SubmissionState::Submitting,
            SubmissionEvent::Failed("bad data".to_string()),
        );
        assert!(matches!(next, SubmissionState::Settled(Outcome::Failed { .. })));
        assert_eq!(
            effects,
            vec![
                Effect::LogError("bad data".to_string()),
                Effect::Alert(FAILURE_ALERT.to_string()),
                Effect::HideSpinner,
            ]
        );
    }

    #[test]
    fn settled_accepts_new_submit() {
        let settled = SubmissionState::Settled(Outcome::Failed {
            message: "x".to_string(),
        });
        assert!(settled.is_idle());
        let (next, _) = transition(&settled, SubmissionEvent::Submit);
        assert_eq!(next, SubmissionState::Submitting);
    }

    #[test]
    fn late_result_after_settling_is_still_rendered() {
        let settled = SubmissionState::Settled(Outcome::Failed {
            message: "first".to_string(),
        });
        let (next, effects) =
            transition(&settled, SubmissionEvent::Completed(receipt("R1")));
        assert_eq!(
            next,
            SubmissionState::Settled(Outcome::Succeeded {
                report_id: Some("R1".to_string())
            })
        );
        assert_eq!(effects.len(), 3);
        assert_eq!(effects.last(), Some(&Effect::HideSpinner));
    }
}
