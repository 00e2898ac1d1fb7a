//! Pipeline entry points for report submission.
//!
//! - `SubmissionOrchestrator`: form submit → payload → backend → page

pub mod orchestrator;

pub use orchestrator::{
    Effect, FAILURE_ALERT, Outcome, SUCCESS_ALERT, SubmissionEvent, SubmissionOrchestrator,
    SubmissionState, transition,
};
