//! Service layer for the reporter.
//!
//! This module contains the business logic for:
//! - Gate code checking (`GateChecker`)
//! - Dependent type list population (`TypeSelector`)
//! - Report submission (`ReportSubmitter`)

mod gate;
mod selector;
mod submitter;

pub use gate::{GateChecker, GateDecision, INVALID_CODE_MESSAGE};
pub use selector::{PLACEHOLDER_LABEL, SelectOption, TypeSelector, type_options};
pub use submitter::{HttpTransport, ReportSubmitter, ReportTransport, TransportResponse};
