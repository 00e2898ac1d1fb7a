//! Gate code check in front of the report page.
//!
//! Not a security boundary: the code ships with the client.

use crate::models::GateConfig;

/// Notification shown when the entered code does not match.
pub const INVALID_CODE_MESSAGE: &str = "Invalid college code. Please try again.";

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Navigate to the given page
    Redirect(String),
    /// Show a blocking notification and stay
    Rejected(&'static str),
}

#[derive(Debug, Clone)]
pub struct GateChecker {
    college_code: String,
    report_page: String,
}

impl GateChecker {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            college_code: config.college_code.clone(),
            report_page: config.report_page.clone(),
        }
    }

    pub fn college_code(&self) -> &str {
        &self.college_code
    }

    /// Compare the uppercased input with the college code.
    ///
    /// Whitespace is significant: `"8P "` does not match `"8P"`.
    pub fn check(&self, input: &str) -> GateDecision {
        log::debug!("Entered code: {input}");
        if input.to_uppercase() == self.college_code {
            log::info!("Redirecting to {}", self.report_page);
            GateDecision::Redirect(self.report_page.clone())
        } else {
            GateDecision::Rejected(INVALID_CODE_MESSAGE)
        }
    }
}
