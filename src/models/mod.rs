// src/models/mod.rs

//! Domain models for the reporter.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod report;

// Re-export all public types
pub use catalog::{IncidentCategory, IncidentType, type_labels_for, type_token};
pub use config::{
    BackendConfig, ClientConfig, Config, Environment, GateConfig, LoggingConfig,
};
pub use report::{Attachment, FormData, FormValue, ReportReceipt, fields, now_iso8601};
