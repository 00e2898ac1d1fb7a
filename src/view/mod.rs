//! View-models of the gate and report pages.
//!
//! Pages are plain data; handlers mutate them directly so the wiring can be
//! tested without a document.

pub mod autogrow;
pub mod image;
mod page;

pub use autogrow::{Height, LineMeasure, Measure, TextArea, autogrow};
pub use image::{FileInput, NO_FILE_LABEL, selection_label};
pub use page::{
    Bindings, GatePage, IncidentForm, ReportPage, Spinner, SuccessMessage,
};

/// Element identifiers the pages are bound to.
pub mod ids {
    pub const LOADING_SPINNER: &str = "loading-spinner";
    pub const COLLEGE_CODE: &str = "collegeCode";
    pub const INCIDENT_FORM: &str = "incidentForm";
    pub const INCIDENT_CATEGORY: &str = "incidentCategory";
    pub const INCIDENT_TYPE: &str = "incidentType";
    pub const IMAGE: &str = "image";
    pub const FILE_NAME: &str = "fileName";
    pub const DESCRIPTION: &str = "description";
    pub const DATE: &str = "date";
}
