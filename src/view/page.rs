// src/view/page.rs

//! Page view-models.
//!
//! Every element is optional; a missing element disables the feature that
//! depends on it instead of failing.

use crate::models::{Attachment, FormData, FormValue, fields};
use crate::services::{GateChecker, GateDecision, TypeSelector};
use crate::view::autogrow::{Measure, TextArea, autogrow};
use crate::view::image::{FileInput, selection_label};
use crate::view::ids;

/// Busy indicator shown while a submission is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spinner {
    pub visible: bool,
}

/// The incident form itself, with fields not modelled as controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentForm {
    pub extra_fields: Vec<(String, String)>,
}

/// Block appended to the page after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessMessage {
    pub report_id: Option<String>,
}

impl SuccessMessage {
    pub const HEADING: &'static str = "Report Submitted Successfully!";
    pub const THANKS: &'static str = "Thank you for your submission.";

    pub fn render(&self) -> String {
        format!(
            "{}\nReport ID: {}\n{}",
            Self::HEADING,
            self.report_id.as_deref().unwrap_or("unavailable"),
            Self::THANKS
        )
    }
}

/// Which handlers were wired when the page was bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub submit: bool,
    pub category_change: bool,
    pub image_change: bool,
    pub autogrow: bool,
}

/// View-model of the report page.
#[derive(Debug, Clone, Default)]
pub struct ReportPage {
    pub spinner: Option<Spinner>,
    pub form: Option<IncidentForm>,
    pub category: Option<String>,
    pub incident_type: Option<TypeSelector>,
    pub image: Option<FileInput>,
    pub file_name: Option<String>,
    pub description: Option<TextArea>,
    pub date: Option<String>,
    /// Success blocks appended to the page, oldest first
    pub messages: Vec<SuccessMessage>,
    /// Blocking notifications raised, oldest first
    pub alerts: Vec<String>,
}

impl ReportPage {
    /// A page with every element present and nothing selected.
    pub fn complete() -> Self {
        Self {
            spinner: Some(Spinner { visible: true }),
            form: Some(IncidentForm::default()),
            category: Some(String::new()),
            incident_type: Some(TypeSelector::new()),
            image: Some(FileInput::default()),
            file_name: Some(String::new()),
            description: Some(TextArea::default()),
            date: Some(String::new()),
            messages: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Identifiers of the elements this page lacks.
    pub fn missing_elements(&self) -> Vec<&'static str> {
        [
            (ids::LOADING_SPINNER, self.spinner.is_some()),
            (ids::INCIDENT_FORM, self.form.is_some()),
            (ids::INCIDENT_CATEGORY, self.category.is_some()),
            (ids::INCIDENT_TYPE, self.incident_type.is_some()),
            (ids::IMAGE, self.image.is_some()),
            (ids::FILE_NAME, self.file_name.is_some()),
            (ids::DESCRIPTION, self.description.is_some()),
            (ids::DATE, self.date.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(id, _)| id)
        .collect()
    }

    /// Initial wiring: hides the busy indicator and reports enabled features.
    pub fn bind(&mut self) -> Bindings {
        for id in self.missing_elements() {
            log::debug!("Element #{id} not present");
        }
        match self.spinner.as_mut() {
            Some(spinner) => spinner.visible = false,
            None => log::error!("Spinner element not found"),
        }
        Bindings {
            submit: self.form.is_some(),
            category_change: self.category.is_some(),
            image_change: self.image.is_some(),
            autogrow: self.description.is_some(),
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.visible = busy;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.spinner.as_ref().is_some_and(|s| s.visible)
    }

    /// Choose a category and rebuild the type list.
    pub fn select_category(&mut self, key: &str) {
        if let Some(category) = self.category.as_mut() {
            *category = key.to_string();
            self.refresh_types();
        }
    }

    /// Rebuild the type list from the current category.
    pub fn refresh_types(&mut self) {
        if let (Some(category), Some(types)) = (&self.category, self.incident_type.as_mut()) {
            types.populate(category);
        }
    }

    /// Choose an incident type by label or value.
    pub fn select_type(&mut self, needle: &str) -> bool {
        self.incident_type
            .as_mut()
            .is_some_and(|types| types.select(needle))
    }

    /// Replace the image selection and reflect it in the name display.
    pub fn choose_files(&mut self, files: Vec<Attachment>) {
        let Some(input) = self.image.as_mut() else {
            return;
        };
        input.files = files;
        if let Some(display) = self.file_name.as_mut() {
            *display = selection_label(input);
        }
    }

    /// Description input event: store the text and fit the height.
    pub fn input_description(&mut self, text: &str, measure: &dyn Measure) {
        if let Some(area) = self.description.as_mut() {
            area.value = text.to_string();
            autogrow(area, measure);
        }
    }

    pub fn set_date(&mut self, date: &str) {
        if let Some(field) = self.date.as_mut() {
            *field = date.to_string();
        }
    }

    pub fn category_value(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn type_value(&self) -> &str {
        self.incident_type
            .as_ref()
            .map(TypeSelector::value)
            .unwrap_or("")
    }

    pub fn description_value(&self) -> &str {
        self.description
            .as_ref()
            .map(|area| area.value.as_str())
            .unwrap_or("")
    }

    pub fn date_value(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    pub fn selected_image(&self) -> Option<&Attachment> {
        self.image.as_ref().and_then(FileInput::first)
    }

    /// Raw snapshot of the form's named controls.
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        if let Some(form) = &self.form {
            for (name, value) in &form.extra_fields {
                data.append(name.clone(), FormValue::Text(value.clone()));
            }
        }
        if self.category.is_some() {
            data.append(
                fields::INCIDENT_CATEGORY,
                FormValue::Text(self.category_value().to_string()),
            );
        }
        if self.incident_type.is_some() {
            data.append(
                fields::INCIDENT_TYPE,
                FormValue::Text(self.type_value().to_string()),
            );
        }
        if self.description.is_some() {
            data.append(
                fields::DESCRIPTION,
                FormValue::Text(self.description_value().to_string()),
            );
        }
        if self.date.is_some() {
            data.append(fields::DATE, FormValue::Text(self.date_value().to_string()));
        }
        if let Some(file) = self.selected_image() {
            data.append(fields::IMAGE, FormValue::File(file.clone()));
        }
        data
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn append_success(&mut self, message: SuccessMessage) {
        self.messages.push(message);
    }
}

/// View-model of the gate screen.
#[derive(Debug, Clone, Default)]
pub struct GatePage {
    pub code_input: String,
    /// Page navigated to, if any
    pub location: Option<String>,
    pub alerts: Vec<String>,
}

impl GatePage {
    /// Check the entered code and navigate or notify.
    pub fn submit_code(&mut self, checker: &GateChecker) {
        match checker.check(&self.code_input) {
            GateDecision::Redirect(page) => self.location = Some(page),
            GateDecision::Rejected(message) => self.alerts.push(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GateConfig;
    use crate::services::INVALID_CODE_MESSAGE;
    use crate::view::autogrow::{Height, LineMeasure};
    use crate::view::image::NO_FILE_LABEL;

    #[test]
    fn bind_hides_spinner_and_wires_everything() {
        let mut page = ReportPage::complete();
        assert!(page.missing_elements().is_empty());
        assert!(page.is_busy());
        let bindings = page.bind();
        assert!(!page.is_busy());
        assert_eq!(
            bindings,
            Bindings {
                submit: true,
                category_change: true,
                image_change: true,
                autogrow: true,
            }
        );
    }

    #[test]
    fn missing_elements_disable_features() {
        let mut page = ReportPage::default();
        assert_eq!(page.missing_elements().len(), 8);
        assert_eq!(page.bind(), Bindings::default());

        page.select_category("maintenance");
        page.choose_files(vec![Attachment::new("a.png", vec![1])]);
        page.input_description("text", &LineMeasure::default());
        page.set_busy(true);
        assert!(!page.is_busy());
        assert!(page.form_data().is_empty());
    }

    #[test]
    fn category_change_repopulates_types() {
        let mut page = ReportPage::complete();
        page.select_category("transport");
        assert_eq!(page.type_value(), "PARKING_ISSUES");
        assert!(page.select_type("Accidents"));
        assert_eq!(page.type_value(), "ACCIDENTS");

        page.select_category("others");
        assert_eq!(page.type_value(), "");
    }

    #[test]
    fn choosing_files_updates_display() {
        let mut page = ReportPage::complete();
        page.choose_files(vec![Attachment::new("desk.jpg", vec![1, 2])]);
        assert_eq!(page.file_name.as_deref(), Some("desk.jpg"));
        page.choose_files(Vec::new());
        assert_eq!(page.file_name.as_deref(), Some(NO_FILE_LABEL));
    }

    #[test]
    fn description_input_grows_field() {
        let mut page = ReportPage::complete();
        page.input_description("line\nline", &LineMeasure::default());
        let area = page.description.as_ref().unwrap();
        assert_eq!(area.value, "line\nline");
        assert_eq!(area.height, Height::Px(56));
    }

    #[test]
    fn form_data_snapshot_includes_controls_and_extras() {
        let mut page = ReportPage::complete();
        page.form = Some(IncidentForm {
            extra_fields: vec![("location".to_string(), "Block C".to_string())],
        });
        page.select_category("it");
        page.choose_files(vec![Attachment::new("net.png", vec![9])]);

        let data = page.form_data();
        assert_eq!(data.get_text("location"), Some("Block C"));
        assert_eq!(data.get_text(fields::INCIDENT_CATEGORY), Some("it"));
        assert_eq!(data.get_text(fields::INCIDENT_TYPE), Some("NETWORK_ISSUES"));
        assert_eq!(data.get_text(fields::DATE), Some(""));
        assert!(matches!(data.get(fields::IMAGE), Some(FormValue::File(_))));
    }

    #[test]
    fn success_message_renders_id() {
        let text = SuccessMessage {
            report_id: Some("R123".to_string()),
        }
        .render();
        assert!(text.contains(SuccessMessage::HEADING));
        assert!(text.contains("Report ID: R123"));
        assert!(text.contains(SuccessMessage::THANKS));
    }

    #[test]
    fn gate_page_redirects_or_alerts() {
        let checker = GateChecker::new(&GateConfig::default());

        let mut page = GatePage {
            code_input: "8p".to_string(),
            ..GatePage::default()
        };
        page.submit_code(&checker);
        assert_eq!(page.location.as_deref(), Some("report.html"));
        assert!(page.alerts.is_empty());

        let mut page = GatePage {
            code_input: "8P ".to_string(),
            ..GatePage::default()
        };
        page.submit_code(&checker);
        assert_eq!(page.location, None);
        assert_eq!(page.alerts, vec![INVALID_CODE_MESSAGE.to_string()]);
    }
}
