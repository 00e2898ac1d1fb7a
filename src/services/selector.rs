//! Dependent incident type list.

use crate::models::{type_labels_for, type_token};

/// Label of the entry shown when a category has no types.
pub const PLACEHOLDER_LABEL: &str = "Select Type";

/// One entry of a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Displayed text
    pub label: String,
    pub placeholder: bool,
}

impl SelectOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
            placeholder: true,
        }
    }
}

/// Build the type options for a raw category key.
///
/// Catalog order is kept. A category without types (or an unknown key)
/// yields a single placeholder with an empty value.
pub fn type_options(category_key: &str) -> Vec<SelectOption> {
    let labels = type_labels_for(category_key);
    if labels.is_empty() {
        return vec![SelectOption::placeholder()];
    }
    labels
        .iter()
        .map(|label| SelectOption {
            value: type_token(label),
            label: label.to_string(),
            placeholder: false,
        })
        .collect()
}

/// Selection list whose options follow the chosen category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSelector {
    options: Vec<SelectOption>,
    selected: usize,
}

impl TypeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear and rebuild the options for `category_key`; selects the first.
    pub fn populate(&mut self, category_key: &str) {
        self.options = type_options(category_key);
        self.selected = 0;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Select the option whose value or label equals `needle`.
    pub fn select(&mut self, needle: &str) -> bool {
        match self
            .options
            .iter()
            .position(|o| o.value == needle || o.label == needle)
        {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Value of the selected option, empty when there are no options.
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncidentCategory;

    #[test]
    fn options_follow_catalog_for_every_category() {
        for category in IncidentCategory::ALL {
            let options = type_options(category.key());
            let labels = category.type_labels();
            if labels.is_empty() {
                continue;
            }
            assert_eq!(options.len(), labels.len());
            for (option, label) in options.iter().zip(labels) {
                assert_eq!(option.label, *label);
                assert_eq!(option.value, label.to_uppercase().replace(' ', "_"));
                assert!(!option.placeholder);
            }
        }
    }

    #[test]
    fn others_and_unknown_yield_placeholder() {
        for key in ["others", "weather", ""] {
            let options = type_options(key);
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].value, "");
            assert_eq!(options[0].label, PLACEHOLDER_LABEL);
            assert!(options[0].placeholder);
        }
    }

    #[test]
    fn populate_is_idempotent_and_replaces() {
        let mut selector = TypeSelector::new();
        selector.populate("maintenance");
        let first = selector.clone();
        selector.populate("maintenance");
        assert_eq!(selector, first);

        selector.populate("it");
        assert_eq!(selector.options().len(), 3);
        assert_eq!(selector.value(), "NETWORK_ISSUES");
    }

    #[test]
    fn select_by_label_or_value() {
        let mut selector = TypeSelector::new();
        selector.populate("safety");
        assert!(selector.select("Theft"));
        assert_eq!(selector.value(), "THEFT");
        assert!(selector.select("MEDICAL_EMERGENCIES"));
        assert_eq!(selector.value(), "MEDICAL_EMERGENCIES");
        assert!(!selector.select("Broken Equipment"));
        assert_eq!(selector.value(), "MEDICAL_EMERGENCIES");
    }

    #[test]
    fn empty_selector_has_empty_value() {
        assert_eq!(TypeSelector::new().value(), "");
    }
}
