// src/models/catalog.rs

//! Static incident category catalog.
//!
//! Every incident type label belongs to exactly one category. The order of
//! labels inside a category is the order they are offered to the user.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Incident category key as submitted in `incidentCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentCategory {
    Maintenance,
    Safety,
    Academic,
    Health,
    Bullying,
    Environment,
    Transport,
    It,
    Others,
}

impl IncidentCategory {
    /// All categories in display order.
    pub const ALL: [IncidentCategory; 9] = [
        IncidentCategory::Maintenance,
        IncidentCategory::Safety,
        IncidentCategory::Academic,
        IncidentCategory::Health,
        IncidentCategory::Bullying,
        IncidentCategory::Environment,
        IncidentCategory::Transport,
        IncidentCategory::It,
        IncidentCategory::Others,
    ];

    /// Wire key of the category.
    pub fn key(&self) -> &'static str {
        match self {
            IncidentCategory::Maintenance => "maintenance",
            IncidentCategory::Safety => "safety",
            IncidentCategory::Academic => "academic",
            IncidentCategory::Health => "health",
            IncidentCategory::Bullying => "bullying",
            IncidentCategory::Environment => "environment",
            IncidentCategory::Transport => "transport",
            IncidentCategory::It => "it",
            IncidentCategory::Others => "others",
        }
    }

    /// Look up a category by its exact wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Incident type labels for this category, in catalog order.
    pub fn type_labels(&self) -> &'static [&'static str] {
        match self {
            IncidentCategory::Maintenance => &[
                "Broken Equipment",
                "Plumbing Issues",
                "Electrical Problems",
                "Damaged Furniture",
                "Elevator Malfunction",
                "HVAC Issues",
                "Building Damages",
            ],
            IncidentCategory::Safety => &[
                "Fire Hazards",
                "Theft",
                "Vandalism",
                "Unauthorized Access",
                "Physical Hazards",
                "Suspicious Behavior",
                "Medical Emergencies",
            ],
            IncidentCategory::Academic => &[
                "Cheating or Plagiarism",
                "Harassment by Faculty or Staff",
                "Unfair Grading",
                "Inappropriate Classroom Behavior",
            ],
            IncidentCategory::Health => &[
                "Unsanitary Conditions",
                "Food Safety",
                "COVID-19 or Other Infectious Diseases",
                "First Aid Issues",
            ],
            IncidentCategory::Bullying => &["Bullying", "Sexual Harassment", "Cyber Bullying"],
            IncidentCategory::Environment => &["Pollution", "Noise Pollution", "Energy Wastage"],
            IncidentCategory::Transport => &["Parking Issues", "Transportation Delays", "Accidents"],
            IncidentCategory::It => &["Network Issues", "Software Problems", "Access Issues"],
            IncidentCategory::Others => &[],
        }
    }

    /// Incident types of this category, in catalog order.
    pub fn types(&self) -> Vec<IncidentType> {
        self.type_labels()
            .iter()
            .map(|&label| IncidentType {
                category: *self,
                label,
            })
            .collect()
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IncidentCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            AppError::validation(format!("unknown incident category '{s}'"))
        })
    }
}

/// An incident type label bound to its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentType {
    pub category: IncidentCategory,
    pub label: &'static str,
}

impl IncidentType {
    /// Submission value of this type.
    pub fn token(&self) -> String {
        type_token(self.label)
    }

    /// Find a type by its label or token, within a category.
    pub fn find(category: IncidentCategory, needle: &str) -> Option<Self> {
        category
            .types()
            .into_iter()
            .find(|t| t.label == needle || t.token() == needle)
    }
}

/// Labels for a raw category key. Unknown keys have no types.
pub fn type_labels_for(key: &str) -> &'static [&'static str] {
    IncidentCategory::from_key(key)
        .map(|c| c.type_labels())
        .unwrap_or(&[])
}

/// Normalize a type label into its submission token.
///
/// Uppercases the label and replaces each whitespace run with one `_`.
pub fn type_token(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&label.to_uppercase(), "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_uppercases_and_joins_words() {
        assert_eq!(type_token("Broken Equipment"), "BROKEN_EQUIPMENT");
        assert_eq!(
            type_token("COVID-19 or Other Infectious Diseases"),
            "COVID-19_OR_OTHER_INFECTIOUS_DISEASES"
        );
        assert_eq!(type_token("HVAC  Issues"), "HVAC_ISSUES");
    }

    #[test]
    fn every_label_belongs_to_one_category() {
        let mut seen = std::collections::HashSet::new();
        for category in IncidentCategory::ALL {
            for label in category.type_labels() {
                assert!(seen.insert(*label), "label {label} listed twice");
            }
        }
    }

    #[test]
    fn others_has_no_types() {
        assert!(IncidentCategory::Others.types().is_empty());
    }

    #[test]
    fn keys_round_trip_and_unknown_is_empty() {
        for category in IncidentCategory::ALL {
            assert_eq!(IncidentCategory::from_key(category.key()), Some(category));
        }
        assert!(IncidentCategory::from_key("Maintenance").is_none());
        assert!(type_labels_for("weather").is_empty());
        assert_eq!(type_labels_for("it").len(), 3);
    }

    #[test]
    fn find_accepts_label_or_token() {
        let by_label = IncidentType::find(IncidentCategory::Maintenance, "Broken Equipment");
        let by_token = IncidentType::find(IncidentCategory::Maintenance, "BROKEN_EQUIPMENT");
        assert_eq!(by_label, by_token);
        assert!(by_label.is_some());
        assert!(IncidentType::find(IncidentCategory::Safety, "Broken Equipment").is_none());
    }

    #[test]
    fn category_parses_from_str() {
        assert_eq!("health".parse::<IncidentCategory>().ok(), Some(IncidentCategory::Health));
        assert!("nope".parse::<IncidentCategory>().is_err());
    }
}
