//! Image picker and its file name display.

use crate::models::Attachment;

/// Text shown when no file is chosen.
pub const NO_FILE_LABEL: &str = "No file selected";

/// File input holding the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    pub files: Vec<Attachment>,
}

impl FileInput {
    /// First selected file, the one that gets uploaded.
    pub fn first(&self) -> Option<&Attachment> {
        self.files.first()
    }
}

/// Text for the file name display given the input state.
pub fn selection_label(input: &FileInput) -> String {
    input
        .first()
        .map(|file| file.file_name.clone())
        .unwrap_or_else(|| NO_FILE_LABEL.to_string())
}
