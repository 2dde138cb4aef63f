//! Multipart payloads and their responses

use serde::{Deserialize, Serialize};

use crate::files::SelectedFile;

/// One part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File(SelectedFile),
}

/// Transport-neutral multipart payload, parts kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<(String, FormPart)>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts
            .push((name.to_string(), FormPart::Text(value.into())));
        self
    }

    /// Append a file attachment
    pub fn file(mut self, name: &str, file: SelectedFile) -> Self {
        self.parts.push((name.to_string(), FormPart::File(file)));
        self
    }

    /// Value of the first text field named `name`
    #[cfg(test)]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// First file attached under `name`
    #[cfg(test)]
    pub fn file_value(&self, name: &str) -> Option<&SelectedFile> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn into_parts(self) -> Vec<(String, FormPart)> {
        self.parts
    }
}

/// Success body of the create-comic and create-chapter endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub link: String,
}

/// Error body the remote API sends with non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
