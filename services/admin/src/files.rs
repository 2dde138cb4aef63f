//! File selection for upload slots

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use common::error::{ConsoleError, ConsoleResult};

/// Content types accepted for a chapter archive
pub const ACCEPTED_ARCHIVE_TYPES: [&str; 5] = [
    "application/zip",
    "application/x-rar-compressed",
    "application/gzip",
    "application/x-7z-compressed",
    "application/x-zip-compressed",
];

/// A file picked by the user, loaded in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared content type
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Load a file from disk, declaring its content type from the extension
    pub async fn from_path(path: &Path) -> ConsoleResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        info!("Loaded {} ({} bytes)", name, bytes.len());
        Ok(Self::new(name, content_type_for(path), bytes))
    }
}

/// Content type a browser would declare for a file with this extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "gz" | "tgz" => "application/gzip",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// What an upload slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Any file; the picker's own filter is the only constraint
    CoverImage,
    /// Archive of chapter pages, restricted to [`ACCEPTED_ARCHIVE_TYPES`]
    ChapterArchive,
}

impl SlotKind {
    pub fn accepts(&self, content_type: &str) -> bool {
        match self {
            SlotKind::CoverImage => true,
            SlotKind::ChapterArchive => {
                let essence = content_type.split(';').next().unwrap_or_default().trim();
                ACCEPTED_ARCHIVE_TYPES
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(essence))
            }
        }
    }
}

/// Rejected file selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("File type not supported: {name} ({content_type})")]
    UnsupportedType { name: String, content_type: String },
}

impl From<SelectionError> for ConsoleError {
    fn from(e: SelectionError) -> Self {
        ConsoleError::MissingPrerequisite(e.to_string())
    }
}

/// Single-file upload slot
#[derive(Debug, Clone)]
pub struct FileSlot {
    kind: SlotKind,
    selected: Option<SelectedFile>,
}

impl FileSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            selected: None,
        }
    }

    /// Make `file` the current selection
    ///
    /// A file the slot does not accept leaves the previous selection in place.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), SelectionError> {
        if !self.kind.accepts(&file.content_type) {
            warn!(
                "File type not supported: {} ({})",
                file.name, file.content_type
            );
            return Err(SelectionError::UnsupportedType {
                name: file.name,
                content_type: file.content_type,
            });
        }

        self.selected = Some(file);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn current(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }
}
