//! Draft and wire models for the admin console

use serde::{Deserialize, Deserializer};

pub mod chapter;
pub mod comic;
pub mod session;
pub mod upload;

pub use chapter::{ChapterDraft, ChapterList};
pub use comic::{ComicDraft, ComicStatus, ComicSummary};
pub use session::{Session, SignInRequest, SignInResponse, VerifyResponse};
pub use upload::{CreatedResponse, ErrorBody, FormPart, UploadForm};

/// Accept identifiers the remote API sends either as JSON strings or numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
