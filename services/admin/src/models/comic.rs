//! Comic models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::string_or_number;
use crate::files::{FileSlot, SlotKind};
use crate::tags::TagList;

/// Publication status of a comic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComicStatus {
    Ongoing,
    Dropped,
    Stopped,
}

impl ComicStatus {
    pub const ALL: [ComicStatus; 3] = [
        ComicStatus::Ongoing,
        ComicStatus::Dropped,
        ComicStatus::Stopped,
    ];

    /// Wire value of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ComicStatus::Ongoing => "Ongoing",
            ComicStatus::Dropped => "Dropped",
            ComicStatus::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for ComicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComicStatus {
    type Err = String;

    /// Only the exact wire values are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComicStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown comic status: {}", s))
    }
}

/// In-progress "new comic" form
///
/// Built empty when the form opens and edited field by field. It stays
/// intact after a failed submission so the user can fix it and resubmit.
#[derive(Debug, Clone)]
pub struct ComicDraft {
    pub title: String,
    pub description: String,
    pub origin: String,
    /// Raw status as selected; checked against [`ComicStatus`] on validation
    pub status: String,
    pub author: String,
    pub artist: String,
    pub genres: TagList,
    pub cover_image: FileSlot,
}

impl ComicDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            origin: String::new(),
            status: String::new(),
            author: String::new(),
            artist: String::new(),
            genres: TagList::new(),
            cover_image: FileSlot::new(SlotKind::CoverImage),
        }
    }
}

impl Default for ComicDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// A row of the comics listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "ComicTitle")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "CoverImage", default)]
    pub cover_image: String,
    #[serde(rename = "Origin", default)]
    pub origin: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// JSON-encoded array of genre names
    #[serde(rename = "Genres", default)]
    pub genres: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Artist", default)]
    pub artist: String,
    #[serde(rename = "Badges", default)]
    pub badges: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
}

impl ComicSummary {
    /// Decode the genre list; an undecodable value yields no genres
    pub fn genre_list(&self) -> Vec<String> {
        decode_genres(&self.genres)
    }

    /// URL slug of the comic: `{id}-{title with spaces as dashes, lower-cased}`
    pub fn slug(&self) -> String {
        format!("{}-{}", self.id, self.title.replace(' ', "-").to_lowercase())
    }

    /// Route of the comic's chapter page
    pub fn edit_link(&self) -> String {
        format!("/comics/{}", self.slug())
    }
}

pub(crate) fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
