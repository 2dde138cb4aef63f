//! Chapter models

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::string_or_number;
use super::comic::decode_genres;
use crate::files::{FileSlot, SlotKind};

/// In-progress "add chapter" dialog
///
/// The parent comic's title and id are fixed when the dialog opens.
#[derive(Debug, Clone)]
pub struct ChapterDraft {
    pub chapter_number: String,
    pub chapter_name: String,
    comic_title: String,
    comic_id: String,
    pub pages: FileSlot,
}

impl ChapterDraft {
    /// Open a draft for a chapter of the given comic
    pub fn new(comic_title: impl Into<String>, comic_id: impl Into<String>) -> Self {
        Self {
            chapter_number: String::new(),
            chapter_name: String::new(),
            comic_title: comic_title.into(),
            comic_id: comic_id.into(),
            pages: FileSlot::new(SlotKind::ChapterArchive),
        }
    }

    pub fn comic_title(&self) -> &str {
        &self.comic_title
    }

    pub fn comic_id(&self) -> &str {
        &self.comic_id
    }
}

/// Response of the chapter listing for one comic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterList {
    pub chapters: Vec<ChapterEntry>,
    #[serde(rename = "comicDetails")]
    pub comic_details: ComicDetails,
}

/// A row of the chapter listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterEntry {
    #[serde(rename = "chapterID")]
    pub id: i64,
    #[serde(rename = "ChapterNumber", deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(rename = "ChapterName", default)]
    pub name: Option<String>,
    #[serde(rename = "chapterDate")]
    pub date: String,
}

impl ChapterEntry {
    /// Upload date as `DD-MM-YYYY`; unparseable dates are shown as sent
    pub fn formatted_date(&self) -> String {
        parse_date(&self.date)
            .map(|date| date.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Details of the comic a chapter listing belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "ComicTitle")]
    pub title: String,
    #[serde(rename = "CoverImage", default)]
    pub cover_image: String,
    #[serde(rename = "Artist", default)]
    pub artist: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Genres", default)]
    pub genres: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Origin", default)]
    pub origin: String,
}

impl ComicDetails {
    pub fn genre_list(&self) -> Vec<String> {
        decode_genres(&self.genres)
    }
}
