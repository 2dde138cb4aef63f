//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use common::error::FieldErrors;

use crate::models::{ChapterDraft, ComicDraft, ComicStatus, SignInRequest};

/// Validate that `value` has at least `min` characters
pub fn validate_min_length(value: &str, min: usize, message: &str) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(message.to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid Email!".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    validate_min_length(password, 5, "Password must be 5 characters long!")
}

/// Validate that the status is one of the known values
pub fn validate_status(status: &str) -> Result<ComicStatus, String> {
    status
        .parse()
        .map_err(|_| "Please select a Status.".to_string())
}

/// Validate a new comic draft, field by field
pub fn validate_comic(draft: &ComicDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    record(
        &mut errors,
        "comicTitle",
        validate_min_length(&draft.title, 2, "Comic Title must be at least 2 characters."),
    );
    record(
        &mut errors,
        "desc",
        validate_min_length(&draft.description, 5, "Desc must be at least 5 characters."),
    );
    record(
        &mut errors,
        "origin",
        validate_min_length(&draft.origin, 2, "Origin must be at least 2 characters."),
    );
    record(&mut errors, "status", validate_status(&draft.status).map(|_| ()));
    record(
        &mut errors,
        "author",
        validate_min_length(&draft.author, 2, "Author must be at least 2 characters."),
    );
    record(
        &mut errors,
        "artist",
        validate_min_length(&draft.artist, 2, "Artist must be at least 2 characters."),
    );

    errors.into_result()
}

/// Validate a new chapter draft
pub fn validate_chapter(draft: &ChapterDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    record(
        &mut errors,
        "chapterName",
        validate_min_length(
            &draft.chapter_name,
            2,
            "Chapter name must be at least 2 characters.",
        ),
    );

    errors.into_result()
}

/// Validate sign-in credentials
pub fn validate_sign_in(request: &SignInRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    record(&mut errors, "email", validate_email(&request.email));
    record(&mut errors, "password", validate_password(&request.password));

    errors.into_result()
}

fn record(errors: &mut FieldErrors, field: &'static str, result: Result<(), String>) {
    if let Err(message) = result {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::SelectedFile;

    fn valid_comic() -> ComicDraft {
        let mut draft = ComicDraft::new();
        draft.title = "Martial Peak".to_string();
        draft.description = "The journey to the martial peak".to_string();
        draft.origin = "China".to_string();
        draft.status = "Ongoing".to_string();
        draft.author = "Momo".to_string();
        draft.artist = "Pikapi".to_string();
        draft.genres.add("Action");
        draft
            .cover_image
            .select(SelectedFile::new("cover.png", "image/png", vec![0]))
            .expect("cover accepted");
        draft
    }

    #[test]
    fn test_valid_comic_passes() {
        assert!(validate_comic(&valid_comic()).is_ok());
    }

    #[test]
    fn test_comic_reports_each_short_field() {
        let mut draft = valid_comic();
        draft.title = "A".to_string();
        draft.description = String::new();

        let errors = validate_comic(&draft).expect_err("draft should be rejected");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("comicTitle"),
            Some("Comic Title must be at least 2 characters.")
        );
        assert_eq!(errors.get("desc"), Some("Desc must be at least 5 characters."));
    }

    #[test]
    fn test_comic_status_must_be_known() {
        let mut draft = valid_comic();
        draft.status = "Finished".to_string();

        let errors = validate_comic(&draft).expect_err("status should be rejected");
        assert_eq!(errors.get("status"), Some("Please select a Status."));

        draft.status = String::new();
        assert!(validate_comic(&draft).is_err());
    }

    #[test]
    fn test_status_requires_exact_value() {
        assert_eq!(validate_status("Stopped"), Ok(ComicStatus::Stopped));
        assert_eq!(
            validate_status("  sToPpEd "),
            Err("Please select a Status.".to_string())
        );
        assert!(validate_status("ongoing").is_err());
    }

    #[test]
    fn test_comic_artist_message_names_artist() {
        let mut draft = valid_comic();
        draft.artist = "P".to_string();

        let errors = validate_comic(&draft).expect_err("artist should be rejected");
        assert_eq!(errors.get("artist"), Some("Artist must be at least 2 characters."));
    }

    #[test]
    fn test_min_length_counts_characters() {
        assert!(validate_min_length("été", 3, "too short").is_ok());
        assert!(validate_min_length("日本", 2, "too short").is_ok());
        assert!(validate_min_length("日", 2, "too short").is_err());
    }

    #[test]
    fn test_chapter_name_rule() {
        let mut draft = ChapterDraft::new("Martial Peak", "12");
        draft.chapter_name = "X".to_string();
        let errors = validate_chapter(&draft).expect_err("name should be rejected");
        assert_eq!(
            errors.get("chapterName"),
            Some("Chapter name must be at least 2 characters.")
        );

        draft.chapter_name = "Greed Kills The Cat".to_string();
        assert!(validate_chapter(&draft).is_ok());
    }

    #[test]
    fn test_sign_in_rules() {
        let request = SignInRequest {
            email: "admin@example".to_string(),
            password: "1234".to_string(),
        };
        let errors = validate_sign_in(&request).expect_err("credentials should be rejected");
        assert_eq!(errors.get("email"), Some("Invalid Email!"));
        assert_eq!(errors.get("password"), Some("Password must be 5 characters long!"));

        let request = SignInRequest {
            email: "admin@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(validate_sign_in(&request).is_ok());
    }
}
