//! Plain-text rendering of console views

use common::error::FieldErrors;

use crate::models::{ChapterList, ComicSummary};
use crate::routes::Route;

pub fn render_sign_in() -> String {
    "Signed out. Sign in with: comic-admin sign-in --email <email> --password <password>"
        .to_string()
}

pub fn render_dashboard(email: Option<&str>) -> String {
    let mut out = String::from("Dashboard\n");
    if let Some(email) = email {
        out.push_str(&format!("Signed in as {}\n", email));
    }
    out.push_str(&format!("  Comics     {}\n", Route::Comics));
    out.push_str(&format!("  New Comic  {}", Route::NewComic));
    out
}

pub fn render_new_comic_form() -> String {
    "New comic: comic-admin new-comic --title <title> --desc <desc> --origin <origin> \
     --status <Ongoing|Dropped|Stopped> --author <author> --artist <artist> \
     --genre <genre>... --cover <image>"
        .to_string()
}

/// Comics table: title, status, genres and edit link
pub fn render_comics(comics: &[ComicSummary]) -> String {
    if comics.is_empty() {
        return "No comics yet.".to_string();
    }

    let rows = comics
        .iter()
        .map(|comic| {
            vec![
                comic.title.clone(),
                comic.status.clone(),
                comic.genre_list().join(", "),
                comic.edit_link(),
            ]
        })
        .collect();
    table(&["Title", "Status", "Genres", "Edit"], rows)
}

/// Comic header followed by its chapter table
pub fn render_chapters(list: &ChapterList) -> String {
    let details = &list.comic_details;
    let mut out = format!("{} [{}]\n", details.title, details.status);
    let genres = details.genre_list();
    if !genres.is_empty() {
        out.push_str(&format!("Genres: {}\n", genres.join(", ")));
    }

    if list.chapters.is_empty() {
        out.push_str("No chapters yet.");
        return out;
    }

    let rows = list
        .chapters
        .iter()
        .map(|chapter| {
            vec![
                chapter.id.to_string(),
                chapter.number.clone(),
                chapter.name.clone().unwrap_or_else(|| "-".to_string()),
                chapter.formatted_date(),
            ]
        })
        .collect();
    out.push_str(&table(&["ID", "Number", "Name", "Date"], rows));
    out
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline link shown after a chapter upload
pub fn render_upload_link(link: &str) -> String {
    format!("View: {}", link)
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chapter_list, comic_summary};

    #[test]
    fn test_comics_table() {
        let comics = vec![
            comic_summary(12, "My Title", "Ongoing", r#"["Action","Fantasy"]"#),
            comic_summary(3, "Other", "Dropped", "not json"),
        ];
        let rendered = render_comics(&comics);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[2].contains("Action, Fantasy"));
        assert!(lines[2].ends_with("/comics/12-my-title"));
        assert!(lines[3].contains("Dropped"));
        assert!(lines[3].ends_with("/comics/3-other"));
    }

    #[test]
    fn test_empty_comics() {
        assert_eq!(render_comics(&[]), "No comics yet.");
    }

    #[test]
    fn test_chapter_table_formats_dates() {
        let rendered = render_chapters(&chapter_list());

        assert!(rendered.starts_with("My Title [Ongoing]\nGenres: Action\n"));
        assert!(rendered.contains("07-03-2024"));
        assert!(rendered.contains("14-03-2024"));
        assert!(rendered.contains("The Start"));
    }

    #[test]
    fn test_dashboard_lists_sections() {
        let rendered = render_dashboard(Some("admin@example.com"));
        assert!(rendered.contains("Signed in as admin@example.com"));
        assert!(rendered.contains("/comics"));
        assert!(rendered.contains("/new-comic"));
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("desc", "Desc must be at least 5 characters.");
        assert_eq!(
            render_field_errors(&errors),
            "  desc: Desc must be at least 5 characters."
        );
    }
}
