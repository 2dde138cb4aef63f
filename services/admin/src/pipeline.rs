//! Submission pipeline for the create forms
//!
//! Both "new comic" and "add chapter" go through the same steps: field
//! validation, a pending notice, local prerequisite checks, multipart
//! assembly, one authenticated POST, and a single success or failure notice.
//! The pipeline publishes its status so callers can disable their submit
//! trigger while a submission is pending; a submit during that window is
//! ignored.

use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use common::error::{ConsoleError, ConsoleResult, FieldErrors};

use crate::{
    client::{CREATE_CHAPTER_PATH, CREATE_COMIC_PATH},
    feedback::{Feedback, Notice},
    models::{ChapterDraft, ComicDraft, CreatedResponse, UploadForm},
    state::AppState,
    validation::{validate_chapter, validate_comic, validate_status},
};

/// User-visible status of the latest submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Pending,
    Succeeded {
        message: String,
        link: Option<String>,
    },
    Failed(String),
}

impl UploadStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, UploadStatus::Pending)
    }
}

/// Which create operation a draft feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Comic,
    Chapter,
}

impl SubmissionKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubmissionKind::Comic => CREATE_COMIC_PATH,
            SubmissionKind::Chapter => CREATE_CHAPTER_PATH,
        }
    }

    /// Whether a success moves the console to the returned link
    ///
    /// Chapter uploads show the link inline instead.
    pub fn follows_link(&self) -> bool {
        matches!(self, SubmissionKind::Comic)
    }
}

/// A draft the pipeline can submit
pub trait Submission {
    fn kind(&self) -> SubmissionKind;

    /// Per-field rules, checked before anything is shown or sent
    fn validate(&self) -> Result<(), FieldErrors>;

    /// Presence checks that must pass before dispatch
    fn check_ready(&self) -> ConsoleResult<()>;

    /// Build the multipart payload; field names are part of the API contract
    fn assemble(&self) -> ConsoleResult<UploadForm>;
}

impl Submission for ComicDraft {
    fn kind(&self) -> SubmissionKind {
        SubmissionKind::Comic
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        validate_comic(self)
    }

    fn check_ready(&self) -> ConsoleResult<()> {
        if self.genres.is_empty() {
            return Err(ConsoleError::MissingPrerequisite(
                "Please select Genres!".to_string(),
            ));
        }
        if !self.cover_image.is_selected() {
            return Err(ConsoleError::MissingPrerequisite(
                "Please select a Cover Image!".to_string(),
            ));
        }
        Ok(())
    }

    fn assemble(&self) -> ConsoleResult<UploadForm> {
        let cover = self.cover_image.current().cloned().ok_or_else(|| {
            ConsoleError::MissingPrerequisite("Please select a Cover Image!".to_string())
        })?;
        let status = validate_status(&self.status).map_err(|message| {
            let mut errors = FieldErrors::new();
            errors.add("status", message);
            ConsoleError::Validation(errors)
        })?;

        Ok(UploadForm::new()
            .file("coverImage", cover)
            .text("comicTitle", &self.title)
            .text("desc", &self.description)
            .text("origin", &self.origin)
            .text("status", status.as_str())
            .text("genres", self.genres.to_json())
            .text("author", &self.author)
            .text("artist", &self.artist))
    }
}

impl Submission for ChapterDraft {
    fn kind(&self) -> SubmissionKind {
        SubmissionKind::Chapter
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        validate_chapter(self)
    }

    fn check_ready(&self) -> ConsoleResult<()> {
        if !self.pages.is_selected() {
            return Err(ConsoleError::MissingPrerequisite(
                "No File Selected!".to_string(),
            ));
        }
        Ok(())
    }

    fn assemble(&self) -> ConsoleResult<UploadForm> {
        let pages = self
            .pages
            .current()
            .cloned()
            .ok_or_else(|| ConsoleError::MissingPrerequisite("No File Selected!".to_string()))?;

        Ok(UploadForm::new()
            .text("chapterNumber", &self.chapter_number)
            .text("chapterName", &self.chapter_name)
            .text("comicTitle", self.comic_title())
            .text("comicID", self.comic_id())
            .file("pages", pages))
    }
}

/// Result of one call to [`SubmissionPipeline::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission is pending; nothing was done
    Busy,
    /// Field rules failed; nothing was shown or sent
    Invalid(FieldErrors),
    /// The submission ran to its end; the final status
    Completed(UploadStatus),
}

/// Drives drafts through validation, dispatch and user feedback
pub struct SubmissionPipeline {
    state: AppState,
    status: watch::Sender<UploadStatus>,
}

impl SubmissionPipeline {
    pub fn new(state: AppState) -> Self {
        let (status, _) = watch::channel(UploadStatus::Idle);
        Self { state, status }
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    /// Whether the submit trigger should currently be disabled
    pub fn is_pending(&self) -> bool {
        self.status.borrow().is_pending()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    /// Submit `draft` once
    ///
    /// The draft is left untouched whatever the outcome, so a failed
    /// submission can be corrected and resubmitted.
    pub async fn submit<D: Submission>(&self, draft: &D) -> SubmitOutcome {
        let kind = draft.kind();

        if self.is_pending() {
            info!("Ignoring {:?} submission while another is pending", kind);
            return SubmitOutcome::Busy;
        }

        if let Err(errors) = draft.validate() {
            warn!("{:?} draft failed validation: {}", kind, errors);
            return SubmitOutcome::Invalid(errors);
        }

        if !self.begin() {
            info!("Ignoring {:?} submission while another is pending", kind);
            return SubmitOutcome::Busy;
        }

        let pending = PendingGuard {
            status: &self.status,
            feedback: self.state.feedback.as_ref(),
            armed: true,
        };
        self.state.feedback.show(Notice::Loading);

        let result = self.dispatch(draft).await;
        pending.disarm();
        self.state.feedback.dismiss();

        let status = match result {
            Ok(created) => {
                info!("{:?} submission accepted: {}", kind, created.message);
                let notice = if kind.follows_link() {
                    Notice::Success(created.message.clone())
                } else {
                    Notice::Link {
                        message: created.message.clone(),
                        link: created.link.clone(),
                    }
                };
                self.state.feedback.show(notice);
                UploadStatus::Succeeded {
                    message: created.message,
                    link: Some(created.link),
                }
            }
            Err(e) => {
                if e.is_local() {
                    warn!("{:?} submission stopped locally: {}", kind, e);
                } else {
                    error!("{:?} submission failed: {:?}", kind, e);
                }
                let message = e.user_message();
                self.state.feedback.show(Notice::Error(message.clone()));
                UploadStatus::Failed(message)
            }
        };
        self.status.send_replace(status.clone());

        if let UploadStatus::Succeeded {
            link: Some(link), ..
        } = &status
        {
            if kind.follows_link() {
                sleep(self.state.config.redirect_delay()).await;
                self.state.navigator.navigate(link);
            }
        }

        SubmitOutcome::Completed(status)
    }

    /// Move to `Pending` unless already there
    fn begin(&self) -> bool {
        self.status.send_if_modified(|status| {
            if status.is_pending() {
                false
            } else {
                *status = UploadStatus::Pending;
                true
            }
        })
    }

    async fn dispatch<D: Submission>(&self, draft: &D) -> ConsoleResult<CreatedResponse> {
        draft.check_ready()?;

        let token = self
            .state
            .tokens
            .get(&self.state.config.token_cookie)
            .await?
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConsoleError::MissingPrerequisite("Please Log In again!".to_string()))?;

        let form = draft.assemble()?;
        let endpoint = draft.kind().endpoint();
        let limit = self.state.config.request_timeout();

        match timeout(limit, self.state.api.post_form(endpoint, form, &token)).await {
            Ok(result) => result,
            Err(_) => Err(ConsoleError::Transport(format!(
                "request to {} timed out after {:?}",
                endpoint, limit
            ))),
        }
    }
}

/// Returns the pipeline to `Idle` if a pending submission is abandoned
struct PendingGuard<'a> {
    status: &'a watch::Sender<UploadStatus>,
    feedback: &'a dyn Feedback,
    armed: bool,
}

impl PendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Pending submission abandoned");
            self.feedback.dismiss();
            self.status.send_replace(UploadStatus::Idle);
        }
    }
}
