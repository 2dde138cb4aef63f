//! Console flows: sign-in, protected views and the create forms

use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{error, info};

use common::error::{ConsoleError, ConsoleResult};

use crate::{
    feedback::Notice,
    files::SelectedFile,
    models::{ChapterDraft, ComicDraft, SignInRequest},
    pipeline::{SubmissionPipeline, SubmitOutcome},
    routes::{History, Route},
    session::SessionGate,
    state::AppState,
    validation::validate_sign_in,
    views,
};

pub const WELCOME_MESSAGE: &str = "Success! Welcome back!";

/// The admin console for one run of the binary
pub struct Console {
    state: AppState,
    gate: SessionGate,
    pipeline: SubmissionPipeline,
    history: Arc<History>,
}

impl Console {
    pub fn new(state: AppState, history: Arc<History>) -> Self {
        Self {
            gate: SessionGate::init(state.clone()),
            pipeline: SubmissionPipeline::new(state.clone()),
            state,
            history,
        }
    }

    /// Exchange credentials for a session token and move to the dashboard
    pub async fn sign_in(&self, email: &str, password: &str) -> ConsoleResult<()> {
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        validate_sign_in(&request).map_err(ConsoleError::Validation)?;

        info!("Sign-in attempt for: {}", request.email);
        self.state.feedback.show(Notice::Loading);

        let limit = self.state.config.request_timeout();
        let result = match timeout(limit, self.state.api.sign_in(&request)).await {
            Ok(result) => result,
            Err(_) => Err(ConsoleError::Transport(format!(
                "sign-in timed out after {:?}",
                limit
            ))),
        };
        self.state.feedback.dismiss();

        let response = result.map_err(|e| self.report("Sign-in", e))?;
        self.state
            .tokens
            .set(&self.state.config.token_cookie, &response.auth_token)
            .await
            .map_err(|e| self.report("Storing session token", e))?;

        info!("Signed in as: {}", response.user_name);
        self.state
            .feedback
            .show(Notice::Success(WELCOME_MESSAGE.to_string()));

        sleep(self.state.config.redirect_delay()).await;
        self.state.navigator.navigate(&Route::Dashboard.path());
        Ok(())
    }

    /// Render `route`; `None` when the session gate turned the user away
    pub async fn open(&mut self, route: &Route) -> ConsoleResult<Option<String>> {
        let api = self.state.api.clone();
        let target = route.clone();

        let rendered = self
            .gate
            .protect(route, |session| async move {
                match target {
                    Route::SignIn => Ok(views::render_sign_in()),
                    Route::Dashboard => Ok(views::render_dashboard(session.email().as_deref())),
                    Route::Comics => api
                        .list_comics()
                        .await
                        .map(|comics| views::render_comics(&comics)),
                    Route::Comic(slug) => api
                        .list_chapters(&slug)
                        .await
                        .map(|list| views::render_chapters(&list)),
                    Route::NewComic => Ok(views::render_new_comic_form()),
                }
            })
            .await;

        rendered
            .transpose()
            .map_err(|e| self.report(&format!("Loading {}", route), e))
    }

    /// Submit a new comic from the "new comic" view
    pub async fn new_comic(&mut self, draft: &ComicDraft) -> Option<SubmitOutcome> {
        let pipeline = &self.pipeline;
        self.gate
            .protect(&Route::NewComic, |_| pipeline.submit(draft))
            .await
    }

    /// Upload a chapter archive from a comic's chapter page
    ///
    /// The parent comic's title and id come from the chapter listing.
    pub async fn add_chapter(
        &mut self,
        slug: &str,
        number: &str,
        name: &str,
        archive: Option<SelectedFile>,
    ) -> ConsoleResult<Option<SubmitOutcome>> {
        let api = self.state.api.clone();
        let pipeline = &self.pipeline;
        let route = Route::Comic(slug.to_string());

        let outcome = self
            .gate
            .protect(&route, |_| async move {
                let details = api.list_chapters(slug).await?.comic_details;
                let mut draft = ChapterDraft::new(details.title, details.id);
                draft.chapter_number = number.to_string();
                draft.chapter_name = name.to_string();
                if let Some(file) = archive {
                    draft.pages.select(file)?;
                }
                Ok::<_, ConsoleError>(pipeline.submit(&draft).await)
            })
            .await;

        outcome
            .transpose()
            .map_err(|e| self.report(&format!("Adding chapter to {}", route), e))
    }

    /// Follow queued navigations, rendering each view reached
    pub async fn follow(&mut self) -> ConsoleResult<Vec<String>> {
        let mut screens = Vec::new();
        while let Some(path) = self.history.take_pending() {
            match Route::parse(&path) {
                Some(route) => {
                    if let Some(screen) = self.open(&route).await? {
                        screens.push(screen);
                    }
                }
                None => info!("Not a console route: {}", path),
            }
        }
        Ok(screens)
    }

    /// Leave the protected area
    pub fn close(self) {
        self.gate.teardown();
    }

    fn report(&self, action: &str, e: ConsoleError) -> ConsoleError {
        error!("{} failed: {:?}", action, e);
        self.state.feedback.show(Notice::Error(e.user_message()));
        e
    }
}
