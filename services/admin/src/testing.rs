//! Test doubles for the console collaborators

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::config::ApiConfig;
use common::cookies::{MemoryTokenStore, TokenStore};
use common::error::{ConsoleError, ConsoleResult};

use crate::{
    client::CatalogApi,
    feedback::{Feedback, Notice},
    models::{
        ChapterList, ComicSummary, CreatedResponse, SignInRequest, SignInResponse, UploadForm,
        VerifyResponse,
    },
    routes::History,
    state::AppState,
};

/// Failure a [`FakeCatalog`] call should produce
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Rejected(u16, Option<&'static str>),
    Transport,
    Malformed,
}

impl FakeFailure {
    fn to_error(&self) -> ConsoleError {
        match self {
            FakeFailure::Rejected(status, message) => ConsoleError::RemoteRejection {
                status: *status,
                message: message.map(str::to_string),
            },
            FakeFailure::Transport => ConsoleError::Transport("connection refused".to_string()),
            FakeFailure::Malformed => {
                ConsoleError::MalformedResponse("expected value at line 1".to_string())
            }
        }
    }
}

type RecordedPost = (String, UploadForm, String);

#[derive(Default)]
struct FakeInner {
    verify_failure: Mutex<Option<FakeFailure>>,
    sign_in_failure: Mutex<Option<FakeFailure>>,
    list_failure: Mutex<Option<FakeFailure>>,
    post_reply: Mutex<Option<Result<CreatedResponse, FakeFailure>>>,
    post_delay: Mutex<Option<Duration>>,
    comics: Mutex<Vec<ComicSummary>>,
    chapters: Mutex<Option<ChapterList>>,
    verified: Mutex<Vec<String>>,
    sign_ins: Mutex<Vec<SignInRequest>>,
    listed_slugs: Mutex<Vec<String>>,
    posts: Mutex<Vec<RecordedPost>>,
}

/// In-memory [`CatalogApi`] that records every call
#[derive(Clone, Default)]
pub struct FakeCatalog {
    inner: Arc<FakeInner>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_verify(&self, failure: FakeFailure) {
        *self.inner.verify_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_sign_in(&self, failure: FakeFailure) {
        *self.inner.sign_in_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_listing(&self, failure: FakeFailure) {
        *self.inner.list_failure.lock().unwrap() = Some(failure);
    }

    pub fn reply_post(&self, reply: Result<CreatedResponse, FakeFailure>) {
        *self.inner.post_reply.lock().unwrap() = Some(reply);
    }

    pub fn delay_post(&self, delay: Duration) {
        *self.inner.post_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_comics(&self, comics: Vec<ComicSummary>) {
        *self.inner.comics.lock().unwrap() = comics;
    }

    pub fn set_chapters(&self, chapters: ChapterList) {
        *self.inner.chapters.lock().unwrap() = Some(chapters);
    }

    pub fn verify_calls(&self) -> usize {
        self.inner.verified.lock().unwrap().len()
    }

    pub fn verified_tokens(&self) -> Vec<String> {
        self.inner.verified.lock().unwrap().clone()
    }

    pub fn sign_ins(&self) -> Vec<SignInRequest> {
        self.inner.sign_ins.lock().unwrap().clone()
    }

    pub fn listed_slugs(&self) -> Vec<String> {
        self.inner.listed_slugs.lock().unwrap().clone()
    }

    pub fn post_calls(&self) -> usize {
        self.inner.posts.lock().unwrap().len()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.inner.posts.lock().unwrap().clone()
    }

    fn list_failure(&self) -> Option<ConsoleError> {
        self.inner
            .list_failure
            .lock()
            .unwrap()
            .as_ref()
            .map(FakeFailure::to_error)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn sign_in(&self, request: &SignInRequest) -> ConsoleResult<SignInResponse> {
        self.inner.sign_ins.lock().unwrap().push(request.clone());
        if let Some(failure) = self.inner.sign_in_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(SignInResponse {
            user_name: "admin".to_string(),
            auth_token: "fresh-token".to_string(),
            email: request.email.clone(),
        })
    }

    async fn verify_token(&self, token: &str) -> ConsoleResult<VerifyResponse> {
        self.inner.verified.lock().unwrap().push(token.to_string());
        if let Some(failure) = self.inner.verify_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(VerifyResponse {
            email: "admin@example.com".to_string(),
        })
    }

    async fn list_comics(&self) -> ConsoleResult<Vec<ComicSummary>> {
        if let Some(e) = self.list_failure() {
            return Err(e);
        }
        Ok(self.inner.comics.lock().unwrap().clone())
    }

    async fn list_chapters(&self, comic_slug: &str) -> ConsoleResult<ChapterList> {
        self.inner
            .listed_slugs
            .lock()
            .unwrap()
            .push(comic_slug.to_string());
        if let Some(e) = self.list_failure() {
            return Err(e);
        }
        self.inner
            .chapters
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ConsoleError::RemoteRejection {
                status: 404,
                message: Some("Comic not found".to_string()),
            })
    }

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm,
        token: &str,
    ) -> ConsoleResult<CreatedResponse> {
        self.inner
            .posts
            .lock()
            .unwrap()
            .push((endpoint.to_string(), form, token.to_string()));

        let delay = *self.inner.post_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.inner.post_reply.lock().unwrap().clone();
        match reply {
            Some(Ok(created)) => Ok(created),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Ok(CreatedResponse {
                message: "Created".to_string(),
                link: "/comics/12-my-title".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackEvent {
    Show(Notice),
    Dismiss,
}

/// [`Feedback`] that remembers everything it was asked to do
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
    current: Mutex<Option<Notice>>,
}

impl RecordingFeedback {
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every notice shown, in order
    pub fn shown(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FeedbackEvent::Show(notice) => Some(notice),
                FeedbackEvent::Dismiss => None,
            })
            .collect()
    }
}

impl Feedback for RecordingFeedback {
    fn show(&self, notice: Notice) {
        self.events
            .lock()
            .unwrap()
            .push(FeedbackEvent::Show(notice.clone()));
        *self.current.lock().unwrap() = Some(notice);
    }

    fn dismiss(&self) {
        self.events.lock().unwrap().push(FeedbackEvent::Dismiss);
        self.current.lock().unwrap().take();
    }

    fn current(&self) -> Option<Notice> {
        self.current.lock().unwrap().clone()
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        api_base_url: "http://localhost:8080".to_string(),
        request_timeout_secs: 5,
        redirect_delay_ms: 2000,
        token_cookie: "ds-admin-token".to_string(),
        cookie_jar_path: PathBuf::from("unused-cookies"),
    }
}

/// Wired [`AppState`] with handles on every double
pub struct TestHarness {
    pub state: AppState,
    pub history: Arc<History>,
    pub feedback: Arc<RecordingFeedback>,
    pub tokens: Arc<MemoryTokenStore>,
}

impl TestHarness {
    pub fn without_token(api: FakeCatalog) -> Self {
        Self::build(api, MemoryTokenStore::new())
    }

    pub fn with_token(api: FakeCatalog, token: &str) -> Self {
        Self::build(api, MemoryTokenStore::with_cookie("ds-admin-token", token))
    }

    fn build(api: FakeCatalog, tokens: MemoryTokenStore) -> Self {
        let history = Arc::new(History::new());
        let feedback = Arc::new(RecordingFeedback::default());
        let tokens = Arc::new(tokens);

        let state = AppState {
            config: test_config(),
            api: Arc::new(api),
            tokens: tokens.clone() as Arc<dyn TokenStore>,
            feedback: feedback.clone(),
            navigator: history.clone(),
        };

        Self {
            state,
            history,
            feedback,
            tokens,
        }
    }
}

pub fn comic_summary(id: i64, title: &str, status: &str, genres: &str) -> ComicSummary {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "ComicTitle": title,
        "Status": status,
        "Genres": genres,
    }))
    .unwrap()
}

pub fn chapter_list() -> ChapterList {
    serde_json::from_value(serde_json::json!({
        "chapters": [
            {"chapterID": 7, "ChapterNumber": 1, "ChapterName": "The Start", "chapterDate": "2024-03-07T18:30:00Z"},
            {"chapterID": 8, "ChapterNumber": "2", "ChapterName": null, "chapterDate": "2024-03-14 09:00:00"}
        ],
        "comicDetails": {
            "id": 12,
            "ComicTitle": "My Title",
            "Genres": "[\"Action\"]",
            "Status": "Ongoing"
        }
    }))
    .unwrap()
}
