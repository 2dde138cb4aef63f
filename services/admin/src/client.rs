//! Client for the remote catalog API
//!
//! The console never owns any data: comics, chapters and admin accounts all
//! live behind this API. Every call makes exactly one request.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use common::config::ApiConfig;
use common::error::{ConsoleError, ConsoleResult};

use crate::models::{
    ChapterList, ComicSummary, CreatedResponse, ErrorBody, FormPart, SignInRequest,
    SignInResponse, UploadForm, VerifyResponse,
};

/// Header carrying the session token on the verification endpoint
pub const VERIFY_TOKEN_HEADER: &str = "disaster-admin-token";
/// Header carrying the session token on mutating endpoints
pub const SUBMIT_TOKEN_HEADER: &str = "ds-admin-token";

pub const SIGN_IN_PATH: &str = "/admin/sign-in";
pub const VERIFY_TOKEN_PATH: &str = "/admin/token";
pub const LIST_COMICS_PATH: &str = "/get-comics/all";
pub const LIST_CHAPTERS_PATH: &str = "/get-chapters/all";
pub const CREATE_COMIC_PATH: &str = "/post-comic/add-new";
pub const CREATE_CHAPTER_PATH: &str = "/post-chapters/add-new";

/// Operations the remote catalog API offers the console
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Exchange admin credentials for a session token
    async fn sign_in(&self, request: &SignInRequest) -> ConsoleResult<SignInResponse>;

    /// Check a session token and learn who it belongs to
    async fn verify_token(&self, token: &str) -> ConsoleResult<VerifyResponse>;

    async fn list_comics(&self) -> ConsoleResult<Vec<ComicSummary>>;

    async fn list_chapters(&self, comic_slug: &str) -> ConsoleResult<ChapterList>;

    /// POST a multipart form to a create endpoint
    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm,
        token: &str,
    ) -> ConsoleResult<CreatedResponse>;
}

/// [`CatalogApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpCatalogClient {
    /// Create a new client with the configured request timeout
    pub fn new(config: ApiConfig) -> ConsoleResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConsoleError::Configuration(format!("Invalid HTTP client: {}", e)))?;

        info!("Catalog API client initialized for: {}", config.api_base_url);
        Ok(Self { http, config })
    }

    /// Chapter listing URL with the slug encoded as a single path segment
    fn chapters_url(&self, comic_slug: &str) -> ConsoleResult<Url> {
        let mut url = Url::parse(&self.config.endpoint(LIST_CHAPTERS_PATH))
            .map_err(|e| ConsoleError::Configuration(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ConsoleError::Configuration("API base URL cannot carry a path".to_string())
            })?
            .push(comic_slug);
        Ok(url)
    }

    /// Turn a response into `T`, classifying every failure
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ConsoleResult<T> {
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            error!(
                "Remote API rejected request with status {}: {}",
                status,
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(ConsoleError::RemoteRejection {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!("Unexpected response body: {}", e);
            ConsoleError::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn sign_in(&self, request: &SignInRequest) -> ConsoleResult<SignInResponse> {
        info!("Sign-in attempt for: {}", request.email);

        let response = self
            .http
            .post(self.config.endpoint(SIGN_IN_PATH))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response).await
    }

    async fn verify_token(&self, token: &str) -> ConsoleResult<VerifyResponse> {
        debug!("Verifying session token");

        let response = self
            .http
            .get(self.config.endpoint(VERIFY_TOKEN_PATH))
            .header(VERIFY_TOKEN_HEADER, token)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response).await
    }

    async fn list_comics(&self) -> ConsoleResult<Vec<ComicSummary>> {
        let response = self
            .http
            .get(self.config.endpoint(LIST_COMICS_PATH))
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response).await
    }

    async fn list_chapters(&self, comic_slug: &str) -> ConsoleResult<ChapterList> {
        let response = self
            .http
            .get(self.chapters_url(comic_slug)?)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response).await
    }

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm,
        token: &str,
    ) -> ConsoleResult<CreatedResponse> {
        info!("Uploading form to {} ({:?})", endpoint, form.field_names());

        let response = self
            .http
            .post(self.config.endpoint(endpoint))
            .header(SUBMIT_TOKEN_HEADER, token)
            .multipart(to_multipart(form)?)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response).await
    }
}

fn to_multipart(form: UploadForm) -> ConsoleResult<Form> {
    let mut multipart = Form::new();

    for (name, part) in form.into_parts() {
        multipart = match part {
            FormPart::Text(value) => multipart.text(name, value),
            FormPart::File(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.name.clone())
                    .mime_str(&file.content_type)
                    .map_err(|_| {
                        ConsoleError::MissingPrerequisite(format!(
                            "Unsupported file type for {}: {}",
                            file.name, file.content_type
                        ))
                    })?;
                multipart.part(name, part)
            }
        };
    }

    Ok(multipart)
}

fn transport_error(e: reqwest::Error) -> ConsoleError {
    if e.is_timeout() {
        error!("Request timed out: {}", e);
        ConsoleError::Transport("request timed out".to_string())
    } else {
        error!("Request failed: {}", e);
        ConsoleError::Transport(e.to_string())
    }
}
