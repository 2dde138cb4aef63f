//! Configuration for reaching the remote catalog API
//!
//! Settings are layered with the `config` crate: built-in defaults first,
//! then `COMIC_ADMIN_*` environment variables.

use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConsoleError, ConsoleResult};

const ENV_PREFIX: &str = "COMIC_ADMIN";

/// Cookie key the sign-in flow writes and the console reads
pub const DEFAULT_TOKEN_COOKIE: &str = "ds-admin-token";

/// Configuration for the remote API and the local cookie store
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote API (e.g., "https://api.example.com")
    pub api_base_url: String,
    /// Upper bound on a single request, in seconds
    pub request_timeout_secs: u64,
    /// Delay between a success notice and the follow-up navigation, in milliseconds
    pub redirect_delay_ms: u64,
    /// Cookie key holding the session token
    pub token_cookie: String,
    /// File backing the cookie store
    pub cookie_jar_path: PathBuf,
}

impl ApiConfig {
    /// Create a new ApiConfig from defaults and environment variables
    ///
    /// # Environment Variables
    /// - `COMIC_ADMIN_API_BASE_URL`: remote API base URL (default: "http://localhost:8080")
    /// - `COMIC_ADMIN_REQUEST_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `COMIC_ADMIN_REDIRECT_DELAY_MS`: post-success navigation delay (default: 2000)
    /// - `COMIC_ADMIN_TOKEN_COOKIE`: session token cookie key (default: "ds-admin-token")
    /// - `COMIC_ADMIN_COOKIE_JAR_PATH`: cookie file (default: ".comic-admin/cookies")
    pub fn from_env() -> ConsoleResult<Self> {
        let settings = Config::builder()
            .set_default("api_base_url", "http://localhost:8080")
            .and_then(|b| b.set_default("request_timeout_secs", 30_i64))
            .and_then(|b| b.set_default("redirect_delay_ms", 2000_i64))
            .and_then(|b| b.set_default("token_cookie", DEFAULT_TOKEN_COOKIE))
            .and_then(|b| b.set_default("cookie_jar_path", ".comic-admin/cookies"))
            .map_err(config_error)?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(config_error)?;

        let mut config: ApiConfig = settings.try_deserialize().map_err(config_error)?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> ConsoleResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConsoleError::Configuration(format!(
                "Invalid API base URL: {}",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConsoleError::Configuration(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.token_cookie.trim().is_empty() {
            return Err(ConsoleError::Configuration(
                "Token cookie key must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn config_error(e: config::ConfigError) -> ConsoleError {
    ConsoleError::Configuration(e.to_string())
}
