//! Cookie store for the admin session token
//!
//! This module provides the key-value store the session token lives in.
//! The console only reads from it; the sign-in flow is the single writer.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ConsoleResult;

/// Key-value store holding client-side cookies
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Get a cookie value by key
    async fn get(&self, key: &str) -> ConsoleResult<Option<String>>;

    /// Set a cookie, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> ConsoleResult<()>;

    /// Remove a cookie
    async fn remove(&self, key: &str) -> ConsoleResult<()>;
}

/// File-backed cookie jar, one `name=value` pair per line
#[derive(Debug)]
pub struct CookieJar {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CookieJar {
    /// Open a cookie jar at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Cookie jar initialized at: {}", path.display());
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> ConsoleResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(parse_cookies(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, cookies: &BTreeMap<String, String>) -> ConsoleResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents: String = cookies
            .iter()
            .map(|(name, value)| format!("{}={}\n", name, value))
            .collect();
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for CookieJar {
    async fn get(&self, key: &str) -> ConsoleResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let cookies = self.load().await?;
        debug!("Cookie lookup for {}: present={}", key, cookies.contains_key(key));
        Ok(cookies.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ConsoleResult<()> {
        let _guard = self.lock.lock().await;
        let mut cookies = self.load().await?;
        cookies.insert(key.to_string(), value.to_string());
        self.save(&cookies).await
    }

    async fn remove(&self, key: &str) -> ConsoleResult<()> {
        let _guard = self.lock.lock().await;
        let mut cookies = self.load().await?;
        if cookies.remove(key).is_some() {
            self.save(&cookies).await?;
        }
        Ok(())
    }
}

/// In-process cookie store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single cookie
    pub fn with_cookie(key: &str, value: &str) -> Self {
        let mut cookies = BTreeMap::new();
        cookies.insert(key.to_string(), value.to_string());
        Self {
            cookies: Mutex::new(cookies),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> ConsoleResult<Option<String>> {
        Ok(self.cookies.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ConsoleResult<()> {
        self.cookies
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ConsoleResult<()> {
        self.cookies.lock().await.remove(key);
        Ok(())
    }
}

/// Parse `name=value` lines; blank lines, `#` comments and empty values are skipped
fn parse_cookies(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .collect()
}
