//! Common library for the comic admin console
//!
//! This crate provides functionality shared by the console services:
//! configuration for the remote API, the error taxonomy, and the cookie
//! store that holds the admin session token.
//!
//! ```rust,no_run
//! use common::config::ApiConfig;
//! use common::cookies::{CookieJar, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let jar = CookieJar::new(&config.cookie_jar_path);
//!     let token = jar.get(&config.token_cookie).await?;
//!     println!("Session token present: {}", token.is_some());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cookies;
pub mod error;
