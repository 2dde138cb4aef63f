//! Session and sign-in models

use serde::{Deserialize, Serialize};

/// Who is signed in for the lifetime of the protected area
///
/// Only set after a successful verification round-trip; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub email: Option<String>,
}

/// Request for admin sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response for admin sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub email: String,
}

/// Response for session token verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub email: String,
}
