//! Session gate for the protected area of the console
//!
//! Every protected view goes through [`SessionGate::protect`]: the stored
//! token is verified against the remote API before the view runs, and any
//! failure sends the user back to the sign-in route. The check is repeated on
//! every navigation, so a token revoked mid-session is caught on the next one.

use std::future::Future;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::{feedback::Notice, models::Session, routes::Route, state::AppState};

/// Progress of the gate for the current navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unchecked,
    /// Verification in flight; protected views are not rendered
    Checking,
    Admitted,
    Rejected,
}

/// Read-only view of the session, handed to protected views
#[derive(Debug, Clone)]
pub struct SessionContext {
    receiver: watch::Receiver<Session>,
}

impl SessionContext {
    pub fn email(&self) -> Option<String> {
        self.receiver.borrow().email.clone()
    }
}

/// Owner of the session for the lifetime of the protected area
pub struct SessionGate {
    state: AppState,
    gate: GateState,
    session: watch::Sender<Session>,
}

impl SessionGate {
    /// Enter the protected area with an empty session
    pub fn init(state: AppState) -> Self {
        info!("Entering protected area");
        let (session, _) = watch::channel(Session::default());
        Self {
            state,
            gate: GateState::Unchecked,
            session,
        }
    }

    /// Leave the protected area, dropping the session
    pub fn teardown(self) {
        self.session.send_replace(Session::default());
        info!("Left protected area");
    }

    #[cfg(test)]
    pub fn state(&self) -> GateState {
        self.gate
    }

    pub fn context(&self) -> SessionContext {
        SessionContext {
            receiver: self.session.subscribe(),
        }
    }

    /// Verify the stored session token, admitting or evicting the user
    ///
    /// A loading notice replaces the view while the check runs.
    pub async fn check(&mut self) -> GateState {
        self.gate = GateState::Checking;
        self.session.send_replace(Session::default());
        self.state.feedback.show(Notice::Loading);

        let cookie = self.state.config.token_cookie.clone();
        let stored = self.state.tokens.get(&cookie).await;
        let token = match stored {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                info!("No session token stored under {}", cookie);
                return self.reject();
            }
            Err(e) => {
                error!("Failed to read session token: {}", e);
                return self.reject();
            }
        };

        let limit = self.state.config.request_timeout();
        let verified = timeout(limit, self.state.api.verify_token(&token)).await;
        match verified {
            Ok(Ok(verified)) => {
                info!("Session verified for: {}", verified.email);
                self.state.feedback.dismiss();
                self.session.send_replace(Session {
                    email: Some(verified.email),
                });
                self.gate = GateState::Admitted;
            }
            Ok(Err(e)) => {
                warn!("Session verification failed: {:?}", e);
                return self.reject();
            }
            Err(_) => {
                warn!("Session verification timed out after {:?}", limit);
                return self.reject();
            }
        }

        self.gate
    }

    fn reject(&mut self) -> GateState {
        self.state.feedback.dismiss();
        self.gate = GateState::Rejected;
        self.state.navigator.navigate(&Route::SignIn.path());
        self.gate
    }

    /// Run `view` for `route`, behind a session check when the route is protected
    ///
    /// Returns `None` when the user was evicted; the view never starts in that case.
    pub async fn protect<F, Fut, T>(&mut self, route: &Route, view: F) -> Option<T>
    where
        F: FnOnce(SessionContext) -> Fut,
        Fut: Future<Output = T>,
    {
        if route.is_protected() && self.check().await != GateState::Admitted {
            info!("Access to {} denied", route);
            return None;
        }

        Some(view(self.context()).await)
    }
}
