//! Console routes and navigation

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Views of the admin console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Public entry route with the sign-in form
    SignIn,
    Dashboard,
    Comics,
    /// Chapter page of one comic, by slug
    Comic(String),
    NewComic,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Comics => "/comics".to_string(),
            Route::Comic(slug) => format!("/comics/{}", slug),
            Route::NewComic => "/new-comic".to_string(),
        }
    }

    /// Parse a path produced by [`Route::path`] or returned by the remote API
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Some(Route::SignIn),
            "/dashboard" => Some(Route::Dashboard),
            "/comics" => Some(Route::Comics),
            "/new-comic" => Some(Route::NewComic),
            _ => trimmed
                .strip_prefix("/comics/")
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Route::Comic(slug.to_string())),
        }
    }

    /// Whether the route requires a verified session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::SignIn)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the console to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that queues requested paths for the console loop to follow
#[derive(Debug, Default)]
pub struct History {
    pending: Mutex<VecDeque<String>>,
    visited: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next path to follow, oldest first
    pub fn take_pending(&self) -> Option<String> {
        let next = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(path) = &next {
            self.visited
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(path.clone());
        }
        next
    }

    /// Every path requested so far, including ones not yet followed
    pub fn requested(&self) -> Vec<String> {
        let visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        visited.iter().chain(pending.iter()).cloned().collect()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        debug!("Navigation requested: {}", path);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(path.to_string());
    }
}
