//! Transient notifications shown to the console user
//!
//! At most one notice is visible at a time; showing a new one replaces the
//! previous one.

use std::sync::{Mutex, PoisonError};

use crate::views::render_upload_link;

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Work in progress; stays up until dismissed
    Loading,
    Success(String),
    Error(String),
    /// Success whose result is referenced inline instead of navigated to
    Link { message: String, link: String },
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Loading => "Loading...",
            Notice::Success(message) | Notice::Error(message) | Notice::Link { message, .. } => {
                message
            }
        }
    }
}

/// Surface that displays notices
pub trait Feedback: Send + Sync {
    /// Show `notice`, replacing whatever is currently visible
    fn show(&self, notice: Notice);

    /// Hide the visible notice, if any
    fn dismiss(&self);

    fn current(&self) -> Option<Notice>;
}

/// Prints notices to the terminal
#[derive(Debug, Default)]
pub struct TerminalFeedback {
    current: Mutex<Option<Notice>>,
}

impl TerminalFeedback {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Feedback for TerminalFeedback {
    fn show(&self, notice: Notice) {
        match &notice {
            Notice::Loading => println!("… {}", notice.message()),
            Notice::Success(message) => println!("✔ {}", message),
            Notice::Error(message) => eprintln!("✖ {}", message),
            Notice::Link { message, link } => {
                println!("✔ {}", message);
                println!("  {}", render_upload_link(link));
            }
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(notice);
    }

    fn dismiss(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn current(&self) -> Option<Notice> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
