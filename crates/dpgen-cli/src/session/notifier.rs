//! Output notification system for the session
//!
//! Lets the console front end and tests plug in their own output handling.

/// Trait for handling session output notifications
pub trait SessionNotifier: Send + Sync {
    /// Handle regular output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);

    /// Handle a request that produced nothing or only part of its files
    fn on_warning(&self, content: &str);
}

/// Default console-based notifier
pub struct DefaultNotifier;

impl DefaultNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl SessionNotifier for DefaultNotifier {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{}", content);
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{}", content);
    }

    fn on_warning(&self, content: &str) {
        eprintln!("warning: {}", content);
    }
}

impl Default for DefaultNotifier {
    fn default() -> Self {
        Self::new()
    }
}
