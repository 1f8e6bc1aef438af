//! dpgen CLI - Command-line and interactive front end for the design-pattern
//! generator
//!
//! This crate provides the interactive session used by the `dpgen` binary,
//! including command parsing, report formatting and output notification.

pub mod session;

// Re-export commonly used types for convenience
pub use session::{
    format_report, pattern_listing, DefaultNotifier, Session, SessionCommand, SessionNotifier,
};
