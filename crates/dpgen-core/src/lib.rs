//! # dpgen Core
//!
//! Design-pattern skeleton synthesis for Java projects, including:
//! - A declaration model for interfaces, classes and abstract classes
//! - Java source rendering of that model
//! - The naming configuration every pattern draws its identifiers from
//! - The pattern synthesis engine (eight Gang-of-Four patterns)
//! - Source emitters (file system and in-memory) and the generation driver
//!
//! This crate provides the foundational components that can be used to build
//! generator front ends (command line, interactive session, editor plugin, etc.)

#![warn(clippy::all)]

pub mod decl;
pub mod emitter;
pub mod generator;
pub mod naming;
pub mod patterns;
pub mod request;

// Re-export commonly used types
pub use decl::{render_file, DeclKind, Declaration, ToSource, TypeRef};
pub use emitter::{FileEmitter, MemoryEmitter, SourceEmitter, WriteError, DEFAULT_SOURCE_ROOT};
pub use generator::{GenerationOutcome, GenerationReport, Generator, WriteFailure};
pub use naming::{ConfigError, NamingConfig};
pub use patterns::PatternEngine;
pub use request::{PatternKind, PatternRequest};

/// Generator version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for dpgen components
///
/// `RUST_LOG` takes precedence; otherwise `dpgen_core` and `dpgen_cli` log at
/// info, or debug when `debug` is set. Safe to call more than once.
pub fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("dpgen_core={level},dpgen_cli={level}"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Error types for generator operations
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    /// Naming configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A required request field is empty or not a valid name
    #[error("Invalid {pattern} request: {message}")]
    InvalidRequest {
        pattern: PatternKind,
        message: String,
    },

    /// Pattern code outside the supported set
    #[error("Unrecognized pattern code: {0}")]
    UnrecognizedPattern(String),

    /// Emitter failure
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
