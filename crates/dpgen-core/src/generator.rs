//! Generation driver
//!
//! Selects the pattern routine for a request, synthesizes its declarations
//! and hands them to a [`SourceEmitter`] one by one in emission order.
//! Synthesis completes before the first file is written, so a rejected
//! request writes nothing. Emission is best-effort: a failed write is
//! recorded and the remaining declarations are still emitted.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::emitter::SourceEmitter;
use crate::naming::NamingConfig;
use crate::patterns::PatternEngine;
use crate::request::{PatternKind, PatternRequest};
use crate::{GeneratorError, Result};

/// A declaration that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub declaration: String,
    pub error: String,
}

/// What one generation call produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub pattern: PatternKind,
    pub package: String,
    /// Declaration names in emission order
    pub declarations: Vec<String>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
}

impl GenerationReport {
    fn new(pattern: PatternKind, package: &str) -> Self {
        Self {
            pattern,
            package: package.to_string(),
            declarations: Vec::new(),
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Some declarations were not written
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of dispatching a pattern code
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum GenerationOutcome {
    Generated(GenerationReport),
    /// Code outside the supported set; nothing was generated
    Skipped { code: String },
}

impl GenerationOutcome {
    pub fn report(&self) -> Option<&GenerationReport> {
        match self {
            GenerationOutcome::Generated(report) => Some(report),
            GenerationOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, GenerationOutcome::Skipped { .. })
    }
}

/// Pattern engine wired to an emitter
pub struct Generator<E: SourceEmitter> {
    engine: PatternEngine,
    emitter: E,
}

impl<E: SourceEmitter> Generator<E> {
    pub fn new(names: NamingConfig, emitter: E) -> Self {
        Self {
            engine: PatternEngine::new(names),
            emitter,
        }
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Synthesize and emit every declaration of `request`
    pub fn generate(&mut self, request: &PatternRequest) -> Result<GenerationReport> {
        let declarations = self.engine.synthesize(request)?;
        let package = request
            .package_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let mut report = GenerationReport::new(request.kind, package);
        for decl in &declarations {
            report.declarations.push(decl.name.clone());
            match self.emitter.emit(package, decl) {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!(declaration = %decl.name, "Emission failed: {}", e);
                    report.failures.push(WriteFailure {
                        declaration: decl.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            pattern = request.kind.code(),
            package,
            written = report.written.len(),
            failed = report.failures.len(),
            "Generated {}",
            request.kind.display_name()
        );
        Ok(report)
    }

    /// Dispatch on a pattern code with string arguments
    ///
    /// An unknown code yields [`GenerationOutcome::Skipped`] rather than an
    /// error; invalid arguments for a known code are still an error.
    pub fn generate_code(
        &mut self,
        code: &str,
        args: &HashMap<String, String>,
    ) -> Result<GenerationOutcome> {
        let kind = match code.parse::<PatternKind>() {
            Ok(kind) => kind,
            Err(GeneratorError::UnrecognizedPattern(code)) => {
                warn!(code = %code, "Unrecognized pattern code, nothing generated");
                return Ok(GenerationOutcome::Skipped { code });
            }
            Err(e) => return Err(e),
        };

        let request = PatternRequest::from_args(kind, args);
        self.generate(&request).map(GenerationOutcome::Generated)
    }
}
