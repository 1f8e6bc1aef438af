//! Interactive generation session
//!
//! Wraps a [`Generator`] with the pieces an interactive front end needs:
//! - Dot-commands (.help, .list, .config, .quit)
//! - `CODE key=value` generation requests
//! - Report formatting and output notifications

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use dpgen_core::{GenerationOutcome, GenerationReport, Generator, PatternKind, SourceEmitter};

pub mod commands;
pub mod notifier;

pub use commands::SessionCommand;
pub use notifier::{DefaultNotifier, SessionNotifier};

/// Interactive session over a generator
pub struct Session<E: SourceEmitter> {
    generator: Generator<E>,
    /// Current notifier for output
    notifier: Box<dyn SessionNotifier>,
    /// Naming configuration file, if one was loaded
    config_source: Option<PathBuf>,
    running: bool,
    /// Files written over the session
    files_written: usize,
}

impl<E: SourceEmitter> Session<E> {
    pub fn new(generator: Generator<E>) -> Self {
        Self {
            generator,
            notifier: Box::new(DefaultNotifier::new()),
            config_source: None,
            running: true,
            files_written: 0,
        }
    }

    /// Record where the naming configuration came from, for `.config`
    pub fn with_config_source(mut self, path: Option<PathBuf>) -> Self {
        self.config_source = path;
        self
    }

    pub fn set_notifier(&mut self, notifier: Box<dyn SessionNotifier>) {
        self.notifier = notifier;
    }

    pub fn generator(&self) -> &Generator<E> {
        &self.generator
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn parse_input(&self, input: &str) -> Result<SessionCommand> {
        commands::parse_line(input)
    }

    /// Handle a session command, returning the text to show
    pub fn handle_command(&mut self, command: SessionCommand) -> Result<String> {
        match command {
            SessionCommand::Help => Ok(help_text()),
            SessionCommand::Quit => {
                self.running = false;
                Ok("Goodbye!".to_string())
            }
            SessionCommand::List => Ok(pattern_listing()),
            SessionCommand::Config => self.show_config(),
            SessionCommand::Generate { code, args } => match self.generate(&code, &args)? {
                GenerationOutcome::Generated(report) => Ok(format_report(&report)),
                GenerationOutcome::Skipped { code } => Ok(skipped_message(&code)),
            },
        }
    }

    /// Run one generation request and account for the files it wrote
    fn generate(
        &mut self,
        code: &str,
        args: &HashMap<String, String>,
    ) -> Result<GenerationOutcome> {
        let outcome = self.generator.generate_code(code, args)?;
        if let Some(report) = outcome.report() {
            self.files_written += report.written.len();
        }
        Ok(outcome)
    }

    /// Parse, run and report one input line
    pub fn process_line(&mut self, line: &str) {
        let command = match self.parse_input(line) {
            Ok(command) => command,
            Err(e) => {
                self.notifier.on_error(&format!("Error: {e}"));
                return;
            }
        };

        match command {
            // Skips and partial writes are reported as warnings
            SessionCommand::Generate { code, args } => {
                match self.generate(&code, &args) {
                    Ok(GenerationOutcome::Generated(report)) => {
                        if report.is_partial() {
                            self.notifier.on_warning(&format_report(&report));
                        } else {
                            self.notifier.on_output(&format_report(&report));
                        }
                    }
                    Ok(GenerationOutcome::Skipped { code }) => {
                        self.notifier.on_warning(&skipped_message(&code))
                    }
                    Err(e) => self.notifier.on_error(&format!("Error: {e}")),
                }
            }
            command => match self.handle_command(command) {
                Ok(output) => self.notifier.on_output(&output),
                Err(e) => self.notifier.on_error(&format!("Error: {e}")),
            },
        }
    }

    fn show_config(&self) -> Result<String> {
        let source = match &self.config_source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        };
        let yaml = self.generator.engine().names().to_yaml_string()?;
        Ok(format!("Naming configuration ({source}):\n{yaml}"))
    }

    /// Show exit statistics
    pub fn show_exit_stats(&self) {
        self.notifier
            .on_output(&format!("\nSession complete: {} file(s) written.", self.files_written));
    }
}

fn skipped_message(code: &str) -> String {
    format!("Skipped: '{code}' is not a recognized pattern code (see .list)")
}

/// One line per supported pattern
pub fn pattern_listing() -> String {
    let mut out = String::from("Supported patterns:");
    for kind in PatternKind::ALL {
        let product = if kind.needs_product() {
            " productType= productName="
        } else {
            ""
        };
        out.push_str(&format!(
            "\n  {:<5} {:<24} className= ({}){}",
            kind.code(),
            kind.display_name(),
            kind.class_role(),
            product
        ));
    }
    out
}

/// Human-readable summary of a generation report
pub fn format_report(report: &GenerationReport) -> String {
    let mut out = format!(
        "Generated {} in {}: {} of {} file(s) written",
        report.pattern,
        report.package,
        report.written.len(),
        report.declarations.len()
    );
    for path in &report.written {
        out.push_str(&format!("\n  {}", path.display()));
    }
    for failure in &report.failures {
        out.push_str(&format!("\n  FAILED {}: {}", failure.declaration, failure.error));
    }
    out
}

fn help_text() -> String {
    r#"dpgen session commands:
  .help    - Show this help message
  .list    - List supported pattern codes
  .config  - Show the active naming configuration
  .quit    - Exit the session

Generation requests:
  CODE key=value ...

  Keys: className (class), productType (type), productName (name),
        packageName (package)

Examples:
  AFDP className=DogFactory productType=Animal productName=Dog packageName=com.zoo
  CDP class=Handler package=com.chain"#
        .to_string()
}
