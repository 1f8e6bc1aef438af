use std::{
    collections::HashMap,
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dpgen_cli::{format_report, pattern_listing, Session};
use dpgen_core::{
    emitter::{DEFAULT_FILE_COMMENT, DEFAULT_SOURCE_ROOT},
    init_tracing,
    request::{ARG_CLASS_NAME, ARG_PACKAGE_NAME, ARG_PRODUCT_NAME, ARG_PRODUCT_TYPE},
    FileEmitter, GenerationOutcome, Generator, MemoryEmitter, NamingConfig, SourceEmitter,
};
use tracing::debug;

fn cli() -> Command {
    Command::new("dpgen")
        .version(dpgen_core::VERSION)
        .about("Generate Java skeletons for Gang-of-Four design patterns")
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .value_name("CODE")
                .help("Pattern code (AFDP, BDP, FDP, FCDP, CDP, MDP, VDP, TDP); omit for an interactive session"),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .value_name("NAME")
                .help("Name of the pattern's primary class"),
        )
        .arg(
            Arg::new("product-type")
                .long("product-type")
                .value_name("TYPE")
                .help("Product interface (AFDP, BDP, FDP)"),
        )
        .arg(
            Arg::new("product-name")
                .long("product-name")
                .value_name("NAME")
                .help("Concrete product class (AFDP, BDP, FDP)"),
        )
        .arg(
            Arg::new("package")
                .long("package")
                .value_name("PKG")
                .help("Java package of every generated declaration"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Naming configuration file (YAML); built-in defaults otherwise"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("DIR")
                .help("Source root the package directories are created under")
                .default_value(DEFAULT_SOURCE_ROOT),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print generated sources instead of writing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the generation report as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List supported pattern codes and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Initialize logging
    init_tracing(matches.get_flag("debug"));

    if matches.get_flag("list") {
        println!("{}", pattern_listing());
        return Ok(());
    }

    // Configuration errors are fatal before any request runs
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let names = match &config_path {
        Some(path) => NamingConfig::load(path)
            .with_context(|| format!("Failed to load naming configuration {}", path.display()))?,
        None => NamingConfig::default(),
    };
    debug!(config = ?config_path, "Naming configuration resolved");

    let out_dir = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_ROOT));
    let dry_run = matches.get_flag("dry-run");

    match matches.get_one::<String>("pattern") {
        Some(code) => {
            let args = request_args(&matches);
            if dry_run {
                let emitter = MemoryEmitter::with_file_comment(DEFAULT_FILE_COMMENT);
                let mut generator = Generator::new(names, emitter);
                generate_once(&mut generator, code, &args, matches.get_flag("json"))?;
                for (path, source) in generator.emitter().files() {
                    println!("// ===== {} =====", path.display());
                    println!("{source}");
                }
                Ok(())
            } else {
                let mut generator = Generator::new(names, FileEmitter::new().root(&out_dir));
                generate_once(&mut generator, code, &args, matches.get_flag("json"))
            }
        }
        None => {
            println!("dpgen v{}", dpgen_core::VERSION);
            if dry_run {
                println!("Dry run: nothing is written to disk");
                let emitter = MemoryEmitter::with_file_comment(DEFAULT_FILE_COMMENT);
                let generator = Generator::new(names, emitter);
                run_session(&mut Session::new(generator).with_config_source(config_path))
            } else {
                let generator = Generator::new(names, FileEmitter::new().root(&out_dir));
                println!("Source root: {}", generator.emitter().source_root().display());
                run_session(&mut Session::new(generator).with_config_source(config_path))
            }
        }
    }
}

/// Collect the request flags under the generator's argument keys
fn request_args(matches: &ArgMatches) -> HashMap<String, String> {
    [
        ("class", ARG_CLASS_NAME),
        ("product-type", ARG_PRODUCT_TYPE),
        ("product-name", ARG_PRODUCT_NAME),
        ("package", ARG_PACKAGE_NAME),
    ]
    .into_iter()
    .filter_map(|(flag, key)| {
        matches
            .get_one::<String>(flag)
            .map(|value| (key.to_string(), value.clone()))
    })
    .collect()
}

fn generate_once<E: SourceEmitter>(
    generator: &mut Generator<E>,
    code: &str,
    args: &HashMap<String, String>,
    json: bool,
) -> Result<()> {
    let outcome = generator.generate_code(code, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        GenerationOutcome::Skipped { code } => {
            if !json {
                eprintln!("warning: '{code}' is not a recognized pattern code; nothing generated");
            }
            Ok(())
        }
        GenerationOutcome::Generated(report) => {
            if !json {
                println!("{}", format_report(&report));
            }
            if report.is_partial() {
                bail!(
                    "{} of {} declaration(s) could not be written",
                    report.failures.len(),
                    report.declarations.len()
                );
            }
            Ok(())
        }
    }
}

fn run_session<E: SourceEmitter>(session: &mut Session<E>) -> Result<()> {
    use rustyline::{error::ReadlineError, DefaultEditor};

    let mut rl = DefaultEditor::new()?;
    let is_interactive = io::stdin().is_terminal();

    println!("Type .help for help, .quit to exit");
    println!();

    while session.is_running() {
        match rl.readline("dpgen> ") {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle empty input
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                // Echo input in non-interactive mode
                if !is_interactive {
                    println!("dpgen> {trimmed}");
                }

                session.process_line(trimmed);
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use .quit to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    // Show exit statistics
    session.show_exit_stats();

    Ok(())
}
