//! Session input parsing
//!
//! A line is either a dot-command (.help, .list, .config, .quit) or a
//! generation request: a pattern code followed by `key=value` arguments.
//!
//! ```text
//! AFDP className=DogFactory productType=Animal productName=Dog packageName=com.zoo
//! ```

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use dpgen_core::request::{ARG_CLASS_NAME, ARG_PACKAGE_NAME, ARG_PRODUCT_NAME, ARG_PRODUCT_TYPE};

/// Available session commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Show help information
    Help,
    /// Exit the session
    Quit,
    /// List the supported pattern codes
    List,
    /// Show the active naming configuration
    Config,
    /// Generate one pattern
    Generate {
        code: String,
        args: HashMap<String, String>,
    },
}

/// Short spellings accepted for the argument keys
fn canonical_key(key: &str) -> &str {
    match key {
        "class" => ARG_CLASS_NAME,
        "type" | "product-type" => ARG_PRODUCT_TYPE,
        "name" | "product-name" => ARG_PRODUCT_NAME,
        "package" | "pkg" => ARG_PACKAGE_NAME,
        other => other,
    }
}

/// Parse a whole input line
pub fn parse_line(input: &str) -> Result<SessionCommand> {
    let trimmed = input.trim();
    if trimmed.starts_with('.') {
        parse_command(trimmed)
    } else {
        parse_request(trimmed)
    }
}

/// Parse a dot-command
pub fn parse_command(input: &str) -> Result<SessionCommand> {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('.') else {
        return Err(anyhow!("Commands must start with '.'"));
    };

    let parts: Vec<&str> = rest.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Err(anyhow!("Empty command"));
    };

    match *name {
        "help" | "h" => Ok(SessionCommand::Help),
        "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
        "list" | "patterns" => Ok(SessionCommand::List),
        "config" => Ok(SessionCommand::Config),
        _ => Err(anyhow!("Unknown command: .{}", name)),
    }
}

/// Parse `CODE key=value ...`
pub fn parse_request(input: &str) -> Result<SessionCommand> {
    let mut parts = input.split_whitespace();
    let Some(code) = parts.next() else {
        return Err(anyhow!("Empty request"));
    };

    let mut args = HashMap::new();
    for part in parts {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected key=value, got '{}'", part))?;
        if key.is_empty() {
            return Err(anyhow!("Missing key in '{}'", part));
        }
        args.insert(canonical_key(key).to_string(), value.to_string());
    }

    Ok(SessionCommand::Generate {
        code: code.to_string(),
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse_command(".help").unwrap(), SessionCommand::Help);
        assert_eq!(parse_command(".h").unwrap(), SessionCommand::Help);
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_command(".quit").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_command(".q").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_command(".exit").unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_generation_request() {
        match parse_line("AFDP className=DogFactory type=Animal name=Dog package=com.zoo").unwrap() {
            SessionCommand::Generate { code, args } => {
                assert_eq!(code, "AFDP");
                assert_eq!(args["className"], "DogFactory");
                assert_eq!(args["productType"], "Animal");
                assert_eq!(args["productName"], "Dog");
                assert_eq!(args["packageName"], "com.zoo");
            }
            other => panic!("Expected Generate, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_code_still_parses() {
        // Recognition happens in the generator, which reports a skip
        assert!(matches!(
            parse_line("ZZZ class=X").unwrap(),
            SessionCommand::Generate { ref code, .. } if code == "ZZZ"
        ));
    }

    #[test]
    fn test_parse_invalid_input() {
        assert!(parse_command(".invalid").is_err());
        assert!(parse_command("help").is_err()); // Missing dot
        assert!(parse_line("CDP className").is_err());
        assert!(parse_line("CDP =Handler").is_err());
    }
}
