//! Command-line argument parsing
//!
//! Supports:
//! - Inspecting templates (segments, referenced tokens)
//! - Canonical formatting and rendering against a JSON context
//! - Printing or initializing the token catalog
//! - Replaying scripted editor sessions

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

/// Work with prompt templates containing {token} placeholders
#[derive(Parser, Debug)]
#[command(name = "token-template", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Token catalog file (default: ~/.config/token-template/tokens.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Also write debug logs to the config logs directory
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the parsed segments as JSON
    Parse(TemplateInput),

    /// Re-serialize with canonical brace escaping
    Format(TemplateInput),

    /// List the tokens a template references
    Tokens {
        #[command(flatten)]
        input: TemplateInput,

        /// Fail if a token is not in the catalog
        #[arg(long)]
        check: bool,
    },

    /// Substitute token values from a JSON object
    Render {
        #[command(flatten)]
        input: TemplateInput,

        /// JSON object, or @FILE to read one from a file
        #[arg(long, short = 'c', value_name = "JSON|@FILE")]
        context: String,
    },

    /// Print the toolbar groups of the catalog
    Catalog {
        /// Write the built-in catalog to the config directory
        #[arg(long)]
        init: bool,
    },

    /// Apply a YAML script of editor actions and print the result
    Replay {
        /// Script file
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TemplateInput {
    /// Template file ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Template given inline
    #[arg(long, short = 't', conflicts_with = "file")]
    pub template: Option<String>,
}

impl TemplateInput {
    pub fn read(&self) -> Result<String> {
        if let Some(template) = &self.template {
            return Ok(template.clone());
        }
        match &self.file {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display())),
            _ => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read template from stdin")?;
                Ok(buf)
            }
        }
    }
}

/// Parse a `--context` argument into a JSON object
pub fn read_context(arg: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let source = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file {}", path))?,
        None => arg.to_string(),
    };
    let value: serde_json::Value =
        serde_json::from_str(&source).context("Context is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("Context must be a JSON object, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_args() {
        let args = CliArgs::try_parse_from([
            "token-template",
            "render",
            "-t",
            "Hi {name}",
            "--context",
            r#"{"name":"Ada"}"#,
        ])
        .unwrap();
        match args.command {
            Command::Render { input, context } => {
                assert_eq!(input.read().unwrap(), "Hi {name}");
                assert_eq!(read_context(&context).unwrap()["name"], "Ada");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["token-template", "catalog", "--catalog", "x.yaml"]).unwrap();
        assert_eq!(args.catalog, Some(PathBuf::from("x.yaml")));
        assert!(matches!(args.command, Command::Catalog { init: false }));
    }

    #[test]
    fn test_context_must_be_object() {
        assert!(read_context("[1, 2]").is_err());
        assert!(read_context("not json").is_err());
    }

    #[test]
    fn test_template_and_file_conflict() {
        assert!(CliArgs::try_parse_from(["token-template", "parse", "a.txt", "-t", "x"]).is_err());
    }
}
