//! token-template - command-line front end for the template toolkit

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use token_template::config::CatalogConfig;
use token_template::template::{parse, referenced_tokens, render, serialize};
use token_template::toolbar::ToolbarModel;
use token_template::{replay, TokenRegistry};

use cli::{CliArgs, Command};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    token_template::tracing::init(args.log_file);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(args: &CliArgs) -> Result<CatalogConfig> {
    match &args.catalog {
        Some(path) => CatalogConfig::load_from(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(CatalogConfig::load()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run(args: CliArgs) -> Result<ExitCode> {
    match &args.command {
        Command::Parse(input) => {
            let document = parse(&input.read()?);
            print_json(&document)?;
        }
        Command::Format(input) => {
            print!("{}", serialize(&parse(&input.read()?)));
        }
        Command::Tokens { input, check } => {
            let document = parse(&input.read()?);
            let tokens = referenced_tokens(&document);
            if !*check {
                for token in &tokens {
                    println!("{}", token);
                }
                return Ok(ExitCode::SUCCESS);
            }

            let registry = load_catalog(&args)?.into_registry();
            let mut unknown = 0;
            for token in &tokens {
                if registry.contains(token) {
                    println!("{}", token);
                } else {
                    unknown += 1;
                    println!("{}\tunknown", token);
                }
            }
            if unknown > 0 {
                eprintln!("{} unknown token(s)", unknown);
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Render { input, context } => {
            let context = cli::read_context(context)?;
            print!("{}", render(&parse(&input.read()?), &context));
        }
        Command::Catalog { init } => {
            if *init {
                let path = CatalogConfig::default()
                    .save()
                    .context("Failed to write built-in catalog")?;
                println!("Wrote {}", path.display());
                return Ok(ExitCode::SUCCESS);
            }
            let registry = load_catalog(&args)?.into_registry();
            print_toolbar(&registry);
        }
        Command::Replay { script } => {
            let source = std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let script = replay::ReplayScript::from_yaml(&source)?;
            let registry = load_catalog(&args)?.into_registry();
            let outcome = replay::run(&script, &registry)?;
            print_json(&outcome)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_toolbar(registry: &TokenRegistry) {
    for group in ToolbarModel::from_registry(registry).groups {
        println!("{}", group.label);
        for button in group.buttons {
            println!("  {:<28} {}", button.name.placeholder(), button.label);
        }
    }
}
