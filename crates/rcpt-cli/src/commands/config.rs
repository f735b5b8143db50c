//! Config command - manage the local configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use rcpt_core::RcptConfig;

use super::load_or_default;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one configuration value
    Get {
        /// Dotted key (e.g., "sink.measure_name")
        key: String,
    },

    /// Replace the summary keyword list
    Keywords {
        /// Keywords that mark summary rows (case-sensitive)
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = super::config_path(config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&load_or_default(&path)?)?);
        }
        ConfigCommand::Init { output, force } => {
            let output = output.unwrap_or(path);
            if output.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    output.display()
                );
            }
            save(&RcptConfig::default(), &output)?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                output.display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Keywords { keywords } => {
            let mut config = load_or_default(&path)?;
            config.extraction.summary_keywords = keywords;
            save(&config, &path)?;
            println!(
                "{} Summary keywords set to {}",
                style("✓").green(),
                config.extraction.summary_keywords.join(", ")
            );
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
            }
        }
    }

    Ok(())
}

fn save(config: &RcptConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Resolve a dotted key against a JSON tree.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}
