//! CLI Tooling
//!
//! Command-line interface for tagging runs and group listings.

use crate::config::{ConfigLoader, ZwotagConfig};
use crate::error::ApiError;
use crate::format::{
    format_groups_json, format_groups_text, format_run_report_json, format_run_report_text,
};
use crate::logging::LoggingConfig;
use crate::run::{run, OutputTarget, RunOptions};
use crate::tree::{GroupIndex, WalkerConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Zwotag CLI - tag workout files with their directory group
#[derive(Parser, Debug)]
#[command(name = "zwotag", version)]
#[command(about = "Tag workout files with their position in a directory hierarchy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tag every workout file under a directory
    Tag {
        /// Directory containing the workout tree
        root: PathBuf,
        /// Rewrite files in place instead of writing a mirrored copy
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
        /// Mirror directory (default: <root>_tagged next to the root)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the group assignment without touching any file
    Groups {
        /// Directory containing the workout tree
        root: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Loaded configuration plus command dispatch
pub struct CliContext {
    config: ZwotagConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    /// Context over an already-built configuration
    pub fn with_config(config: ZwotagConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ZwotagConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tag {
                root,
                in_place,
                output,
                dry_run,
                format,
            } => {
                validate_format(format)?;
                let mut options = RunOptions::from(&self.config.tagging);
                if *in_place {
                    options.target = OutputTarget::InPlace;
                } else if let Some(dir) = output {
                    options.target = OutputTarget::Directory(dir.clone());
                }
                options.dry_run = *dry_run;

                let report = run(root, &options)?;
                info!(
                    tagged = report.count(crate::run::FileStatus::Tagged),
                    skipped = report.failures().count(),
                    "Tag command finished"
                );
                if format == "json" {
                    format_run_report_json(&report)
                } else {
                    Ok(format_run_report_text(&report))
                }
            }
            Commands::Groups { root, format } => {
                validate_format(format)?;
                let walker = WalkerConfig::from(&self.config.tagging);
                let index = GroupIndex::build(root, &walker)?;
                if format == "json" {
                    format_groups_json(&index)
                } else {
                    Ok(format_groups_text(&index))
                }
            }
            Commands::Config => self.config.to_toml_string(),
        }
    }
}

fn validate_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
