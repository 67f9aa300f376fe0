// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context as AnyhowContext, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use futures::StreamExt;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, LogLevel};
use crate::links::LinkClassifier;
use crate::providers::HttpTranslator;
use crate::translation::MarkdownTranslator;

mod app_config;
mod document;
mod errors;
mod links;
mod providers;
mod rows;
mod translation;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the addressable rows of a markdown document
    Rows {
        /// Markdown file to segment
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Derive the anchor slug for a heading line
    Slug {
        /// Heading text, e.g. "## Detailed design"
        heading: String,
    },

    /// Classify a link the way the reader UI would
    Classify {
        /// Link destination to classify
        url: String,
    },

    /// Translate a markdown document, streaming progress
    Translate {
        /// Markdown file to translate
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for propdoc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// propdoc - progressive proposal document translation
///
/// Segments, classifies and progressively translates structured markdown
/// documents while preserving their formatting.
#[derive(Parser, Debug)]
#[command(name = "propdoc")]
#[command(version = "1.0.0")]
#[command(about = "Document tree segmentation and streaming translation")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// Custom logger implementation, stderr with timestamps
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => writeln!(stderr, "\x1B[1;31m{} {}\x1B[0m", now, record.args()),
                Level::Warn => writeln!(stderr, "\x1B[1;33m{} {}\x1B[0m", now, record.args()),
                _ => writeln!(stderr, "{} {}", now, record.args()),
            };
        }
    }

    fn flush(&self) {}
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();
    let log_level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(LogLevel::Info);
    CustomLogger::init(level_filter(log_level)).ok();

    match options.command {
        Commands::Rows { input_path } => {
            let text = std::fs::read_to_string(&input_path)
                .with_context(|| format!("Failed to read {:?}", input_path))?;
            let root = document::parse(&text);
            for row in rows::rows(&root) {
                println!("[{}]", row.id);
                println!("{}\n", row.markup);
            }
        }

        Commands::Slug { heading } => {
            println!("{}", rows::anchor(&heading));
        }

        Commands::Classify { url } => {
            let action = LinkClassifier::default().classify(&url);
            println!("{:?}", action);
        }

        Commands::Translate {
            input_path,
            config_path,
        } => {
            let config = Config::from_file(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path))?;
            let text = std::fs::read_to_string(&input_path)
                .with_context(|| format!("Failed to read {:?}", input_path))?;
            let root = document::parse(&text);

            let provider = HttpTranslator::new(
                &config.translation.endpoint,
                &config.translation.api_key,
                &config.source_language,
                &config.target_language,
            )?;
            let translator = MarkdownTranslator::new(provider);

            let mut stream = translator.translate_stream(root);
            let mut latest = None;
            while let Some(snapshot) = stream.next().await {
                let snapshot = snapshot?;
                let progress = stream.session().progress();
                info!(
                    "Translated {}/{} leaves",
                    progress.translated_leaves, progress.total_leaves
                );
                latest = Some(snapshot);
            }
            if let Some(tree) = latest {
                println!("{}", document::format(&tree));
            } else {
                info!("Nothing to translate, document unchanged");
                println!("{}", text.trim_end());
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
