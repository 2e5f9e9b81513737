//! Scriptscan CLI

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use scriptscan::language::SUPPORTED_LANGUAGES;
use scriptscan::{LanguageContext, OutputFormat, ScriptscanConfig, ScriptscanError, TesseractEngine, export};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI enum for output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Pretty-printed JSON with per-page language metadata
    Json,
    /// Plain text in logical order
    Text,
    /// Plain text in visual order for renderers without bidi support
    Display,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Display => OutputFormat::Display,
        }
    }
}

#[derive(Parser)]
#[command(name = "scriptscan", version)]
#[command(about = "Adaptive OCR and language identification for mixed-script documents", long_about = None)]
struct Cli {
    /// Configuration file (.toml, .yaml, .yml or .json); defaults to a discovered scriptscan.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OCR a PDF or image and analyze its languages
    Extract {
        /// Document to process
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: CliFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the language of a text ("-" reads stdin)
    Detect {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Spellcheck a text in one language ("-" reads stdin)
    Spellcheck {
        /// Language code or variant (ar, he, fa, ur, en, en-US, ...)
        #[arg(short, long)]
        language: String,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List supported languages and installed tesseract models
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract { file, format, output } => {
            let report = scriptscan::extract_document(&file, &config)
                .await
                .with_context(|| format!("failed to process {}", file.display()))?;

            for failure in &report.failed_pages {
                eprintln!("warning: page {} failed: {}", failure.page_number, failure.error);
            }

            let rendered = export::render(&report, format.into())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }

        Commands::Detect { text } => {
            let text = read_text(text)?;
            let context = LanguageContext::from_config(&config.languages)?;
            let result = context.analyze(&text);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }

        Commands::Spellcheck { language, text } => {
            let text = read_text(text)?;
            let context = LanguageContext::from_config(&config.languages)?;
            match context.spell_check(&text, &language) {
                Ok(outcome) => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                    Ok(())
                }
                Err(e @ ScriptscanError::DictionaryUnavailable { .. }) => {
                    bail!("{} (searched {:?})", e, config.languages.dictionary_dirs)
                }
                Err(e) => Err(e.into()),
            }
        }

        Commands::Languages => {
            println!("{:<6} {:<14} {:<5} {:<6} DICTIONARY", "CODE", "NAME", "DIR", "OCR");
            for profile in SUPPORTED_LANGUAGES {
                println!(
                    "{:<6} {:<14} {:<5} {:<6} {}",
                    profile.code,
                    profile.name,
                    profile.direction.as_str(),
                    profile.ocr_language,
                    profile.dictionary
                );
            }

            let engine = TesseractEngine::from_config(&config.ocr);
            match engine.list_installed_languages().await {
                Ok(models) => {
                    println!();
                    println!("Installed tesseract models: {}", models.join(", "));
                    let missing: Vec<&str> = SUPPORTED_LANGUAGES
                        .iter()
                        .map(|p| p.ocr_language)
                        .filter(|model| !models.iter().any(|m| m == model))
                        .collect();
                    if !missing.is_empty() {
                        println!("Missing models: {}", missing.join(", "));
                    }
                }
                Err(e) => eprintln!("warning: could not list tesseract models: {}", e),
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScriptscanConfig> {
    let config = match path {
        Some(path) => {
            ScriptscanConfig::from_file(path).with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => ScriptscanConfig::discover()?.unwrap_or_default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_text(args: Vec<String>) -> Result<String> {
    if args.len() == 1 && args[0] == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        return Ok(text);
    }
    Ok(args.join(" "))
}
