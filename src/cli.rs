//! CLI interface for the resume matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match a resume against a job description")]
#[command(long_about = "Score resume/job-description fit from skill-vocabulary overlap and semantic similarity of the full text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Comma-separated skill vocabulary, overrides config
        #[arg(long)]
        skills: Option<String>,

        /// Skill vocabulary file, one skill per line
        #[arg(long)]
        skills_file: Option<PathBuf>,

        /// Similarity provider: embedding, lexical
        #[arg(short, long)]
        provider: Option<String>,

        /// Embedding model (HuggingFace repo id or local path)
        #[arg(short, long)]
        embedding: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include skill lists and run metadata
        #[arg(short, long)]
        detailed: bool,
    },

    /// Skill vocabulary commands
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// Show the resolved vocabulary
    List {
        /// Skill vocabulary file, one skill per line
        #[arg(long)]
        skills_file: Option<PathBuf>,
    },

    /// Show vocabulary skills found in a document
    Extract {
        /// Document to scan (PDF, DOCX, TXT, MD)
        file: PathBuf,

        /// Comma-separated skill vocabulary, overrides config
        #[arg(long)]
        skills: Option<String>,

        /// Skill vocabulary file, one skill per line
        #[arg(long)]
        skills_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List downloaded models
    List,

    /// Download a Model2Vec model from the HuggingFace Hub
    Download {
        /// HuggingFace repo ID, defaults to the configured model
        model: Option<String>,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a downloaded model
    Remove {
        /// HuggingFace repo ID
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

impl Commands {
    /// `config path` and `config reset` run without loading the current file
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Commands::Config {
                action: Some(ConfigAction::Path | ConfigAction::Reset)
            }
        )
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "docx", "txt", "md"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.doc"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_score_command_parses() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "score",
            "--resume",
            "cv.pdf",
            "--job",
            "jd.txt",
            "--skills",
            "python,sql",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Score { resume, skills, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(skills.as_deref(), Some("python,sql"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_config_repair_commands_skip_config_loading() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

        assert!(!parse(&["resume-matcher", "config", "reset"]).needs_config());
        assert!(!parse(&["resume-matcher", "config", "path"]).needs_config());
        assert!(parse(&["resume-matcher", "config", "show"]).needs_config());
        assert!(parse(&["resume-matcher", "config"]).needs_config());
        assert!(parse(&["resume-matcher", "models", "list"]).needs_config());
    }
}
