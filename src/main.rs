//! Resume matcher: skill overlap + semantic similarity scoring

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction, SkillsAction};
use resume_matcher::config::{Config, ProviderKind};
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::file_detector::FileType;
use resume_matcher::input::InputManager;
use resume_matcher::output::{save_report_to_file, ReportGenerator, ReportMetadata, ScoreReport};
use resume_matcher::processing::vocabulary::resolve_vocabulary;
use resume_matcher::processing::{ScoreAggregator, SkillExtractor};
use resume_matcher::similarity::build_provider;
use resume_matcher::similarity::model_manager::ModelManager;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    let result = if cli.command.needs_config() {
        let config = match Config::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                process::exit(1);
            }
        };
        run_command(cli.command, config, config_path).await
    } else {
        // reset and path must work on a config that no longer loads
        match cli.command {
            Commands::Config { action: Some(action) } => run_config_action(action, &config_path),
            _ => Ok(()),
        }
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            skills,
            skills_file,
            provider,
            embedding,
            output,
            save,
            detailed,
        } => {
            let start_time = Instant::now();
            let allowed = FileType::supported_extensions();

            cli::validate_file_extension(&resume, allowed)
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, allowed)
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            if let Some(provider) = provider {
                config.similarity.provider = ProviderKind::parse(&provider)?;
            }
            if let Some(model) = embedding {
                config.similarity.embedding_model = model;
            }

            let vocabulary = resolve_vocabulary(skills.as_deref(), skills_file.as_deref(), &config.skills)?;
            let extractor = SkillExtractor::new(&vocabulary)?;
            info!("Skill vocabulary: {} entries", extractor.skill_count());

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let similarity_config = config.similarity.clone();
            let provider = tokio::task::spawn_blocking(move || build_provider(&similarity_config))
                .await
                .map_err(|e| MatcherError::Provider(format!("Provider initialization panicked: {}", e)))??;
            info!("Similarity provider: {}", provider.describe());

            let aggregator = ScoreAggregator::new(provider);
            let breakdown = aggregator.breakdown(&resume_text, &job_text, &extractor)?;

            let report = ScoreReport::from_breakdown(
                breakdown,
                ReportMetadata {
                    resume_path: resume.display().to_string(),
                    job_path: job.display().to_string(),
                    provider: aggregator.provider().describe(),
                    vocabulary_size: extractor.skill_count(),
                    generated_at: chrono::Utc::now(),
                    processing_time_ms: start_time.elapsed().as_millis() as u64,
                },
            );

            // colors never go into saved files
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills { action } => match action {
            SkillsAction::List { skills_file } => {
                let vocabulary = resolve_vocabulary(None, skills_file.as_deref(), &config.skills)?;
                let extractor = SkillExtractor::new(&vocabulary)?;

                println!("Skill vocabulary ({} entries):", extractor.skill_count());
                for skill in extractor.vocabulary() {
                    println!("  - {}", skill);
                }
            }
            SkillsAction::Extract { file, skills, skills_file } => {
                let vocabulary = resolve_vocabulary(skills.as_deref(), skills_file.as_deref(), &config.skills)?;
                let extractor = SkillExtractor::new(&vocabulary)?;

                let text = InputManager::new().extract_normalized(&file).await?;
                let found = extractor.extract(&text);

                println!("{}: {} skills found", file.display(), found.len());
                for skill in found.iter() {
                    println!("  - {}", skill);
                }
            }
        },

        Commands::Models { action } => {
            let manager = ModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    let models = manager.list_downloaded().await?;
                    println!("Models directory: {}", manager.models_dir().display());
                    if models.is_empty() {
                        println!("No models downloaded. Configured model: {}", config.similarity.embedding_model);
                    }
                    for model in models {
                        let marker = if model == config.similarity.embedding_model { " (configured)" } else { "" };
                        println!("  - {}{}", model, marker);
                    }
                }
                ModelAction::Download { model, force } => {
                    let repo_id = model.unwrap_or_else(|| config.similarity.embedding_model.clone());
                    let path = manager.download(&repo_id, force).await?;
                    println!("Model {} available at {}", repo_id, path.display());
                }
                ModelAction::Remove { model } => {
                    manager.remove(&model).await?;
                    println!("Removed model {}", model);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("{}", config.to_toml()?);
            }
            Some(action) => run_config_action(action, &config_path)?,
        },
    }

    Ok(())
}

fn run_config_action(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => println!("{}", Config::load_from(config_path)?.to_toml()?),
        ConfigAction::Path => println!("{}", config_path.display()),
        ConfigAction::Reset => {
            Config::default().save_to(config_path)?;
            println!("Configuration reset to defaults at {}", config_path.display());
        }
    }
    Ok(())
}
