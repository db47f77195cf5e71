//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const EMBEDDING_MODEL_ENV: &str = "RESUME_MATCHER_EMBEDDING_MODEL";
pub const PROVIDER_ENV: &str = "RESUME_MATCHER_PROVIDER";
pub const DEFAULT_EMBEDDING_MODEL: &str = "minishlab/potion-base-8M";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub similarity: SimilarityConfig,
    pub skills: SkillsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    pub provider: ProviderKind,
    pub embedding_model: String,
    pub models_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Model2Vec static embeddings + cosine similarity
    Embedding,
    /// Term-frequency cosine, no model download required
    Lexical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "embedding" | "embeddings" | "model2vec" => Ok(ProviderKind::Embedding),
            "lexical" | "tf" => Ok(ProviderKind::Lexical),
            other => Err(MatcherError::Configuration(format!(
                "Unknown similarity provider: {}. Supported: embedding, lexical",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Embedding => write!(f, "embedding"),
            ProviderKind::Lexical => write!(f, "lexical"),
        }
    }
}

/// Skills list shipped with the tool when no vocabulary is configured
pub fn default_vocabulary() -> Vec<String> {
    [
        // Languages
        "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "ruby",
        "php", "kotlin", "swift", "scala", "sql", "bash",
        // Frameworks
        "django", "flask", "fastapi", "spring", "react", "angular", "vue", "node.js",
        "express", "rails",
        // Data / ML
        "machine learning", "deep learning", "nlp", "computer vision", "tensorflow",
        "pytorch", "scikit-learn", "pandas", "numpy", "spark", "hadoop", "airflow",
        // Storage
        "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "kafka",
        // Infrastructure
        "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "linux", "git",
        "ci/cd", "microservices", "rest", "graphql",
        // Practices
        "agile", "scrum", "tdd", "communication", "leadership",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            similarity: SimilarityConfig {
                provider: ProviderKind::Embedding,
                embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
                models_dir,
            },
            skills: SkillsConfig {
                vocabulary: default_vocabulary(),
                vocabulary_file: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    /// Apply environment overrides through `lookup` so callers (and tests)
    /// decide where values come from.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(EMBEDDING_MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            log::debug!("Embedding model overridden from environment: {}", model);
            self.similarity.embedding_model = model.trim().to_string();
        }

        if let Some(provider) = lookup(PROVIDER_ENV).filter(|p| !p.trim().is_empty()) {
            self.similarity.provider = ProviderKind::parse(&provider)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.similarity.embedding_model.trim().is_empty() {
            return Err(MatcherError::Configuration(
                "similarity.embedding_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.similarity.models_dir
    }
}
