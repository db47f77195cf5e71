//! Download and discovery of Model2Vec models under the models directory

use crate::error::{MatcherError, Result};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec directory needs to be loadable
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Directory a hub repo id is stored under: `org/name` -> `org--name`
pub fn local_model_dir(models_dir: &Path, repo_id: &str) -> PathBuf {
    models_dir.join(repo_id.replace('/', "--"))
}

pub struct ModelManager {
    models_dir: PathBuf,
}

impl ModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                MatcherError::Configuration(format!("Failed to create models directory: {}", e))
            })?;
        }

        Ok(Self { models_dir })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Check if a directory contains a loadable model
    pub async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Repo ids of valid models already present, sorted
    pub async fn list_downloaded(&self) -> Result<Vec<String>> {
        let mut models = Vec::new();
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if Self::is_valid_model_directory(&entry.path()).await {
                let dir_name = entry.file_name().to_string_lossy().to_string();
                models.push(dir_name.replace("--", "/"));
            }
        }

        models.sort();
        Ok(models)
    }

    pub async fn is_downloaded(&self, repo_id: &str) -> bool {
        Self::is_valid_model_directory(&local_model_dir(&self.models_dir, repo_id)).await
    }

    /// Download a model from the Hugging Face Hub into the models directory
    pub async fn download(&self, repo_id: &str, force: bool) -> Result<PathBuf> {
        let model_dir = local_model_dir(&self.models_dir, repo_id);

        if !force && self.is_downloaded(repo_id).await {
            info!("Model {} already present at {}", repo_id, model_dir.display());
            return Ok(model_dir);
        }

        let api = Api::new()
            .map_err(|e| MatcherError::Provider(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(repo_id.to_string());

        fs::create_dir_all(&model_dir).await?;
        info!("Downloading embedding model {} into {}", repo_id, model_dir.display());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                MatcherError::Provider(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            info!("Downloaded {}", file);
        }

        for file in OPTIONAL_FILES {
            match repo.get(file).await {
                Ok(cached) => {
                    fs::copy(&cached, model_dir.join(file)).await?;
                }
                Err(e) => warn!("Optional file {} not found: {}", file, e),
            }
        }

        Ok(model_dir)
    }

    pub async fn remove(&self, repo_id: &str) -> Result<()> {
        let model_dir = local_model_dir(&self.models_dir, repo_id);
        if !model_dir.exists() {
            return Err(MatcherError::InvalidInput(format!("Model not downloaded: {}", repo_id)));
        }
        fs::remove_dir_all(&model_dir).await?;
        Ok(())
    }
}
