use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::downloader::{DownloadError, ModelDownloader};

/// Classifier behind the emotion labels: GoEmotions regrouped into the six
/// Ekman categories plus neutral.
pub const MODEL_REPO: &str = "monologg/bert-base-cased-goemotions-ekman";
pub const MODEL_NAME: &str = "bert-base-cased-goemotions-ekman";
pub const MODEL_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model manifest not found at path: {0}")]
    ManifestNotFound(String),
}

pub type HubResult<T> = Result<T, HubError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFileSpec {
    pub filename: String,
    pub url: String,
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub name: String,
    pub version: String,
    pub huggingface_repo: String,
    pub files: Vec<ModelFileSpec>,
    pub max_sequence_length: usize,
}

/// Manifest for the pretrained emotion classifier and its tokenizer.
pub fn goemotions_ekman_manifest() -> ModelManifest {
    let base_url = format!("https://huggingface.co/{}/resolve/main", MODEL_REPO);
    let files = [
        "config.json",
        "model.onnx",
        "tokenizer.json",
        "tokenizer_config.json",
        "vocab.txt",
        "special_tokens_map.json",
    ];

    ModelManifest {
        name: MODEL_NAME.to_string(),
        version: MODEL_VERSION.to_string(),
        huggingface_repo: MODEL_REPO.to_string(),
        files: files
            .into_iter()
            .map(|filename| ModelFileSpec {
                filename: filename.to_string(),
                url: format!("{}/{}", base_url, filename),
                sha256: None,
            })
            .collect(),
        max_sequence_length: 512,
    }
}

/// Local `models/` directory management: a model is considered installed
/// once every manifest file plus the written `manifest.json` is on disk.
pub struct ModelHub {
    models_dir: PathBuf,
    downloader: ModelDownloader,
}

impl ModelHub {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
            downloader: ModelDownloader::new(),
        }
    }

    pub fn default_models_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("models")
    }

    pub fn with_default_dir() -> Self {
        Self::new(Self::default_models_dir())
    }

    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models_dir.join(model_name)
    }

    pub fn is_installed(&self, manifest: &ModelManifest) -> bool {
        let model_dir = self.model_path(&manifest.name);

        if !model_dir.exists() {
            return false;
        }

        let all_files = manifest
            .files
            .iter()
            .all(|file| model_dir.join(&file.filename).exists());

        all_files && model_dir.join("manifest.json").exists()
    }

    /// Downloads the model unless it is already installed; returns its
    /// directory either way.
    pub async fn ensure(&self, manifest: &ModelManifest) -> HubResult<PathBuf> {
        let model_dir = self.model_path(&manifest.name);

        if self.is_installed(manifest) {
            return Ok(model_dir);
        }

        println!("Downloading model '{}'...", manifest.name);
        self.download(manifest).await?;

        Ok(model_dir)
    }

    pub async fn download(&self, manifest: &ModelManifest) -> HubResult<()> {
        let model_dir = self.model_path(&manifest.name);
        tokio::fs::create_dir_all(&model_dir).await?;

        for file in &manifest.files {
            let destination = model_dir.join(&file.filename);
            self.downloader
                .download_file(&file.url, &destination, file.sha256.as_deref())
                .await?;
        }

        let manifest_path = model_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        tokio::fs::write(manifest_path, manifest_json).await?;

        println!("Model '{}' downloaded to {:?}", manifest.name, model_dir);
        Ok(())
    }

    pub async fn load_manifest<P: AsRef<Path>>(&self, model_path: P) -> HubResult<ModelManifest> {
        let manifest_path = model_path.as_ref().join("manifest.json");

        if !manifest_path.exists() {
            return Err(HubError::ManifestNotFound(manifest_path.display().to_string()));
        }

        let manifest_json = tokio::fs::read_to_string(manifest_path).await?;
        let manifest: ModelManifest = serde_json::from_str(&manifest_json)?;

        Ok(manifest)
    }
}
