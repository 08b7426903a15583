use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};

// Build scripts cannot use the lib crate, so the manifest lives here too,
// mirroring src/utils/hub.rs.
const MODEL_REPO: &str = "monologg/bert-base-cased-goemotions-ekman";
const MODEL_NAME: &str = "bert-base-cased-goemotions-ekman";
const MODEL_VERSION: &str = "1.0.0";
const MODELS_DIR: &str = "models";
const CONFIG_FILE: &str = "emotion_wordclouds.toml";

#[derive(Debug, Clone)]
struct ModelFileSpec {
    filename: String,
    url: String,
    sha256: Option<String>,
}

fn manifest_files() -> Vec<ModelFileSpec> {
    let base_url = format!("https://huggingface.co/{}/resolve/main", MODEL_REPO);
    [
        "config.json",
        "model.onnx",
        "tokenizer.json",
        "tokenizer_config.json",
        "vocab.txt",
        "special_tokens_map.json",
    ]
    .into_iter()
    .map(|filename| ModelFileSpec {
        filename: filename.to_string(),
        url: format!("{}/{}", base_url, filename),
        sha256: None,
    })
    .collect()
}

async fn download_file(url: &str, destination: &Path, expected_sha256: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:warning=Downloading: {}", destination.file_name().unwrap_or_default().to_string_lossy());

    let client = Client::new();
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(format!(
            "HTTP {}: {}",
            response.status(),
            response.text().await.unwrap_or_else(|_| "Unknown error".to_string())
        )
        .into());
    }

    let mut file = File::create(destination)?;
    let mut hasher = expected_sha256.map(|_| Sha256::new());
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;

        if let Some(ref mut hasher) = hasher {
            hasher.update(&chunk);
        }
    }

    file.flush()?;

    if let Some(expected) = expected_sha256 {
        if let Some(hasher) = hasher {
            let actual = hex::encode(hasher.finalize());
            if actual != expected {
                std::fs::remove_file(destination)?;
                return Err(format!("File verification failed: expected {}, got {}", expected, actual).into());
            }
        }
    }

    println!("cargo:warning=Downloaded: {}", destination.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

fn model_files_exist(files: &[ModelFileSpec]) -> bool {
    let model_path = Path::new(MODELS_DIR).join(MODEL_NAME);
    model_path.exists() && files.iter().all(|file| model_path.join(&file.filename).exists())
}

async fn setup_models() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:warning=Fetching the emotion model from Hugging Face...");

    let files = manifest_files();

    if model_files_exist(&files) {
        println!("cargo:warning=Model '{}' already exists, skipping download", MODEL_NAME);
        return Ok(());
    }

    let model_path = Path::new(MODELS_DIR).join(MODEL_NAME);
    std::fs::create_dir_all(&model_path)?;

    for file in &files {
        let file_path = model_path.join(&file.filename);
        if !file_path.exists() {
            download_file(&file.url, &file_path, file.sha256.as_deref()).await?;
        }
    }

    let manifest_json = serde_json::json!({
        "name": MODEL_NAME,
        "version": MODEL_VERSION,
        "huggingface_repo": MODEL_REPO,
        "files": files.iter().map(|f| serde_json::json!({
            "filename": f.filename,
            "url": f.url,
            "sha256": f.sha256
        })).collect::<Vec<_>>(),
        "max_sequence_length": 512
    });

    std::fs::write(model_path.join("manifest.json"), serde_json::to_string_pretty(&manifest_json)?)?;
    println!("cargo:warning=Model '{}' downloaded successfully", MODEL_NAME);
    Ok(())
}

fn main() {
    if env::var("SKIP_SETUP").is_ok() {
        println!("cargo:warning=Skipping model setup (SKIP_SETUP is set)");
        return;
    }

    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Err(e) = rt.block_on(setup_models()) {
        println!("cargo:warning=Failed to download models: {}", e);
        println!("cargo:warning=  Run manually: cargo run --bin download-models");
    }

    println!("cargo:rerun-if-changed={}", MODELS_DIR);
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);
}
