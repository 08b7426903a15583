use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("File verification failed: expected {expected}, got {actual}")]
    VerificationFailed { expected: String, actual: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type DownloadResult<T> = Result<T, DownloadError>;

/// Streaming HTTP downloader with a progress bar and optional sha256
/// verification. Used for model files only.
pub struct ModelDownloader {
    client: Client,
}

impl Default for ModelDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelDownloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn download_file<P: AsRef<Path>>(
        &self,
        url: &str,
        destination: P,
        expected_sha256: Option<&str>,
    ) -> DownloadResult<()> {
        let destination = destination.as_ref();

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string())
            )));
        }

        let total_size = response.content_length().unwrap_or(0);
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
                .progress_chars("#>-"),
        );
        pb.set_message(format!(
            "Downloading {}",
            destination.file_name().unwrap_or_default().to_string_lossy()
        ));

        let mut file = File::create(destination).await?;
        let mut hasher = expected_sha256.map(|_| Sha256::new());
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;

            if let Some(ref mut hasher) = hasher {
                hasher.update(&chunk);
            }

            pb.inc(chunk.len() as u64);
        }

        file.flush().await?;
        pb.finish_with_message(format!(
            "Downloaded {}",
            destination.file_name().unwrap_or_default().to_string_lossy()
        ));

        if let (Some(expected), Some(hasher)) = (expected_sha256, hasher) {
            let actual = hex::encode(hasher.finalize());
            if actual != expected {
                let _ = tokio::fs::remove_file(destination).await;
                return Err(DownloadError::VerificationFailed {
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        Ok(())
    }
}
