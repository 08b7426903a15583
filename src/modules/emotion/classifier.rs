use ort::{
    session::{
        Session,
        builder::GraphOptimizationLevel,
    },
    value::Value,
    inputs,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokenizers::Tokenizer;
use thiserror::Error;

use crate::config::LabelingConfig;
use super::labels::{Emotion, SentenceLabel};

#[derive(Error, Debug, Clone)]
pub enum EmotionClassifierError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model config error: {0}")]
    ModelConfig(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(String),

    #[error("Array shape error: {0}")]
    ArrayShape(String),

    #[error("Progress bar template error: {0}")]
    Progress(String),
}

impl From<std::io::Error> for EmotionClassifierError {
    fn from(error: std::io::Error) -> Self {
        EmotionClassifierError::Io(error.to_string())
    }
}

impl From<ort::Error> for EmotionClassifierError {
    fn from(error: ort::Error) -> Self {
        EmotionClassifierError::OnnxRuntime(error.to_string())
    }
}

/// The slice of a Hugging Face `config.json` the classifier needs.
#[derive(Debug, Deserialize)]
struct HfModelConfig {
    id2label: HashMap<String, String>,
}

/// Independent per-class probability, from a raw logit.
///
/// The classifier is multi-label: each class gets its own logistic transform
/// rather than a softmax over all of them, so probabilities do not sum to 1.
pub fn sigmoid(logit: f32) -> f32 {
    1.0 / (1.0 + (-logit).exp())
}

/// Single-label decision rule: a sentence gets a class only when exactly one
/// class clears the threshold. Zero or several qualifying classes mean the
/// sentence is ambiguous and stays [`SentenceLabel::Unknown`], as does a
/// qualifying class outside the six emotion buckets (`neutral`).
pub fn select_single_label(probs: &[f32], class_names: &[String], threshold: f32) -> SentenceLabel {
    let mut qualifying = probs
        .iter()
        .enumerate()
        .filter(|(_, prob)| **prob > threshold);

    match (qualifying.next(), qualifying.next()) {
        (Some((idx, _)), None) => class_names
            .get(idx)
            .and_then(|name| Emotion::from_model_label(name))
            .into(),
        _ => SentenceLabel::Unknown,
    }
}

pub struct EmotionClassifier {
    session: Session,
    tokenizer: Tokenizer,
    class_names: Vec<String>,
    max_length: usize,
}

impl EmotionClassifier {
    pub fn new(model_dir: &Path) -> Result<Self, EmotionClassifierError> {
        ort::init()
            .with_name("emotion_wordclouds")
            .commit()?;

        let tokenizer = Self::load_tokenizer(&model_dir.join("tokenizer.json"))?;
        let class_names = Self::load_class_names(&model_dir.join("config.json"))?;

        let onnx_model_path = model_dir.join("model.onnx");
        if !onnx_model_path.exists() {
            return Err(EmotionClassifierError::ModelLoading(
                "ONNX model file (model.onnx) not found. Run 'cargo run --bin download-models' first.".to_string()
            ));
        }

        if Self::is_placeholder_file(&onnx_model_path)? {
            return Err(EmotionClassifierError::ModelLoading(
                "ONNX model is a placeholder file. Run 'cargo run --bin download-models' to fetch the actual model.".to_string()
            ));
        }

        let model_data = std::fs::read(&onnx_model_path)?;
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_memory(&model_data)?;

        Ok(Self {
            session,
            tokenizer,
            class_names,
            max_length: 512,
        })
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Labels every sentence, in order, batch by batch.
    ///
    /// Returns one [`SentenceLabel`] per input sentence; inference progress
    /// is shown as a counter across the whole sequence.
    pub fn label_sentences(
        &mut self,
        sentences: &[String],
        opts: &LabelingConfig,
    ) -> Result<Vec<SentenceLabel>, EmotionClassifierError> {
        opts.validate().map_err(EmotionClassifierError::InvalidInput)?;

        let pb = ProgressBar::new(sentences.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{wide_bar:.cyan/blue}] {pos}/{len}")
                .map_err(|e| EmotionClassifierError::Progress(e.to_string()))?
                .progress_chars("#>-"),
        );
        pb.set_message("Classifying");

        let mut labels = Vec::with_capacity(sentences.len());
        for batch in sentences.chunks(opts.batch_size) {
            let probs = self.classify_batch(batch)?;
            for row in &probs {
                labels.push(select_single_label(row, &self.class_names, opts.threshold));
            }
            pb.inc(batch.len() as u64);
        }
        pb.finish_and_clear();

        Ok(labels)
    }

    /// Runs one batch through the model and returns per-class probabilities,
    /// one row per sentence.
    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmotionClassifierError> {
        let encodings = self.tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmotionClassifierError::Tokenizer(format!("Tokenization error: {}", e)))?;

        let batch_len = encodings.len();
        let mut input_ids: Vec<i64> = Vec::with_capacity(batch_len * self.max_length);
        let mut attention_mask: Vec<i64> = Vec::with_capacity(batch_len * self.max_length);

        for encoding in &encodings {
            let mut token_ids = encoding.get_ids().to_vec();
            let mut mask = encoding.get_attention_mask().to_vec();

            if token_ids.len() > self.max_length {
                token_ids.truncate(self.max_length);
                mask.truncate(self.max_length);
            } else {
                while token_ids.len() < self.max_length {
                    token_ids.push(0);
                    mask.push(0);
                }
            }

            input_ids.extend(token_ids.iter().map(|&x| x as i64));
            attention_mask.extend(mask.iter().map(|&x| x as i64));
        }

        let input_ids_value = Value::from_array(([batch_len, self.max_length], input_ids))?;
        let attention_mask_value = Value::from_array(([batch_len, self.max_length], attention_mask))?;

        let outputs = self.session.run(inputs![
            "input_ids" => input_ids_value,
            "attention_mask" => attention_mask_value
        ])
            .map_err(|e| EmotionClassifierError::Inference(format!("Model inference failed: {}", e)))?;

        let output = &outputs[0];

        let (shape, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| EmotionClassifierError::Inference(format!("Failed to extract output: {}", e)))?;

        let logits = ndarray::Array2::from_shape_vec((shape[0] as usize, shape[1] as usize), data.to_vec())
            .map_err(|e| EmotionClassifierError::ArrayShape(format!("Failed to create logits array: {}", e)))?;

        if logits.shape() != &[batch_len, self.class_names.len()] {
            return Err(EmotionClassifierError::Inference(
                format!(
                    "Unexpected output shape: {:?}, expected [{}, {}]",
                    logits.shape(),
                    batch_len,
                    self.class_names.len()
                )
            ));
        }

        Ok(logits
            .outer_iter()
            .map(|row| row.iter().map(|&logit| sigmoid(logit)).collect())
            .collect())
    }

    pub fn load_tokenizer(tokenizer_path: &Path) -> Result<Tokenizer, EmotionClassifierError> {
        if !tokenizer_path.exists() {
            return Err(EmotionClassifierError::Tokenizer(
                "tokenizer.json not found. Run 'cargo run --bin download-models' first.".to_string()
            ));
        }

        if Self::is_placeholder_file(tokenizer_path)? {
            return Err(EmotionClassifierError::Tokenizer(
                "tokenizer.json is a placeholder file. Run 'cargo run --bin download-models' to fetch the actual tokenizer.".to_string()
            ));
        }

        Tokenizer::from_file(tokenizer_path)
            .map_err(|e| EmotionClassifierError::Tokenizer(format!("Failed to load tokenizer: {}", e)))
    }

    /// Reads the `id2label` table and orders class names by index.
    pub fn load_class_names(config_path: &Path) -> Result<Vec<String>, EmotionClassifierError> {
        let config_json = std::fs::read_to_string(config_path)?;
        let config: HfModelConfig = serde_json::from_str(&config_json)
            .map_err(|e| EmotionClassifierError::ModelConfig(format!("Failed to parse config.json: {}", e)))?;

        let mut indexed: Vec<(usize, String)> = Vec::with_capacity(config.id2label.len());
        for (id, label) in config.id2label {
            let idx = id.parse::<usize>()
                .map_err(|_| EmotionClassifierError::ModelConfig(format!("Non-numeric class id '{}' in config.json", id)))?;
            indexed.push((idx, label));
        }
        indexed.sort_by_key(|(idx, _)| *idx);

        if indexed.is_empty() {
            return Err(EmotionClassifierError::ModelConfig(
                "config.json declares no classes in id2label".to_string()
            ));
        }

        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }

    pub fn is_placeholder_file(file_path: &Path) -> Result<bool, EmotionClassifierError> {
        if !file_path.exists() {
            return Ok(false);
        }

        if file_path.extension().and_then(|s| s.to_str()) == Some("onnx") {
            let metadata = std::fs::metadata(file_path)?;
            return Ok(metadata.len() < 1000);
        }

        let content = std::fs::read_to_string(file_path)?;
        Ok(content.trim() == "placeholder model data")
    }
}
