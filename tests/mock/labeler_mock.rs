use emotion_wordclouds::modules::emotion::{Emotion, SentenceLabel};
use std::collections::HashMap;

/// Seam for tests that need labels without a model on disk.
pub trait LabelSentence {
    fn label_sentence(&mut self, text: &str) -> SentenceLabel;
}

pub struct MockLabeler {
    responses: HashMap<String, SentenceLabel>,
    default_response: SentenceLabel,
}

impl MockLabeler {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: SentenceLabel::Unknown,
        }
    }

    pub fn with_response(mut self, text: &str, label: SentenceLabel) -> Self {
        self.responses.insert(text.to_string(), label);
        self
    }

    pub fn with_default_response(mut self, label: SentenceLabel) -> Self {
        self.default_response = label;
        self
    }

    pub fn joyful() -> Self {
        Self::new().with_default_response(SentenceLabel::Emotion(Emotion::Joy))
    }

    pub fn ambiguous() -> Self {
        Self::new().with_default_response(SentenceLabel::Unknown)
    }

    pub fn label_all(&mut self, sentences: &[String]) -> Vec<SentenceLabel> {
        sentences.iter().map(|s| self.label_sentence(s)).collect()
    }
}

impl Default for MockLabeler {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelSentence for MockLabeler {
    fn label_sentence(&mut self, text: &str) -> SentenceLabel {
        self.responses.get(text).copied().unwrap_or(self.default_response)
    }
}

pub struct TestSentenceData;

impl TestSentenceData {
    pub fn happy_texts() -> Vec<&'static str> {
        vec![
            "I am so happy today",
            "This is wonderful news!",
            "What a beautiful day!",
        ]
    }

    pub fn angry_texts() -> Vec<&'static str> {
        vec![
            "This makes me furious",
            "I can't believe this happened",
            "This is completely unfair",
        ]
    }

    pub fn ambiguous_texts() -> Vec<&'static str> {
        vec![
            "The meeting is at 3 PM",
            "I went to the store",
        ]
    }

    /// Class names in the order the model's config.json declares them.
    pub fn class_names() -> Vec<String> {
        ["anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// One-hot-ish probability row: `prob` at `index`, 0.01 everywhere else.
    pub fn prob_row(index: usize, prob: f32) -> Vec<f32> {
        let mut row = vec![0.01; Self::class_names().len()];
        row[index] = prob;
        row
    }
}
