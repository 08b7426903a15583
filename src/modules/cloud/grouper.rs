use serde::Serialize;
use std::collections::BTreeMap;

use crate::modules::emotion::{Emotion, SentenceLabel};

/// Sentences partitioned into the six emotion buckets.
///
/// Every bucket is always present, possibly empty; within a bucket the
/// sentences keep the order they were inserted in.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionBuckets {
    buckets: BTreeMap<Emotion, Vec<String>>,
}

impl EmotionBuckets {
    pub fn new() -> Self {
        let mut buckets = BTreeMap::new();
        for emotion in Emotion::ALL {
            buckets.insert(emotion, Vec::new());
        }
        Self { buckets }
    }

    pub fn insert(&mut self, emotion: Emotion, sentence: String) {
        self.buckets.entry(emotion).or_default().push(sentence);
    }

    pub fn sentences(&self, emotion: Emotion) -> &[String] {
        self.buckets.get(&emotion).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates the buckets in canonical emotion order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, &[String])> {
        Emotion::ALL.into_iter().map(move |emotion| (emotion, self.sentences(emotion)))
    }

    /// Total number of grouped sentences across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

impl Default for EmotionBuckets {
    fn default() -> Self {
        Self::new()
    }
}

/// Zips the parallel sentence and label sequences into buckets.
///
/// `Unknown` labels are dropped; extra items in the longer sequence are
/// ignored.
pub fn group_sentences(sentences: &[String], labels: &[SentenceLabel]) -> EmotionBuckets {
    let mut buckets = EmotionBuckets::new();
    for (sentence, label) in sentences.iter().zip(labels.iter()) {
        if let Some(emotion) = label.emotion() {
            buckets.insert(emotion, sentence.clone());
        }
    }
    buckets
}
