pub mod classifier;
pub mod labels;

pub use classifier::{EmotionClassifier, EmotionClassifierError};
pub use labels::{Emotion, SentenceLabel};
