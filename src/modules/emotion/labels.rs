use serde::{Deserialize, Serialize};
use std::fmt;

/// The six Ekman emotion buckets the word clouds are built from.
///
/// The classifier itself knows one more class (`neutral`); anything outside
/// this set is collapsed into [`SentenceLabel::Unknown`] at labeling time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
    Surprise,
}

impl Emotion {
    /// Canonical ordering, used for bucket iteration and the output grid.
    pub const ALL: [Emotion; 6] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
        }
    }

    /// Maps a model class name to an emotion, `None` for anything outside
    /// the six buckets (`neutral` included).
    pub fn from_model_label(label: &str) -> Option<Emotion> {
        match label {
            "anger" => Some(Emotion::Anger),
            "disgust" => Some(Emotion::Disgust),
            "fear" => Some(Emotion::Fear),
            "joy" => Some(Emotion::Joy),
            "sadness" => Some(Emotion::Sadness),
            "surprise" => Some(Emotion::Surprise),
            _ => None,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label assigned to one sentence: a single emotion, or the sentinel used
/// when zero or more than one class clears the decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentenceLabel {
    Emotion(Emotion),
    Unknown,
}

impl SentenceLabel {
    pub fn emotion(&self) -> Option<Emotion> {
        match self {
            SentenceLabel::Emotion(emotion) => Some(*emotion),
            SentenceLabel::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SentenceLabel::Unknown)
    }
}

impl From<Option<Emotion>> for SentenceLabel {
    fn from(emotion: Option<Emotion>) -> Self {
        match emotion {
            Some(emotion) => SentenceLabel::Emotion(emotion),
            None => SentenceLabel::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Emotion, SentenceLabel};

    #[test]
    fn test_model_label_round_trip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_model_label(emotion.as_str()), Some(emotion));
        }
    }

    #[test]
    fn test_labels_outside_the_buckets() {
        assert_eq!(Emotion::from_model_label("neutral"), None);
        assert_eq!(Emotion::from_model_label("N/A"), None);
        assert_eq!(Emotion::from_model_label(""), None);
        assert_eq!(Emotion::from_model_label("Joy"), None);
    }

    #[test]
    fn test_sentence_label_accessors() {
        let joy = SentenceLabel::Emotion(Emotion::Joy);
        assert_eq!(joy.emotion(), Some(Emotion::Joy));
        assert!(!joy.is_unknown());

        let unknown = SentenceLabel::Unknown;
        assert_eq!(unknown.emotion(), None);
        assert!(unknown.is_unknown());

        assert_eq!(SentenceLabel::from(Some(Emotion::Fear)), SentenceLabel::Emotion(Emotion::Fear));
        assert_eq!(SentenceLabel::from(None), SentenceLabel::Unknown);
    }

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = Emotion::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(names, vec!["anger", "disgust", "fear", "joy", "sadness", "surprise"]);
    }
}
