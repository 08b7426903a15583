use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Hard cap on sentence length, matching the transformer's input size.
pub const MAX_SENTENCE_CHARS: usize = 512;

#[derive(Error, Debug)]
pub enum SentenceLoadError {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read export file: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse export file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("No sentences were found for friend {friend} at {path}")]
    NoSentences { friend: String, path: String },
}

/// One exported conversation file: a list of messages, of which only the
/// ones carrying a textual `content` field are usable.
#[derive(Debug, Deserialize)]
struct MessageArchive {
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Loads up to `limit` sentences for the given friend.
///
/// Scans every `{root}/messages/inbox/{friend}_*/*.json` export file, splits
/// message bodies on Unicode sentence boundaries, truncates each sentence to
/// [`MAX_SENTENCE_CHARS`], shuffles the whole collection with `rng` and caps
/// it at `limit`. Zero extractable sentences is an error.
pub fn load_sentences(
    root: &Path,
    friend: &str,
    limit: usize,
    rng: &mut impl Rng,
) -> Result<Vec<String>, SentenceLoadError> {
    let pattern = format!("{}/messages/inbox/{}_*/*.json", root.display(), friend);

    let mut sentences = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let raw = std::fs::read_to_string(&path)?;
        let archive: MessageArchive = serde_json::from_str(&raw)
            .map_err(|source| SentenceLoadError::Json {
                path: path.display().to_string(),
                source,
            })?;

        for message in &archive.messages {
            let content = match &message.content {
                Some(content) => content,
                None => continue,
            };
            for sentence in content.unicode_sentences() {
                let sentence = sentence.trim();
                if sentence.is_empty() {
                    continue;
                }
                sentences.push(truncate_chars(sentence, MAX_SENTENCE_CHARS).to_string());
            }
        }
    }

    if sentences.is_empty() {
        return Err(SentenceLoadError::NoSentences {
            friend: friend.to_string(),
            path: root.display().to_string(),
        });
    }

    sentences.shuffle(rng);
    sentences.truncate(limit);

    Ok(sentences)
}

/// Truncates to at most `max_chars` characters, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn test_truncate_chars_short_input() {
        assert_eq!(truncate_chars("hello", 512), "hello");
        assert_eq!(truncate_chars("", 512), "");
    }

    #[test]
    fn test_truncate_chars_long_input() {
        let long = "a".repeat(600);
        assert_eq!(truncate_chars(&long, 512).chars().count(), 512);
    }

    #[test]
    fn test_truncate_chars_multibyte_boundary() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 4), "héll");
    }
}
