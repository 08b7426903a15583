pub mod loader;

pub use loader::{load_sentences, SentenceLoadError, MAX_SENTENCE_CHARS};
