pub mod grid;
pub mod grouper;
pub mod renderer;

pub use grid::{compose_grid, GridError};
pub use grouper::{group_sentences, EmotionBuckets};
pub use renderer::{MaskSet, RenderError, WordcloudRenderer, EMPTY_BUCKET_TOKEN};
