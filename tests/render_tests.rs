use emotion_wordclouds::config::RenderConfig;
use emotion_wordclouds::modules::cloud::{
    compose_grid, group_sentences, GridError, MaskSet, WordcloudRenderer,
};
use emotion_wordclouds::modules::cloud::grid::{CELL_PADDING, GRID_COLS, GRID_ROWS};
use emotion_wordclouds::modules::emotion::{Emotion, SentenceLabel};
use image::RgbaImage;
use std::path::Path;

fn small_render_config() -> RenderConfig {
    RenderConfig {
        max_words: 10,
        width: 200,
        height: 150,
        ..RenderConfig::default()
    }
}

#[test]
fn test_empty_bucket_renders_a_placeholder_image() {
    let renderer = WordcloudRenderer::new(small_render_config());

    let image = renderer.render_bucket(&[], None);
    assert_eq!(image.dimensions(), (200, 150));
}

#[test]
fn test_all_buckets_render_even_when_empty() {
    let renderer = WordcloudRenderer::new(small_render_config());
    let buckets = group_sentences(&[], &[]);

    let clouds = renderer.render_all(&buckets, &MaskSet::none()).unwrap();
    assert_eq!(clouds.len(), 6);
    for cloud in &clouds {
        assert_eq!(cloud.dimensions(), (200, 150));
    }
}

#[test]
fn test_populated_bucket_renders() {
    let renderer = WordcloudRenderer::new(small_render_config());
    let sentences = vec![
        "sunshine sunshine holiday beach holiday".to_string(),
        "music dancing laughter friends music".to_string(),
    ];

    let image = renderer.render_bucket(&sentences, None);
    assert_eq!(image.dimensions(), (200, 150));
}

#[test]
fn test_render_all_follows_canonical_order() {
    let renderer = WordcloudRenderer::new(small_render_config());

    let sentences = vec!["celebration fireworks confetti".to_string()];
    let labels = vec![SentenceLabel::Emotion(Emotion::Joy)];
    let buckets = group_sentences(&sentences, &labels);

    let clouds = renderer.render_all(&buckets, &MaskSet::none()).unwrap();
    assert_eq!(clouds.len(), Emotion::ALL.len());
}

#[test]
fn test_custom_stopwords_still_render() {
    let renderer = WordcloudRenderer::new(small_render_config())
        .with_stopwords(vec!["sunshine".to_string()]);

    let image = renderer.render_bucket(&["sunshine beach waves".to_string()], None);
    assert_eq!(image.dimensions(), (200, 150));
}

#[test]
fn test_mask_set_discover_without_directory() {
    let masks = MaskSet::discover(Path::new("/nonexistent/masks")).unwrap();
    for emotion in Emotion::ALL {
        assert!(masks.get(emotion).is_none());
    }
}

#[test]
fn test_mask_set_load_requires_every_emotion() {
    let tmp = tempfile::tempdir().unwrap();

    let result = MaskSet::load(tmp.path());
    assert!(result.is_err());
}

#[test]
fn test_grid_composes_two_by_three() {
    let images: Vec<RgbaImage> = (0..6).map(|_| RgbaImage::new(100, 80)).collect();

    let grid = compose_grid(&images).unwrap();
    let expected_w = GRID_COLS * 100 + (GRID_COLS + 1) * CELL_PADDING;
    let expected_h = GRID_ROWS * 80 + (GRID_ROWS + 1) * CELL_PADDING;
    assert_eq!(grid.dimensions(), (expected_w, expected_h));
}

#[test]
fn test_grid_cells_fit_the_largest_image() {
    let mut images: Vec<RgbaImage> = (0..5).map(|_| RgbaImage::new(50, 40)).collect();
    images.push(RgbaImage::new(120, 90));

    let grid = compose_grid(&images).unwrap();
    let expected_w = GRID_COLS * 120 + (GRID_COLS + 1) * CELL_PADDING;
    let expected_h = GRID_ROWS * 90 + (GRID_ROWS + 1) * CELL_PADDING;
    assert_eq!(grid.dimensions(), (expected_w, expected_h));
}

#[test]
fn test_grid_rejects_wrong_image_count() {
    let images: Vec<RgbaImage> = (0..5).map(|_| RgbaImage::new(100, 80)).collect();

    match compose_grid(&images) {
        Err(GridError::WrongCount { expected, got }) => {
            assert_eq!(expected, 6);
            assert_eq!(got, 5);
        }
        Ok(_) => panic!("Expected WrongCount error"),
    }
}

#[test]
fn test_repeated_rendering_is_deterministic() {
    let renderer = WordcloudRenderer::new(small_render_config());
    let sentences = vec!["sunshine holiday beach music dancing".to_string()];

    let first = renderer.render_bucket(&sentences, None);
    let second = renderer.render_bucket(&sentences, None);

    assert_eq!(first.dimensions(), second.dimensions());
    assert_eq!(first.as_raw(), second.as_raw());
}
