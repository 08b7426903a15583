use image::{imageops, RgbaImage};
use thiserror::Error;

use super::renderer::BACKGROUND;

pub const GRID_ROWS: u32 = 2;
pub const GRID_COLS: u32 = 3;

/// Gap between cells and around the outer edge, in pixels.
pub const CELL_PADDING: u32 = 16;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Expected exactly {expected} images for the grid, got {got}")]
    WrongCount { expected: usize, got: usize },
}

/// Composes exactly six images into a 2×3 grid, row-major.
///
/// Cells are sized to the largest image; smaller images are centered in
/// their cell.
pub fn compose_grid(images: &[RgbaImage]) -> Result<RgbaImage, GridError> {
    let expected = (GRID_ROWS * GRID_COLS) as usize;
    if images.len() != expected {
        return Err(GridError::WrongCount {
            expected,
            got: images.len(),
        });
    }

    let cell_w = images.iter().map(RgbaImage::width).max().unwrap_or(1).max(1);
    let cell_h = images.iter().map(RgbaImage::height).max().unwrap_or(1).max(1);

    let canvas_w = GRID_COLS * cell_w + (GRID_COLS + 1) * CELL_PADDING;
    let canvas_h = GRID_ROWS * cell_h + (GRID_ROWS + 1) * CELL_PADDING;
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, BACKGROUND);

    for (idx, img) in images.iter().enumerate() {
        let col = idx as u32 % GRID_COLS;
        let row = idx as u32 / GRID_COLS;
        let x = CELL_PADDING + col * (cell_w + CELL_PADDING) + (cell_w - img.width()) / 2;
        let y = CELL_PADDING + row * (cell_h + CELL_PADDING) + (cell_h - img.height()) / 2;
        imageops::overlay(&mut canvas, img, x as i64, y as i64);
    }

    Ok(canvas)
}
