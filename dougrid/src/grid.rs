use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{imageops, RgbaImage};

use crate::error::Result;

/// Effective (columns, rows) for a grid of `image_count` tiles: columns are
/// clamped down to the image count, rows fill up row-major.
fn grid_dimensions(image_count: usize, columns: u32) -> (u32, u32) {
    let columns = columns.min(image_count as u32);
    let rows = (image_count as u32).div_ceil(columns);
    (columns, rows)
}

/// Compose the images into one grid raster at `output_path`, row-major in
/// input order. Every tile is resized to exactly `tile_width` ×
/// `tile_height` (aspect ratio not preserved); unused cells stay
/// transparent. The output format follows the path's extension.
pub fn compose_grid(
    image_paths: &[PathBuf],
    tile_width: u32,
    tile_height: u32,
    columns: u32,
    output_path: &Path,
) -> Result<()> {
    let (columns, rows) = grid_dimensions(image_paths.len(), columns);
    let mut canvas = RgbaImage::new(tile_width * columns, tile_height * rows);

    for (index, image_path) in image_paths.iter().enumerate() {
        let tile = image::open(image_path)?.resize_exact(tile_width, tile_height, FilterType::Lanczos3);
        let index = index as u32;
        let x = tile_width * (index % columns);
        let y = tile_height * (index / columns);
        imageops::replace(&mut canvas, &tile.to_rgba8(), x as i64, y as i64);
    }

    canvas.save(output_path)?;
    Ok(())
}
