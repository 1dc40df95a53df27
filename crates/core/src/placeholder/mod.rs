//! Placeholder image generator.
//!
//! Synthesizes solid-colour square PNGs labelled `MEME <n>`, named like
//! fetched assets (`meme_001.png`, ...). A local stand-in for the fetch loop
//! when no network is wanted; it never touches the catalog.

mod glyphs;

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::config::PlaceholderConfig;
use crate::fetcher::slot_file_name;

/// Background colours placeholders are drawn from.
pub const PALETTE: [[u8; 3]; 6] = [
    [255, 100, 100],
    [100, 255, 100],
    [100, 100, 255],
    [255, 255, 100],
    [255, 100, 255],
    [100, 255, 255],
];

const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Fraction of the image width the label may span.
const LABEL_SPAN: f64 = 0.6;

/// Log progress every this many images.
const PROGRESS_EVERY: u32 = 50;

/// Errors that can occur while generating placeholders.
#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Render one placeholder with the given background.
pub fn render(index: u32, size: u32, background: [u8; 3]) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, Rgb(background));
    let label = format!("MEME {}", index);

    let width_px = glyphs::text_width(&label);
    let scale = ((size as f64 * LABEL_SPAN) / width_px as f64).floor().max(1.0) as u32;
    let text_w = width_px * scale;
    let text_h = glyphs::GLYPH_HEIGHT * scale;
    let origin_x = size.saturating_sub(text_w) / 2;
    let origin_y = size.saturating_sub(text_h) / 2;

    let advance = glyphs::GLYPH_WIDTH + glyphs::GLYPH_SPACING;
    for (i, c) in label.chars().enumerate() {
        let glyph_x = origin_x + i as u32 * advance * scale;
        for gy in 0..glyphs::GLYPH_HEIGHT {
            for gx in 0..glyphs::GLYPH_WIDTH {
                if !glyphs::is_set(c, gx, gy) {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = glyph_x + gx * scale + dx;
                        let y = origin_y + gy * scale + dy;
                        if x < size && y < size {
                            img.put_pixel(x, y, TEXT_COLOR);
                        }
                    }
                }
            }
        }
    }

    img
}

/// Generate `config.count` placeholders into `out_dir`, returning their paths.
pub fn generate(config: &PlaceholderConfig, out_dir: &Path) -> Result<Vec<PathBuf>, PlaceholderError> {
    generate_with_rng(config, out_dir, &mut rand::thread_rng())
}

/// Like [`generate`] with a caller-provided RNG for the background colours.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &PlaceholderConfig,
    out_dir: &Path,
    rng: &mut R,
) -> Result<Vec<PathBuf>, PlaceholderError> {
    std::fs::create_dir_all(out_dir)?;
    info!(
        count = config.count,
        dir = %out_dir.display(),
        "Generating placeholder memes"
    );

    let mut written = Vec::with_capacity(config.count as usize);
    for index in 1..=config.count {
        let background = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
        let path = out_dir.join(slot_file_name(index, "png"));
        render(index, config.size, background).save(&path)?;
        written.push(path);

        if index % PROGRESS_EVERY == 0 {
            info!("Created {}/{}", index, config.count);
        }
    }

    info!(count = written.len(), "Placeholders generated");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[test]
    fn test_render_background_and_text() {
        let img = render(7, 200, PALETTE[2]);
        assert_eq!(img.dimensions(), (200, 200));
        assert_eq!(*img.get_pixel(0, 0), Rgb(PALETTE[2]));
        assert!(img.pixels().any(|p| *p == TEXT_COLOR));
    }

    #[test]
    fn test_render_text_is_centered() {
        let img = render(10, 300, PALETTE[0]);
        let dark: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == TEXT_COLOR)
            .map(|(x, y, _)| (x, y))
            .collect();
        let min_x = dark.iter().map(|p| p.0).min().unwrap();
        let max_x = dark.iter().map(|p| p.0).max().unwrap();
        let min_y = dark.iter().map(|p| p.1).min().unwrap();
        let max_y = dark.iter().map(|p| p.1).max().unwrap();
        // 'M' and '0' both reach their outer columns, so ink bounds equal the text box.
        assert!((min_x as i64 - (299 - max_x) as i64).abs() <= 1);
        assert!((min_y as i64 - (299 - max_y) as i64).abs() <= 1);
    }

    #[test]
    fn test_render_tiny_image_does_not_panic() {
        let img = render(123456, 8, PALETTE[1]);
        assert_eq!(img.dimensions(), (8, 8));
    }

    #[test]
    fn test_generate_writes_numbered_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("memes");
        let config = PlaceholderConfig { count: 3, size: 64 };
        let mut rng = StdRng::seed_from_u64(7);

        let written = generate_with_rng(&config, &out, &mut rng).unwrap();
        assert_eq!(written.len(), 3);
        for name in ["meme_001.png", "meme_002.png", "meme_003.png"] {
            let img = image::open(out.join(name)).unwrap();
            assert_eq!(img.width(), 64);
        }
        assert!(!temp.path().join("memes.json").exists());
    }
}
