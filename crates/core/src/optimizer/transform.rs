//! Pure image transforms: bounded resize, square thumbnail, WebP encoding.

use std::ops::Deref;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use webp::Encoder;

use super::OptimizeError;

/// Scale `img` so its longest side is at most `max_dimension`.
///
/// Smaller images are only converted to RGB.
pub fn bounded_resize(img: &DynamicImage, max_dimension: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let longest = w.max(h);
    if longest <= max_dimension {
        return DynamicImage::ImageRgb8(img.to_rgb8());
    }

    let scale = max_dimension as f64 / longest as f64;
    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);
    let resized = img.resize_exact(new_w, new_h, FilterType::Lanczos3);
    DynamicImage::ImageRgb8(resized.to_rgb8())
}

/// Center-crop `img` to a square and scale it to `size` x `size`.
pub fn square_thumbnail(img: &DynamicImage, size: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let side = w.min(h);
    let left = (w - side) / 2;
    let top = (h - side) / 2;

    let thumb = img
        .crop_imm(left, top, side, side)
        .resize_exact(size, size, FilterType::Lanczos3);
    DynamicImage::ImageRgb8(thumb.to_rgb8())
}

/// Encode an RGB image as lossy WebP.
pub fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, OptimizeError> {
    let encoder =
        Encoder::from_image(img).map_err(|reason| OptimizeError::Encode(reason.to_string()))?;
    // WebPMemory is !Send, copy it out.
    Ok(encoder.encode(quality as f32).deref().to_owned())
}
