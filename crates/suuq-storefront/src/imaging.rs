//! # Image Downscaling
//!
//! Decodes an uploaded image, shrinks it so the longest side fits
//! `max_dimension` and re-encodes it as JPEG.
//!
//! ```text
//!   1600 x 1200 PNG ──► decode ──► resize (800 x 600) ──► RGB ──► JPEG q70
//!    640 x  480 PNG ──► decode ──────────────────────────► RGB ──► JPEG q70
//! ```
//!
//! This is CPU-bound; async callers run it under `spawn_blocking`.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

use suuq_core::validation::ValidationResult;
use suuq_core::ValidationError;

use crate::ports::EncodedImage;

/// Downscales `bytes` and returns them as a JPEG ready for upload.
///
/// Images already within bounds keep their size; aspect ratio is always
/// preserved. Undecodable input is a validation error on `file_name`.
pub fn downscale_to_jpeg(
    file_name: &str,
    bytes: &[u8],
    max_dimension: u32,
    quality: u8,
) -> ValidationResult<EncodedImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ValidationError::invalid_format(file_name, e.to_string()))?;

    let (width, height) = decoded.dimensions();
    let resized = if width.max(height) > max_dimension {
        decoded.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        decoded
    };

    let rgb = resized.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&rgb)
        .map_err(|e| ValidationError::invalid_format(file_name, e.to_string()))?;

    Ok(EncodedImage {
        file_name: jpeg_file_name(file_name),
        content_type: "image/jpeg".to_string(),
        bytes: out.into_inner(),
    })
}

/// `photo.png` → `photo.jpg`.
fn jpeg_file_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("{}.jpg", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let encoded = downscale_to_jpeg("wide.png", &png(1600, 1200), 800, 70).unwrap();

        assert_eq!(&encoded.bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(encoded.content_type, "image/jpeg");
        assert_eq!(encoded.file_name, "wide.jpg");

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (800, 600));
    }

    #[test]
    fn test_portrait_keeps_aspect() {
        let encoded = downscale_to_jpeg("tall.png", &png(500, 1000), 800, 70).unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (400, 800));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let encoded = downscale_to_jpeg("small.png", &png(320, 240), 800, 70).unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (320, 240));
    }

    #[test]
    fn test_garbage_is_invalid_format() {
        let err = downscale_to_jpeg("broken.png", b"not an image", 800, 70).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "broken.png"));
    }

    #[test]
    fn test_jpeg_file_name() {
        assert_eq!(jpeg_file_name("a.png"), "a.jpg");
        assert_eq!(jpeg_file_name("archive.tar.gz"), "archive.tar.jpg");
        assert_eq!(jpeg_file_name("noext"), "noext.jpg");
        assert_eq!(jpeg_file_name(".hidden"), ".hidden.jpg");
    }
}
