//! Image export.
//!
//! The backing store is read back bottom-up; everything here hands out
//! top-down rows, which is what image files and viewers expect.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

use crate::coords::PixelSize;

/// Suggested file name for an exported gradient.
pub const EXPORT_FILE_NAME: &str = "mesh-gradient.png";

/// Wraps bottom-up readback rows in a top-down image.
pub fn bottom_up_to_image(size: PixelSize, pixels: Vec<u8>) -> Result<RgbaImage> {
    let len = pixels.len();
    let mut image = RgbaImage::from_raw(size.width, size.height, pixels).with_context(|| {
        format!(
            "readback holds {len} bytes, {}x{} RGBA needs {}",
            size.width,
            size.height,
            size.rgba_len()
        )
    })?;
    image::imageops::flip_vertical_in_place(&mut image);
    Ok(image)
}

/// Encodes `image` as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .context("PNG encoding failed")?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x3 image whose rows are red, green, blue from row 0.
    fn three_rows() -> Vec<u8> {
        vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255]
    }

    #[test]
    fn row_order_reverses_and_pixels_within_rows_stay_put() {
        let bottom_up: Vec<u8> = (0..2 * 4 * 4).map(|v| v as u8).collect();
        let top_down = bottom_up_to_image(PixelSize::new(2, 4), bottom_up.clone())
            .unwrap()
            .into_raw();

        for (y, row) in top_down.chunks_exact(8).enumerate() {
            let src = (3 - y) * 8;
            assert_eq!(row, &bottom_up[src..src + 8]);
        }
    }

    #[test]
    fn bottom_up_rows_become_top_down() {
        let img = bottom_up_to_image(PixelSize::new(1, 3), three_rows()).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(0, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn short_buffer_is_an_error() {
        assert!(bottom_up_to_image(PixelSize::new(2, 2), vec![0; 4]).is_err());
    }

    #[test]
    fn png_decodes_to_same_pixels() {
        let img = bottom_up_to_image(PixelSize::new(1, 3), three_rows()).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let back = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(back, img);
    }
}
