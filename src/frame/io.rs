//! Convenience helpers for loading and saving frames via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use std::path::Path;

use crate::frame::{ColorImage, DepthImage};
use crate::util::FrameError;

/// Creates a color image from an RGB8 buffer.
pub fn color_from_rgb_image(img: &image::RgbImage) -> Result<ColorImage, FrameError> {
    ColorImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Loads an image from disk and converts it to interleaved RGB8.
pub fn load_color_image<P: AsRef<Path>>(path: P) -> Result<ColorImage, FrameError> {
    let img = image::open(path).map_err(|err| FrameError::ImageIo {
        reason: err.to_string(),
    })?;
    color_from_rgb_image(&img.to_rgb8())
}

/// Loads a 16-bit depth image from disk.
pub fn load_depth_image<P: AsRef<Path>>(path: P) -> Result<DepthImage, FrameError> {
    let img = image::open(path).map_err(|err| FrameError::ImageIo {
        reason: err.to_string(),
    })?;
    let gray = img.to_luma16();
    DepthImage::new(
        gray.as_raw().clone(),
        gray.width() as usize,
        gray.height() as usize,
    )
}

/// Saves a color image (for example the debug overlay) as PNG.
pub fn save_color_image<P: AsRef<Path>>(path: P, img: &ColorImage) -> Result<(), FrameError> {
    let buf = image::RgbImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.as_slice().to_vec(),
    )
    .ok_or(FrameError::BufferTooSmall {
        needed: img.width() * img.height() * 3,
        got: img.as_slice().len(),
    })?;
    buf.save(path).map_err(|err| FrameError::ImageIo {
        reason: err.to_string(),
    })
}
