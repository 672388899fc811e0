//! Owned frame buffers for the color and depth inputs.
//!
//! `ColorImage` stores interleaved RGB8, `DepthImage` stores 16-bit depth
//! values; both validate their dimensions against the backing buffer on
//! construction. Preprocessing only ever resizes color — depth always
//! reaches the matcher at sensor resolution.

use crate::util::FrameError;

#[cfg(feature = "image-io")]
pub mod io;

/// Interleaved RGB8 color image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl ColorImage {
    /// Creates a color image from an interleaved RGB8 buffer.
    ///
    /// The buffer must hold exactly `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Result<Self, FrameError> {
        let needed = buffer_len(width, height, 3)?;
        if data.len() < needed {
            return Err(FrameError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved RGB8 backing buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the RGB triple at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Writes an RGB triple at `(x, y)`, ignoring out-of-bounds coordinates.
    pub(crate) fn put_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Downsamples by 2x with a 2x2 box filter, rounding `(sum + 2) / 4`
    /// per channel. Output dimensions are floored; images narrower or
    /// shorter than 2 pixels are returned unchanged.
    pub fn halve(&self) -> ColorImage {
        if self.width < 2 || self.height < 2 {
            return self.clone();
        }
        let dst_width = self.width / 2;
        let dst_height = self.height / 2;
        let mut data = vec![0u8; dst_width * dst_height * 3];

        for y in 0..dst_height {
            for x in 0..dst_width {
                let row0 = (2 * y) * self.width;
                let row1 = (2 * y + 1) * self.width;
                for c in 0..3 {
                    let a = self.data[(row0 + 2 * x) * 3 + c];
                    let b = self.data[(row0 + 2 * x + 1) * 3 + c];
                    let d = self.data[(row1 + 2 * x) * 3 + c];
                    let e = self.data[(row1 + 2 * x + 1) * 3 + c];
                    let sum = u16::from(a) + u16::from(b) + u16::from(d) + u16::from(e);
                    data[(y * dst_width + x) * 3 + c] = ((sum + 2) / 4) as u8;
                }
            }
        }

        ColorImage {
            data,
            width: dst_width,
            height: dst_height,
        }
    }
}

/// 16-bit depth image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthImage {
    data: Vec<u16>,
    width: usize,
    height: usize,
}

impl DepthImage {
    /// Creates a depth image from a buffer of exactly `width * height` values.
    pub fn new(data: Vec<u16>, width: usize, height: usize) -> Result<Self, FrameError> {
        let needed = buffer_len(width, height, 1)?;
        if data.len() < needed {
            return Err(FrameError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing depth buffer.
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Returns the depth value at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }
}

/// One color+depth pair captured at the same scene instant.
///
/// Borrowed from the caller and read-only to the detector.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub color: &'a ColorImage,
    pub depth: &'a DepthImage,
}

fn buffer_len(width: usize, height: usize, channels: usize) -> Result<usize, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(FrameError::InvalidDimensions { width, height })
}
