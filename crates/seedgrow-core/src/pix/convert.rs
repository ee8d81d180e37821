//! Depth conversion
//!
//! Conversions between the three supported depths:
//!
//! - 32 bpp RGB -> 8 bpp luminance (intensity grid for region growing)
//! - 1 bpp mask -> 8 bpp or 32 bpp (for saving and display)
//! - 8 bpp gray -> 32 bpp RGB (for drawing colored overlays)

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Red weight of the luminance conversion (ITU-R BT.709).
pub const LUMINANCE_RED_WEIGHT: f32 = 0.2125;
/// Green weight of the luminance conversion (ITU-R BT.709).
pub const LUMINANCE_GREEN_WEIGHT: f32 = 0.7154;
/// Blue weight of the luminance conversion (ITU-R BT.709).
pub const LUMINANCE_BLUE_WEIGHT: f32 = 0.0721;

impl Pix {
    /// Convert to an 8 bpp intensity image.
    ///
    /// - 1 bpp: 0 -> 0, 1 -> 255
    /// - 8 bpp: returns a shared clone
    /// - 32 bpp: luminance via [`Pix::convert_rgb_to_luminance`]
    pub fn convert_to_8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit1 => self.convert_1_to_8(0, 255),
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit32 => self.convert_rgb_to_luminance(),
        }
    }

    /// Convert to a 32 bpp RGB image.
    ///
    /// - 1 bpp: 0 -> black, 1 -> white
    /// - 8 bpp: the gray value is replicated into R, G and B
    /// - 32 bpp: returns a shared clone
    pub fn convert_to_32(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit1 => self.convert_1_to_32(
                color::compose_rgb(0, 0, 0),
                color::compose_rgb(255, 255, 255),
            ),
            PixelDepth::Bit8 => {
                let (w, h) = (self.width(), self.height());
                let mut result = Pix::new(w, h, PixelDepth::Bit32)?.to_mut();
                for y in 0..h {
                    for x in 0..w {
                        let gray = self.get_pixel_unchecked(x, y) as u8;
                        result.set_pixel_unchecked(x, y, color::compose_rgb(gray, gray, gray));
                    }
                }
                result.set_text(self.text().map(str::to_string));
                Ok(result.into())
            }
            PixelDepth::Bit32 => Ok(self.clone()),
        }
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale using BT.709 luminance weights.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        self.convert_rgb_to_gray(0.0, 0.0, 0.0)
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale with custom weights.
    ///
    /// If all weights are 0.0, the BT.709 luminance weights are used.
    /// Weights are normalized to sum to 1.0 if they don't already.
    /// Results are rounded to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    /// Returns [`Error::InvalidParameter`] if any weight is negative.
    pub fn convert_rgb_to_gray(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter("weights must all be >= 0.0".into()));
        }

        let (rwt, gwt, bwt) = if rwt == 0.0 && gwt == 0.0 && bwt == 0.0 {
            (
                LUMINANCE_RED_WEIGHT,
                LUMINANCE_GREEN_WEIGHT,
                LUMINANCE_BLUE_WEIGHT,
            )
        } else {
            let sum = rwt + gwt + bwt;
            if (sum - 1.0).abs() > 0.0001 {
                (rwt / sum, gwt / sum, bwt / sum)
            } else {
                (rwt, gwt, bwt)
            }
        };

        let w = self.width();
        let h = self.height();
        let mut result = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let r = color::red(pixel) as f32;
                let g = color::green(pixel) as f32;
                let b = color::blue(pixel) as f32;
                let gray = (rwt * r + gwt * g + bwt * b + 0.5) as u32;
                result.set_pixel_unchecked(x, y, gray.min(255));
            }
        }

        Ok(result.into())
    }

    /// Convert a 1 bpp image to 8 bpp, mapping 0 -> `val0` and 1 -> `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn convert_1_to_8(&self, val0: u8, val1: u8) -> Result<Pix> {
        self.expand_binary(PixelDepth::Bit8, val0 as u32, val1 as u32)
    }

    /// Convert a 1 bpp image to 32 bpp, mapping 0 -> `val0` and 1 -> `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn convert_1_to_32(&self, val0: u32, val1: u32) -> Result<Pix> {
        self.expand_binary(PixelDepth::Bit32, val0, val1)
    }

    fn expand_binary(&self, depth: PixelDepth, val0: u32, val1: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let (w, h) = (self.width(), self.height());
        let mut result = Pix::new(w, h, depth)?.to_mut();
        for y in 0..h {
            for x in 0..w {
                let val = if self.get_pixel_unchecked(x, y) == 0 {
                    val0
                } else {
                    val1
                };
                result.set_pixel_unchecked(x, y, val);
            }
        }
        result.set_text(self.text().map(str::to_string));
        Ok(result.into())
    }
}
