//! Image comparison operations
//!
//! - Pixel equality checks
//! - Pixel difference counting
//! - Foreground counting and subset tests for 1 bpp masks

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum pixel difference value
    pub max_diff: u32,
}

impl Pix {
    fn check_same_shape(&self, other: &Pix) -> Result<()> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        if self.depth() != other.depth() {
            return Err(Error::UnsupportedDepth(other.depth().bits()));
        }
        Ok(())
    }

    /// Count the number of pixels that differ between two images.
    ///
    /// For 32 bpp images the difference of a pixel is the largest
    /// per-channel difference.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        self.check_same_shape(other)?;
        let (w, h) = (self.width(), self.height());
        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        for y in 0..h {
            for x in 0..w {
                let a = self.get_pixel_unchecked(x, y);
                let b = other.get_pixel_unchecked(x, y);
                if a == b {
                    continue;
                }
                n_diff += 1;
                let diff = match self.depth() {
                    PixelDepth::Bit32 => {
                        let (ar, ag, ab) = crate::color::extract_rgb(a);
                        let (br, bg, bb) = crate::color::extract_rgb(b);
                        ar.abs_diff(br).max(ag.abs_diff(bg)).max(ab.abs_diff(bb)) as u32
                    }
                    _ => a.abs_diff(b),
                };
                max_diff = max_diff.max(diff);
            }
        }
        let total = (w as u64) * (h as u64);
        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total as f64,
            max_diff,
        })
    }

    /// Check if two images are exactly equal.
    ///
    /// Images with different sizes or depths are never equal.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }

    /// Count the ON pixels of a 1 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn count_pixels(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let full_words = (self.width() / 32) as usize;
        let rem = self.width() % 32;
        let tail_mask = if rem == 0 { 0 } else { !0u32 << (32 - rem) };
        let mut count = 0u64;
        for y in 0..self.height() {
            let line = self.row_data(y);
            count += line[..full_words]
                .iter()
                .map(|w| w.count_ones() as u64)
                .sum::<u64>();
            if rem != 0 {
                count += (line[full_words] & tail_mask).count_ones() as u64;
            }
        }
        Ok(count)
    }

    /// Check whether every ON pixel of this 1 bpp image is also ON in `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if either image is not 1 bpp or the sizes differ.
    pub fn is_subset_of(&self, other: &Pix) -> Result<bool> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.check_same_shape(other)?;
        Ok((0..self.height()).all(|y| {
            (0..self.width()).all(|x| {
                self.get_pixel_unchecked(x, y) == 0 || other.get_pixel_unchecked(x, y) != 0
            })
        }))
    }
}
