//! Seeded region growing
//!
//! Grows a region outward from a single seed pixel of an 8 bpp image.
//! A neighbor joins the region when its intensity differs from the
//! **seed's** intensity by at most the threshold; the reference value is
//! never updated while the region grows.
//!
//! Each pixel is marked visited the first time it is examined and is
//! never examined again, whether or not it joined the region. The work
//! list is an explicit stack, so the traversal uses no recursion and
//! finishes after at most `width * height` pushes.

use crate::connectivity::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use crate::stack::GrowStack;
use seedgrow_core::pix::get_data_byte;
use seedgrow_core::{Pix, PixelDepth};
use std::fmt;

/// Threshold used when none is given
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Seed position, as `(row, col)`.
///
/// Components are signed so that positions left of or above the image
/// can be expressed; they are rejected by the growers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    pub row: i64,
    pub col: i64,
}

impl Seed {
    /// Create a seed at `(row, col)`
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Pixel position `(x, y)` of the seed, if it lies inside a
    /// `width x height` image.
    pub fn position(self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x = u32::try_from(self.col).ok().filter(|&x| x < width)?;
        let y = u32::try_from(self.row).ok().filter(|&y| y < height)?;
        Some((x, y))
    }
}

impl From<(i64, i64)> for Seed {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Options for region growing
#[derive(Debug, Clone)]
pub struct RegionGrowOptions {
    /// Maximum absolute difference from the seed intensity
    pub threshold: u32,
    /// Neighborhood used to extend the region
    pub connectivity: ConnectivityType,
}

impl Default for RegionGrowOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            connectivity: ConnectivityType::EightWay,
        }
    }
}

impl RegionGrowOptions {
    /// Create 8-way options with the given threshold
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Counters collected while growing a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowStats {
    /// Pixels examined (including the seed)
    pub visited: usize,
    /// Pixels that joined the region (including the seed)
    pub accepted: usize,
    /// Entries pushed onto the work list
    pub pushes: usize,
}

/// Mask and counters produced by [`region_grow_with_options`]
#[derive(Debug, Clone)]
pub struct RegionGrowResult {
    /// 1 bpp mask; 1 marks region pixels
    pub mask: Pix,
    /// Traversal counters
    pub stats: GrowStats,
}

/// Grow an 8-connected region from `seed`.
///
/// Returns a 1 bpp mask of the same size as `pix` where ON pixels form
/// the region.
///
/// # Arguments
///
/// * `pix` - 8 bpp intensity image
/// * `seed` - Starting pixel, as `(row, col)`
/// * `threshold` - Maximum absolute difference from the seed intensity
///
/// # Errors
///
/// - [`RegionError::UnsupportedDepth`] if `pix` is not 8 bpp
/// - [`RegionError::OutOfBounds`] if the seed is outside the image
pub fn region_grow(pix: &Pix, seed: Seed, threshold: u32) -> RegionResult<Pix> {
    let result = region_grow_with_options(pix, seed, &RegionGrowOptions::new(threshold))?;
    Ok(result.mask)
}

/// Grow a region from `seed` with explicit options.
///
/// See [`region_grow`] for the growth rule and errors.
pub fn region_grow_with_options(
    pix: &Pix,
    seed: Seed,
    options: &RegionGrowOptions,
) -> RegionResult<RegionGrowResult> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: pix.depth().bits(),
        });
    }

    let width = pix.width();
    let height = pix.height();
    if width == 0 || height == 0 {
        return Err(RegionError::EmptyGrid);
    }

    let (seed_x, seed_y) = seed
        .position(width, height)
        .ok_or(RegionError::OutOfBounds {
            row: seed.row,
            col: seed.col,
            height,
            width,
        })?;

    let w = width as usize;
    let seed_value = get_data_byte(pix.row_data(seed_y), seed_x) as i32;
    let mut visited = vec![false; w * height as usize];
    let mut mask = Pix::new(width, height, PixelDepth::Bit1)?.to_mut();
    let mut stack = GrowStack::with_capacity(w);
    let mut stats = GrowStats::default();

    visited[seed_y as usize * w + seed_x as usize] = true;
    mask.set_pixel_unchecked(seed_x, seed_y, 1);
    stack.push(seed_x, seed_y);
    stats.visited += 1;
    stats.accepted += 1;

    let offsets = options.connectivity.offsets();
    while let Some((x, y)) = stack.pop() {
        for &(drow, dcol) in offsets {
            let nx = x as i64 + dcol;
            let ny = y as i64 + drow;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);

            let idx = ny as usize * w + nx as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            stats.visited += 1;

            let value = get_data_byte(pix.row_data(ny), nx) as i32;
            if value.abs_diff(seed_value) <= options.threshold {
                mask.set_pixel_unchecked(nx, ny, 1);
                stack.push(nx, ny);
                stats.accepted += 1;
            }
        }
    }
    stats.pushes = stack.pushes();

    Ok(RegionGrowResult {
        mask: mask.into(),
        stats,
    })
}
