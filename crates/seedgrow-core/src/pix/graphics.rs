//! Graphics rendering functions
//!
//! Drawing primitives used to annotate images:
//! - Filled circles (seed markers)
//! - Filled rectangles (panel backgrounds)
//!
//! Shapes are clipped to the image, so a marker on a seed near the
//! border draws only its visible part.

use super::{PixMut, PixelDepth};
use crate::error::Result;
use crate::pta::Pta;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Seed marker color
    pub const RED: Color = Color::new(255, 0, 0);

    /// Unweighted mean of the three channels
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Value of this color in an image of the given depth.
    ///
    /// 1 bpp images get 1 for colors at least half bright, 0 otherwise.
    fn pixel_for_depth(&self, depth: PixelDepth) -> u32 {
        match depth {
            PixelDepth::Bit1 => u32::from(self.to_gray() >= 128),
            PixelDepth::Bit8 => self.to_gray() as u32,
            PixelDepth::Bit32 => crate::color::compose_rgb(self.r, self.g, self.b),
        }
    }
}

/// Points of a filled disk of the given radius, centered at `(0, 0)`.
///
/// A point belongs to the disk when its squared distance to the center
/// is at most `(radius + 0.5)^2`; radius 0 is the center alone.
pub fn filled_disk_pta(radius: u32) -> Pta {
    let r = radius as i32;
    let limit = (radius as f32 + 0.5).powi(2);
    let side = (2 * radius + 1) as usize;
    let mut pta = Pta::with_capacity(side * side);

    for dy in -r..=r {
        for dx in -r..=r {
            if ((dx * dx + dy * dy) as f32) <= limit {
                pta.push(dx as f32, dy as f32);
            }
        }
    }
    pta
}

impl PixMut {
    /// Set every point of `pta` that falls inside the image to `color`.
    pub fn render_pta_color(&mut self, pta: &Pta, color: Color) -> Result<()> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let val = color.pixel_for_depth(self.depth());

        for (x, y) in pta.iter() {
            let (xi, yi) = (x as i32, y as i32);
            if (0..w).contains(&xi) && (0..h).contains(&yi) {
                self.set_pixel_unchecked(xi as u32, yi as u32, val);
            }
        }
        Ok(())
    }

    /// Render a filled circle centered at `(cx, cy)`.
    pub fn render_filled_circle_color(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u32,
        color: Color,
    ) -> Result<()> {
        let disk = filled_disk_pta(radius).translate(cx as f32, cy as f32);
        self.render_pta_color(&disk, color)
    }

    /// Fill the rectangle with top-left corner (x, y) and size w x h.
    pub fn fill_rect_color(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let val = color.pixel_for_depth(self.depth());
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(w as i32)).clamp(0, self.width() as i32) as u32;
        let y1 = (y.saturating_add(h as i32)).clamp(0, self.height() as i32) as u32;
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_pixel_unchecked(xx, yy, val);
            }
        }
    }
}
