//! Pixa - Arrays of Pix images
//!
//! A `Pixa` collects several images so they can be laid out together,
//! e.g. the original / annotated / mask panes of a comparison panel.

use crate::error::{Error, Result};
use crate::pix::{Color, Pix, PixelDepth};

/// Array of Pix images
#[derive(Debug, Clone, Default)]
pub struct Pixa {
    pix: Vec<Pix>,
}

impl Pixa {
    /// Create a new empty Pixa
    pub fn new() -> Self {
        Self { pix: Vec::new() }
    }

    /// Get the number of Pix images
    #[inline]
    pub fn len(&self) -> usize {
        self.pix.len()
    }

    /// Check if the Pixa is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pix.is_empty()
    }

    /// Add a Pix
    pub fn push(&mut self, pix: Pix) {
        self.pix.push(pix);
    }

    /// Iterate over the Pix images
    pub fn iter(&self) -> std::slice::Iter<'_, Pix> {
        self.pix.iter()
    }

    /// Tile all images left-to-right into a single 32 bpp image.
    ///
    /// Every image is converted to 32 bpp and top-aligned. `spacing`
    /// pixels of `background` separate neighboring tiles and surround
    /// the whole row.
    ///
    /// The text of the output is the text of each tile joined by `" | "`
    /// (tiles without text contribute an empty caption).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if the Pixa is empty.
    pub fn display_tiled_in_row(&self, spacing: u32, background: Color) -> Result<Pix> {
        if self.pix.is_empty() {
            return Err(Error::NullInput("pixa has no images to tile"));
        }

        let tiles = self
            .pix
            .iter()
            .map(Pix::convert_to_32)
            .collect::<Result<Vec<_>>>()?;

        let n = tiles.len() as u32;
        let width = tiles.iter().map(Pix::width).sum::<u32>() + spacing * (n + 1);
        let height = tiles.iter().map(Pix::height).max().unwrap_or(1) + 2 * spacing;

        let mut out = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
        out.fill_rect_color(0, 0, width, height, background);

        let mut x0 = spacing;
        for tile in &tiles {
            for y in 0..tile.height() {
                for x in 0..tile.width() {
                    out.set_pixel_unchecked(x0 + x, spacing + y, tile.get_pixel_unchecked(x, y));
                }
            }
            x0 += tile.width() + spacing;
        }

        let captions = self
            .pix
            .iter()
            .map(|p| p.text().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" | ");
        out.set_text(Some(captions));

        Ok(out.into())
    }
}

impl<'a> IntoIterator for &'a Pixa {
    type Item = &'a Pix;
    type IntoIter = std::slice::Iter<'a, Pix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Pix> for Pixa {
    fn from_iter<T: IntoIterator<Item = Pix>>(iter: T) -> Self {
        Self {
            pix: iter.into_iter().collect(),
        }
    }
}
