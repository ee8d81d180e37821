//! Side-by-side comparison panel
//!
//! The panel shows the source image, the source with the seed marked,
//! and the grown region, left to right. Pane captions are attached as
//! the image text and end up in the PNG `tEXt` chunk.

use crate::error::AppResult;
use seedgrow_core::{Color, Pix, Pixa};
use seedgrow_region::Seed;

/// Gap between panes and around the panel, in pixels
pub const PANEL_SPACING: u32 = 10;

/// Captions of the three panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLabels {
    pub original: String,
    pub seed: String,
    pub region: String,
}

impl PanelLabels {
    /// Standard captions for one seed job
    pub fn for_seed(seed: Seed, threshold: u32) -> Self {
        Self {
            original: "Imagem Original".to_string(),
            seed: format!("Semente em ({},{})", seed.row, seed.col),
            region: format!("Região Crescida (Limiar: {})", threshold),
        }
    }
}

fn with_caption(pix: &Pix, caption: &str) -> Pix {
    let mut pane = pix.to_mut();
    pane.set_text(Some(caption.to_string()));
    pane.into()
}

/// Tile `original`, `annotated` and `mask` into one 32 bpp panel.
///
/// Panes of any supported depth are accepted; the mask is shown white
/// on black.
pub fn render_comparison_panel(
    original: &Pix,
    annotated: &Pix,
    mask: &Pix,
    labels: &PanelLabels,
) -> AppResult<Pix> {
    let panes: Pixa = [
        with_caption(original, &labels.original),
        with_caption(annotated, &labels.seed),
        with_caption(mask, &labels.region),
    ]
    .into_iter()
    .collect();

    Ok(panes.display_tiled_in_row(PANEL_SPACING, Color::WHITE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedgrow_core::{PixelDepth, color};

    #[test]
    fn test_labels_for_seed() {
        let labels = PanelLabels::for_seed(Seed::new(200, 100), 20);
        assert_eq!(labels.original, "Imagem Original");
        assert_eq!(labels.seed, "Semente em (200,100)");
        assert_eq!(labels.region, "Região Crescida (Limiar: 20)");
    }

    #[test]
    fn test_panel_layout() {
        let original = Pix::from_gray_samples(4, 3, &[60; 12]).unwrap();
        let annotated = original.convert_to_32().unwrap();
        let mut mask = Pix::new(4, 3, PixelDepth::Bit1).unwrap().to_mut();
        mask.set_pixel_unchecked(0, 0, 1);
        let mask: Pix = mask.into();

        let labels = PanelLabels::for_seed(Seed::new(0, 0), 5);
        let panel = render_comparison_panel(&original, &annotated, &mask, &labels).unwrap();

        assert_eq!(panel.depth(), PixelDepth::Bit32);
        assert_eq!(panel.width(), 3 * 4 + 4 * PANEL_SPACING);
        assert_eq!(panel.height(), 3 + 2 * PANEL_SPACING);

        // Background, first pane, and the mask pane's single ON pixel
        assert_eq!(
            panel.get_pixel(0, 0),
            Some(color::compose_rgb(255, 255, 255))
        );
        assert_eq!(
            panel.get_pixel(PANEL_SPACING, PANEL_SPACING),
            Some(color::compose_rgb(60, 60, 60))
        );
        let mask_x = 3 * PANEL_SPACING + 2 * 4;
        assert_eq!(
            panel.get_pixel(mask_x, PANEL_SPACING),
            Some(color::compose_rgb(255, 255, 255))
        );
        assert_eq!(
            panel.get_pixel(mask_x + 1, PANEL_SPACING),
            Some(color::compose_rgb(0, 0, 0))
        );

        assert_eq!(
            panel.text(),
            Some("Imagem Original | Semente em (0,0) | Região Crescida (Limiar: 5)")
        );
    }

    #[test]
    fn test_panel_leaves_inputs_untouched() {
        let original = Pix::from_gray_samples(2, 2, &[1, 2, 3, 4]).unwrap();
        let mask = Pix::new(2, 2, PixelDepth::Bit1).unwrap();
        let labels = PanelLabels::for_seed(Seed::new(1, 1), 0);
        render_comparison_panel(&original, &original, &mask, &labels).unwrap();
        assert_eq!(original.text(), None);
        assert_eq!(mask.text(), None);
    }
}
