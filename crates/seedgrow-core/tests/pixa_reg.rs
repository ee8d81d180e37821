//! Pixa tiling and depth conversion regression test
//!
//! Builds the three kinds of panes a comparison panel holds (8 bpp
//! intensity, 32 bpp overlay, 1 bpp mask), tiles them in a row, and
//! checks placement and captions.
//!
//! Run with:
//! ```
//! cargo test -p seedgrow-core --test pixa_reg
//! ```

use seedgrow_core::{Color, Pix, PixMut, Pixa, PixelDepth, color};
use seedgrow_test::RegParams;

fn captioned(pm: PixMut, caption: &str) -> Pix {
    let mut pm = pm;
    pm.set_text(Some(caption.to_string()));
    pm.into()
}

#[test]
fn pixa_reg() {
    let mut rp = RegParams::new("pixa");

    let samples: Vec<u8> = (0..24 * 16).map(|i| (i % 24 * 10) as u8).collect();
    let gray = Pix::from_gray_samples(24, 16, &samples).unwrap();

    let mut overlay = gray.convert_to_32().unwrap().to_mut();
    overlay
        .render_filled_circle_color(12, 8, 3, Color::RED)
        .unwrap();

    let mut mask = Pix::new(20, 12, PixelDepth::Bit1).unwrap().to_mut();
    mask.fill_rect_color(5, 2, 10, 8, Color::WHITE);

    let pixa: Pixa = [
        captioned(gray.to_mut(), "gray"),
        captioned(overlay, "overlay"),
        captioned(mask, "mask"),
    ]
    .into_iter()
    .collect();
    rp.compare_values(3.0, pixa.len() as f64, 0.0); // 1

    let tiled = pixa.display_tiled_in_row(4, Color::WHITE).unwrap();
    rp.compare_values((24 + 24 + 20 + 4 * 4) as f64, tiled.width() as f64, 0.0); // 2
    rp.compare_values((16 + 2 * 4) as f64, tiled.height() as f64, 0.0); // 3

    // First pane keeps its gray ramp, replicated into RGB
    rp.compare_values(
        color::compose_rgb(50, 50, 50) as f64,
        tiled.get_pixel(4 + 5, 4).unwrap() as f64,
        0.0,
    ); // 4

    // Overlay center is red
    let red = tiled.get_rgb(4 + 24 + 4 + 12, 4 + 8);
    rp.compare_values(1.0, (red == Some((255, 0, 0))) as u8 as f64, 0.0); // 5

    // Mask pane is shorter than the row: filled with background below
    let mask_x = 4 + 24 + 4 + 24 + 4;
    rp.compare_values(
        color::compose_rgb(255, 255, 255) as f64,
        tiled.get_pixel(mask_x + 6, 4 + 3).unwrap() as f64,
        0.0,
    ); // 6
    rp.compare_values(
        color::compose_rgb(0, 0, 0) as f64,
        tiled.get_pixel(mask_x, 4).unwrap() as f64,
        0.0,
    ); // 7
    rp.compare_values(
        color::compose_rgb(255, 255, 255) as f64,
        tiled.get_pixel(mask_x, 4 + 14).unwrap() as f64,
        0.0,
    ); // 8

    rp.compare_values(
        1.0,
        (tiled.text() == Some("gray | overlay | mask")) as u8 as f64,
        0.0,
    ); // 9

    // Panes keep their own pixels once placed
    let pane = gray.convert_to_32().unwrap();
    let mut same = true;
    for y in 0..16 {
        for x in 0..24 {
            same &= tiled.get_pixel(4 + x, 4 + y) == pane.get_pixel(x, y);
        }
    }
    rp.compare_values(1.0, same as u8 as f64, 0.0); // 10

    // Empty arrays cannot be tiled
    rp.compare_values(
        1.0,
        Pixa::new().display_tiled_in_row(4, Color::WHITE).is_err() as u8 as f64,
        0.0,
    ); // 11

    assert!(rp.cleanup(), "pixa regression test failed");
}
