//! Batch pipeline regression test
//!
//! Runs a two-image batch on synthetic inputs in a scratch directory
//! and checks the written masks and panels.
//!
//! Run with:
//! ```
//! cargo test -p seedgrow --test pipeline_reg
//! ```

use seedgrow::config::{BatchConfig, ImageJob};
use seedgrow::pipeline::{Artifacts, artifact_base, run_batch};
use seedgrow::region::{Seed, region_grow};
use seedgrow::{Color, ImageFormat, Pix, PixelDepth, color};
use seedgrow_test::RegParams;
use std::path::Path;

/// 40x30 gray background (value 90) with a dark 12x8 rectangle at
/// (x, y) = (5, 4) and a bright disk of radius 6 at (28, 18).
fn make_shapes() -> Pix {
    let mut pm = Pix::new(40, 30, PixelDepth::Bit8).unwrap().to_mut();
    pm.fill_rect_color(0, 0, 40, 30, Color::new(90, 90, 90));
    pm.fill_rect_color(5, 4, 12, 8, Color::new(30, 30, 30));
    pm.render_filled_circle_color(28, 18, 6, Color::new(220, 220, 220))
        .unwrap();
    pm.into()
}

/// 32x32 RGB image: red left half, blue right half.
fn make_halves() -> Pix {
    let mut pm = Pix::new(32, 32, PixelDepth::Bit32).unwrap().to_mut();
    for y in 0..32 {
        for x in 0..32 {
            let val = if x < 16 {
                color::compose_rgb(220, 30, 30)
            } else {
                color::compose_rgb(30, 30, 220)
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    pm.into()
}

fn read_mask(artifacts: &Artifacts) -> Pix {
    seedgrow::io::read_image(&artifacts.mask).unwrap()
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("imagens_exemplo");
    let output = dir.path().join("resultados_imagens");
    std::fs::create_dir_all(&input).unwrap();

    let shapes = make_shapes();
    let halves = make_halves();
    seedgrow::io::write_image(&shapes, input.join("shapes.png"), ImageFormat::Png).unwrap();
    seedgrow::io::write_image(&halves, input.join("halves.pnm"), ImageFormat::Pnm).unwrap();

    let config = BatchConfig {
        input_dir: input,
        output_dir: output.clone(),
        threshold: 15,
        images: vec![
            ImageJob::new("shapes.png", &[(6, 8), (18, 28), (0, 0)]),
            ImageJob::new("halves.pnm", &[(10, 3)]),
        ],
    };

    let summary = run_batch(&config).unwrap();
    rp.compare_values(4.0, summary.succeeded as f64, 0.0); // 1
    rp.compare_values(0.0, (summary.failed + summary.skipped_images) as f64, 0.0); // 2

    // -----------------------------------------------------------
    // Masks on disk match a direct call of the grower
    // -----------------------------------------------------------
    let rect = Artifacts::new(&output, &artifact_base("shapes", 1, 15));
    let rect_mask = read_mask(&rect);
    rp.compare_values(96.0, rect_mask.count_pixels().unwrap() as f64, 0.0); // 3
    let direct = region_grow(&shapes, Seed::new(6, 8), 15).unwrap();
    rp.compare_pix(&direct, &rect_mask); // 4
    rp.compare_values(1.0, rect_mask.get_pixel(16, 11).unwrap() as f64, 0.0); // 5

    let disk = Artifacts::new(&output, &artifact_base("shapes", 2, 15));
    let disk_mask = read_mask(&disk);
    let background = Artifacts::new(&output, &artifact_base("shapes", 3, 15));
    let background_mask = read_mask(&background);

    // The three regions tile the image
    let total = rect_mask.count_pixels().unwrap()
        + disk_mask.count_pixels().unwrap()
        + background_mask.count_pixels().unwrap();
    rp.compare_values(40.0 * 30.0, total as f64, 0.0); // 6

    // -----------------------------------------------------------
    // Color input grows on luminance
    // -----------------------------------------------------------
    let red = Artifacts::new(&output, &artifact_base("halves", 1, 15));
    let red_mask = read_mask(&red);
    rp.compare_values(16.0 * 32.0, red_mask.count_pixels().unwrap() as f64, 0.0); // 7
    rp.compare_values(
        0.0,
        red_mask.get_pixel(16, 0).unwrap() as f64,
        0.0,
    ); // 8

    let annotated = seedgrow::io::read_image(&red.annotated).unwrap();
    let marked = annotated.get_rgb(3, 10) == Some((255, 0, 0));
    rp.compare_values(1.0, if marked { 1.0 } else { 0.0 }, 0.0); // 9

    let panel = seedgrow::io::read_image(&red.panel).unwrap();
    rp.compare_values(3.0 * 32.0 + 40.0, panel.width() as f64, 0.0); // 10
    rp.compare_values(32.0 + 2.0 * 10.0, panel.height() as f64, 0.0); // 11

    for path in red.paths() {
        assert!(Path::new(path).exists(), "missing {}", path.display());
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}
