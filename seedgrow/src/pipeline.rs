//! Per-seed pipeline and batch driver
//!
//! For every seed of every configured image the pipeline:
//!
//! 1. grows the region on the intensity grid of the image
//! 2. writes the source image, the source with the seed marked, the
//!    mask, and a comparison panel into the output directory
//!
//! Growth happens before anything is written, so a rejected seed leaves
//! no files behind.

use crate::config::BatchConfig;
use crate::error::{AppError, AppResult};
use crate::panel::{PanelLabels, render_comparison_panel};
use seedgrow_core::{Color, ImageFormat, Pix};
use seedgrow_region::{GrowStats, RegionGrowOptions, Seed, region_grow_with_options};
use std::fs;
use std::path::{Path, PathBuf};

/// Radius of the seed marker, in pixels
pub const SEED_MARKER_RADIUS: u32 = 5;

/// Color of the seed marker
pub const SEED_MARKER_COLOR: Color = Color::RED;

/// Base name shared by the artifacts of one seed job
///
/// `index` is the 1-based position of the seed in its image's list.
pub fn artifact_base(stem: &str, index: usize, threshold: u32) -> String {
    format!("{}_semente{}_limiar{}", stem, index, threshold)
}

/// Output paths of one seed job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub original: PathBuf,
    pub annotated: PathBuf,
    pub mask: PathBuf,
    pub panel: PathBuf,
}

impl Artifacts {
    /// Paths under `dir` for the given base name
    pub fn new(dir: &Path, base: &str) -> Self {
        Self {
            original: dir.join(format!("{}_original.png", base)),
            annotated: dir.join(format!("{}_original_com_semente.png", base)),
            mask: dir.join(format!("{}_segmentada.png", base)),
            panel: dir.join(format!("{}_comparacao_crescimento.png", base)),
        }
    }

    /// All paths, in write order
    pub fn paths(&self) -> [&Path; 4] {
        [&self.original, &self.annotated, &self.mask, &self.panel]
    }
}

/// What one successful seed job produced
#[derive(Debug, Clone)]
pub struct JobReport {
    pub seed: Seed,
    pub artifacts: Artifacts,
    pub stats: GrowStats,
}

/// Read a source image.
///
/// # Errors
///
/// Returns [`AppError::ImageNotFound`] if `path` does not exist, or the
/// decoder's error if it cannot be read.
pub fn load_source(path: &Path) -> AppResult<Pix> {
    if !path.exists() {
        return Err(AppError::ImageNotFound(path.to_path_buf()));
    }
    Ok(seedgrow_io::read_image(path)?)
}

/// Read an image and reduce it to an 8 bpp intensity grid.
pub fn load_intensity_grid(path: &Path) -> AppResult<Pix> {
    Ok(load_source(path)?.convert_to_8()?)
}

/// Copy of `source` in 32 bpp with a filled red circle on the seed.
pub fn annotate_seed(source: &Pix, seed: Seed) -> AppResult<Pix> {
    let mut annotated = source.convert_to_32()?.to_mut();
    let cx = i32::try_from(seed.col).unwrap_or(i32::MAX);
    let cy = i32::try_from(seed.row).unwrap_or(i32::MAX);
    annotated.render_filled_circle_color(cx, cy, SEED_MARKER_RADIUS, SEED_MARKER_COLOR)?;
    Ok(annotated.into())
}

fn create_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn save(pix: &Pix, path: &Path) -> AppResult<()> {
    seedgrow_io::write_image(pix, path, ImageFormat::Png)?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Run one seed through the full pipeline.
///
/// # Arguments
///
/// * `source` - Image as read from disk, any supported depth
/// * `stem` - Source file name without extension
/// * `index` - 1-based seed index within the image
/// * `seed` - Seed position, `(row, col)`
/// * `threshold` - Similarity threshold
/// * `output_dir` - Created if missing
pub fn run_seed_job(
    source: &Pix,
    stem: &str,
    index: usize,
    seed: Seed,
    threshold: u32,
    output_dir: &Path,
) -> AppResult<JobReport> {
    let grid = source.convert_to_8()?;
    let grown = region_grow_with_options(&grid, seed, &RegionGrowOptions::new(threshold))?;
    log::info!(
        "seed {} of {}: region of {} pixels ({} examined)",
        seed,
        stem,
        grown.stats.accepted,
        grown.stats.visited
    );

    let annotated = annotate_seed(source, seed)?;
    let labels = PanelLabels::for_seed(seed, threshold);
    let panel = render_comparison_panel(source, &annotated, &grown.mask, &labels)?;

    create_dir(output_dir)?;
    let artifacts = Artifacts::new(output_dir, &artifact_base(stem, index, threshold));
    save(source, &artifacts.original)?;
    save(&annotated, &artifacts.annotated)?;
    save(&grown.mask, &artifacts.mask)?;
    save(&panel, &artifacts.panel)?;

    Ok(JobReport {
        seed,
        artifacts,
        stats: grown.stats,
    })
}

/// Outcome counts of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped_images: usize,
}

impl BatchSummary {
    /// True when every configured job ran
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.skipped_images == 0
    }
}

/// Run every seed of every configured image, in order.
///
/// Missing or unreadable images and failed seeds are logged and counted;
/// the batch carries on with the next one.
///
/// # Errors
///
/// Fails only if the output directory cannot be created.
pub fn run_batch(config: &BatchConfig) -> AppResult<BatchSummary> {
    create_dir(&config.output_dir)?;
    log::info!(
        "processing {} images ({} seeds) from {} into {}, threshold {}",
        config.images.len(),
        config.job_count(),
        config.input_dir.display(),
        config.output_dir.display(),
        config.threshold
    );

    let mut summary = BatchSummary::default();
    for image in &config.images {
        let path = config.input_dir.join(&image.name);
        let source = match load_source(&path) {
            Ok(pix) => pix,
            Err(e) => {
                log::error!("skipping {}: {}", image.name, e);
                summary.skipped_images += 1;
                continue;
            }
        };

        for (i, seed) in image.seeds().enumerate() {
            match run_seed_job(
                &source,
                image.stem(),
                i + 1,
                seed,
                config.threshold,
                &config.output_dir,
            ) {
                Ok(_) => summary.succeeded += 1,
                Err(e) => {
                    log::error!("seed {} of {} failed: {}", seed, image.name, e);
                    summary.failed += 1;
                }
            }
        }
    }

    if summary.is_success() {
        log::info!("batch finished: {} jobs", summary.succeeded);
    } else {
        log::warn!(
            "batch finished: {} succeeded, {} failed, {} images skipped",
            summary.succeeded,
            summary.failed,
            summary.skipped_images
        );
    }
    Ok(summary)
}
