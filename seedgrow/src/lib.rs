//! seedgrow - Seeded region-growing segmentation
//!
//! Grows a region of similar intensity outward from a seed pixel and
//! writes the mask, a seed overlay and a side-by-side comparison panel.
//!
//! The workspace crates are re-exported here:
//!
//! - core image types ([`Pix`], [`PixMut`], [`Pixa`]) at the top level
//! - [`io`] - PNG and PNM reading and writing
//! - [`region`] - the region grower
//!
//! On top of them this crate adds the batch driver: [`config`] for the
//! TOML batch description, [`pipeline`] for running seeds, and [`panel`]
//! for the comparison panel.
//!
//! # Example
//!
//! ```
//! use seedgrow::region::{region_grow, Seed};
//! use seedgrow::Pix;
//!
//! let pix = Pix::from_gray_samples(3, 1, &[10, 12, 90]).unwrap();
//! let mask = region_grow(&pix, Seed::new(0, 0), 5).unwrap();
//! assert_eq!(mask.count_pixels().unwrap(), 2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use seedgrow_core::*;

// Re-export domain crates as modules
pub use seedgrow_io as io;
pub use seedgrow_region as region;

pub mod config;
pub mod error;
pub mod panel;
pub mod pipeline;

pub use error::{AppError, AppResult};
