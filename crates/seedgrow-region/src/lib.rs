//! seedgrow-region - Seeded region growing
//!
//! This crate grows a single region of similar intensity from a seed
//! pixel of an 8 bpp image:
//!
//! - **Region growing** - [`region_grow`] and [`region_grow_with_options`]
//! - **Connectivity** - 4-way or 8-way neighborhoods ([`ConnectivityType`])
//! - **Work list** - the explicit LIFO used by the traversal ([`GrowStack`])
//!
//! The similarity test always compares against the seed's intensity:
//! a pixel joins the region when `|value - seed_value| <= threshold`
//! and it is connected to the seed through pixels that also joined.
//!
//! # Examples
//!
//! ```
//! use seedgrow_region::{region_grow, Seed};
//! use seedgrow_core::Pix;
//!
//! // 5x5 flat image with one bright corner
//! let mut samples = [100u8; 25];
//! samples[0] = 200;
//! let pix = Pix::from_gray_samples(5, 5, &samples).unwrap();
//!
//! let mask = region_grow(&pix, Seed::new(2, 2), 10).unwrap();
//! assert_eq!(mask.count_pixels().unwrap(), 24);
//! assert_eq!(mask.get_pixel(0, 0), Some(0));
//! ```
//!
//! ## 4-way growth with statistics
//!
//! ```
//! use seedgrow_region::{region_grow_with_options, ConnectivityType, RegionGrowOptions, Seed};
//! use seedgrow_core::Pix;
//!
//! let pix = Pix::from_gray_samples(3, 3, &[0, 255, 0, 255, 0, 255, 0, 255, 0]).unwrap();
//! let options = RegionGrowOptions::new(0).with_connectivity(ConnectivityType::FourWay);
//!
//! let result = region_grow_with_options(&pix, Seed::new(1, 1), &options).unwrap();
//! assert_eq!(result.mask.count_pixels().unwrap(), 1);
//! assert_eq!(result.stats.visited, 5);
//! ```

pub mod connectivity;
pub mod error;
pub mod grow;
pub mod stack;

// Re-export core types
pub use seedgrow_core;

pub use connectivity::ConnectivityType;
pub use error::{RegionError, RegionResult};
pub use grow::{
    DEFAULT_THRESHOLD, GrowStats, RegionGrowOptions, RegionGrowResult, Seed, region_grow,
    region_grow_with_options,
};
pub use stack::GrowStack;
