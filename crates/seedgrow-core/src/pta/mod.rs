//! Pta - Point arrays
//!
//! Arrays of floating-point coordinate pairs, used by the drawing
//! routines to describe the pixels a shape covers.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

/// Array of points.
///
/// Stores 2D points as parallel x/y coordinate vectors.
#[derive(Debug, Clone, Default)]
pub struct Pta {
    /// X coordinates
    x: Vec<f32>,
    /// Y coordinates
    y: Vec<f32>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Add a point.
    pub fn push(&mut self, x: f32, y: f32) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Iterate over points as `(x, y)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Return a copy shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Pta {
        let mut out = Pta::with_capacity(self.len());
        for (x, y) in self.iter() {
            out.push(x + dx, y + dy);
        }
        out
    }
}
