//! Angular histogram of normals around a cone axis
//!
//! Splits [0, π] into equal-width rings around the axis and accumulates
//! sample weight per ring. The coverage bin is the first ring where the
//! running weight crosses `threshold * total`; its upper edge
//! `π (bin + 1) / bins` is the fitted spread half-angle.
//!
//! O(n) time and O(bins) memory, insensitive to a few outlier normals.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use std::f64::consts::PI;

/// How the running weight is compared against the coverage target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// `running > threshold * total` (area-weighted fits)
    Exceeds,
    /// `running >= threshold * total` (sample-count fits)
    Reaches,
}

/// Weighted histogram of angles over [0, π]
#[derive(Debug, Clone)]
pub struct AngularHistogram {
    bins: Vec<f64>,
    total: f64,
}

impl AngularHistogram {
    /// Create an empty histogram with `bins` rings (at least 1)
    pub fn new(bins: usize) -> Self {
        AngularHistogram {
            bins: vec![0.0; bins.max(1)],
            total: 0.0,
        }
    }

    /// Number of rings
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Total accumulated weight
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Weight stored in ring `bin`
    #[inline]
    pub fn weight(&self, bin: usize) -> f64 {
        self.bins.get(bin).copied().unwrap_or(0.0)
    }

    /// Ring containing `angle`, `None` for negative or non-finite angles
    ///
    /// An angle of exactly π lands in the last ring.
    #[inline]
    pub fn bin_of(&self, angle: f32) -> Option<usize> {
        if !angle.is_finite() || angle < 0.0 {
            return None;
        }
        let n = self.bins.len();
        let pos = (n as f64 * angle as f64 / PI) as usize;
        Some(pos.min(n - 1))
    }

    /// Accumulate `weight` at `angle`; returns false if the angle was rejected
    pub fn add(&mut self, angle: f32, weight: f32) -> bool {
        match self.bin_of(angle) {
            Some(pos) => {
                self.bins[pos] += weight as f64;
                self.total += weight as f64;
                true
            }
            None => false,
        }
    }

    /// First ring where the running weight crosses `threshold * total`
    ///
    /// Returns `bin_count()` when the target is never crossed (e.g. empty
    /// histogram under [`Coverage::Exceeds`]), which maps to a spread past π.
    pub fn coverage_bin(&self, threshold: f32, rule: Coverage) -> usize {
        let target = threshold as f64 * self.total;
        let mut running = 0.0f64;
        for (i, &w) in self.bins.iter().enumerate() {
            running += w;
            let crossed = match rule {
                Coverage::Exceeds => running > target,
                Coverage::Reaches => running >= target,
            };
            if crossed {
                return i;
            }
        }
        self.bins.len()
    }

    /// Spread half-angle (radians) enclosed by rings `0..=bin`
    #[inline]
    pub fn half_angle(&self, bin: usize) -> f64 {
        PI * (bin + 1) as f64 / self.bins.len() as f64
    }
}

/// Angle in [0, π] between two vectors, `None` if either has zero length
#[inline]
pub(crate) fn angle_between(a: Vec3, b: Vec3) -> Option<f32> {
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return None;
    }
    Some(a.angle_between(b))
}
