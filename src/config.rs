//! Cone fitting configuration
//!
//! Author: Moroya Sakamoto

use serde::{Deserialize, Serialize};

use crate::error::{check_threshold, ConeError};

/// Default number of angular bins over [0, π]
pub const DEFAULT_BINS: usize = 50;

/// Default coverage fraction
pub const DEFAULT_THRESHOLD: f32 = 0.95;

/// Largest accepted bin count
pub const MAX_BINS: usize = 4096;

/// Default margin (radians) below π/2 at which a spread is treated as degenerate
pub const DEFAULT_DEGENERATE_MARGIN: f64 = 0.1;

/// Which points of a cluster act as anchor candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorSource {
    /// Every vertex referenced by the cluster's triangles
    Vertices,
    /// The 8 corners of the cluster's axis-aligned box
    BoxCorners,
}

/// Configuration for normal cone fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeFitConfig {
    /// Fraction of the (weighted) normal distribution the cone must cover, in (0, 1]
    pub threshold: f32,
    /// Number of equal-width angular bins over [0, π]
    pub bins: usize,
    /// Spreads with half-angle `>= π/2 - degenerate_margin` give no cone
    pub degenerate_margin: f64,
    /// Weight samples by triangle area (cluster fitting only)
    pub weighted: bool,
    /// Anchor candidates used by cluster fitting
    pub anchors: AnchorSource,
}

impl Default for ConeFitConfig {
    fn default() -> Self {
        ConeFitConfig {
            threshold: DEFAULT_THRESHOLD,
            bins: DEFAULT_BINS,
            degenerate_margin: DEFAULT_DEGENERATE_MARGIN,
            weighted: true,
            anchors: AnchorSource::BoxCorners,
        }
    }
}

impl ConeFitConfig {
    /// Cover every sample, counting triangles rather than area
    ///
    /// The unweighted rule accepts full coverage (`>=`), so a threshold of
    /// 1.0 is meaningful here.
    pub fn conservative() -> Self {
        ConeFitConfig {
            threshold: 1.0,
            weighted: false,
            ..Default::default()
        }
    }

    /// Tighter cones that let 10% of the area poke out
    pub fn tight() -> Self {
        ConeFitConfig {
            threshold: 0.9,
            ..Default::default()
        }
    }

    /// Builder-style threshold override
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder-style bin count override
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConeError> {
        check_threshold(self.threshold)?;
        if !(2..=MAX_BINS).contains(&self.bins) {
            tracing::error!(bins = self.bins, "histogram bin count out of range");
            return Err(ConeError::InvalidConfig(format!(
                "bins must be in [2, {}], got {}",
                MAX_BINS, self.bins
            )));
        }
        if !(self.degenerate_margin.is_finite()
            && (0.0..std::f64::consts::FRAC_PI_2).contains(&self.degenerate_margin))
        {
            tracing::error!(margin = self.degenerate_margin, "degenerate margin out of range");
            return Err(ConeError::InvalidConfig(format!(
                "degenerate_margin must be in [0, pi/2), got {}",
                self.degenerate_margin
            )));
        }
        Ok(())
    }
}
