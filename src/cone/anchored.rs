//! Full-precision anchored normal cone
//!
//! An [`AnchoredCone`] bounds the normals of a cluster and carries two
//! anchor points so a viewpoint can be classified without touching the
//! cluster's samples:
//!
//! - **scaled normal**: direction = cone axis, magnitude =
//!   `1 / cos(π/2 - α)` where `α` is the fitted spread of the normals
//!   around the axis. `π/2 - α` is the half-angle of the visibility cone the
//!   tests check against. A zero vector means no usable cone.
//! - **front anchor**: anchor with the smallest projection on the axis.
//! - **back anchor**: anchor with the largest projection on the axis.
//!
//! Build order: normals first ([`AnchoredCone::add_normals_weighted`] or
//! [`AnchoredCone::add_normals`]), then [`AnchoredCone::add_anchors`].
//! [`AnchoredCone::fit_weighted`] / [`AnchoredCone::fit`] do both.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::histogram::{angle_between, AngularHistogram, Coverage};
use crate::config::ConeFitConfig;
use crate::error::ConeError;

/// Minimum projection length for a facing test to succeed
pub const FACING_EPSILON: f32 = 0.001;

/// Normals shorter than this are ignored by the unweighted fit
pub const MIN_NORMAL_LENGTH: f32 = 0.00001;

/// Normal cone with front/back anchors, in full precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchoredCone {
    scaled_normal: Vec3,
    front_anchor: Vec3,
    back_anchor: Vec3,
}

impl AnchoredCone {
    /// Zeroed cone (degenerate until fitted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a cone from already-fitted parts
    pub fn from_parts(scaled_normal: Vec3, front_anchor: Vec3, back_anchor: Vec3) -> Self {
        AnchoredCone {
            scaled_normal,
            front_anchor,
            back_anchor,
        }
    }

    /// Fit normals (area-weighted) and anchors in one go
    pub fn fit_weighted(
        normals: &[Vec3],
        areas: &[f32],
        anchors: &[Vec3],
        config: &ConeFitConfig,
    ) -> Result<Self, ConeError> {
        let mut cone = Self::new();
        cone.add_normals_weighted_with(normals, areas, config)?;
        cone.add_anchors(anchors)?;
        Ok(cone)
    }

    /// Fit normals (one vote per sample) and anchors in one go
    pub fn fit(normals: &[Vec3], anchors: &[Vec3], config: &ConeFitConfig) -> Result<Self, ConeError> {
        let mut cone = Self::new();
        cone.add_normals_with(normals, config)?;
        cone.add_anchors(anchors)?;
        Ok(cone)
    }

    /// Fit the cone axis and spread from area-weighted normals
    ///
    /// The axis is the normalized sum of `normals`. The spread is the
    /// smallest histogram ring radius holding more than `threshold` of the
    /// total area. Uses the default bin count and degenerate margin.
    ///
    /// Empty input, a zero normal sum or zero total area leave the cone
    /// degenerate; that is not an error.
    pub fn add_normals_weighted(
        &mut self,
        normals: &[Vec3],
        areas: &[f32],
        threshold: f32,
    ) -> Result<(), ConeError> {
        let config = ConeFitConfig::default().with_threshold(threshold);
        self.add_normals_weighted_with(normals, areas, &config)
    }

    /// [`add_normals_weighted`](Self::add_normals_weighted) with explicit configuration
    pub fn add_normals_weighted_with(
        &mut self,
        normals: &[Vec3],
        areas: &[f32],
        config: &ConeFitConfig,
    ) -> Result<(), ConeError> {
        config.validate()?;
        if normals.len() != areas.len() {
            tracing::error!(
                normals = normals.len(),
                areas = areas.len(),
                "normals and areas must have the same length"
            );
            return Err(ConeError::LengthMismatch {
                normals: normals.len(),
                areas: areas.len(),
            });
        }
        if let Some((index, &area)) = areas
            .iter()
            .enumerate()
            .find(|(_, a)| !(a.is_finite() && **a >= 0.0))
        {
            tracing::error!(index, area, "sample areas must be finite and non-negative");
            return Err(ConeError::InvalidArea { index, area });
        }

        let axis = normals.iter().copied().sum::<Vec3>().normalize_or_zero();

        let mut histogram = AngularHistogram::new(config.bins);
        for (&n, &area) in normals.iter().zip(areas) {
            if let Some(angle) = angle_between(axis, n) {
                histogram.add(angle, area);
            }
        }

        self.scaled_normal = scale_axis(axis, &histogram, config, Coverage::Exceeds);
        Ok(())
    }

    /// Fit the cone axis and spread giving every normal one vote
    ///
    /// Each normal is normalized first (near-zero normals are dropped) and
    /// the axis is their average direction. The spread is the smallest ring
    /// radius holding at least `threshold` of the samples.
    pub fn add_normals(&mut self, normals: &[Vec3], threshold: f32) -> Result<(), ConeError> {
        let config = ConeFitConfig::default().with_threshold(threshold);
        self.add_normals_with(normals, &config)
    }

    /// [`add_normals`](Self::add_normals) with explicit configuration
    pub fn add_normals_with(&mut self, normals: &[Vec3], config: &ConeFitConfig) -> Result<(), ConeError> {
        config.validate()?;
        if normals.is_empty() {
            tracing::error!("cannot fit a cone to an empty normal set");
            return Err(ConeError::EmptyNormals);
        }

        self.scaled_normal = Vec3::ZERO;

        let units: Vec<Vec3> = normals
            .iter()
            .filter(|n| n.length() >= MIN_NORMAL_LENGTH)
            .map(|n| n.normalize())
            .collect();
        if units.is_empty() {
            tracing::debug!(samples = normals.len(), "all normals are near zero, no cone");
            return Ok(());
        }

        let mean = units.iter().copied().sum::<Vec3>() / units.len() as f32;
        let len = mean.length();
        if len == 0.0 {
            tracing::debug!(samples = units.len(), "normals cancel out, no cone");
            return Ok(());
        }
        let axis = mean / len;

        let mut histogram = AngularHistogram::new(config.bins);
        for &n in &units {
            if let Some(angle) = angle_between(axis, n) {
                histogram.add(angle, 1.0);
            }
        }

        self.scaled_normal = scale_axis(axis, &histogram, config, Coverage::Reaches);
        Ok(())
    }

    /// Pick the front and back anchors among `anchors`
    ///
    /// Front minimizes the projection onto the scaled normal, back
    /// maximizes it. Ties keep the earliest point. Must run after the
    /// normals are fitted.
    pub fn add_anchors(&mut self, anchors: &[Vec3]) -> Result<(), ConeError> {
        let Some(&first) = anchors.first() else {
            tracing::error!("cannot pick anchors from an empty set");
            return Err(ConeError::EmptyAnchors);
        };

        let s = self.scaled_normal;
        self.front_anchor = first;
        self.back_anchor = first;
        let mut fa = first.dot(s);
        let mut fb = -fa;

        for &anchor in anchors {
            let na = anchor.dot(s);
            if na < fa {
                self.front_anchor = anchor;
                fa = na;
            }
            if -na < fb {
                self.back_anchor = anchor;
                fb = -na;
            }
        }
        Ok(())
    }

    /// True if every sample is guaranteed to face `view_point`
    ///
    /// Always false for a degenerate cone.
    #[inline]
    pub fn frontface(&self, view_point: Vec3) -> bool {
        let d = self.front_anchor - view_point;
        let f = -d.dot(self.scaled_normal);
        inside_cone(d, f)
    }

    /// True if every sample is guaranteed to face away from `view_point`
    ///
    /// Always false for a degenerate cone.
    #[inline]
    pub fn backface(&self, view_point: Vec3) -> bool {
        let d = self.back_anchor - view_point;
        let f = d.dot(self.scaled_normal);
        inside_cone(d, f)
    }

    /// Axis scaled by `1 / cos(visibility half-angle)`, zero when degenerate
    #[inline]
    pub fn scaled_normal(&self) -> Vec3 {
        self.scaled_normal
    }

    /// Anchor with the smallest projection on the axis
    #[inline]
    pub fn front_anchor(&self) -> Vec3 {
        self.front_anchor
    }

    /// Anchor with the largest projection on the axis
    #[inline]
    pub fn back_anchor(&self) -> Vec3 {
        self.back_anchor
    }

    /// Unit cone axis, zero when degenerate
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.scaled_normal.normalize_or_zero()
    }

    /// True when no usable cone was fitted
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.scaled_normal == Vec3::ZERO
    }

    /// Half-angle of the region of view directions accepted by the tests
    pub fn visibility_half_angle(&self) -> Option<f32> {
        let len = self.scaled_normal.length();
        (len > 0.0).then(|| (1.0 / len).clamp(-1.0, 1.0).acos())
    }

    /// Fitted spread of the normals around the axis
    pub fn normal_spread(&self) -> Option<f32> {
        let len = self.scaled_normal.length();
        (len > 0.0).then(|| (1.0 / len).clamp(-1.0, 1.0).asin())
    }
}

/// Shared half-angle test: `f` must clear the epsilon and dominate `|d|`
#[inline]
pub(crate) fn inside_cone(d: Vec3, f: f32) -> bool {
    f >= FACING_EPSILON && f * f >= d.length_squared()
}

/// Turn a unit axis and its angular histogram into the scaled normal
fn scale_axis(axis: Vec3, histogram: &AngularHistogram, config: &ConeFitConfig, rule: Coverage) -> Vec3 {
    if axis == Vec3::ZERO {
        tracing::debug!("zero normal sum, no cone");
        return Vec3::ZERO;
    }

    let best = histogram.coverage_bin(config.threshold, rule);
    let alpha = histogram.half_angle(best);
    if alpha >= FRAC_PI_2 - config.degenerate_margin {
        tracing::debug!(bin = best, alpha, "normal spread too wide, no cone");
        return Vec3::ZERO;
    }

    axis / (FRAC_PI_2 - alpha).cos() as f32
}
