//! Error types for cone fitting and quantization
//!
//! Fitting inputs are validated up front; a violated precondition is
//! reported as a [`ConeError`] instead of aborting. Numeric degeneracy
//! (zero normal sums, near-90° spreads) is never an error: it yields the
//! zero scaled-normal sentinel.
//!
//! Author: Moroya Sakamoto

use thiserror::Error;

/// Errors returned by cone fitting, configuration and import
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConeError {
    /// No normals were supplied to a fit
    #[error("Empty normal set: at least one normal is required")]
    EmptyNormals,

    /// No anchor points were supplied
    #[error("Empty anchor set: at least one anchor is required")]
    EmptyAnchors,

    /// Normals and areas have different lengths
    #[error("Length mismatch: {normals} normals vs {areas} areas")]
    LengthMismatch {
        /// Number of normals
        normals: usize,
        /// Number of areas
        areas: usize,
    },

    /// Coverage threshold outside (0, 1]
    #[error("Invalid coverage threshold: {0} (expected 0 < t <= 1)")]
    InvalidThreshold(f32),

    /// Negative or non-finite sample weight
    #[error("Invalid area at index {index}: {area}")]
    InvalidArea {
        /// Sample index
        index: usize,
        /// Offending weight
        area: f32,
    },

    /// Inconsistent fitting configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Triangle index points past the vertex array
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices available
        vertex_count: usize,
    },

    /// Fitted cone direction is outside the encodable range
    #[error("Malformed cone: direction component {component} = {value}")]
    MalformedCone {
        /// Axis index (0 = x, 1 = y, 2 = z)
        component: usize,
        /// Normalized component value
        value: f32,
    },
}

/// Validate a coverage threshold
pub(crate) fn check_threshold(threshold: f32) -> Result<(), ConeError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        tracing::error!(threshold, "coverage threshold must be in (0, 1]");
        Err(ConeError::InvalidThreshold(threshold))
    }
}
