//! Normal cones for cluster backface culling
//!
//! - [`AnchoredCone`]: full-precision cone fitted from normals and anchors
//! - [`QuantizedCone`]: 8-byte encoding tested against a bounding sphere
//! - [`AngularHistogram`]: the ring histogram both fits are built on
//!
//! Author: Moroya Sakamoto

pub mod anchored;
pub mod histogram;
pub mod quantized;

pub use anchored::{AnchoredCone, FACING_EPSILON, MIN_NORMAL_LENGTH};
pub use histogram::{AngularHistogram, Coverage};
pub use quantized::{QuantizedCone, DIRECTION_SCALE, LENGTH_SCALE, MAX_LENGTH};
