//! Quantized normal cone (8 bytes)
//!
//! Compact form of an [`AnchoredCone`] for per-cluster records:
//!
//! | slot   | content                           | scale   |
//! |--------|-----------------------------------|---------|
//! | `n[0]` | axis x in [-1, 1]                 | 32766   |
//! | `n[1]` | axis y in [-1, 1]                 | 32766   |
//! | `n[2]` | axis z in [-1, 1]                 | 32766   |
//! | `n[3]` | scaled-normal length in [-10, 10] | 3276    |
//!
//! Anchors are dropped; the tests use the cluster's bounding sphere
//! instead, pushed out along the axis by its radius.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::anchored::{inside_cone, AnchoredCone};
use crate::error::ConeError;
use crate::types::BoundingSphere;

/// Fixed-point scale of the axis components
pub const DIRECTION_SCALE: f32 = 32766.0;

/// Fixed-point scale of the length term
pub const LENGTH_SCALE: f32 = 3276.0;

/// Largest encodable length magnitude
pub const MAX_LENGTH: f32 = 10.0;

/// Scaled normals shorter than this are not normalized on import
pub const MIN_IMPORT_LENGTH: f32 = 0.001;

/// Normalized components beyond this are a malformed cone
const COMPONENT_TOLERANCE: f32 = 1.01;

/// Normal cone quantized to four `i16`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantizedCone {
    n: [i16; 4],
}

impl QuantizedCone {
    /// Size of the persisted record in bytes
    pub const BYTES: usize = 8;

    /// Quantize a fitted cone
    ///
    /// Fails with [`ConeError::MalformedCone`] if the normalized axis has a
    /// component outside (-1.01, 1.01) or is not finite.
    pub fn import(cone: &AnchoredCone) -> Result<Self, ConeError> {
        let mut normal = cone.scaled_normal();
        let len = normal.length();
        if len > MIN_IMPORT_LENGTH {
            normal /= len;
        }

        let mut n = [0i16; 4];
        for (component, slot) in n.iter_mut().take(3).enumerate() {
            let value = normal[component];
            if !(value < COMPONENT_TOLERANCE && value > -COMPONENT_TOLERANCE) {
                tracing::error!(component, value, "cone axis component out of range");
                return Err(ConeError::MalformedCone { component, value });
            }
            *slot = (value.clamp(-1.0, 1.0) * DIRECTION_SCALE) as i16;
        }
        n[3] = (len.clamp(-MAX_LENGTH, MAX_LENGTH) * LENGTH_SCALE) as i16;

        Ok(QuantizedCone { n })
    }

    /// Wrap raw fixed-point values
    #[inline]
    pub const fn from_raw(n: [i16; 4]) -> Self {
        QuantizedCone { n }
    }

    /// Raw fixed-point values
    #[inline]
    pub const fn raw(&self) -> [i16; 4] {
        self.n
    }

    /// Decoded axis (not renormalized)
    #[inline]
    pub fn direction(&self) -> Vec3 {
        Vec3::new(
            self.n[0] as f32 / DIRECTION_SCALE,
            self.n[1] as f32 / DIRECTION_SCALE,
            self.n[2] as f32 / DIRECTION_SCALE,
        )
    }

    /// Decoded scaled-normal length
    #[inline]
    pub fn scale(&self) -> f32 {
        self.n[3] as f32 / LENGTH_SCALE
    }

    /// True when the cone carries no usable bound
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.n[3] == 0 || self.n[..3] == [0, 0, 0]
    }

    /// True if every sample inside `sphere` is guaranteed to face `view`
    pub fn frontface(&self, sphere: &BoundingSphere, view: Vec3) -> bool {
        let norm = self.direction();
        let d = (sphere.center() + norm * sphere.radius()) - view;
        let f = -d.dot(norm * self.scale());
        inside_cone(d, f)
    }

    /// True if every sample inside `sphere` is guaranteed to face away from `view`
    pub fn backface(&self, sphere: &BoundingSphere, view: Vec3) -> bool {
        let norm = self.direction();
        let d = (sphere.center() - norm * sphere.radius()) - view;
        let f = d.dot(norm * self.scale());
        inside_cone(d, f)
    }

    /// Persisted record, little-endian
    pub fn to_le_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        for (chunk, v) in out.chunks_exact_mut(2).zip(self.n) {
            chunk.copy_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Read a record written by [`to_le_bytes`](Self::to_le_bytes)
    pub fn from_le_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut n = [0i16; 4];
        for (v, chunk) in n.iter_mut().zip(bytes.chunks_exact(2)) {
            *v = i16::from_le_bytes([chunk[0], chunk[1]]);
        }
        QuantizedCone { n }
    }
}

impl TryFrom<&AnchoredCone> for QuantizedCone {
    type Error = ConeError;

    fn try_from(cone: &AnchoredCone) -> Result<Self, Self::Error> {
        QuantizedCone::import(cone)
    }
}
