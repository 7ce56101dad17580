//! # normal-cone
//!
//! Anchored normal cones for conservative backface culling of mesh
//! clusters in level-of-detail renderers.
//!
//! ## Features
//!
//! - **Fitting**: axis + spread from (area-weighted) normals via an angular histogram
//! - **Anchors**: front/back extreme points making the test independent of cluster internals
//! - **Quantization**: 8-byte `[i16; 4]` record for per-cluster storage
//! - **Culling**: front-face / back-face tests against a viewpoint or bounding sphere
//! - **Clusters**: fit straight from indexed triangle patches, in parallel
//!
//! ## Example
//!
//! ```rust
//! use normal_cone::prelude::*;
//!
//! // A cluster whose normals all point roughly along +Z
//! let normals = vec![
//!     Vec3::new(0.05, 0.0, 1.0).normalize(),
//!     Vec3::new(-0.05, 0.0, 1.0).normalize(),
//!     Vec3::new(0.0, 0.05, 1.0).normalize(),
//!     Vec3::new(0.0, -0.05, 1.0).normalize(),
//! ];
//! let areas = vec![1.0; 4];
//! let anchors = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)).corners();
//!
//! let cone = AnchoredCone::fit_weighted(&normals, &areas, &anchors, &ConeFitConfig::default())
//!     .expect("valid input");
//!
//! // Seen from far below, every sample faces away
//! assert!(cone.backface(Vec3::new(0.0, 0.0, -50.0)));
//!
//! // Quantize for storage and test against the cluster's sphere
//! let packed = QuantizedCone::import(&cone).expect("well-formed cone");
//! let sphere = BoundingSphere::new(Vec3::ZERO, 3.0f32.sqrt());
//! assert!(packed.backface(&sphere, Vec3::new(0.0, 0.0, -50.0)));
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod cluster;
pub mod config;
pub mod cone;
pub mod error;
pub mod types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::cluster::{
        backface_batch, backface_batch_parallel, fit_cluster_cone, fit_cluster_cones_parallel,
        frontface_batch_parallel, ClusterCone, ClusterGeometry,
    };
    pub use crate::config::{AnchorSource, ConeFitConfig};
    pub use crate::cone::{AnchoredCone, AngularHistogram, Coverage, QuantizedCone};
    pub use crate::error::ConeError;
    pub use crate::types::{Aabb, BoundingSphere};
    pub use glam::Vec3;
}

// Re-exports for convenience
pub use cone::{AnchoredCone, QuantizedCone};
pub use config::ConeFitConfig;
pub use error::ConeError;
pub use types::BoundingSphere;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_basic_workflow() {
        let normals: Vec<Vec3> = (0..32)
            .map(|i| {
                let phi = i as f32 * 0.2;
                Vec3::new(0.1 * phi.cos(), 0.1 * phi.sin(), 1.0).normalize()
            })
            .collect();
        let areas = vec![1.0; normals.len()];
        let anchors = Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.5)).corners();

        let mut cone = AnchoredCone::new();
        cone.add_normals_weighted(&normals, &areas, 0.95).unwrap();
        cone.add_anchors(&anchors).unwrap();

        assert!(!cone.is_degenerate());
        assert_eq!(cone.front_anchor().z, 0.0);
        assert_eq!(cone.back_anchor().z, 0.5);

        let packed = QuantizedCone::import(&cone).unwrap();
        let decoded = packed.direction();
        assert!((decoded - cone.axis()).length() < 1e-3);
    }
}
