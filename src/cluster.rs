//! Cone fitting for triangle clusters
//!
//! Turns a patch of an indexed triangle mesh into the inputs the cone
//! fitter needs (unit face normals, face areas, anchor candidates, a
//! bounding sphere) and fits many patches at once.
//!
//! # Batch operations
//! - **Parallel Fit**: `fit_cluster_cones_parallel` fits one cone per patch with rayon.
//! - **Parallel Culling**: `backface_batch_parallel` / `frontface_batch_parallel`
//!   test quantized records against a single viewpoint.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{AnchorSource, ConeFitConfig};
use crate::cone::{AnchoredCone, QuantizedCone};
use crate::error::ConeError;
use crate::types::{Aabb, BoundingSphere};

/// Borrowed view of one triangle patch
#[derive(Debug, Clone, Copy)]
pub struct ClusterGeometry<'a> {
    /// Vertex positions (may be shared with other clusters)
    pub positions: &'a [Vec3],
    /// Triangle list, 3 indices per face; a trailing partial face is ignored
    pub indices: &'a [u32],
}

impl<'a> ClusterGeometry<'a> {
    /// Create a cluster view
    pub fn new(positions: &'a [Vec3], indices: &'a [u32]) -> Self {
        ClusterGeometry { positions, indices }
    }

    /// Number of complete triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn position(&self, index: u32) -> Result<Vec3, ConeError> {
        self.positions
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                tracing::error!(index, vertices = self.positions.len(), "triangle index out of range");
                ConeError::IndexOutOfRange {
                    index,
                    vertex_count: self.positions.len(),
                }
            })
    }

    /// Unit face normals and face areas; zero-area faces are skipped
    pub fn face_samples(&self) -> Result<(Vec<Vec3>, Vec<f32>), ConeError> {
        let mut normals = Vec::with_capacity(self.triangle_count());
        let mut areas = Vec::with_capacity(self.triangle_count());

        for tri in self.indices.chunks_exact(3) {
            let a = self.position(tri[0])?;
            let b = self.position(tri[1])?;
            let c = self.position(tri[2])?;

            let cross = (b - a).cross(c - a);
            let len = cross.length();
            if len > 0.0 {
                normals.push(cross / len);
                areas.push(0.5 * len);
            }
        }

        Ok((normals, areas))
    }

    /// Positions referenced by the triangle list, in index order
    pub fn referenced_positions(&self) -> Result<Vec<Vec3>, ConeError> {
        let end = self.triangle_count() * 3;
        self.indices[..end].iter().map(|&i| self.position(i)).collect()
    }

    /// Anchor candidates for the cone
    pub fn anchors(&self, source: AnchorSource) -> Result<Vec<Vec3>, ConeError> {
        let points = self.referenced_positions()?;
        Ok(match source {
            AnchorSource::Vertices => points,
            AnchorSource::BoxCorners => Aabb::from_points(&points)
                .map(|aabb| aabb.corners().to_vec())
                .unwrap_or_default(),
        })
    }

    /// Bounding sphere of the referenced vertices
    pub fn bounding_sphere(&self) -> Result<BoundingSphere, ConeError> {
        Ok(BoundingSphere::from_points(&self.referenced_positions()?))
    }
}

/// Cone data produced for one cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterCone {
    /// Full-precision cone with anchors
    pub cone: AnchoredCone,
    /// Quantized cone for storage
    pub quantized: QuantizedCone,
    /// Sphere the quantized cone is tested against
    pub sphere: BoundingSphere,
}

impl ClusterCone {
    /// Record used by the quantized batch tests
    #[inline]
    pub fn record(&self) -> (QuantizedCone, BoundingSphere) {
        (self.quantized, self.sphere)
    }
}

/// Fit a cone to one cluster
///
/// An empty triangle list is an error; a cluster whose triangles all have
/// zero area yields a degenerate cone.
pub fn fit_cluster_cone(
    geometry: &ClusterGeometry<'_>,
    config: &ConeFitConfig,
) -> Result<ClusterCone, ConeError> {
    config.validate()?;
    fit_validated(geometry, config)
}

/// Cluster fit for a config that already passed `validate()`
fn fit_validated(
    geometry: &ClusterGeometry<'_>,
    config: &ConeFitConfig,
) -> Result<ClusterCone, ConeError> {
    if geometry.triangle_count() == 0 {
        tracing::error!("cluster has no triangles");
        return Err(ConeError::EmptyNormals);
    }

    let (normals, areas) = geometry.face_samples()?;
    let mut cone = AnchoredCone::new();
    if config.weighted {
        cone.add_normals_weighted_with(&normals, &areas, config)?;
    } else if !normals.is_empty() {
        cone.add_normals_with(&normals, config)?;
    }
    cone.add_anchors(&geometry.anchors(config.anchors)?)?;

    let quantized = QuantizedCone::import(&cone)?;
    let sphere = geometry.bounding_sphere()?;

    Ok(ClusterCone {
        cone,
        quantized,
        sphere,
    })
}

/// Fit cones to many clusters in parallel
///
/// Returns the first error encountered, if any.
pub fn fit_cluster_cones_parallel(
    clusters: &[ClusterGeometry<'_>],
    config: &ConeFitConfig,
) -> Result<Vec<ClusterCone>, ConeError> {
    config.validate()?;
    tracing::trace!(clusters = clusters.len(), "fitting cluster cones");
    clusters
        .par_iter()
        .map(|geometry| fit_validated(geometry, config))
        .collect()
}

/// Quantized backface test over many records (single-threaded)
#[inline]
pub fn backface_batch(records: &[(QuantizedCone, BoundingSphere)], view: Vec3) -> Vec<bool> {
    records.iter().map(|(q, s)| q.backface(s, view)).collect()
}

/// Quantized backface test over many records (parallel)
#[inline]
pub fn backface_batch_parallel(records: &[(QuantizedCone, BoundingSphere)], view: Vec3) -> Vec<bool> {
    records.par_iter().map(|(q, s)| q.backface(s, view)).collect()
}

/// Quantized frontface test over many records (parallel)
#[inline]
pub fn frontface_batch_parallel(records: &[(QuantizedCone, BoundingSphere)], view: Vec3) -> Vec<bool> {
    records.par_iter().map(|(q, s)| q.frontface(s, view)).collect()
}
