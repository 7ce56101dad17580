//! Core geometric types for cluster culling
//!
//! Bounding volumes used to stand in for a cluster when its anchors are
//! not stored: an axis-aligned box for anchor generation and a bounding
//! sphere for the quantized cone tests.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Tight box around a point set, `None` when empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut aabb = Aabb::new(first, first);
        for &p in rest {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The 8 corners, bit i of the index selecting max on axis i
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }

    /// Check if point is inside
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Bounding sphere of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Sphere center
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        BoundingSphere {
            center: Vec3::ZERO,
            radius: 0.0,
        }
    }
}

impl BoundingSphere {
    /// Create a new sphere
    #[inline]
    pub fn new(center: Vec3, radius: f32) -> Self {
        BoundingSphere { center, radius }
    }

    /// Sphere centered on the AABB of `points`, radius reaching the farthest point
    ///
    /// An empty set yields a zero sphere at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(aabb) = Aabb::from_points(points) else {
            return BoundingSphere::default();
        };
        let center = aabb.center();
        let radius = points
            .iter()
            .map(|&p| p.distance(center))
            .fold(0.0f32, f32::max);
        BoundingSphere { center, radius }
    }

    /// Center accessor
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius accessor
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check if point lies inside or on the sphere
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(0.0, 0.0, -3.0),
        ])
        .unwrap();

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_corners() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let corners = aabb.corners();

        assert_eq!(corners[0], Vec3::ZERO);
        assert_eq!(corners[7], Vec3::ONE);
        assert_eq!(corners[4], Vec3::new(0.0, 0.0, 1.0));
        for c in corners {
            assert!(aabb.contains(c));
        }
    }

    #[test]
    fn test_sphere_from_points() {
        let points = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];

        let sphere = BoundingSphere::from_points(&points);

        assert!((sphere.center - Vec3::ZERO).length() < 1e-6);
        assert!((sphere.radius - 3.0f32.sqrt()).abs() < 1e-5);
        for p in points {
            assert!(sphere.contains(p * 0.999));
        }
    }

    #[test]
    fn test_sphere_from_empty() {
        let sphere = BoundingSphere::from_points(&[]);
        assert_eq!(sphere, BoundingSphere::default());
    }
}
