//! Common test helpers for normal-cone integration tests
//!
//! Author: Moroya Sakamoto

use normal_cone::prelude::*;

// ============================================================================
// Standard normal sets
// ============================================================================

#[allow(dead_code)]
const GOLDEN_ANGLE: f32 = 2.399_963;

/// `count` unit normals spread evenly over the cap of half-angle `max_angle` around +Z
#[allow(dead_code)]
pub fn cap_normals(max_angle: f32, count: usize) -> Vec<Vec3> {
    let cos_max = max_angle.cos();
    (0..count)
        .map(|i| {
            let cos_t = 1.0 - (i as f32 + 0.5) / count as f32 * (1.0 - cos_max);
            let sin_t = (1.0 - cos_t * cos_t).max(0.0).sqrt();
            let phi = i as f32 * GOLDEN_ANGLE;
            Vec3::new(sin_t * phi.cos(), sin_t * phi.sin(), cos_t)
        })
        .collect()
}

/// Corners of the cube [-1, 1]^3
#[allow(dead_code)]
pub fn cube_corners() -> Vec<Vec3> {
    Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)).corners().to_vec()
}

/// Viewpoints on a sphere of radius `distance` around the origin
#[allow(dead_code)]
pub fn view_ring(distance: f32, count: usize) -> Vec<Vec3> {
    cap_normals(std::f32::consts::PI, count)
        .into_iter()
        .map(|d| d * distance)
        .collect()
}

// ============================================================================
// Standard meshes
// ============================================================================

/// Triangulated height field z = `bump * (x^2 + y^2)` over [-1, 1]^2
#[allow(dead_code)]
pub fn bumpy_patch(resolution: u32, bump: f32) -> (Vec<Vec3>, Vec<u32>) {
    let n = resolution + 1;
    let mut positions = Vec::with_capacity((n * n) as usize);
    for j in 0..n {
        for i in 0..n {
            let x = -1.0 + 2.0 * i as f32 / resolution as f32;
            let y = -1.0 + 2.0 * j as f32 / resolution as f32;
            positions.push(Vec3::new(x, y, bump * (x * x + y * y)));
        }
    }

    let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
    for j in 0..resolution {
        for i in 0..resolution {
            let a = j * n + i;
            indices.extend_from_slice(&[a, a + 1, a + n + 1, a, a + n + 1, a + n]);
        }
    }
    (positions, indices)
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f32 values are close within tolerance
#[allow(dead_code)]
pub fn assert_close(a: f32, b: f32, tol: f32, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Assert two vectors are close within tolerance
#[allow(dead_code)]
pub fn assert_vec_close(a: Vec3, b: Vec3, tol: f32, msg: &str) {
    assert!(
        (a - b).length() < tol,
        "{}: {:?} vs {:?} (dist={}, tol={})",
        msg,
        a,
        b,
        (a - b).length(),
        tol
    );
}
