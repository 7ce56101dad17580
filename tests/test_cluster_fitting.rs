//! Integration tests: fitting cones straight from triangle clusters
//!
//! Author: Moroya Sakamoto

mod common;

use common::*;
use normal_cone::prelude::*;

#[test]
fn flat_patch_faces_up() {
    let (positions, indices) = bumpy_patch(8, 0.0);
    let geometry = ClusterGeometry::new(&positions, &indices);
    let fitted = fit_cluster_cone(&geometry, &ConeFitConfig::default()).unwrap();

    assert_vec_close(fitted.cone.axis(), Vec3::Z, 1e-5, "axis");
    assert_close(fitted.sphere.radius, 2f32.sqrt(), 1e-5, "radius");

    let above = Vec3::new(0.2, -0.3, 15.0);
    let below = Vec3::new(0.2, -0.3, -15.0);
    assert!(fitted.cone.frontface(above));
    assert!(fitted.cone.backface(below));
    assert!(fitted.quantized.frontface(&fitted.sphere, above));
    assert!(fitted.quantized.backface(&fitted.sphere, below));
}

#[test]
fn curvature_widens_cone() {
    let (flat_p, flat_i) = bumpy_patch(8, 0.0);
    let (bump_p, bump_i) = bumpy_patch(8, 0.3);
    let config = ConeFitConfig::conservative();

    let flat = fit_cluster_cone(&ClusterGeometry::new(&flat_p, &flat_i), &config).unwrap();
    let bumpy = fit_cluster_cone(&ClusterGeometry::new(&bump_p, &bump_i), &config).unwrap();

    let flat_spread = flat.cone.normal_spread().unwrap();
    let bumpy_spread = bumpy.cone.normal_spread().unwrap();
    assert!(bumpy_spread > flat_spread);
    assert_vec_close(bumpy.cone.axis(), Vec3::Z, 1e-3, "axis");
}

#[test]
fn conservative_cone_covers_every_face() {
    let (positions, indices) = bumpy_patch(10, 0.25);
    let geometry = ClusterGeometry::new(&positions, &indices);
    let fitted = fit_cluster_cone(&geometry, &ConeFitConfig::conservative()).unwrap();
    let (normals, _) = geometry.face_samples().unwrap();

    let spread = fitted.cone.normal_spread().unwrap();
    let axis = fitted.cone.axis();
    for n in normals {
        assert!(n.angle_between(axis) <= spread + 1e-4);
    }
}

#[test]
fn vertex_anchors_come_from_mesh() {
    let (positions, indices) = bumpy_patch(4, 0.5);
    let geometry = ClusterGeometry::new(&positions, &indices);
    let config = ConeFitConfig {
        anchors: AnchorSource::Vertices,
        ..ConeFitConfig::conservative()
    };
    let fitted = fit_cluster_cone(&geometry, &config).unwrap();

    assert!(positions.contains(&fitted.cone.front_anchor()));
    assert!(positions.contains(&fitted.cone.back_anchor()));
    // Bowl opens upward: lowest vertex is the center, highest is a corner
    assert_eq!(fitted.cone.front_anchor().z, 0.0);
    assert_close(fitted.cone.back_anchor().z, 1.0, 1e-5, "back anchor height");
}

#[test]
fn parallel_fit_matches_serial() {
    let patches: Vec<_> = (0..12).map(|i| bumpy_patch(6, i as f32 * 0.05)).collect();
    let clusters: Vec<_> = patches
        .iter()
        .map(|(p, i)| ClusterGeometry::new(p, i))
        .collect();
    let config = ConeFitConfig::tight();

    let parallel = fit_cluster_cones_parallel(&clusters, &config).unwrap();
    let serial: Vec<_> = clusters
        .iter()
        .map(|c| fit_cluster_cone(c, &config).unwrap())
        .collect();
    assert_eq!(parallel, serial);

    let records: Vec<_> = parallel.iter().map(ClusterCone::record).collect();
    for view in view_ring(30.0, 32) {
        assert_eq!(backface_batch(&records, view), backface_batch_parallel(&records, view));
        let fronts = frontface_batch_parallel(&records, view);
        for (record, front) in records.iter().zip(fronts) {
            assert_eq!(record.0.frontface(&record.1, view), front);
        }
    }
}

#[test]
fn parallel_fit_reports_bad_cluster() {
    let (positions, indices) = bumpy_patch(2, 0.0);
    let bad = [0u32, 1, 99];
    let clusters = [
        ClusterGeometry::new(&positions, &indices),
        ClusterGeometry::new(&positions, &bad),
    ];

    let result = fit_cluster_cones_parallel(&clusters, &ConeFitConfig::default());
    assert_eq!(
        result,
        Err(ConeError::IndexOutOfRange {
            index: 99,
            vertex_count: positions.len()
        })
    );
}
