use std::collections::HashMap;

use glam::Vec3;
use noise_orb::mesh::{icosphere, DEFAULT_RADIUS, DEFAULT_SUBDIVISIONS};
use noise_orb::noise::{elevation, ELEVATION_AMPLITUDE};

#[cfg(test)]
mod mesh_tests {
    use super::*;

    #[test]
    fn test_default_mesh_matches_shipped_density() {
        let mesh = icosphere(DEFAULT_RADIUS, DEFAULT_SUBDIVISIONS);
        assert_eq!(mesh.triangle_count(), 81_920);
        assert_eq!(mesh.vertices.len(), 40_962);
    }

    #[test]
    fn test_surface_is_a_closed_manifold() {
        // Every edge of a watertight sphere is shared by exactly two faces
        let mesh = icosphere(2.0, 3);
        let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in mesh.indices.chunks(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *edge_faces.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        assert!(edge_faces.values().all(|&n| n == 2));

        // Euler characteristic of a sphere: V - E + F = 2
        let v = mesh.vertices.len() as i64;
        let e = edge_faces.len() as i64;
        let f = mesh.triangle_count() as i64;
        assert_eq!(v - e + f, 2);
    }

    #[test]
    fn test_no_degenerate_triangles() {
        let mesh = icosphere(2.0, 3);
        for tri in mesh.indices.chunks(3) {
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
    }

    #[test]
    fn test_radius_scales_positions_not_topology() {
        let small = icosphere(1.0, 2);
        let large = icosphere(3.0, 2);
        assert_eq!(small.indices, large.indices);
        for (a, b) in small.vertices.iter().zip(&large.vertices) {
            let pa = Vec3::from_array(a.position);
            let pb = Vec3::from_array(b.position);
            assert!((pb - pa * 3.0).length() < 1e-4);
            let na = Vec3::from_array(a.normal);
            let nb = Vec3::from_array(b.normal);
            assert!((na - nb).length() < 1e-5);
        }
    }

    #[test]
    fn test_uvs_stay_in_unit_square() {
        let mesh = icosphere(2.0, 3);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]), "u = {}", v.uv[0]);
            assert!((0.0..=1.0).contains(&v.uv[1]), "v = {}", v.uv[1]);
        }
    }

    #[test]
    fn test_displaced_surface_stays_within_amplitude_shell() {
        // Mirrors the vertex stage: displaced = position + normal * elevation.
        // The displaced radius must stay inside [r - 0.3, r + 0.3].
        let radius = 2.0;
        let mesh = icosphere(radius, 3);
        for time in [0.0, 1.7, 42.0] {
            for v in &mesh.vertices {
                let p = Vec3::from_array(v.position);
                let n = Vec3::from_array(v.normal);
                let displaced = p + n * elevation(p, time);
                let len = displaced.length();
                assert!(
                    (len - radius).abs() <= ELEVATION_AMPLITUDE + 1e-4,
                    "displaced radius {} escapes the shell",
                    len
                );
            }
        }
    }
}
