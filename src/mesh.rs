use std::collections::HashMap;

use glam::Vec3;

/// Orb radius matching the shipped scene.
pub const DEFAULT_RADIUS: f32 = 2.0;
/// Default midpoint-subdivision depth. Six levels give 81,920 triangles,
/// dense enough that per-vertex displacement reads as a smooth surface.
pub const DEFAULT_SUBDIVISIONS: u32 = 6;

/// GPU vertex: object-space position, unit normal, spherical UV.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Fixed-topology subdivided icosahedron. Static once constructed.
#[derive(Debug, Clone)]
pub struct OrbMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl OrbMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build a unit-sphere-like mesh: base icosahedron, recursive midpoint
/// subdivision with shared-edge dedup, every vertex projected to
/// `radius`. Normals point radially outward.
pub fn icosphere(radius: f32, subdivisions: u32) -> OrbMesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize() * radius)
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);

        let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (positions[a as usize] + positions[b as usize]) * 0.5;
                positions.push(mid.normalize() * radius);
                positions.len() as u32 - 1
            })
        };

        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut positions);
            let bc = midpoint(b, c, &mut positions);
            let ca = midpoint(c, a, &mut positions);
            next_faces.push([a, ab, ca]);
            next_faces.push([b, bc, ab]);
            next_faces.push([c, ca, bc]);
            next_faces.push([ab, bc, ca]);
        }

        faces = next_faces;
    }

    let vertices = positions
        .iter()
        .map(|&p| {
            let n = p.normalize();
            let u = 0.5 + n.z.atan2(n.x) / (2.0 * std::f32::consts::PI);
            let v = 0.5 - n.y.asin() / std::f32::consts::PI;
            Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: [u, v],
            }
        })
        .collect();

    let indices = faces.iter().flatten().copied().collect();

    OrbMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_has_canonical_counts() {
        let mesh = icosphere(2.0, 0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.triangle_count(), 20);
    }

    #[test]
    fn subdivision_quadruples_faces_and_dedups_vertices() {
        for level in 0..4 {
            let mesh = icosphere(1.0, level);
            let faces = 20 * 4_usize.pow(level);
            assert_eq!(mesh.triangle_count(), faces);
            // closed surface: V = 10 * 4^n + 2
            assert_eq!(mesh.vertices.len(), 10 * 4_usize.pow(level) + 2);
        }
    }

    #[test]
    fn every_vertex_sits_on_the_sphere() {
        let radius = 2.0;
        let mesh = icosphere(radius, 3);
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - radius).abs() < 1e-4, "vertex off sphere: {}", len);
        }
    }

    #[test]
    fn normals_are_unit_and_radial() {
        let mesh = icosphere(2.0, 2);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            let p = Vec3::from_array(v.position).normalize();
            assert!(n.dot(p) > 0.9999);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let mesh = icosphere(2.0, 2);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}
