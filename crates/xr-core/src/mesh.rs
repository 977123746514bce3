use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, counter-clockwise when seen from outside.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// `segments` sets the number of stacks; slices are twice that.
pub fn sphere(diameter: f32, segments: u32) -> Mesh {
    let stacks = segments.max(2);
    let slices = (segments * 2).max(3);
    let radius = diameter * 0.5;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for stack in 0..=stacks {
        let phi = stack as f32 / stacks as f32 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for slice in 0..=slices {
            let theta = slice as f32 / slices as f32 * std::f32::consts::TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let n = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
            });
        }
    }

    let ring = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let i0 = stack * ring + slice;
            let i1 = i0 + 1;
            let i2 = (stack + 1) * ring + slice;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }
    Mesh { vertices, indices }
}

pub fn ground_disc(diameter: f32, tessellation: u32) -> Mesh {
    let n = tessellation.max(3);
    let radius = diameter * 0.5;
    let up = [0.0, 1.0, 0.0];
    let mut vertices = Vec::with_capacity(n as usize + 1);
    vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: up,
    });
    for i in 0..n {
        let a = i as f32 / n as f32 * std::f32::consts::TAU;
        vertices.push(Vertex {
            position: [radius * a.cos(), 0.0, radius * a.sin()],
            normal: up,
        });
    }
    let mut indices = Vec::with_capacity(n as usize * 3);
    for i in 0..n {
        let a = 1 + i;
        let b = 1 + (i + 1) % n;
        indices.extend_from_slice(&[0, b, a]);
    }
    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = sphere(0.1, 16);
        assert_eq!(mesh.vertices.len(), 17 * 33);
        assert_eq!(mesh.triangle_count(), 16 * 32 * 2);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 0.05).abs() < 1e-5);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn sphere_winding_faces_outward() {
        let mesh = sphere(2.0, 8);
        // pick a triangle from the middle band to avoid degenerate pole quads
        let base = (4 * 16 * 6) as usize;
        let tri: Vec<Vec3> = mesh.indices[base..base + 3]
            .iter()
            .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
            .collect();
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        assert!(normal.dot(centroid) > 0.0);
    }

    #[test]
    fn ground_disc_faces_up() {
        let mesh = ground_disc(15.0, 32);
        assert_eq!(mesh.vertices.len(), 33);
        assert_eq!(mesh.triangle_count(), 32);
        let tri: Vec<Vec3> = mesh.indices[0..3]
            .iter()
            .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
            .collect();
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        assert!(normal.y > 0.0);
    }
}
