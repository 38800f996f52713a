use glam::Vec3;
use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

use crate::config::BodyKind;
use crate::shading::MeshKind;

/// Vertex layout shared by every pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
}

/// CPU-side geometry before upload
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }
}

/// Flat ground quad at y = 0
pub fn plane(half_extent: f32) -> Geometry {
    let mut geo = Geometry::default();
    let h = half_extent;
    let up = Vec3::Y;

    let a = geo.vertex(Vec3::new(-h, 0.0, -h), up);
    let b = geo.vertex(Vec3::new(h, 0.0, -h), up);
    let c = geo.vertex(Vec3::new(-h, 0.0, h), up);
    let d = geo.vertex(Vec3::new(h, 0.0, h), up);

    geo.indices.extend_from_slice(&[a, c, b, b, c, d]);
    geo
}

/// Axis-aligned box with flat face normals
pub fn cuboid(half_extents: Vec3) -> Geometry {
    let mut geo = Geometry::default();
    let h = half_extents;

    // (normal, two in-plane tangents) per face
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
        (Vec3::Z, Vec3::Y, Vec3::NEG_X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    for (normal, u, v) in faces {
        let center = normal * h;
        let us = u * h;
        let vs = v * h;

        let a = geo.vertex(center - us - vs, normal);
        let b = geo.vertex(center - us + vs, normal);
        let c = geo.vertex(center + us - vs, normal);
        let d = geo.vertex(center + us + vs, normal);

        geo.indices.extend_from_slice(&[a, b, c, c, b, d]);
    }
    geo
}

/// UV ellipsoid; `radii` equal on all axes gives a sphere. Normals use the
/// analytic ellipsoid gradient so squashed bodies still shade correctly.
pub fn ellipsoid(radii: Vec3, rings: u32, segments: u32) -> Geometry {
    let mut geo = Geometry::default();

    for ring in 0..=rings {
        let theta = PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            let phi = TAU * seg as f32 / segments as f32;

            let unit = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let position = unit * radii;
            let normal = (unit / radii).normalize();

            let _ = geo.vertex(position, normal);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let i0 = ring * stride + seg;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            geo.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }
    geo
}

pub fn sphere(radius: f32, rings: u32, segments: u32) -> Geometry {
    ellipsoid(Vec3::splat(radius), rings, segments)
}

/// Capped cylinder along Y, centered on the origin
pub fn cylinder(radius: f32, half_height: f32, segments: u32) -> Geometry {
    let mut geo = Geometry::default();

    // Side wall with radial normals
    for seg in 0..=segments {
        let phi = TAU * seg as f32 / segments as f32;
        let radial = Vec3::new(phi.cos(), 0.0, phi.sin());
        let _ = geo.vertex(radial * radius + Vec3::Y * half_height, radial);
        let _ = geo.vertex(radial * radius - Vec3::Y * half_height, radial);
    }
    for seg in 0..segments {
        let i0 = seg * 2;
        geo.indices
            .extend_from_slice(&[i0, i0 + 1, i0 + 2, i0 + 2, i0 + 1, i0 + 3]);
    }

    // Caps with axial normals
    for (y, normal) in [(half_height, Vec3::Y), (-half_height, Vec3::NEG_Y)] {
        let center = geo.vertex(Vec3::new(0.0, y, 0.0), normal);
        let first = geo.vertices.len() as u32;
        for seg in 0..=segments {
            let phi = TAU * seg as f32 / segments as f32;
            let _ = geo.vertex(Vec3::new(phi.cos() * radius, y, phi.sin() * radius), normal);
        }
        for seg in 0..segments {
            if normal.y > 0.0 {
                geo.indices
                    .extend_from_slice(&[center, first + seg + 1, first + seg]);
            } else {
                geo.indices
                    .extend_from_slice(&[center, first + seg, first + seg + 1]);
            }
        }
    }
    geo
}

/// Geometry uploaded to the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// Every mesh the scene can ask for, keyed by [`MeshKind`]
pub struct MeshSet {
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl MeshSet {
    pub fn new(device: &wgpu::Device, body: BodyKind, world_half_extent: f32) -> Self {
        let craft = match body {
            BodyKind::Saucer => ellipsoid(Vec3::new(3.0, 1.0, 3.0), 16, 24),
            BodyKind::Fuselage => cuboid(Vec3::new(1.5, 1.2, 3.0)),
        };

        let entries = [
            (MeshKind::Ground, plane(world_half_extent)),
            (MeshKind::SunMarker, sphere(2.0, 16, 24)),
            (MeshKind::Craft, craft),
            (MeshKind::LampMarker, sphere(1.0, 12, 18)),
            (MeshKind::Cube, cuboid(Vec3::splat(5.0))),
            (MeshKind::Cylinder, cylinder(3.0, 3.0, 24)),
            (MeshKind::Sphere, sphere(4.5, 16, 24)),
        ];

        let meshes = entries
            .into_iter()
            .map(|(kind, geo)| (kind, GpuMesh::upload(device, &format!("{kind:?}"), &geo)))
            .collect();

        Self { meshes }
    }

    pub fn get(&self, kind: MeshKind) -> &GpuMesh {
        // Every MeshKind is inserted in new(); this cannot miss
        &self.meshes[&kind]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_is_two_triangles() {
        let geo = plane(50.0);
        assert_eq!(geo.vertices.len(), 4);
        assert_eq!(geo.indices.len(), 6);
        assert!(geo.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn cuboid_has_flat_faces() {
        let geo = cuboid(Vec3::splat(1.0));
        assert_eq!(geo.vertices.len(), 24);
        assert_eq!(geo.indices.len(), 36);
    }

    #[test]
    fn sphere_normals_are_radial() {
        let geo = sphere(4.5, 8, 12);
        for v in &geo.vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!((p.normalize().dot(n) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ellipsoid_normals_are_unit_length() {
        let geo = ellipsoid(Vec3::new(3.0, 1.0, 3.0), 8, 12);
        for v in &geo.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        for geo in [
            plane(10.0),
            cuboid(Vec3::ONE),
            sphere(1.0, 6, 8),
            cylinder(1.0, 2.0, 12),
        ] {
            let count = geo.vertices.len() as u32;
            assert!(geo.indices.iter().all(|&i| i < count));
        }
    }
}
