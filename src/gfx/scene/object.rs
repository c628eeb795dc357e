use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::gfx::{
    geometry::GeometryData,
    resources::material::{Material, ObjectUniform},
};
use crate::wgpu_utils::binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc};

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::new(vertices, indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

pub struct ObjectGpuResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    pub material: Material,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            transform: Matrix4::identity(),
            material: Material::default(),
            visible: true,
            gpu_resources: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Translation component of the current transform.
    pub fn translation(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    /// Builds the transform as T * Ry * Rx * S.
    ///
    /// `tilt_x` is applied first so a ring lying in the XY plane is laid into the
    /// orbital plane before it spins about the vertical axis.
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        rotation_y: Rad<f32>,
        tilt_x: Rad<f32>,
        scale: f32,
    ) {
        let t = Matrix4::from_translation(translation);
        let ry = Matrix4::from_angle_y(rotation_y);
        let rx = Matrix4::from_angle_x(tilt_x);
        let s = Matrix4::from_scale(scale);
        self.transform = t * ry * rx * s; // Order matters
    }

    /// Uploads transform and material if GPU resources exist
    pub fn update_transform(&self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let uniform = ObjectUniform::new(self.transform, &self.material);
            queue.write_buffer(&gpu_resources.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let uniform = ObjectUniform::new(self.transform, &self.material);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Object Uniform: {}", self.name)),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform_buffer.as_entire_binding())
            .create(device, &format!("Object Bind Group: {}", self.name));

        log::debug!("GPU buffers created for object '{}'", self.name);
        self.gpu_resources = Some(ObjectGpuResources {
            uniform_buffer,
            bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_sphere;
    use approx::assert_relative_eq;
    use cgmath::{Vector4, Zero};

    #[test]
    fn trs_places_scaled_sphere_at_translation() {
        let mut object = Object::new("earth", vec![Mesh::from_geometry(&generate_sphere(8, 4))]);
        object.set_transform_trs(Vector3::new(2915.0, 0.0, 0.0), Rad(0.3), Rad(0.0), 15.0);
        assert_eq!(object.translation(), Vector3::new(2915.0, 0.0, 0.0));

        // Top of the unit sphere ends up `scale` above the center.
        let top = object.transform * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(top.y, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn ring_tilt_lays_the_disc_flat() {
        let mut object = Object::new("rings", Vec::new());
        object.set_transform_trs(
            Vector3::zero(),
            Rad(0.0),
            Rad(std::f32::consts::FRAC_PI_2),
            1.0,
        );
        // A point on the ring's +Y edge swings into the horizontal plane.
        let edge = object.transform * Vector4::new(0.0, 200.0, 0.0, 1.0);
        assert_relative_eq!(edge.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(edge.z.abs(), 200.0, epsilon = 1e-3);
    }

    #[test]
    fn mesh_counts_follow_geometry() {
        let mesh = Mesh::from_geometry(&generate_sphere(8, 4));
        assert_eq!(mesh.vertex_count(), 9 * 5);
        assert_eq!(mesh.index_count(), 8 * 4 * 6);
    }
}
