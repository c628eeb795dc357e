use crate::gfx::{camera::camera_utils::CameraManager, resources::ObjectBindings};

use super::object::Object;

/// Main scene containing objects and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Adds an object and returns its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|obj| obj.name == name)
    }

    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Creates GPU resources for objects that don't have them yet.
    ///
    /// Safe to call every frame; objects added after startup get uploaded on
    /// their first frame.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, bindings: &ObjectBindings) {
        for object in self.objects.iter_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device, bindings.layout());
            }
        }
    }

    /// Syncs every visible object's transform and material to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in self.objects.iter().filter(|obj| obj.visible) {
            object.update_transform(queue);
        }
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        let visible = self.objects.iter().filter(|obj| obj.visible);
        let (total_triangles, total_vertices) = visible
            .flat_map(|obj| obj.meshes.iter())
            .fold((0, 0), |(tris, verts), mesh| {
                (tris + mesh.index_count() / 3, verts + mesh.vertex_count())
            });

        SceneStatistics {
            object_count: self.objects.len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera},
        geometry::{generate_ring, generate_sphere},
        scene::object::Mesh,
    };
    use cgmath::Zero;

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(7000.0, 0.0, 0.0, cgmath::Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::default()))
    }

    #[test]
    fn objects_are_found_by_name() {
        let mut scene = empty_scene();
        let sun = scene.add_object(Object::new("sun", Vec::new()));
        let earth = scene.add_object(Object::new("earth", Vec::new()));
        assert_eq!((sun, earth), (0, 1));
        assert_eq!(scene.find_object("earth"), Some(1));
        assert_eq!(scene.find_object("pluto"), None);
    }

    #[test]
    fn statistics_skip_hidden_objects() {
        let mut scene = empty_scene();
        scene.add_object(Object::new("sphere", vec![Mesh::from_geometry(&generate_sphere(8, 4))]));
        let ring = scene.add_object(Object::new(
            "ring",
            vec![Mesh::from_geometry(&generate_ring(1.0, 2.0, 16))],
        ));

        let all = scene.get_statistics();
        assert_eq!(all.object_count, 2);
        assert_eq!(all.total_triangles, 8 * 4 * 2 + 16 * 2);

        if let Some(obj) = scene.get_object_mut(ring) {
            obj.visible = false;
        }
        assert_eq!(scene.get_statistics().total_triangles, 8 * 4 * 2);
    }
}
