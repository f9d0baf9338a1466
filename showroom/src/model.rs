//! CPU-side model data produced by the loader.

use crate::bounds::Aabb;
use glam::Vec3;

/// One triangle mesh with node transforms already baked to world space.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Base color from the material, RGBA.
    pub base_color: [f32; 4],
}

/// A fully decoded model, ready for GPU upload.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
}

impl ModelData {
    /// World-space bounding box over all meshes. `None` when the model
    /// carries no vertices at all.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        for mesh in &self.meshes {
            let Some(b) = Aabb::from_points(mesh.positions.iter().map(|p| Vec3::from(*p))) else {
                continue;
            };
            bounds = Some(match bounds {
                Some(acc) => acc.union(&b),
                None => b,
            });
        }
        bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(positions: Vec<[f32; 3]>) -> MeshData {
        let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
        let indices = (0..positions.len() as u32).collect();
        MeshData {
            name: "test".to_string(),
            positions,
            normals,
            indices,
            base_color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn test_bounds_spans_all_meshes() {
        let model = ModelData {
            meshes: vec![
                mesh(vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]),
                mesh(vec![[-4.0, 1.0, 0.0]]),
            ],
        };
        let bounds = model.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-4.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_bounds_empty_model() {
        assert!(ModelData::default().bounds().is_none());
    }
}
