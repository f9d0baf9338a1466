//! Background fetch-and-parse worker for the model asset.
//!
//! One thread per load request. Results flow back to the viewer over an
//! mpsc channel as `LoadEvent`s; the worker is fire-and-forget, and a
//! superseded load is silenced simply by dropping its receiver.

use std::io::Read;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use glam::{Mat4, Vec3};
use showroom::{LoadEvent, MeshData, ModelData};
use thiserror::Error;

const FETCH_CHUNK: usize = 64 * 1024;
/// Largest buffer preallocation taken from an advertised content length;
/// anything beyond this grows on demand.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Parse(String),

    #[error("No meshes found in model")]
    EmptyModel,
}

/// Spawn the worker for one load request.
pub fn spawn_load(source: String, tx: Sender<LoadEvent>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let event = match fetch_and_parse(&source, &tx) {
            Ok(model) => LoadEvent::Loaded(model),
            Err(e) => LoadEvent::Failed(e.to_string()),
        };
        // Send fails only when the viewer dropped this load; nothing to do.
        let _ = tx.send(event);
    })
}

fn fetch_and_parse(source: &str, tx: &Sender<LoadEvent>) -> Result<ModelData, FetchError> {
    let bytes = if Path::new(source).exists() {
        log::info!("reading model from {source}");
        std::fs::read(source)?
    } else {
        download(source, tx)?
    };
    let model = parse_model(&bytes)?;
    if model.meshes.is_empty() {
        return Err(FetchError::EmptyModel);
    }
    Ok(model)
}

/// Stream an HTTP GET, reporting progress per chunk against the advertised
/// content length (0 when the server sent none).
fn download(url: &str, tx: &Sender<LoadEvent>) -> Result<Vec<u8>, FetchError> {
    log::info!("downloading model from {url}");
    let mut response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let total = response.content_length().unwrap_or(0);
    let mut bytes = Vec::with_capacity(prealloc_capacity(total));
    let mut chunk = vec![0u8; FETCH_CHUNK];
    loop {
        let n = response.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        let _ = tx.send(LoadEvent::Progress {
            loaded: bytes.len() as u64,
            total,
        });
    }

    log::info!("downloaded {} bytes", bytes.len());
    Ok(bytes)
}

/// Parse a GLB/glTF blob, baking node transforms into world-space vertices.
fn parse_model(bytes: &[u8]) -> Result<ModelData, FetchError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(FetchError::EmptyModel)?;

    let mut model = ModelData::default();
    for node in scene.nodes() {
        collect_meshes(&node, Mat4::IDENTITY, &buffers, &mut model);
    }
    Ok(model)
}

fn collect_meshes(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut ModelData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions = bake_positions(world, positions);

            let normals = match reader.read_normals() {
                Some(normals) => bake_normals(world, normals),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            log::debug!(
                "mesh {:?}: {} vertices, {} indices",
                mesh.name().unwrap_or("unnamed"),
                positions.len(),
                indices.len()
            );

            out.meshes.push(MeshData {
                name: mesh.name().unwrap_or("unnamed").to_string(),
                positions,
                normals,
                indices,
                base_color,
            });
        }
    }

    for child in node.children() {
        collect_meshes(&child, world, buffers, out);
    }
}

fn prealloc_capacity(total: u64) -> usize {
    total.min(MAX_PREALLOC) as usize
}

/// Bake a node's accumulated world transform into vertex positions.
fn bake_positions(world: Mat4, positions: impl IntoIterator<Item = [f32; 3]>) -> Vec<[f32; 3]> {
    positions
        .into_iter()
        .map(|p| world.transform_point3(Vec3::from(p)).to_array())
        .collect()
}

/// Bake the matching normal transform. Normals need the inverse-transpose
/// to survive non-uniform scale.
fn bake_normals(world: Mat4, normals: impl IntoIterator<Item = [f32; 3]>) -> Vec<[f32; 3]> {
    let normal_mat = world.inverse().transpose();
    normals
        .into_iter()
        .map(|n| {
            normal_mat
                .transform_vector3(Vec3::from(n))
                .normalize_or_zero()
                .to_array()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn assert_vec3_eq(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_bake_positions_accumulates_parent_chain() {
        // Parent lifts by one unit; the child scales by two and shifts in x.
        let parent = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let local = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
        );
        let world = parent * local;
        let baked = bake_positions(world, [[1.0, 0.0, 0.0]]);
        assert_vec3_eq(baked[0], [3.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bake_normals_follow_rotation() {
        let world = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let baked = bake_normals(world, [[1.0, 0.0, 0.0]]);
        assert_vec3_eq(baked[0], [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_bake_normals_non_uniform_scale() {
        // Scaling x by two tilts a 45-degree normal to (1,2,0)/sqrt(5);
        // carrying the plain transform over would leave it at 45 degrees,
        // no longer perpendicular to the stretched surface.
        let world = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let baked = bake_normals(world, [[s, s, 0.0]]);
        let root5 = 5.0f32.sqrt();
        assert_vec3_eq(baked[0], [1.0 / root5, 2.0 / root5, 0.0]);

        let [x, y, z] = baked[0];
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_prealloc_capped_by_limit() {
        assert_eq!(prealloc_capacity(1024), 1024);
        assert_eq!(prealloc_capacity(u64::MAX), MAX_PREALLOC as usize);
    }
}
