use crate::core::geometry::Vertex;
use crate::error::{Error, Result};
use crate::scene::mesh::Mesh;
use crate::scene::model::Model;
use log::{info, warn};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use std::path::Path;

/// Model formats this viewer can hand to a loader crate.
///
/// Parsing itself is delegated: OBJ to `tobj`, glTF/GLB to `gltf`. Anything
/// else fails here, before any bytes are read, and the fit engine is never
/// invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Gltf,
    Glb,
}

impl ModelFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "obj" => Ok(Self::Obj),
            "gltf" => Ok(Self::Gltf),
            "glb" => Ok(Self::Glb),
            "" => Err(Error::UnsupportedFormat(format!(
                "'{}' has no file extension",
                path.display()
            ))),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Loads a model file, dispatching on the detected format.
pub fn load_model(path: &Path) -> Result<Model> {
    let format = ModelFormat::from_path(path)?;
    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        )));
    }

    info!("Loading {:?} model: {}", format, path.display());
    let model = match format {
        ModelFormat::Obj => load_obj(path),
        ModelFormat::Gltf | ModelFormat::Glb => load_gltf(path),
    }?;

    info!(
        "Loaded '{}': {} meshes, {} vertices, {} triangles",
        model.name,
        model.meshes.len(),
        model.vertex_count(),
        model.triangle_count()
    );
    Ok(model)
}

fn model_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_string()
}

/// OBJ loading via tobj. Sub-meshes are kept separate; missing normals and
/// texture coordinates get defaults.
fn load_obj(path: &Path) -> Result<Model> {
    let load_options = tobj::LoadOptions {
        triangulate: true,
        // Unifies indices for position/normal/UV.
        single_index: true,
        ..Default::default()
    };

    let (obj_models, _materials) = tobj::load_obj(path, &load_options)
        .map_err(|e| Error::ModelParse(format!("obj: {e}")))?;

    let mut meshes = Vec::with_capacity(obj_models.len());
    for obj_model in obj_models {
        let mesh = &obj_model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();
        if !has_normals {
            warn!(
                "Mesh '{}' has no normals; defaulting to (0, 1, 0)",
                obj_model.name
            );
        }

        let mut vertices = Vec::with_capacity(num_vertices);
        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );
            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::y()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };
            vertices.push(Vertex::new(position, normal, texcoord));
        }

        meshes.push(Mesh::new(vertices, mesh.indices.clone()));
    }

    Ok(Model::new(model_name(path), meshes))
}

/// glTF/GLB loading via the gltf crate. The default scene's node hierarchy
/// is walked and each node's world transform is baked into its vertices, so
/// downstream code sees flat local-space geometry.
fn load_gltf(path: &Path) -> Result<Model> {
    let (document, buffers, _images) =
        gltf::import(path).map_err(|e| Error::ModelParse(format!("gltf: {e}")))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| Error::ModelParse("gltf: file contains no scene".to_string()))?;

    let mut meshes = Vec::new();
    for node in scene.nodes() {
        collect_node_meshes(&node, &buffers, &Matrix4::identity(), &mut meshes)?;
    }

    Ok(Model::new(model_name(path), meshes))
}

/// Rejects indices that point past the vertex array. tobj's single-index
/// path guarantees this already; a glTF index accessor can hold anything.
fn check_indices(indices: &[u32], vertex_count: usize) -> Result<()> {
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(bad) => Err(Error::ModelParse(format!(
            "gltf: index {bad} out of range for {vertex_count} vertices"
        ))),
        None => Ok(()),
    }
}

fn collect_node_meshes(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: &Matrix4<f32>,
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    // gltf hands out a column-major array, which is nalgebra's layout too.
    let world = parent * Matrix4::from(node.transform().matrix());

    if let Some(gltf_mesh) = node.mesh() {
        for primitive in gltf_mesh.primitives() {
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));

            let Some(positions) = reader.read_positions() else {
                warn!("Skipping glTF primitive without positions");
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
            let texcoords: Option<Vec<[f32; 2]>> =
                reader.read_tex_coords(0).map(|t| t.into_f32().collect());

            let mut vertices = Vec::with_capacity(positions.len());
            for (i, p) in positions.iter().enumerate() {
                let position = world.transform_point(&Point3::from(*p));
                let normal = normals
                    .as_ref()
                    .map(|n| {
                        let v = world.transform_vector(&Vector3::from(n[i]));
                        let norm = v.norm();
                        if norm > 1e-6 { v / norm } else { Vector3::y() }
                    })
                    .unwrap_or_else(Vector3::y);
                let texcoord = texcoords
                    .as_ref()
                    .map(|t| Vector2::from(t[i]))
                    .unwrap_or_else(Vector2::zeros);
                vertices.push(Vertex::new(position, normal, texcoord));
            }

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|i| i.into_u32().collect())
                .unwrap_or_else(|| (0..vertices.len() as u32).collect());
            check_indices(&indices, vertices.len())?;

            meshes.push(Mesh::new(vertices, indices));
        }
    }

    for child in node.children() {
        collect_node_meshes(&child, buffers, &world, meshes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection() {
        assert_eq!(
            ModelFormat::from_path(Path::new("cow.obj")).unwrap(),
            ModelFormat::Obj
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("duck.GLB")).unwrap(),
            ModelFormat::Glb
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("scene.gltf")).unwrap(),
            ModelFormat::Gltf
        );
    }

    #[test]
    fn fbx_and_unknown_extensions_are_unsupported() {
        assert!(matches!(
            ModelFormat::from_path(Path::new("rig.fbx")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ModelFormat::from_path(Path::new("notes.txt")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ModelFormat::from_path(Path::new("no_extension")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn unsupported_format_beats_missing_file() {
        // Format detection runs before any I/O.
        let err = load_model(Path::new("/nonexistent/dir/model.fbx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert!(check_indices(&[0, 1, 2], 3).is_ok());
        assert!(check_indices(&[], 0).is_ok());

        let err = check_indices(&[0, 1, 5], 3).unwrap_err();
        assert!(matches!(err, Error::ModelParse(_)));
    }

    #[test]
    fn missing_obj_file_is_io_error() {
        let err = load_model(Path::new("/nonexistent/dir/model.obj")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
