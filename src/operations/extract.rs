use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::store::{GeometryStore, Mesh, MeshSelector};

/// Copies one mesh into a standalone single-mesh store.
///
/// The copy carries the mesh's name, one vertex per triangle corner and
/// triangles renumbered `(1, 2, 3), (4, 5, 6), ...`. Nothing in it aliases
/// the source store.
pub struct ExtractMesh<'a> {
    selector: MeshSelector<'a>,
}

impl<'a> ExtractMesh<'a> {
    /// Creates a new `ExtractMesh` operation.
    #[must_use]
    pub fn new(selector: impl Into<MeshSelector<'a>>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    /// Executes the extraction. Returns `Ok(None)` if the mesh does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references a vertex outside the pool.
    pub fn execute(&self, store: &GeometryStore) -> Result<Option<GeometryStore>> {
        let Some(index) = store.resolve(self.selector) else {
            return Ok(None);
        };
        let Some(data) = store.extract_mesh_data(MeshSelector::Index(index))? else {
            return Ok(None);
        };
        let name = store
            .mesh_by_index(index)
            .map(|mesh| mesh.name.clone())
            .unwrap_or_default();

        let mut standalone = GeometryStore::new();
        standalone.extend_vertices(data.vertices);
        standalone.push_mesh(Mesh::with_triangles(name, data.triangles));
        Ok(Some(standalone))
    }
}

/// Writes one mesh to its own file.
pub struct ExportMesh<'a> {
    selector: MeshSelector<'a>,
    path: PathBuf,
}

impl<'a> ExportMesh<'a> {
    /// Creates a new `ExportMesh` operation.
    #[must_use]
    pub fn new(selector: impl Into<MeshSelector<'a>>, path: impl AsRef<Path>) -> Self {
        Self {
            selector: selector.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Executes the export. Returns `Ok(false)` without touching the file
    /// system if the mesh does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references a vertex outside the pool or
    /// the file cannot be written.
    pub fn execute(&self, store: &GeometryStore) -> Result<bool> {
        let Some(standalone) = ExtractMesh::new(self.selector).execute(store)? else {
            return Ok(false);
        };

        codec::save(&standalone, &self.path)?;
        debug!(
            path = %self.path.display(),
            vertices = standalone.vertex_count(),
            "exported mesh"
        );
        Ok(true)
    }
}
