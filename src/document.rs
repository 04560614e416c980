use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec;
use crate::engine::TetrahedralEngine;
use crate::error::{CodecError, Result};
use crate::operations::{
    DeleteMesh, ExportMesh, Merge, Tetrahedralize, TetrahedralizeParams, TetrahedralizeReport,
};
use crate::store::{GeometryStore, Mesh};

/// One open geometry store and the file it was loaded from.
///
/// Every user-level action of an editing session is a method here; the
/// caller owns the document and passes it explicitly to whatever displays it.
#[derive(Debug, Default)]
pub struct Document {
    path: Option<PathBuf>,
    store: GeometryStore,
}

impl Document {
    /// Creates an untitled, empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store as an untitled document.
    #[must_use]
    pub fn from_store(store: GeometryStore) -> Self {
        Self { path: None, store }
    }

    /// Opens a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = codec::open(path)?;
        info!(path = %path.display(), meshes = store.mesh_count(), "opened");
        Ok(Self {
            path: Some(path.to_path_buf()),
            store,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GeometryStore {
        &mut self.store
    }

    /// Consumes the document, returning its store.
    #[must_use]
    pub fn into_store(self) -> GeometryStore {
        self.store
    }

    #[must_use]
    pub fn has_mesh(&self) -> bool {
        self.store.mesh_count() > 0
    }

    /// Reads another file and merges its meshes into this document.
    /// Returns the number of meshes added.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed; the document
    /// is unchanged in that case.
    pub fn import<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let incoming = codec::open(path)?;
        let added = incoming.mesh_count();
        Merge::new(incoming).execute(&mut self.store);
        info!(path = %path.display(), meshes = added, "imported");
        Ok(added)
    }

    /// Writes the mesh at slot `index` to its own file. Returns `Ok(false)`
    /// if there is no such mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references a vertex outside the pool or
    /// the file cannot be written.
    pub fn export_mesh<P: AsRef<Path>>(&self, index: usize, path: P) -> Result<bool> {
        let exported = ExportMesh::new(index, path.as_ref()).execute(&self.store)?;
        if exported {
            info!(index, path = %path.as_ref().display(), "exported");
        }
        Ok(exported)
    }

    /// Deletes the mesh at slot `index`, returning it.
    pub fn delete_mesh(&mut self, index: usize) -> Option<Mesh> {
        let removed = DeleteMesh::new(index).execute(&mut self.store)?;
        info!(mesh = %removed.name, "deleted");
        Some(removed)
    }

    /// Replaces the mesh at slot `index` with a tetrahedral mesh surface.
    ///
    /// `radius_edge_ratio` must be greater than 1.0.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references a vertex outside the pool or
    /// the engine fails.
    pub fn tetrahedralize<E: TetrahedralEngine + ?Sized>(
        &mut self,
        index: usize,
        radius_edge_ratio: f64,
        engine: &E,
    ) -> Result<Option<TetrahedralizeReport>> {
        let report = Tetrahedralize::new(index, engine)
            .with_params(TetrahedralizeParams { radius_edge_ratio })
            .execute(&mut self.store)?;
        if let Some(report) = &report {
            info!(
                index,
                added = report.added_vertices,
                faces = report.faces,
                "tetrahedralized"
            );
        }
        Ok(report)
    }

    /// Writes the document back to the file it came from.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NoPath`] for an untitled document, or an error
    /// if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(CodecError::NoPath)?;
        codec::save(&self.store, path)?;
        info!(path = %path.display(), "saved");
        Ok(())
    }

    /// Writes the document to `path` and makes it the document's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; the document's path
    /// is unchanged in that case.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        codec::save(&self.store, path)?;
        self.path = Some(path.to_path_buf());
        info!(path = %path.display(), "saved");
        Ok(())
    }
}
