use tracing::debug;

use crate::engine::{EngineOptions, Plc, TetrahedralEngine};
use crate::error::{EngineError, Result};
use crate::store::{GeometryStore, MeshSelector, Triangle};

/// Parameters controlling tetrahedral mesh generation.
#[derive(Debug, Clone, Copy)]
pub struct TetrahedralizeParams {
    /// Upper bound on the radius-edge ratio of generated tetrahedra.
    /// Must be greater than 1.0; callers validate this.
    pub radius_edge_ratio: f64,
}

impl Default for TetrahedralizeParams {
    fn default() -> Self {
        Self {
            radius_edge_ratio: 2.0,
        }
    }
}

impl TetrahedralizeParams {
    /// Engine switches: PLC input, quality refinement, faces-only output,
    /// silent diagnostics.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            plc: true,
            quality: true,
            facets_only: true,
            quiet: true,
            min_ratio: self.radius_edge_ratio,
        }
    }
}

/// What a tetrahedralization changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrahedralizeReport {
    /// Store vertex count before the engine's points were appended.
    pub vertex_offset: usize,
    /// Number of vertices appended to the store.
    pub added_vertices: usize,
    /// New triangle count of the target mesh.
    pub faces: usize,
}

/// Replaces a mesh's surface with the boundary of a tetrahedral mesh of the
/// volume it encloses.
///
/// The mesh is copied out with one vertex per corner, handed to the engine as
/// one triangular facet per triangle, and its triangles are replaced by the
/// engine's boundary faces. The engine's points are appended to the store's
/// pool; the old surface vertices stay in the pool unreferenced. Face winding
/// is reversed on the way back so the mesh keeps its orientation.
pub struct Tetrahedralize<'e, E: TetrahedralEngine + ?Sized> {
    index: usize,
    params: TetrahedralizeParams,
    engine: &'e E,
}

impl<'e, E: TetrahedralEngine + ?Sized> Tetrahedralize<'e, E> {
    /// Creates a new `Tetrahedralize` operation with default parameters.
    #[must_use]
    pub fn new(index: usize, engine: &'e E) -> Self {
        Self {
            index,
            params: TetrahedralizeParams::default(),
            engine,
        }
    }

    /// Sets custom tetrahedralization parameters.
    #[must_use]
    pub fn with_params(mut self, params: TetrahedralizeParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation. Returns `Ok(None)` and leaves the store
    /// untouched if there is no live mesh at the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references a vertex outside the pool,
    /// the engine fails, or the engine returns faces that reference points
    /// it did not return. The store is unchanged in that case.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Option<TetrahedralizeReport>> {
        let Some(data) = store.extract_mesh_data(MeshSelector::Index(self.index))? else {
            debug!(index = self.index, "no mesh to tetrahedralize");
            return Ok(None);
        };

        let offset = store.vertex_count();
        let input = Plc::from_mesh_data(&data);

        let output = self
            .engine
            .tetrahedralize(&input, &self.params.engine_options())?;

        let point_count = output.points.len();
        if let Some(face) = output
            .trifaces
            .iter()
            .find(|f| f.iter().any(|&i| i == 0 || i > point_count))
        {
            return Err(EngineError::Degenerate(format!(
                "engine face {face:?} references a point outside 1..={point_count}"
            ))
            .into());
        }

        let faces: Vec<Triangle> = output
            .trifaces
            .iter()
            .map(|&f| Triangle::from(f).reversed().offset(offset))
            .collect();

        let Some(mesh) = store.mesh_by_index_mut(self.index) else {
            return Ok(None);
        };
        mesh.triangles = faces;
        let report = TetrahedralizeReport {
            vertex_offset: offset,
            added_vertices: point_count,
            faces: mesh.triangles.len(),
        };
        debug!(
            mesh = %mesh.name,
            offset,
            added = point_count,
            faces = report.faces,
            "tetrahedralized mesh"
        );

        store.extend_vertices(output.points);
        Ok(Some(report))
    }
}
