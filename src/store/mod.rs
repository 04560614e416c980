pub mod mesh;
pub mod summary;
pub mod triangle;

pub use mesh::{Mesh, MeshSelector, MeshSlot};
pub use summary::StoreSummary;
pub use triangle::Triangle;

use crate::error::StoreError;
use crate::math::Point3;

/// A self-contained copy of one mesh's geometry.
///
/// Every triangle corner gets its own vertex, so triangle `k` always reads
/// `(3k + 1, 3k + 2, 3k + 3)` and nothing aliases the source store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Point3>,
    pub triangles: Vec<Triangle>,
}

/// Owner of the shared vertex pool and the ordered mesh slots of one
/// document.
///
/// Vertex indices are 1-based positions in the pool. Mesh slot indices are
/// 0-based. Compaction reorders slots but never touches the pool, so triangle
/// indices stay valid across deletions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryStore {
    vertices: Vec<Point3>,
    slots: Vec<MeshSlot>,
}

impl GeometryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex pool ---

    /// Appends a vertex and returns its 1-based index.
    pub fn add_vertex(&mut self, point: Point3) -> usize {
        self.vertices.push(point);
        self.vertices.len()
    }

    /// Appends vertices in order.
    pub fn extend_vertices(&mut self, points: impl IntoIterator<Item = Point3>) {
        self.vertices.extend(points);
    }

    /// Returns the vertex at a 1-based index.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Point3> {
        index.checked_sub(1).and_then(|i| self.vertices.get(i))
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Mesh slots ---

    /// Appends a mesh and returns its slot index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if a triangle references a
    /// vertex outside the pool; the store is unchanged in that case.
    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<usize, StoreError> {
        check_mesh(&mesh, self.vertex_count())?;
        Ok(self.push_mesh(mesh))
    }

    /// Appends a mesh without checking its indices. Callers either validate
    /// the whole store afterwards or build the triangles from known-good
    /// indices.
    pub(crate) fn push_mesh(&mut self, mesh: Mesh) -> usize {
        self.slots.push(MeshSlot::Live(mesh));
        self.slots.len() - 1
    }

    /// Iterates over live meshes in slot order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.slots.iter().filter_map(MeshSlot::as_live)
    }

    /// Returns the mesh at slot `index`, or `None` if the index is out of
    /// range or the slot is a tombstone.
    #[must_use]
    pub fn mesh_by_index(&self, index: usize) -> Option<&Mesh> {
        self.slots.get(index).and_then(MeshSlot::as_live)
    }

    /// Unchecked mutable access; whoever edits the triangles keeps them
    /// inside the pool.
    pub(crate) fn mesh_by_index_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.slots.get_mut(index).and_then(MeshSlot::as_live_mut)
    }

    /// Returns the first live mesh named exactly `name`.
    #[must_use]
    pub fn mesh_by_name(&self, name: &str) -> Option<&Mesh> {
        self.index_of(name).and_then(|i| self.mesh_by_index(i))
    }

    /// Slot index of the first live mesh named exactly `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_live().is_some_and(|mesh| mesh.name == name))
    }

    /// Resolves a selector to the slot index of a live mesh.
    #[must_use]
    pub fn resolve(&self, selector: MeshSelector<'_>) -> Option<usize> {
        match selector {
            MeshSelector::Index(index) => self.mesh_by_index(index).map(|_| index),
            MeshSelector::Name(name) => self.index_of(name),
        }
    }

    /// Number of live meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    /// Number of slots, tombstones included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total triangle count over all live meshes.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.meshes().map(Mesh::triangle_count).sum()
    }

    // --- Extraction ---

    /// Copies the selected mesh into a standalone vertex and triangle list.
    ///
    /// Vertices are emitted in triangle traversal order, one per corner, and
    /// triangles are renumbered `1, 2, 3, ...`. Returns `Ok(None)` if the
    /// mesh cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if the mesh references a
    /// vertex outside the pool.
    pub fn extract_mesh_data(
        &self,
        selector: MeshSelector<'_>,
    ) -> Result<Option<MeshData>, StoreError> {
        let Some(mesh) = self.resolve(selector).and_then(|i| self.mesh_by_index(i)) else {
            return Ok(None);
        };
        let vertex_count = self.vertex_count();

        let mut data = MeshData {
            vertices: Vec::with_capacity(mesh.triangles.len() * 3),
            triangles: Vec::with_capacity(mesh.triangles.len()),
        };

        for (k, tri) in mesh.triangles.iter().enumerate() {
            for index in tri.indices() {
                let vertex = self
                    .vertex(index)
                    .ok_or_else(|| StoreError::IndexOutOfBounds {
                        mesh: mesh.name.clone(),
                        triangle: k,
                        index,
                        vertex_count,
                    })?;
                data.vertices.push(*vertex);
            }
            data.triangles
                .push(Triangle::new(k * 3 + 1, k * 3 + 2, k * 3 + 3));
        }

        Ok(Some(data))
    }

    // --- Deletion ---

    /// Tombstones the mesh at slot `index` and returns it.
    ///
    /// If it is the only live mesh, the vertex pool is cleared as well since
    /// nothing else can reference it. Triangles of other meshes are never
    /// touched. Call [`compact`](Self::compact) afterwards to drop the slot.
    pub fn delete_mesh(&mut self, index: usize) -> Option<Mesh> {
        let last = self.mesh_count() == 1;
        let slot = self.slots.get_mut(index)?;
        let MeshSlot::Live(mesh) = std::mem::replace(slot, MeshSlot::Tombstone) else {
            return None;
        };

        if last {
            self.vertices.clear();
        }
        Some(mesh)
    }

    /// Removes tombstoned slots, keeping live meshes in their relative order.
    pub fn compact(&mut self) {
        self.slots.retain(MeshSlot::is_live);
    }

    /// Consumes the store, returning its vertex pool and mesh slots.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3>, Vec<MeshSlot>) {
        (self.vertices, self.slots)
    }

    /// Drops every vertex and mesh.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.slots.clear();
    }

    // --- Invariants ---

    /// Checks that every triangle of every live mesh indexes into the pool.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range index found, in slot and triangle order.
    pub fn validate_indices(&self) -> Result<(), StoreError> {
        let vertex_count = self.vertex_count();
        self.meshes()
            .try_for_each(|mesh| check_mesh(mesh, vertex_count))
    }

    /// Counts and live mesh names, for display.
    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            vertex_count: self.vertex_count(),
            polygon_count: self.polygon_count(),
            mesh_names: self.meshes().map(|mesh| mesh.name.clone()).collect(),
        }
    }
}

/// First triangle index of `mesh` outside `1..=vertex_count`.
fn check_mesh(mesh: &Mesh, vertex_count: usize) -> Result<(), StoreError> {
    for (triangle, tri) in mesh.triangles.iter().enumerate() {
        if let Some(&index) = tri
            .indices()
            .iter()
            .find(|&&i| i == 0 || i > vertex_count)
        {
            return Err(StoreError::IndexOutOfBounds {
                mesh: mesh.name.clone(),
                triangle,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Two triangles sharing an edge in mesh "quad", one triangle in "tri".
    fn sample_store() -> GeometryStore {
        let mut store = GeometryStore::new();
        store.add_vertex(p(0.0, 0.0, 0.0));
        store.add_vertex(p(1.0, 0.0, 0.0));
        store.add_vertex(p(1.0, 1.0, 0.0));
        store.add_vertex(p(0.0, 1.0, 0.0));
        store.add_vertex(p(0.0, 0.0, 1.0));
        store
            .add_mesh(Mesh::with_triangles(
                "quad",
                vec![Triangle::new(1, 2, 3), Triangle::new(1, 3, 4)],
            ))
            .unwrap();
        store
            .add_mesh(Mesh::with_triangles("tri", vec![Triangle::new(1, 2, 5)]))
            .unwrap();
        store
    }

    #[test]
    fn counts() {
        let store = sample_store();
        assert_eq!(store.vertex_count(), 5);
        assert_eq!(store.mesh_count(), 2);
        assert_eq!(store.polygon_count(), 3);
    }

    #[test]
    fn lookup_by_index_out_of_range_is_none() {
        let store = sample_store();
        assert_eq!(store.mesh_by_index(1).unwrap().name, "tri");
        assert!(store.mesh_by_index(2).is_none());
    }

    #[test]
    fn lookup_by_name_first_match_wins() {
        let mut store = sample_store();
        store
            .add_mesh(Mesh::with_triangles("quad", vec![Triangle::new(2, 3, 5)]))
            .unwrap();

        let mesh = store.mesh_by_name("quad").unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(store.index_of("quad"), Some(0));
        assert!(store.mesh_by_name("missing").is_none());
    }

    #[test]
    fn tombstone_hides_mesh_from_lookup() {
        let mut store = sample_store();
        store.delete_mesh(0).unwrap();

        assert!(store.mesh_by_index(0).is_none());
        assert!(store.mesh_by_name("quad").is_none());
        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.mesh_count(), 1);
        assert_eq!(store.polygon_count(), 1);
    }

    #[test]
    fn extract_duplicates_corners() {
        let store = sample_store();
        let data = store
            .extract_mesh_data(MeshSelector::Name("quad"))
            .unwrap()
            .unwrap();

        assert_eq!(data.vertices.len(), 6);
        assert_eq!(
            data.triangles,
            vec![Triangle::new(1, 2, 3), Triangle::new(4, 5, 6)]
        );
        // Vertex 1 is shared by both triangles and is copied twice.
        assert_eq!(data.vertices[0], p(0.0, 0.0, 0.0));
        assert_eq!(data.vertices[3], p(0.0, 0.0, 0.0));
        assert_eq!(data.vertices[5], p(0.0, 1.0, 0.0));
    }

    #[test]
    fn extract_missing_mesh_is_none() {
        let store = sample_store();
        assert!(store
            .extract_mesh_data(MeshSelector::Index(7))
            .unwrap()
            .is_none());
        assert!(store.extract_mesh_data("nope".into()).unwrap().is_none());
    }

    #[test]
    fn extract_reports_index_outside_pool() {
        let mut store = sample_store();
        store.push_mesh(Mesh::with_triangles("A", vec![Triangle::new(1, 2, 9)]));

        assert!(store.mesh_by_index(2).is_some());
        let err = store
            .extract_mesh_data(MeshSelector::Index(2))
            .unwrap_err();
        let StoreError::IndexOutOfBounds {
            mesh,
            triangle,
            index,
            vertex_count,
        } = err;
        assert_eq!((mesh.as_str(), triangle, index, vertex_count), ("A", 0, 9, 5));
    }

    #[test]
    fn extract_does_not_touch_store() {
        let store = sample_store();
        let before = store.clone();
        store
            .extract_mesh_data(MeshSelector::Index(1))
            .unwrap()
            .unwrap();
        assert_eq!(store, before);
    }

    #[test]
    fn delete_then_compact_preserves_order_and_indices() {
        let mut store = sample_store();
        store
            .add_mesh(Mesh::with_triangles("third", vec![Triangle::new(3, 4, 5)]))
            .unwrap();

        let removed = store.delete_mesh(1).unwrap();
        assert_eq!(removed.name, "tri");
        store.compact();

        let names: Vec<_> = store.meshes().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["quad", "third"]);
        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.vertex_count(), 5);
        assert_eq!(
            store.mesh_by_index(1).unwrap().triangles,
            vec![Triangle::new(3, 4, 5)]
        );
    }

    #[test]
    fn deleting_last_mesh_clears_vertices() {
        let mut store = sample_store();
        store.delete_mesh(0).unwrap();
        store.compact();
        store.delete_mesh(0).unwrap();
        store.compact();

        assert_eq!(store.vertex_count(), 0);
        assert_eq!(store.mesh_count(), 0);
    }

    #[test]
    fn deleting_tombstone_is_none() {
        let mut store = sample_store();
        store.delete_mesh(0).unwrap();
        assert!(store.delete_mesh(0).is_none());
        assert!(store.delete_mesh(9).is_none());
    }

    #[test]
    fn add_mesh_rejects_index_outside_pool() {
        let mut store = sample_store();
        let before = store.clone();

        let err = store
            .add_mesh(Mesh::with_triangles(
                "bad",
                vec![Triangle::new(1, 2, 3), Triangle::new(1, 6, 2)],
            ))
            .unwrap_err();
        let StoreError::IndexOutOfBounds {
            mesh,
            triangle,
            index,
            ..
        } = err;
        assert_eq!((mesh.as_str(), triangle, index), ("bad", 1, 6));
        assert!(store
            .add_mesh(Mesh::with_triangles("z", vec![Triangle::new(0, 1, 1)]))
            .is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn validate_reports_zero_and_overflow() {
        let mut store = sample_store();
        assert!(store.validate_indices().is_ok());

        store.push_mesh(Mesh::with_triangles("bad", vec![Triangle::new(1, 6, 2)]));
        let err = store.validate_indices().unwrap_err();
        let StoreError::IndexOutOfBounds { mesh, index, .. } = err;
        assert_eq!(mesh, "bad");
        assert_eq!(index, 6);

        let mut zero = GeometryStore::new();
        zero.add_vertex(p(0.0, 0.0, 0.0));
        zero.push_mesh(Mesh::with_triangles("z", vec![Triangle::new(0, 1, 1)]));
        assert!(zero.validate_indices().is_err());
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = sample_store();
        store.clear();
        assert_eq!(store, GeometryStore::new());
        assert_eq!(store.slot_count(), 0);
    }

    #[test]
    fn summary_lists_live_names() {
        let mut store = sample_store();
        store.delete_mesh(0);
        let summary = store.summary();
        assert_eq!(summary.vertex_count, 5);
        assert_eq!(summary.polygon_count, 1);
        assert_eq!(summary.mesh_names, vec!["tri".to_string()]);
    }
}
