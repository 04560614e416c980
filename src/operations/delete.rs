use tracing::debug;

use crate::store::{GeometryStore, Mesh};

/// Deletes a mesh and compacts the slot sequence.
///
/// Deleting the only remaining mesh also empties the vertex pool.
pub struct DeleteMesh {
    index: usize,
}

impl DeleteMesh {
    /// Creates a new `DeleteMesh` operation for slot `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the deletion, returning the removed mesh, or `None` if
    /// there is no live mesh at the index.
    pub fn execute(&self, store: &mut GeometryStore) -> Option<Mesh> {
        let removed = store.delete_mesh(self.index)?;
        store.compact();

        debug!(
            mesh = %removed.name,
            remaining = store.mesh_count(),
            vertices = store.vertex_count(),
            "deleted mesh"
        );
        Some(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::parse_str;

    fn sample() -> GeometryStore {
        parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\ng a\nf 1 2 3\ng b\nf 1 2 4\ng c\nf 2 3 4\n",
        )
        .unwrap()
    }

    #[test]
    fn removes_and_compacts() {
        let mut store = sample();
        let removed = DeleteMesh::new(1).execute(&mut store).unwrap();

        assert_eq!(removed.name, "b");
        assert_eq!(store.slot_count(), 2);
        let names: Vec<_> = store.meshes().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(store.vertex_count(), 4);

        let c = store.mesh_by_index(1).unwrap();
        assert_eq!(c.triangles[0].indices(), [2, 3, 4]);
    }

    #[test]
    fn deleting_every_mesh_empties_pool() {
        let mut store = sample();
        for _ in 0..3 {
            DeleteMesh::new(0).execute(&mut store).unwrap();
        }
        assert_eq!(store.mesh_count(), 0);
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn out_of_range_is_none() {
        let mut store = sample();
        assert!(DeleteMesh::new(3).execute(&mut store).is_none());
        assert_eq!(store.mesh_count(), 3);
    }
}
