use tracing::debug;

use crate::store::{GeometryStore, MeshSlot};

/// Merges a second store into a target store.
///
/// The source's vertices are appended to the target's pool and every
/// triangle of every live source mesh is shifted by the target's vertex count
/// taken before the append, so the merged meshes index the right vertices.
pub struct Merge {
    source: GeometryStore,
}

impl Merge {
    /// Creates a new `Merge` operation that consumes `source`.
    #[must_use]
    pub fn new(source: GeometryStore) -> Self {
        Self { source }
    }

    /// Executes the merge, returning the vertex offset applied to the
    /// source's triangles.
    pub fn execute(self, target: &mut GeometryStore) -> usize {
        let offset = target.vertex_count();
        let (vertices, slots) = self.source.into_parts();
        target.extend_vertices(vertices);

        let mut added = 0;
        for slot in slots {
            let MeshSlot::Live(mut mesh) = slot else {
                continue;
            };
            for tri in &mut mesh.triangles {
                *tri = tri.offset(offset);
            }
            target.push_mesh(mesh);
            added += 1;
        }

        debug!(offset, meshes = added, "merged store");
        offset
    }
}
