//! Renderable view of a store.
//!
//! A viewer borrows the store read-only and flattens every live triangle into
//! three positions and one flat normal.

use crate::math::{Point3, Vector3, TOLERANCE};
use crate::store::GeometryStore;

/// Axis-aligned bounds of the rendered triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }
}

/// Flat triangle list ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    /// Three positions per triangle.
    pub positions: Vec<Point3>,
    /// One unit normal per triangle; zero for degenerate triangles.
    pub normals: Vec<Vector3>,
}

impl RenderMesh {
    /// Flattens every live mesh of `store`. Triangles referencing missing
    /// vertices are skipped.
    #[must_use]
    pub fn build(store: &GeometryStore) -> Self {
        let mut out = Self::default();

        for mesh in store.meshes() {
            for tri in &mesh.triangles {
                let (Some(p0), Some(p1), Some(p2)) =
                    (store.vertex(tri.v1), store.vertex(tri.v2), store.vertex(tri.v3))
                else {
                    continue;
                };

                let n = (p1 - p0).cross(&(p2 - p0));
                let len = n.norm();
                out.normals
                    .push(if len < TOLERANCE { Vector3::zeros() } else { n / len });
                out.positions.extend([*p0, *p1, *p2]);
            }
        }

        out
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.normals.len()
    }

    /// Bounds of all positions, or `None` if there are none.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: b.min.inf(p),
                max: b.max.sup(p),
            },
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::parse_str;
    use approx::assert_relative_eq;

    #[test]
    fn flat_normals_follow_winding() {
        let store = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\ng A\nf 1 2 3\ng B\nf 1 3 2\n").unwrap();
        let render = RenderMesh::build(&store);

        assert_eq!(render.triangle_count(), 2);
        assert_eq!(render.positions.len(), 6);
        assert_relative_eq!(render.normals[0], Vector3::z());
        assert_relative_eq!(render.normals[1], -Vector3::z());
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let store = parse_str("v 0 0 0\nv 1 0 0\nv 2 0 0\ng line\nf 1 2 3\n").unwrap();
        let render = RenderMesh::build(&store);
        assert_eq!(render.normals[0], Vector3::zeros());
    }

    #[test]
    fn tombstoned_meshes_are_not_rendered() {
        let mut store =
            parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\ng A\nf 1 2 3\ng B\nf 1 3 2\n").unwrap();
        store.delete_mesh(0);
        assert_eq!(RenderMesh::build(&store).triangle_count(), 1);
    }

    #[test]
    fn bounds_cover_all_positions() {
        let store = parse_str("v -1 0 2\nv 3 1 0\nv 0 -4 1\ng A\nf 1 2 3\n").unwrap();
        let bounds = RenderMesh::build(&store).bounds().unwrap();

        assert_eq!(bounds.min, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Point3::new(3.0, 1.0, 2.0));
        assert_relative_eq!(bounds.center(), Point3::new(1.0, -1.5, 1.0));
        assert!(RenderMesh::default().bounds().is_none());
    }
}
