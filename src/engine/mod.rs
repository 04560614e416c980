//! Boundary to a constrained Delaunay tetrahedralization engine.
//!
//! The engine receives a piecewise-linear complex (points plus planar
//! facets) and returns the points and boundary faces of a tetrahedral mesh.
//! All indices crossing this boundary are 1-based.

mod star;
mod welder;

pub use star::StarEngine;

use crate::error::EngineError;
use crate::math::Point3;
use crate::store::MeshData;

/// One planar facet of a piecewise-linear complex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facet {
    /// Polygons as lists of 1-based point indices.
    pub polygons: Vec<Vec<usize>>,
    /// One point inside each hole of the facet.
    pub holes: Vec<Point3>,
}

impl Facet {
    /// A facet made of a single triangle and no holes.
    #[must_use]
    pub fn triangle(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            polygons: vec![vec![v1, v2, v3]],
            holes: Vec::new(),
        }
    }
}

/// Piecewise-linear complex: the input of a tetrahedralization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plc {
    pub points: Vec<Point3>,
    pub facets: Vec<Facet>,
}

impl Plc {
    /// Builds one triangular facet per extracted triangle, reusing the
    /// extraction's 1-based numbering.
    #[must_use]
    pub fn from_mesh_data(data: &MeshData) -> Self {
        Self {
            points: data.vertices.clone(),
            facets: data
                .triangles
                .iter()
                .map(|tri| Facet::triangle(tri.v1, tri.v2, tri.v3))
                .collect(),
        }
    }
}

/// Switches passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Treat the input as a piecewise-linear complex rather than a point cloud.
    pub plc: bool,
    /// Refine for tetrahedron quality. [`StarEngine`] does not refine; it
    /// only logs how many tetrahedra exceed `min_ratio`, and only when
    /// `quiet` is off.
    pub quality: bool,
    /// Return points and boundary faces only, without the tetrahedra.
    pub facets_only: bool,
    /// Suppress engine diagnostics.
    pub quiet: bool,
    /// Upper bound on the radius-edge ratio of generated tetrahedra.
    /// Ignored by [`StarEngine`] apart from the `quality` report.
    pub min_ratio: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            plc: true,
            quality: false,
            facets_only: false,
            quiet: false,
            min_ratio: 2.0,
        }
    }
}

/// Result of a tetrahedralization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    pub points: Vec<Point3>,
    /// Boundary triangles, 1-based, normals pointing into the volume.
    pub trifaces: Vec<[usize; 3]>,
    /// Tetrahedra, 1-based. Empty when `facets_only` was requested.
    pub tetrahedra: Vec<[usize; 4]>,
}

/// A constrained tetrahedralization engine.
pub trait TetrahedralEngine {
    /// Tetrahedralizes the volume bounded by `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are unsupported or the input cannot
    /// be meshed.
    fn tetrahedralize(
        &self,
        input: &Plc,
        options: &EngineOptions,
    ) -> Result<EngineOutput, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Triangle;

    #[test]
    fn plc_from_mesh_data_keeps_numbering() {
        let data = MeshData {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            triangles: vec![Triangle::new(1, 2, 3), Triangle::new(4, 5, 6)],
        };

        let plc = Plc::from_mesh_data(&data);
        assert_eq!(plc.points.len(), 6);
        assert_eq!(plc.facets.len(), 2);
        assert_eq!(plc.facets[1].polygons, vec![vec![4, 5, 6]]);
        assert!(plc.facets.iter().all(|f| f.holes.is_empty()));
    }
}
