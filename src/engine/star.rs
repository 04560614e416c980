use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::EngineError;
use crate::math::tetra::{radius_edge_ratio, signed_volume};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::welder::PointWelder;
use super::{EngineOptions, EngineOutput, Plc, TetrahedralEngine};

/// Built-in engine that meshes a closed surface as a star around one
/// interior point.
///
/// Coincident input points are welded, the centroid of the welded points is
/// inserted, and every facet triangle is joined to it to form one
/// tetrahedron. Faces used by exactly one tetrahedron make up the boundary.
/// The result is valid for surfaces that are star-shaped with respect to
/// their centroid. No refinement is performed; with `quality` set the engine
/// only reports how many tetrahedra exceed the radius-edge bound.
#[derive(Debug, Clone, Copy)]
pub struct StarEngine {
    weld_tolerance: f64,
}

impl Default for StarEngine {
    fn default() -> Self {
        Self {
            weld_tolerance: 1e-9,
        }
    }
}

impl StarEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance below which two input points are treated as one.
    #[must_use]
    pub fn with_weld_tolerance(mut self, tolerance: f64) -> Self {
        self.weld_tolerance = tolerance.max(TOLERANCE);
        self
    }

    /// Welds points and fan-triangulates facets into 0-based triangles.
    fn weld_facets(&self, input: &Plc) -> Result<(Vec<Point3>, Vec<[usize; 3]>), EngineError> {
        let mut welder = PointWelder::new(self.weld_tolerance);
        let remap: Vec<usize> = input.points.iter().map(|p| welder.insert(p)).collect();

        let mut triangles = Vec::new();
        for (k, facet) in input.facets.iter().enumerate() {
            if !facet.holes.is_empty() {
                return Err(EngineError::Unsupported(format!("facet {k} has holes")));
            }

            for polygon in &facet.polygons {
                if polygon.len() < 3 {
                    return Err(EngineError::Degenerate(format!(
                        "facet {k} has a polygon with {} vertices",
                        polygon.len()
                    )));
                }

                let ids = polygon
                    .iter()
                    .map(|&v| {
                        v.checked_sub(1)
                            .and_then(|i| remap.get(i))
                            .copied()
                            .ok_or_else(|| {
                                EngineError::Degenerate(format!(
                                    "facet {k} references missing point {v}"
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                for j in 1..ids.len() - 1 {
                    let tri = [ids[0], ids[j], ids[j + 1]];
                    if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                        triangles.push(tri);
                    }
                }
            }
        }

        Ok((welder.into_points(), triangles))
    }
}

impl TetrahedralEngine for StarEngine {
    fn tetrahedralize(
        &self,
        input: &Plc,
        options: &EngineOptions,
    ) -> Result<EngineOutput, EngineError> {
        if !options.plc {
            return Err(EngineError::Unsupported(
                "point-cloud input; PLC mode is required".into(),
            ));
        }
        if input.facets.is_empty() {
            return Err(EngineError::EmptyInput("no facets".into()));
        }

        let (mut points, triangles) = self.weld_facets(input)?;
        if triangles.is_empty() {
            return Err(EngineError::Degenerate("every facet collapsed".into()));
        }

        #[allow(clippy::cast_precision_loss)]
        let centroid = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / points.len() as f64;
        let apex = points.len();
        points.push(Point3::from(centroid));

        let mut tetrahedra = Vec::with_capacity(triangles.len());
        let mut flat = 0usize;
        for [a, b, c] in triangles {
            let volume = signed_volume(&points[a], &points[b], &points[c], &points[apex]);
            if volume.abs() < TOLERANCE {
                flat += 1;
            } else if volume > 0.0 {
                tetrahedra.push([a, b, c, apex]);
            } else {
                tetrahedra.push([a, c, b, apex]);
            }
        }

        if tetrahedra.is_empty() {
            return Err(EngineError::Degenerate(
                "no tetrahedron with positive volume".into(),
            ));
        }

        let trifaces = boundary_faces(&tetrahedra);

        if !options.quiet {
            if flat > 0 {
                warn!(flat, "dropped zero-volume tetrahedra");
            }
            if options.quality {
                let above = tetrahedra
                    .iter()
                    .filter(|&&[a, b, c, d]| {
                        radius_edge_ratio(&points[a], &points[b], &points[c], &points[d])
                            .is_none_or(|ratio| ratio > options.min_ratio)
                    })
                    .count();
                info!(
                    tetrahedra = tetrahedra.len(),
                    above_bound = above,
                    min_ratio = options.min_ratio,
                    "radius-edge quality"
                );
            }
            info!(
                points = points.len(),
                tetrahedra = tetrahedra.len(),
                faces = trifaces.len(),
                "star tetrahedralization"
            );
        }

        Ok(EngineOutput {
            points,
            trifaces: trifaces.iter().map(|f| f.map(|i| i + 1)).collect(),
            tetrahedra: if options.facets_only {
                Vec::new()
            } else {
                tetrahedra.iter().map(|t| t.map(|i| i + 1)).collect()
            },
        })
    }
}

/// Faces used by exactly one tetrahedron, in first-seen order.
///
/// Tetrahedra must have positive [`signed_volume`]; faces are
/// returned with their normal pointing into the owning tetrahedron.
fn boundary_faces(tetrahedra: &[[usize; 4]]) -> Vec<[usize; 3]> {
    let mut seen: HashMap<[usize; 3], usize> = HashMap::new();
    let mut faces: Vec<([usize; 3], usize)> = Vec::new();

    for &[a, b, c, d] in tetrahedra {
        for face in [[c, b, a], [d, c, a], [b, d, a], [c, d, b]] {
            let mut key = face;
            key.sort_unstable();
            match seen.get(&key) {
                Some(&slot) => faces[slot].1 += 1,
                None => {
                    seen.insert(key, faces.len());
                    faces.push((face, 1));
                }
            }
        }
    }

    faces
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(face, _)| face)
        .collect()
}
