use std::io::BufRead;
use std::str::{FromStr, SplitWhitespace};

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::math::Point3;
use crate::store::{GeometryStore, Mesh, Triangle};

/// Reads a store from line-oriented text.
///
/// `v x y z` appends a vertex, `g name` opens a mesh, `f i j k` appends a
/// triangle to the open mesh. Other lines are skipped. Every triangle index
/// is checked against the final vertex count once the input is consumed.
///
/// # Errors
///
/// Returns an error if a record is malformed, a face appears before any
/// group, an index is out of bounds, or the underlying reader fails.
pub fn read_from<R: BufRead>(reader: R) -> Result<GeometryStore> {
    let mut store = GeometryStore::new();
    let mut open_mesh: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(CodecError::from)?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        let number = i + 1;

        match line.get(..2) {
            Some("v ") => {
                let [x, y, z] = parse_triple::<f64>(&line[2..], number, "vertex")?;
                store.add_vertex(Point3::new(x, y, z));
            }
            Some("g ") => {
                open_mesh = Some(store.push_mesh(Mesh::new(&line[2..])));
            }
            Some("f ") => {
                let mesh = open_mesh
                    .and_then(|index| store.mesh_by_index_mut(index))
                    .ok_or(CodecError::FaceOutsideGroup { line: number })?;
                let indices = parse_triple::<usize>(&line[2..], number, "face")?;
                mesh.triangles.push(Triangle::from(indices));
            }
            _ => {}
        }
    }

    store.validate_indices()?;

    debug!(
        vertices = store.vertex_count(),
        meshes = store.mesh_count(),
        polygons = store.polygon_count(),
        "read geometry"
    );
    Ok(store)
}

/// Reads a store from an in-memory string.
///
/// # Errors
///
/// See [`read_from`].
pub fn parse_str(text: &str) -> Result<GeometryStore> {
    read_from(text.as_bytes())
}

/// Parses the first three whitespace-separated fields; trailing fields are
/// ignored.
fn parse_triple<T: FromStr>(
    fields: &str,
    line: usize,
    record: &str,
) -> std::result::Result<[T; 3], CodecError> {
    let mut tokens = fields.split_whitespace();
    Ok([
        next_field(&mut tokens, line, record)?,
        next_field(&mut tokens, line, record)?,
        next_field(&mut tokens, line, record)?,
    ])
}

fn next_field<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    record: &str,
) -> std::result::Result<T, CodecError> {
    let token = tokens.next().ok_or_else(|| CodecError::InvalidRecord {
        line,
        reason: format!("{record} record needs three fields"),
    })?;
    token.parse().map_err(|_| CodecError::InvalidRecord {
        line,
        reason: format!("'{token}' is not a valid {record} field"),
    })
}
