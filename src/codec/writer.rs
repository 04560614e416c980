use std::io::Write;

use crate::error::{CodecError, Result};
use crate::store::GeometryStore;

/// Writes a store as line-oriented text.
///
/// All vertices come first, then each live mesh as a `g` line followed by
/// its `f` lines. Tombstoned slots are skipped. Coordinates use the shortest
/// representation that parses back to the same `f64`. The store is checked
/// before anything is written, so a rejected store leaves `writer` untouched.
///
/// # Errors
///
/// Returns [`CodecError::InvalidName`] if a mesh name contains a line break,
/// a store error if a triangle references a vertex outside the pool, or an
/// error if the underlying writer fails.
pub fn write_to<W: Write>(store: &GeometryStore, mut writer: W) -> Result<()> {
    check_writable(store)?;
    write_records(store, &mut writer).map_err(CodecError::from)?;
    Ok(())
}

/// Checks that `store` reads back unchanged once written.
pub(super) fn check_writable(store: &GeometryStore) -> Result<()> {
    if let Some(mesh) = store
        .meshes()
        .find(|mesh| mesh.name.contains(['\n', '\r']))
    {
        return Err(CodecError::InvalidName {
            name: mesh.name.clone(),
        }
        .into());
    }
    store.validate_indices()?;
    Ok(())
}

/// Renders a store to a string.
///
/// # Errors
///
/// See [`write_to`].
pub fn to_string(store: &GeometryStore) -> Result<String> {
    let mut buf = Vec::new();
    write_to(store, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_records<W: Write>(store: &GeometryStore, writer: &mut W) -> std::io::Result<()> {
    for p in store.vertices() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for mesh in store.meshes() {
        writeln!(writer, "g {}", mesh.name)?;
        for tri in &mesh.triangles {
            writeln!(writer, "f {} {} {}", tri.v1, tri.v2, tri.v3)?;
        }
    }

    writer.flush()
}
