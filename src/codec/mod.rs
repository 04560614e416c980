//! Text format for geometry stores.
//!
//! One record per line, selected by the first two characters:
//!
//! | Prefix | Fields | Effect |
//! |--------|--------|--------|
//! | `v ` | `x y z` | append a vertex |
//! | `g ` | rest of line | open a new mesh with that name |
//! | `f ` | `i j k` (1-based) | append a triangle to the open mesh |
//!
//! Any other line is ignored. There is no header and no explicit count.

mod reader;
mod writer;

pub use reader::{parse_str, read_from};
pub use writer::{to_string, write_to};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::store::GeometryStore;

/// Reads a store from a file.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be opened, or any error of
/// [`read_from`].
pub fn open<P: AsRef<Path>>(path: P) -> Result<GeometryStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "opening");
    read_from(BufReader::new(file))
}

/// Writes a store to a file, replacing any existing content. A store that
/// [`write_to`] would reject leaves the file as it was.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be created, or any error of
/// [`write_to`].
pub fn save<P: AsRef<Path>>(store: &GeometryStore, path: P) -> Result<()> {
    let path = path.as_ref();
    writer::check_writable(store)?;
    let file = File::create(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "saving");
    write_to(store, BufWriter::new(file))
}
