use super::triangle::Triangle;

/// A named group of triangles.
///
/// A mesh owns no vertices; its triangles index into the enclosing
/// [`GeometryStore`](super::GeometryStore). Names need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates an empty mesh with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }

    /// Creates a mesh from a name and its triangles.
    #[must_use]
    pub fn with_triangles(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// One entry of the store's mesh sequence.
///
/// Deletion is two-phase: a slot is first turned into a `Tombstone`, and a
/// later [`compact`](super::GeometryStore::compact) removes the tombstones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshSlot {
    Live(Mesh),
    Tombstone,
}

impl MeshSlot {
    #[must_use]
    pub fn as_live(&self) -> Option<&Mesh> {
        match self {
            MeshSlot::Live(mesh) => Some(mesh),
            MeshSlot::Tombstone => None,
        }
    }

    pub fn as_live_mut(&mut self) -> Option<&mut Mesh> {
        match self {
            MeshSlot::Live(mesh) => Some(mesh),
            MeshSlot::Tombstone => None,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, MeshSlot::Live(_))
    }
}

/// Selects a mesh either by slot index (0-based) or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSelector<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for MeshSelector<'_> {
    fn from(index: usize) -> Self {
        MeshSelector::Index(index)
    }
}

impl<'a> From<&'a str> for MeshSelector<'a> {
    fn from(name: &'a str) -> Self {
        MeshSelector::Name(name)
    }
}
