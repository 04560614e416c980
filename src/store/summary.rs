use std::fmt;

/// Aggregate counts of a store plus its live mesh names in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub vertex_count: usize,
    pub polygon_count: usize,
    pub mesh_names: Vec<String>,
}

impl StoreSummary {
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.mesh_names.len()
    }
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices: {}", self.vertex_count)?;
        writeln!(f, "Polygons: {}", self.polygon_count)?;
        writeln!(f, "Meshes: {}", self.mesh_count())?;
        if self.mesh_names.is_empty() {
            write!(f, "  (none)")
        } else {
            for (i, name) in self.mesh_names.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "  {}. {name}", i + 1)?;
            }
            Ok(())
        }
    }
}
