mod delete;
mod extract;
mod merge;
mod tetrahedralize;

pub use delete::DeleteMesh;
pub use extract::{ExportMesh, ExtractMesh};
pub use merge::Merge;
pub use tetrahedralize::{Tetrahedralize, TetrahedralizeParams, TetrahedralizeReport};
