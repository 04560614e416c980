pub mod codec;
pub mod document;
pub mod engine;
pub mod error;
pub mod math;
pub mod operations;
pub mod render;
pub mod store;

pub use document::Document;
pub use error::{MeshError, Result};
pub use store::{GeometryStore, Mesh, MeshSelector, Triangle};
