//! Asset loading/parsers (meshes, materials, textures).
//! OBJ geometry is turned into a deduplicated vertex/index buffer pair;
//! MTL materials and their diffuse maps are loaded separately.

pub mod error;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod texture;

pub use error::{ObjError, ObjErrorKind, ObjResult, ObjWarning};
pub use mesh::{MeshData, MeshVertex};
pub use obj::{LoadOptions, ObjLoad, ObjLoader};
