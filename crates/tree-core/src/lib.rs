pub mod ambient;
pub mod animator;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod mesh;
pub mod photos;
pub mod placards;
pub mod playback;
pub mod scene;
pub mod state;

pub use ambient::*;
pub use animator::*;
pub use error::*;
pub use geometry::*;
pub use gesture::*;
pub use mesh::{InstanceRaw, MeshData, Vertex};
pub use photos::*;
pub use placards::*;
pub use playback::*;
pub use scene::*;
pub use state::*;
