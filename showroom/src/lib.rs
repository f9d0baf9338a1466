//! showroom core
//!
//! Everything the viewer decides without touching a GPU or a window:
//! bounding-box arithmetic, camera/light framing, the orbit controller,
//! and the load lifecycle for the single model asset.
//!
//! The shell crate (`showroom-shell`) owns the wgpu renderer and the winit
//! event loop and drives this crate from its frame callback.

pub mod bounds;
pub mod fit;
pub mod model;
pub mod orbit;
pub mod progress;
pub mod state;

pub use bounds::Aabb;
pub use fit::FrameFit;
pub use model::{MeshData, ModelData};
pub use orbit::OrbitController;
pub use progress::ProgressTracker;
pub use state::{LoadEvent, LoadPhase, ViewerState};
