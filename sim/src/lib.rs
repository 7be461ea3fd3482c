pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod main_loop;
pub mod perturb;
pub mod physics;
pub mod prompt;
pub mod registry;
pub mod render;
pub mod simulation;
pub mod spawner;
pub mod tag;

// Re-export rapier so the front ends can name its math types without depending on it directly.
pub use rapier3d;

pub use camera::CameraController;
pub use collision::{CollisionObserver, CollisionPair, ContactPoint, ContactReporter, ContactResponse};
pub use config::{Placement, SpeedTier, WorldConfig, seed_from_env};
pub use constants::{FIXED_DT, FRAME_BUDGET, WINDOW_HEIGHT, WINDOW_WIDTH};
pub use error::{Result, SimError};
pub use main_loop::{FrameView, FramePacer, Frontend, FrontendEvent, Key, LoopState, MainLoop};
pub use physics::PhysicsWorld;
pub use prompt::read_config;
pub use registry::{BodyRegistry, Entity, EntityId, EntityShape};
pub use render::{Projection, SphereDraw};
pub use simulation::{ShutdownReport, Simulation};
pub use tag::BodyTag;
