use std::time::Duration;

/// Fixed simulation step (seconds). Every frame advances the world by exactly this much,
/// regardless of how long the frame actually took.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Wall-clock budget for one main-loop iteration.
pub const FRAME_BUDGET: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Output surface size in pixels.
pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

/// Vertical field of view of the camera (degrees).
pub const FOV_DEGREES: f32 = 50.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 1000.0;

/// Camera starting position in world units.
pub const CAMERA_START: [f32; 3] = [10.0, 10.0, 50.0];

/// Inclusive spawn bounds per axis (world units). Z is ignored in planar mode.
pub const SPAWN_X: (i32, i32) = (1, 200);
pub const SPAWN_Y: (i32, i32) = (1, 100);
pub const SPAWN_Z: (i32, i32) = (1, 200);

/// Inclusive sphere radius bounds (world units).
pub const RADIUS_RANGE: (i32, i32) = (1, 2);

/// Mass given to every spawned sphere. Zero would make the bodies immovable.
pub const SPHERE_MASS: f32 = 1.0;

/// Inclusive speed bounds (units per second). Speeds are never positive: a nonzero speed moves
/// backwards along the drawn axis.
pub const SLOW_SPEED: (i32, i32) = (-3, 0);
pub const FAST_SPEED: (i32, i32) = (-100, 0);

/// Per-component magnitude of the per-frame perturbation impulse.
pub const PERTURB_IMPULSE: f32 = 0.003;

/// Display colors (linear RGB, 0..=1).
pub const SPHERE_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const HIT_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// Suggested upper bound shown in the sphere count prompt. Not enforced.
pub const SUGGESTED_SPHERE_COUNT: usize = 300;
