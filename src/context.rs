/// Shared game context
///
/// The slice of live game state the tutorial reads and writes. The host owns
/// the real simulation and camera; it mirrors the relevant fields here before
/// each frame and applies camera changes back afterwards.

use glam::Vec3;

/// A celestial body or vessel the camera can reference
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub position: Vec3,
    pub radius: f32,
}

impl Body {
    pub fn new(name: impl Into<String>, position: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            position,
            radius,
        }
    }
}

/// What the camera orbits around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraTarget {
    #[default]
    Free,
    Spaceship,
    Earth,
}

/// Orbit camera parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    pub follow_target: CameraTarget,
    pub look_at: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: 50.0,
            follow_target: CameraTarget::Free,
            look_at: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameContext {
    /// Simulation pause (not the tutorial panel's presentation pause)
    pub is_paused: bool,

    pub camera: CameraState,

    pub spaceship: Option<Body>,

    pub earth_body: Option<Body>,

    /// Pending burn the player is planning while paused
    pub velocity_adjustment: Vec3,

    /// Remaining post-collision cooldown in seconds; 0 when none
    pub recent_collision_time: f32,

    /// Set by the simulation once the tutorial checkpoint is reached
    pub checkpoint_collected: bool,

    /// Whether the player finished the tutorial in an earlier session
    pub tutorial_completed: bool,

    /// Written by the tutorial while it runs
    pub tutorial_mode: bool,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spaceship(mut self, spaceship: Body) -> Self {
        self.spaceship = Some(spaceship);
        self
    }

    pub fn with_earth(mut self, earth: Body) -> Self {
        self.earth_body = Some(earth);
        self
    }

    /// Count down the collision cooldown
    pub fn advance_cooldowns(&mut self, dt: f32) {
        self.recent_collision_time = (self.recent_collision_time - dt).max(0.0);
    }
}
