/// Camera directives and the non-interruption guard
///
/// Directives reposition the shared camera when a step is entered. Each one
/// checks for the body it needs and does nothing when it is missing.

use std::f32::consts::FRAC_PI_2;

use crate::context::{CameraTarget, GameContext};

/// Why a camera directive was suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Paused with a pending velocity adjustment being planned
    Maneuvering,

    /// A collision happened within the cooldown window
    CollisionCooldown,
}

impl SuppressReason {
    pub fn description(&self) -> &'static str {
        match self {
            SuppressReason::Maneuvering => "player is planning a maneuver",
            SuppressReason::CollisionCooldown => "recent collision",
        }
    }
}

/// Decides whether step entry may move the camera
#[derive(Debug, Clone, Copy)]
pub struct CameraGuard {
    maneuver_epsilon: f32,
}

impl CameraGuard {
    pub fn new(maneuver_epsilon: f32) -> Self {
        Self { maneuver_epsilon }
    }

    /// Returns the reason to suppress, or None if the directive may run
    pub fn check(&self, ctx: &GameContext) -> Option<SuppressReason> {
        if ctx.is_paused && ctx.velocity_adjustment.length_squared() > self.maneuver_epsilon {
            return Some(SuppressReason::Maneuvering);
        }

        if ctx.recent_collision_time > 0.0 {
            return Some(SuppressReason::CollisionCooldown);
        }

        None
    }
}

impl Default for CameraGuard {
    fn default() -> Self {
        Self::new(1e-3)
    }
}

/// Wide view of Earth
pub fn overview_earth(ctx: &mut GameContext) {
    let Some(earth) = ctx.earth_body.as_ref() else {
        return;
    };

    let look_at = earth.position;
    let distance = earth.radius * 3.0;
    ctx.camera.follow_target = CameraTarget::Earth;
    ctx.camera.look_at = look_at;
    ctx.camera.distance = distance;
    ctx.camera.yaw = 0.0;
    ctx.camera.pitch = 0.3;
}

/// Close follow view of the spaceship
pub fn follow_spaceship(ctx: &mut GameContext) {
    let Some(ship) = ctx.spaceship.as_ref() else {
        return;
    };

    let look_at = ship.position;
    ctx.camera.follow_target = CameraTarget::Spaceship;
    ctx.camera.look_at = look_at;
    ctx.camera.distance = 25.0;
}

/// Chase view behind the spaceship, level with its orbit
pub fn chase_spaceship(ctx: &mut GameContext) {
    let Some(ship) = ctx.spaceship.as_ref() else {
        return;
    };

    let look_at = ship.position;
    ctx.camera.follow_target = CameraTarget::Spaceship;
    ctx.camera.look_at = look_at;
    ctx.camera.distance = 20.0;
    ctx.camera.yaw = std::f32::consts::PI;
    ctx.camera.pitch = 0.15;
}

/// Top-down view over the spaceship for planning burns
pub fn top_down_spaceship(ctx: &mut GameContext) {
    let Some(ship) = ctx.spaceship.as_ref() else {
        return;
    };

    let look_at = ship.position;
    ctx.camera.follow_target = CameraTarget::Spaceship;
    ctx.camera.look_at = look_at;
    ctx.camera.distance = 40.0;
    // Straight down would make yaw degenerate
    ctx.camera.pitch = FRAC_PI_2 - 0.05;
}

/// Point the camera at Earth from far enough to see the checkpoint
pub fn look_at_earth(ctx: &mut GameContext) {
    let Some(earth) = ctx.earth_body.as_ref() else {
        return;
    };

    let look_at = earth.position;
    let distance = earth.radius * 5.0;
    ctx.camera.follow_target = CameraTarget::Earth;
    ctx.camera.look_at = look_at;
    ctx.camera.distance = distance;
}
