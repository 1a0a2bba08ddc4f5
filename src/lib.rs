//! IK Snake - an articulated-chain arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (OBB collisions, chain kinematics, world state)
//! - `settings`: Data-driven tunables loaded from JSON
//! - `error`: Errors for the few fallible operations (settings I/O and validation)

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::Settings;
pub use sim::{World, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep (10 ms)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playable area, origin at the top-left corner
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Chain link length and the width of the head / first grown segments
    pub const MAX_WIDTH: f32 = 24.0;
    /// Width floor for tapered tail segments
    pub const MIN_WIDTH: f32 = 6.0;
    /// Power-law exponent for tail tapering
    pub const TAPER_EXPONENT: f32 = 0.4;

    /// Food is a square of this full extent
    pub const FOOD_SIZE: f32 = 16.0;
    /// Number of food items kept on the field
    pub const FOOD_TARGET: u32 = 3;

    /// Particles spawned when food is eaten
    pub const PARTICLE_BURST: usize = 25;
    pub const PARTICLE_MAX_SPEED: f32 = 100.0;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_RADIUS_RANGE: f32 = 3.0;
    /// Seconds
    pub const PARTICLE_LIFETIME: f32 = 1.0;

    /// Steering: angular velocity is radians added to the head per tick
    pub const TURN_ACCEL: f32 = 5.0 * PI / 180.0;
    pub const MAX_TURN: f32 = 10.0 * PI / 180.0;
    pub const TURN_DECAY: f32 = 3.0 * PI / 180.0;

    /// Throttle: forward velocity is the distance the head target leads the tip
    pub const FORWARD_ACCEL: f32 = 10.0;
    pub const MAX_FORWARD: f32 = 3.0;
    pub const FORWARD_DECAY: f32 = 5.0;

    /// Below this length a direction vector is treated as degenerate
    pub const DEGENERATE_EPSILON: f32 = 1e-6;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a point into the rectangle `[0, size.x] x [0, size.y]`
#[inline]
pub fn clamp_to_bounds(point: Vec2, size: Vec2) -> Vec2 {
    point.clamp(Vec2::ZERO, size)
}

/// Move `value` toward zero by `amount`, stopping at zero instead of crossing it
#[inline]
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    if value.abs() <= amount {
        0.0
    } else {
        value - value.signum() * amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-1.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_is_unit() {
        for i in 0..16 {
            let a = i as f32 * 0.4;
            assert!((heading(a).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let size = Vec2::new(100.0, 50.0);
        assert_eq!(clamp_to_bounds(Vec2::new(-5.0, 70.0), size), Vec2::new(0.0, 50.0));
        assert_eq!(clamp_to_bounds(Vec2::new(20.0, 10.0), size), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_approach_zero_never_crosses() {
        assert_eq!(approach_zero(0.0, 1.0), 0.0);
        assert_eq!(approach_zero(0.5, 1.0), 0.0);
        assert_eq!(approach_zero(-0.5, 1.0), 0.0);
        assert!((approach_zero(2.0, 0.5) - 1.5).abs() < 1e-6);
        assert!((approach_zero(-2.0, 0.5) + 1.5).abs() < 1e-6);
    }
}
