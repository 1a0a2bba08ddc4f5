//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven from outside through `World::step`
//! - Seeded RNG only
//! - Stable iteration order (chain index order, head first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod debug;
pub mod obb;
pub mod segment;
pub mod state;
pub mod tick;

pub use collision::{Interval, project_points, sat_overlap};
pub use debug::{Bounded, DebugBox};
pub use obb::Obb;
pub use segment::Segment;
pub use state::{
    Control, ControlInput, Food, GameEvent, Particle, ParticleView, SegmentView, Snapshot, World,
};
pub use tick::tick;
