//! World state and the entities it owns
//!
//! Everything a tick reads or writes lives in [`World`]. Renderers get
//! read-only accessors or a serializable [`Snapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::debug::{Bounded, DebugBox};
use super::obb::Obb;
use super::segment::Segment;
use crate::consts::*;
use crate::settings::Settings;

/// Held-key state for one tick (polled, not queued)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

/// Steering accumulators with momentum
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Radians added to the head's orientation each tick
    pub angular_velocity: f32,
    /// Distance the head's target leads its tip each tick
    pub forward_velocity: f32,
}

impl Control {
    /// Clamp both accumulators into their allowed ranges
    pub fn clamp(&mut self) {
        self.angular_velocity = self.angular_velocity.clamp(-MAX_TURN, MAX_TURN);
        self.forward_velocity = self.forward_velocity.clamp(0.0, MAX_FORWARD);
    }
}

/// A food item: a static box eaten on contact with the head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: u32,
    pub bounds: Obb,
}

impl Food {
    pub fn position(&self) -> Vec2 {
        self.bounds.center
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds the particle lives in total
    pub lifetime: f32,
    /// Seconds left
    pub remaining: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            lifetime,
            remaining: lifetime,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining -= dt;
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fade-out opacity
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.lifetime).clamp(0.0, 1.0).powf(0.25)
    }
}

/// Something that happened during the last tick, for UI/feedback layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food was eaten at this position
    FoodEaten { position: Vec2 },
    /// The chain gained a segment
    Grew { length: usize },
    /// The head hit its own body; segments from `index` on were lost
    Bitten { index: usize, lost: usize },
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
    /// Chain, head first
    pub(crate) segments: Vec<Segment>,
    /// Segments cut off by self-collision (never reused)
    pub(crate) discarded: Vec<Segment>,
    pub(crate) food: Vec<Food>,
    pub(crate) particles: Vec<Particle>,
    pub(crate) control: Control,
    pub(crate) input: ControlInput,
    /// Food spawns still owed by the maintenance phase
    pub(crate) food_owed: u32,
    pub(crate) debug: bool,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Events from the most recent tick
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create a world from settings (assumed validated)
    pub fn new(settings: Settings) -> Self {
        let mut world = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            segments: Vec::new(),
            discarded: Vec::new(),
            food: Vec::new(),
            particles: Vec::new(),
            control: Control::default(),
            input: ControlInput::default(),
            food_owed: settings.food_count,
            debug: settings.debug,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            settings,
        };
        world.spawn_head();
        world
    }

    /// Default settings with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings::with_seed(seed))
    }

    /// Restart: fresh chain, no food on the field, no particles, re-seeded RNG
    pub fn reset(&mut self) {
        let debug = self.debug;
        *self = Self::new(self.settings.clone());
        self.debug = debug;
        log::info!("World reset");
    }

    fn spawn_head(&mut self) {
        let center = self.settings.arena_size() / 2.0;
        self.segments
            .push(Segment::root(center, 0.0, MAX_WIDTH, MAX_WIDTH));
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a food item at a random spot with random rotation
    pub fn spawn_food(&mut self) {
        let arena = self.settings.arena_size();
        let pos = Vec2::new(
            self.rng.random::<f32>() * arena.x,
            self.rng.random::<f32>() * arena.y,
        );
        let rotation = self.rng.random::<f32>() * std::f32::consts::TAU;
        let id = self.next_entity_id();
        self.food.push(Food {
            id,
            bounds: Obb::new(pos, Vec2::splat(self.settings.food_size), rotation),
        });
    }

    /// Spray `count` particles outward from `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.random::<f32>() * PARTICLE_MAX_SPEED;
            let vel = Vec2::new(angle.sin(), angle.cos()) * speed;
            let radius = PARTICLE_MIN_RADIUS + PARTICLE_RADIUS_RANGE * self.rng.random::<f32>();
            self.particles
                .push(Particle::new(pos, vel, radius, PARTICLE_LIFETIME));
        }
    }

    /// Append a new segment behind the current tail
    pub fn grow(&mut self) {
        let tail = self.segments.len() - 1;
        let segment = self.segments[tail].grow(tail);
        self.segments.push(segment);
    }

    // === Control ===

    /// Sample held keys for the next tick
    pub fn set_control(&mut self, turn_left: bool, turn_right: bool, accelerate: bool, brake: bool) {
        self.input = ControlInput {
            turn_left,
            turn_right,
            accelerate,
            brake,
        };
    }

    pub fn set_input(&mut self, input: ControlInput) {
        self.input = input;
    }

    pub fn input(&self) -> ControlInput {
        self.input
    }

    pub fn control(&self) -> Control {
        self.control
    }

    /// Advance the simulation by one fixed tick
    pub fn step(&mut self, dt: f32) {
        super::tick::tick(self, dt);
    }

    // === Read-only views ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn discarded(&self) -> &[Segment] {
        &self.discarded
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn food_owed(&self) -> u32 {
        self.food_owed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Number of segments, shown as the player's length
    pub fn chain_len(&self) -> usize {
        self.segments.len()
    }

    // === Debug overlay ===

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        log::debug!("Debug overlay {}", if self.debug { "on" } else { "off" });
    }

    /// Collision boxes for layered debug drawing, or `None` when disabled
    pub fn debug_overlay(&self) -> Option<Vec<DebugBox>> {
        if !self.debug {
            return None;
        }
        let boxes = self
            .food
            .iter()
            .map(|f| f.debug_box())
            .chain(self.segments.iter().map(|s| s.debug_box()))
            .collect();
        Some(boxes)
    }

    /// Serializable view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            chain_length: self.segments.len(),
            segments: self
                .segments
                .iter()
                .map(|s| SegmentView {
                    anchor: s.anchor,
                    orientation: s.orientation,
                    length: s.length,
                    width: s.width,
                })
                .collect(),
            food: self.food.iter().map(|f| f.bounds).collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    radius: p.radius,
                    alpha: p.alpha(),
                })
                .collect(),
            debug: self.debug_overlay(),
        }
    }
}

/// Drawable view of one segment
#[derive(Debug, Clone, Serialize)]
pub struct SegmentView {
    pub anchor: Vec2,
    pub orientation: f32,
    pub length: f32,
    pub width: f32,
}

/// Drawable view of one particle
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub chain_length: usize,
    pub segments: Vec<SegmentView>,
    pub food: Vec<Obb>,
    pub particles: Vec<ParticleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<DebugBox>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_has_single_root() {
        let world = World::with_seed(1);
        assert_eq!(world.chain_len(), 1);
        assert!(world.head().is_root());
        assert_eq!(world.head().anchor, Settings::default().arena_size() / 2.0);
        assert!(world.food().is_empty());
        assert_eq!(world.food_owed(), FOOD_TARGET);
        assert!(world.particles().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut world = World::with_seed(42);
        world.set_control(false, true, true, false);
        for _ in 0..200 {
            world.step(SIM_DT);
        }
        world.reset();
        let once = world.clone();
        world.reset();
        assert_eq!(world, once);
        assert_eq!(once, World::with_seed(42));
    }

    #[test]
    fn test_reset_keeps_debug_flag() {
        let mut world = World::with_seed(3);
        world.toggle_debug();
        world.reset();
        assert!(world.debug_enabled());
    }

    #[test]
    fn test_particle_fades_and_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 1.0);
        assert!((p.alpha() - 1.0).abs() < 1e-6);
        p.update(0.5);
        assert!(p.pos.abs_diff_eq(Vec2::new(5.0, 0.0), 1e-5));
        assert!(p.alpha() < 1.0 && p.alpha() > 0.0);
        p.update(0.5);
        assert!(p.is_expired());
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_burst_spawns_requested_count() {
        let mut world = World::with_seed(5);
        world.spawn_burst(Vec2::new(10.0, 10.0), 25);
        assert_eq!(world.particles().len(), 25);
        for p in world.particles() {
            assert!(p.vel.length() <= PARTICLE_MAX_SPEED + 1e-3);
            assert!(p.radius >= PARTICLE_MIN_RADIUS);
            assert!(p.radius <= PARTICLE_MIN_RADIUS + PARTICLE_RADIUS_RANGE);
        }
    }

    #[test]
    fn test_food_spawns_inside_arena() {
        let mut world = World::with_seed(9);
        for _ in 0..50 {
            world.spawn_food();
        }
        let arena = world.settings().arena_size();
        for f in world.food() {
            let p = f.position();
            assert!(p.x >= 0.0 && p.x <= arena.x);
            assert!(p.y >= 0.0 && p.y <= arena.y);
        }
        let mut ids: Vec<u32> = world.food().iter().map(|f| f.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_debug_overlay_gated() {
        let mut world = World::with_seed(2);
        world.grow();
        assert!(world.debug_overlay().is_none());
        world.set_debug(true);
        let overlay = world.debug_overlay().unwrap();
        assert_eq!(overlay.len(), 2);
        assert!((overlay[0].alpha - 4.0).abs() < 1e-6);
        assert!((overlay[1].alpha - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = World::with_seed(11);
        world.step(SIM_DT);
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        assert!(json.contains("\"chain_length\":1"));
        assert!(!json.contains("\"debug\""));
    }
}
