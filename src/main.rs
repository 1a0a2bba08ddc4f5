//! IK Snake headless runner
//!
//! Drives the simulation the way a frontend would (fixed-timestep
//! accumulator fed by variable frame times) with an autopilot standing in
//! for the keyboard, then prints the final frame as JSON.
//!
//! Usage: `ik-snake [settings.json] [frames]`

use ik_snake::consts::*;
use ik_snake::sim::{ControlInput, GameEvent, World};
use ik_snake::{Settings, SimResult, normalize_angle};

/// Frame time the runner pretends the display delivers
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 3600;

/// Runner state: the world plus fixed-step bookkeeping
struct Game {
    world: World,
    accumulator: f32,
    bites: u32,
    meals: u32,
}

impl Game {
    fn new(settings: Settings) -> Self {
        Self {
            world: World::new(settings),
            accumulator: 0.0,
            bites: 0,
            meals: 0,
        }
    }

    /// Run as many fixed ticks as the elapsed frame time allows
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&self.world);
            self.world.set_input(input);
            self.world.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.world.events() {
                match event {
                    GameEvent::FoodEaten { .. } => self.meals += 1,
                    GameEvent::Bitten { .. } => self.bites += 1,
                    GameEvent::Grew { .. } => {}
                }
            }
        }
    }
}

/// Steer toward the nearest food, damping the turn as the heading lines up
fn autopilot(world: &World) -> ControlInput {
    let head = world.head();
    let tip = head.tip();

    let Some(target) = world
        .food()
        .iter()
        .map(|f| f.position())
        .min_by(|a, b| {
            a.distance_squared(tip)
                .partial_cmp(&b.distance_squared(tip))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return ControlInput {
            accelerate: true,
            ..Default::default()
        };
    };

    let to_food = target - tip;
    let delta = normalize_angle(to_food.y.atan2(to_food.x) - head.orientation);
    let wanted = (delta * 0.1).clamp(-MAX_TURN, MAX_TURN);
    let current = world.control().angular_velocity;
    const DEADBAND: f32 = 0.002;

    ControlInput {
        turn_left: current > wanted + DEADBAND,
        turn_right: current < wanted - DEADBAND,
        accelerate: delta.abs() < 1.5,
        brake: false,
    }
}

fn run() -> SimResult<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    log::info!(
        "Running {} frames, seed {}, arena {}x{}",
        frames,
        settings.seed,
        settings.arena_width,
        settings.arena_height
    );

    let mut game = Game::new(settings);
    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    log::info!(
        "Finished at tick {}: length {}, {} eaten, {} bites, {} segments discarded",
        game.world.time_ticks(),
        game.world.chain_len(),
        game.meals,
        game.bites,
        game.world.discarded().len()
    );

    let json = serde_json::to_string_pretty(&game.world.snapshot())?;
    println!("{}", json);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("IK Snake (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
