//! Fixed timestep simulation tick
//!
//! Phase order matters: later phases read state the earlier ones produced.
//! 1. controls  2. food maintenance  3. eating  4. self-collision
//! 5. chain propagation  6. particles

use super::debug::Bounded;
use super::state::{Control, ControlInput, GameEvent, World};
use crate::consts::*;
use crate::{approach_zero, clamp_to_bounds, heading};

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, dt: f32) {
    world.events.clear();
    world.time_ticks += 1;

    integrate_controls(&mut world.control, &world.input, dt);
    maintain_food(world);
    consume_food(world);
    check_self_collision(world);
    propagate_chain(world);
    update_particles(world, dt);
}

/// Accumulate held keys into velocities, apply friction, keep both in range
fn integrate_controls(control: &mut Control, input: &ControlInput, dt: f32) {
    if input.turn_left {
        control.angular_velocity -= TURN_ACCEL * dt;
    }
    if input.turn_right {
        control.angular_velocity += TURN_ACCEL * dt;
    }
    if input.accelerate {
        control.forward_velocity += FORWARD_ACCEL * dt;
    }
    if input.brake {
        control.forward_velocity -= FORWARD_ACCEL * dt;
    }
    control.clamp();

    control.angular_velocity = approach_zero(control.angular_velocity, TURN_DECAY * dt);
    control.forward_velocity = approach_zero(control.forward_velocity, FORWARD_DECAY * dt);
    control.clamp();
}

/// Spawn every food item still owed
fn maintain_food(world: &mut World) {
    while world.food_owed > 0 {
        world.spawn_food();
        world.food_owed -= 1;
    }
}

/// Eat whatever food overlaps the head: burst, grow by one, owe a replacement
fn consume_food(world: &mut World) {
    let head_bounds = *world.segments[0].bounds();
    let burst = world.settings.particle_burst;

    for i in (0..world.food.len()).rev() {
        if !world.food[i].bounds.intersects(&head_bounds) {
            continue;
        }
        let food = world.food.remove(i);
        let position = food.position();

        world.spawn_burst(position, burst);
        world.grow();
        world.food_owed += 1;

        let length = world.segments.len();
        log::debug!("Ate food {} at {:?}, length {}", food.id, position, length);
        world.events.push(GameEvent::FoodEaten { position });
        world.events.push(GameEvent::Grew { length });
    }
}

/// Index of the first segment the head may collide with.
///
/// Segments right behind the head always touch it, so a stretch of chain
/// at least as long as the head's own box is skipped, plus one more link.
pub(crate) fn first_collidable(world: &World) -> usize {
    let head_span = world.segments[0].span();
    let mut covered = 0.0;
    let mut idx = 1;
    while idx < world.segments.len() && covered < head_span {
        covered += world.segments[idx].span();
        idx += 1;
    }
    idx + 1
}

/// Cut the chain at the first segment outside the safe zone that touches the head
fn check_self_collision(world: &mut World) {
    let start = first_collidable(world);
    let head = &world.segments[0];

    let hit = world
        .segments
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, segment)| head.overlaps(*segment))
        .map(|(i, _)| i);

    if let Some(index) = hit {
        let lost = world.segments.split_off(index);
        log::info!(
            "Head bit segment {}: lost {} segments, {} remain",
            index,
            lost.len(),
            world.segments.len()
        );
        world.events.push(GameEvent::Bitten {
            index,
            lost: lost.len(),
        });
        world.discarded.extend(lost);
    }
}

/// Steer the head, then pull every segment after its parent in chain order
fn propagate_chain(world: &mut World) {
    let arena = world.settings.arena_size();
    let Control {
        angular_velocity,
        forward_velocity,
    } = world.control;

    let head = &mut world.segments[0];
    head.orientation += angular_velocity;
    let target = head.tip() + heading(head.orientation) * forward_velocity;
    head.track_target(clamp_to_bounds(target, arena));

    for i in 1..world.segments.len() {
        let parent = world.segments[i].parent.unwrap_or(i - 1);
        let target = world.segments[parent].anchor;
        world.segments[i].track_target(target);
    }
}

/// Move particles and drop the expired ones
fn update_particles(world: &mut World, dt: f32) {
    for particle in world.particles.iter_mut() {
        particle.update(dt);
    }
    world.particles.retain(|p| !p.is_expired());
}
