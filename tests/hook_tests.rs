//! Grappling hook behavior through the full simulation loop.

use glam::Vec2;
use grapple_core::input::ActionState;
use grapple_core::physics::body::Aabb;
use grapple_core::systems::hook::HookState;
use grapple_core::world::Damageable;
use grapple_core::{SimConfig, SimEvent, Simulation};

fn room() -> Vec<Aabb> {
    vec![
        // Floor.
        Aabb::from_position_size(Vec2::new(-600.0, 300.0), Vec2::new(1200.0, 60.0)),
        // Ceiling block within hook range of the floor.
        Aabb::from_position_size(Vec2::new(-60.0, 0.0), Vec2::new(120.0, 40.0)),
    ]
}

fn settle(sim: &mut Simulation, walls: &[Aabb]) {
    let idle = ActionState::default();
    for _ in 0..1200 {
        sim.step(&idle, walls);
        if sim.player.body.grounded {
            return;
        }
    }
    panic!("player never landed");
}

#[test]
fn hook_attaches_to_ceiling_and_pulls_player_up() {
    let mut sim = Simulation::new(SimConfig::default(), Vec2::new(0.0, 200.0), 5);
    let walls = room();
    settle(&mut sim, &walls);

    let mut actions = ActionState::default();
    actions.hook_hold = true;
    actions.aim_target = Vec2::new(0.0, 20.0);

    let mut attached_events = 0;
    for _ in 0..60 {
        let events = sim.step(&actions, &walls);
        attached_events += events
            .iter()
            .filter(|e| matches!(e, SimEvent::HookAttached { target: None, .. }))
            .count();
        if sim.player.hook.is_attached() {
            break;
        }
    }
    assert!(sim.player.hook.is_attached());
    assert_eq!(attached_events, 1);

    // Under the rope pull the player rises off the floor toward the anchor.
    let start = sim.player.body.position.y;
    let start_rope = sim.player.hook.tension(&sim.player.body, &sim.config.hook);
    assert!(start_rope > 0.0 && start_rope <= 1.0);
    for _ in 0..300 {
        sim.step(&actions, &walls);
    }
    assert!(sim.player.body.position.y < start, "pull must win over gravity");
    assert!(sim.player.hook.tension(&sim.player.body, &sim.config.hook) < start_rope);
}

#[test]
fn releasing_the_key_drops_the_rope() {
    let mut sim = Simulation::new(SimConfig::default(), Vec2::new(0.0, 200.0), 5);
    let walls = room();
    settle(&mut sim, &walls);

    let mut actions = ActionState::default();
    actions.hook_hold = true;
    actions.aim_target = Vec2::new(0.0, 20.0);
    for _ in 0..60 {
        sim.step(&actions, &walls);
        if sim.player.hook.is_attached() {
            break;
        }
    }
    assert!(sim.player.hook.is_attached());

    actions.hook_hold = false;
    sim.step(&actions, &walls);
    assert_eq!(sim.player.hook.state(), HookState::Idle);
}

#[test]
fn hook_cast_into_open_air_expires_at_range() {
    let mut sim = Simulation::new(SimConfig::default(), Vec2::new(0.0, 200.0), 5);
    let walls = vec![Aabb::from_position_size(
        Vec2::new(-600.0, 300.0),
        Vec2::new(1200.0, 60.0),
    )];
    settle(&mut sim, &walls);

    let mut actions = ActionState::default();
    actions.hook_hold = true;
    // Nothing up there to grab.
    actions.aim_target = Vec2::new(0.0, -1000.0);

    sim.step(&actions, &walls);
    assert_eq!(sim.player.hook.state(), HookState::Flying);

    let range = sim.config.hook.range;
    let fly_speed = sim.config.hook.fly_speed;
    let frames = (range / fly_speed) as u32 + 4;
    for _ in 0..frames {
        sim.step(&actions, &walls);
    }
    assert_eq!(sim.player.hook.state(), HookState::Idle);
}

#[test]
fn hooked_entity_is_yanked_and_dragged() {
    let mut sim = Simulation::new(SimConfig::default(), Vec2::new(-100.0, 250.0), 5);
    let walls = vec![Aabb::from_position_size(
        Vec2::new(-600.0, 300.0),
        Vec2::new(1200.0, 60.0),
    )];
    settle(&mut sim, &walls);

    let id = sim.spawn_dummy(Vec2::new(100.0, 250.0), 1000);
    let idle = ActionState::default();
    for _ in 0..120 {
        sim.step(&idle, &walls);
    }
    let start_gap =
        (sim.entities.get(id).unwrap().body.position - sim.player.body.position).length();

    let mut actions = ActionState::default();
    actions.hook_hold = true;
    actions.aim_target = Vec2::new(100.0, 285.0);
    for _ in 0..60 {
        sim.step(&actions, &walls);
        if sim.player.hook.is_attached() {
            break;
        }
    }
    assert!(sim.player.hook.is_attached());
    assert_eq!(sim.player.hook.target(), Some(id));

    for _ in 0..240 {
        sim.step(&actions, &walls);
    }
    let end_gap =
        (sim.entities.get(id).unwrap().body.position - sim.player.body.position).length();
    assert!(
        end_gap < start_gap,
        "spring must draw the pair together: {start_gap} -> {end_gap}"
    );
}

#[test]
fn killing_the_hooked_target_releases_the_rope() {
    let mut sim = Simulation::new(SimConfig::default(), Vec2::new(-100.0, 250.0), 5);
    let walls = vec![Aabb::from_position_size(
        Vec2::new(-600.0, 300.0),
        Vec2::new(1200.0, 60.0),
    )];
    settle(&mut sim, &walls);

    let id = sim.spawn_dummy(Vec2::new(100.0, 250.0), 1000);
    let mut actions = ActionState::default();
    actions.hook_hold = true;
    actions.aim_target = Vec2::new(100.0, 285.0);
    for _ in 0..60 {
        sim.step(&actions, &walls);
        if sim.player.hook.is_attached() {
            break;
        }
    }
    assert_eq!(sim.player.hook.target(), Some(id));

    // Kill the target out from under the rope.
    sim.entities.get_mut(id).unwrap().health = 0;
    sim.entities.get_mut(id).unwrap().take_damage(1);
    sim.step(&actions, &walls);

    assert!(!sim.entities.contains(id));
    assert_eq!(sim.player.hook.state(), HookState::Idle);
}
