//! Melee swings and the bounce laser.
//!
//! Both weapons are instant: they resolve fully in the frame they fire.
//! Melee is a radial shove around the attacker; the laser marches a
//! reflecting ray through the wall set and hits at most one entity.

use glam::Vec2;

use crate::config::CombatConfig;
use crate::events::{COLOR_DAMAGE, SimEvent};
use crate::physics::body::Aabb;
use crate::physics::raycast::bounce_raycast;
use crate::world::{Damageable, EntityArena, EntityId};

/// Shove and damage every living entity within melee reach of `origin`.
/// Returns true if anything was hit.
pub fn melee_swing(
    origin: Vec2,
    aim_dir: Vec2,
    entities: &mut EntityArena,
    config: &CombatConfig,
    events: &mut Vec<SimEvent>,
) -> bool {
    let dir = aim_dir.normalize_or_zero();
    let mut hit_any = false;

    for (id, entity) in entities.iter_mut() {
        if !entity.alive {
            continue;
        }
        let dist = (entity.body.position - origin).length();
        if dist > config.melee_range + config.melee_margin {
            continue;
        }

        entity.body.velocity += dir * config.melee_force;
        entity.body.grounded = false;
        entity.take_damage(config.melee_damage);
        hit_any = true;

        events.push(SimEvent::EmitParticles {
            position: entity.body.position,
            count: 6,
            color: COLOR_DAMAGE,
            speed: (1.0, 3.0),
            life: (8, 20),
        });
        events.push(SimEvent::DamageDealt {
            target: id,
            amount: config.melee_damage,
        });
    }
    hit_any
}

/// Fire the bounce laser from `origin` along `aim_dir`.
///
/// The beam reflects off walls up to the configured bounce budget and stops
/// in the first living entity it crosses, knocking it back along the beam.
/// Returns the traced trajectory for rendering.
pub fn fire_laser(
    origin: Vec2,
    aim_dir: Vec2,
    walls: &[Aabb],
    entities: &mut EntityArena,
    config: &CombatConfig,
    events: &mut Vec<SimEvent>,
) -> Vec<Vec2> {
    let candidates: Vec<(EntityId, Aabb)> = entities
        .iter()
        .filter(|(_, e)| e.alive)
        .map(|(id, e)| (id, e.body.aabb()))
        .collect();
    let hitboxes: Vec<Aabb> = candidates.iter().map(|(_, aabb)| *aabb).collect();

    let result = bounce_raycast(origin, aim_dir, walls, &hitboxes, &config.laser_ray);

    if let Some(hit) = result.hit {
        let (id, _) = candidates[hit.target];
        if let Some(entity) = entities.get_mut(id) {
            entity.body.velocity += hit.direction * config.laser_knockback;
            entity.body.grounded = false;
            entity.take_damage(config.laser_damage);
            events.push(SimEvent::EmitParticles {
                position: hit.point,
                count: 10,
                color: COLOR_DAMAGE,
                speed: (1.0, 4.0),
                life: (10, 25),
            });
            events.push(SimEvent::DamageDealt {
                target: id,
                amount: config.laser_damage,
            });
        }
    }

    result.trajectory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Entity;

    fn dummy_at(pos: Vec2) -> Entity {
        Entity::dummy(pos, Vec2::splat(30.0), 100)
    }

    #[test]
    fn test_melee_hits_in_range_only() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();

        let near = entities.spawn(dummy_at(Vec2::new(40.0, 0.0)));
        let far = entities.spawn(dummy_at(Vec2::new(300.0, 0.0)));

        assert!(melee_swing(
            Vec2::ZERO,
            Vec2::X,
            &mut entities,
            &config,
            &mut events
        ));
        assert_eq!(
            entities.get(near).unwrap().health,
            100 - config.melee_damage
        );
        assert_eq!(entities.get(far).unwrap().health, 100);
    }

    #[test]
    fn test_melee_shoves_along_aim() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();

        let id = entities.spawn(dummy_at(Vec2::new(40.0, 0.0)));
        melee_swing(Vec2::ZERO, Vec2::X, &mut entities, &config, &mut events);

        let target = entities.get(id).unwrap();
        assert!((target.body.velocity.x - config.melee_force).abs() < 1e-5);
        assert!(!target.body.grounded);
    }

    #[test]
    fn test_melee_whiff_returns_false() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();
        assert!(!melee_swing(
            Vec2::ZERO,
            Vec2::X,
            &mut entities,
            &config,
            &mut events
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn test_laser_damages_first_entity_in_path() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();

        let id = entities.spawn(dummy_at(Vec2::new(200.0, 0.0)));
        let trajectory = fire_laser(
            Vec2::ZERO,
            Vec2::X,
            &[],
            &mut entities,
            &config,
            &mut events,
        );

        assert!(trajectory.len() >= 2);
        let target = entities.get(id).unwrap();
        assert_eq!(target.health, 100 - config.laser_damage);
        assert!(target.body.velocity.x > 0.0);
    }

    #[test]
    fn test_laser_reaches_target_around_a_bounce() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();

        // Wall ahead, target behind the shooter: only the reflection hits.
        let wall = Aabb::new(Vec2::new(100.0, -50.0), Vec2::new(140.0, 50.0));
        let id = entities.spawn(dummy_at(Vec2::new(-80.0, 0.0)));

        fire_laser(
            Vec2::ZERO,
            Vec2::X,
            &[wall],
            &mut entities,
            &config,
            &mut events,
        );

        let target = entities.get(id).unwrap();
        assert_eq!(target.health, 100 - config.laser_damage);
        // Knocked along the reflected beam, away from the wall.
        assert!(target.body.velocity.x < 0.0);
    }

    #[test]
    fn test_laser_miss_traces_full_path() {
        let config = CombatConfig::default();
        let mut entities = EntityArena::new();
        let mut events = Vec::new();

        let trajectory = fire_laser(
            Vec2::ZERO,
            Vec2::X,
            &[],
            &mut entities,
            &config,
            &mut events,
        );
        assert!(events.is_empty());
        let end = trajectory.last().unwrap();
        assert!((end.x - config.laser_ray.max_distance).abs() < config.laser_ray.step);
    }
}
