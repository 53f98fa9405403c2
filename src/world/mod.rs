//! Entity registry and capabilities.
//!
//! Dynamic entities (bots, dummies) live in a generational [`EntityArena`].
//! Systems hold [`EntityId`] handles instead of references: a handle is a
//! non-owning lookup key, and despawning bumps the slot generation so stale
//! handles simply miss. This is what lets a hook attached to an entity that
//! dies mid-swing fall back to Idle instead of dereferencing a dangling
//! pointer.
//!
//! The "hookable" and "damageable" behaviors are explicit capability traits
//! that entity types opt into, queried by the hook, explosion and melee
//! systems.

use glam::Vec2;

use crate::config::SimConfig;
use crate::physics::body::{Aabb, PhysicsBody};
use crate::physics::collision::resolve_collisions;
use crate::rng::SimpleRng;

/// Non-owning handle to an arena slot. Copyable, hashable, cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Generational arena of dynamic entities.
///
/// Slot reuse increments the generation, so an [`EntityId`] minted before a
/// despawn never resolves to the slot's new occupant.
#[derive(Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entity: Some(entity),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Remove the entity, invalidating every outstanding handle to it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entity.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entity.as_ref().map(|e| {
                (
                    EntityId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    e,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.entity.as_mut().map(move |e| {
                (
                    EntityId {
                        index: i as u32,
                        generation,
                    },
                    e,
                )
            })
        })
    }
}

/// An entity the grappling hook can latch onto.
pub trait Hookable {
    fn is_hookable(&self) -> bool;
    /// Grab hitbox, inflated by `margin` to make grappling forgiving.
    fn hook_hitbox(&self, margin: f32) -> Aabb;
    /// Point the rope visually terminates at while attached.
    fn hook_anchor(&self) -> Vec2;
}

/// An entity that can receive damage.
pub trait Damageable {
    fn take_damage(&mut self, amount: i32);
    fn is_dead(&self) -> bool;
}

/// Timers driving the trivial random walk of a bot.
#[derive(Debug, Clone, Copy)]
pub struct BotBrain {
    move_timer: i32,
    jump_timer: i32,
    /// Current walk direction: -1, 0 or 1.
    current_move: i32,
}

impl BotBrain {
    pub fn new() -> Self {
        Self {
            move_timer: 0,
            jump_timer: 0,
            current_move: 0,
        }
    }
}

impl Default for BotBrain {
    fn default() -> Self {
        Self::new()
    }
}

/// A dynamic simulation entity: physics body plus capabilities.
pub struct Entity {
    pub body: PhysicsBody,
    pub hookable: bool,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// Present on bots; `None` for inert dummies.
    pub brain: Option<BotBrain>,
}

impl Entity {
    /// An inert, hookable training dummy.
    pub fn dummy(position: Vec2, size: Vec2, health: i32) -> Self {
        Self {
            body: PhysicsBody::new(position, size),
            hookable: true,
            health,
            max_health: health,
            alive: true,
            brain: None,
        }
    }

    /// A wandering bot.
    pub fn bot(position: Vec2, config: &SimConfig) -> Self {
        Self {
            body: PhysicsBody::new(position, config.bot.size),
            hookable: true,
            health: config.bot.health,
            max_health: config.bot.health,
            alive: true,
            brain: Some(BotBrain::new()),
        }
    }

    /// Per-frame update: random-walk intent (bots only), velocity
    /// integration, wall resolution, kill-plane check.
    pub fn update(&mut self, walls: &[Aabb], config: &SimConfig, rng: &mut SimpleRng) {
        if !self.alive {
            return;
        }

        if let Some(brain) = self.brain.as_mut() {
            brain.move_timer -= 1;
            if brain.move_timer <= 0 {
                let (lo, hi) = config.bot.move_timer_range;
                brain.move_timer = rng.range_i32(lo, hi);
                brain.current_move = rng.range_i32(-1, 1);
            }
            if brain.current_move != 0 {
                self.body.apply_force(Vec2::new(
                    config.player.move_accel * brain.current_move as f32,
                    0.0,
                ));
            }

            brain.jump_timer -= 1;
            if brain.jump_timer <= 0 && self.body.grounded && rng.chance(config.bot.jump_chance) {
                self.body.velocity.y = -config.player.jump_force;
                let (lo, hi) = config.bot.jump_timer_range;
                brain.jump_timer = rng.range_i32(lo, hi);
            }
        }

        self.body.integrate_velocity(&config.physics);
        resolve_collisions(&mut self.body, walls);

        if self.body.position.y > config.bot.kill_plane_y {
            self.take_damage(999);
        }
    }
}

impl Hookable for Entity {
    fn is_hookable(&self) -> bool {
        self.hookable && self.alive
    }

    fn hook_hitbox(&self, margin: f32) -> Aabb {
        self.body.aabb().inflate(margin)
    }

    fn hook_anchor(&self) -> Vec2 {
        self.body.position
    }
}

impl Damageable for Entity {
    fn take_damage(&mut self, amount: i32) {
        if !self.alive {
            return;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
        }
    }

    fn is_dead(&self) -> bool {
        !self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy() -> Entity {
        Entity::dummy(Vec2::ZERO, Vec2::splat(30.0), 100)
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut arena = EntityArena::new();
        let id = arena.spawn(dummy());
        assert!(arena.contains(id));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).unwrap().health, 100);
    }

    #[test]
    fn test_despawn_invalidates_handle() {
        let mut arena = EntityArena::new();
        let id = arena.spawn(dummy());
        assert!(arena.despawn(id).is_some());
        assert!(!arena.contains(id));
        assert!(arena.get(id).is_none());
        assert!(arena.despawn(id).is_none());
    }

    #[test]
    fn test_slot_reuse_misses_stale_handle() {
        let mut arena = EntityArena::new();
        let stale = arena.spawn(dummy());
        arena.despawn(stale);

        // Reuses the slot with a bumped generation.
        let fresh = arena.spawn(dummy());
        assert!(arena.contains(fresh));
        assert!(!arena.contains(stale));
        assert_ne!(stale, fresh);
    }

    #[test]
    fn test_damage_kills_at_zero() {
        let mut e = dummy();
        e.take_damage(60);
        assert!(!e.is_dead());
        e.take_damage(60);
        assert!(e.is_dead());
        // Dead entities are no longer hookable.
        assert!(!e.is_hookable());
    }

    #[test]
    fn test_hook_hitbox_inflated() {
        let e = dummy();
        let hitbox = e.hook_hitbox(8.0);
        assert_eq!(hitbox.min, Vec2::splat(-23.0));
        assert_eq!(hitbox.max, Vec2::splat(23.0));
    }

    #[test]
    fn test_bot_walk_is_deterministic_under_seed() {
        let config = SimConfig::default();
        let walls = [Aabb::from_position_size(
            Vec2::new(-400.0, 100.0),
            Vec2::new(800.0, 40.0),
        )];

        let run = |seed: u32| {
            let mut bot = Entity::bot(Vec2::new(0.0, 50.0), &config);
            let mut rng = SimpleRng::new(seed);
            for _ in 0..600 {
                bot.update(&walls, &config, &mut rng);
            }
            bot.body.position
        };

        assert_eq!(run(1234), run(1234));
    }

    #[test]
    fn test_kill_plane_is_lethal() {
        let config = SimConfig::default();
        let mut bot = Entity::bot(Vec2::new(0.0, 2500.0), &config);
        let mut rng = SimpleRng::new(1);
        bot.update(&[], &config, &mut rng);
        assert!(bot.is_dead());
    }
}
