//! Grenade projectiles and radial explosions.
//!
//! Projectiles are pooled in a flat `Vec` with a hard cap. They fly under
//! half-strength gravity with no drag, detonate on wall or body contact and
//! on lifetime expiry, and despawn silently when they leave the world
//! envelope. An explosion applies radial knockback with linear falloff to
//! the player and every living entity in range, and deals damage in
//! proportion to the knockback actually delivered.

use glam::Vec2;

use crate::config::{PhysicsConfig, SimConfig};
use crate::events::{COLOR_EXPLOSION, SimEvent};
use crate::physics::body::{Aabb, PhysicsBody};
use crate::world::{Damageable, EntityArena, EntityId};

/// Who launched a projectile; the owner is immune during the grace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Entity(EntityId),
}

/// One in-flight grenade.
pub struct Projectile {
    pub body: PhysicsBody,
    pub active: bool,
    /// Frames until self-detonation.
    pub lifetime: u32,
    /// Frames during which body contact is ignored (muzzle safety).
    pub grace: u32,
    pub owner: ProjectileOwner,
}

/// Pool of live projectiles plus explosion resolution.
pub struct ProjectileSystem {
    projectiles: Vec<Projectile>,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
        }
    }

    /// Spawn a projectile. Returns false when the pool is at capacity.
    pub fn fire(
        &mut self,
        position: Vec2,
        direction: Vec2,
        owner: ProjectileOwner,
        config: &SimConfig,
    ) -> bool {
        if self.projectiles.len() >= config.projectile.max_projectiles {
            return false;
        }
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return false;
        }
        let mut body = PhysicsBody::new(position, config.projectile.size);
        body.velocity = dir * config.projectile.speed;
        self.projectiles.push(Projectile {
            body,
            active: true,
            lifetime: config.projectile.lifetime,
            grace: config.projectile.grace_frames,
            owner,
        });
        true
    }

    /// Advance every projectile one frame, detonating on contact or expiry.
    pub fn update(
        &mut self,
        walls: &[Aabb],
        player_body: &mut PhysicsBody,
        entities: &mut EntityArena,
        config: &SimConfig,
        events: &mut Vec<SimEvent>,
    ) {
        // Reduced gravity, no drag, no fall cap: grenades arc lazily.
        let flight = PhysicsConfig {
            gravity: config.physics.gravity * config.projectile.gravity_scale,
            terminal_velocity: f32::INFINITY,
            air_drag: 1.0,
        };

        let mut detonations = Vec::new();

        for projectile in &mut self.projectiles {
            if !projectile.active {
                continue;
            }
            projectile.body.integrate(&flight);

            if projectile.grace > 0 {
                projectile.grace -= 1;
            }

            if projectile.lifetime == 0 {
                projectile.active = false;
                detonations.push(projectile.body.position);
                continue;
            }
            projectile.lifetime -= 1;

            if !config.world.bounds.contains_point(projectile.body.position) {
                // Left the level: no blast.
                projectile.active = false;
                continue;
            }

            let aabb = projectile.body.aabb();
            if walls.iter().any(|wall| aabb.intersects(wall)) {
                projectile.active = false;
                detonations.push(projectile.body.position);
                continue;
            }

            if projectile.grace == 0 {
                // After the grace window even the shooter can be hit by a
                // grenade arcing back at them.
                let hits_player = aabb.intersects(&player_body.aabb());
                let hits_entity = entities
                    .iter()
                    .any(|(_, entity)| entity.alive && aabb.intersects(&entity.body.aabb()));
                if hits_player || hits_entity {
                    projectile.active = false;
                    detonations.push(projectile.body.position);
                }
            }
        }

        for center in detonations {
            Self::explode(center, player_body, entities, config, events);
        }
    }

    /// Resolve one explosion: events, radial knockback and damage.
    fn explode(
        center: Vec2,
        player_body: &mut PhysicsBody,
        entities: &mut EntityArena,
        config: &SimConfig,
        events: &mut Vec<SimEvent>,
    ) {
        let radius = config.projectile.explosion_radius;
        let knockback = config.projectile.knockback;

        events.push(SimEvent::Explosion {
            center,
            radius,
            force: knockback,
        });
        events.push(SimEvent::CameraShake {
            magnitude: 6.0,
            duration: 8,
        });
        events.push(SimEvent::EmitParticles {
            position: center,
            count: 20,
            color: COLOR_EXPLOSION,
            speed: (2.0, 8.0),
            life: (15, 40),
        });

        if let Some((dir, falloff)) = Self::blast_impulse(center, player_body.position, radius) {
            player_body.velocity += dir * falloff * knockback;
            player_body.grounded = false;
        }

        for (id, entity) in entities.iter_mut() {
            if !entity.alive {
                continue;
            }
            let Some((dir, falloff)) = Self::blast_impulse(center, entity.body.position, radius)
            else {
                continue;
            };
            entity.body.velocity += dir * falloff * knockback;
            entity.body.grounded = false;

            let amount = (config.projectile.damage_scale * falloff * knockback) as i32;
            if amount > 0 {
                entity.take_damage(amount);
                events.push(SimEvent::DamageDealt { target: id, amount });
            }
        }
    }

    /// Push direction and linear falloff for a body at `position`, or `None`
    /// outside the blast radius. A body exactly at the center is launched
    /// straight up.
    fn blast_impulse(center: Vec2, position: Vec2, radius: f32) -> Option<(Vec2, f32)> {
        let offset = position - center;
        let dist = offset.length();
        if dist >= radius {
            return None;
        }
        let dir = if dist > 1e-6 {
            offset / dist
        } else {
            Vec2::new(0.0, -1.0)
        };
        Some((dir, (radius - dist) / radius))
    }

    /// Drop spent projectiles from the pool.
    pub fn retain_active(&mut self) {
        self.projectiles.retain(|p| p.active);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn active_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.active).count()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::new()
    }
}
