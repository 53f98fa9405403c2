//! Player controller: movement, jumping, weapons and the grappling hook.
//!
//! The controller owns the player's physics body and hook, consumes one
//! [`ActionState`] per frame and pushes whatever happened into the frame's
//! event vector. Update order matters and mirrors the integrator contract:
//! intent becomes forces, the hook applies its forces, velocity integrates,
//! then the collision resolver owns the position update.

use glam::Vec2;

use crate::config::SimConfig;
use crate::events::{COLOR_DUST, SimEvent};
use crate::input::ActionState;
use crate::physics::body::{Aabb, PhysicsBody};
use crate::physics::collision::{resolve_collisions, resolve_collisions_sliding};
use crate::systems::hook::HookController;
use crate::systems::projectile::{ProjectileOwner, ProjectileSystem};
use crate::systems::{combat, hook::HookState};
use crate::world::EntityArena;

/// Selectable weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weapon {
    Melee,
    Grenade,
    Laser,
}

/// The player: body, hook, weapon state and jump bookkeeping.
pub struct PlayerController {
    pub body: PhysicsBody,
    pub hook: HookController,
    /// Last non-zero aim direction, normalized.
    aim_dir: Vec2,
    jumps_left: u32,
    weapon_cooldown: u32,
    current_weapon: Weapon,
    was_on_ground: bool,
    /// Latch so a held jump key cannot drain the double jump.
    jump_was_held: bool,
}

impl PlayerController {
    pub fn new(spawn: Vec2, config: &SimConfig) -> Self {
        Self {
            body: PhysicsBody::new(spawn, config.player.size),
            hook: HookController::new(),
            aim_dir: Vec2::new(1.0, 0.0),
            jumps_left: config.player.max_jumps,
            weapon_cooldown: 0,
            current_weapon: Weapon::Melee,
            was_on_ground: false,
            jump_was_held: false,
        }
    }

    pub fn aim_dir(&self) -> Vec2 {
        self.aim_dir
    }

    pub fn current_weapon(&self) -> Weapon {
        self.current_weapon
    }

    /// Advance the player one frame.
    pub fn update(
        &mut self,
        actions: &ActionState,
        walls: &[Aabb],
        entities: &mut EntityArena,
        projectiles: &mut ProjectileSystem,
        config: &SimConfig,
        events: &mut Vec<SimEvent>,
    ) {
        let aim = (actions.aim_target - self.body.position).normalize_or_zero();
        if aim != Vec2::ZERO {
            self.aim_dir = aim;
        }

        if let Some(slot) = actions.weapon_slot {
            self.current_weapon = match slot {
                1 => Weapon::Melee,
                2 => Weapon::Grenade,
                3 => Weapon::Laser,
                _ => self.current_weapon,
            };
        }

        if self.body.grounded {
            self.jumps_left = config.player.max_jumps;
        }

        // Horizontal intent. Hooked movement is deliberately sluggish so the
        // rope dominates the trajectory.
        let accel_scale = if self.hook.is_attached() {
            config.player.hooked_accel_scale
        } else {
            1.0
        };
        let move_dir = actions.move_dir();
        if move_dir != 0.0 {
            self.body.apply_force(Vec2::new(
                config.player.move_accel * accel_scale * move_dir,
                0.0,
            ));
        }
        if self.body.grounded {
            self.body.velocity.x *= config.player.ground_friction;
        }

        let jump_pressed = actions.jump && !self.jump_was_held;
        self.jump_was_held = actions.jump;
        if jump_pressed && self.jumps_left > 0 {
            let force = if self.body.grounded {
                config.player.jump_force
            } else {
                config.player.double_jump_force
            };
            self.body.velocity.y = -force;
            self.body.grounded = false;
            self.jumps_left -= 1;
            events.push(SimEvent::EmitParticles {
                position: Vec2::new(self.body.position.x, self.body.bottom()),
                count: 5,
                color: COLOR_DUST,
                speed: (0.5, 1.5),
                life: (8, 18),
            });
        }

        self.hook.update(
            &mut self.body,
            self.aim_dir,
            actions.hook_hold,
            walls,
            entities,
            &config.hook,
            events,
        );

        if self.weapon_cooldown > 0 {
            self.weapon_cooldown -= 1;
        }
        if actions.fire && self.weapon_cooldown == 0 {
            self.fire_weapon(walls, entities, projectiles, config, events);
        }

        // Fall speed before resolution, for the landing impact check.
        let fall_speed = self.body.velocity.y;

        self.body.integrate_velocity(&config.physics);
        if self.hook.state() == HookState::Attached {
            // Sliding wall response keeps a hooked player from sticking to
            // the face they are being dragged along.
            resolve_collisions_sliding(&mut self.body, walls, config.player.wall_slide_factor);
        } else {
            resolve_collisions(&mut self.body, walls);
        }

        if self.body.grounded && !self.was_on_ground && fall_speed > config.player.impact_threshold
        {
            events.push(SimEvent::LandingImpact {
                position: self.body.position,
                speed: fall_speed,
            });
            events.push(SimEvent::CameraShake {
                magnitude: fall_speed,
                duration: 6,
            });
            events.push(SimEvent::EmitParticles {
                position: Vec2::new(self.body.position.x, self.body.bottom()),
                count: 8,
                color: COLOR_DUST,
                speed: (0.5, 2.0),
                life: (10, 22),
            });
        }
        self.was_on_ground = self.body.grounded;
    }

    fn fire_weapon(
        &mut self,
        walls: &[Aabb],
        entities: &mut EntityArena,
        projectiles: &mut ProjectileSystem,
        config: &SimConfig,
        events: &mut Vec<SimEvent>,
    ) {
        match self.current_weapon {
            Weapon::Melee => {
                self.weapon_cooldown = config.combat.melee_cooldown;
                let hit = combat::melee_swing(
                    self.body.position,
                    self.aim_dir,
                    entities,
                    &config.combat,
                    events,
                );
                if hit {
                    events.push(SimEvent::CameraShake {
                        magnitude: 2.0,
                        duration: 4,
                    });
                }
            }
            Weapon::Grenade => {
                self.weapon_cooldown = config.combat.grenade_cooldown;
                if projectiles.fire(
                    self.body.position,
                    self.aim_dir,
                    ProjectileOwner::Player,
                    config,
                ) {
                    self.body.velocity -= self.aim_dir * config.player.recoil;
                    events.push(SimEvent::WeaponFired {
                        position: self.body.position,
                        direction: self.aim_dir,
                    });
                }
            }
            Weapon::Laser => {
                self.weapon_cooldown = config.combat.laser_cooldown;
                let trajectory = combat::fire_laser(
                    self.body.position,
                    self.aim_dir,
                    walls,
                    entities,
                    &config.combat,
                    events,
                );
                events.push(SimEvent::WeaponFired {
                    position: self.body.position,
                    direction: self.aim_dir,
                });
                events.push(SimEvent::LaserTrail { trajectory });
            }
        }
    }
}
