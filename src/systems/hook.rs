//! Grappling hook state machine.
//!
//! The hook is a three-state controller owned by a player: Idle until the
//! hook key is pressed, Flying while the hook point travels outward, and
//! Attached once it latches onto terrain or a hookable entity. Attached to
//! terrain it pulls the owner toward a fixed anchor; attached to an entity
//! it couples both bodies through a damped spring, so the pair swings.
//!
//! Entity targets are held as [`EntityId`] handles. If the target dies or
//! despawns mid-swing the handle stops resolving and the hook falls back to
//! Idle on its next update.

use glam::Vec2;

use crate::config::HookConfig;
use crate::events::{COLOR_HOOK, SimEvent};
use crate::physics::body::{Aabb, PhysicsBody};
use crate::world::{EntityArena, EntityId, Hookable};

/// Lifecycle state of the grappling hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Idle,
    Flying,
    Attached,
}

/// Per-player grappling hook controller.
pub struct HookController {
    state: HookState,
    hook_pos: Vec2,
    hook_vel: Vec2,
    /// Entity latched onto, `None` while attached to terrain.
    target: Option<EntityId>,
    /// Latch so a held hook key fires only on the press edge.
    was_held: bool,
}

impl HookController {
    pub fn new() -> Self {
        Self {
            state: HookState::Idle,
            hook_pos: Vec2::ZERO,
            hook_vel: Vec2::ZERO,
            target: None,
            was_held: false,
        }
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.state == HookState::Attached
    }

    /// Current hook point; only meaningful while Flying or Attached.
    pub fn hook_pos(&self) -> Vec2 {
        self.hook_pos
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Rope strain in `0..=1` while attached: current rope length over the
    /// maximum range. Zero when the hook is not attached.
    pub fn tension(&self, owner: &PhysicsBody, config: &HookConfig) -> f32 {
        if self.state == HookState::Attached {
            ((self.hook_pos - owner.position).length() / config.range).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Drop back to Idle, forgetting any target.
    pub fn release(&mut self) {
        self.state = HookState::Idle;
        self.target = None;
        self.hook_vel = Vec2::ZERO;
    }

    /// Advance the hook by one frame.
    ///
    /// `held` is the raw hook key; the cast itself is edge-triggered.
    /// Releasing the key detaches from any state.
    pub fn update(
        &mut self,
        owner: &mut PhysicsBody,
        aim_dir: Vec2,
        held: bool,
        walls: &[Aabb],
        entities: &mut EntityArena,
        config: &HookConfig,
        events: &mut Vec<SimEvent>,
    ) {
        let pressed = held && !self.was_held;
        self.was_held = held;

        if !held {
            if self.state != HookState::Idle {
                self.release();
            }
            return;
        }

        match self.state {
            HookState::Idle => {
                if pressed {
                    let dir = if aim_dir.normalize_or_zero() == Vec2::ZERO {
                        Vec2::new(1.0, 0.0)
                    } else {
                        aim_dir.normalize_or_zero()
                    };
                    self.hook_pos = owner.position;
                    self.hook_vel = dir * config.fly_speed;
                    self.state = HookState::Flying;
                }
            }
            HookState::Flying => self.update_flying(owner, walls, entities, config, events),
            HookState::Attached => self.update_attached(owner, entities, config),
        }
    }

    fn update_flying(
        &mut self,
        owner: &mut PhysicsBody,
        walls: &[Aabb],
        entities: &mut EntityArena,
        config: &HookConfig,
        events: &mut Vec<SimEvent>,
    ) {
        self.hook_pos += self.hook_vel;

        if (self.hook_pos - owner.position).length() > config.range {
            self.release();
            return;
        }

        // Entities take priority over the wall behind them.
        let mut grabbed = None;
        for (id, entity) in entities.iter() {
            if entity.is_hookable() && entity.hook_hitbox(config.grab_margin).contains_point(self.hook_pos) {
                grabbed = Some(id);
                break;
            }
        }
        if let Some(id) = grabbed {
            if let Some(entity) = entities.get_mut(id) {
                let toward_owner =
                    (owner.position - entity.body.position).normalize_or_zero();
                entity.body.velocity += toward_owner * config.yank_impulse;
                entity.body.grounded = false;
                self.hook_pos = entity.hook_anchor();
            }
            self.state = HookState::Attached;
            self.target = Some(id);
            self.hook_vel = Vec2::ZERO;
            events.push(SimEvent::HookAttached {
                anchor: self.hook_pos,
                target: Some(id),
            });
            events.push(SimEvent::CameraShake {
                magnitude: 3.0,
                duration: 6,
            });
            events.push(SimEvent::EmitParticles {
                position: self.hook_pos,
                count: 8,
                color: COLOR_HOOK,
                speed: (0.5, 2.0),
                life: (10, 25),
            });
            return;
        }

        for wall in walls {
            if wall.contains_point(self.hook_pos) {
                self.state = HookState::Attached;
                self.target = None;
                self.hook_vel = Vec2::ZERO;
                events.push(SimEvent::HookAttached {
                    anchor: self.hook_pos,
                    target: None,
                });
                events.push(SimEvent::CameraShake {
                    magnitude: 3.0,
                    duration: 6,
                });
                events.push(SimEvent::EmitParticles {
                    position: self.hook_pos,
                    count: 8,
                    color: COLOR_HOOK,
                    speed: (0.5, 2.0),
                    life: (10, 25),
                });
                return;
            }
        }
    }

    fn update_attached(
        &mut self,
        owner: &mut PhysicsBody,
        entities: &mut EntityArena,
        config: &HookConfig,
    ) {
        match self.target {
            Some(id) => {
                let Some(entity) = entities.get_mut(id) else {
                    // Target despawned or handle went stale.
                    self.release();
                    return;
                };
                if !entity.is_hookable() {
                    self.release();
                    return;
                }

                self.hook_pos = entity.hook_anchor();

                // Damped spring toward a point one rope-length short of the
                // owner, so the target settles beside rather than inside them.
                let rope = entity.body.position - owner.position;
                let rope_dir = rope.normalize_or_zero();
                let pull_point = owner.position + rope_dir * config.attach_margin;

                let spring = (pull_point - entity.body.position) * config.spring_constant;
                let damping =
                    (entity.body.velocity - owner.velocity) * (1.0 - config.damping_coefficient);
                let net = spring - damping;

                entity.body.apply_force(net);
                owner.apply_force(-net * config.owner_pull_ratio);

                // Slight upward boost keeps a swinging pair airborne.
                if entity.body.velocity.y < 0.0 {
                    entity.body.velocity.y *= config.swing_lift;
                }
                if owner.velocity.y < 0.0 {
                    owner.velocity.y *= config.swing_lift;
                }

                let speed = owner.velocity.length();
                if speed > config.max_swing_speed {
                    owner.velocity *= config.max_swing_speed / speed;
                }
            }
            None => {
                // Terrain anchor: linear pull proportional to rope length.
                let rope = self.hook_pos - owner.position;
                let dist = rope.length();
                if dist > config.deadzone {
                    owner.apply_force(rope.normalize_or_zero() * dist * config.pull_strength);
                }
                owner.velocity *= config.rope_damping;
            }
        }
    }
}

impl Default for HookController {
    fn default() -> Self {
        Self::new()
    }
}
