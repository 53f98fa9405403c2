//! Outbound event notifications.
//!
//! The core communicates with the camera, particle and damage collaborators
//! exclusively through these fire-and-forget events, collected into a
//! per-frame `Vec<SimEvent>` and drained by the caller after each step.
//! Nothing here feeds back into physics.

use glam::Vec2;

use crate::world::EntityId;

/// Particle tint for jump/land dust.
pub const COLOR_DUST: [f32; 3] = [0.78, 0.78, 0.78];
/// Particle tint for explosions.
pub const COLOR_EXPLOSION: [f32; 3] = [1.0, 0.39, 0.2];
/// Particle tint for hook impacts.
pub const COLOR_HOOK: [f32; 3] = [0.29, 0.33, 0.41];
/// Particle tint for blood/damage hits.
pub const COLOR_DAMAGE: [f32; 3] = [0.78, 0.2, 0.2];

/// A notable simulation event emitted during one frame step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Ask the camera to shake for `duration` frames.
    CameraShake { magnitude: f32, duration: u32 },
    /// Ask the VFX sink to emit a particle burst.
    EmitParticles {
        position: Vec2,
        count: u32,
        color: [f32; 3],
        /// Min/max initial particle speed.
        speed: (f32, f32),
        /// Min/max particle lifetime in frames.
        life: (u32, u32),
    },
    /// The grappling hook latched onto terrain or an entity.
    HookAttached {
        anchor: Vec2,
        target: Option<EntityId>,
    },
    /// A projectile detonated.
    Explosion {
        center: Vec2,
        radius: f32,
        force: f32,
    },
    /// A body landed hard (pre-impact fall speed above the threshold).
    LandingImpact { position: Vec2, speed: f32 },
    /// A weapon was discharged from `position` along `direction`.
    WeaponFired { position: Vec2, direction: Vec2 },
    /// Beam path of a bounce-laser shot, for the renderer only.
    LaserTrail { trajectory: Vec<Vec2> },
    /// Damage was delivered to an entity.
    DamageDealt { target: EntityId, amount: i32 },
    /// An entity ran out of health and was removed.
    EntityDied { id: EntityId, position: Vec2 },
}
