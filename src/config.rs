//! Simulation Configuration
//!
//! Centralized tuning for the whole core. `Default` impls carry the
//! calibrated gameplay constants; every struct also derives serde so a
//! complete or partial configuration can be loaded from JSON.
//!
//! All motion constants are in world units per frame at the fixed tick
//! rate — the integrator is calibrated against them, so they are not
//! per-second values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::body::Aabb;
use crate::physics::raycast::BounceRayConfig;

/// Global integration constants shared by every dynamic body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame (Y grows down-screen).
    pub gravity: f32,
    /// Fall speed cap applied before the position update.
    pub terminal_velocity: f32,
    /// Velocity retention factor applied each airborne frame.
    pub air_drag: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.035,
            terminal_velocity: 12.0,
            air_drag: 0.99,
        }
    }
}

/// Player movement and game-feel tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Full collision box size.
    pub size: Vec2,
    /// Horizontal acceleration per frame of held input.
    pub move_accel: f32,
    /// Input acceleration multiplier while the hook is attached.
    pub hooked_accel_scale: f32,
    /// Horizontal velocity retention while grounded.
    pub ground_friction: f32,
    /// Upward launch speed of a ground jump.
    pub jump_force: f32,
    /// Upward launch speed of the mid-air jump.
    pub double_jump_force: f32,
    /// Jumps available after touching the ground.
    pub max_jumps: u32,
    /// Minimum pre-landing fall speed that counts as a heavy impact.
    pub impact_threshold: f32,
    /// Horizontal velocity retained on wall hits while hooked (sliding).
    pub wall_slide_factor: f32,
    /// Backward impulse applied when firing a projectile.
    pub recoil: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(30.0),
            move_accel: 0.05,
            hooked_accel_scale: 0.4,
            ground_friction: 0.92,
            jump_force: 1.8,
            double_jump_force: 1.5,
            max_jumps: 2,
            impact_threshold: 2.0,
            wall_slide_factor: 0.5,
            recoil: 1.5,
        }
    }
}

/// Grappling hook tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Maximum rope length; a flying hook beyond this returns Idle.
    pub range: f32,
    /// Hook point speed while flying, units per frame.
    pub fly_speed: f32,
    /// Terrain pull: force per unit of rope length per frame.
    pub pull_strength: f32,
    /// Terrain pull: rope shorter than this applies no force.
    pub deadzone: f32,
    /// Velocity retention applied to the owner each attached frame.
    pub rope_damping: f32,
    /// Margin by which hookable entity hitboxes are inflated while the
    /// hook flies, making grabs forgiving.
    pub grab_margin: f32,
    /// Impulse on the target toward the owner at the moment of attachment.
    pub yank_impulse: f32,
    /// Rope length simulated by the entity-to-entity pull point offset.
    pub attach_margin: f32,
    /// Hooke's-law constant of the entity-to-entity spring.
    pub spring_constant: f32,
    /// Relative-velocity retention of the spring damper (closer to 1 means
    /// less damping force).
    pub damping_coefficient: f32,
    /// Fraction of the spring-damper reaction felt by the owner.
    pub owner_pull_ratio: f32,
    /// Multiplier on net-upward velocity of both swing partners, keeping a
    /// swinging pair airborne slightly longer than raw gravity allows.
    pub swing_lift: f32,
    /// Owner speed cap while attached to an entity, bounding swing energy.
    pub max_swing_speed: f32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            range: 300.0,
            fly_speed: 6.5,
            pull_strength: 0.004,
            deadzone: 10.0,
            rope_damping: 0.99,
            grab_margin: 8.0,
            yank_impulse: 2.0,
            attach_margin: 20.0,
            spring_constant: 0.05,
            damping_coefficient: 0.85,
            owner_pull_ratio: 0.5,
            swing_lift: 1.02,
            max_swing_speed: 9.0,
        }
    }
}

/// Grenade projectile and explosion tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Full collision box size of a projectile.
    pub size: Vec2,
    /// Muzzle speed, units per frame.
    pub speed: f32,
    /// Fraction of world gravity felt by projectiles.
    pub gravity_scale: f32,
    /// Frames until a flying projectile detonates on its own.
    pub lifetime: u32,
    /// Frames after spawn during which entity impacts are ignored,
    /// preventing muzzle self-detonation.
    pub grace_frames: u32,
    /// Hard cap on simultaneously active projectiles.
    pub max_projectiles: usize,
    /// Blast radius of the explosion.
    pub explosion_radius: f32,
    /// Knockback impulse at the blast center.
    pub knockback: f32,
    /// Damage dealt at full knockback (scales with falloff).
    pub damage_scale: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(14.0),
            speed: 5.0,
            gravity_scale: 0.5,
            lifetime: 240,
            grace_frames: 6,
            max_projectiles: 32,
            explosion_radius: 100.0,
            knockback: 2.25,
            damage_scale: 20.0,
        }
    }
}

/// Melee swing and bounce-laser tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Melee reach from the attacker center.
    pub melee_range: f32,
    /// Extra forgiving margin added to the melee reach per target.
    pub melee_margin: f32,
    /// Knockback impulse along the aim direction on a melee hit.
    pub melee_force: f32,
    /// Flat damage of a melee hit.
    pub melee_damage: i32,
    /// Frames between melee swings.
    pub melee_cooldown: u32,
    /// Frames between grenade shots.
    pub grenade_cooldown: u32,
    /// Frames between laser shots.
    pub laser_cooldown: u32,
    /// Knockback impulse along the beam on a laser hit.
    pub laser_knockback: f32,
    /// Flat damage of a laser hit.
    pub laser_damage: i32,
    /// March parameters of the bounce laser.
    pub laser_ray: BounceRayConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            melee_range: 50.0,
            melee_margin: 30.0,
            melee_force: 2.5,
            melee_damage: 15,
            melee_cooldown: 15,
            grenade_cooldown: 40,
            laser_cooldown: 40,
            laser_knockback: 3.0,
            laser_damage: 25,
            laser_ray: BounceRayConfig::default(),
        }
    }
}

/// Bot behavior tuning (trivial random timer-driven walk).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Full collision box size.
    pub size: Vec2,
    /// Starting health.
    pub health: i32,
    /// Frame range between direction re-rolls.
    pub move_timer_range: (i32, i32),
    /// Frame range between jump attempts.
    pub jump_timer_range: (i32, i32),
    /// Probability of jumping when the jump timer expires while grounded.
    pub jump_chance: f32,
    /// Bodies below this Y take lethal damage (fell out of the level).
    pub kill_plane_y: f32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(30.0),
            health: 100,
            move_timer_range: (30, 120),
            jump_timer_range: (60, 180),
            jump_chance: 0.4,
            kill_plane_y: 2000.0,
        }
    }
}

/// World-space envelope; projectiles leaving it despawn silently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Generous bounds around the playable space.
    pub bounds: Aabb,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Aabb::new(Vec2::new(-1000.0, -1000.0), Vec2::new(3000.0, 2000.0)),
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub hook: HookConfig,
    pub projectile: ProjectileConfig,
    pub combat: CombatConfig,
    pub bot: BotConfig,
    pub world: WorldConfig,
}

impl SimConfig {
    /// Parse a configuration from JSON. Missing fields fall back to the
    /// calibrated defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the full configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = SimConfig::default();
        assert!((config.physics.gravity - 0.035).abs() < 1e-6);
        assert!((config.hook.range - 300.0).abs() < 1e-6);
        assert!((config.projectile.explosion_radius - 100.0).abs() < 1e-6);
        assert!((config.projectile.knockback - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig::default();
        let json = config.to_json().expect("serialize");
        let parsed = SimConfig::from_json(&json).expect("parse");
        assert!((parsed.physics.gravity - config.physics.gravity).abs() < 1e-6);
        assert!((parsed.hook.fly_speed - config.hook.fly_speed).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = SimConfig::from_json(r#"{"physics": {"gravity": 0.05}}"#).expect("parse");
        assert!((parsed.physics.gravity - 0.05).abs() < 1e-6);
        // Untouched sections keep their defaults.
        assert!((parsed.physics.air_drag - 0.99).abs() < 1e-6);
        assert!((parsed.hook.range - 300.0).abs() < 1e-6);
    }
}
