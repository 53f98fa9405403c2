//! Gameplay systems layered on top of the physics core.

pub mod combat;
pub mod hook;
pub mod projectile;
