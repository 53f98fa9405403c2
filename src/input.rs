//! Per-frame action snapshot consumed by the core.
//!
//! The input collaborator fills one of these each frame; the core never
//! polls devices itself. `Default` is the all-released snapshot, so absent
//! inputs read as false/zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One frame of player intent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionState {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump request; the controller edge-triggers internally so a held key
    /// cannot drain the double jump on consecutive frames.
    pub jump: bool,
    /// Held while the grappling hook should stay out.
    pub hook_hold: bool,
    /// Fire the current weapon.
    pub fire: bool,
    /// Weapon slot selection for this frame (1 = melee, 2 = grenade,
    /// 3 = laser); `None` keeps the current weapon.
    pub weapon_slot: Option<u8>,
    /// Aim target in world coordinates (already unprojected by the caller).
    pub aim_target: Vec2,
}

impl ActionState {
    /// Net horizontal input direction: -1, 0 or 1.
    pub fn move_dir(&self) -> f32 {
        (self.move_right as i32 - self.move_left as i32) as f32
    }
}
