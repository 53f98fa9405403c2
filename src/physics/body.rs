//! Rigid-point bodies and their axis-aligned bounding boxes.
//!
//! A [`PhysicsBody`] owns position, velocity, accumulated acceleration and
//! half-extents. Its AABB is always *derived* from position + extents via
//! [`PhysicsBody::aabb`] and never stored separately, so the continuous
//! position and the collision box cannot drift apart.
//!
//! Integration is semi-implicit Euler in per-frame units: the tuning
//! constants in [`PhysicsConfig`](crate::config::PhysicsConfig) define the
//! game's feel and are calibrated against this exact update order. Do not
//! swap in a different integrator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from a top-left corner and a size, the shape wall providers use.
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap test. Boxes that merely touch along an edge do not intersect,
    /// so a body resting exactly on a wall top is not colliding.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Grow the box outward by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Aabb {
        Aabb {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// A dynamic rigid-point body with an axis-aligned collision extent.
///
/// `position` is the center of the body. The grounded flag is recomputed by
/// every collision resolution pass and cleared by knockback impulses.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    /// Center position in world units.
    pub position: Vec2,
    /// Velocity in world units per frame.
    pub velocity: Vec2,
    /// Force accumulator, reset to zero every integration step.
    pub acceleration: Vec2,
    /// Half-width and half-height of the collision box.
    pub half_extents: Vec2,
    /// True while resting on a wall from a downward collision this frame.
    pub grounded: bool,
}

impl PhysicsBody {
    /// Create a body centered at `position` with the given full size.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            half_extents: size * 0.5,
            grounded: false,
        }
    }

    /// The collision box, derived from position + extents.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Accumulate an instantaneous acceleration contribution. No clamping.
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.half_extents.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.half_extents.x
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.half_extents.y
    }

    pub fn set_left(&mut self, x: f32) {
        self.position.x = x + self.half_extents.x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.position.x = x - self.half_extents.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.position.y = y + self.half_extents.y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.position.y = y - self.half_extents.y;
    }

    /// Integrate forces into velocity without moving the body.
    ///
    /// Order per frame: gravity joins the accumulator, velocity absorbs the
    /// accumulator, fall speed is clamped to terminal velocity, air drag
    /// applies while airborne, then the accumulator resets. Bodies that
    /// collide with walls use this and let the collision resolver own the
    /// per-axis position update.
    pub fn integrate_velocity(&mut self, config: &PhysicsConfig) {
        self.acceleration.y += config.gravity;
        self.velocity += self.acceleration;
        self.velocity.y = self.velocity.y.min(config.terminal_velocity);
        if !self.grounded {
            self.velocity *= config.air_drag;
        }
        self.acceleration = Vec2::ZERO;
    }

    /// Full semi-implicit Euler step: [`integrate_velocity`] followed by
    /// `position += velocity`. The free-flight path for bodies resolved
    /// without walls (hook points, unobstructed projectiles).
    ///
    /// [`integrate_velocity`]: PhysicsBody::integrate_velocity
    pub fn integrate(&mut self, config: &PhysicsConfig) {
        self.integrate_velocity(config);
        self.position += self.velocity;
    }
}
