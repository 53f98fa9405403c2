//! Bounce raycasting for the ricochet weapon.
//!
//! A ray is marched in fixed-size steps through the wall set. Wall hits
//! reflect the direction about the struck surface's normal and spend one
//! bounce from the budget; target hits terminate the march and report which
//! hitbox was struck and from what direction. The recorded trajectory is an
//! ordered list of segment endpoints, consumed only for visualization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::body::Aabb;

/// Tuning for a bounce raycast march.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceRayConfig {
    /// March step length in world units.
    pub step: f32,
    /// Maximum number of wall reflections before the ray dies.
    pub max_bounces: u32,
    /// Total travel budget in world units.
    pub max_distance: f32,
    /// Offset along the surface normal applied after a reflection, keeping
    /// the continue point out of the wall it just struck.
    pub surface_offset: f32,
}

impl Default for BounceRayConfig {
    fn default() -> Self {
        Self {
            step: 4.0,
            max_bounces: 3,
            max_distance: 900.0,
            surface_offset: 0.5,
        }
    }
}

/// A target hitbox struck by the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index into the `targets` slice passed to [`bounce_raycast`].
    pub target: usize,
    /// Incoming ray direction at the moment of impact (for knockback).
    pub direction: Vec2,
    /// World-space impact point.
    pub point: Vec2,
}

/// Outcome of a bounce raycast.
#[derive(Debug, Clone)]
pub struct BounceRayResult {
    /// Ordered endpoints of every traced segment, starting at the origin.
    pub trajectory: Vec<Vec2>,
    /// The first target struck, if any.
    pub hit: Option<RayHit>,
}

/// Segment-AABB intersection using the slab method.
///
/// Returns the parametric `t` in `[0, 1]` of the entry point along
/// `start..end`, or `None` when the segment misses the box. A segment that
/// starts inside the box reports `t = 0`.
pub fn segment_aabb_intersect(start: Vec2, end: Vec2, aabb: &Aabb) -> Option<f32> {
    let delta = end - start;

    // Near-zero components get a huge inverse so the slab test still works.
    let inv = Vec2::new(
        if delta.x.abs() > 1e-10 {
            1.0 / delta.x
        } else {
            f32::MAX * delta.x.signum()
        },
        if delta.y.abs() > 1e-10 {
            1.0 / delta.y
        } else {
            f32::MAX * delta.y.signum()
        },
    );

    let t1 = (aabb.min.x - start.x) * inv.x;
    let t2 = (aabb.max.x - start.x) * inv.x;
    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb.min.y - start.y) * inv.y;
    let t4 = (aabb.max.y - start.y) * inv.y;
    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    if t_max >= t_min && t_max >= 0.0 && t_min <= 1.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}

/// Outward surface normal for a point inside a wall rectangle, chosen by
/// comparing penetration depth on each axis: the shallowest face wins.
pub fn wall_surface_normal(point: Vec2, wall: &Aabb) -> Vec2 {
    let from_left = point.x - wall.min.x;
    let from_right = wall.max.x - point.x;
    let from_top = point.y - wall.min.y;
    let from_bottom = wall.max.y - point.y;

    let min_depth = from_left.min(from_right).min(from_top).min(from_bottom);
    if min_depth == from_left {
        Vec2::new(-1.0, 0.0)
    } else if min_depth == from_right {
        Vec2::new(1.0, 0.0)
    } else if min_depth == from_top {
        Vec2::new(0.0, -1.0)
    } else {
        Vec2::new(0.0, 1.0)
    }
}

/// Reflect a direction about a surface normal.
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// March a ray from `start` along `direction`, reflecting off walls and
/// stopping on the first target hit.
///
/// Targets are tested with a segment-rectangle intersection per step, so a
/// large step cannot tunnel through a hitbox. Callers exclude the shooter's
/// own hitbox from `targets`. A zero direction yields an empty march with
/// no hit.
pub fn bounce_raycast(
    start: Vec2,
    direction: Vec2,
    walls: &[Aabb],
    targets: &[Aabb],
    config: &BounceRayConfig,
) -> BounceRayResult {
    let mut trajectory = vec![start];
    let mut dir = direction.normalize_or_zero();
    if dir == Vec2::ZERO {
        return BounceRayResult {
            trajectory,
            hit: None,
        };
    }

    let mut pos = start;
    let mut remaining = config.max_distance;
    let mut bounces_left = config.max_bounces;

    while remaining > 0.0 {
        let step_len = config.step.min(remaining);
        let next = pos + dir * step_len;

        // Targets first: the beam stops in a body before burying into the
        // wall behind it.
        for (index, hitbox) in targets.iter().enumerate() {
            if let Some(t) = segment_aabb_intersect(pos, next, hitbox) {
                let point = pos + (next - pos) * t;
                trajectory.push(point);
                return BounceRayResult {
                    trajectory,
                    hit: Some(RayHit {
                        target: index,
                        direction: dir,
                        point,
                    }),
                };
            }
        }

        let mut reflected = false;
        for wall in walls {
            if wall.contains_point(next) {
                trajectory.push(next);
                if bounces_left == 0 {
                    return BounceRayResult {
                        trajectory,
                        hit: None,
                    };
                }
                bounces_left -= 1;
                let normal = wall_surface_normal(next, wall);
                dir = reflect(dir, normal);
                pos = next + normal * config.surface_offset;
                reflected = true;
                break;
            }
        }
        if !reflected {
            pos = next;
        }
        remaining -= step_len;
    }

    trajectory.push(pos);
    BounceRayResult {
        trajectory,
        hit: None,
    }
}
