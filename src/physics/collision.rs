//! Axis-separated collision resolution against a static wall set.
//!
//! Walls are immutable axis-aligned rectangles borrowed from the level
//! collaborator for the duration of a frame. Resolution sweeps one axis at
//! a time — X first, then Y — re-deriving the body's AABB from its position
//! after every snap, so the collision box can never desync from the
//! continuous position.

use glam::Vec2;

use crate::physics::body::{Aabb, PhysicsBody};

/// Resolve wall collisions for one body, stopping dead on horizontal hits.
///
/// Movement happens here: each axis pass tentatively advances the position
/// by that velocity component, then snaps the facing edge of the body to the
/// opposing edge of every intersecting wall and zeroes the velocity
/// component. Grounded is recomputed: it is only true after this call if a
/// downward collision (or the sticky-ground probe) found support this frame.
///
/// Never fails; silently no-ops when nothing intersects, and resolving a
/// second time with zero velocity moves nothing.
pub fn resolve_collisions(body: &mut PhysicsBody, walls: &[Aabb]) {
    resolve(body, walls, None);
}

/// Variant used while the grappling hook is attached: horizontal wall hits
/// scale `velocity.x` by `slide_factor` instead of zeroing it, so a swinging
/// body slides along walls rather than sticking to them.
pub fn resolve_collisions_sliding(body: &mut PhysicsBody, walls: &[Aabb], slide_factor: f32) {
    resolve(body, walls, Some(slide_factor));
}

fn resolve(body: &mut PhysicsBody, walls: &[Aabb], slide_factor: Option<f32>) {
    // X pass.
    body.position.x += body.velocity.x;
    let mut r = body.aabb();
    for wall in walls {
        if !r.intersects(wall) {
            continue;
        }
        if body.velocity.x > 0.0 {
            body.set_right(wall.min.x);
        } else if body.velocity.x < 0.0 {
            body.set_left(wall.max.x);
        } else {
            continue;
        }
        match slide_factor {
            Some(factor) => body.velocity.x *= factor,
            None => body.velocity.x = 0.0,
        }
        r = body.aabb();
    }

    // Sticky ground: while already resting and not moving upward, probe one
    // unit below and snap straight to the highest wall top found there. This
    // stops the fall-collide-reset jitter of gravity re-accumulating each
    // frame on a resting body. Skips the general Y pass for this frame.
    if body.grounded && body.velocity.y >= 0.0 {
        let probe = body.aabb().translate(Vec2::new(0.0, 1.0));
        let mut highest_top: Option<f32> = None;
        for wall in walls {
            if probe.intersects(wall) {
                highest_top = Some(match highest_top {
                    Some(top) => top.min(wall.min.y),
                    None => wall.min.y,
                });
            }
        }
        if let Some(top) = highest_top {
            body.set_bottom(top);
            body.velocity.y = 0.0;
            body.grounded = true;
            return;
        }
    }

    // Y pass.
    body.grounded = false;
    body.position.y += body.velocity.y;
    let mut r = body.aabb();
    for wall in walls {
        if !r.intersects(wall) {
            continue;
        }
        if body.velocity.y > 0.0 {
            body.set_bottom(wall.min.y);
            body.grounded = true;
        } else if body.velocity.y < 0.0 {
            body.set_top(wall.max.y);
        }
        body.velocity.y = 0.0;
        r = body.aabb();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_at(top: f32) -> Aabb {
        Aabb::from_position_size(Vec2::new(-500.0, top), Vec2::new(1000.0, 40.0))
    }

    #[test]
    fn test_ground_landing_snaps_exactly() {
        // Falling at 12 units/frame onto a wall whose top is y=500: the body
        // must end the frame resting with its bottom at exactly 500.
        let walls = [floor_at(500.0)];
        let mut body = PhysicsBody::new(Vec2::new(0.0, 477.0), Vec2::splat(30.0));
        body.velocity.y = 12.0;

        resolve_collisions(&mut body, &walls);

        assert_eq!(body.bottom(), 500.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_horizontal_snap_right() {
        let wall = Aabb::from_position_size(Vec2::new(100.0, -50.0), Vec2::new(40.0, 100.0));
        let mut body = PhysicsBody::new(Vec2::new(80.0, 0.0), Vec2::splat(30.0));
        body.grounded = true; // keep gravity out of the picture
        body.velocity.x = 10.0;

        resolve_collisions(&mut body, &[wall]);

        assert_eq!(body.right(), 100.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_horizontal_snap_left() {
        let wall = Aabb::from_position_size(Vec2::new(0.0, -50.0), Vec2::new(40.0, 100.0));
        let mut body = PhysicsBody::new(Vec2::new(60.0, 0.0), Vec2::splat(30.0));
        body.velocity.x = -10.0;

        resolve_collisions(&mut body, &[wall]);

        assert_eq!(body.left(), 40.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_ceiling_stops_upward_motion() {
        let ceiling = Aabb::from_position_size(Vec2::new(-500.0, 0.0), Vec2::new(1000.0, 40.0));
        let mut body = PhysicsBody::new(Vec2::new(0.0, 60.0), Vec2::splat(30.0));
        body.velocity.y = -10.0;

        resolve_collisions(&mut body, &[ceiling]);

        assert_eq!(body.top(), 40.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_resolution_is_idempotent_at_rest() {
        let walls = [floor_at(500.0)];
        let mut body = PhysicsBody::new(Vec2::new(0.0, 490.0), Vec2::splat(30.0));
        body.velocity.y = 5.0;

        resolve_collisions(&mut body, &walls);
        let settled = body.position;

        resolve_collisions(&mut body, &walls);
        assert_eq!(body.position, settled);

        resolve_collisions(&mut body, &walls);
        assert_eq!(body.position, settled);
    }

    #[test]
    fn test_sticky_ground_holds_resting_height() {
        let walls = [floor_at(500.0)];
        let mut body = PhysicsBody::new(Vec2::new(0.0, 485.0), Vec2::splat(30.0));
        body.grounded = true;
        // Gravity accumulated a tiny downward velocity while resting.
        body.velocity.y = 0.035;

        resolve_collisions(&mut body, &walls);

        assert_eq!(body.bottom(), 500.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_airborne_the_instant_support_vanishes() {
        let mut body = PhysicsBody::new(Vec2::new(0.0, 485.0), Vec2::splat(30.0));
        body.grounded = true;

        // No walls at all: the grounded flag must clear this frame.
        resolve_collisions(&mut body, &[]);
        assert!(!body.grounded);
    }

    #[test]
    fn test_sliding_variant_keeps_horizontal_momentum() {
        let wall = Aabb::from_position_size(Vec2::new(100.0, -50.0), Vec2::new(40.0, 100.0));
        let mut body = PhysicsBody::new(Vec2::new(80.0, 0.0), Vec2::splat(30.0));
        body.grounded = true;
        body.velocity.x = 10.0;

        resolve_collisions_sliding(&mut body, &[wall], 0.5);

        assert_eq!(body.right(), 100.0);
        assert_eq!(body.velocity.x, 5.0);
    }

    #[test]
    fn test_no_walls_is_free_movement() {
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::splat(30.0));
        body.velocity = Vec2::new(4.0, 3.0);
        resolve_collisions(&mut body, &[]);
        assert_eq!(body.position, Vec2::new(4.0, 3.0));
    }
}
