//! Physics type re-exports from glam
//!
//! The simulation runs in screen-space 2D coordinates: X increases to the
//! right, Y increases downward, so gravity is a positive Y acceleration.
//! Zero-length vectors are always normalized with `normalize_or_zero`,
//! which collapses them to `Vec2::ZERO` instead of producing NaN.

pub use glam::Vec2;

/// Build a unit direction vector from an angle in radians.
///
/// Angle 0 points along +X; positive angles rotate toward +Y (down-screen).
pub fn vec_from_angle(radians: f32) -> Vec2 {
    Vec2::new(radians.cos(), radians.sin())
}

/// Angle of a direction vector in radians (atan2 convention).
pub fn aim_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_round_trip() {
        for angle in [0.0_f32, 0.5, 1.0, -1.2, 3.0] {
            let v = vec_from_angle(angle);
            assert!((aim_angle(v) - angle).abs() < 1e-5);
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_normalize_or_zero_is_safe() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }
}
