//! Input to velocity
//!
//! Stateless: the only thing carried between ticks is the speed constant,
//! which the caller owns.

use glam::Vec2;
use std::f32::consts::FRAC_1_SQRT_2;

use super::input::InputSnapshot;

/// Desired velocity for this tick.
///
/// Left beats right and up beats down when both are held. Diagonals are
/// scaled by 1/sqrt(2) after that resolution so diagonal speed equals
/// `speed`. Screen coordinates: +y points down.
pub fn desired_velocity(input: &InputSnapshot, speed: f32) -> Vec2 {
    let vx = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };

    let vy = if input.up {
        -speed
    } else if input.down {
        speed
    } else {
        0.0
    };

    if vx != 0.0 && vy != 0.0 {
        Vec2::new(vx * FRAC_1_SQRT_2, vy * FRAC_1_SQRT_2)
    } else {
        Vec2::new(vx, vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> InputSnapshot {
        InputSnapshot {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_idle_is_zero() {
        assert_eq!(desired_velocity(&InputSnapshot::NONE, 160.0), Vec2::ZERO);
    }

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(desired_velocity(&keys(false, false, false, true), 160.0), Vec2::new(160.0, 0.0));
        assert_eq!(desired_velocity(&keys(false, false, true, false), 160.0), Vec2::new(-160.0, 0.0));
        assert_eq!(desired_velocity(&keys(true, false, false, false), 160.0), Vec2::new(0.0, -160.0));
        assert_eq!(desired_velocity(&keys(false, true, false, false), 160.0), Vec2::new(0.0, 160.0));
    }

    #[test]
    fn test_opposites_use_precedence() {
        // Left wins over right, up wins over down
        assert_eq!(desired_velocity(&keys(false, false, true, true), 160.0), Vec2::new(-160.0, 0.0));
        assert_eq!(desired_velocity(&keys(true, true, false, false), 160.0), Vec2::new(0.0, -160.0));

        // All four held resolves to up-left, normalized
        let v = desired_velocity(&keys(true, true, true, true), 160.0);
        assert!(v.x < 0.0 && v.y < 0.0);
        assert!((v.length() - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_diagonal_up_right() {
        let v = desired_velocity(&keys(true, false, false, true), 160.0);
        assert!((v.x - 113.137).abs() < 0.01);
        assert!((v.y + 113.137).abs() < 0.01);
        assert!((v.length() - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_speed() {
        let v = desired_velocity(&keys(true, false, true, false), 0.0);
        assert_eq!(v, Vec2::ZERO);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn diagonal_speed_matches_cardinal(
                up in any::<bool>(),
                down in any::<bool>(),
                left in any::<bool>(),
                right in any::<bool>(),
                speed in 1.0f32..1000.0,
            ) {
                let v = desired_velocity(&keys(up, down, left, right), speed);
                if v != Vec2::ZERO {
                    prop_assert!(
                        (v.length() - speed).abs() <= speed * 1e-5,
                        "speed {} produced |v| = {}",
                        speed,
                        v.length()
                    );
                }
                prop_assert_eq!(v == Vec2::ZERO, !(up || down || left || right));
            }
        }
    }
}
