//! Collision resolution against world bounds and static boxes
//!
//! Movement is resolved per axis: the proposed position is clamped to the
//! world, then pushed out of every blocking collider along the axis of
//! least penetration. Pushing out of one box can push into a neighbour, so
//! this repeats for a few passes. Long moves are swept in segments no longer
//! than the player's half extent so a wall cannot be skipped over.

use glam::{BVec2, Vec2};

use super::arena::{ColliderSet, StaticCollider};
use super::geometry::{Rect, WorldBounds};

/// Resolution passes per segment before giving up
pub const MAX_RESOLVE_PASSES: usize = 8;

/// Upper bound on sweep segments per tick
pub const MAX_SWEEP_SEGMENTS: u32 = 64;

/// Summary of what the player ran into this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    /// Axes clamped by the world bounds
    pub bounds: BVec2,
    /// Axes blocked by a static collider
    pub blocked: BVec2,
    /// Number of push-outs performed
    pub pushes: u32,
    /// Resolution did not converge and the segment was undone
    pub reverted: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.bounds.any() || self.blocked.any() || self.reverted
    }
}

/// Authoritative result of one tick of movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub velocity: Vec2,
    pub contacts: Contacts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Penetration of `body` into a collider, if they overlap (touching edges
/// do not)
#[inline]
pub fn penetration(body: &Rect, collider: &StaticCollider) -> Option<Vec2> {
    let pen = body.penetration(collider.shape());
    (pen.x > 0.0 && pen.y > 0.0).then_some(pen)
}

/// Whether `body` sits clear of every blocking collider
pub fn is_clear(body: &Rect, colliders: &ColliderSet) -> bool {
    colliders.first_overlap(body).is_none()
}

/// Least-penetration axis. Ties go to the faster incoming axis, then to x.
fn push_axis(pen: Vec2, velocity: Vec2) -> Axis {
    if pen.x < pen.y {
        Axis::X
    } else if pen.y < pen.x {
        Axis::Y
    } else if velocity.y.abs() > velocity.x.abs() {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Which way to push along one axis.
///
/// Back to the side the body came from when it started the segment apart
/// from the collider on this axis. Otherwise against the motion if it
/// started clear of the collider, or away from the collider center if it
/// started inside; each falls back to the other, then to positive.
fn push_sign(start_pen: f32, start_delta: f32, start_clear: bool, v: f32, delta: f32) -> f32 {
    if start_pen <= 0.0 {
        // Apart on this axis means |start_delta| >= reach > 0
        return start_delta.signum();
    }
    let against = if v > 0.0 {
        Some(-1.0)
    } else if v < 0.0 {
        Some(1.0)
    } else {
        None
    };
    let away = if delta > 0.0 {
        Some(1.0)
    } else if delta < 0.0 {
        Some(-1.0)
    } else {
        None
    };
    let (first, second) = if start_clear { (against, away) } else { (away, against) };
    first.or(second).unwrap_or(1.0)
}

/// Step `x` at least one representable value toward `sign`
#[inline]
fn nudge(x: f32, sign: f32) -> f32 {
    let step = (x.abs() * f32::EPSILON).max(f32::MIN_POSITIVE);
    x + sign * step
}

/// Center coordinate that puts the body just outside the collider on one
/// axis. Lands exactly on the boundary unless rounding would leave a
/// sliver of overlap.
fn separate(half: f32, other_center: f32, other_half: f32, sign: f32) -> f32 {
    let mut pos = other_center + sign * (half + other_half);
    while half + other_half - (pos - other_center).abs() > 0.0 {
        pos = nudge(pos, sign);
    }
    pos
}

/// Velocity after a contact pushing along `sign`.
///
/// Motion into the surface is reflected by `bounce`; anything else stops.
#[inline]
fn rebound(v: f32, sign: f32, bounce: f32) -> f32 {
    if bounce > 0.0 && v * sign < 0.0 {
        -v * bounce
    } else {
        0.0
    }
}

fn clamp_to_world(
    pos: &mut Vec2,
    vel: &mut Vec2,
    half: Vec2,
    world: &WorldBounds,
    bounce: f32,
    contacts: &mut Contacts,
) {
    let (clamped, hit) = world.clamp_center(*pos, half);
    if hit.x {
        vel.x = rebound(vel.x, (clamped.x - pos.x).signum(), bounce);
        contacts.bounds.x = true;
    }
    if hit.y {
        vel.y = rebound(vel.y, (clamped.y - pos.y).signum(), bounce);
        contacts.bounds.y = true;
    }
    *pos = clamped;
}

/// One push-out sweep over the blocking colliders. `start` is the body at
/// the beginning of the segment and `incoming` the velocity it moved with.
fn push_out(
    pos: &mut Vec2,
    vel: &mut Vec2,
    start: &Rect,
    incoming: Vec2,
    colliders: &ColliderSet,
    contacts: &mut Contacts,
) -> bool {
    let half = start.half_extents();
    let mut moved = false;

    for collider in colliders.blocking() {
        let Some(pen) = penetration(&start.with_center(*pos), collider) else {
            continue;
        };
        let shape = collider.shape();
        let start_pen = start.penetration(shape);
        let start_clear = start_pen.x <= 0.0 || start_pen.y <= 0.0;
        let start_delta = start.center() - shape.center();

        match push_axis(pen, incoming) {
            Axis::X => {
                let sign = push_sign(start_pen.x, start_delta.x, start_clear, incoming.x, pos.x - shape.center().x);
                pos.x = separate(half.x, shape.center().x, shape.half_extents().x, sign);
                vel.x = rebound(vel.x, sign, collider.bounce());
                contacts.blocked.x = true;
            }
            Axis::Y => {
                let sign = push_sign(start_pen.y, start_delta.y, start_clear, incoming.y, pos.y - shape.center().y);
                pos.y = separate(half.y, shape.center().y, shape.half_extents().y, sign);
                vel.y = rebound(vel.y, sign, collider.bounce());
                contacts.blocked.y = true;
            }
        }
        contacts.pushes += 1;
        moved = true;
    }
    moved
}

/// Number of equal segments needed so none moves further than `max_step`
fn sweep_segments(travel: f32, max_step: f32) -> u32 {
    // NaN saturates to 0 and is lifted to one segment
    ((travel / max_step).ceil() as u32).clamp(1, MAX_SWEEP_SEGMENTS)
}

/// Move `body` by `velocity * dt` and resolve against bounds and colliders.
///
/// `body` is the player's bounds at its current position. A player that
/// starts inside a collider is pushed out on this tick. The move is split
/// into segments of at most the body's smaller half extent. If the arena
/// leaves no room in a segment (resolution fails to settle) that segment is
/// undone and the player stops where it was, provided that spot was clear.
pub fn resolve(
    body: &Rect,
    velocity: Vec2,
    dt: f32,
    colliders: &ColliderSet,
    world: &WorldBounds,
    border_bounce: f32,
) -> Resolution {
    let travel = (velocity * dt).abs().max_element();
    let segments = sweep_segments(travel, body.half_extents().min_element());
    let segment_dt = dt / segments as f32;

    let mut current = *body;
    let mut vel = velocity;
    let mut contacts = Contacts::default();
    for _ in 0..segments {
        let (pos, next) = resolve_segment(&current, vel, segment_dt, colliders, world, border_bounce, &mut contacts);
        current = current.with_center(pos);
        vel = next;
        if contacts.reverted {
            break;
        }
    }

    Resolution {
        position: current.center(),
        velocity: vel,
        contacts,
    }
}

fn resolve_segment(
    start: &Rect,
    velocity: Vec2,
    dt: f32,
    colliders: &ColliderSet,
    world: &WorldBounds,
    border_bounce: f32,
    contacts: &mut Contacts,
) -> (Vec2, Vec2) {
    let origin = start.center();
    let half = start.half_extents();
    let mut pos = origin + velocity * dt;
    let mut vel = velocity;

    for _ in 0..MAX_RESOLVE_PASSES {
        clamp_to_world(&mut pos, &mut vel, half, world, border_bounce, contacts);
        if !push_out(&mut pos, &mut vel, start, velocity, colliders, contacts) {
            return (pos, vel);
        }
    }

    // One last clamp; accept it if it is clear
    clamp_to_world(&mut pos, &mut vel, half, world, border_bounce, contacts);
    if is_clear(&start.with_center(pos), colliders) {
        return (pos, vel);
    }

    contacts.reverted = true;
    if world.contains(start) && is_clear(start, colliders) {
        log::warn!("Collision did not settle near ({}, {}); holding position", origin.x, origin.y);
        (origin, Vec2::ZERO)
    } else {
        log::warn!("Player boxed in at ({}, {}); no clear position found", pos.x, pos.y);
        (pos, Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::ColliderKind;

    fn world() -> WorldBounds {
        WorldBounds::new(800.0, 600.0).unwrap()
    }

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::from_size(Vec2::new(x, y), Vec2::splat(32.0)).unwrap()
    }

    fn wall(x: f32, y: f32, size: f32, bounce: f32) -> StaticCollider {
        StaticCollider::blocking(
            Rect::from_size(Vec2::new(x, y), Vec2::splat(size)).unwrap(),
            ColliderKind::Wall,
            bounce,
        )
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_free_move() {
        let r = resolve(
            &player_at(400.0, 300.0),
            Vec2::new(160.0, 0.0),
            DT,
            &ColliderSet::default(),
            &world(),
            0.0,
        );
        assert!((r.position.x - 402.6667).abs() < 1e-3);
        assert_eq!(r.position.y, 300.0);
        assert_eq!(r.velocity, Vec2::new(160.0, 0.0));
        assert!(!r.contacts.any());
    }

    #[test]
    fn test_left_bound_clamp() {
        let r = resolve(
            &player_at(2.0, 300.0),
            Vec2::new(-160.0, 0.0),
            DT,
            &ColliderSet::default(),
            &world(),
            0.0,
        );
        assert_eq!(r.position, Vec2::new(16.0, 300.0));
        assert_eq!(r.velocity.x, 0.0);
        assert!(r.contacts.bounds.x);
    }

    #[test]
    fn test_border_bounce() {
        let r = resolve(
            &player_at(785.0, 300.0),
            Vec2::new(160.0, 0.0),
            DT,
            &ColliderSet::default(),
            &world(),
            0.2,
        );
        assert_eq!(r.position.x, 784.0);
        assert!((r.velocity.x + 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_stops_leftward_move() {
        let set = ColliderSet::new(vec![wall(64.0, 300.0, 64.0, 0.0)]);
        let r = resolve(&player_at(96.0, 300.0), Vec2::new(-160.0, 0.0), DT, &set, &world(), 0.0);
        assert_eq!(r.position.x - 16.0, 96.0);
        assert_eq!(r.velocity.x, 0.0);
        assert!(r.contacts.blocked.x);
    }

    #[test]
    fn test_slides_along_wall() {
        // Wall below the player; moving down-right keeps the x motion
        let set = ColliderSet::new(vec![wall(400.0, 348.0, 64.0, 0.0)]);
        let v = Vec2::new(113.0, 113.0);
        let r = resolve(&player_at(400.0, 300.0), v, DT, &set, &world(), 0.0);
        assert_eq!(r.position.y, 300.0);
        assert!(r.position.x > 400.0);
        assert_eq!(r.velocity, Vec2::new(113.0, 0.0));
    }

    #[test]
    fn test_tie_prefers_faster_axis() {
        let pen = Vec2::splat(4.0);
        assert_eq!(push_axis(pen, Vec2::new(10.0, 20.0)), Axis::Y);
        assert_eq!(push_axis(pen, Vec2::new(-20.0, 10.0)), Axis::X);
        assert_eq!(push_axis(pen, Vec2::new(10.0, -10.0)), Axis::X);
        assert_eq!(push_axis(pen, Vec2::ZERO), Axis::X);
        assert_eq!(push_axis(Vec2::new(2.0, 4.0), Vec2::new(0.0, 99.0)), Axis::X);
    }

    #[test]
    fn test_spawn_inside_is_pushed_out() {
        let set = ColliderSet::new(vec![wall(400.0, 300.0, 64.0, 0.0)]);
        // Idle player slightly right of the wall center
        let r = resolve(&player_at(410.0, 300.0), Vec2::ZERO, DT, &set, &world(), 0.0);
        assert_eq!(r.position, Vec2::new(448.0, 300.0));
        assert!(is_clear(&player_at(r.position.x, r.position.y), &set));

        // Settled: the next tick changes nothing
        let again = resolve(&player_at(448.0, 300.0), Vec2::ZERO, DT, &set, &world(), 0.0);
        assert_eq!(again.position, r.position);
        assert!(!again.contacts.any());
    }

    #[test]
    fn test_decorations_ignored() {
        let floor = StaticCollider::decorative(
            Rect::from_size(Vec2::new(400.0, 300.0), Vec2::splat(63.0)).unwrap(),
        );
        let set = ColliderSet::new(vec![floor]);
        let r = resolve(&player_at(400.0, 300.0), Vec2::new(0.0, 160.0), DT, &set, &world(), 0.0);
        assert_eq!(r.velocity, Vec2::new(0.0, 160.0));
        assert!(!r.contacts.any());
    }

    #[test]
    fn test_corner_pocket_settles() {
        // Two walls forming an inner corner
        let set = ColliderSet::new(vec![wall(300.0, 200.0, 64.0, 0.0), wall(364.0, 264.0, 64.0, 0.0)]);
        let r = resolve(&player_at(350.0, 230.0), Vec2::new(-160.0, -160.0), DT, &set, &world(), 0.0);
        assert!(is_clear(&player_at(r.position.x, r.position.y), &set));
        assert!(world().contains(&player_at(r.position.x, r.position.y)));
    }

    #[test]
    fn test_gap_too_narrow_reverts() {
        // 20-unit gap between two walls; a 32-unit player cannot be in it
        let set = ColliderSet::new(vec![wall(368.0, 300.0, 64.0, 0.0), wall(452.0, 300.0, 64.0, 0.0)]);
        let start = player_at(410.0, 250.0);
        assert!(is_clear(&start, &set));
        let r = resolve(&start, Vec2::new(0.0, 900.0), DT, &set, &world(), 0.0);
        assert!(r.contacts.reverted);
        assert_eq!(r.position, Vec2::new(410.0, 250.0));
        assert_eq!(r.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_boxed_in_stops() {
        let set = ColliderSet::new(vec![wall(368.0, 300.0, 64.0, 0.0), wall(452.0, 300.0, 64.0, 0.0)]);
        let r = resolve(&player_at(410.0, 300.0), Vec2::ZERO, DT, &set, &world(), 0.0);
        assert!(r.contacts.reverted);
        assert_eq!(r.velocity, Vec2::ZERO);
        assert!(world().contains(&player_at(r.position.x, r.position.y)));
    }

    #[test]
    fn test_shallow_landing_is_pushed_to_edge() {
        // Lands 0.0008 units inside the wall's right edge (x = 96)
        let set = ColliderSet::new(vec![wall(64.0, 300.0, 64.0, 0.0)]);
        let r = resolve(&player_at(120.0, 300.0), Vec2::new(-160.0, 0.0), 0.050005, &set, &world(), 0.0);
        let body = player_at(r.position.x, r.position.y);
        assert_eq!(body.min().x, 96.0);
        assert!(!body.overlaps(set.as_slice()[0].shape()));
        assert_eq!(r.velocity.x, 0.0);

        // Resting on the edge is stable
        let again = resolve(&body, Vec2::ZERO, DT, &set, &world(), 0.0);
        assert_eq!(again.position, r.position);
        assert!(!again.contacts.any());
    }

    #[test]
    fn test_long_step_does_not_cross_wall() {
        // Wall spans x 68..132; the player starts to its right
        let set = ColliderSet::new(vec![wall(100.0, 300.0, 64.0, 0.0)]);
        for dt in [0.5, 2.0] {
            let r = resolve(&player_at(150.0, 300.0), Vec2::new(-160.0, 0.0), dt, &set, &world(), 0.0);
            assert_eq!(r.position, Vec2::new(148.0, 300.0), "dt={dt}");
            assert_eq!(r.velocity.x, 0.0);
            assert!(r.contacts.blocked.x);
        }
    }

    #[test]
    fn test_push_sign() {
        // Started apart on the axis: back to the starting side
        assert_eq!(push_sign(-2.0, 50.0, true, -160.0, -30.0), 1.0);
        // Started clear but overlapping on the axis: against the motion
        assert_eq!(push_sign(6.0, 42.0, true, 160.0, 10.0), -1.0);
        assert_eq!(push_sign(6.0, 42.0, true, 0.0, -10.0), -1.0);
        // Started inside: away from the center, then against the motion
        assert_eq!(push_sign(10.0, -5.0, false, -160.0, -5.0), -1.0);
        assert_eq!(push_sign(10.0, 0.0, false, -160.0, 0.0), 1.0);
        assert_eq!(push_sign(10.0, 0.0, false, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_separate_fractional_edges() {
        let x = separate(16.0, 64.1, 32.15, 1.0);
        assert!(16.0 + 32.15 - (x - 64.1f32).abs() <= 0.0);
        let x = separate(16.0, 64.1, 32.15, -1.0);
        assert!(16.0 + 32.15 - (x - 64.1f32).abs() <= 0.0);
        assert!(x < 64.1);
    }

    #[test]
    fn test_sweep_segments() {
        assert_eq!(sweep_segments(0.0, 16.0), 1);
        assert_eq!(sweep_segments(16.0, 16.0), 1);
        assert_eq!(sweep_segments(16.5, 16.0), 2);
        assert_eq!(sweep_segments(f32::NAN, 16.0), 1);
        assert_eq!(sweep_segments(1e9, 16.0), MAX_SWEEP_SEGMENTS);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arena_walls() -> ColliderSet {
            let mut walls = Vec::new();
            for i in 0..6 {
                walls.push(wall(120.3 + i as f32 * 110.7, 200.1, 48.0, 0.0));
                walls.push(wall(170.0 + i as f32 * 100.0, 420.55, 64.3, 0.1));
            }
            ColliderSet::new(walls)
        }

        fn overlapping(body: &Rect, set: &ColliderSet) -> bool {
            set.blocking().any(|c| body.overlaps(c.shape()))
        }

        proptest! {
            #[test]
            fn never_ends_overlapping_or_outside(
                steps in proptest::collection::vec(
                    (-400.0f32..400.0, -400.0f32..400.0, 0.0f32..0.5),
                    1..120,
                )
            ) {
                let set = arena_walls();
                let world = world();
                let mut body = player_at(400.0, 300.0);

                for (vx, vy, dt) in steps {
                    let r = resolve(&body, Vec2::new(vx, vy), dt, &set, &world, 0.2);
                    body = body.with_center(r.position);
                    prop_assert!(world.contains(&body), "left the world at {:?}", r.position);
                    prop_assert!(!overlapping(&body, &set), "overlapping at {:?} (dt={})", r.position, dt);
                    prop_assert!(r.velocity.is_finite());
                }
            }

            #[test]
            fn separate_leaves_no_overlap(
                half in 0.5f32..100.0,
                other_center in -1000.0f32..1000.0,
                other_half in 0.5f32..100.0,
                positive in any::<bool>(),
            ) {
                let sign = if positive { 1.0 } else { -1.0 };
                let pos = separate(half, other_center, other_half, sign);
                prop_assert!(half + other_half - (pos - other_center).abs() <= 0.0);
                prop_assert_eq!((pos - other_center).signum(), sign);
            }
        }
    }
}
