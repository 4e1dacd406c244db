//! Entity motion
//!
//! Straight-line movement with elastic bounces off the arena walls.

use glam::Vec2;

use super::round::Entity;

/// Advance every entity by `dt` seconds.
///
/// An axis whose tentative position leaves `[0, arena - size]` has its
/// velocity negated before the move is applied. The result is then clamped so
/// a long frame or a shrunken arena can't leave a sprite outside the board.
pub fn step(entities: &mut [Entity], arena: Vec2, size: Vec2, dt: f32) {
    let max = (arena - size).max(Vec2::ZERO);

    for entity in entities.iter_mut() {
        let tentative = entity.pos + entity.vel * dt;
        if tentative.x < 0.0 || tentative.x > max.x {
            entity.vel.x = -entity.vel.x;
        }
        if tentative.y < 0.0 || tentative.y > max.y {
            entity.vel.y = -entity.vel.y;
        }
        entity.pos = (entity.pos + entity.vel * dt).clamp(Vec2::ZERO, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SIZE: Vec2 = Vec2::new(120.0, 120.0);
    const ARENA: Vec2 = Vec2::new(800.0, 600.0);
    const DT: f32 = 1.0 / 60.0;

    fn entity(pos: Vec2, vel: Vec2) -> Entity {
        Entity {
            identity: "pikachu".to_string(),
            is_target: false,
            pos,
            vel,
        }
    }

    #[test]
    fn test_free_movement() {
        let mut entities = [entity(Vec2::new(100.0, 100.0), Vec2::new(60.0, -30.0))];
        step(&mut entities, ARENA, SIZE, 0.5);
        assert!((entities[0].pos - Vec2::new(130.0, 85.0)).length() < 1e-4);
        assert_eq!(entities[0].vel, Vec2::new(60.0, -30.0));
    }

    #[test]
    fn test_bounce_left_wall() {
        let mut entities = [entity(Vec2::new(0.5, 100.0), Vec2::new(-60.0, 0.0))];
        step(&mut entities, ARENA, SIZE, DT);
        assert_eq!(entities[0].vel, Vec2::new(60.0, 0.0));
        assert!((entities[0].pos.x - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_bottom_right_corner() {
        let corner = ARENA - SIZE;
        let mut entities = [entity(corner - Vec2::splat(0.2), Vec2::new(30.0, 45.0))];
        step(&mut entities, ARENA, SIZE, DT);
        assert_eq!(entities[0].vel, Vec2::new(-30.0, -45.0));
        assert!(entities[0].pos.x <= corner.x && entities[0].pos.y <= corner.y);
    }

    #[test]
    fn test_huge_dt_is_clamped() {
        let mut entities = [entity(Vec2::new(300.0, 300.0), Vec2::new(5000.0, -5000.0))];
        step(&mut entities, ARENA, SIZE, 1.0);
        let pos = entities[0].pos;
        assert!(pos.x >= 0.0 && pos.x <= ARENA.x - SIZE.x);
        assert!(pos.y >= 0.0 && pos.y <= ARENA.y - SIZE.y);
    }

    #[test]
    fn test_shrunk_arena_pulls_entities_back() {
        let mut entities = [entity(Vec2::new(700.0, 500.0), Vec2::ZERO)];
        step(&mut entities, Vec2::new(400.0, 300.0), SIZE, DT);
        assert_eq!(entities[0].pos, Vec2::new(280.0, 180.0));
    }

    proptest! {
        #[test]
        fn prop_entities_never_escape(
            x in 0.0f32..680.0,
            y in 0.0f32..480.0,
            vx in -200.0f32..200.0,
            vy in -200.0f32..200.0,
            frames in 1usize..600,
        ) {
            let mut entities = [entity(Vec2::new(x, y), Vec2::new(vx, vy))];
            let speed = entities[0].vel.length();
            for _ in 0..frames {
                step(&mut entities, ARENA, SIZE, DT);
                let e = &entities[0];
                prop_assert!(e.pos.x >= 0.0 && e.pos.x <= ARENA.x - SIZE.x);
                prop_assert!(e.pos.y >= 0.0 && e.pos.y <= ARENA.y - SIZE.y);
                prop_assert!((e.vel.length() - speed).abs() < 1e-3);
                prop_assert_eq!(e.vel.x.abs(), vx.abs());
                prop_assert_eq!(e.vel.y.abs(), vy.abs());
            }
        }
    }
}
