//! Property tests for the simulation's arithmetic invariants.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use fruit_catcher::Tuning;
use fruit_catcher::sim::{
    Circle, Rect, burst, circle_rect_intersects, clamp_frame_dt, combo_bonus, update_particles,
};

proptest! {
    #[test]
    fn frame_dt_is_positive_and_capped(raw in proptest::num::f32::ANY) {
        let dt = clamp_frame_dt(raw, &Tuning::default());
        prop_assert!(dt > 0.0);
        prop_assert!(dt <= 0.05);
    }

    #[test]
    fn combo_bonus_matches_step_formula(combo in 1u32..100_000) {
        let bonus = combo_bonus(combo, 3, 4);
        prop_assert_eq!(bonus, ((combo - 1) / 3) * 4);
        prop_assert!(combo_bonus(combo + 1, 3, 4) >= bonus);
    }

    #[test]
    fn corner_contact_is_a_hit(m in 2u32..40, n_seed in 1u32..40, corner in 0usize..4) {
        // Pythagorean triple keeps every distance exact in f32
        let n = 1 + n_seed % (m - 1);
        let dx = (m * m - n * n) as f32;
        let dy = (2 * m * n) as f32;
        let r = (m * m + n * n) as f32;

        let rect = Rect::new(Vec2::new(100.0, 200.0), Vec2::new(64.0, 32.0));
        let (corner_pt, dir) = match corner {
            0 => (rect.min, Vec2::new(-1.0, -1.0)),
            1 => (Vec2::new(rect.max().x, rect.min.y), Vec2::new(1.0, -1.0)),
            2 => (Vec2::new(rect.min.x, rect.max().y), Vec2::new(-1.0, 1.0)),
            _ => (rect.max(), Vec2::new(1.0, 1.0)),
        };
        let center = corner_pt + dir * Vec2::new(dx, dy);

        prop_assert!(circle_rect_intersects(Circle::new(center, r), rect));
        prop_assert!(!circle_rect_intersects(Circle::new(center, r - 0.5), rect));
    }

    #[test]
    fn spawn_delay_monotonic_with_floor(a in 0.0f32..10_000.0, b in 0.0f32..10_000.0) {
        let tuning = Tuning::default();
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let d_early = tuning.spawn_delay_at(early);
        let d_late = tuning.spawn_delay_at(late);
        prop_assert!(d_late <= d_early);
        prop_assert!(d_late >= tuning.min_spawn_delay_ms);
        prop_assert!(d_early <= tuning.start_spawn_delay_ms);
    }

    #[test]
    fn particle_life_strictly_decreases(
        seed in any::<u64>(),
        steps in proptest::collection::vec(0.001f32..0.05, 1..60),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut particles = burst(&mut rng, Vec2::new(50.0, 50.0), 0xffffff, 14);
        for dt in steps {
            let before = particles.clone();
            update_particles(&mut particles, dt, 300.0);
            // Survivors keep their relative order
            let survivors: Vec<_> = before.iter().filter(|p| p.life - dt > 0.0).collect();
            prop_assert_eq!(survivors.len(), particles.len());
            for (old, new) in survivors.iter().zip(&particles) {
                prop_assert!(new.life < old.life);
            }
            prop_assert!(particles.iter().all(|p| p.life > 0.0));
        }
    }
}
