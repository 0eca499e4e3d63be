//! Cosmetic catch bursts
//!
//! Particles never affect gameplay. They pop upward, fall under constant
//! gravity and are dropped the moment their life runs out.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;

/// Spawn `count` particles at `pos` in the given color
pub fn burst<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, color: u32, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let vx = (rng.random::<f32>() - 0.5) * 280.0;
            // Biased upward: [-176, 44)
            let vy = (rng.random::<f32>() - 0.8) * 220.0;
            let life = 0.6 + rng.random::<f32>() * 0.35;
            let max_life = 0.6 + rng.random::<f32>() * 0.35;
            let size = 2.0 + rng.random::<f32>() * 4.0;
            Particle {
                pos,
                vel: Vec2::new(vx, vy),
                life,
                max_life,
                size,
                color,
            }
        })
        .collect()
}

/// Age, cull and integrate particles for `dt` seconds
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32, gravity: f32) {
    particles.retain_mut(|p| {
        p.life -= dt;
        if p.life <= 0.0 {
            return false;
        }
        p.pos += p.vel * dt;
        p.vel.y += gravity * dt;
        true
    });
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let particles = burst(&mut rng, Vec2::new(10.0, 20.0), 0xff9f43, 14);
        assert_eq!(particles.len(), 14);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.color, 0xff9f43);
            assert!(p.vel.x >= -140.01 && p.vel.x <= 140.01);
            assert!(p.vel.y >= -176.01 && p.vel.y <= 44.01);
            assert!(p.life >= 0.6 && p.life <= 0.95);
            assert!(p.max_life >= 0.6 && p.max_life <= 0.95);
            assert!(p.size >= 2.0 && p.size <= 6.0);
        }
    }

    #[test]
    fn test_update_integrates_and_falls() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, -100.0),
            life: 1.0,
            max_life: 1.0,
            size: 3.0,
            color: 0,
        }];
        update_particles(&mut particles, 0.1, 300.0);
        let p = &particles[0];
        assert!((p.pos.x - 1.0).abs() < 1e-5);
        assert!((p.pos.y + 10.0).abs() < 1e-5);
        assert!((p.vel.y + 70.0).abs() < 1e-4);
        assert!((p.life - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_update_culls_expired() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = burst(&mut rng, Vec2::ZERO, 0, 14);
        for _ in 0..20 {
            update_particles(&mut particles, 0.05, 300.0);
            assert!(particles.iter().all(|p| p.life > 0.0));
        }
        assert!(particles.is_empty());
    }
}
