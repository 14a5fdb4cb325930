use nebula_core::{DECAY_ONE_IN, ParticleStore};
use rand::Rng;

/// Random walk: every live particle steps by -1, 0 or +1 on each axis.
/// The grid edge is a wall; a step past it is cut short, not wrapped.
/// Each particle also has a 1 in [`DECAY_ONE_IN`] chance to lose one unit
/// of energy, never going below zero.
pub fn move_particles(store: &mut ParticleStore, rng: &mut impl Rng) {
    let (w, h) = (store.width(), store.height());
    for p in store.active_mut().iter_mut().filter(|p| p.alive) {
        let dx = rng.gen_range(-1..=1);
        let dy = rng.gen_range(-1..=1);
        p.x = step_clamped(p.x, dx, w);
        p.y = step_clamped(p.y, dy, h);

        if rng.gen_ratio(1, DECAY_ONE_IN) {
            p.energy = p.energy.saturating_sub(1);
        }
    }
}

fn step_clamped(v: u32, delta: i32, len: u32) -> u32 {
    v.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::Particle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_step_clamped_walls() {
        assert_eq!(step_clamped(0, -1, 10), 0);
        assert_eq!(step_clamped(9, 1, 10), 9);
        assert_eq!(step_clamped(4, 1, 10), 5);
        assert_eq!(step_clamped(4, -1, 10), 3);
    }

    #[test]
    fn test_motion_stays_in_bounds() {
        let corners = [
            Particle::new(0, 0, 5),
            Particle::new(5, 0, 5),
            Particle::new(0, 4, 5),
            Particle::new(5, 4, 5),
            Particle::new(2, 2, 5),
        ];
        let mut store = ParticleStore::with_particles(&corners, 6, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            move_particles(&mut store, &mut rng);
            for p in store.active() {
                assert!(p.x < 6 && p.y < 5, "{p:?}");
            }
        }
    }

    #[test]
    fn test_moves_at_most_one_cell() {
        let mut store = ParticleStore::with_particles(&[Particle::new(10, 10, 5)], 20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..200 {
            let before = store.active()[0].pos();
            move_particles(&mut store, &mut rng);
            let after = store.active()[0].pos();
            assert!(before.0.abs_diff(after.0) <= 1);
            assert!(before.1.abs_diff(after.1) <= 1);
        }
    }

    #[test]
    fn test_energy_decay_floors_at_zero() {
        let mut store = ParticleStore::with_particles(&[Particle::new(1, 1, 1)], 4, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..1000 {
            move_particles(&mut store, &mut rng);
        }
        assert_eq!(store.active()[0].energy, 0);
    }

    #[test]
    fn test_decay_rate_roughly_one_in_ten() {
        let ps = vec![Particle::new(5, 5, 1_000_000); 100];
        let mut store = ParticleStore::with_particles(&ps, 10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..100 {
            move_particles(&mut store, &mut rng);
        }
        let lost: u32 = store.active().iter().map(|p| 1_000_000 - p.energy).sum();
        // 10_000 draws at p = 0.1: mean 1000, sd 30
        assert!((850..=1150).contains(&lost), "lost = {lost}");
    }

    #[test]
    fn test_dead_particles_do_not_move() {
        let mut dead = Particle::new(3, 3, 5);
        dead.alive = false;
        let mut store = ParticleStore::with_particles(&[dead], 8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            move_particles(&mut store, &mut rng);
        }
        assert_eq!(store.active()[0], dead);
    }
}
