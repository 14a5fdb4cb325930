use nebula_core::{
    MAX_START_ENERGY, MIN_START_ENERGY, PLACEMENT_TRIES, Particle, ParticleStore,
};
use rand::Rng;
use tracing::debug;

/// Populate the active slots of `store` with fresh particles.
///
/// Each particle gets a random energy and a cell not yet taken by an earlier
/// particle of this pass, trying [`PLACEMENT_TRIES`] times. If every try
/// lands on an occupied cell, one more random cell is used as-is, so overlap
/// is possible on crowded grids. Slots past `count` are left dead.
pub fn initialize(store: &mut ParticleStore, rng: &mut impl Rng) {
    store.reset();
    let (w, h) = (store.width(), store.height());
    let mut overlaps = 0usize;

    for i in 0..store.count() {
        let energy = rng.gen_range(MIN_START_ENERGY..=MAX_START_ENERGY);
        let (x, y) = match find_free_cell(&store.active()[..i], w, h, rng) {
            Some(cell) => cell,
            None => {
                overlaps += 1;
                (rng.gen_range(0..w), rng.gen_range(0..h))
            }
        };
        store.active_mut()[i] = Particle::new(x, y, energy);
    }

    debug!(
        count = store.count(),
        width = w,
        height = h,
        overlaps,
        "initialized particles"
    );
}

fn find_free_cell(
    placed: &[Particle],
    w: u32,
    h: u32,
    rng: &mut impl Rng,
) -> Option<(u32, u32)> {
    for _ in 0..PLACEMENT_TRIES {
        let cell = (rng.gen_range(0..w), rng.gen_range(0..h));
        let occupied = placed.iter().any(|p| p.alive && p.pos() == cell);
        if !occupied {
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::{Brightness, MAX_PARTICLES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_initialize_fills_exactly_count() {
        for (count, seed) in [(1, 1u64), (20, 2), (77, 3), (MAX_PARTICLES, 4)] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut store = ParticleStore::new(count, 20, 12);
            initialize(&mut store, &mut rng);

            assert_eq!(store.alive_count(), count);
            for p in store.active() {
                assert!((MIN_START_ENERGY..=MAX_START_ENERGY).contains(&p.energy));
                assert!(p.x < 20 && p.y < 12);
            }
            assert!(store.slots()[count..].iter().all(|p| !p.alive));
        }
    }

    #[test]
    fn test_spawn_brightness_from_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut store = ParticleStore::new(100, 30, 30);
        initialize(&mut store, &mut rng);
        for p in store.active() {
            let expected = if p.energy >= 4 {
                Brightness::Bright
            } else {
                Brightness::Faint
            };
            assert_eq!(p.brightness, expected);
        }
    }

    #[test]
    fn test_sparse_grid_places_without_overlap() {
        // 10 particles on 80x50 cells: each try collides with probability
        // < 10/4000, so fifty misses in a row never happens in practice.
        for seed in 0..20u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut store = ParticleStore::new(10, 80, 50);
            initialize(&mut store, &mut rng);
            let cells: HashSet<_> = store.active().iter().map(|p| p.pos()).collect();
            assert_eq!(cells.len(), 10, "seed {seed}");
        }
    }

    #[test]
    fn test_crowded_grid_falls_back_to_overlap() {
        // More particles than cells: placement must give up and overlap.
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut store = ParticleStore::new(30, 5, 5);
        initialize(&mut store, &mut rng);
        assert_eq!(store.alive_count(), 30);
        let cells: HashSet<_> = store.active().iter().map(|p| p.pos()).collect();
        assert!(cells.len() <= 25);
    }

    #[test]
    fn test_reinitialize_clears_previous_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut store = ParticleStore::new(15, 10, 10);
        initialize(&mut store, &mut rng);
        for p in store.active_mut() {
            p.alive = false;
        }
        initialize(&mut store, &mut rng);
        assert_eq!(store.alive_count(), 15);
    }
}
