use nebula_core::{Brightness, ParticleStore};

/// Sum of energy over live particles
pub fn total_energy(store: &ParticleStore) -> u64 {
    store.iter_alive().map(|p| p.energy as u64).sum()
}

/// Mean energy per live particle, 0 when nothing is alive
pub fn mean_energy(store: &ParticleStore) -> f64 {
    let alive = store.alive_count();
    if alive == 0 {
        return 0.0;
    }
    total_energy(store) as f64 / alive as f64
}

/// Live particles per tier: (faint, bright)
pub fn brightness_census(store: &ParticleStore) -> (usize, usize) {
    store
        .iter_alive()
        .fold((0, 0), |(faint, bright), p| match p.brightness {
            Brightness::Faint => (faint + 1, bright),
            Brightness::Bright => (faint, bright + 1),
        })
}
