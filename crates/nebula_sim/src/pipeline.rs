use nebula_core::ParticleStore;
use nebula_physics::{handle_collisions, move_particles, update_brightness};
use rand::Rng;

/// What one tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub merges: usize,
    pub deaths: usize,
}

/// Advance the store by one tick: motion, then collisions, then
/// brightness/death. The order matters; decaying before merging would let
/// particles die that a merge would have kept alive.
pub fn run_tick(store: &mut ParticleStore, rng: &mut impl Rng) -> TickReport {
    move_particles(store, rng);
    let merges = handle_collisions(store);
    let deaths = update_brightness(store);
    TickReport { merges, deaths }
}
