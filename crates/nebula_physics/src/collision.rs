use nebula_core::ParticleStore;

/// Merge live particles that share a cell.
///
/// Pairs are visited as `(i, j)` with `i < j` in slot order. When they
/// coincide, `i` absorbs the energy of `j` and `j` dies. A particle that died
/// earlier in the same pass is skipped both as absorber and as target, so when
/// three or more meet, the lowest live index takes everything.
///
/// Returns the number of merges performed.
pub fn handle_collisions(store: &mut ParticleStore) -> usize {
    let particles = store.active_mut();
    let mut merges = 0;
    for i in 0..particles.len() {
        if !particles[i].alive {
            continue;
        }
        let (head, tail) = particles.split_at_mut(i + 1);
        let absorber = &mut head[i];
        for target in tail.iter_mut().filter(|p| p.alive) {
            if target.pos() == absorber.pos() {
                absorber.energy += target.energy;
                target.alive = false;
                merges += 1;
            }
        }
    }
    merges
}
