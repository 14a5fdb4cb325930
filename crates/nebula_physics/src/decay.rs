use nebula_core::{Brightness, ParticleStore};

/// Re-tier live particles by energy and retire the ones that ran out.
/// Returns how many died in this call.
pub fn update_brightness(store: &mut ParticleStore) -> usize {
    let mut died = 0;
    for p in store.active_mut().iter_mut().filter(|p| p.alive) {
        if p.energy == 0 {
            p.alive = false;
            died += 1;
        } else {
            p.brightness = Brightness::from_energy(p.energy);
        }
    }
    died
}
