use crate::constants::MAX_PARTICLES;
use crate::types::Particle;

/// Fixed-capacity arena of particle slots.
///
/// The store always holds exactly [`MAX_PARTICLES`] slots. Only the first
/// `count` take part in a run; the rest stay dead. Slots are never removed or
/// reordered, so an index names the same particle for the whole run.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    slots: Box<[Particle]>,
    count: usize,
    width: u32,
    height: u32,
}

impl ParticleStore {
    /// Empty store for a `width` x `height` grid with `count` active slots.
    /// Every slot starts dead until the initializer fills it.
    ///
    /// `count` is clamped to capacity and dimensions to at least one cell;
    /// callers are expected to validate both beforehand.
    pub fn new(count: usize, width: u32, height: u32) -> Self {
        Self {
            slots: vec![Particle::default(); MAX_PARTICLES].into_boxed_slice(),
            count: count.min(MAX_PARTICLES),
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Store whose active slots are exactly `particles`, in order
    pub fn with_particles(particles: &[Particle], width: u32, height: u32) -> Self {
        let mut store = Self::new(particles.len(), width, height);
        let n = store.count;
        store.slots[..n].copy_from_slice(&particles[..n]);
        store
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots requested at start, alive or not
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Slots `[0, count)`
    pub fn active(&self) -> &[Particle] {
        &self.slots[..self.count]
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.count]
    }

    /// Every slot, including the permanently inactive tail
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Particle] {
        &mut self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.active().get(index)
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.active().iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    /// Mark every slot dead, ready for a fresh initialization pass
    pub fn reset(&mut self) {
        for p in self.slots_mut() {
            p.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_fixed_capacity() {
        let store = ParticleStore::new(10, 8, 6);
        assert_eq!(store.capacity(), MAX_PARTICLES);
        assert_eq!(store.count(), 10);
        assert_eq!(store.active().len(), 10);
        assert_eq!(store.alive_count(), 0);
    }

    #[test]
    fn test_count_clamped_to_capacity() {
        let store = ParticleStore::new(MAX_PARTICLES + 50, 8, 6);
        assert_eq!(store.count(), MAX_PARTICLES);
    }

    #[test]
    fn test_with_particles_keeps_order() {
        let ps = [Particle::new(1, 1, 2), Particle::new(3, 4, 5)];
        let store = ParticleStore::with_particles(&ps, 10, 10);
        assert_eq!(store.count(), 2);
        assert_eq!(store.get(1), Some(&ps[1]));
        assert!(store.slots()[2..].iter().all(|p| !p.alive));
    }

    #[test]
    fn test_reset_kills_everything() {
        let ps = [Particle::new(0, 0, 1), Particle::new(1, 0, 1)];
        let mut store = ParticleStore::with_particles(&ps, 4, 4);
        assert_eq!(store.alive_count(), 2);
        store.reset();
        assert_eq!(store.alive_count(), 0);
    }
}
