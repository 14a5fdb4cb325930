use nebula_core::{Grid, GridError, ParticleStore, SimConfig};
use nebula_physics::{energy, init};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::pipeline::{TickReport, run_tick};

/// One simulation run: the particle store, its random source and the step
/// counter. Created when a run starts and dropped when it ends.
pub struct Nebula {
    store: ParticleStore,
    rng: ChaCha8Rng,
    seed: u64,
    /// Step currently on display; starts at 1 and advances once per tick
    step: u32,
}

impl Nebula {
    /// Start a run from `config`. Without a configured seed one is drawn
    /// from the OS and logged so the run can be repeated.
    pub fn new(config: &SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self::with_seed(
            config.particle_count as usize,
            config.grid_width,
            config.grid_height,
            seed,
        )
    }

    pub fn with_seed(count: usize, width: u32, height: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut store = ParticleStore::new(count, width, height);
        init::initialize(&mut store, &mut rng);
        info!(
            seed,
            count = store.count(),
            width = store.width(),
            height = store.height(),
            "nebula created"
        );
        Self {
            store,
            rng,
            seed,
            step: 1,
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) -> TickReport {
        let report = run_tick(&mut self.store, &mut self.rng);
        debug!(
            step = self.step,
            merges = report.merges,
            deaths = report.deaths,
            alive = self.store.alive_count(),
            energy = energy::total_energy(&self.store),
            "tick"
        );
        self.step += 1;
        report
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn alive_count(&self) -> usize {
        self.store.alive_count()
    }

    pub fn total_energy(&self) -> u64 {
        energy::total_energy(&self.store)
    }

    pub fn render(&self) -> Result<Grid, GridError> {
        nebula_core::render(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Nebula::with_seed(30, 20, 12, 1234);
        let mut b = Nebula::with_seed(30, 20, 12, 1234);
        for _ in 0..50 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.store().active(), b.store().active());
        assert_eq!(a.render().unwrap(), b.render().unwrap());
    }

    #[test]
    fn test_step_counter() {
        let mut n = Nebula::with_seed(5, 10, 10, 1);
        assert_eq!(n.step(), 1);
        n.tick();
        n.tick();
        assert_eq!(n.step(), 3);
    }

    #[test]
    fn test_new_uses_config() {
        let config = SimConfig {
            grid_width: 30,
            grid_height: 7,
            particle_count: 12,
            seed: Some(99),
            ..SimConfig::default()
        };
        let n = Nebula::new(&config);
        assert_eq!(n.seed(), 99);
        assert_eq!(n.alive_count(), 12);
        assert_eq!(n.store().width(), 30);
        assert_eq!(n.store().height(), 7);
        let grid = n.render().unwrap();
        assert_eq!((grid.width(), grid.height()), (30, 7));
    }

    #[test]
    fn test_energy_never_created() {
        let mut n = Nebula::with_seed(50, 10, 6, 77);
        let mut last = n.total_energy();
        for _ in 0..200 {
            n.tick();
            let now = n.total_energy();
            assert!(now <= last);
            last = now;
        }
    }
}
