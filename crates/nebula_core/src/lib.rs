pub mod config;
pub mod constants;
pub mod grid;
pub mod store;
pub mod types;

pub use config::{ConfigError, SimConfig};
pub use constants::*;
pub use grid::{Grid, GridError, render};
pub use store::ParticleStore;
pub use types::*;
