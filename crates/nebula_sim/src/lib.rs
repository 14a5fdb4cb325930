pub mod nebula;
pub mod pipeline;

pub use nebula::Nebula;
pub use pipeline::{TickReport, run_tick};
