// Simulation constants.
// Grid coordinates are integer cells; energy is a unitless integer.

/// Fixed number of particle slots in a store
pub const MAX_PARTICLES: usize = 200;

/// Random placement attempts per particle before overlap is accepted
pub const PLACEMENT_TRIES: u32 = 50;

/// Inclusive range of starting energy
pub const MIN_START_ENERGY: u32 = 1;
pub const MAX_START_ENERGY: u32 = 5;

/// Energy at which a freshly spawned particle starts bright
pub const SPAWN_BRIGHT_ENERGY: u32 = 4;

/// Energy at which a particle is bright after a tick
pub const BRIGHT_ENERGY: u32 = 3;

/// Chance per particle per tick of losing one unit of energy: 1 in N
pub const DECAY_ONE_IN: u32 = 10;

/// Defaults used by the menu and the example run
pub const DEFAULT_GRID_WIDTH: u32 = 20;
pub const DEFAULT_GRID_HEIGHT: u32 = 12;
pub const DEFAULT_PARTICLES: u32 = 20;
pub const DEFAULT_STEPS: u32 = 40;
pub const EXAMPLE_STEPS: u32 = 10;

/// Accepted ranges for user-supplied parameters
pub const GRID_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 5..=80;
pub const GRID_HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 5..=50;
pub const PARTICLE_RANGE: std::ops::RangeInclusive<u32> = 1..=MAX_PARTICLES as u32;
pub const STEPS_RANGE: std::ops::RangeInclusive<u32> = 1..=10_000;

/// Directory frames are written to unless configured otherwise
pub const DEFAULT_FRAMES_DIR: &str = "steps";
