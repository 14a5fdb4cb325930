use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid columns
    pub grid_width: u32,
    /// Grid rows
    pub grid_height: u32,
    /// Particles placed at start, at most [`MAX_PARTICLES`]
    pub particle_count: u32,
    /// Frames written by a batch run
    pub steps: u32,
    /// Random seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Where frame files are written and replayed from
    pub frames_dir: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            particle_count: DEFAULT_PARTICLES,
            steps: DEFAULT_STEPS,
            seed: None,
            frames_dir: PathBuf::from(DEFAULT_FRAMES_DIR),
        }
    }
}

impl SimConfig {
    /// Read a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every field against the ranges the menu accepts
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("grid_width", self.grid_width, &GRID_WIDTH_RANGE)?;
        check("grid_height", self.grid_height, &GRID_HEIGHT_RANGE)?;
        check("particle_count", self.particle_count, &PARTICLE_RANGE)?;
        check("steps", self.steps, &STEPS_RANGE)?;
        Ok(())
    }
}

fn check(
    field: &'static str,
    value: u32,
    range: &std::ops::RangeInclusive<u32>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
