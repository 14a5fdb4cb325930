use serde::{Deserialize, Serialize};

use crate::constants::{BRIGHT_ENERGY, SPAWN_BRIGHT_ENERGY};

/// One simulated point on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Particle {
    /// Column, `0..grid_width`
    pub x: u32,
    /// Row, `0..grid_height`
    pub y: u32,
    pub energy: u32,
    pub brightness: Brightness,
    /// Dead particles keep their slot but take no further part in the run
    pub alive: bool,
}

impl Particle {
    pub fn new(x: u32, y: u32, energy: u32) -> Self {
        Self {
            x,
            y,
            energy,
            brightness: Brightness::at_spawn(energy),
            alive: true,
        }
    }

    pub fn pos(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn glyph(&self) -> Glyph {
        match self.brightness {
            Brightness::Bright => Glyph::Bright,
            Brightness::Faint => Glyph::Faint,
        }
    }
}

/// Brightness tier, derived from energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Brightness {
    #[default]
    Faint,
    Bright,
}

impl Brightness {
    /// Tier given to a particle when it is first placed
    pub fn at_spawn(energy: u32) -> Self {
        if energy >= SPAWN_BRIGHT_ENERGY {
            Self::Bright
        } else {
            Self::Faint
        }
    }

    /// Tier after a tick. Only meaningful for energy >= 1; zero-energy
    /// particles die instead of being re-tiered.
    pub fn from_energy(energy: u32) -> Self {
        if energy >= BRIGHT_ENERGY {
            Self::Bright
        } else {
            Self::Faint
        }
    }
}

/// A single grid cell as it is drawn and persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Glyph {
    #[default]
    Empty,
    Faint,
    Bright,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Faint => '*',
            Self::Bright => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Empty),
            '*' => Some(Self::Faint),
            'O' => Some(Self::Bright),
            _ => None,
        }
    }
}
