use std::fmt;

use thiserror::Error;

use crate::store::ParticleStore;
use crate::types::Glyph;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to allocate a {width}x{height} grid")]
    Allocation { width: u32, height: u32 },
}

/// Character projection of a particle store.
/// Row-major, `height` rows of `width` cells. Built fresh on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Glyph>,
}

impl Grid {
    /// All-empty grid. The cell buffer is reserved fallibly so an oversized
    /// grid reports an error instead of aborting.
    pub fn blank(width: u32, height: u32) -> Result<Self, GridError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GridError::Allocation { width, height })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { width, height })?;
        cells.resize(len, Glyph::Empty);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows already checked to be `width` long
    pub fn from_rows(width: u32, rows: Vec<Vec<Glyph>>) -> Result<Self, GridError> {
        let height = rows.len() as u32;
        let mut grid = Self::blank(width, height)?;
        for (y, row) in rows.into_iter().enumerate() {
            let start = y * width as usize;
            for (x, glyph) in row.into_iter().take(width as usize).enumerate() {
                grid.cells[start + x] = glyph;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.width.max(1) as usize).take(self.height as usize)
    }

    /// Number of cells holding `glyph`
    pub fn count(&self, glyph: Glyph) -> usize {
        self.cells.iter().filter(|&&g| g == glyph).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Bright always wins; faint never covers bright
    fn plot(&mut self, x: u32, y: u32, glyph: Glyph) {
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        if *cell == Glyph::Bright && glyph == Glyph::Faint {
            return;
        }
        *cell = glyph;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for glyph in row {
                write!(f, "{}", glyph.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Project the live particles of `store` onto a fresh grid.
/// Particles are visited in slot order, so among equal tiers the later one
/// lands last.
pub fn render(store: &ParticleStore) -> Result<Grid, GridError> {
    let (w, h) = (store.width(), store.height());
    let mut grid = Grid::blank(w, h)?;
    for p in store.iter_alive() {
        let x = p.x.min(w - 1);
        let y = p.y.min(h - 1);
        grid.plot(x, y, p.glyph());
    }
    Ok(grid)
}
