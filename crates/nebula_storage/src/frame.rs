//! Text frame files.
//!
//! One file per saved step, named `step<NNNN>.txt`:
//!
//! ```text
//! NebulaSim frame <step>
//! grid <width> <height>
//! <height lines of exactly width cells from '.', '*', 'O'>
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use nebula_core::{Glyph, Grid, ParticleStore};
use tracing::debug;

use crate::FrameError;

pub const FRAME_PREFIX: &str = "step";
pub const FRAME_EXTENSION: &str = "txt";
const FRAME_TITLE: &str = "NebulaSim frame";
const GRID_TAG: &str = "grid";

/// Path of the frame file for `step` inside `dir`
pub fn frame_path(dir: &Path, step: u32) -> PathBuf {
    dir.join(format!("{FRAME_PREFIX}{step:04}.{FRAME_EXTENSION}"))
}

/// Render `store` and write it as the frame for `step`, replacing any
/// earlier file for that step. `dir` must already exist.
pub fn save_frame(dir: &Path, store: &ParticleStore, step: u32) -> Result<PathBuf, FrameError> {
    let grid = nebula_core::render(store)?;
    let path = frame_path(dir, step);
    fs::write(&path, encode(step, &grid)).map_err(|source| FrameError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(step, path = %path.display(), "frame saved");
    Ok(path)
}

/// Frame file contents for `grid` at `step`
pub fn encode(step: u32, grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize + 48);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{FRAME_TITLE} {step}");
    let _ = writeln!(out, "{GRID_TAG} {} {}", grid.width(), grid.height());
    let _ = write!(out, "{grid}");
    out
}

/// A frame read back from disk. Only the picture survives; particle state is
/// not recoverable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub step: u32,
    pub grid: Grid,
}

impl Frame {
    pub fn load(path: &Path) -> Result<Self, FrameError> {
        let text = fs::read_to_string(path).map_err(|source| FrameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (n, title) = lines.next().ok_or_else(|| malformed(1, "empty file"))?;
        let step = title
            .strip_prefix(FRAME_TITLE)
            .and_then(|rest| rest.trim().parse::<u32>().ok())
            .ok_or_else(|| malformed(n, format!("expected `{FRAME_TITLE} <step>`")))?;

        let (n, dims) = lines
            .next()
            .ok_or_else(|| malformed(2, "missing grid header"))?;
        let (width, height) = parse_dims(dims).ok_or_else(|| {
            malformed(n, format!("expected `{GRID_TAG} <width> <height>`"))
        })?;

        // Rows grow as they are read; the header's height is untrusted.
        let mut rows = Vec::new();
        for _ in 0..height {
            let (n, line) = lines.next().ok_or_else(|| {
                malformed(3 + rows.len(), format!("expected {height} grid rows"))
            })?;
            rows.push(parse_row(line, width).map_err(|reason| malformed(n, reason))?);
        }

        if let Some((n, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
            return Err(malformed(n, "trailing data after grid"));
        }

        Ok(Self {
            step,
            grid: Grid::from_rows(width, rows)?,
        })
    }
}

fn parse_dims(line: &str) -> Option<(u32, u32)> {
    let mut parts = line.split_whitespace();
    if parts.next()? != GRID_TAG {
        return None;
    }
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((width, height))
}

fn parse_row(line: &str, width: u32) -> Result<Vec<Glyph>, String> {
    let row = line
        .chars()
        .map(|c| Glyph::from_char(c).ok_or_else(|| format!("unexpected cell {c:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    if row.len() != width as usize {
        return Err(format!("row has {} cells, expected {width}", row.len()));
    }
    Ok(row)
}

fn malformed(line: usize, reason: impl Into<String>) -> FrameError {
    FrameError::Malformed {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::{Brightness, Particle};
    use tempfile::TempDir;

    fn sample_store() -> ParticleStore {
        let mut faint = Particle::new(0, 0, 1);
        faint.brightness = Brightness::Faint;
        let bright = Particle::new(9, 5, 5);
        let mut dead = Particle::new(4, 4, 5);
        dead.alive = false;
        ParticleStore::with_particles(&[faint, bright, dead], 10, 6)
    }

    #[test]
    fn test_frame_path_zero_padded() {
        let dir = Path::new("steps");
        assert_eq!(frame_path(dir, 5), PathBuf::from("steps/step0005.txt"));
        assert_eq!(frame_path(dir, 1234), PathBuf::from("steps/step1234.txt"));
    }

    #[test]
    fn test_save_writes_documented_layout() {
        let tmp = TempDir::new().unwrap();
        let path = save_frame(tmp.path(), &sample_store(), 5).unwrap();
        assert_eq!(path, tmp.path().join("step0005.txt"));

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NebulaSim frame 5");
        assert_eq!(lines[1], "grid 10 6");
        assert_eq!(lines.len(), 2 + 6);
        for row in &lines[2..] {
            assert_eq!(row.len(), 10);
            assert!(row.chars().all(|c| matches!(c, '.' | '*' | 'O')));
        }
        assert!(text.ends_with('\n'));
        assert_eq!(&lines[2][..1], "*");
        assert_eq!(&lines[7][9..], "O");
        assert_eq!(&lines[6][4..5], ".");
    }

    #[test]
    fn test_saved_frame_parses_back() {
        let tmp = TempDir::new().unwrap();
        let store = sample_store();
        let path = save_frame(tmp.path(), &store, 12).unwrap();
        let frame = Frame::load(&path).unwrap();
        assert_eq!(frame.step, 12);
        assert_eq!(frame.grid, nebula_core::render(&store).unwrap());
    }

    #[test]
    fn test_save_overwrites_same_step() {
        let tmp = TempDir::new().unwrap();
        save_frame(tmp.path(), &sample_store(), 3).unwrap();
        let empty = ParticleStore::new(0, 10, 6);
        let path = save_frame(tmp.path(), &empty, 3).unwrap();
        let frame = Frame::load(&path).unwrap();
        assert_eq!(frame.grid.count(Glyph::Empty), 60);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = save_frame(&missing, &sample_store(), 1).unwrap_err();
        assert!(matches!(err, FrameError::Io { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn test_parse_rejects_bad_frames() {
        let cases = [
            ("", 1),
            ("Nebula frame 1\ngrid 2 1\n..\n", 1),
            ("NebulaSim frame x\ngrid 2 1\n..\n", 1),
            ("NebulaSim frame 1\ngrid 2\n..\n", 2),
            ("NebulaSim frame 1\ngrid 2 2\n..\n", 4),
            ("NebulaSim frame 1\ngrid 3 1\n..\n", 3),
            ("NebulaSim frame 1\ngrid 2 1\n.x\n", 3),
            ("NebulaSim frame 1\ngrid 2 1\n..\nOO\n", 4),
            ("NebulaSim frame 1\ngrid 1 4000000000\n", 3),
            ("NebulaSim frame 1\ngrid 1 4000000000\n.\n", 4),
        ];
        for (text, line) in cases {
            match Frame::parse(text) {
                Err(FrameError::Malformed { line: got, .. }) => {
                    assert_eq!(got, line, "{text:?}")
                }
                other => panic!("{text:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_accepts_trailing_blank_line() {
        let frame = Frame::parse("NebulaSim frame 2\ngrid 3 2\n.*O\n...\n\n").unwrap();
        assert_eq!(frame.step, 2);
        assert_eq!(frame.grid.get(1, 0), Some(Glyph::Faint));
        assert_eq!(frame.grid.get(2, 0), Some(Glyph::Bright));
    }
}
