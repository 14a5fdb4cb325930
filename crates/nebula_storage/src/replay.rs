use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::FrameError;
use crate::frame::frame_path;

/// What the viewer wants after a frame has been shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next,
    Stop,
}

/// Presentation side of a replay. The replay loop reads files; the viewer
/// shows them and decides when to move on.
pub trait ReplayViewer {
    /// Display the full text of the frame file for `step`
    fn show(&mut self, step: u32, contents: &str) -> io::Result<()>;

    /// Block until the user asks for the next frame (or to stop)
    fn advance(&mut self, step: u32) -> io::Result<Advance>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// `step0001` was missing
    NoFrames,
    /// Frames `1..=last_step` were shown
    Finished { last_step: u32 },
}

impl ReplayOutcome {
    pub fn frames_shown(&self) -> u32 {
        match self {
            Self::NoFrames => 0,
            Self::Finished { last_step } => *last_step,
        }
    }
}

/// Play back saved frames from `dir`, starting at step 1 and stopping at
/// the first step whose file cannot be read. Nothing is simulated; the files
/// are shown as they were written, with invalid UTF-8 replaced rather than
/// rejected.
pub fn replay(dir: &Path, viewer: &mut impl ReplayViewer) -> Result<ReplayOutcome, FrameError> {
    let mut last_shown = None;
    let mut step = 1u32;

    loop {
        let path = frame_path(dir, step);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => break,
            Err(e) => {
                warn!(step, path = %path.display(), error = %e, "frame unreadable, ending replay");
                break;
            }
        };
        let contents = String::from_utf8_lossy(&bytes);

        viewer.show(step, &contents).map_err(FrameError::Viewer)?;
        last_shown = Some(step);
        debug!(step, "frame shown");

        if viewer.advance(step).map_err(FrameError::Viewer)? == Advance::Stop {
            break;
        }
        step += 1;
    }

    let outcome = match last_shown {
        None => ReplayOutcome::NoFrames,
        Some(last_step) => ReplayOutcome::Finished { last_step },
    };
    info!(dir = %dir.display(), frames = outcome.frames_shown(), "replay finished");
    Ok(outcome)
}
