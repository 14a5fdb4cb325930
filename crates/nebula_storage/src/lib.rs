pub mod frame;
pub mod replay;

use std::io;
use std::path::PathBuf;

use nebula_core::GridError;
use thiserror::Error;

pub use frame::{FRAME_EXTENSION, FRAME_PREFIX, Frame, frame_path, save_frame};
pub use replay::{Advance, ReplayOutcome, ReplayViewer, replay};

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("malformed frame, line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("replay viewer failed: {0}")]
    Viewer(#[source] io::Error),
}
