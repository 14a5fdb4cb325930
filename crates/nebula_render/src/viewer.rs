use std::io::{self, BufRead, Write};

use nebula_storage::{Advance, Frame, ReplayViewer};

use crate::terminal::{self, TerminalContext};

/// Shows replayed frames on the terminal and waits for Enter between them.
/// `q` or end of input stops the replay.
pub struct TerminalViewer<'a, R, W> {
    pub input: &'a mut R,
    pub out: &'a mut W,
    pub ctx: &'a TerminalContext,
}

impl<R: BufRead, W: Write> ReplayViewer for TerminalViewer<'_, R, W> {
    fn show(&mut self, step: u32, contents: &str) -> io::Result<()> {
        terminal::clear(self.ctx, self.out)?;
        match Frame::parse(contents) {
            Ok(frame) => {
                // Headers as stored, grid re-drawn so it can be colored
                for line in contents.lines().take(2) {
                    writeln!(self.out, "{line}")?;
                }
                terminal::draw_rows(self.ctx, self.out, &frame.grid)?;
            }
            Err(e) => {
                tracing::warn!(step, error = %e, "frame not parseable, showing raw text");
                write!(self.out, "{contents}")?;
            }
        }
        writeln!(
            self.out,
            "\n--- Frame {step} --- Press Enter for next (q to stop) ---"
        )?;
        self.out.flush()
    }

    fn advance(&mut self, _step: u32) -> io::Result<Advance> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Advance::Stop);
        }
        if line.trim().eq_ignore_ascii_case("q") {
            Ok(Advance::Stop)
        } else {
            Ok(Advance::Next)
        }
    }
}
