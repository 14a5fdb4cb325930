use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use nebula_core::{Glyph, Grid};

/// How output is presented. Built once at startup and passed down by
/// reference; nothing about the terminal is kept in globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalContext {
    /// Color particles (bright yellow, faint cyan)
    pub color: bool,
    /// Clear the screen between frames
    pub clear_screen: bool,
}

impl TerminalContext {
    /// Color and clearing only when stdout is a terminal. `NO_COLOR` and
    /// `no_color` both turn color off.
    pub fn detect(no_color: bool) -> Self {
        let tty = io::stdout().is_terminal();
        Self {
            color: tty && !no_color && std::env::var_os("NO_COLOR").is_none(),
            clear_screen: tty,
        }
    }

    /// No escape sequences at all
    pub fn plain() -> Self {
        Self {
            color: false,
            clear_screen: false,
        }
    }
}

pub fn clear(ctx: &TerminalContext, out: &mut impl Write) -> io::Result<()> {
    if ctx.clear_screen {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Ok(())
}

pub fn write_glyph(ctx: &TerminalContext, out: &mut impl Write, glyph: Glyph) -> io::Result<()> {
    let c = glyph.as_char();
    if !ctx.color {
        return queue!(out, Print(c));
    }
    match glyph {
        Glyph::Bright => queue!(out, PrintStyledContent(c.yellow().bold())),
        Glyph::Faint => queue!(out, PrintStyledContent(c.cyan().bold())),
        Glyph::Empty => queue!(out, Print(c)),
    }
}

/// Grid with column and row indices, one space between cells
pub fn draw_grid(ctx: &TerminalContext, out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    write!(out, "   ")?;
    for c in 0..grid.width() {
        write!(out, "{c:2}")?;
    }
    writeln!(out)?;

    for (r, row) in grid.rows().enumerate() {
        write!(out, "{r:2} ")?;
        for &glyph in row {
            write!(out, " ")?;
            write_glyph(ctx, out, glyph)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Bare rows, exactly as stored in a frame file
pub fn draw_rows(ctx: &TerminalContext, out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    for row in grid.rows() {
        for &glyph in row {
            write_glyph(ctx, out, glyph)?;
        }
        writeln!(out)?;
    }
    out.flush()
}
