use std::fs;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use nebula_core::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_PARTICLES, EXAMPLE_STEPS, GRID_HEIGHT_RANGE,
    GRID_WIDTH_RANGE, PARTICLE_RANGE, STEPS_RANGE, SimConfig,
};
use nebula_sim::Nebula;
use nebula_storage::{ReplayOutcome, save_frame};
use tracing::{info, warn};

use crate::hud;
use crate::terminal::{self, TerminalContext};
use crate::viewer::TerminalViewer;

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Interactive,
    Batch,
    Replay,
    Example,
    Exit,
}

impl MenuChoice {
    pub fn from_input(line: &str) -> Option<Self> {
        match line.trim().parse::<u32>().ok()? {
            1 => Some(Self::Interactive),
            2 => Some(Self::Batch),
            3 => Some(Self::Replay),
            4 => Some(Self::Example),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether a run asks for its parameters first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompting {
    Ask,
    UseConfig,
}

/// A user session: input, output, presentation and the parameters chosen so
/// far. Parameters accepted in one run carry over to the next.
pub struct Session<R, W> {
    input: R,
    out: W,
    ctx: TerminalContext,
    config: SimConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, ctx: TerminalContext, config: SimConfig) -> Self {
        Self {
            input,
            out,
            ctx,
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Main menu loop. Returns when the user picks Exit or input ends.
    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            terminal::clear(&self.ctx, &mut self.out)?;
            self.print_banner()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let Some(choice) = MenuChoice::from_input(&line) else {
                continue;
            };
            info!(?choice, "menu");
            match choice {
                MenuChoice::Interactive => self.run_interactive(Prompting::Ask)?,
                MenuChoice::Batch => self.run_batch(Prompting::Ask)?,
                MenuChoice::Replay => {
                    writeln!(
                        self.out,
                        "Replay saved frames from {}/ (press Enter to advance frames)",
                        self.config.frames_dir.display()
                    )?;
                    self.wait_enter()?;
                    self.run_replay()?;
                    self.wait_enter()?;
                }
                MenuChoice::Example => self.run_example()?,
                MenuChoice::Exit => break,
            }
        }
        writeln!(self.out, "Exiting NebulaSim. Goodbye!")?;
        Ok(())
    }

    /// Step by step on Enter; `s` saves the current frame, `q` returns.
    pub fn run_interactive(&mut self, prompting: Prompting) -> Result<()> {
        if prompting == Prompting::Ask {
            self.prompt_grid()?;
        }
        let mut nebula = Nebula::new(&self.config);

        loop {
            terminal::clear(&self.ctx, &mut self.out)?;
            writeln!(self.out, "{}", hud::status_line(&nebula))?;
            let grid = nebula.render()?;
            terminal::draw_grid(&self.ctx, &mut self.out, &grid)?;
            writeln!(
                self.out,
                "\nOptions: (Enter) next step | s Save frame | q Quit to menu"
            )?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let cmd = line.trim_start();
            if cmd.starts_with(['q', 'Q']) {
                break;
            }
            if cmd.starts_with(['s', 'S']) {
                let step = nebula.step();
                match self.save(&nebula) {
                    Ok(()) => writeln!(self.out, "Saved frame {step}")?,
                    Err(e) => {
                        warn!(step, error = %e, "save failed");
                        writeln!(self.out, "Failed to save frame {step}")?;
                    }
                }
                self.wait_enter()?;
            } else {
                nebula.tick();
            }
        }
        info!(
            steps = nebula.step(),
            alive = nebula.alive_count(),
            "interactive run ended"
        );
        Ok(())
    }

    /// Save `steps` consecutive frames without pausing, drawing each one
    pub fn run_batch(&mut self, prompting: Prompting) -> Result<()> {
        if prompting == Prompting::Ask {
            self.prompt_grid()?;
            self.config.steps = self.prompt_value(
                "Number of steps to save",
                self.config.steps,
                STEPS_RANGE,
            )?;
        }
        let dir = self.config.frames_dir.clone();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating frames directory {}", dir.display()))?;

        let steps = self.config.steps;
        let mut nebula = Nebula::new(&self.config);
        let mut failed = 0u32;
        for s in 1..=steps {
            terminal::clear(&self.ctx, &mut self.out)?;
            writeln!(self.out, "{}", hud::status_line(&nebula))?;
            let grid = nebula.render()?;
            terminal::draw_grid(&self.ctx, &mut self.out, &grid)?;
            writeln!(self.out, "Running step {s} / {steps}")?;
            self.out.flush()?;
            if let Err(e) = save_frame(&dir, nebula.store(), s) {
                warn!(step = s, error = %e, "save failed");
                failed += 1;
            }
            nebula.tick();
        }
        info!(steps, failed, alive = nebula.alive_count(), "batch finished");

        writeln!(
            self.out,
            "Batch save complete. Files saved to {}/stepXXXX.txt",
            dir.display()
        )?;
        if failed > 0 {
            writeln!(self.out, "{failed} of {steps} frames could not be saved.")?;
        }
        if prompting == Prompting::Ask {
            self.wait_enter()?;
        }
        Ok(())
    }

    /// Play back saved frames and report how far it got
    pub fn run_replay(&mut self) -> Result<ReplayOutcome> {
        let dir = self.config.frames_dir.clone();
        let mut viewer = TerminalViewer {
            input: &mut self.input,
            out: &mut self.out,
            ctx: &self.ctx,
        };
        let outcome = nebula_storage::replay(&dir, &mut viewer)?;
        match outcome {
            ReplayOutcome::NoFrames => {
                writeln!(self.out, "No frames found in {}/ (no step files).", dir.display())?
            }
            ReplayOutcome::Finished { last_step } => writeln!(
                self.out,
                "End of saved frames (last was step {last_step})."
            )?,
        }
        Ok(outcome)
    }

    /// Short fixed run with the default parameters
    pub fn run_example(&mut self) -> Result<()> {
        self.config.grid_width = DEFAULT_GRID_WIDTH;
        self.config.grid_height = DEFAULT_GRID_HEIGHT;
        self.config.particle_count = DEFAULT_PARTICLES;
        let mut nebula = Nebula::new(&self.config);

        for s in 1..=EXAMPLE_STEPS {
            terminal::clear(&self.ctx, &mut self.out)?;
            writeln!(self.out, "Example run - Step {s} / {EXAMPLE_STEPS}")?;
            let grid = nebula.render()?;
            terminal::draw_grid(&self.ctx, &mut self.out, &grid)?;
            nebula.tick();
            writeln!(self.out, "\nPress Enter for next step...")?;
            self.out.flush()?;
            if self.read_line()?.is_none() {
                return Ok(());
            }
        }
        self.wait_enter()
    }

    fn save(&self, nebula: &Nebula) -> Result<()> {
        let dir = &self.config.frames_dir;
        fs::create_dir_all(dir)
            .with_context(|| format!("creating frames directory {}", dir.display()))?;
        save_frame(dir, nebula.store(), nebula.step())?;
        Ok(())
    }

    fn print_banner(&mut self) -> Result<()> {
        writeln!(self.out, "=========================================")?;
        writeln!(self.out, "                NebulaSim                ")?;
        writeln!(self.out, "        Interactive Space Simulation     ")?;
        writeln!(self.out, "=========================================")?;
        writeln!(self.out, "1. Start new simulation (interactive)")?;
        writeln!(self.out, "2. Start new simulation (batch save frames)")?;
        writeln!(self.out, "3. Replay saved simulation frames")?;
        writeln!(self.out, "4. Example run with defaults")?;
        writeln!(self.out, "5. Exit")?;
        writeln!(self.out, "-----------------------------------------")?;
        write!(self.out, "Enter choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn prompt_grid(&mut self) -> Result<()> {
        self.config.grid_width =
            self.prompt_value("Grid width", self.config.grid_width, GRID_WIDTH_RANGE)?;
        self.config.grid_height =
            self.prompt_value("Grid height", self.config.grid_height, GRID_HEIGHT_RANGE)?;
        self.config.particle_count = self.prompt_value(
            "Number of particles",
            self.config.particle_count,
            PARTICLE_RANGE,
        )?;
        Ok(())
    }

    /// Ask for a number; blank, unparsable or out-of-range input keeps
    /// `current`.
    fn prompt_value(
        &mut self,
        label: &str,
        current: u32,
        range: RangeInclusive<u32>,
    ) -> Result<u32> {
        write!(self.out, "{label} (default {current}): ")?;
        self.out.flush()?;
        let value = self
            .read_line()?
            .and_then(|line| line.trim().parse::<u32>().ok())
            .filter(|v| range.contains(v))
            .unwrap_or(current);
        Ok(value)
    }

    fn wait_enter(&mut self) -> Result<()> {
        write!(self.out, "Press Enter to continue...")?;
        self.out.flush()?;
        self.read_line()?;
        Ok(())
    }

    /// Next line without its terminator, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
