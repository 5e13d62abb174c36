//! One play-through: a freshly carved grid, the player walking it and the
//! stopwatch timing the run.
//!
//! A session is never reset in place. Restarting means dropping the value and
//! building a new one, which discards the grid, any in-flight generator stack
//! and the stopwatch together.

use std::time::Duration;

use rand::Rng;

use crate::config::Dimensions;
use crate::generator::{MazeGenerator, Step};
use crate::grid::{Dir, Grid, Pos};
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Playing,
    Won,
}

/// State changes reported to whoever draws overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    GenerationFinished { passages: usize },
    PlayerMoved { from: Pos, to: Pos },
    Won { elapsed_seconds: u64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: Duration,
    running: bool,
}

impl Stopwatch {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.elapsed += dt;
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Read-only view handed to the renderer once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub start: Pos,
    pub end: Pos,
    pub player: Pos,
    pub phase: Phase,
    pub head: Option<Pos>,
    pub visited: usize,
    pub elapsed_seconds: u64,
}

pub struct GameSession<R> {
    grid: Grid,
    generator: Option<MazeGenerator>,
    visited: usize,
    player: Player,
    start: Pos,
    end: Pos,
    phase: Phase,
    stopwatch: Stopwatch,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Builds an all-walled grid with the start at the top-left corner and
    /// the exit at the bottom-right, ready to be carved.
    pub fn new(dims: Dimensions, rng: R) -> Self {
        let mut grid = Grid::new(dims);
        let start = Pos::new(0, 0);
        let end = Pos::new(dims.rows() - 1, dims.cols() - 1);
        let generator = MazeGenerator::new(&mut grid, start);
        Self {
            visited: generator.visited_count(),
            generator: Some(generator),
            player: Player::new(start),
            grid,
            start,
            end,
            phase: Phase::Generating,
            stopwatch: Stopwatch::default(),
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn player(&self) -> Pos {
        self.player.pos()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Won
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.stopwatch.elapsed_seconds()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stack_len(&self) -> usize {
        self.generator.as_ref().map_or(0, |g| g.stack().len())
    }

    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Performs one generator stack operation. Returns `None` outside the
    /// generating phase.
    pub fn advance_generation(&mut self, out: &mut Vec<SessionEvent>) -> Option<Step> {
        let generator = self.generator.as_mut()?;
        let step = generator.step(&mut self.grid, &mut self.rng);
        self.visited = generator.visited_count();
        if generator.is_finished() {
            self.enter_playing(out);
        }
        Some(step)
    }

    /// Carves whatever is left in one go.
    pub fn finish_generation(&mut self, out: &mut Vec<SessionEvent>) {
        if let Some(generator) = self.generator.as_mut() {
            generator.run(&mut self.grid, &mut self.rng);
            self.visited = generator.visited_count();
            self.enter_playing(out);
        }
    }

    fn enter_playing(&mut self, out: &mut Vec<SessionEvent>) {
        self.generator = None;
        self.phase = Phase::Playing;
        self.stopwatch.start();
        out.push(SessionEvent::GenerationFinished {
            passages: self.grid.passage_count(),
        });
        // A 1x1 maze starts on its own exit.
        if self.player.pos() == self.end {
            self.declare_win(out);
        }
    }

    fn declare_win(&mut self, out: &mut Vec<SessionEvent>) {
        self.stopwatch.stop();
        self.phase = Phase::Won;
        out.push(SessionEvent::Won {
            elapsed_seconds: self.stopwatch.elapsed_seconds(),
        });
    }

    /// Attempts a move and checks for the win right away. Ignored unless the
    /// session is in the playing phase.
    pub fn apply_move(&mut self, dir: Dir, out: &mut Vec<SessionEvent>) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let from = self.player.pos();
        if !self.player.try_move(&self.grid, dir) {
            return false;
        }
        let to = self.player.pos();
        out.push(SessionEvent::PlayerMoved { from, to });

        if to == self.end {
            self.declare_win(out);
        }
        true
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.phase == Phase::Playing {
            self.stopwatch.advance(dt);
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            start: self.start,
            end: self.end,
            player: self.player.pos(),
            phase: self.phase,
            head: self.generator.as_ref().and_then(MazeGenerator::current),
            visited: self.visited,
            elapsed_seconds: self.stopwatch.elapsed_seconds(),
        }
    }
}
