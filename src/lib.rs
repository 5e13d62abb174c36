//! Perfect-maze generation and a terminal maze runner.
//!
//! [`grid`] holds the wall model, [`generator`] carves it with a randomized
//! depth-first backtracker, [`player`] walks the result and [`session`] ties
//! them together with the win condition and the run timer. The remaining
//! modules are the terminal front end.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod input;
pub mod player;
pub mod render;
pub mod session;

pub use config::{Dimensions, Settings};
pub use error::{AppError, ConfigError};
pub use generator::{MazeGenerator, Step};
pub use grid::{Cell, Dir, Grid, Pos};
pub use player::Player;
pub use session::{GameSession, Phase, SessionEvent, Snapshot, Stopwatch};
