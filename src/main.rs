use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use maze_runner::error::Result;
use maze_runner::input::{action_for, Action};
use maze_runner::render::Renderer;
use maze_runner::{GameSession, SessionEvent, Settings};

fn main() -> Result<()> {
    let settings = Settings::load()?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Each session draws its own generator from `seeds`, so a fixed `--seed`
/// reproduces the whole sequence of mazes across restarts.
fn new_session(
    settings: &Settings,
    seeds: &mut StdRng,
    events: &mut Vec<SessionEvent>,
) -> GameSession<StdRng> {
    let mut session = GameSession::new(settings.dims, StdRng::seed_from_u64(seeds.gen()));
    if settings.instant {
        session.finish_generation(events);
    }
    session
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<()> {
    let mut seeds = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (rows, cols) = (settings.dims.rows(), settings.dims.cols());
    let mut events = Vec::new();
    let mut session = new_session(settings, &mut seeds, &mut events);
    let mut renderer = Renderer::new(rows, cols);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        session.tick(frame_start.duration_since(last_frame));
        last_frame = frame_start;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match action_for(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Restart) => {
                        events.clear();
                        session = new_session(settings, &mut seeds, &mut events);
                        renderer = Renderer::new(rows, cols);
                    }
                    Some(Action::Skip) => session.finish_generation(&mut events),
                    Some(Action::Move(dir)) => {
                        session.apply_move(dir, &mut events);
                    }
                    None => {}
                },
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        session.advance_generation(&mut events);
        for event in events.drain(..) {
            renderer.log(&event);
        }
        renderer.render(stdout, &session.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
