use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::grid::{Dir, Pos};
use crate::session::{Phase, SessionEvent, Snapshot};

pub const CELL_W: usize = 2;
/// Lines reserved for the HUD above the maze and the banner below it.
const HUD_LINES: usize = 2;
const BANNER_LINES: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player,
    Start,
    End,
    Head,
    Wall,
    Open,
    Unvisited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub glyph: Glyph,
    pub color: Color,
}

impl Tile {
    const fn new(glyph: Glyph, color: Color) -> Self {
        Self { glyph, color }
    }
}

/// Size of the tile lattice for a maze: one tile per cell plus one per wall
/// slot and corner.
pub fn lattice_size(rows: usize, cols: usize) -> (usize, usize) {
    (cols * 2 + 1, rows * 2 + 1)
}

/// Resolves the tile drawn at lattice coordinate (`x`, `y`).
pub fn tile_for(snap: &Snapshot<'_>, x: usize, y: usize) -> Tile {
    let wall = Tile::new(Glyph::Wall, Color::Blue);
    let (width, height) = lattice_size(snap.grid.rows(), snap.grid.cols());
    if x >= width || y >= height {
        return wall;
    }
    match (y % 2 == 1, x % 2 == 1) {
        (true, true) => cell_tile(snap, Pos::new(y / 2, x / 2)),
        (true, false) => {
            if x == 0 || x == width - 1 {
                return wall;
            }
            passage_tile(snap, Pos::new(y / 2, x / 2 - 1), Dir::Right)
        }
        (false, true) => {
            if y == 0 || y == height - 1 {
                return wall;
            }
            passage_tile(snap, Pos::new(y / 2 - 1, x / 2), Dir::Down)
        }
        (false, false) => wall,
    }
}

fn cell_tile(snap: &Snapshot<'_>, pos: Pos) -> Tile {
    if snap.phase != Phase::Generating && pos == snap.player {
        return Tile::new(Glyph::Player, Color::Yellow);
    }
    if snap.head == Some(pos) {
        return Tile::new(Glyph::Head, Color::Magenta);
    }
    if pos == snap.start {
        return Tile::new(Glyph::Start, Color::Green);
    }
    if pos == snap.end {
        return Tile::new(Glyph::End, Color::Red);
    }
    match snap.grid.cell_at(pos) {
        Some(cell) if cell.is_visited() => Tile::new(Glyph::Open, Color::Reset),
        _ => Tile::new(Glyph::Unvisited, Color::DarkGrey),
    }
}

fn passage_tile(snap: &Snapshot<'_>, pos: Pos, dir: Dir) -> Tile {
    if snap.grid.is_open(pos, dir) {
        Tile::new(Glyph::Open, Color::Reset)
    } else {
        Tile::new(Glyph::Wall, Color::Blue)
    }
}

pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One-line description of a session event for the status log.
pub fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::GenerationFinished { passages } => {
            format!("Maze carved with {passages} passages. Go!")
        }
        SessionEvent::PlayerMoved { to, .. } => format!("At row {}, col {}", to.row, to.col),
        SessionEvent::Won { elapsed_seconds } => {
            format!("Exit reached in {}", format_clock(*elapsed_seconds))
        }
    }
}

fn to_coord(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub fn fit_line(text: &str, width: u16) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += UnicodeWidthChar::width(*c).unwrap_or(0);
            used <= usize::from(width)
        })
        .collect()
}

pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Tile>,
    last_hud: String,
    last_banner: String,
    status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(rows: usize, cols: usize) -> Self {
        let (width, height) = lattice_size(rows, cols);
        Self {
            width,
            height,
            last: vec![Tile::new(Glyph::Open, Color::Reset); width * height],
            last_hud: String::new(),
            last_banner: String::new(),
            status: String::from("Carving..."),
            needs_full: true,
            origin_x: 0,
            origin_y: HUD_LINES as u16,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn log(&mut self, event: &SessionEvent) {
        self.status = describe(event);
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    fn hud(&self, snap: &Snapshot<'_>) -> String {
        let total = snap.grid.len();
        let phase = match snap.phase {
            Phase::Generating => "Carving",
            Phase::Playing => "Playing",
            Phase::Won => "Solved",
        };
        format!(
            "{}x{}  Visited: {}/{}  Time: {}  [{}]  {}",
            snap.grid.rows(),
            snap.grid.cols(),
            snap.visited,
            total,
            format_clock(snap.elapsed_seconds),
            phase,
            self.status
        )
    }

    fn banner(snap: &Snapshot<'_>) -> String {
        match snap.phase {
            Phase::Generating => String::from("space: skip animation  r: restart  q: quit"),
            Phase::Playing => String::from("arrows/hjkl/wasd: move  r: restart  q: quit"),
            Phase::Won => format!(
                "SOLVED in {} - r to restart, q to quit",
                format_clock(snap.elapsed_seconds)
            ),
        }
    }

    /// Top-left corner of the maze when it fits in a `term_w` x `term_h`
    /// terminal, `None` otherwise.
    pub fn layout(&self, term_w: u16, term_h: u16) -> Option<(u16, u16)> {
        let needed_w = u16::try_from(self.width * CELL_W).ok()?;
        let needed_h = u16::try_from(self.height + HUD_LINES + BANNER_LINES).ok()?;
        if term_w < needed_w || term_h < needed_h {
            return None;
        }
        Some(((term_w - needed_w) / 2, (term_h - needed_h) / 2 + HUD_LINES as u16))
    }

    pub fn render<W: Write>(&mut self, out: &mut W, snap: &Snapshot<'_>) -> std::io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let Some((origin_x, origin_y)) = self.layout(term_w, term_h) else {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                self.width * CELL_W,
                self.height + HUD_LINES + BANNER_LINES,
                term_w,
                term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        };

        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        // The HUD is wider than small mazes; it starts at column 0 and is
        // clipped so it never wraps onto the spacer line.
        let hud = fit_line(&self.hud(snap), term_w);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(0, self.origin_y - HUD_LINES as u16))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let tile = tile_for(snap, x, y);
                let idx = y * self.width + x;
                if self.needs_full || tile != self.last[idx] {
                    self.last[idx] = tile;
                    self.draw_tile(out, x, y, tile)?;
                }
            }
        }

        let banner = fit_line(&Self::banner(snap), term_w);
        if self.needs_full || banner != self.last_banner {
            let color = if snap.phase == Phase::Won {
                Color::Green
            } else {
                Color::Grey
            };
            out.queue(MoveTo(0, self.origin_y.saturating_add(to_coord(self.height))))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(&banner))?;
            out.queue(ResetColor)?;
            self.last_banner = banner;
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_tile<W: Write>(&self, out: &mut W, x: usize, y: usize, tile: Tile) -> std::io::Result<()> {
        let text = match tile.glyph {
            Glyph::Player => "@@",
            Glyph::Start => "░░",
            Glyph::End => "▓▓",
            Glyph::Head => "◆ ",
            Glyph::Wall => "██",
            Glyph::Open => "  ",
            Glyph::Unvisited => "··",
        };
        let x_pos = self.origin_x.saturating_add(to_coord(x * CELL_W));
        let y_pos = self.origin_y.saturating_add(to_coord(y));
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(tile.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::Dimensions;
    use crate::session::GameSession;

    #[test]
    fn lattice_frames_the_maze_with_walls() {
        let mut session = GameSession::new(Dimensions::new(3, 4).unwrap(), StdRng::seed_from_u64(5));
        session.finish_generation(&mut Vec::new());
        let snap = session.snapshot();
        let (width, height) = lattice_size(3, 4);
        assert_eq!((width, height), (9, 7));
        for x in 0..width {
            assert_eq!(tile_for(&snap, x, 0).glyph, Glyph::Wall);
            assert_eq!(tile_for(&snap, x, height - 1).glyph, Glyph::Wall);
        }
        for y in 0..height {
            assert_eq!(tile_for(&snap, 0, y).glyph, Glyph::Wall);
            assert_eq!(tile_for(&snap, width - 1, y).glyph, Glyph::Wall);
        }
    }

    #[test]
    fn passage_tiles_mirror_wall_flags() {
        let mut session = GameSession::new(Dimensions::new(4, 4).unwrap(), StdRng::seed_from_u64(8));
        session.finish_generation(&mut Vec::new());
        let snap = session.snapshot();
        let grid = snap.grid;
        for row in 0..4 {
            for col in 0..3 {
                let open = grid.is_open(Pos::new(row, col), Dir::Right);
                let tile = tile_for(&snap, col * 2 + 2, row * 2 + 1);
                assert_eq!(tile.glyph == Glyph::Open, open);
            }
        }
    }

    #[test]
    fn player_hidden_while_carving() {
        let session = GameSession::new(Dimensions::new(2, 2).unwrap(), StdRng::seed_from_u64(1));
        let snap = session.snapshot();
        assert_eq!(tile_for(&snap, 1, 1).glyph, Glyph::Head);
        assert_eq!(tile_for(&snap, 3, 3).glyph, Glyph::End);
        assert_eq!(tile_for(&snap, 3, 1).glyph, Glyph::Unvisited);
    }

    #[test]
    fn oversize_maze_never_fits_a_terminal() {
        let renderer = Renderer::new(2, 32_768);
        assert_eq!(renderer.layout(200, 50), None);
        assert_eq!(renderer.layout(u16::MAX, u16::MAX), None);
    }

    #[test]
    fn layout_centres_the_maze_below_the_hud() {
        // 2x3 maze: 7x5 tiles, 14 columns, 5 + 3 lines.
        let renderer = Renderer::new(2, 3);
        assert_eq!(renderer.layout(13, 40), None);
        assert_eq!(renderer.layout(14, 7), None);
        assert_eq!(renderer.layout(20, 10), Some((3, 3)));
    }

    #[test]
    fn long_lines_are_clipped_to_the_terminal() {
        assert_eq!(fit_line("Visited: 3/100", 7), "Visited");
        assert_eq!(fit_line("short", 80), "short");
        assert_eq!(fit_line("··ab", 3), "··a");
        assert_eq!(fit_line("anything", 0), "");
    }

    #[test]
    fn clock_and_status_text() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(75), "1:15");
        let mut renderer = Renderer::new(2, 2);
        renderer.log(&SessionEvent::Won { elapsed_seconds: 61 });
        assert_eq!(renderer.status(), "Exit reached in 1:01");
    }
}
