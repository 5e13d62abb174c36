use crate::grid::{Dir, Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pos: Pos,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Steps into the neighbor facing `dir` when no wall is in the way.
    /// Blocked or out-of-bounds moves are ignored and return `false`.
    pub fn try_move(&mut self, grid: &Grid, dir: Dir) -> bool {
        if !grid.is_open(self.pos, dir) {
            return false;
        }
        match grid.neighbor(self.pos, dir) {
            Some(next) => {
                self.pos = next;
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, Dir::Up)
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, Dir::Right)
    }

    pub fn move_down(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, Dir::Down)
    }

    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, Dir::Left)
    }
}
