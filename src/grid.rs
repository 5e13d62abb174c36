use std::collections::VecDeque;

use crate::config::Dimensions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Logical movement direction. Discriminants index into [`Cell::walls`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn wall_index(self) -> usize {
        self as usize
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`.
    pub fn between(from: Pos, to: Pos) -> Option<Dir> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        match (dr, dc) {
            (-1, 0) => Some(Dir::Up),
            (0, 1) => Some(Dir::Right),
            (1, 0) => Some(Dir::Down),
            (0, -1) => Some(Dir::Left),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_wall(&self, dir: Dir) -> bool {
        self.walls[dir.wall_index()]
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

/// Rectangular cell lattice, stored row-major. Dimensions never change after
/// construction.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(dims: Dimensions) -> Self {
        let (rows, cols) = (dims.rows(), dims.cols());
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    pub fn cell_at(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        if !self.contains(pos) {
            return None;
        }
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Pos::new(row, col);
        self.contains(next).then_some(next)
    }

    /// In-bounds neighbors in top, right, bottom, left order.
    pub fn neighbors_of(&self, pos: Pos) -> Vec<(Dir, Pos)> {
        Dir::ALL
            .iter()
            .filter_map(|&dir| self.neighbor(pos, dir).map(|next| (dir, next)))
            .collect()
    }

    pub fn is_open(&self, pos: Pos, dir: Dir) -> bool {
        self.cell_at(pos).is_some_and(|cell| !cell.has_wall(dir))
            && self.neighbor(pos, dir).is_some()
    }

    pub(crate) fn mark_visited(&mut self, pos: Pos) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx].visited = true;
        }
    }

    /// Removes the wall pair shared by two adjacent cells. Returns `false`
    /// and leaves the grid untouched when the cells are not adjacent.
    pub(crate) fn carve_between(&mut self, a: Pos, b: Pos) -> bool {
        let Some(dir) = Dir::between(a, b) else {
            return false;
        };
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        self.cells[ia].walls[dir.wall_index()] = false;
        self.cells[ib].walls[dir.opposite().wall_index()] = false;
        true
    }

    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Dir::Right, Dir::Down]
                    .iter()
                    .filter(|&&dir| self.is_open(cell.pos(), dir))
                    .count()
            })
            .sum()
    }

    pub fn walls_symmetric(&self) -> bool {
        self.cells.iter().all(|cell| {
            self.neighbors_of(cell.pos()).into_iter().all(|(dir, next)| {
                self.cell_at(next)
                    .is_some_and(|other| other.has_wall(dir.opposite()) == cell.has_wall(dir))
            })
        })
    }

    /// Breadth-first distances over open passages; `None` for unreachable
    /// cells.
    pub fn distances_from(&self, start: Pos) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.cells.len()];
        let Some(start_idx) = self.index(start) else {
            return dist;
        };
        let mut q = VecDeque::new();
        dist[start_idx] = Some(0);
        q.push_back(start);

        while let Some(pos) = q.pop_front() {
            let base = self.index(pos).and_then(|idx| dist[idx]).unwrap_or(0);
            for dir in Dir::ALL {
                if !self.is_open(pos, dir) {
                    continue;
                }
                let Some(next) = self.neighbor(pos, dir) else {
                    continue;
                };
                let Some(idx) = self.index(next) else {
                    continue;
                };
                if dist[idx].is_none() {
                    dist[idx] = Some(base + 1);
                    q.push_back(next);
                }
            }
        }
        dist
    }

    pub fn is_reachable(&self, from: Pos, to: Pos) -> bool {
        self.index(to)
            .is_some_and(|idx| self.distances_from(from)[idx].is_some())
    }

    pub fn is_fully_connected(&self) -> bool {
        self.distances_from(Pos::new(0, 0))
            .iter()
            .all(Option::is_some)
    }
}
