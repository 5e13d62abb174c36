//! Recursive-backtracker maze carving.
//!
//! The generator keeps the current backtracking path as an explicit stack of
//! grid positions. Each [`MazeGenerator::step`] performs exactly one push or
//! one pop, so a frame loop can animate the carving; [`MazeGenerator::run`]
//! drains the stack in one call.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Pos};

/// Outcome of a single generator step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A wall pair was removed and `to` became the new stack head.
    Carved { from: Pos, to: Pos },
    /// The stack head had no unvisited neighbor and was popped.
    Backtracked(Pos),
    /// The stack is empty; every cell has been visited.
    Finished,
}

#[derive(Clone, Debug)]
pub struct MazeGenerator {
    stack: Vec<Pos>,
    visited: usize,
}

impl MazeGenerator {
    pub fn new(grid: &mut Grid, start: Pos) -> Self {
        let mut stack = Vec::with_capacity(grid.len());
        let mut visited = 0;
        if grid.contains(start) {
            grid.mark_visited(start);
            stack.push(start);
            visited = 1;
        }
        Self { stack, visited }
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn current(&self) -> Option<Pos> {
        self.stack.last().copied()
    }

    pub fn stack(&self) -> &[Pos] {
        &self.stack
    }

    pub fn visited_count(&self) -> usize {
        self.visited
    }

    pub fn step(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> Step {
        let Some(current) = self.current() else {
            return Step::Finished;
        };

        let unvisited: Vec<Pos> = grid
            .neighbors_of(current)
            .into_iter()
            .map(|(_, pos)| pos)
            .filter(|&pos| grid.cell_at(pos).is_some_and(|cell| !cell.is_visited()))
            .collect();

        match unvisited.choose(rng) {
            Some(&next) => {
                grid.mark_visited(next);
                grid.carve_between(current, next);
                self.stack.push(next);
                self.visited += 1;
                Step::Carved {
                    from: current,
                    to: next,
                }
            }
            None => {
                self.stack.pop();
                Step::Backtracked(current)
            }
        }
    }

    /// Drives [`step`](Self::step) until the stack empties. Returns the
    /// number of stack operations performed.
    pub fn run(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> usize {
        let mut ops = 0;
        while self.step(grid, rng) != Step::Finished {
            ops += 1;
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::Dimensions;

    #[test]
    fn single_cell_finishes_after_one_pop() {
        let mut grid = Grid::new(Dimensions::new(1, 1).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let mut generator = MazeGenerator::new(&mut grid, Pos::new(0, 0));
        assert_eq!(
            generator.step(&mut grid, &mut rng),
            Step::Backtracked(Pos::new(0, 0))
        );
        assert_eq!(generator.step(&mut grid, &mut rng), Step::Finished);
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(generator.visited_count(), 1);
    }

    #[test]
    fn every_push_is_visited() {
        let mut grid = Grid::new(Dimensions::new(6, 4).unwrap());
        let mut rng = StdRng::seed_from_u64(9);
        let mut generator = MazeGenerator::new(&mut grid, Pos::new(0, 0));
        while !generator.is_finished() {
            generator.step(&mut grid, &mut rng);
            for &pos in generator.stack() {
                assert!(grid.cell_at(pos).unwrap().is_visited());
            }
        }
    }

    #[test]
    fn run_performs_one_push_and_one_pop_per_cell() {
        let mut grid = Grid::new(Dimensions::new(7, 3).unwrap());
        let mut rng = StdRng::seed_from_u64(3);
        let mut generator = MazeGenerator::new(&mut grid, Pos::new(0, 0));
        // 20 pushes after the seed plus 21 pops.
        assert_eq!(generator.run(&mut grid, &mut rng), 41);
        assert!(generator.is_finished());
    }

    #[test]
    fn same_seed_carves_same_maze() {
        let dims = Dimensions::new(8, 8).unwrap();
        let carve = |seed| {
            let mut grid = Grid::new(dims);
            let mut rng = StdRng::seed_from_u64(seed);
            MazeGenerator::new(&mut grid, Pos::new(0, 0)).run(&mut grid, &mut rng);
            grid.cells().to_vec()
        };
        assert_eq!(carve(42), carve(42));
    }
}
