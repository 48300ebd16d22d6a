// The snake moves head first: a new head is pushed at the front every tick and
// the tail is popped unless the new head landed on the food.
use std::collections::VecDeque;

use rand::Rng;

use crate::position::{Direction, Position};
use crate::random::rand_range;

/// Cells kept free between a freshly spawned snake and every wall.
const SPAWN_MARGIN: i32 = 2;

#[derive(Debug, Clone, Default)]
pub struct Snake {
    positions: VecDeque<Position>, // The head is the first element
    direction: Direction,
}

impl Snake {
    /// Builds a snake from explicit cells, head first.
    pub fn with_positions(positions: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        Snake {
            positions: positions.into_iter().collect(),
            direction,
        }
    }

    /// Replaces the snake with a single cell placed away from the walls, heading up.
    pub fn spawn<R: Rng + ?Sized>(&mut self, row_size: i32, col_size: i32, rng: &mut R) {
        let x = rand_range(rng, SPAWN_MARGIN, row_size - 1 - SPAWN_MARGIN);
        let y = rand_range(rng, SPAWN_MARGIN, col_size - 1 - SPAWN_MARGIN);
        self.positions.clear();
        self.positions.push_back(Position::new(x, y));
        self.direction = Direction::Up;
    }

    pub fn positions(&self) -> &VecDeque<Position> {
        &self.positions
    }

    pub fn head(&self) -> Option<Position> {
        self.positions.front().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes heading unless `direction` would reverse the snake onto itself.
    /// Returns whether the change was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advances one cell. Grows by one when the new head lands on `food`.
    pub fn advance(&mut self, food: Option<Position>) {
        let Some(head) = self.head() else {
            return;
        };
        self.positions.push_front(head + self.direction.delta());
        if !self.has_eaten(food) {
            self.positions.pop_back();
        }
    }

    pub fn has_eaten(&self, food: Option<Position>) -> bool {
        match (self.head(), food) {
            (Some(head), Some(food)) => head == food,
            _ => false,
        }
    }

    pub fn is_dead(&self, row_size: i32, col_size: i32) -> bool {
        self.is_out_of_bounds(row_size, col_size) || self.has_bitten_itself()
    }

    fn is_out_of_bounds(&self, row_size: i32, col_size: i32) -> bool {
        match self.head() {
            Some(head) => !head.is_inside(row_size, col_size),
            None => false,
        }
    }

    fn has_bitten_itself(&self) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        self.positions.iter().skip(1).any(|p| *p == head)
    }
}
