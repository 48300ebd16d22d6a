use crate::error::{Result, SnakeError};
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    SnakeBody,
    SnakeHead,
    Food,
}

/// Occupancy grid rebuilt from the game state on every frame.
#[derive(Debug, Clone)]
pub struct Board {
    row_size: i32,
    col_size: i32,
    matrix: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(row_size: i32, col_size: i32) -> Self {
        Board {
            row_size,
            col_size,
            matrix: vec![vec![Cell::Empty; col_size as usize]; row_size as usize],
        }
    }

    pub fn row_size(&self) -> i32 {
        self.row_size
    }

    pub fn col_size(&self) -> i32 {
        self.col_size
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !position.is_inside(self.row_size, self.col_size) {
            return None;
        }
        Some(self.matrix[position.x as usize][position.y as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.matrix.iter().map(Vec::as_slice)
    }

    /// Repaints the grid: everything empty, then the snake (head first), then the food.
    /// Fails without touching the grid if any cell lies outside the board.
    pub fn draw<'a>(
        &mut self,
        snake: impl IntoIterator<Item = &'a Position> + Clone,
        food: Option<Position>,
    ) -> Result<()> {
        if let Some(p) = snake
            .clone()
            .into_iter()
            .copied()
            .chain(food)
            .find(|p| !p.is_inside(self.row_size, self.col_size))
        {
            return Err(SnakeError::OutOfBoard(p));
        }

        for row in self.matrix.iter_mut() {
            row.fill(Cell::Empty);
        }
        for (i, p) in snake.into_iter().enumerate() {
            let cell = if i == 0 { Cell::SnakeHead } else { Cell::SnakeBody };
            self.matrix[p.x as usize][p.y as usize] = cell;
        }
        if let Some(p) = food {
            self.matrix[p.x as usize][p.y as usize] = Cell::Food;
        }
        Ok(())
    }
}
