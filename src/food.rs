use rand::seq::IndexedRandom;
use rand::Rng;

use crate::position::Position;
use crate::random::rand_range;

#[derive(Debug, Clone, Default)]
pub struct Food {
    position: Option<Position>,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Food {
            position: Some(position),
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Places the food on a random cell the snake does not occupy.
    /// Returns `false`, leaving no food on the board, when every cell is taken.
    pub fn spawn<'a, R, I>(&mut self, row_size: i32, col_size: i32, snake: I, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Position>,
        I::IntoIter: Clone,
    {
        let snake = snake.into_iter();
        let board_size = (row_size * col_size) as usize;
        let snake_length = snake.clone().count();

        // past 80% occupancy sampling blind wastes too many draws, pick from the free cells instead
        self.position = if snake_length * 5 > board_size * 4 {
            let free: Vec<Position> = (0..row_size)
                .flat_map(|x| (0..col_size).map(move |y| Position::new(x, y)))
                .filter(|cell| !snake.clone().any(|p| p == cell))
                .collect();
            free.choose(rng).copied()
        } else {
            loop {
                let candidate = Position::new(
                    rand_range(rng, 0, row_size - 1),
                    rand_range(rng, 0, col_size - 1),
                );
                if !snake.clone().any(|p| *p == candidate) {
                    break Some(candidate);
                }
            }
        };
        self.position.is_some()
    }
}
