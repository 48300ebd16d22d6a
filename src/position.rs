use std::ops::Add;

/// A cell on the board. `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const UP: Position = Position::new(-1, 0);
    pub const DOWN: Position = Position::new(1, 0);
    pub const LEFT: Position = Position::new(0, -1);
    pub const RIGHT: Position = Position::new(0, 1);

    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub fn is_inside(&self, row_size: i32, col_size: i32) -> bool {
        self.x >= 0 && self.x < row_size && self.y >= 0 && self.y < col_size
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector the head moves by each tick.
    pub fn delta(self) -> Position {
        match self {
            Direction::Up => Position::UP,
            Direction::Down => Position::DOWN,
            Direction::Left => Position::LEFT,
            Direction::Right => Position::RIGHT,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
