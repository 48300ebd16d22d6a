use std::fmt;
use std::io;

use crate::position::Position;

#[derive(Debug)]
pub enum SnakeError {
    /// A cell handed to the board lies outside its dimensions.
    OutOfBoard(Position),
    InvalidDimension { value: i32, min: i32, max: i32 },
    NotANumber(String),
    UnknownFlag(String),
    MissingValue(String),
    Io(io::Error),
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SnakeError::OutOfBoard(p) => {
                write!(f, "cell ({}, {}) is outside the board", p.x, p.y)
            }
            SnakeError::InvalidDimension { value, min, max } => {
                write!(f, "{value} is not between {min} and {max}")
            }
            SnakeError::NotANumber(raw) => write!(f, "'{raw}' is not a number"),
            SnakeError::UnknownFlag(flag) => write!(f, "unknown flag '{flag}'"),
            SnakeError::MissingValue(flag) => write!(f, "flag '{flag}' needs a value"),
            SnakeError::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SnakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnakeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SnakeError {
    fn from(err: io::Error) -> Self {
        SnakeError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, SnakeError>;
