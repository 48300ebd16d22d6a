//! Board size and command line options.
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::{Result, SnakeError};

pub const MIN_BOARD_SIZE: i32 = 8;
pub const MAX_BOARD_SIZE: i32 = 12;
pub const DEFAULT_BOARD_SIZE: i32 = 12;
pub const BOARD_SIZE_RANGE: RangeInclusive<i32> = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
pub const DEFAULT_LOG_FILE: &str = "rustsnake.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub rows: Option<i32>,
    pub cols: Option<i32>,
    /// Skip the prompt and play on the default 12x12 board.
    pub fixed: bool,
    pub log_file: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            rows: None,
            cols: None,
            fixed: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Options {
    /// Parses `--rows N`, `--cols N`, `--fixed` and `--log PATH`.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Options> {
        let mut options = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--rows" | "-r" => {
                    let raw = it.next().ok_or_else(|| SnakeError::MissingValue(arg.clone()))?;
                    options.rows = Some(parse_dimension(&raw, BOARD_SIZE_RANGE)?);
                }
                "--cols" | "-c" => {
                    let raw = it.next().ok_or_else(|| SnakeError::MissingValue(arg.clone()))?;
                    options.cols = Some(parse_dimension(&raw, BOARD_SIZE_RANGE)?);
                }
                "--fixed" => options.fixed = true,
                "--log" => {
                    let raw = it.next().ok_or_else(|| SnakeError::MissingValue(arg.clone()))?;
                    options.log_file = PathBuf::from(raw);
                }
                _ => return Err(SnakeError::UnknownFlag(arg)),
            }
        }
        Ok(options)
    }

    /// Final board dimensions, prompting for whatever the flags left open.
    pub fn board_size(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<(i32, i32)> {
        if self.fixed {
            return Ok((DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE));
        }
        let rows = match self.rows {
            Some(rows) => rows,
            None => prompt_dimension("rows", input, output)?,
        };
        let cols = match self.cols {
            Some(cols) => cols,
            None => prompt_dimension("columns", input, output)?,
        };
        Ok((rows, cols))
    }
}

/// Parses a board dimension and checks it lies in `range`.
pub fn parse_dimension(raw: &str, range: RangeInclusive<i32>) -> Result<i32> {
    let trimmed = raw.trim();
    let value: i32 = trimmed
        .parse()
        .map_err(|_| SnakeError::NotANumber(trimmed.to_string()))?;
    if !range.contains(&value) {
        return Err(SnakeError::InvalidDimension {
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value)
}

/// Asks for a dimension until a valid one is entered.
pub fn prompt_dimension(label: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<i32> {
    loop {
        write!(
            output,
            "Number of {label} ({MIN_BOARD_SIZE}-{MAX_BOARD_SIZE}): "
        )?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no board size given").into());
        }
        match parse_dimension(&line, BOARD_SIZE_RANGE) {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!(%err, "rejected board size");
                writeln!(output, "{err}")?;
            }
        }
    }
}
