use std::io::{self, Write};

use colored::Colorize;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

use crate::board::{Board, Cell};
use crate::error::Result;
use crate::game::{GameStatus, Screen};

const STDIN_FD: i32 = 0;

/// Puts stdin in non-canonical, no-echo mode until dropped.
pub struct RawMode {
    old_termios: Termios,
}

impl RawMode {
    pub fn enable() -> io::Result<RawMode> {
        let old_termios = Termios::from_fd(STDIN_FD)?;
        let mut new_termios = old_termios; // clone the termios struct
        new_termios.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &new_termios)?;
        Ok(RawMode { old_termios })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = tcsetattr(STDIN_FD, TCSANOW, &self.old_termios) {
            tracing::error!(%err, "failed to restore terminal");
        }
    }
}

/// Full-frame terminal renderer. Every update repaints the board, the score and
/// the status line so the screen never shows a half-updated frame.
pub struct TerminalScreen<W: Write> {
    out: W,
    board: Option<Board>,
    score: u32,
    status: GameStatus,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        TerminalScreen {
            out,
            board: None,
            score: 0,
            status: GameStatus::NotStarted,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn repaint(&mut self) -> Result<()> {
        clear_screen(&mut self.out)?;
        if let Some(board) = &self.board {
            write_board(&mut self.out, board)?;
        }
        writeln!(self.out, "Points: {}", self.score)?;
        match self.status {
            GameStatus::Lost => {
                writeln!(self.out, "{}", "Game Over!".red().bold())?;
                writeln!(self.out, "Press r to retry, q to quit")?;
            }
            GameStatus::Won => {
                writeln!(self.out, "{}", "The board is full, you win!".green().bold())?;
                writeln!(self.out, "Press r to play again, q to quit")?;
            }
            GameStatus::Running | GameStatus::NotStarted => {
                writeln!(self.out, "Arrow keys to steer, q to quit")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn draw(&mut self, board: &Board) -> Result<()> {
        self.board = Some(board.clone());
        self.repaint()
    }

    fn show_score(&mut self, score: u32) -> Result<()> {
        self.score = score;
        self.repaint()
    }

    fn show_status(&mut self, status: GameStatus) -> Result<()> {
        self.status = status;
        self.repaint()
    }
}

fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}[2J", 27 as char)?;
    write!(out, "{}[1;1H", 27 as char)
}

fn write_board(out: &mut impl Write, board: &Board) -> io::Result<()> {
    //border up
    write!(out, "▗")?;
    for _ in 0..board.col_size() {
        write!(out, "▄▄")?;
    }
    writeln!(out, "▖")?;
    for row in board.rows() {
        write!(out, "▐")?;
        for cell in row {
            match cell {
                Cell::Empty => write!(out, "  ")?,
                Cell::SnakeHead => write!(out, "{}", "Ӫ ".yellow())?,
                Cell::SnakeBody => write!(out, "{}", "⏺ ".green())?,
                Cell::Food => write!(out, "{}", "♦ ".red())?,
            }
        }
        writeln!(out, "▌")?;
    }
    //border down
    write!(out, "▝")?;
    for _ in 0..board.col_size() {
        write!(out, "▀▀")?;
    }
    writeln!(out, "▘")
}

/// Shown after the terminal has been restored.
pub fn final_screen(out: &mut impl Write, score: u32) -> io::Result<()> {
    writeln!(out, "Game Over!")?;
    writeln!(out, "Final Score: {}", score)
}
