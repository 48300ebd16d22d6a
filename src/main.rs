#![allow(dead_code)]

mod board;
mod config;
mod difficulty;
mod error;
mod food;
mod game;
mod input;
mod position;
mod random;
mod scheduler;
mod snake;
mod terminal;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Options;
use game::Game;
use input::InputBuffer;
use terminal::{final_screen, RawMode, TerminalScreen};

/// Longest the loop blocks on stdin when no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let options = Options::parse(std::env::args().skip(1))?;
    init_tracing(&options.log_file)?;

    let (rows, cols) = {
        let mut input = io::stdin().lock();
        let mut output = io::stdout();
        options.board_size(&mut input, &mut output)?
    };
    info!(rows, cols, "board configured");

    let score = play(rows, cols)?;
    final_screen(&mut io::stdout(), score)?;
    Ok(())
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    // stdout belongs to the game, so logs go to a file
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Runs sessions until the player quits. Returns the last score.
fn play(rows: i32, cols: i32) -> anyhow::Result<u32> {
    let _raw_mode = RawMode::enable().context("could not switch the terminal to raw mode")?;
    let keys = spawn_stdin_channel();
    let mut input = InputBuffer::new();
    let mut game = Game::new(rows, cols, TerminalScreen::new(io::stdout()));
    game.start(Instant::now())?;

    loop {
        let wait = game
            .scheduler()
            .time_left(Instant::now())
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));
        match keys.recv_timeout(wait) {
            Ok(byte) => input.push(byte),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                warn!("stdin closed");
                return Ok(game.score());
            }
        }
        while let Ok(byte) = keys.try_recv() {
            input.push(byte);
        }
        while let Some(intent) = input.next_intent() {
            if !game.handle(intent, Instant::now())? {
                info!(score = game.score(), "quit");
                return Ok(game.score());
            }
        }
        game.poll(Instant::now())?;
    }
}

fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer = [0u8; 1];
        // read one byte at a time; stop once stdin or the receiver is gone
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}
