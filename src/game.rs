// One session: spawn, then tick until the snake dies or fills the board.
// Every tick moves the snake, feeds it, checks for death and re-schedules itself with
// a delay taken from the current score.
use std::time::Instant;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::board::Board;
use crate::difficulty::tick_interval;
use crate::error::Result;
use crate::food::Food;
use crate::input::Intent;
use crate::scheduler::Scheduler;
use crate::snake::Snake;

const INITIAL_SCORE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Lost,
    Won,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Lost | GameStatus::Won)
    }
}

/// Presentation side of the game: shows frames, the score and the end-of-game cues.
pub trait Screen {
    fn draw(&mut self, board: &Board) -> Result<()>;
    fn show_score(&mut self, score: u32) -> Result<()>;
    fn show_status(&mut self, status: GameStatus) -> Result<()>;
}

pub struct Game<S, R = ThreadRng> {
    board: Board,
    snake: Snake,
    food: Food,
    score: u32,
    status: GameStatus,
    scheduler: Scheduler,
    screen: S,
    rng: R,
}

impl<S: Screen> Game<S, ThreadRng> {
    pub fn new(row_size: i32, col_size: i32, screen: S) -> Self {
        Game::with_rng(row_size, col_size, screen, rand::rng())
    }
}

impl<S: Screen, R: Rng> Game<S, R> {
    pub fn with_rng(row_size: i32, col_size: i32, screen: S, rng: R) -> Self {
        Game {
            board: Board::new(row_size, col_size),
            snake: Snake::default(),
            food: Food::default(),
            score: INITIAL_SCORE,
            status: GameStatus::NotStarted,
            scheduler: Scheduler::new(),
            screen,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn has_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Starts a fresh session, dropping any tick still pending from the previous one.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        let session = self.scheduler.begin_session();
        let (rows, cols) = (self.board.row_size(), self.board.col_size());

        self.score = INITIAL_SCORE;
        self.status = GameStatus::Running;
        // food after snake so it avoids the snake's cell
        self.snake.spawn(rows, cols, &mut self.rng);
        let placed = self
            .food
            .spawn(rows, cols, self.snake.positions(), &mut self.rng);
        info!(session, rows, cols, head = ?self.snake.head(), food = ?self.food.position(), "session started");

        self.board.draw(self.snake.positions(), self.food.position())?;
        self.screen.draw(&self.board)?;
        self.screen.show_score(self.score)?;
        self.screen.show_status(self.status)?;

        if !placed {
            return self.finish(GameStatus::Won);
        }
        self.scheduler.schedule(now, tick_interval(self.score));
        Ok(())
    }

    /// Runs the pending tick if it is due. Returns whether a tick ran.
    pub fn poll(&mut self, now: Instant) -> Result<bool> {
        if self.scheduler.take_due(now).is_none() {
            return Ok(false);
        }
        self.tick(now)?;
        Ok(true)
    }

    /// Advances the game by one step.
    pub fn tick(&mut self, now: Instant) -> Result<GameStatus> {
        if self.status != GameStatus::Running {
            return Ok(self.status);
        }
        let (rows, cols) = (self.board.row_size(), self.board.col_size());

        self.snake.advance(self.food.position());
        let mut board_full = false;
        if self.snake.has_eaten(self.food.position()) {
            let before = tick_interval(self.score);
            self.score += 1;
            board_full = !self
                .food
                .spawn(rows, cols, self.snake.positions(), &mut self.rng);
            info!(score = self.score, length = self.snake.len(), "food eaten");
            let after = tick_interval(self.score);
            if after != before {
                debug!(?before, ?after, "speeding up");
            }
            self.screen.show_score(self.score)?;
        }

        if self.snake.is_dead(rows, cols) {
            info!(score = self.score, head = ?self.snake.head(), "snake died");
            self.finish(GameStatus::Lost)?;
            return Ok(self.status);
        }

        self.board.draw(self.snake.positions(), self.food.position())?;
        self.screen.draw(&self.board)?;

        if board_full {
            info!(score = self.score, "board filled");
            self.finish(GameStatus::Won)?;
            return Ok(self.status);
        }

        self.scheduler.schedule(now, tick_interval(self.score));
        Ok(self.status)
    }

    /// Applies a player intent. Returns `false` once the player asked to quit.
    pub fn handle(&mut self, intent: Intent, now: Instant) -> Result<bool> {
        match intent {
            Intent::Quit => return Ok(false),
            Intent::Turn(direction) => {
                if self.status == GameStatus::Running && !self.snake.turn(direction) {
                    debug!(?direction, current = ?self.snake.direction(), "reversal ignored");
                }
            }
            Intent::Restart => {
                if self.status.is_over() {
                    info!(score = self.score, "restarting");
                    self.start(now)?;
                }
            }
        }
        Ok(true)
    }

    fn finish(&mut self, status: GameStatus) -> Result<()> {
        self.status = status;
        self.scheduler.cancel();
        self.screen.show_status(status)
    }

    #[cfg(test)]
    fn place(&mut self, snake: Snake, food: Food) {
        self.snake = snake;
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::position::{Direction, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingScreen {
        frames: usize,
        scores: Vec<u32>,
        statuses: Vec<GameStatus>,
    }

    impl Screen for RecordingScreen {
        fn draw(&mut self, _board: &Board) -> Result<()> {
            self.frames += 1;
            Ok(())
        }

        fn show_score(&mut self, score: u32) -> Result<()> {
            self.scores.push(score);
            Ok(())
        }

        fn show_status(&mut self, status: GameStatus) -> Result<()> {
            self.statuses.push(status);
            Ok(())
        }
    }

    fn game(seed: u64) -> Game<RecordingScreen, StdRng> {
        Game::with_rng(12, 12, RecordingScreen::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn start_resets_and_schedules() {
        let mut game = game(1);
        assert_eq!(game.status(), GameStatus::NotStarted);
        let t0 = Instant::now();
        game.start(t0).unwrap();

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 1);
        let food = game.food().position().unwrap();
        assert!(!game.snake().positions().contains(&food));
        assert_eq!(game.board().cell(food), Some(Cell::Food));
        assert_eq!(game.screen().frames, 1);
        assert_eq!(game.screen().scores, vec![1]);
        assert_eq!(game.screen().statuses, vec![GameStatus::Running]);
        assert_eq!(game.scheduler().time_left(t0), Some(Duration::from_millis(290)));
    }

    #[test]
    fn tick_waits_for_its_deadline() {
        let mut game = game(2);
        let t0 = Instant::now();
        game.start(t0).unwrap();
        let head = game.snake().head().unwrap();

        assert!(!game.poll(t0 + Duration::from_millis(289)).unwrap());
        assert_eq!(game.snake().head(), Some(head));
        assert!(game.poll(t0 + Duration::from_millis(290)).unwrap());
        assert_eq!(game.snake().head(), Some(head + Position::UP));
        assert!(game.scheduler().pending().is_some());
    }

    #[test]
    fn eating_scores_grows_and_speeds_up() {
        let mut game = game(3);
        let t0 = Instant::now();
        game.start(t0).unwrap();
        game.place(
            Snake::with_positions([Position::new(6, 6)], Direction::Up),
            Food::at(Position::new(5, 6)),
        );

        assert_eq!(game.tick(t0).unwrap(), GameStatus::Running);
        assert_eq!(game.snake().head(), Some(Position::new(5, 6)));
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.score(), 2);
        assert_eq!(game.screen().scores, vec![1, 2]);
        let food = game.food().position().unwrap();
        assert!(!game.snake().positions().contains(&food));
        assert_eq!(game.board().cell(Position::new(5, 6)), Some(Cell::SnakeHead));
        assert_eq!(game.board().cell(Position::new(6, 6)), Some(Cell::SnakeBody));
        assert_eq!(
            game.scheduler().time_left(t0),
            Some(tick_interval(2))
        );
        assert!(tick_interval(2) < tick_interval(1));
    }

    #[test]
    fn hitting_the_wall_loses_and_stops_ticking() {
        let mut game = game(4);
        let t0 = Instant::now();
        game.start(t0).unwrap();
        game.place(
            Snake::with_positions([Position::new(0, 3)], Direction::Up),
            Food::at(Position::new(9, 9)),
        );
        let frames = game.screen().frames;

        assert_eq!(game.tick(t0).unwrap(), GameStatus::Lost);
        assert!(game.has_lost());
        assert!(game.scheduler().is_idle());
        assert_eq!(game.screen().frames, frames);
        assert_eq!(game.screen().statuses.last(), Some(&GameStatus::Lost));

        // no further ticks and no turning once lost
        assert!(!game.poll(t0 + Duration::from_secs(10)).unwrap());
        assert!(game.handle(Intent::Turn(Direction::Left), t0).unwrap());
        assert_eq!(game.snake().direction(), Direction::Up);
    }

    #[test]
    fn restart_only_after_loss() {
        let mut game = game(5);
        let t0 = Instant::now();
        game.start(t0).unwrap();
        let session = game.scheduler().session();

        assert!(game.handle(Intent::Restart, t0).unwrap());
        assert_eq!(game.scheduler().session(), session);

        game.place(
            Snake::with_positions([Position::new(3, 0)], Direction::Left),
            Food::at(Position::new(9, 9)),
        );
        game.tick(t0).unwrap();
        assert!(game.has_lost());

        let t1 = t0 + Duration::from_secs(1);
        assert!(game.handle(Intent::Restart, t1).unwrap());
        assert_eq!(game.status(), GameStatus::Running);
        assert!(!game.has_lost());
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 1);
        assert!(!game.snake().is_dead(12, 12));
        let food = game.food().position().unwrap();
        assert!(!game.snake().positions().contains(&food));
        assert_eq!(game.scheduler().session(), session + 1);
        assert_eq!(game.scheduler().time_left(t1), Some(Duration::from_millis(290)));
    }

    #[test]
    fn turning_rejects_reversal() {
        let mut game = game(6);
        let t0 = Instant::now();
        game.start(t0).unwrap();
        assert!(game.handle(Intent::Turn(Direction::Down), t0).unwrap());
        assert_eq!(game.snake().direction(), Direction::Up);
        assert!(game.handle(Intent::Turn(Direction::Left), t0).unwrap());
        assert_eq!(game.snake().direction(), Direction::Left);
    }

    #[test]
    fn quit_is_reported() {
        let mut game = game(7);
        assert!(!game.handle(Intent::Quit, Instant::now()).unwrap());
    }

    #[test]
    fn filling_the_board_wins() {
        let mut game = Game::with_rng(8, 8, RecordingScreen::default(), StdRng::seed_from_u64(8));
        let t0 = Instant::now();
        game.start(t0).unwrap();

        // zig-zag covering every cell except (0,0), head at (0,1) heading left
        let mut cells: Vec<Position> = (1..8).map(|y| Position::new(0, y)).collect();
        for x in 1..8 {
            if x % 2 == 1 {
                cells.extend((0..8).rev().map(|y| Position::new(x, y)));
            } else {
                cells.extend((0..8).map(|y| Position::new(x, y)));
            }
        }
        assert_eq!(cells.len(), 63);
        game.place(
            Snake::with_positions(cells, Direction::Left),
            Food::at(Position::new(0, 0)),
        );

        assert_eq!(game.tick(t0).unwrap(), GameStatus::Won);
        assert_eq!(game.snake().len(), 64);
        assert_eq!(game.food().position(), None);
        assert!(game.scheduler().is_idle());
        assert!(game.handle(Intent::Restart, t0).unwrap());
        assert_eq!(game.status(), GameStatus::Running);
    }
}
