//! Game speed as a function of the score.
//!
//! The interval between ticks starts at `BASE_INTERVAL_MS` minus a reduction that is
//! linearly interpolated between two `(score, reduction)` endpoints, so the snake speeds
//! up with every piece of food eaten.
use std::time::Duration;

pub const BASE_INTERVAL_MS: i64 = 300;
pub const SLOW_END: (i64, i64) = (1, 10);
pub const FAST_END: (i64, i64) = (20, 250);
/// Fastest the game ever gets, reached at score 20.
pub const MIN_INTERVAL_MS: i64 = BASE_INTERVAL_MS - FAST_END.1;

/// Linear interpolation through `(x0, y0)` and `(x1, y1)`, extrapolating outside them.
pub fn lerp(x0: i64, y0: i64, x1: i64, y1: i64, x: i64) -> i64 {
    (y0 * (x1 - x) + y1 * (x - x0)) / (x1 - x0)
}

/// Unclamped interval in milliseconds. Goes negative for very large scores.
pub fn raw_interval_ms(score: u32) -> i64 {
    let (x0, y0) = SLOW_END;
    let (x1, y1) = FAST_END;
    BASE_INTERVAL_MS - lerp(x0, y0, x1, y1, score as i64)
}

/// Time until the next tick for the given score.
pub fn tick_interval(score: u32) -> Duration {
    let ms = num::clamp(raw_interval_ms(score), MIN_INTERVAL_MS, BASE_INTERVAL_MS);
    Duration::from_millis(ms as u64)
}
