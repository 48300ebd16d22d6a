use rand::Rng;

/// Uniform integer in `start..=end`.
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, start: i32, end: i32) -> i32 {
    rng.random_range(start..=end)
}
