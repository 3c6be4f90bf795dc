use std::time::{Duration, SystemTime};

/// Average word length used to turn characters into words
pub const CHARS_PER_WORD: f64 = 5.0;

/// Floor for the final-score denominator when start and finish coincide
pub const MIN_FINAL_ELAPSED_SECS: f64 = 0.001;

/// One live-wpm reading taken while an attempt is running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WpmSample {
    pub secs: f64,
    pub wpm: f64,
}

impl WpmSample {
    pub fn new(secs: f64, wpm: f64) -> Self {
        Self { secs, wpm }
    }
}

impl From<WpmSample> for (f64, f64) {
    fn from(s: WpmSample) -> Self {
        (s.secs, s.wpm)
    }
}

/// Round to one decimal place.
///
/// The epsilon nudge keeps values such as 0.05 from rounding down through
/// binary representation error.
pub fn round10(x: f64) -> f64 {
    ((x + f64::EPSILON) * 10.0).round() / 10.0
}

pub fn raw_wpm(chars: usize, elapsed_secs: f64) -> f64 {
    (chars as f64 / CHARS_PER_WORD) * (60.0 / elapsed_secs)
}

/// Time between two instants, zero when `end` precedes `start`
pub fn elapsed_between(start: SystemTime, end: SystemTime) -> Duration {
    end.duration_since(start).unwrap_or_default()
}

/// Millisecond resolution, matching what the clock hands the engine
pub fn elapsed_secs(elapsed: Duration) -> f64 {
    elapsed.as_millis() as f64 / 1000.0
}

/// Live score: zero until some time has passed
pub fn live_wpm(chars: usize, elapsed: Duration) -> f64 {
    let secs = elapsed_secs(elapsed);
    if secs > 0.0 {
        round10(raw_wpm(chars, secs))
    } else {
        0.0
    }
}

/// Final score over a closed interval, never dividing by zero
pub fn final_wpm(chars: usize, start: SystemTime, finish: SystemTime) -> f64 {
    let secs = elapsed_secs(elapsed_between(start, finish)).max(MIN_FINAL_ELAPSED_SECS);
    round10(raw_wpm(chars, secs))
}
