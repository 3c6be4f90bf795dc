use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    normalize::{normalize, word_count},
    scoring::{self, WpmSample},
    words::{PromptSet, WordBank},
};

/// Words per prompt when nothing else is configured
pub const DEFAULT_NUMBER_OF_WORDS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteOutcome {
    Accepted,
    Rejected,
}

/// The phrase being typed, pre-normalized for comparisons.
///
/// `requested_words` is the number of words drawn for the prompt, which is
/// the configured count unless the bank ran short.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub phrase: String,
    pub normalized: String,
    pub requested_words: usize,
}

impl Target {
    pub fn new(prompt: &PromptSet, requested_words: usize) -> Self {
        let phrase = prompt.phrase();
        Self {
            normalized: normalize(&phrase),
            phrase,
            requested_words,
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.normalized)
    }
}

/// Everything that changes while someone types
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub input: String,
    pub started_at: Option<SystemTime>,
    pub finished_at: Option<SystemTime>,
    pub finish_chars: Option<usize>,
    pub best_wpm: Option<f64>,
    pub cheated: bool,
    pub wpm_samples: Vec<WpmSample>,
}

pub fn phase(state: &SessionState) -> Phase {
    match (state.started_at, state.finished_at) {
        (None, _) => Phase::Idle,
        (Some(_), None) => Phase::Active,
        (Some(_), Some(_)) => Phase::Finished,
    }
}

pub fn is_complete(state: &SessionState, target: &Target) -> bool {
    let typed = normalize(&state.input);
    !typed.is_empty() && typed == target.normalized && target.word_count() == target.requested_words
}

pub fn words_typed(state: &SessionState) -> usize {
    word_count(&state.input)
}

/// Elapsed time of the attempt, frozen once finished
pub fn elapsed(state: &SessionState, now: SystemTime) -> Duration {
    match state.started_at {
        Some(start) => scoring::elapsed_between(start, state.finished_at.unwrap_or(now)),
        None => Duration::ZERO,
    }
}

pub fn live_wpm(state: &SessionState, now: SystemTime) -> f64 {
    if state.started_at.is_none() {
        return 0.0;
    }
    scoring::live_wpm(state.input.chars().count(), elapsed(state, now))
}

/// Withheld until finished with at least one character typed
pub fn final_wpm(state: &SessionState) -> Option<f64> {
    match (state.started_at, state.finished_at, state.finish_chars) {
        (Some(start), Some(finish), Some(chars)) if chars > 0 => {
            Some(scoring::final_wpm(chars, start, finish))
        }
        _ => None,
    }
}

fn finish(state: &mut SessionState, now: SystemTime) {
    let chars = state.input.chars().count();
    state.finished_at = Some(now);
    state.finish_chars = Some(chars);
    debug!(chars, "attempt finished");

    if let Some(wpm) = final_wpm(state) {
        let best = state.best_wpm.map_or(wpm, |prev| prev.max(wpm));
        if state.best_wpm != Some(best) {
            info!(wpm = best, "new best score");
        }
        state.best_wpm = Some(best);
    }
}

/// Replace the typed text with `value`; an unchanged value is a no-op
pub fn apply_input(state: &mut SessionState, target: &Target, value: String, now: SystemTime) {
    if value == state.input {
        return;
    }
    if state.started_at.is_none() && !value.trim().is_empty() {
        debug!("attempt started");
        state.started_at = Some(now);
    }
    if state.finished_at.is_some() {
        state.finished_at = None;
        state.finish_chars = None;
    }
    state.input = value;

    if state.started_at.is_some() && is_complete(state, target) {
        finish(state, now);
    }
}

/// Pasting the exact target is rejected and flagged; anything else is typed in
pub fn apply_paste(
    state: &mut SessionState,
    target: &Target,
    text: &str,
    now: SystemTime,
) -> PasteOutcome {
    if text.trim() == target.normalized {
        warn!("rejected paste of the full prompt");
        state.cheated = true;
        return PasteOutcome::Rejected;
    }

    let value = format!("{}{}", state.input, text);
    apply_input(state, target, value, now);
    PasteOutcome::Accepted
}

/// "I'm done": only meaningful while an attempt is running
pub fn mark_done(state: &mut SessionState, now: SystemTime) -> bool {
    if phase(state) != Phase::Active {
        return false;
    }
    finish(state, now);
    true
}

pub fn record_sample(state: &mut SessionState, now: SystemTime) {
    if phase(state) != Phase::Active {
        return;
    }
    let secs = scoring::elapsed_secs(elapsed(state, now));
    if secs > 0.0 {
        let wpm = live_wpm(state, now);
        state.wpm_samples.push(WpmSample::new(secs, wpm));
    }
}

/// Back to idle; only the best score survives
pub fn reset(state: &mut SessionState) {
    *state = SessionState {
        best_wpm: state.best_wpm,
        ..SessionState::default()
    };
}

/// A running typing challenge: owns the prompt, the session and the time source
pub struct Challenge<C: Clock = SystemClock> {
    bank: WordBank,
    requested_words: usize,
    prompt: PromptSet,
    target: Target,
    state: SessionState,
    clock: C,
    rng: Box<dyn RngCore + Send>,
}

impl Challenge<SystemClock> {
    pub fn new(bank: WordBank, requested_words: usize) -> Self {
        Self::with_clock(bank, requested_words, SystemClock)
    }
}

impl<C: Clock> Challenge<C> {
    pub fn with_clock(bank: WordBank, requested_words: usize, clock: C) -> Self {
        Self::with_rng(bank, requested_words, clock, StdRng::from_entropy())
    }

    pub fn with_rng<R: RngCore + Send + 'static>(
        bank: WordBank,
        requested_words: usize,
        clock: C,
        rng: R,
    ) -> Self {
        let mut rng: Box<dyn RngCore + Send> = Box::new(rng);
        let prompt = bank.pick_words(&mut *rng, requested_words);
        let target = Target::new(&prompt, prompt.len());

        Self {
            bank,
            requested_words,
            prompt,
            target,
            state: SessionState::default(),
            clock,
            rng,
        }
    }

    /// Swap in a fixed prompt for the current attempt. The next reset draws
    /// the configured number of words from the bank again.
    pub fn with_prompt(mut self, prompt: PromptSet) -> Self {
        self.target = Target::new(&prompt, prompt.len());
        self.prompt = prompt;
        self
    }

    pub fn prompt(&self) -> &PromptSet {
        &self.prompt
    }

    pub fn phrase(&self) -> &str {
        &self.target.phrase
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn phase(&self) -> Phase {
        phase(&self.state)
    }

    pub fn has_started(&self) -> bool {
        self.state.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    pub fn type_text(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        apply_input(&mut self.state, &self.target, value.into(), now);
    }

    pub fn push_char(&mut self, c: char) {
        let mut value = self.state.input.clone();
        value.push(c);
        self.type_text(value);
    }

    pub fn backspace(&mut self) {
        let mut value = self.state.input.clone();
        if value.pop().is_some() {
            self.type_text(value);
        }
    }

    pub fn paste(&mut self, text: &str) -> PasteOutcome {
        let now = self.clock.now();
        apply_paste(&mut self.state, &self.target, text, now)
    }

    pub fn mark_done(&mut self) -> bool {
        let now = self.clock.now();
        mark_done(&mut self.state, now)
    }

    pub fn on_tick(&mut self) {
        let now = self.clock.now();
        record_sample(&mut self.state, now);
    }

    pub fn reset(&mut self) {
        reset(&mut self.state);
        self.prompt = self.bank.pick_words(&mut *self.rng, self.requested_words);
        self.target = Target::new(&self.prompt, self.prompt.len());
        debug!(words = self.requested_words, "challenge reset");
    }

    pub fn live_wpm(&self) -> f64 {
        live_wpm(&self.state, self.clock.now())
    }

    pub fn final_wpm(&self) -> Option<f64> {
        final_wpm(&self.state)
    }

    pub fn best_wpm(&self) -> Option<f64> {
        self.state.best_wpm
    }

    pub fn elapsed_secs(&self) -> f64 {
        scoring::elapsed_secs(elapsed(&self.state, self.clock.now()))
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.state, &self.target)
    }

    pub fn words_typed(&self) -> usize {
        words_typed(&self.state)
    }

    pub fn target_words(&self) -> usize {
        self.prompt.len()
    }

    pub fn cheated(&self) -> bool {
        self.state.cheated
    }

    pub fn wpm_samples(&self) -> &[WpmSample] {
        &self.state.wpm_samples
    }
}
