use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;

use crate::{assets, error::Result};

/// A fixed list of words the challenge prompts are drawn from
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordBank {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordBank {
    pub fn load(name: &str) -> Result<Self> {
        assets::read_json(&format!("{name}.json"))
    }

    /// The bank shipped with the binary
    pub fn portfolio() -> Result<Self> {
        Self::load("words")
    }

    /// Shuffle the whole bank and keep the first `count` words.
    ///
    /// Words only repeat when the bank itself holds duplicates. Asking for more
    /// words than the bank has yields the full permutation.
    pub fn pick_words<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> PromptSet {
        let mut words = self.words.clone();
        words.shuffle(rng);
        words.truncate(count);
        PromptSet { words }
    }
}

/// The ordered words of one attempt
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PromptSet {
    words: Vec<String>,
}

impl PromptSet {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn from_phrase(phrase: &str) -> Self {
        Self::new(phrase.split_whitespace().map(str::to_string).collect())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}
