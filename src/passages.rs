use crate::settings::Difficulty;
use include_dir::{include_dir, Dir};
use serde::Deserialize;

static BANK_DIR: Dir = include_dir!("src/bank");

/// The fixed passage bank, embedded in the binary and tiered by difficulty.
#[derive(Deserialize, Clone, Debug)]
pub struct PassageBank {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl PassageBank {
    pub fn load() -> Self {
        let file = BANK_DIR
            .get_file("passages.json")
            .expect("Passage bank not found");
        let contents = file
            .contents_utf8()
            .expect("Unable to interpret passage bank as a string");
        serde_json::from_str(contents).expect("Unable to deserialize passage bank")
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Round-robin passage selection. The index only moves on an explicit
/// next-text request; a restart replays the current passage.
#[derive(Clone, Debug)]
pub struct PassageProvider {
    bank: PassageBank,
    index: usize,
}

impl PassageProvider {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            bank: PassageBank::load(),
            index: 0,
        }
    }

    pub fn current(&self, difficulty: Difficulty) -> &str {
        let tier = self.bank.tier(difficulty);
        &tier[self.index % tier.len()]
    }

    pub fn advance(&mut self) {
        self.index = self.index.wrapping_add(1);
    }
}
