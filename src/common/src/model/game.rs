use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Player,
    Computer,
    Tie,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Uniform draw from the thread-local RNG.
    pub fn random() -> Choice {
        Self::ALL[rand::rng().random_range(0..Self::ALL.len())]
    }

    pub fn beats(&self, other: &Choice) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Choice::Rock, Choice::Scissors)
                    | (Choice::Scissors, Choice::Paper)
                    | (Choice::Paper, Choice::Rock)
            ))
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Choice::Rock => "🪨",
            Choice::Paper => "📄",
            Choice::Scissors => "✂️",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    // R, P and S are the only bound keys
    pub fn from_key(key: &str) -> Option<Choice> {
        match key.to_lowercase().as_str() {
            "r" => Some(Choice::Rock),
            "p" => Some(Choice::Paper),
            "s" => Some(Choice::Scissors),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn resolve(player: Choice, computer: Choice) -> Outcome {
    match player.beats(&computer) {
        Some(true) => Outcome::Player,
        Some(false) => Outcome::Computer,
        None => Outcome::Tie,
    }
}

/// Overall winner of a match, decided by the final scores.
pub fn final_outcome(player_score: u8, computer_score: u8) -> Outcome {
    match player_score.cmp(&computer_score) {
        std::cmp::Ordering::Greater => Outcome::Player,
        std::cmp::Ordering::Less => Outcome::Computer,
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Round {
    pub player: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
}
