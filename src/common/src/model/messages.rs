use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::game::{Choice, Outcome, Round};
use super::settings::{Settings, Theme};

pub const INSTRUCTIONS: &str =
    "Choose Rock, Paper, or Scissors to start the game! (You can also use R, P, S keys)";

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Id(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
        Ok(Id(uuid))
    }
}
impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Computer,
}

// Classification tags consumed by the presentation layer for styling
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTag {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "lose")]
    Lose,
    #[serde(rename = "tie")]
    Tie,
    #[serde(rename = "final-win")]
    FinalWin,
    #[serde(rename = "final-lose")]
    FinalLose,
    #[serde(rename = "final-tie")]
    FinalTie,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    Confetti { pieces: u8 },
    MegaConfetti { pieces: u8 },
    Sparkles { side: Side, pieces: u8 },
    PulseWinner { side: Side },
}

// Client types
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type")]
pub enum ClientRequest {
    Choose { choice: Choice },
    PlayAgain,
    ToggleTheme,
    ToggleAnimations,
    ToggleSounds,
    SetVolume { percent: u8 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ClientResponse {
    Instructions {
        text: String,
    },
    ThemeChanged {
        theme: Theme,
    },
    SettingsChanged {
        settings: Settings,
    },
    // Button feedback for the submitted choice
    ChoiceSelected {
        choice: Choice,
    },
    SelectionCleared,
    PlayerChoice {
        choice: Choice,
    },
    ComputerThinking,
    ComputerChoice {
        choice: Choice,
    },
    RoundResult {
        outcome: Outcome,
        text: String,
        tag: ResultTag,
    },
    Scores {
        player: u8,
        computer: u8,
        round: u8,
    },
    FinalResult {
        outcome: Outcome,
        text: String,
        tag: ResultTag,
    },
    InputEnabled {
        enabled: bool,
    },
    GameReset,
    Decoration {
        decoration: Decoration,
    },
}

impl ClientResponse {
    pub fn round_result(round: &Round) -> Self {
        let (text, tag) = match round.outcome {
            Outcome::Player => (
                format!(
                    "You win this round! {} beats {}",
                    round.player.emoji(),
                    round.computer.emoji()
                ),
                ResultTag::Win,
            ),
            Outcome::Computer => (
                format!(
                    "Computer wins this round! {} beats {}",
                    round.computer.emoji(),
                    round.player.emoji()
                ),
                ResultTag::Lose,
            ),
            Outcome::Tie => (
                format!("It's a tie! Both chose {}", round.player.emoji()),
                ResultTag::Tie,
            ),
        };
        ClientResponse::RoundResult {
            outcome: round.outcome,
            text,
            tag,
        }
    }

    pub fn final_result(outcome: Outcome) -> Self {
        let (text, tag) = match outcome {
            Outcome::Player => (
                "🎉 Congratulations! You Won The Game! 🎉",
                ResultTag::FinalWin,
            ),
            Outcome::Computer => (
                "💻 Game Over! Computer Wins The Game! 💻",
                ResultTag::FinalLose,
            ),
            Outcome::Tie => ("🤝 It's a Tie Game! Try Again! 🤝", ResultTag::FinalTie),
        };
        ClientResponse::FinalResult {
            outcome,
            text: text.to_owned(),
            tag,
        }
    }

    pub fn instructions() -> Self {
        ClientResponse::Instructions {
            text: INSTRUCTIONS.to_owned(),
        }
    }
}
