use common::model::{
    game::{final_outcome, Choice, Outcome, Round},
    messages::{ClientResponse, Decoration, Id},
};
use sound::SoundEffect;

// Types
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: Id,
    pub player_score: u8,
    pub computer_score: u8,
    pub current_round: u8,
    pub max_rounds: u8,
    pub ended: bool,
    pub rounds: Vec<Round>,
}

impl Match {
    pub fn new(max_rounds: u8) -> Self {
        Match {
            id: Id::new(),
            player_score: 0,
            computer_score: 0,
            current_round: 1,
            max_rounds: max_rounds.max(1),
            ended: false,
            rounds: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Match::new(self.max_rounds);
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round >= self.max_rounds
    }

    /// Scores a resolved round. Ties score for nobody.
    pub fn record(&mut self, round: Round) {
        match round.outcome {
            Outcome::Player => self.player_score += 1,
            Outcome::Computer => self.computer_score += 1,
            Outcome::Tie => {}
        }
        self.rounds.push(round);
    }

    pub fn final_outcome(&self) -> Outcome {
        final_outcome(self.player_score, self.computer_score)
    }

    pub fn scores(&self) -> ClientResponse {
        ClientResponse::Scores {
            player: self.player_score,
            computer: self.computer_score,
            round: self.current_round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    AwaitingInput,
    // A round is in flight: choices are fixed, the outcome is not shown yet
    Revealing { player: Choice, computer: Choice },
    Resolved { outcome: Outcome },
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    RevealComputer,
    ResolveRound,
    ShowFinalResult,
    ClearSelection,
}

/// A timer tagged with the match epoch it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub epoch: u64,
    pub timer: Timer,
}

// Side effects requested by the sequencer, routed by the game thread
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Client(ClientResponse),
    Sound(SoundEffect),
    Decoration(Decoration),
}
