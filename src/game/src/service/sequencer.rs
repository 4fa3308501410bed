use agent::strategy::Strategy;
use common::model::{
    game::{resolve, Choice, Outcome, Round},
    messages::{ClientResponse, Decoration, Side},
};
use sound::SoundEffect;
use tracing::{debug, info, warn};

use crate::{
    entrypoint::Timing,
    model::internal::{Effect, Match, Phase, Timer, TimerEvent},
    service::scheduler::Scheduler,
};

const CONFETTI_PIECES: u8 = 20;
const MEGA_CONFETTI_PIECES: u8 = 50;
const SPARKLE_PIECES: u8 = 5;

/// Drives one match: accepts choices, schedules the reveal choreography and
/// turns each fired timer into the effects the game thread should perform.
pub struct MatchSequencer {
    state: Match,
    phase: Phase,
    // Bumped on reset so timers from the previous match are recognisably stale
    epoch: u64,
    timing: Timing,
    opponent: Box<dyn Strategy + Send>,
}

impl MatchSequencer {
    pub fn new(max_rounds: u8, timing: Timing, opponent: Box<dyn Strategy + Send>) -> Self {
        MatchSequencer {
            state: Match::new(max_rounds),
            phase: Phase::AwaitingInput,
            epoch: 0,
            timing,
            opponent,
        }
    }

    pub fn state(&self) -> &Match {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::AwaitingInput | Phase::Resolved { .. })
    }

    fn schedule(&self, scheduler: &mut dyn Scheduler<TimerEvent>, timer: Timer) {
        let delay = match timer {
            Timer::RevealComputer => self.timing.reveal,
            Timer::ResolveRound => self.timing.resolve,
            Timer::ShowFinalResult => self.timing.final_result,
            Timer::ClearSelection => self.timing.selection_clear,
        };
        scheduler.schedule(
            delay,
            TimerEvent {
                epoch: self.epoch,
                timer,
            },
        );
    }

    pub fn play_round(
        &mut self,
        player: Choice,
        scheduler: &mut dyn Scheduler<TimerEvent>,
    ) -> Vec<Effect> {
        if self.state.ended {
            debug!("Match {} has ended, ignoring {}", self.state.id, player);
            return vec![];
        }
        if !self.accepts_input() {
            warn!(
                "Round {} of match {} is still in flight, ignoring {}",
                self.state.current_round, self.state.id, player
            );
            return vec![];
        }

        let computer = self.opponent.make_move(&self.state.rounds);
        debug!(
            "Round {} of match {}: {} vs {}",
            self.state.current_round, self.state.id, player, computer
        );
        self.phase = Phase::Revealing { player, computer };

        self.schedule(scheduler, Timer::ClearSelection);
        self.schedule(scheduler, Timer::RevealComputer);
        self.schedule(scheduler, Timer::ResolveRound);

        vec![
            Effect::Sound(SoundEffect::Click),
            Effect::Client(ClientResponse::ChoiceSelected { choice: player }),
            Effect::Client(ClientResponse::PlayerChoice { choice: player }),
            Effect::Client(ClientResponse::ComputerThinking),
            Effect::Sound(SoundEffect::Thinking),
        ]
    }

    pub fn on_timer(
        &mut self,
        event: TimerEvent,
        scheduler: &mut dyn Scheduler<TimerEvent>,
    ) -> Vec<Effect> {
        if event.epoch != self.epoch {
            debug!("Dropping stale {:?}", event);
            return vec![];
        }
        match event.timer {
            Timer::ClearSelection => vec![Effect::Client(ClientResponse::SelectionCleared)],
            Timer::RevealComputer => match self.phase {
                Phase::Revealing { computer, .. } => {
                    vec![Effect::Client(ClientResponse::ComputerChoice {
                        choice: computer,
                    })]
                }
                phase => {
                    warn!("Reveal fired outside a round ({:?})", phase);
                    vec![]
                }
            },
            Timer::ResolveRound => self.resolve_round(scheduler),
            Timer::ShowFinalResult => self.show_final_result(),
        }
    }

    fn resolve_round(&mut self, scheduler: &mut dyn Scheduler<TimerEvent>) -> Vec<Effect> {
        let Phase::Revealing { player, computer } = self.phase else {
            warn!("Resolve fired outside a round ({:?})", self.phase);
            return vec![];
        };
        let outcome = resolve(player, computer);
        let round = Round {
            player,
            computer,
            outcome,
        };
        self.state.record(round);
        info!(
            "Round {} of match {}: {:?} ({}-{})",
            self.state.current_round,
            self.state.id,
            outcome,
            self.state.player_score,
            self.state.computer_score
        );

        let mut effects = match outcome {
            Outcome::Player => vec![
                Effect::Sound(SoundEffect::Win),
                Effect::Decoration(Decoration::Confetti {
                    pieces: CONFETTI_PIECES,
                }),
                Effect::Decoration(Decoration::Sparkles {
                    side: Side::Player,
                    pieces: SPARKLE_PIECES,
                }),
                Effect::Decoration(Decoration::PulseWinner { side: Side::Player }),
            ],
            Outcome::Computer => vec![
                Effect::Sound(SoundEffect::Lose),
                Effect::Decoration(Decoration::PulseWinner {
                    side: Side::Computer,
                }),
            ],
            Outcome::Tie => vec![Effect::Sound(SoundEffect::Tie)],
        };
        effects.push(Effect::Client(ClientResponse::round_result(&round)));

        if self.state.is_last_round() {
            self.state.ended = true;
            self.phase = Phase::Ended;
            self.schedule(scheduler, Timer::ShowFinalResult);
        } else {
            self.state.current_round += 1;
            self.phase = Phase::Resolved { outcome };
        }
        effects.push(Effect::Client(self.state.scores()));
        effects
    }

    fn show_final_result(&mut self) -> Vec<Effect> {
        if !self.state.ended {
            warn!("Final result fired before match {} ended", self.state.id);
            return vec![];
        }
        let outcome = self.state.final_outcome();
        info!(
            "Match {} finished: {:?} ({}-{})",
            self.state.id, outcome, self.state.player_score, self.state.computer_score
        );
        let mut effects = match outcome {
            Outcome::Player => vec![
                Effect::Sound(SoundEffect::Victory),
                Effect::Decoration(Decoration::MegaConfetti {
                    pieces: MEGA_CONFETTI_PIECES,
                }),
            ],
            Outcome::Computer => vec![Effect::Sound(SoundEffect::Defeat)],
            Outcome::Tie => vec![Effect::Sound(SoundEffect::Tie)],
        };
        effects.push(Effect::Client(ClientResponse::final_result(outcome)));
        effects.push(Effect::Client(ClientResponse::InputEnabled { enabled: false }));
        effects
    }

    /// Starts a fresh match. Timers still pending from the old one are
    /// ignored when they fire.
    pub fn reset_game(&mut self) -> Vec<Effect> {
        if matches!(self.phase, Phase::Revealing { .. }) {
            warn!(
                "Resetting match {} with a round in flight",
                self.state.id
            );
        }
        self.state.reset();
        self.phase = Phase::AwaitingInput;
        self.epoch += 1;
        info!("Started match {}", self.state.id);
        vec![
            Effect::Client(ClientResponse::GameReset),
            Effect::Client(self.state.scores()),
            Effect::Client(ClientResponse::InputEnabled { enabled: true }),
        ]
    }
}
