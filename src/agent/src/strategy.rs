use common::model::game::{Choice, Round};
use tracing::trace;

/// Source of the computer's moves. `history` holds the rounds already
/// resolved in the current match.
pub trait Strategy {
    fn make_move(&mut self, history: &[Round]) -> Choice;
}

// Uniform random, the only strategy the game ships with
#[derive(Debug, Default)]
pub struct RandomMove {}
impl Strategy for RandomMove {
    fn make_move(&mut self, history: &[Round]) -> Choice {
        let choice = Choice::random();
        trace!("Drew {} after {} rounds", choice, history.len());
        choice
    }
}

// Trivial strategies
#[derive(Debug)]
pub struct Always(pub Choice);
impl Strategy for Always {
    fn make_move(&mut self, _: &[Round]) -> Choice {
        self.0
    }
}

/// Replays a fixed sequence, wrapping around at the end.
#[derive(Debug)]
pub struct Scripted {
    moves: Vec<Choice>,
}
impl Scripted {
    pub fn new(moves: Vec<Choice>) -> Self {
        assert!(!moves.is_empty(), "Scripted strategy needs at least one move");
        Scripted { moves }
    }
}
impl Strategy for Scripted {
    fn make_move(&mut self, history: &[Round]) -> Choice {
        self.moves[history.len() % self.moves.len()]
    }
}

#[cfg(test)]
mod tests {
    use common::model::game::Outcome;

    use super::*;

    fn round(computer: Choice) -> Round {
        Round {
            player: Choice::Rock,
            computer,
            outcome: Outcome::Tie,
        }
    }

    #[test]
    fn always_ignores_history() {
        let mut strategy = Always(Choice::Paper);
        assert_eq!(strategy.make_move(&[]), Choice::Paper);
        assert_eq!(strategy.make_move(&[round(Choice::Rock)]), Choice::Paper);
    }

    #[test]
    fn scripted_follows_round_count() {
        let mut strategy = Scripted::new(vec![Choice::Rock, Choice::Scissors]);
        let mut history = vec![];
        let mut played = vec![];
        for _ in 0..3 {
            let choice = strategy.make_move(&history);
            played.push(choice);
            history.push(round(choice));
        }
        assert_eq!(played, vec![Choice::Rock, Choice::Scissors, Choice::Rock]);
    }

    #[test]
    fn random_move_draws_every_choice_eventually() {
        let mut strategy = RandomMove::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(strategy.make_move(&[]));
        }
        assert_eq!(seen.len(), 3);
    }
}
