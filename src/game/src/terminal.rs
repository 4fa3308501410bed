//! Line-oriented front end: turns typed commands into requests and game
//! responses into printable lines.

use common::model::{
    game::Choice,
    messages::{ClientRequest, ClientResponse, Decoration, Side},
    settings::Settings,
};

pub const HELP: &str = "\
Commands:
  r, p, s          play rock, paper or scissors
  again            start a new match
  theme            switch between light and dark
  anim             toggle animations
  sound            toggle sound effects
  vol <0-100>      set the volume
  help             show this message
  quit             leave the game";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Request(ClientRequest),
    Help,
    Quit,
}

/// `None` for blank or unknown input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if let Some(choice) = Choice::from_key(line) {
        return Some(Command::Request(ClientRequest::Choose { choice }));
    }
    let mut words = line.split_whitespace();
    let command = words.next()?.to_lowercase();
    let request = match command.as_str() {
        "rock" => ClientRequest::Choose {
            choice: Choice::Rock,
        },
        "paper" => ClientRequest::Choose {
            choice: Choice::Paper,
        },
        "scissors" => ClientRequest::Choose {
            choice: Choice::Scissors,
        },
        "again" | "a" => ClientRequest::PlayAgain,
        "theme" | "t" => ClientRequest::ToggleTheme,
        "anim" | "animations" => ClientRequest::ToggleAnimations,
        "sound" | "sounds" => ClientRequest::ToggleSounds,
        "vol" | "volume" => {
            let percent: u32 = words.next()?.parse().ok()?;
            ClientRequest::SetVolume {
                percent: percent.min(100) as u8,
            }
        }
        "help" | "h" | "?" => return Some(Command::Help),
        "quit" | "q" | "exit" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Request(request))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Computer => "Computer",
    }
}

fn describe_settings(settings: &Settings) -> String {
    format!(
        "Settings: animations {}, sounds {}, volume {}%",
        on_off(settings.animations),
        on_off(settings.sounds),
        settings.volume_percent()
    )
}

/// Printable form of a response. Highlights with no terminal counterpart
/// render as `None`.
pub fn render(response: &ClientResponse) -> Option<String> {
    let line = match response {
        ClientResponse::Instructions { text } => text.clone(),
        ClientResponse::ThemeChanged { theme } => {
            format!("{} Theme: {}", theme.icon(), theme.as_str())
        }
        ClientResponse::SettingsChanged { settings } => describe_settings(settings),
        ClientResponse::ChoiceSelected { .. } | ClientResponse::SelectionCleared => return None,
        ClientResponse::PlayerChoice { choice } => {
            format!("You chose {} {}", choice.emoji(), choice)
        }
        ClientResponse::ComputerThinking => "Computer is thinking... 🤔".to_owned(),
        ClientResponse::ComputerChoice { choice } => {
            format!("Computer chose {} {}", choice.emoji(), choice)
        }
        ClientResponse::RoundResult { text, .. } | ClientResponse::FinalResult { text, .. } => {
            text.clone()
        }
        ClientResponse::Scores {
            player,
            computer,
            round,
        } => format!("Score: You {} - {} Computer | Round {}", player, computer, round),
        ClientResponse::InputEnabled { enabled: false } => {
            "Type 'again' to play another match.".to_owned()
        }
        ClientResponse::InputEnabled { enabled: true } => return None,
        ClientResponse::GameReset => "New match!".to_owned(),
        ClientResponse::Decoration { decoration } => match decoration {
            Decoration::Confetti { pieces } => "🎊".repeat(usize::from(*pieces).min(10)),
            Decoration::MegaConfetti { pieces } => "🎉".repeat(usize::from(*pieces).min(20)),
            Decoration::Sparkles { side, pieces } => {
                format!("{} {}", "✨".repeat(usize::from(*pieces)), side_name(*side))
            }
            Decoration::PulseWinner { side } => format!("⭐ {} ⭐", side_name(*side)),
        },
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use common::model::{game::Outcome, settings::Theme};

    use super::*;

    #[test]
    fn single_letters_choose() {
        assert_eq!(
            parse_command(" R "),
            Some(Command::Request(ClientRequest::Choose {
                choice: Choice::Rock
            }))
        );
        assert_eq!(
            parse_command("Scissors"),
            Some(Command::Request(ClientRequest::Choose {
                choice: Choice::Scissors
            }))
        );
    }

    #[test]
    fn volume_takes_a_clamped_percentage() {
        assert_eq!(
            parse_command("vol 40"),
            Some(Command::Request(ClientRequest::SetVolume { percent: 40 }))
        );
        assert_eq!(
            parse_command("volume 400"),
            Some(Command::Request(ClientRequest::SetVolume { percent: 100 }))
        );
        assert_eq!(parse_command("vol loud"), None);
        assert_eq!(parse_command("vol"), None);
    }

    #[test]
    fn blank_and_unknown_lines_are_ignored() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("lizard"), None);
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("?"), Some(Command::Help));
    }

    #[test]
    fn renders_scores_and_results() {
        assert_eq!(
            render(&ClientResponse::Scores {
                player: 2,
                computer: 1,
                round: 4
            })
            .as_deref(),
            Some("Score: You 2 - 1 Computer | Round 4")
        );
        assert_eq!(
            render(&ClientResponse::final_result(Outcome::Computer)).as_deref(),
            Some("💻 Game Over! Computer Wins The Game! 💻")
        );
        assert_eq!(
            render(&ClientResponse::ThemeChanged { theme: Theme::Dark }).as_deref(),
            Some("☀️ Theme: dark")
        );
    }

    #[test]
    fn highlights_have_no_line() {
        assert_eq!(render(&ClientResponse::SelectionCleared), None);
        assert_eq!(
            render(&ClientResponse::ChoiceSelected {
                choice: Choice::Paper
            }),
            None
        );
    }

    #[test]
    fn settings_show_percent() {
        assert_eq!(
            render(&ClientResponse::SettingsChanged {
                settings: Settings {
                    animations: false,
                    sounds: true,
                    volume: 0.3
                }
            })
            .as_deref(),
            Some("Settings: animations off, sounds on, volume 30%")
        );
    }
}
