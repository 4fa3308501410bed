use std::io::BufRead;

use clap::Parser;
use common::model::messages::ClientRequest;
use common::utility::create_shutdown_channel;
use game::entrypoint::{serve, Components, GameConfig};
use game::storage::SqliteStore;
use game::terminal::{parse_command, render, Command, HELP};
#[cfg(feature = "audio")]
use sound::AudioOutput;
use tokio::sync::{broadcast, mpsc};
#[cfg(feature = "audio")]
use tracing::warn;
use tracing::{debug, Level};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "rps", about = "Rock-Paper-Scissors against the computer")]
struct Args {
    /// SQLite file holding the theme and settings
    #[arg(long, default_value = "rps.db")]
    db: String,
    #[arg(long, default_value_t = 5)]
    rounds: u8,
    /// Logs go to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    // Config
    let config = GameConfig {
        db_url: args.db,
        max_rounds: args.rounds,
        ..Default::default()
    };
    let storage = SqliteStore::open(&config.db_url)?;
    let components = Components::new(Box::new(storage));
    // Held until the session ends, dropping it silences every sound
    #[cfg(feature = "audio")]
    let output = open_audio();
    #[cfg(feature = "audio")]
    let components = match &output {
        Some(output) => components.with_audio(Box::new(output.backend())),
        None => components,
    };

    let (shutdown_sender, shutdown_receiver) = create_shutdown_channel();
    let (to_game, from_client) = mpsc::channel(100);
    let (to_client, mut from_game) = mpsc::channel(100);

    let printer_handle = tokio::spawn(async move {
        while let Some(response) = from_game.recv().await {
            if let Some(line) = render(&response) {
                println!("{}", line);
            }
        }
    });
    spawn_input_thread(to_game, shutdown_sender);

    serve(config, components, shutdown_receiver, from_client, to_client, None).await;
    printer_handle.await?;
    Ok(())
}

#[cfg(feature = "audio")]
fn open_audio() -> Option<AudioOutput> {
    match AudioOutput::open() {
        Ok(output) => Some(output),
        Err(e) => {
            warn!("Failed to open audio output: {}", e);
            None
        }
    }
}

// Blocking stdin lives on its own thread so it never holds up runtime shutdown
fn spawn_input_thread(to_game: mpsc::Sender<ClientRequest>, shutdown_sender: broadcast::Sender<()>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Some(Command::Request(request)) => {
                    if to_game.blocking_send(request).is_err() {
                        break;
                    }
                }
                Some(Command::Help) => println!("{}", HELP),
                Some(Command::Quit) => break,
                None if line.trim().is_empty() => {}
                None => println!("Unknown command {:?}, type 'help'", line.trim()),
            }
        }
        debug!("Input closed");
        // The game may already be gone
        let _ = shutdown_sender.send(());
    });
}
