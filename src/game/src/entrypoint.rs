use std::time::Duration;

use super::service::game_thread::GameThread;
use super::storage::KeyValueStore;
use agent::strategy::{RandomMove, Strategy};
use common::model::messages::{ClientRequest, ClientResponse};
use sound::AudioBackend;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, Level};

/// Presentation pacing. None of these can be skipped by the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// Choice submitted -> computer choice shown
    pub reveal: Duration,
    /// Choice submitted -> round outcome shown
    pub resolve: Duration,
    /// Last round resolved -> final result shown
    pub final_result: Duration,
    /// Choice submitted -> button highlight removed
    pub selection_clear: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            reveal: Duration::from_millis(1000),
            resolve: Duration::from_millis(1200),
            final_result: Duration::from_millis(1500),
            selection_clear: Duration::from_millis(2000),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub db_url: String,
    pub max_rounds: u8,
    pub timing: Timing,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            db_url: "rps.db".to_owned(),
            max_rounds: 5,
            timing: Timing::default(),
        }
    }
}

/// The pluggable parts of a session.
pub struct Components {
    pub storage: Box<dyn KeyValueStore + Send>,
    pub opponent: Box<dyn Strategy + Send>,
    pub audio: Option<Box<dyn AudioBackend + Send>>,
}

impl Components {
    /// Random opponent, no audio output.
    pub fn new(storage: Box<dyn KeyValueStore + Send>) -> Self {
        Components {
            storage,
            opponent: Box::new(RandomMove::default()),
            audio: None,
        }
    }

    pub fn with_opponent(self, opponent: Box<dyn Strategy + Send>) -> Self {
        Components { opponent, ..self }
    }

    pub fn with_audio(self, audio: Box<dyn AudioBackend + Send>) -> Self {
        Components {
            audio: Some(audio),
            ..self
        }
    }
}

pub async fn serve(
    config: GameConfig,
    components: Components,
    shutdown_receiver: broadcast::Receiver<()>,
    from_client: mpsc::Receiver<ClientRequest>,
    to_client: mpsc::Sender<ClientResponse>,
    ready_signal: Option<oneshot::Sender<()>>,
) {
    let mut game_shutdown_receiver = shutdown_receiver.resubscribe();

    // One game thread per session
    let game_thread = GameThread::new(&config, components, to_client);
    let game_handle: JoinHandle<()> = tokio::spawn(async move {
        game_thread
            .run(&mut game_shutdown_receiver, from_client)
            .await
    });

    // Signal that the game is ready
    if let Some(ready_signal) = ready_signal {
        info!("Sent ready");
        if ready_signal.send(()).is_err() {
            error!("Nobody is waiting for the ready signal");
        }
    }

    if let Err(e) = game_handle.await {
        error!("Game thread exited non-gracefully: {}", e);
    }
}

/// A running session with both ends of its channels, for tests and embedders.
pub struct GameServer {
    pub to_game: mpsc::Sender<ClientRequest>,
    pub from_game: mpsc::Receiver<ClientResponse>,
    shutdown_sender: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl GameServer {
    pub async fn new(config: GameConfig, components: Components) -> Self {
        // Init logging, ignore error if already set
        let _ = tracing_subscriber::fmt()
            .with_line_number(true)
            .with_file(true)
            .with_max_level(Level::DEBUG)
            .try_init();

        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (ready_sender, ready_receiver) = oneshot::channel();
        let (to_game, from_client) = mpsc::channel(100);
        let (to_client, from_game) = mpsc::channel(100);

        let handle = tokio::spawn(serve(
            config,
            components,
            shutdown_receiver,
            from_client,
            to_client,
            Some(ready_sender),
        ));

        // Wait for the game to be ready
        ready_receiver.await.expect("Game failed to start");

        GameServer {
            to_game,
            from_game,
            shutdown_sender,
            handle,
        }
    }

    pub async fn shutdown(self) {
        self.shutdown_sender.send(()).expect("Failed to shutdown");
        self.handle.await.expect("Game exited non-gracefully");
    }
}

#[cfg(test)]
mod tests {
    use agent::strategy::Always;
    use common::{model::game::Choice, test::TestCase};

    use super::*;
    use crate::{service::settings_store::SETTINGS_KEY, storage::MemoryStore};

    fn scenario(name: &str) -> String {
        env!("CARGO_MANIFEST_DIR").to_string() + "/test/data/" + name
    }

    // Animations off keeps decorations out of the transcript
    fn quiet_storage() -> MemoryStore {
        MemoryStore::new().with_entry(
            SETTINGS_KEY,
            r#"{"animations": false, "sounds": true, "volume": 0.5}"#,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn rock_sweeps_a_scissors_opponent() {
        let components = Components::new(Box::new(quiet_storage()))
            .with_opponent(Box::new(Always(Choice::Scissors)));
        let mut server = GameServer::new(GameConfig::default(), components).await;

        let test_case = TestCase::<ClientRequest, ClientResponse>::load(
            scenario("rock_sweep.json"),
            Vec::<(String, String)>::new(),
        );
        test_case.run(&server.to_game, &mut server.from_game).await;
        server.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn tied_single_round_match_then_replay() {
        let config = GameConfig {
            max_rounds: 1,
            ..Default::default()
        };
        let components = Components::new(Box::new(quiet_storage()))
            .with_opponent(Box::new(Always(Choice::Paper)));
        let mut server = GameServer::new(config, components).await;

        let test_case = TestCase::<ClientRequest, ClientResponse>::load(
            scenario("single_round_tie.json"),
            vec![("choice", "paper")],
        );
        test_case.run(&server.to_game, &mut server.from_game).await;
        server.shutdown().await;
    }
}
