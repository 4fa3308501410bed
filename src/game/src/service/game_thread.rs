use common::model::{
    messages::{ClientRequest, ClientResponse},
    settings::{Settings, SettingsPatch},
};
use sound::SoundGenerator;
use tokio::{
    sync::{
        broadcast,
        mpsc::{Receiver, Sender},
    },
    time::{self, Instant},
};
use tracing::{debug, info};

use crate::{
    entrypoint::{Components, GameConfig},
    model::internal::{Effect, TimerEvent},
    service::{
        scheduler::TimerQueue, sequencer::MatchSequencer, settings_store::SettingsStore,
    },
};

/// Owns one game session: the match, the settings and the sound output.
/// Requests come in on a channel, presentation updates go out on another.
pub struct GameThread {
    sequencer: MatchSequencer,
    settings_store: SettingsStore,
    sound: SoundGenerator,
    timers: TimerQueue<TimerEvent>,
    to_client: Sender<ClientResponse>,
}

impl GameThread {
    pub fn new(
        config: &GameConfig,
        components: Components,
        to_client: Sender<ClientResponse>,
    ) -> Self {
        let Components {
            storage,
            opponent,
            audio,
        } = components;
        GameThread {
            sequencer: MatchSequencer::new(config.max_rounds, config.timing.clone(), opponent),
            settings_store: SettingsStore::new(storage),
            sound: SoundGenerator::new(audio),
            timers: TimerQueue::new(),
            to_client,
        }
    }

    pub async fn run(
        mut self,
        shutdown_receiver: &mut broadcast::Receiver<()>,
        mut from_client: Receiver<ClientRequest>,
    ) {
        let start = Instant::now();
        self.start().await;
        info!("Game thread started, match {}", self.sequencer.state().id);
        loop {
            let next_due = self.timers.next_due();
            tokio::select! {
                request = from_client.recv() => {
                    let Some(request) = request else {
                        debug!("Client hung up");
                        break;
                    };
                    // Catch up first so new delays count from now
                    self.fire_timers(start.elapsed()).await;
                    self.handle_request(request).await;
                }
                _ = time::sleep_until(start + next_due.unwrap_or_default()), if next_due.is_some() => {
                    self.fire_timers(start.elapsed()).await;
                }
                _ = shutdown_receiver.recv() => {
                    break;
                }
            }
        }
        info!("Exited game thread");
    }

    async fn start(&mut self) {
        let settings = self.settings_store.load();
        self.apply(settings);
        let theme = self.settings_store.load_theme();
        let scores = self.sequencer.state().scores();
        self.send(ClientResponse::ThemeChanged { theme }).await;
        self.send(ClientResponse::SettingsChanged { settings }).await;
        self.send(scores).await;
        self.send(ClientResponse::instructions()).await;
    }

    async fn fire_timers(&mut self, now: std::time::Duration) {
        while let Some(event) = self.timers.pop_next_due(now) {
            let effects = self.sequencer.on_timer(event, &mut self.timers);
            self.perform(effects).await;
        }
    }

    async fn handle_request(&mut self, request: ClientRequest) {
        debug!("request: {:?}", request);
        match request {
            ClientRequest::Choose { choice } => {
                let effects = self.sequencer.play_round(choice, &mut self.timers);
                self.perform(effects).await;
            }
            ClientRequest::PlayAgain => {
                let effects = self.sequencer.reset_game();
                self.perform(effects).await;
            }
            ClientRequest::ToggleTheme => {
                let theme = self.settings_store.toggle_theme();
                self.send(ClientResponse::ThemeChanged { theme }).await;
            }
            ClientRequest::ToggleAnimations => {
                let animations = self.settings_store.settings().animations;
                self.update_settings(SettingsPatch::animations(!animations)).await;
            }
            ClientRequest::ToggleSounds => {
                let sounds = self.settings_store.settings().sounds;
                self.update_settings(SettingsPatch::sounds(!sounds)).await;
            }
            ClientRequest::SetVolume { percent } => {
                let patch = SettingsPatch::volume(f32::from(percent) / 100.0);
                self.update_settings(patch).await;
            }
        }
    }

    async fn update_settings(&mut self, patch: SettingsPatch) {
        let settings = self.settings_store.update(patch);
        self.apply(settings);
        self.send(ClientResponse::SettingsChanged { settings }).await;
    }

    // Persisted first, then pushed into the sound output
    fn apply(&mut self, settings: Settings) {
        self.sound.set_enabled(settings.sounds);
        self.sound.set_volume(settings.volume);
    }

    async fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Client(response) => self.send(response).await,
                Effect::Sound(sound) => self.sound.play(sound),
                Effect::Decoration(decoration) => {
                    if self.settings_store.settings().animations {
                        self.send(ClientResponse::Decoration { decoration }).await;
                    }
                }
            }
        }
    }

    async fn send(&mut self, response: ClientResponse) {
        if let Err(e) = self.to_client.send(response).await {
            debug!("Client is gone, dropped {:?}", e.0);
        }
    }
}
