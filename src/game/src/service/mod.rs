pub mod game_thread;
pub mod scheduler;
pub mod sequencer;
pub mod settings_store;
