pub mod entrypoint;
pub mod model;
pub mod service;
pub mod storage;
pub mod terminal;
