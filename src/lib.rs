pub mod config;
pub mod errors;
pub mod models;
pub mod player;
pub mod services;
pub mod sources;
pub mod state;
pub mod storage;
pub mod streaming;
