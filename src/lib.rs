pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod game;
pub mod persistence;
pub mod session;
pub mod types;
pub mod ui;

pub use error::GameError;
pub use game::Game;

#[cfg(test)]
mod config_test;
