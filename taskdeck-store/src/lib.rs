//! taskdeck-store: remote API clients and the board state controller

pub mod board;
pub mod characters;
pub mod remote;

pub use board::{Board, EditSession, Notice};
pub use characters::{Character, search_characters};
pub use remote::{RemoteTaskStore, TaskStore};
