//! Core module - pure game logic with no external I/O
//!
//! This module contains all the game rules and state management. It knows
//! nothing about sockets or serialization; side effects leave through
//! `EngineEvent`s.

pub mod attack;
pub mod board;
pub mod engine;
pub mod items;
pub mod pieces;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use attack::AttackConfig;
pub use board::Board;
pub use engine::{Engine, EngineEvent, Tetromino};
pub use items::{ItemCategory, ItemKind};
pub use pieces::{get_shape, try_rotate};
pub use rng::{PieceBag, SimpleRng};
pub use snapshot::GameSnapshot;
