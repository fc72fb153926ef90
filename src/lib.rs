//! Headless multiplayer Tetris battle engine.
//!
//! `core` holds the deterministic game rules (board, SRS rotation, 7-bag
//! randomizer, attack calculus, items); `adapter` maps engine state and
//! events onto the JSON battle protocol. The host owns the actual transport.

pub mod adapter;
pub mod core;
pub mod types;

pub use crate::core::{AttackConfig, Engine, EngineEvent, GameSnapshot, ItemKind};
pub use types::{GameAction, PieceKind, Rotation, TSpinKind};
