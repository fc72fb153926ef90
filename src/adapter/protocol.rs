//! JSON wire messages exchanged with the battle server.
//!
//! Outbound messages carry this player's attacks and board updates to the
//! lobby; inbound messages deliver opponents' attacks, item effects, and
//! match control. Every payload is a single JSON object with a `type` tag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Engine, EngineEvent, ItemKind};

/// A 20x10 cell grid in wire form. 0 = empty, 1-7 = piece kinds in
/// I, O, T, L, J, S, Z order, 8 = garbage.
pub type WireGrid = Vec<Vec<u8>>;

// ============== Game -> Server Messages ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Cleared lines converted to garbage aimed at `target_id`.
    Attack {
        target_id: String,
        lines: u32,
        combo: u32,
    },
    /// Full board state broadcast so opponents can render this player.
    UpdateGrid {
        grid: WireGrid,
        score: u32,
        level: u32,
        lines: u32,
        combo: u32,
    },
    /// An offensive item fired at `target_id`.
    ItemAttack {
        target_id: String,
        item_type: ItemKind,
    },
    /// Both players' grids traded; `grid` is this player's board at the
    /// moment of the swap.
    GridSwap { target_id: String, grid: WireGrid },
    /// This player topped out.
    GameOver,
}

// ============== Server -> Game Messages ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Garbage lines sent by an opponent.
    ReceiveAttack {
        #[serde(default)]
        from_name: Option<String>,
        lines: u32,
        #[serde(default)]
        combo: u32,
    },
    /// An offensive item used against this player.
    ItemAttack { item_type: ItemKind },
    /// The server swapped this player's grid with an opponent's.
    GridSwap { grid: WireGrid },
    /// Match-wide item rule change.
    ItemChange { change_type: ItemChangeKind },
    /// Match start with the negotiated rule set.
    GameStart {
        #[serde(default)]
        item_mode: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemChangeKind {
    /// All held items across the match become garbage-clear items.
    #[serde(rename = "to_clear")]
    ToClear,
}

// ============== Encoding / Decoding ==============

pub fn encode_outbound(message: &OutboundMessage) -> Result<String> {
    serde_json::to_string(message).context("failed to encode outbound message")
}

pub fn decode_inbound(json: &str) -> Result<InboundMessage> {
    serde_json::from_str(json).context("failed to decode inbound message")
}

// ============== Engine Bridging ==============

/// Convert an engine event into the wire message it implies, if any.
///
/// `Attack` and `ItemAttack` events need a target chosen by the caller
/// (the lobby assigns opaque string ids); `GridSwap` and `GameOver` carry
/// everything they need.
pub fn outbound_from_event(event: EngineEvent, target_id: &str) -> OutboundMessage {
    match event {
        EngineEvent::Attack { lines, combo } => OutboundMessage::Attack {
            target_id: target_id.to_owned(),
            lines,
            combo,
        },
        EngineEvent::ItemAttack { item } => OutboundMessage::ItemAttack {
            target_id: target_id.to_owned(),
            item_type: item,
        },
        EngineEvent::GridSwap { grid } => OutboundMessage::GridSwap {
            target_id: target_id.to_owned(),
            grid,
        },
        EngineEvent::GameOver => OutboundMessage::GameOver,
    }
}

/// Build the periodic board broadcast for the current engine state.
pub fn update_grid_message(engine: &Engine) -> OutboundMessage {
    OutboundMessage::UpdateGrid {
        grid: engine.board().to_wire(),
        score: engine.score(),
        level: engine.level(),
        lines: engine.lines(),
        combo: engine.combo(),
    }
}

/// Feed a decoded server message into the engine.
pub fn apply_inbound(engine: &mut Engine, message: InboundMessage) {
    match message {
        // The sender's combo is informational; only the line count matters here
        InboundMessage::ReceiveAttack { lines, .. } => engine.receive_attack(lines),
        InboundMessage::ItemAttack { item_type } => engine.receive_item_effect(item_type),
        InboundMessage::GridSwap { grid } => {
            engine.receive_grid_swap(&grid);
        }
        InboundMessage::ItemChange {
            change_type: ItemChangeKind::ToClear,
        } => engine.receive_item_effect(ItemKind::ConvertItems),
        InboundMessage::GameStart { item_mode } => engine.set_item_mode(item_mode),
    }
}
