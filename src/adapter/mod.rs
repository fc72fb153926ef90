//! Wire boundary between the game engine and the battle server.

pub mod protocol;

pub use protocol::{
    apply_inbound, decode_inbound, encode_outbound, outbound_from_event, update_grid_message,
    InboundMessage, ItemChangeKind, OutboundMessage, WireGrid,
};
