//! Wire protocol tests: decoding server payloads and encoding ours

use tetris_battle::adapter::{
    apply_inbound, decode_inbound, encode_outbound, outbound_from_event, update_grid_message,
    InboundMessage, OutboundMessage,
};
use tetris_battle::core::{Engine, EngineEvent, ItemKind};
use tetris_battle::types::GameAction;

#[test]
fn test_server_payloads_decode() {
    let cases = [
        r#"{"type":"receive_attack","from_name":"rival","lines":2}"#,
        r#"{"type":"item_attack","item_type":"destroy"}"#,
        r#"{"type":"item_change","change_type":"to_clear"}"#,
        r#"{"type":"game_start","item_mode":true}"#,
    ];
    for json in cases {
        decode_inbound(json).unwrap_or_else(|e| panic!("failed on {json}: {e}"));
    }
}

#[test]
fn test_decode_rejects_garbage_input() {
    assert!(decode_inbound("").is_err());
    assert!(decode_inbound("[]").is_err());
    assert!(decode_inbound(r#"{"lines":2}"#).is_err());
    assert!(decode_inbound(r#"{"type":"receive_attack"}"#).is_err());
}

#[test]
fn test_outbound_wire_shape() {
    // Lobby client ids are opaque strings and pass through untouched
    let json = encode_outbound(&OutboundMessage::Attack {
        target_id: "player_1700000000_k3x".to_string(),
        lines: 4,
        combo: 0,
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "attack");
    assert_eq!(value["target_id"], "player_1700000000_k3x");

    let json = encode_outbound(&OutboundMessage::ItemAttack {
        target_id: "player_1700000000_k3x".to_string(),
        item_type: ItemKind::AdvancePiece,
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["item_type"], "random");
}

#[test]
fn test_attack_flows_from_one_engine_to_another() {
    let mut receiver = Engine::new(2);

    // Simulate an opponent clearing lines worth two attack rows
    let event = EngineEvent::Attack { lines: 2, combo: 1 };
    let message = outbound_from_event(event, "player_1700000001_9fz");
    let json = encode_outbound(&message).unwrap();

    // The server relays it to the target as receive_attack
    let relayed = match decode_inbound(
        &json.replace(r#""type":"attack""#, r#""type":"receive_attack""#),
    ) {
        Ok(msg) => msg,
        Err(e) => panic!("relay decode failed: {e}"),
    };
    apply_inbound(&mut receiver, relayed);
    assert_eq!(receiver.pending_garbage(), 2);
}

#[test]
fn test_grid_swap_payload_installs_opponent_grid() {
    let mut donor = Engine::new(10);
    for _ in 0..3 {
        donor.apply_action(GameAction::HardDrop);
    }
    let grid = donor.board().to_wire();

    let mut receiver = Engine::new(11);
    apply_inbound(&mut receiver, InboundMessage::GridSwap { grid: grid.clone() });

    // The received grid lost its bottom two rows; everything above moved down
    let installed = receiver.board().to_wire();
    assert_eq!(installed[0], vec![0u8; 10]);
    assert_eq!(installed[1], vec![0u8; 10]);
    assert_eq!(&installed[2..], &grid[..18]);
}

#[test]
fn test_update_grid_roundtrips_through_json() {
    let mut engine = Engine::new(3);
    engine.apply_action(GameAction::SoftDrop);
    engine.apply_action(GameAction::HardDrop);

    let message = update_grid_message(&engine);
    let json = encode_outbound(&message).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "update_grid");
    assert_eq!(value["score"], engine.score() as i64);
    assert_eq!(value["grid"].as_array().unwrap().len(), 20);
}

#[test]
fn test_game_over_event_becomes_wire_message() {
    let message = outbound_from_event(EngineEvent::GameOver, "p5");
    assert_eq!(message, OutboundMessage::GameOver);
    assert_eq!(encode_outbound(&message).unwrap(), r#"{"type":"game_over"}"#);
}
