//! Full-session tests driving the engine through its public surface

use tetris_battle::core::{Engine, EngineEvent};
use tetris_battle::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH, GARBAGE_CODE};

#[test]
fn test_session_starts_with_active_piece() {
    let engine = Engine::new(12345);
    assert!(!engine.game_over());
    let active = engine.active().expect("piece spawns on start");
    assert_eq!(active.x, (BOARD_WIDTH / 2 - 1) as i8);
    assert_eq!(active.y, 0);
    assert!(engine.can_hold());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 1);
}

#[test]
fn test_actions_move_the_piece() {
    let mut engine = Engine::new(12345);
    let start = engine.active().unwrap();

    assert!(engine.apply_action(GameAction::MoveLeft));
    assert_eq!(engine.active().unwrap().x, start.x - 1);

    assert!(engine.apply_action(GameAction::MoveRight));
    assert_eq!(engine.active().unwrap().x, start.x);

    assert!(engine.apply_action(GameAction::SoftDrop));
    assert_eq!(engine.active().unwrap().y, start.y + 1);
    // Movement never scores on its own
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_piece_stops_at_the_left_wall() {
    let mut engine = Engine::new(12345);
    for _ in 0..BOARD_WIDTH {
        engine.apply_action(GameAction::MoveLeft);
    }
    let x = engine.active().unwrap().x;
    assert!(!engine.apply_action(GameAction::MoveLeft));
    assert_eq!(engine.active().unwrap().x, x);
}

#[test]
fn test_hard_drop_locks_and_spawns_next() {
    let mut engine = Engine::new(12345);
    let first = engine.active().unwrap().kind;
    let next = engine.next_piece();

    engine.apply_action(GameAction::HardDrop);

    // The queued piece became active and some cells of the first piece
    // reached the stack
    assert_eq!(engine.active().unwrap().kind, next);
    // Pieces within one bag never repeat
    assert_ne!(engine.active().unwrap().kind, first);
    let occupied = engine
        .board()
        .cells()
        .iter()
        .filter(|cell| cell.is_some())
        .count();
    assert_eq!(occupied, 4);
}

#[test]
fn test_hold_swaps_with_queue_once_per_piece() {
    let mut engine = Engine::new(777);
    let first = engine.active().unwrap().kind;
    let next = engine.next_piece();

    assert!(engine.apply_action(GameAction::Hold));
    assert_eq!(engine.held_piece(), Some(first));
    assert_eq!(engine.active().unwrap().kind, next);
    assert!(!engine.can_hold());
    assert!(!engine.apply_action(GameAction::Hold));

    // Locking re-arms hold, and the next swap stores the piece that was
    // active at that moment
    engine.apply_action(GameAction::HardDrop);
    assert!(engine.can_hold());
    let active_now = engine.active().unwrap().kind;
    assert!(engine.apply_action(GameAction::Hold));
    assert_eq!(engine.held_piece(), Some(active_now));
    assert_eq!(engine.active().unwrap().kind, first);
}

#[test]
fn test_gravity_descends_over_time() {
    let mut engine = Engine::new(1);
    let start_y = engine.active().unwrap().y;
    // Initial gravity is a fraction of a cell per frame; a second of ticks
    // must move the piece at least once
    for _ in 0..60 {
        engine.tick(16);
    }
    assert!(engine.active().unwrap().y > start_y);
}

#[test]
fn test_received_attack_materializes_garbage_after_lock() {
    let mut engine = Engine::new(9);
    engine.receive_attack(2);
    assert_eq!(engine.pending_garbage(), 2);

    engine.apply_action(GameAction::HardDrop);

    assert_eq!(engine.pending_garbage(), 0);
    assert_eq!(engine.attack_received(), 2);

    // Bottom two rows are garbage with exactly one hole each
    let wire = engine.board().to_wire();
    for y in [BOARD_HEIGHT as usize - 2, BOARD_HEIGHT as usize - 1] {
        let holes = wire[y].iter().filter(|&&code| code == 0).count();
        let garbage = wire[y].iter().filter(|&&code| code == GARBAGE_CODE).count();
        assert_eq!(holes, 1, "row {y} must keep one open column");
        assert_eq!(garbage as u8 + holes as u8, BOARD_WIDTH);
    }
}

#[test]
fn test_stacking_without_clearing_tops_out() {
    let mut engine = Engine::new(4242);
    for _ in 0..300 {
        engine.apply_action(GameAction::HardDrop);
        if engine.game_over() {
            break;
        }
    }
    assert!(engine.game_over());

    let events = engine.drain_events();
    let game_overs = events
        .iter()
        .filter(|event| matches!(event, EngineEvent::GameOver))
        .count();
    assert_eq!(game_overs, 1, "top-out must be reported exactly once");

    // A dead session ignores further input
    assert!(!engine.apply_action(GameAction::MoveLeft));
    assert_eq!(engine.tick(16), 0);
}

#[test]
fn test_swapped_in_grid_arriving_full_clears_on_next_lock() {
    // An opponent can hand over a grid that is already stacked with full
    // rows; the next lock clears all of them at once
    let mut engine = Engine::new(5);
    assert!(engine.receive_grid_swap(&vec![vec![GARBAGE_CODE; 10]; 20]));
    engine.apply_action(GameAction::HardDrop);
    assert_eq!(engine.lines(), 18);
    assert!(!engine.game_over());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Engine::new(31337);
    let mut b = Engine::new(31337);
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::HardDrop,
    ];
    for action in script {
        a.apply_action(action);
        b.apply_action(action);
        a.tick(16);
        b.tick(16);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_mirrors_engine_state() {
    let mut engine = Engine::new(55);
    engine.apply_action(GameAction::SoftDrop);
    engine.apply_action(GameAction::Hold);

    let snapshot = engine.snapshot();
    assert!(snapshot.playable());
    assert_eq!(snapshot.score, engine.score());
    assert_eq!(snapshot.hold, engine.held_piece());
    assert_eq!(snapshot.next, Some(engine.next_piece()));
    assert!(!snapshot.can_hold);

    let active = snapshot.active.expect("active piece in snapshot");
    assert_eq!(active.kind, engine.active().unwrap().kind);
    assert_eq!(active.y, engine.active().unwrap().y);

    let ghost = snapshot.ghost_y.expect("ghost for active piece");
    assert!(ghost >= active.y);
}
