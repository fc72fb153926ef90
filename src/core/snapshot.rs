use crate::core::{ItemKind, Tetromino};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Allocation-free view of a session, refreshed in place every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: Option<PieceKind>,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub back_to_back: u32,
    pub pending_garbage: u32,
    pub incoming_garbage: u32,
    pub attack_sent: u32,
    pub attack_received: u32,
    pub item: Option<ItemKind>,
    pub ghost_mode: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.next = None;
        self.can_hold = true;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.back_to_back = 0;
        self.pending_garbage = 0;
        self.incoming_garbage = 0;
        self.attack_sent = 0;
        self.attack_received = 0;
        self.item = None;
        self.ghost_mode = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: None,
            can_hold: true,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            back_to_back: 0,
            pending_garbage: 0,
            incoming_garbage: 0,
            attack_sent: 0,
            attack_received: 0,
            item: None,
            ghost_mode: false,
        }
    }
}
