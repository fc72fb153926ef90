//! Core types shared across the engine and adapter
//! This module contains pure data types with no game logic

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Nominal frame duration at 60 fps; gravity is expressed in cells per frame
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Lock delay timing
pub const LOCK_DELAY_MS: u32 = 500;
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Gravity curve: starts slow, scales with level, hard cap at 20G
pub const INITIAL_GRAVITY: f32 = 0.05;
pub const GRAVITY_PER_LEVEL: f32 = 0.02;
pub const MAX_GRAVITY: f32 = 20.0;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Probability of receiving an item on piece lock (item mode only)
pub const ITEM_DROP_CHANCE: f32 = 0.15;

/// Spawn column for new pieces (leftmost mino column)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2 - 1) as i8;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in bag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Wire code for the grid payload (1-7; 0 is empty, 8 is garbage)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Numeric state (0-3), matching the wire convention
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Game actions accepted from the host input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    UseItem,
    FixGhost,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "useitem" => Some(GameAction::UseItem),
            "fixghost" => Some(GameAction::FixGhost),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::UseItem => "useItem",
            GameAction::FixGhost => "fixGhost",
        }
    }
}

/// T-Spin detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TSpinKind {
    None,
    Mini,
    Full,
}

impl TSpinKind {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }
}

/// What a locked cell holds: a piece mino or a garbage block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMarker {
    Piece(PieceKind),
    Garbage,
}

impl CellMarker {
    /// Wire code (1-7 piece, 8 garbage)
    pub fn code(&self) -> u8 {
        match self {
            CellMarker::Piece(kind) => kind.code(),
            CellMarker::Garbage => GARBAGE_CODE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        if code == GARBAGE_CODE {
            Some(CellMarker::Garbage)
        } else {
            PieceKind::from_code(code).map(CellMarker::Piece)
        }
    }
}

/// Cell on the board (None = empty)
pub type Cell = Option<CellMarker>;

/// Wire code for garbage cells
pub const GARBAGE_CODE: u8 = 8;

/// Per-line score base, indexed by lines cleared minus one (multiplied by level)
pub const LINE_SCORES: [u32; 4] = [100, 300, 500, 800];

/// Score granted per attack line sent
pub const ATTACK_SCORE: u32 = 50;


/// Flat score for a perfect clear (multiplied by level)
pub const PERFECT_CLEAR_SCORE: u32 = 2000;
