//! Engine module - one player's complete battle session
//!
//! Ties together board, pieces, RNG, attack calculus and items. Commands are
//! silent no-ops when they cannot apply; `game_over` is one-way. Outbound
//! side effects (attacks, item attacks, grid swaps) are queued as events and
//! drained by the host, which owns the network.

use crate::core::{
    attack::{gravity_for_level, level_for_lines, line_clear_score, AttackConfig},
    get_shape, try_rotate, Board, ItemCategory, ItemKind, PieceBag, SimpleRng,
};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: 0,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> [(i8, i8); 4] {
        get_shape(self.kind, self.rotation)
    }

    fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Outbound side effect queued for the host
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Attack lines to deliver to the current target
    Attack { lines: u32, combo: u32 },
    /// Attack item to deliver to the current target
    ItemAttack { item: ItemKind },
    /// Our grid, offered to the grid-swap target
    GridSwap { grid: Vec<Vec<u8>> },
    /// The session ended (emitted exactly once)
    GameOver,
}

/// Complete session state for one player
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    active: Option<Tetromino>,
    held: Option<PieceKind>,
    next: PieceKind,
    bag: PieceBag,
    /// Drives garbage holes and item rolls, independent of the piece bag
    rng: SimpleRng,
    attack_cfg: AttackConfig,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    back_to_back: u32,
    last_clear_was_difficult: bool,
    /// Garbage waiting to materialize on the next lock
    pending_garbage: u32,
    /// Garbage deferred while a combo is running
    incoming_garbage: u32,
    attack_sent: u32,
    attack_received: u32,
    gravity: f32,
    gravity_counter: f32,
    on_ground: bool,
    lock_timer_ms: u32,
    lock_reset_count: u8,
    can_hold: bool,
    game_over: bool,
    item_mode: bool,
    item: Option<ItemKind>,
    attack_boost: u32,
    ghost_mode: bool,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Create a new session with the given RNG seed; the first piece is
    /// active immediately
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, AttackConfig::default())
    }

    /// Create a new session with custom attack tunables
    pub fn with_config(seed: u32, attack_cfg: AttackConfig) -> Self {
        let mut bag = PieceBag::new(seed);
        let active = Tetromino::spawn(bag.draw());
        let next = bag.draw();

        Self {
            board: Board::new(),
            active: Some(active),
            held: None,
            next,
            bag,
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
            attack_cfg,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            back_to_back: 0,
            last_clear_was_difficult: false,
            pending_garbage: 0,
            incoming_garbage: 0,
            attack_sent: 0,
            attack_received: 0,
            gravity: INITIAL_GRAVITY,
            gravity_counter: 0.0,
            on_ground: false,
            lock_timer_ms: 0,
            lock_reset_count: 0,
            can_hold: true,
            game_over: false,
            item_mode: false,
            item: None,
            attack_boost: 0,
            ghost_mode: false,
            events: Vec::new(),
        }
    }

    /// Enable or disable the item subsystem (decided by the room settings)
    pub fn set_item_mode(&mut self, enabled: bool) {
        self.item_mode = enabled;
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> u32 {
        self.back_to_back
    }

    pub fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    pub fn incoming_garbage(&self) -> u32 {
        self.incoming_garbage
    }

    pub fn attack_sent(&self) -> u32 {
        self.attack_sent
    }

    pub fn attack_received(&self) -> u32 {
        self.attack_received
    }

    pub fn item(&self) -> Option<ItemKind> {
        self.item
    }

    pub fn item_mode(&self) -> bool {
        self.item_mode
    }

    pub fn ghost_mode(&self) -> bool {
        self.ghost_mode
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active(&mut self, piece: Tetromino) {
        self.active = Some(piece);
    }

    #[cfg(test)]
    pub fn set_item(&mut self, item: Option<ItemKind>) {
        self.item = item;
    }

    /// Take all queued outbound events
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Refresh a snapshot in place (no allocation)
    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::ActiveSnapshot;

        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.held;
        out.next = Some(self.next);
        out.can_hold = self.can_hold;
        out.game_over = self.game_over;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.pending_garbage = self.pending_garbage;
        out.incoming_garbage = self.incoming_garbage;
        out.attack_sent = self.attack_sent;
        out.attack_received = self.attack_received;
        out.item = self.item;
        out.ghost_mode = self.ghost_mode;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a host-level action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::UseItem => self.use_item(),
            GameAction::FixGhost => self.fix_ghost(),
        }
    }

    /// Collision predicate for the active piece
    fn cell_open(board: &Board, ghost_mode: bool, x: i8, y: i8) -> bool {
        if ghost_mode {
            board.is_passable(x, y)
        } else {
            board.is_open(x, y)
        }
    }

    fn piece_fits(&self, piece: &Tetromino) -> bool {
        piece
            .shape()
            .iter()
            .all(|&(dx, dy)| Self::cell_open(&self.board, self.ghost_mode, piece.x + dx, piece.y + dy))
    }

    /// Whether the active piece can descend one row
    fn can_descend(&self) -> bool {
        match self.active {
            Some(piece) => self.piece_fits(&piece.offset(0, 1)),
            None => false,
        }
    }

    /// Recompute grounding after a successful lateral move or rotation.
    /// Grounded: the lock timer restarts and one reset is spent. Airborne:
    /// the lock delay state clears entirely.
    fn note_piece_adjusted(&mut self) {
        self.on_ground = !self.can_descend();
        self.lock_timer_ms = 0;
        if self.on_ground {
            self.lock_reset_count = self.lock_reset_count.saturating_add(1);
        } else {
            self.lock_reset_count = 0;
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.offset(dx, 0);
        if !self.piece_fits(&moved) {
            return false;
        }
        self.active = Some(moved);
        self.note_piece_adjusted();
        true
    }

    /// Descend one row; on failure the piece is grounded and the gravity
    /// accumulator is cleared
    fn move_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.offset(0, 1);
        if self.piece_fits(&moved) {
            self.active = Some(moved);
            self.on_ground = !self.can_descend();
            true
        } else {
            self.on_ground = true;
            self.gravity_counter = 0.0;
            false
        }
    }

    /// Player-driven descent. Only line clears and attacks score; the drop
    /// itself is free.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.move_down()
    }

    /// Drop to the floor and lock immediately; returns the attack sent
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over || self.active.is_none() {
            return 0;
        }
        while self.move_down() {}
        self.lock()
    }

    /// Rotate the active piece with SRS wall kicks
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        // O advances its rotation index without moving or kicking
        if active.kind == PieceKind::O {
            let rotation = if clockwise {
                active.rotation.rotate_cw()
            } else {
                active.rotation.rotate_ccw()
            };
            self.active = Some(Tetromino { rotation, ..active });
            return true;
        }

        let board = &self.board;
        let ghost_mode = self.ghost_mode;
        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| Self::cell_open(board, ghost_mode, x, y),
        );

        if let Some((_shape, rotation, (dx, dy))) = result {
            self.active = Some(Tetromino {
                rotation,
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            self.note_piece_adjusted();
            true
        } else {
            false
        }
    }

    /// Swap active piece with hold slot (once per placement)
    pub fn hold(&mut self) -> bool {
        if self.game_over || !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let swapped = match self.held {
            Some(kind) => Tetromino::spawn(kind),
            None => {
                let piece = Tetromino::spawn(self.next);
                self.next = self.bag.draw();
                piece
            }
        };
        self.held = Some(active.kind);

        if !self.piece_fits(&swapped) {
            self.active = Some(swapped);
            self.set_game_over();
            return false;
        }

        self.active = Some(swapped);
        self.can_hold = false;
        self.on_ground = !self.can_descend();
        true
    }

    /// Advance timers: gravity descent, then lock delay when grounded.
    /// Returns the attack sent if the piece locked this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if self.game_over || self.active.is_none() {
            return 0;
        }

        self.gravity_counter += self.gravity * elapsed_ms as f32 / FRAME_MS;
        while self.gravity_counter >= 1.0 {
            self.gravity_counter -= 1.0;
            if !self.move_down() {
                break;
            }
        }

        if self.on_ground {
            self.lock_timer_ms += elapsed_ms;
            if self.lock_timer_ms >= LOCK_DELAY_MS || self.lock_reset_count >= LOCK_RESET_LIMIT {
                return self.lock();
            }
        }

        0
    }

    /// Lock the active piece: merge, clear lines, resolve attack, roll an
    /// item, materialize pending garbage, then promote the next piece.
    /// Returns the attack lines sent.
    fn lock(&mut self) -> u32 {
        let Some(active) = self.active.take() else {
            return 0;
        };

        let tspin = self.t_spin_kind(&active);
        self.board
            .lock_piece(&active.shape(), active.x, active.y, CellMarker::Piece(active.kind));

        let mut attack = self.clear_lines(tspin);
        if attack > 0 && self.attack_boost > 0 {
            attack += self.attack_boost;
            self.attack_boost = 0;
        }

        self.roll_item();

        if self.pending_garbage > 0 {
            let rows = self.pending_garbage;
            self.pending_garbage = 0;
            self.apply_garbage(rows);
        }

        if attack > 0 {
            self.events.push(EngineEvent::Attack {
                lines: attack,
                combo: self.combo,
            });
        }

        self.can_hold = true;
        self.spawn_next();
        attack
    }

    /// Clear full rows and run the attack calculus. `tspin` is the
    /// classification of the lock that caused this clear.
    fn clear_lines(&mut self, tspin: TSpinKind) -> u32 {
        let cleared = self.board.clear_full_rows();
        let count = cleared.len() as u32;

        if count == 0 {
            // Combo break releases deferred garbage into the pending queue
            if self.combo > 0 {
                self.combo = 0;
                self.pending_garbage += self.incoming_garbage;
                self.incoming_garbage = 0;
            }
            return 0;
        }

        let perfect = self.board.is_empty();

        // Cleared lines cancel queued garbage before any attack goes out
        let cancelled = self.pending_garbage.min(count);
        self.pending_garbage -= cancelled;
        let effective = count - cancelled;

        let mut attack = 0;
        if effective > 0 {
            let (base, difficult) = self.attack_cfg.base_attack(effective, tspin);
            attack = base;
            self.combo += 1;

            if difficult && self.last_clear_was_difficult {
                self.back_to_back += 1;
                attack += self.attack_cfg.b2b_bonus;
            } else if !difficult {
                self.back_to_back = 0;
            }
            self.last_clear_was_difficult = difficult;

            attack += self.attack_cfg.combo_bonus(self.combo);

            if perfect {
                attack += self.attack_cfg.perfect_clear_bonus(count);
                self.score += PERFECT_CLEAR_SCORE * self.level;
            }
        }

        self.lines += count;
        self.score += line_clear_score(count, self.level);
        self.score += attack * ATTACK_SCORE;
        self.level = level_for_lines(self.lines);
        self.gravity = gravity_for_level(self.level);

        if attack > 0 {
            self.attack_sent += attack;
        }
        attack
    }

    /// Classify a T lock by corner occupancy. Three or more blocked corners
    /// make a T-spin; fewer than two blocked front corners downgrade it to
    /// a Mini.
    fn t_spin_kind(&self, piece: &Tetromino) -> TSpinKind {
        if piece.kind != PieceKind::T {
            return TSpinKind::None;
        }

        // Corners of the 3x3 box, clockwise from top-left
        const CORNERS: [(i8, i8); 4] = [(-1, -1), (2, -1), (-1, 2), (2, 2)];
        let front: [usize; 2] = match piece.rotation {
            Rotation::North => [0, 1],
            Rotation::East => [1, 3],
            Rotation::South => [2, 3],
            Rotation::West => [0, 2],
        };

        let mut blocked = 0;
        let mut front_blocked = 0;
        for (i, &(dx, dy)) in CORNERS.iter().enumerate() {
            let x = piece.x + dx;
            let y = piece.y + dy;
            let outside =
                x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8;
            if outside || self.board.is_occupied(x, y) {
                blocked += 1;
                if front.contains(&i) {
                    front_blocked += 1;
                }
            }
        }

        if blocked < 3 {
            TSpinKind::None
        } else if front_blocked < 2 {
            TSpinKind::Mini
        } else {
            TSpinKind::Full
        }
    }

    /// Roll for an item on lock (item mode, empty slot only)
    fn roll_item(&mut self) {
        if !self.item_mode || self.item.is_some() {
            return;
        }
        if self.rng.chance(ITEM_DROP_CHANCE) {
            let idx = self.rng.next_range(ItemKind::CATALOG.len() as u32) as usize;
            self.item = Some(ItemKind::CATALOG[idx]);
        }
    }

    /// Promote next to active and draw a replacement; the session ends if
    /// the fresh piece does not fit
    fn spawn_next(&mut self) {
        let piece = Tetromino::spawn(self.next);
        self.next = self.bag.draw();

        self.on_ground = false;
        self.lock_timer_ms = 0;
        self.lock_reset_count = 0;

        if !self.piece_fits(&piece) {
            self.set_game_over();
        }
        self.active = Some(piece);
    }

    fn set_game_over(&mut self) {
        if !self.game_over {
            self.game_over = true;
            self.events.push(EngineEvent::GameOver);
        }
    }

    /// Queue an incoming attack: deferred while our combo is running,
    /// otherwise pending for the next lock
    pub fn receive_attack(&mut self, lines: u32) {
        if self.game_over || lines == 0 {
            return;
        }
        if self.combo > 0 {
            self.incoming_garbage += lines;
        } else {
            self.pending_garbage += lines;
        }
    }

    /// Materialize garbage rows at the bottom, pushing the stack (and the
    /// active piece) up; overflow past the top row ends the session
    fn apply_garbage(&mut self, rows: u32) {
        if rows == 0 {
            return;
        }
        self.attack_received += rows;
        for _ in 0..rows {
            let hole = self.rng.next_range(BOARD_WIDTH as u32) as usize;
            self.board.push_garbage_row(hole);
        }
        if let Some(active) = self.active {
            self.active = Some(active.offset(0, -(rows.min(i8::MAX as u32) as i8)));
        }
        if self.board.top_row_occupied() {
            self.set_game_over();
        }
    }

    /// Consume the held item. Self items resolve locally; attack items are
    /// queued for the host to forward and always consume the slot.
    pub fn use_item(&mut self) -> bool {
        if self.game_over || !self.item_mode {
            return false;
        }
        let Some(item) = self.item else {
            return false;
        };
        if self.active.is_none() {
            return false;
        }
        self.item = None;

        match item {
            ItemKind::SwapPiece => {
                let piece = Tetromino::spawn(self.bag.draw());
                if !self.piece_fits(&piece) {
                    self.set_game_over();
                }
                self.active = Some(piece);
            }
            ItemKind::ClearGarbage => {
                let mut budget = 2;
                let from_pending = budget.min(self.pending_garbage);
                self.pending_garbage -= from_pending;
                budget -= from_pending;
                let from_incoming = budget.min(self.incoming_garbage);
                self.incoming_garbage -= from_incoming;
            }
            ItemKind::AttackBoost => {
                self.attack_boost += 1;
            }
            ItemKind::ForceIPiece => {
                // Keeps the current descent depth
                let y = self.active.map_or(0, |p| p.y);
                let piece = Tetromino {
                    y,
                    ..Tetromino::spawn(PieceKind::I)
                };
                if !self.piece_fits(&piece) {
                    self.set_game_over();
                }
                self.active = Some(piece);
            }
            ItemKind::Ghost => {
                self.ghost_mode = true;
            }
            ItemKind::SwapGrid => {
                self.events.push(EngineEvent::GridSwap {
                    grid: self.board.to_wire(),
                });
            }
            ItemKind::AdvancePiece
            | ItemKind::DestroyHold
            | ItemKind::ConvertItems
            | ItemKind::RedirectTarget => {
                debug_assert_eq!(item.category(), ItemCategory::Attack);
                self.events.push(EngineEvent::ItemAttack { item });
            }
        }
        true
    }

    /// Settle a ghost-mode piece in place: minos land in empty cells only,
    /// overlapping minos vanish. No line clear and no item roll, but hold
    /// re-arms as on a normal lock.
    pub fn fix_ghost(&mut self) -> bool {
        if self.game_over || !self.ghost_mode {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        self.ghost_mode = false;
        self.board
            .merge_ghost(&active.shape(), active.x, active.y, CellMarker::Piece(active.kind));
        self.can_hold = true;
        self.spawn_next();
        true
    }

    /// Apply an attack item received from an opponent
    pub fn receive_item_effect(&mut self, item: ItemKind) {
        if self.game_over {
            return;
        }
        match item {
            ItemKind::AdvancePiece => {
                if self.active.is_some() {
                    self.spawn_next();
                }
            }
            ItemKind::DestroyHold => {
                self.held = None;
            }
            ItemKind::ConvertItems => {
                if self.item.is_some() {
                    self.item = Some(ItemKind::ClearGarbage);
                }
            }
            // Self items and target redirection have no board-level effect
            _ => {}
        }
    }

    /// Install an opponent's grid (bottom two rows trimmed) and restart the
    /// active piece. Malformed grids are rejected whole.
    pub fn receive_grid_swap(&mut self, grid: &[Vec<u8>]) -> bool {
        if self.game_over {
            return false;
        }
        let Some(mut board) = Board::from_wire(grid) else {
            return false;
        };
        board.trim_bottom(2);
        self.board = board;

        if self.active.is_some() {
            let piece = Tetromino::spawn(self.bag.draw());
            if !self.piece_fits(&piece) {
                self.set_game_over();
            }
            self.active = Some(piece);
            self.on_ground = false;
            self.lock_timer_ms = 0;
            self.lock_reset_count = 0;
        }
        true
    }

    /// Where the active piece would land (for rendering)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while self.piece_fits(&Tetromino { y: y + 1, ..active }) {
            y += 1;
        }
        Some(y)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
