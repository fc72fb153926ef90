//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty, a locked piece mino,
//! or a garbage block. Uses a flat array for better cache locality and
//! zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows above the board (y < 0) are open space.

use arrayvec::ArrayVec;

use crate::types::{Cell, CellMarker, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a falling piece may occupy (x, y): inside the walls,
    /// above the floor, and not on a locked cell. Positions above the board
    /// are open.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Like `is_open` but ignores locked cells (walls and floor only).
    /// Used while the active piece is in ghost mode.
    pub fn is_passable(&self, x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if every cell is empty (perfect clear condition)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Check if any cell of the top row is filled (garbage overflow condition)
    pub fn top_row_occupied(&self) -> bool {
        self.cells[..BOARD_WIDTH as usize]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    ///
    /// A single lock clears at most four rows, but a swapped-in grid may
    /// arrive with more already full, so the container is sized for a
    /// completely full board.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, { BOARD_HEIGHT as usize }> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                // This row is full, record it and skip
                cleared_rows.push(read_y);
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    // Copy row using copy_within (no allocation, handles overlap)
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for y in 0..write_y {
            let start = y * width;
            let end = start + width;
            for cell in &mut self.cells[start..end] {
                *cell = None;
            }
        }

        // Reverse to get bottom-to-top order
        cleared_rows.reverse();
        cleared_rows
    }

    /// Lock a piece onto the board at given position with given shape
    /// Minos above the board (y < 0) are dropped silently
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, marker: CellMarker) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(marker));
        }
    }

    /// Merge a ghost piece: only empty in-bounds cells are written, minos
    /// overlapping locked cells are discarded
    pub fn merge_ghost(&mut self, shape: &[(i8, i8)], x: i8, y: i8, marker: CellMarker) {
        for &(dx, dy) in shape {
            let px = x + dx;
            let py = y + dy;
            if let Some(idx) = Self::index(px, py) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(marker);
                }
            }
        }
    }

    /// Push one garbage row onto the bottom: every row shifts up by one and
    /// the new row is solid garbage except for a single hole column
    pub fn push_garbage_row(&mut self, hole: usize) {
        let width = BOARD_WIDTH as usize;
        self.cells.copy_within(width.., 0);
        let bottom = BOARD_SIZE - width;
        for (x, cell) in self.cells[bottom..].iter_mut().enumerate() {
            *cell = if x == hole {
                None
            } else {
                Some(CellMarker::Garbage)
            };
        }
    }

    /// Drop the bottom `n` rows and prepend `n` empty rows at the top
    /// (the penalty applied to a grid-swap recipient's new grid)
    pub fn trim_bottom(&mut self, n: usize) {
        let width = BOARD_WIDTH as usize;
        let n = n.min(BOARD_HEIGHT as usize);
        let keep = (BOARD_HEIGHT as usize - n) * width;
        self.cells.copy_within(..keep, n * width);
        for cell in &mut self.cells[..n * width] {
            *cell = None;
        }
    }

    /// Encode the grid for the wire: row-major u8 codes
    /// (0 empty, 1-7 piece kinds, 8 garbage)
    pub fn to_wire(&self) -> Vec<Vec<u8>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                self.cells[y * width..(y + 1) * width]
                    .iter()
                    .map(|cell| cell.map_or(0, |marker| marker.code()))
                    .collect()
            })
            .collect()
    }

    /// Decode a wire grid; rejects wrong dimensions or unknown cell codes
    pub fn from_wire(rows: &[Vec<u8>]) -> Option<Self> {
        if rows.len() != BOARD_HEIGHT as usize {
            return None;
        }
        let mut board = Board::new();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_WIDTH as usize {
                return None;
            }
            for (x, &code) in row.iter().enumerate() {
                let cell = if code == 0 {
                    None
                } else {
                    Some(CellMarker::from_code(code)?)
                };
                board.cells[y * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Some(board)
    }

    /// Write the grid as u8 codes into a preallocated buffer (no allocation)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, dst) in row.iter_mut().enumerate() {
                *dst = self.cells[y * BOARD_WIDTH as usize + x].map_or(0, |marker| marker.code());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                let end = start + width;
                self.cells[start..end].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
