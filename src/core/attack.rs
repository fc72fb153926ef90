//! Attack module - battle attack calculus and scoring
//!
//! Translates a line clear into attack lines sent to the opponent. The base
//! table depends on the clear kind (normal vs. T-spin), then back-to-back,
//! combo and perfect-clear bonuses stack on top. All tunables live in
//! `AttackConfig` so a host can adjust the balance without forking the
//! engine; `Default` carries the standard values.

use crate::types::{
    TSpinKind, GRAVITY_PER_LEVEL, LINES_PER_LEVEL, LINE_SCORES, MAX_GRAVITY,
};

/// Attack tunables
#[derive(Debug, Clone, PartialEq)]
pub struct AttackConfig {
    /// Attack for a normal clear, indexed by lines minus one (4+ uses the last entry)
    pub normal: [u32; 4],
    /// Attack for a full T-spin clear, indexed by lines minus one (3+ uses the last entry)
    pub tspin_full: [u32; 3],
    /// Attack for a mini T-spin clear, indexed by lines minus one
    pub tspin_mini: [u32; 2],
    /// Extra attack when a difficult clear follows a difficult clear
    pub b2b_bonus: u32,
    /// Combo bonus steps as (max combo, bonus); combos beyond the last step
    /// use `combo_max_bonus`
    pub combo_steps: [(u32, u32); 3],
    pub combo_max_bonus: u32,
    /// Combos at or below this threshold earn no bonus
    pub combo_floor: u32,
    /// Perfect clear bonus for a 4-line clear
    pub perfect_clear_tetris: u32,
    /// Perfect clear bonus for any other clear
    pub perfect_clear_other: u32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            normal: [0, 1, 2, 4],
            tspin_full: [2, 4, 6],
            tspin_mini: [0, 1],
            b2b_bonus: 1,
            combo_steps: [(4, 1), (7, 2), (10, 3)],
            combo_max_bonus: 4,
            combo_floor: 2,
            perfect_clear_tetris: 10,
            perfect_clear_other: 6,
        }
    }
}

impl AttackConfig {
    /// Base attack and difficulty for a clear of `lines` (after garbage
    /// cancellation) with the given T-spin classification.
    ///
    /// "Difficult" clears are full T-spins and 4-line clears; they feed the
    /// back-to-back chain.
    pub fn base_attack(&self, lines: u32, tspin: TSpinKind) -> (u32, bool) {
        debug_assert!(lines > 0);
        let idx = |table_len: usize| (lines as usize - 1).min(table_len - 1);
        match tspin {
            TSpinKind::Full => (self.tspin_full[idx(self.tspin_full.len())], true),
            TSpinKind::Mini => (self.tspin_mini[idx(self.tspin_mini.len())], false),
            TSpinKind::None => {
                let attack = self.normal[idx(self.normal.len())];
                (attack, lines >= 4)
            }
        }
    }

    /// Combo bonus for the current combo counter (after incrementing)
    pub fn combo_bonus(&self, combo: u32) -> u32 {
        if combo <= self.combo_floor {
            return 0;
        }
        for &(max, bonus) in &self.combo_steps {
            if combo <= max {
                return bonus;
            }
        }
        self.combo_max_bonus
    }

    /// Perfect clear bonus for a clear of `lines`
    pub fn perfect_clear_bonus(&self, lines: u32) -> u32 {
        if lines >= 4 {
            self.perfect_clear_tetris
        } else {
            self.perfect_clear_other
        }
    }
}

/// Score for clearing `lines` at `level` (1-4 lines, level is 1-based)
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let idx = (lines as usize - 1).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx] * level
}

/// Level for a total line count (1-based, advances every 10 lines)
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity in cells per frame for a level, capped at 20G
pub fn gravity_for_level(level: u32) -> f32 {
    (GRAVITY_PER_LEVEL * level as f32).min(MAX_GRAVITY)
}
