//! Items module - battle item catalog
//!
//! Items are rolled with a fixed chance when a piece locks (item mode only)
//! and held one at a time. Self items resolve locally; attack items are
//! forwarded to the current target through the host.

use serde::{Deserialize, Serialize};

/// Who an item acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Resolves on the owner's own board
    SelfTarget,
    /// Forwarded to the current target
    Attack,
}

/// The closed item catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Replace the current piece with a random one
    #[serde(rename = "swap")]
    SwapPiece,
    /// Remove up to two queued garbage lines
    #[serde(rename = "clear")]
    ClearGarbage,
    /// Next attack sends one extra line
    #[serde(rename = "boost")]
    AttackBoost,
    /// Replace the current piece with an I piece
    #[serde(rename = "ipiece")]
    ForceIPiece,
    /// Current piece passes through locked cells until fixed
    #[serde(rename = "ghost")]
    Ghost,
    /// Force the target's current piece to advance to the next one
    #[serde(rename = "random")]
    AdvancePiece,
    /// Destroy the target's hold slot
    #[serde(rename = "destroy")]
    DestroyHold,
    /// Exchange grids with the target
    #[serde(rename = "swap_grid")]
    SwapGrid,
    /// Convert every opponent's held item into ClearGarbage
    #[serde(rename = "item_to_clear")]
    ConvertItems,
    /// Randomly reassign the target's target (resolved host-side)
    #[serde(rename = "redirect_target")]
    RedirectTarget,
}

impl ItemKind {
    pub const CATALOG: [ItemKind; 10] = [
        ItemKind::SwapPiece,
        ItemKind::ClearGarbage,
        ItemKind::AttackBoost,
        ItemKind::ForceIPiece,
        ItemKind::Ghost,
        ItemKind::AdvancePiece,
        ItemKind::DestroyHold,
        ItemKind::SwapGrid,
        ItemKind::ConvertItems,
        ItemKind::RedirectTarget,
    ];

    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::SwapPiece
            | ItemKind::ClearGarbage
            | ItemKind::AttackBoost
            | ItemKind::ForceIPiece
            | ItemKind::Ghost => ItemCategory::SelfTarget,
            ItemKind::AdvancePiece
            | ItemKind::DestroyHold
            | ItemKind::SwapGrid
            | ItemKind::ConvertItems
            | ItemKind::RedirectTarget => ItemCategory::Attack,
        }
    }

    /// Wire identifier, matching the serde rename
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::SwapPiece => "swap",
            ItemKind::ClearGarbage => "clear",
            ItemKind::AttackBoost => "boost",
            ItemKind::ForceIPiece => "ipiece",
            ItemKind::Ghost => "ghost",
            ItemKind::AdvancePiece => "random",
            ItemKind::DestroyHold => "destroy",
            ItemKind::SwapGrid => "swap_grid",
            ItemKind::ConvertItems => "item_to_clear",
            ItemKind::RedirectTarget => "redirect_target",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ItemKind::CATALOG.iter().copied().find(|item| item.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_closed_and_distinct() {
        assert_eq!(ItemKind::CATALOG.len(), 10);
        for (i, a) in ItemKind::CATALOG.iter().enumerate() {
            for b in &ItemKind::CATALOG[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_wire_id_roundtrip() {
        for item in ItemKind::CATALOG {
            assert_eq!(ItemKind::from_str(item.as_str()), Some(item));
        }
        assert_eq!(ItemKind::from_str("bogus"), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ItemKind::Ghost.category(), ItemCategory::SelfTarget);
        assert_eq!(ItemKind::SwapGrid.category(), ItemCategory::Attack);
        let attacks = ItemKind::CATALOG
            .iter()
            .filter(|item| item.category() == ItemCategory::Attack)
            .count();
        assert_eq!(attacks, 5);
    }

    #[test]
    fn test_serde_uses_wire_ids() {
        let json = serde_json::to_string(&ItemKind::ConvertItems).unwrap();
        assert_eq!(json, "\"item_to_clear\"");
        let back: ItemKind = serde_json::from_str("\"swap_grid\"").unwrap();
        assert_eq!(back, ItemKind::SwapGrid);
    }
}
