use serde::{Deserialize, Serialize};

use crate::status_types::{StatKind, StatusEffectType};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancerKind {
    /// Locks the user's critical-hit modifier at 2.0 for the battle.
    CritBoost,
    /// Applies the Focus effect, doubling the next attack's crit chance.
    Focus,
}

/// Behavior category of a battle item. Inventory ownership and consumption
/// accounting live with the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ItemCategory {
    Healing {
        /// Percent of max HP restored.
        percent: u8,
        /// Flat HP restored; the larger of the two applies.
        flat: u16,
    },
    StatusCure {
        /// Status types this item removes. Everything listed and present is
        /// cured; an item curing nothing reports "no effect".
        statuses: Vec<StatusEffectType>,
    },
    StatBoost {
        stat: StatKind,
        stages: u8,
    },
    BattleEnhancer {
        kind: EnhancerKind,
    },
}

/// Static item descriptor, owned by the external content database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ItemData {
    pub name: String,
    pub category: ItemCategory,
}
