use serde::{Deserialize, Serialize};

use crate::creature_types::CreatureType;

/// Base combat stats. Stat-stage status effects multiply on top of these;
/// the engine never rewrites them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseStats {
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub special: u16,
}

/// Caller-supplied view of one combatant, refreshed on every call into the
/// engine. The engine reads HP from here and returns intended deltas; it
/// never stores HP itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CombatantSnapshot {
    pub id: String,
    pub max_hp: u16,
    pub current_hp: u16,
    pub types: Vec<CreatureType>,
    pub side_id: String,
    pub stats: BaseStats,
}
