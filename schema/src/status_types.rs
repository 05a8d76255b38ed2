use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Every status effect a single combatant can carry. One slot per variant;
/// re-application merges rather than duplicates.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum StatusEffectType {
    // Primary ailments - mutually exclusive, at most one active per combatant
    Burn,
    Poison,
    Paralysis,
    Sleep,
    Freeze,
    Confusion,

    // Secondary conditions
    Flinch,
    Bound,
    Leech,

    // Stat modifiers
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,
    SpeedUp,
    SpeedDown,

    // Special
    Shield,
    Charged,
    Focus,
    Curse,
    Immunity,
    Reflect,
}

impl StatusEffectType {
    /// The six major ailments that exclude one another.
    pub fn is_primary_ailment(&self) -> bool {
        matches!(
            self,
            StatusEffectType::Burn
                | StatusEffectType::Poison
                | StatusEffectType::Paralysis
                | StatusEffectType::Sleep
                | StatusEffectType::Freeze
                | StatusEffectType::Confusion
        )
    }

    pub fn is_stat_modifier(&self) -> bool {
        matches!(
            self,
            StatusEffectType::AttackUp
                | StatusEffectType::AttackDown
                | StatusEffectType::DefenseUp
                | StatusEffectType::DefenseDown
                | StatusEffectType::SpeedUp
                | StatusEffectType::SpeedDown
        )
    }
}

/// Which stat a stat-stage change or boost item targets. Only the three
/// stats with up/down status counterparts are content-addressable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
}

impl StatKind {
    /// The status effect that raises (positive stages) or lowers (negative
    /// stages) this stat.
    pub fn stage_effect(&self, stages: i8) -> StatusEffectType {
        match (self, stages >= 0) {
            (StatKind::Attack, true) => StatusEffectType::AttackUp,
            (StatKind::Attack, false) => StatusEffectType::AttackDown,
            (StatKind::Defense, true) => StatusEffectType::DefenseUp,
            (StatKind::Defense, false) => StatusEffectType::DefenseDown,
            (StatKind::Speed, true) => StatusEffectType::SpeedUp,
            (StatKind::Speed, false) => StatusEffectType::SpeedDown,
        }
    }
}
