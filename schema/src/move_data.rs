use serde::{Deserialize, Serialize};

use crate::creature_types::CreatureType;
use crate::field_types::FieldConditionType;
use crate::status_types::{StatKind, StatusEffectType};

/// Which combatant a move effect lands on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Target,
}

/// Which side a field-condition effect lands on, relative to the attacker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    OwnSide,
    OpponentSide,
    Both,
}

/// A secondary effect declared on a move. Each is rolled independently
/// against its `chance` (percent) during attack resolution.
///
/// The enum is exhaustive on purpose: content naming an effect that does not
/// exist fails deserialization when the move database loads, never at battle
/// time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveEffect {
    InflictStatus {
        status: StatusEffectType,
        chance: u8,
        duration: Option<u8>,
        intensity: u8,
    },
    StatChange {
        target: EffectTarget,
        stat: StatKind,
        stages: i8,
        chance: u8,
    },
    ApplyField {
        condition: FieldConditionType,
        side: FieldTarget,
        chance: u8,
        duration: Option<u8>,
        intensity: u8,
    },
    Flinch {
        chance: u8,
    },
    BonusCrit {
        multiplier: f64,
        chance: u8,
    },
    Drain {
        percent: u8,
    },
    Recoil {
        percent: u8,
    },
}

impl MoveEffect {
    /// The percent chance this effect procs; guaranteed effects carry 100.
    pub fn chance(&self) -> u8 {
        match self {
            MoveEffect::InflictStatus { chance, .. } => *chance,
            MoveEffect::StatChange { chance, .. } => *chance,
            MoveEffect::ApplyField { chance, .. } => *chance,
            MoveEffect::Flinch { chance } => *chance,
            MoveEffect::BonusCrit { chance, .. } => *chance,
            MoveEffect::Drain { .. } | MoveEffect::Recoil { .. } => 100,
        }
    }
}

/// Static move descriptor, owned by the external content database. The
/// engine only ever borrows these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveData {
    pub name: String,
    pub power: u16,
    /// None means the move never misses.
    pub accuracy: Option<u8>,
    pub move_type: CreatureType,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}
