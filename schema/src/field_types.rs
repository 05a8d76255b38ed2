use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Battlefield-wide or side-scoped environmental conditions.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum FieldConditionType {
    // Weather - mutually exclusive as a group
    Sunny,
    Rainy,
    Sandstorm,
    Hailstorm,
    Fog,

    // Terrain - mutually exclusive as a group
    Grassy,
    Electric,
    Misty,
    Psychic,

    // Hazards - side-scoped, stack additively via intensity
    Spikes,
    ToxicSpikes,
    StealthRock,

    // Rooms - independent toggles
    TrickRoom,
    MagicRoom,
    WonderRoom,
}

/// Exclusivity grouping for field conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConditionGroup {
    Weather,
    Terrain,
    Hazard,
    Room,
}

impl FieldConditionType {
    pub fn group(&self) -> FieldConditionGroup {
        match self {
            FieldConditionType::Sunny
            | FieldConditionType::Rainy
            | FieldConditionType::Sandstorm
            | FieldConditionType::Hailstorm
            | FieldConditionType::Fog => FieldConditionGroup::Weather,
            FieldConditionType::Grassy
            | FieldConditionType::Electric
            | FieldConditionType::Misty
            | FieldConditionType::Psychic => FieldConditionGroup::Terrain,
            FieldConditionType::Spikes
            | FieldConditionType::ToxicSpikes
            | FieldConditionType::StealthRock => FieldConditionGroup::Hazard,
            FieldConditionType::TrickRoom
            | FieldConditionType::MagicRoom
            | FieldConditionType::WonderRoom => FieldConditionGroup::Room,
        }
    }
}
