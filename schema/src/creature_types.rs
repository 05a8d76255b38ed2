use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Elemental typing for combatants and moves.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum CreatureType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Rock,
    Ground,
    Flying,
    Bug,
    Fighting,
    Poison,
    Steel,
    Fairy,
    Psychic,
    Ghost,
    Dark,
    Dragon,
}
