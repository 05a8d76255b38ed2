// Creature Clash Schema - Shared type definitions
// This crate contains the content-facing enums and descriptor structs that are
// shared between the battle mechanics engine and the external content pipeline
// (move/item databases, snapshot assembly in the bot layer).

// Re-export the main types
pub use combatant::*;
pub use creature_types::*;
pub use field_types::*;
pub use item_data::*;
pub use move_data::*;
pub use status_types::*;

pub mod combatant;
pub mod creature_types;
pub mod field_types;
pub mod item_data;
pub mod move_data;
pub mod status_types;
