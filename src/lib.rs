// In: src/lib.rs

//! Creature Clash Battle Mechanics
//!
//! The turn-based battle mechanics core of the Creature Clash game: status
//! effects, field conditions, and the attack-resolution pipeline that
//! composes both. The engine owns no battle records, turn order, HP, or
//! inventory - it reads caller-supplied snapshots, returns intended deltas
//! as typed events, and round-trips its full state through a versioned save
//! schema so the external store can rehydrate it around every action.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod content;
pub mod errors;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the shared content-facing definitions.
pub use schema::{
    BaseStats,
    CombatantSnapshot,
    CreatureType,
    EffectTarget,
    EnhancerKind,
    FieldConditionGroup,
    FieldConditionType,
    FieldTarget,
    ItemCategory,
    ItemData,
    MoveData,
    MoveEffect,
    StatKind,
    StatusEffectType,
};

// --- From this crate's modules (`src/`) ---

// The per-battle orchestrator and its composed outcomes.
pub use battle::mechanics::{
    AttackOutcome, BattleMechanics, DamageOutcome, FieldProc, ItemOutcome,
};

// Per-combatant and battlefield sub-managers.
pub use battle::field::{FieldCondition, FieldScope};
pub use battle::field_manager::{FieldManager, MoveModifiers, StatusProc, SwitchInOutcome};
pub use battle::status::StatusEffect;
pub use battle::status_manager::{StatModifiers, StatusEffectManager};

// Events, action gating, and the injectable random source.
pub use battle::events::{ActionCheck, ActionFailureReason, BattleEvent, EventBus, RejectReason};
pub use battle::rng::BattleRng;
pub use battle::saves::{SavedMechanics, SAVE_SCHEMA_VERSION};

// Content validation and crate-specific error types.
pub use content::{validate_item, validate_items, validate_move, validate_moves};
pub use errors::{ContentError, ContentResult, SaveDataError, SaveResult};
