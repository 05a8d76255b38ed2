use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::battle::field::FieldCondition;
use crate::battle::field_manager::FieldManager;
use crate::battle::mechanics::BattleMechanics;
use crate::battle::status::StatusEffect;
use crate::battle::status_manager::StatusEffectManager;
use crate::errors::SaveDataError;

/// Bump when the save layout changes; `from_save` refuses anything else.
pub const SAVE_SCHEMA_VERSION: u32 = 1;

/// The full serialized form of one battle's mechanics state. Effects and
/// conditions are stored as tagged lists (each entry carries its own type),
/// so a future variant addition extends the union instead of silently
/// corrupting old saves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedMechanics {
    pub schema_version: u32,
    pub combatants: BTreeMap<String, Vec<StatusEffect>>,
    pub field: Vec<FieldCondition>,
    pub crit_modifiers: BTreeMap<String, f64>,
    pub used_special: BTreeSet<String>,
}

impl BattleMechanics {
    pub fn to_save(&self) -> SavedMechanics {
        SavedMechanics {
            schema_version: SAVE_SCHEMA_VERSION,
            combatants: self
                .combatants
                .iter()
                .map(|(id, manager)| (id.clone(), manager.effects_for_save()))
                .collect(),
            field: self.field.conditions_for_save(),
            crit_modifiers: self.crit_modifiers.clone(),
            used_special: self.used_special.clone(),
        }
    }

    pub fn from_save(saved: SavedMechanics) -> Result<Self, SaveDataError> {
        if saved.schema_version != SAVE_SCHEMA_VERSION {
            return Err(SaveDataError::UnsupportedVersion {
                found: saved.schema_version,
                supported: SAVE_SCHEMA_VERSION,
            });
        }
        Ok(Self {
            combatants: saved
                .combatants
                .into_iter()
                .map(|(id, effects)| {
                    let manager = StatusEffectManager::from_saved_effects(id.clone(), effects);
                    (id, manager)
                })
                .collect(),
            field: FieldManager::from_saved_conditions(saved.field),
            crit_modifiers: saved.crit_modifiers,
            used_special: saved.used_special,
        })
    }

    /// Serialize for the external battle-record store.
    pub fn to_json_value(&self) -> Result<serde_json::Value, SaveDataError> {
        Ok(serde_json::to_value(self.to_save())?)
    }

    /// Rehydrate from the external battle-record store.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SaveDataError> {
        let saved: SavedMechanics = serde_json::from_value(value)?;
        Self::from_save(saved)
    }
}
