use std::collections::BTreeMap;

use schema::{
    CombatantSnapshot, CreatureType, FieldConditionGroup, FieldConditionType, MoveData,
    StatusEffectType,
};

use crate::battle::events::BattleEvent;
use crate::battle::field::{FieldCondition, FieldScope};

const WEATHER_CHIP_FRACTION: f64 = 0.0625;
const GRASSY_HEAL_FRACTION: f64 = 0.0625;
const SPIKES_LAYER_FRACTION: f64 = 0.0625;
const STEALTH_ROCK_FRACTION: f64 = 0.125;

/// Types that shrug off weather chip damage.
const SANDSTORM_IMMUNE: [CreatureType; 2] = [CreatureType::Rock, CreatureType::Ground];
const HAILSTORM_IMMUNE: [CreatureType; 1] = [CreatureType::Ice];

/// Types stealth rock punishes (x2 each) and forgives (x0.5 each).
const STEALTH_ROCK_WEAK: [CreatureType; 4] = [
    CreatureType::Fire,
    CreatureType::Flying,
    CreatureType::Ice,
    CreatureType::Bug,
];
const STEALTH_ROCK_RESIST: [CreatureType; 3] = [
    CreatureType::Fighting,
    CreatureType::Ground,
    CreatureType::Steel,
];

/// Multipliers a field applies to one move, plus any priority adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveModifiers {
    pub damage: f64,
    pub accuracy: f64,
    pub priority_delta: i8,
}

impl Default for MoveModifiers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            accuracy: 1.0,
            priority_delta: 0,
        }
    }
}

/// Result of adding a field condition.
#[derive(Debug, Clone)]
pub struct AddConditionOutcome {
    pub applied: bool,
    pub events: Vec<BattleEvent>,
}

/// A status application a hazard wants to inflict on switch-in. Queued for
/// the orchestrator, which routes it through the normal status veto path.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusProc {
    pub target: String,
    pub status: StatusEffectType,
    pub duration: Option<u8>,
    pub intensity: u8,
    pub source: Option<String>,
}

/// What happened when a combatant switched in over the hazards on its side.
#[derive(Debug, Clone, Default)]
pub struct SwitchInOutcome {
    pub events: Vec<BattleEvent>,
    pub status_procs: Vec<StatusProc>,
}

/// Owns every field condition in a battle: weather/terrain exclusivity,
/// hazard stacking, switch-in triggers, and move modifier aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldManager {
    conditions: BTreeMap<(FieldConditionType, FieldScope), FieldCondition>,
}

impl FieldManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, condition_type: FieldConditionType) -> bool {
        self.conditions.keys().any(|(t, _)| *t == condition_type)
    }

    pub fn get(
        &self,
        condition_type: FieldConditionType,
        scope: &FieldScope,
    ) -> Option<&FieldCondition> {
        self.conditions.get(&(condition_type, scope.clone()))
    }

    pub fn conditions(&self) -> impl Iterator<Item = &FieldCondition> {
        self.conditions.values()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Add a condition under the group rules: weather and terrain evict
    /// their group first, hazards stack layers, rooms toggle off on
    /// re-application, and an identical (type, scope) refreshes in place.
    pub fn add_condition(
        &mut self,
        condition_type: FieldConditionType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        scope: FieldScope,
        source: Option<String>,
    ) -> AddConditionOutcome {
        let key = (condition_type, scope.clone());
        let mut events = Vec::new();

        match condition_type.group() {
            FieldConditionGroup::Room => {
                if self.conditions.remove(&key).is_some() {
                    events.push(BattleEvent::FieldExpired {
                        condition: condition_type,
                    });
                    return AddConditionOutcome {
                        applied: true,
                        events,
                    };
                }
            }
            FieldConditionGroup::Hazard => {
                if let Some(existing) = self.conditions.get_mut(&key) {
                    existing.stack(turn, duration, intensity);
                    events.push(BattleEvent::FieldApplied {
                        condition: condition_type,
                    });
                    return AddConditionOutcome {
                        applied: true,
                        events,
                    };
                }
            }
            FieldConditionGroup::Weather | FieldConditionGroup::Terrain => {
                if let Some(existing) = self.conditions.get_mut(&key) {
                    existing.refresh(turn, duration, intensity);
                    events.push(BattleEvent::FieldRefreshed {
                        condition: condition_type,
                    });
                    return AddConditionOutcome {
                        applied: true,
                        events,
                    };
                }
                // A new group member evicts the old one first.
                let group = condition_type.group();
                let evicted: Vec<(FieldConditionType, FieldScope)> = self
                    .conditions
                    .keys()
                    .filter(|(t, _)| t.group() == group)
                    .cloned()
                    .collect();
                for old_key in evicted {
                    self.conditions.remove(&old_key);
                    events.push(BattleEvent::FieldExpired {
                        condition: old_key.0,
                    });
                }
            }
        }

        self.conditions.insert(
            key,
            FieldCondition::new(condition_type, turn, duration, intensity, scope, source),
        );
        events.push(BattleEvent::FieldApplied {
            condition: condition_type,
        });
        AddConditionOutcome {
            applied: true,
            events,
        }
    }

    /// Expire conditions, then apply per-turn field effects to every
    /// in-scope combatant, in condition order then combatant-id order.
    pub fn process_turn_start(
        &mut self,
        turn: u32,
        combatants: &BTreeMap<String, CombatantSnapshot>,
    ) -> Vec<BattleEvent> {
        let mut events = self.remove_expired(turn);

        let keys: Vec<(FieldConditionType, FieldScope)> = self.conditions.keys().cloned().collect();
        for key in keys {
            let Some(condition) = self.conditions.get_mut(&key) else {
                continue;
            };
            if condition.last_proc_turn == Some(turn) {
                continue;
            }
            condition.last_proc_turn = Some(turn);

            match condition.condition_type {
                FieldConditionType::Sandstorm => {
                    weather_chip(condition, combatants, &SANDSTORM_IMMUNE, &mut events);
                }
                FieldConditionType::Hailstorm => {
                    weather_chip(condition, combatants, &HAILSTORM_IMMUNE, &mut events);
                }
                FieldConditionType::Grassy => {
                    for (id, snapshot) in combatants {
                        if !condition.scope.covers(&snapshot.side_id)
                            || snapshot.current_hp >= snapshot.max_hp
                        {
                            continue;
                        }
                        let amount =
                            (snapshot.max_hp as f64 * GRASSY_HEAL_FRACTION).floor() as u16;
                        events.push(BattleEvent::FieldHeal {
                            target: id.clone(),
                            condition: FieldConditionType::Grassy,
                            amount,
                        });
                    }
                }
                _ => {}
            }
        }
        events
    }

    /// Clear newly-expired conditions; battle-wide messages only.
    pub fn process_turn_end(&mut self, turn: u32) -> Vec<BattleEvent> {
        self.remove_expired(turn)
    }

    fn remove_expired(&mut self, turn: u32) -> Vec<BattleEvent> {
        let expired: Vec<(FieldConditionType, FieldScope)> = self
            .conditions
            .iter()
            .filter(|(_, c)| c.is_expired(turn))
            .map(|(k, _)| k.clone())
            .collect();
        let mut events = Vec::new();
        for key in expired {
            self.conditions.remove(&key);
            events.push(BattleEvent::FieldExpired { condition: key.0 });
        }
        events
    }

    /// Aggregate damage/accuracy multipliers and priority adjustment the
    /// field imposes on one move used from `user_side`.
    pub fn move_modifiers(&self, move_data: &MoveData, user_side: &str) -> MoveModifiers {
        let mut modifiers = MoveModifiers::default();
        for condition in self.conditions.values() {
            if !condition.scope.covers(user_side) {
                continue;
            }
            match condition.condition_type {
                FieldConditionType::Sunny => match move_data.move_type {
                    CreatureType::Fire => modifiers.damage *= 1.5,
                    CreatureType::Water => modifiers.damage *= 0.5,
                    _ => {}
                },
                FieldConditionType::Rainy => match move_data.move_type {
                    CreatureType::Water => modifiers.damage *= 1.5,
                    CreatureType::Fire => modifiers.damage *= 0.5,
                    _ => {}
                },
                FieldConditionType::Grassy if move_data.move_type == CreatureType::Grass => {
                    modifiers.damage *= 1.3;
                }
                FieldConditionType::Electric if move_data.move_type == CreatureType::Electric => {
                    modifiers.damage *= 1.3;
                }
                FieldConditionType::Misty if move_data.move_type == CreatureType::Fairy => {
                    modifiers.damage *= 1.3;
                }
                FieldConditionType::Psychic => {
                    if move_data.move_type == CreatureType::Psychic {
                        modifiers.damage *= 1.3;
                    }
                    // Psychic terrain grounds quick attacks from its side.
                    if move_data.priority > 0 {
                        modifiers.priority_delta = -move_data.priority;
                    }
                }
                FieldConditionType::Fog => modifiers.accuracy *= 0.7,
                _ => {}
            }
        }
        modifiers
    }

    /// Which active condition, if any, vetoes applying `status` to the
    /// combatant described by `snapshot`.
    pub fn status_blocker(
        &self,
        status: StatusEffectType,
        snapshot: &CombatantSnapshot,
    ) -> Option<FieldConditionType> {
        for condition in self.conditions.values() {
            if !condition.scope.covers(&snapshot.side_id) {
                continue;
            }
            match condition.condition_type {
                FieldConditionType::Misty => return Some(FieldConditionType::Misty),
                FieldConditionType::Electric if status == StatusEffectType::Sleep => {
                    return Some(FieldConditionType::Electric)
                }
                _ => {}
            }
        }
        None
    }

    pub fn can_apply_status(&self, status: StatusEffectType, snapshot: &CombatantSnapshot) -> bool {
        self.status_blocker(status, snapshot).is_none()
    }

    /// Hazard triggers for a combatant entering the field on its side.
    pub fn process_switch_in(&self, id: &str, snapshot: &CombatantSnapshot) -> SwitchInOutcome {
        let mut outcome = SwitchInOutcome::default();
        for condition in self.conditions.values() {
            if !condition.scope.covers(&snapshot.side_id) {
                continue;
            }
            match condition.condition_type {
                FieldConditionType::Spikes => {
                    let damage = (snapshot.max_hp as f64
                        * SPIKES_LAYER_FRACTION
                        * condition.intensity as f64)
                        .floor() as u16;
                    outcome.events.push(BattleEvent::HazardDamage {
                        target: id.to_string(),
                        condition: FieldConditionType::Spikes,
                        damage,
                    });
                }
                FieldConditionType::ToxicSpikes => {
                    if !snapshot.types.contains(&CreatureType::Poison) {
                        outcome.status_procs.push(StatusProc {
                            target: id.to_string(),
                            status: StatusEffectType::Poison,
                            duration: None,
                            intensity: condition.intensity,
                            source: condition.source.clone(),
                        });
                    }
                }
                FieldConditionType::StealthRock => {
                    let mut multiplier = 1.0;
                    for weak in STEALTH_ROCK_WEAK {
                        if snapshot.types.contains(&weak) {
                            multiplier *= 2.0;
                        }
                    }
                    for resist in STEALTH_ROCK_RESIST {
                        if snapshot.types.contains(&resist) {
                            multiplier *= 0.5;
                        }
                    }
                    let damage =
                        (snapshot.max_hp as f64 * STEALTH_ROCK_FRACTION * multiplier).floor()
                            as u16;
                    outcome.events.push(BattleEvent::HazardDamage {
                        target: id.to_string(),
                        condition: FieldConditionType::StealthRock,
                        damage,
                    });
                }
                _ => {}
            }
        }
        outcome
    }

    // === Room queries ===
    // Rooms warp the whole battle regardless of the scope they were thrown
    // down with; scope is retained only for bookkeeping.

    /// TrickRoom: the external turn-order loop should sort slowest-first.
    pub fn speed_inverted(&self) -> bool {
        self.is_active(FieldConditionType::TrickRoom)
    }

    /// MagicRoom: items fizzle while active.
    pub fn items_suppressed(&self) -> bool {
        self.is_active(FieldConditionType::MagicRoom)
    }

    /// WonderRoom: the external base-stat damage layer should swap each
    /// defender's defense and special stats while this holds.
    pub fn defenses_swapped(&self) -> bool {
        self.is_active(FieldConditionType::WonderRoom)
    }

    // === Persistence ===

    pub fn conditions_for_save(&self) -> Vec<FieldCondition> {
        self.conditions.values().cloned().collect()
    }

    pub fn from_saved_conditions(conditions: Vec<FieldCondition>) -> Self {
        let mut manager = Self::new();
        for condition in conditions {
            manager
                .conditions
                .insert((condition.condition_type, condition.scope.clone()), condition);
        }
        manager
    }
}

fn weather_chip(
    condition: &FieldCondition,
    combatants: &BTreeMap<String, CombatantSnapshot>,
    immune_types: &[CreatureType],
    events: &mut Vec<BattleEvent>,
) {
    for (id, snapshot) in combatants {
        if !condition.scope.covers(&snapshot.side_id) {
            continue;
        }
        if snapshot.types.iter().any(|t| immune_types.contains(t)) {
            continue;
        }
        let damage = (snapshot.max_hp as f64 * WEATHER_CHIP_FRACTION).floor() as u16;
        events.push(BattleEvent::FieldDamage {
            target: id.clone(),
            condition: condition.condition_type,
            damage,
        });
    }
}
