use std::collections::{BTreeMap, BTreeSet};

use schema::{
    CombatantSnapshot, EffectTarget, EnhancerKind, FieldConditionType, FieldTarget, ItemCategory,
    ItemData, MoveData, MoveEffect, StatusEffectType,
};

use crate::battle::events::{ActionCheck, ActionFailureReason, BattleEvent, EventBus, RejectReason};
use crate::battle::field::FieldScope;
use crate::battle::field_manager::{FieldManager, StatusProc};
use crate::battle::rng::BattleRng;
use crate::battle::status_manager::{AddEffectOutcome, StatModifiers, StatusEffectManager};

const BASE_CRIT_CHANCE: f64 = 0.0625;
const CRITICAL_DAMAGE_MULTIPLIER: f64 = 2.0;
const CHARGED_DAMAGE_MULTIPLIER: f64 = 1.5;
const ENHANCER_CRIT_MODIFIER: f64 = 2.0;
/// Stat-stage changes (from moves and boost items) land as 5-turn statuses.
const STAT_STAGE_TURNS: u8 = 5;
/// Defender folds divide damage; a floor keeps a fully-debuffed defender
/// from zeroing the divisor.
const MIN_FOLD_DIVISOR: f64 = 0.1;

/// A field-condition application a move effect wants to make, with its side
/// already resolved relative to the attacker.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProc {
    pub condition: FieldConditionType,
    pub scope: FieldScope,
    pub duration: Option<u8>,
    pub intensity: u8,
    pub source: Option<String>,
}

/// The composed result of the attack-resolution pipeline. Pure output: the
/// caller rolls the hit against `accuracy`, applies `damage` to `target`,
/// and routes the queued procs back through the orchestrator.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub target: String,
    pub damage: u16,
    /// Final accuracy percent after field folding; 100 for never-miss moves.
    pub accuracy: u8,
    pub crit_chance: f64,
    pub critical: bool,
    pub priority: i8,
    /// True when confusion redirected the attack into the attacker itself.
    pub self_inflicted: bool,
    /// Percent of dealt damage healed back to the attacker.
    pub drain_percent: Option<u8>,
    /// Percent of dealt damage taken by the attacker as recoil.
    pub recoil_percent: Option<u8>,
    pub queued_statuses: Vec<StatusProc>,
    pub queued_field: Vec<FieldProc>,
    pub events: Vec<BattleEvent>,
}

/// Result of running a known hit through the defender's incoming-damage
/// adjustments and on-hit reactions.
#[derive(Debug, Clone)]
pub struct DamageOutcome {
    pub damage: u16,
    pub reflected: u16,
    pub events: Vec<BattleEvent>,
}

/// Result of an item use. `heal` is an intended delta; inventory and HP
/// bookkeeping stay with the caller.
#[derive(Debug, Clone, Default)]
pub struct ItemOutcome {
    pub used: bool,
    pub heal: u16,
    pub events: Vec<BattleEvent>,
}

/// Per-battle orchestrator: one status manager per combatant plus the field
/// manager, composed through the turn-phase hooks and the attack pipeline.
///
/// Constructed when a battle begins and rehydrated around every action; all
/// mutable state lives here or below, never in globals. Turn ownership,
/// stored HP, and inventory belong to the external battle-record layer.
#[derive(Debug, Clone, Default)]
pub struct BattleMechanics {
    pub(crate) combatants: BTreeMap<String, StatusEffectManager>,
    pub(crate) field: FieldManager,
    pub(crate) crit_modifiers: BTreeMap<String, f64>,
    pub(crate) used_special: BTreeSet<String>,
}

impl BattleMechanics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mechanics = Self::new();
        for id in ids {
            mechanics.add_combatant(id);
        }
        mechanics
    }

    pub fn add_combatant(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.combatants
            .entry(id.clone())
            .or_insert_with(|| StatusEffectManager::new(id));
    }

    pub fn combatant_ids(&self) -> impl Iterator<Item = &str> {
        self.combatants.keys().map(|s| s.as_str())
    }

    pub fn status_manager(&self, id: &str) -> Option<&StatusEffectManager> {
        self.combatants.get(id)
    }

    pub fn field(&self) -> &FieldManager {
        &self.field
    }

    pub fn crit_modifier(&self, id: &str) -> f64 {
        self.crit_modifiers.get(id).copied().unwrap_or(1.0)
    }

    pub fn set_crit_modifier(&mut self, id: impl Into<String>, modifier: f64) {
        self.crit_modifiers.insert(id.into(), modifier);
    }

    /// Record the one-per-battle special action. Returns false when the
    /// combatant already spent it.
    pub fn try_consume_special(&mut self, id: impl Into<String>) -> bool {
        self.used_special.insert(id.into())
    }

    pub fn has_used_special(&self, id: &str) -> bool {
        self.used_special.contains(id)
    }

    // === Turn phases ===
    // Environment resolves before individual status, in that fixed order.

    pub fn process_turn_start(
        &mut self,
        turn: u32,
        snapshots: &BTreeMap<String, CombatantSnapshot>,
    ) -> Vec<BattleEvent> {
        let mut bus = EventBus::new();
        bus.extend(self.field.process_turn_start(turn, snapshots));
        for (id, manager) in self.combatants.iter_mut() {
            if let Some(snapshot) = snapshots.get(id) {
                bus.extend(manager.process_turn_start(turn, snapshot));
            }
        }
        bus.into_events()
    }

    pub fn process_turn_end(&mut self, turn: u32) -> Vec<BattleEvent> {
        let mut bus = EventBus::new();
        bus.extend(self.field.process_turn_end(turn));
        for manager in self.combatants.values_mut() {
            bus.extend(manager.process_turn_end(turn));
        }
        bus.into_events()
    }

    /// Action gate for one combatant. A flinch that blocks is consumed here;
    /// an unknown id acts freely (roster desync is the caller's bug, not a
    /// battle-time failure).
    pub fn can_act(
        &mut self,
        id: &str,
        snapshot: &CombatantSnapshot,
        rng: &mut BattleRng,
    ) -> ActionCheck {
        let Some(manager) = self.combatants.get(id) else {
            return ActionCheck::Acts;
        };
        let check = manager.can_act(snapshot, rng);
        if matches!(
            check,
            ActionCheck::Blocked {
                reason: ActionFailureReason::IsFlinching
            }
        ) {
            if let Some(manager) = self.combatants.get_mut(id) {
                manager.remove_effect(StatusEffectType::Flinch);
            }
        }
        check
    }

    /// Apply a status effect to a combatant, with the field consulted first:
    /// terrain can veto the application outright.
    pub fn apply_status_effect(
        &mut self,
        target: &str,
        effect_type: StatusEffectType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        source: Option<String>,
        snapshot: &CombatantSnapshot,
    ) -> AddEffectOutcome {
        if let Some(blocker) = self.field.status_blocker(effect_type, snapshot) {
            return AddEffectOutcome {
                applied: false,
                events: vec![BattleEvent::StatusRejected {
                    target: target.to_string(),
                    status: effect_type,
                    reason: RejectReason::BlockedByTerrain(blocker),
                }],
            };
        }
        match self.combatants.get_mut(target) {
            Some(manager) => manager.add_effect(effect_type, turn, duration, intensity, source),
            None => AddEffectOutcome {
                applied: false,
                events: Vec::new(),
            },
        }
    }

    pub fn apply_field_condition(
        &mut self,
        condition_type: FieldConditionType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        scope: FieldScope,
        source: Option<String>,
    ) -> crate::battle::field_manager::AddConditionOutcome {
        self.field
            .add_condition(condition_type, turn, duration, intensity, scope, source)
    }

    /// The attack-resolution pipeline. Stages run in fixed order and mutate
    /// one running result; no HP is touched and every random draw is an
    /// independent roll against declared content.
    pub fn modify_attack(
        &mut self,
        attacker: &CombatantSnapshot,
        defender: &CombatantSnapshot,
        move_data: &MoveData,
        action: &ActionCheck,
        rng: &mut BattleRng,
    ) -> AttackOutcome {
        let mut events = Vec::new();

        // (1) Seed from the move descriptor.
        let mut damage = move_data.power as f64;
        let mut crit_chance = BASE_CRIT_CHANCE;

        // (2) Attacker's own stat modifiers.
        let attacker_mods = self.stat_modifiers_of(&attacker.id);
        damage *= attacker_mods.attack;

        // (3) Confusion short-circuit: the actor swings at itself and every
        // later stage is skipped.
        if let ActionCheck::SelfDamage { damage: self_hit } = action {
            events.push(BattleEvent::ConfusionSelfHit {
                target: attacker.id.clone(),
                damage: *self_hit,
            });
            return AttackOutcome {
                target: attacker.id.clone(),
                damage: *self_hit,
                accuracy: 100,
                crit_chance: 0.0,
                critical: false,
                priority: move_data.priority,
                self_inflicted: true,
                drain_percent: None,
                recoil_percent: None,
                queued_statuses: Vec::new(),
                queued_field: Vec::new(),
                events,
            };
        }

        // (4) Defender's modifiers fold inverted: defense and special divide.
        let defender_mods = self.stat_modifiers_of(&defender.id);
        damage /= defender_mods.defense.max(MIN_FOLD_DIVISOR);
        damage /= defender_mods.special.max(MIN_FOLD_DIVISOR);

        // (5) Field move modifiers, with a message only when one applies.
        let field_mods = self.field.move_modifiers(move_data, &attacker.side_id);
        damage *= field_mods.damage;
        if field_mods.damage != 1.0 {
            events.push(BattleEvent::MoveDamageModified {
                multiplier: field_mods.damage,
            });
        }
        let accuracy = match move_data.accuracy {
            // A move with no accuracy value never misses, fog or not.
            None => 100,
            Some(base) => {
                if field_mods.accuracy != 1.0 {
                    events.push(BattleEvent::MoveAccuracyModified {
                        multiplier: field_mods.accuracy,
                    });
                }
                (base as f64 * field_mods.accuracy).round().clamp(1.0, 100.0) as u8
            }
        };
        let priority = move_data.priority + field_mods.priority_delta;

        // (6) The attacker's stored critical modifier.
        crit_chance *= self.crit_modifier(&attacker.id);

        // (7) Focus doubles the crit chance and is spent.
        if let Some(manager) = self.combatants.get_mut(&attacker.id) {
            if manager.remove_effect(StatusEffectType::Focus) {
                crit_chance *= 2.0;
                events.push(BattleEvent::FocusConsumed {
                    target: attacker.id.clone(),
                });
            }
        }

        // (8) Charged releases stored power and is spent.
        if let Some(manager) = self.combatants.get_mut(&attacker.id) {
            if manager.remove_effect(StatusEffectType::Charged) {
                damage *= CHARGED_DAMAGE_MULTIPLIER;
                events.push(BattleEvent::ChargeReleased {
                    target: attacker.id.clone(),
                });
            }
        }

        // (9) Declared secondary effects, each rolled independently. Status
        // and field applications are queued, never applied here.
        let mut drain_percent = None;
        let mut recoil_percent = None;
        let mut queued_statuses = Vec::new();
        let mut queued_field = Vec::new();

        for effect in &move_data.effects {
            let roll = effect.chance() as f64 / 100.0;
            match effect {
                MoveEffect::InflictStatus {
                    status,
                    duration,
                    intensity,
                    ..
                } => {
                    if rng.chance(roll, "Inflict Status Roll") {
                        queued_statuses.push(StatusProc {
                            target: defender.id.clone(),
                            status: *status,
                            duration: *duration,
                            intensity: *intensity,
                            source: Some(attacker.id.clone()),
                        });
                    }
                }
                MoveEffect::StatChange {
                    target,
                    stat,
                    stages,
                    ..
                } => {
                    if rng.chance(roll, "Stat Change Roll") {
                        let recipient = match target {
                            EffectTarget::User => attacker.id.clone(),
                            EffectTarget::Target => defender.id.clone(),
                        };
                        queued_statuses.push(StatusProc {
                            target: recipient,
                            status: stat.stage_effect(*stages),
                            duration: Some(STAT_STAGE_TURNS),
                            intensity: stages.unsigned_abs().clamp(1, 5),
                            source: Some(attacker.id.clone()),
                        });
                    }
                }
                MoveEffect::ApplyField {
                    condition,
                    side,
                    duration,
                    intensity,
                    ..
                } => {
                    if rng.chance(roll, "Apply Field Roll") {
                        let scope = match side {
                            FieldTarget::OwnSide => FieldScope::Side(attacker.side_id.clone()),
                            FieldTarget::OpponentSide => {
                                FieldScope::Side(defender.side_id.clone())
                            }
                            FieldTarget::Both => FieldScope::Global,
                        };
                        queued_field.push(FieldProc {
                            condition: *condition,
                            scope,
                            duration: *duration,
                            intensity: *intensity,
                            source: Some(attacker.id.clone()),
                        });
                    }
                }
                MoveEffect::Flinch { .. } => {
                    if rng.chance(roll, "Flinch Roll") {
                        queued_statuses.push(StatusProc {
                            target: defender.id.clone(),
                            status: StatusEffectType::Flinch,
                            duration: Some(1),
                            intensity: 1,
                            source: Some(attacker.id.clone()),
                        });
                    }
                }
                MoveEffect::BonusCrit { multiplier, .. } => {
                    if rng.chance(roll, "Bonus Crit Roll") {
                        crit_chance *= multiplier;
                    }
                }
                MoveEffect::Drain { percent } => {
                    if rng.chance(roll, "Drain Roll") {
                        drain_percent = Some(*percent);
                    }
                }
                MoveEffect::Recoil { percent } => {
                    if rng.chance(roll, "Recoil Roll") {
                        recoil_percent = Some(*percent);
                    }
                }
            }
        }

        crit_chance = crit_chance.min(1.0);
        let critical = damage > 0.0 && rng.chance(crit_chance, "Critical Hit Check");
        if critical {
            damage *= CRITICAL_DAMAGE_MULTIPLIER;
            events.push(BattleEvent::CriticalHit);
        }

        AttackOutcome {
            target: defender.id.clone(),
            damage: damage.max(0.0).floor() as u16,
            accuracy,
            crit_chance,
            critical,
            priority,
            self_inflicted: false,
            drain_percent,
            recoil_percent,
            queued_statuses,
            queued_field,
            events,
        }
    }

    /// The second half of attack resolution, once the move is known to hit:
    /// the defender's shield/reflect adjustments, then its on-hit reactions.
    pub fn process_damage(
        &mut self,
        defender: &str,
        damage: u16,
        move_data: &MoveData,
        rng: &mut BattleRng,
    ) -> DamageOutcome {
        let Some(manager) = self.combatants.get_mut(defender) else {
            return DamageOutcome {
                damage,
                reflected: 0,
                events: Vec::new(),
            };
        };
        let incoming = manager.modify_incoming_damage(damage, move_data.move_type);
        let mut events = incoming.events;
        events.extend(manager.on_hit(incoming.damage, move_data.move_type, rng));
        DamageOutcome {
            damage: incoming.damage,
            reflected: incoming.reflected,
            events,
        }
    }

    /// Hazard triggers for a combatant switching in; any status proc they
    /// produce goes back through the normal veto path, so terrain can still
    /// block a toxic-spike poison.
    pub fn process_switch(
        &mut self,
        id: &str,
        snapshot: &CombatantSnapshot,
        turn: u32,
    ) -> Vec<BattleEvent> {
        let outcome = self.field.process_switch_in(id, snapshot);
        let mut events = outcome.events;
        for proc in outcome.status_procs {
            let applied = self.apply_status_effect(
                &proc.target,
                proc.status,
                turn,
                proc.duration,
                proc.intensity,
                proc.source,
                snapshot,
            );
            events.extend(applied.events);
        }
        events
    }

    /// Use a battle item. Dispatches on the item's category; reports the
    /// intended effect and never touches inventory or stored HP.
    pub fn use_item(
        &mut self,
        user: &str,
        target: &str,
        item: &ItemData,
        target_snapshot: &CombatantSnapshot,
        turn: u32,
    ) -> ItemOutcome {
        if self.field.items_suppressed() {
            return ItemOutcome {
                used: false,
                heal: 0,
                events: vec![BattleEvent::ItemNoEffect {
                    item: item.name.clone(),
                }],
            };
        }

        match &item.category {
            ItemCategory::Healing { percent, flat } => {
                if target_snapshot.current_hp >= target_snapshot.max_hp {
                    return ItemOutcome {
                        used: false,
                        heal: 0,
                        events: vec![BattleEvent::ItemNoEffect {
                            item: item.name.clone(),
                        }],
                    };
                }
                let percent_heal =
                    (target_snapshot.max_hp as f64 * *percent as f64 / 100.0).floor() as u16;
                let heal = percent_heal.max(*flat);
                ItemOutcome {
                    used: true,
                    heal,
                    events: vec![BattleEvent::ItemHealed {
                        target: target.to_string(),
                        amount: heal,
                    }],
                }
            }
            ItemCategory::StatusCure { statuses } => {
                let Some(manager) = self.combatants.get_mut(target) else {
                    return ItemOutcome::default();
                };
                let cured = manager.cure(statuses);
                if cured.is_empty() {
                    return ItemOutcome {
                        used: false,
                        heal: 0,
                        events: vec![BattleEvent::ItemNoEffect {
                            item: item.name.clone(),
                        }],
                    };
                }
                let events = cured
                    .into_iter()
                    .map(|status| BattleEvent::StatusCured {
                        target: target.to_string(),
                        status,
                    })
                    .collect();
                ItemOutcome {
                    used: true,
                    heal: 0,
                    events,
                }
            }
            ItemCategory::StatBoost { stat, stages } => {
                let outcome = self.apply_status_effect(
                    target,
                    stat.stage_effect(*stages as i8),
                    turn,
                    Some(STAT_STAGE_TURNS),
                    *stages,
                    None,
                    target_snapshot,
                );
                ItemOutcome {
                    used: outcome.applied,
                    heal: 0,
                    events: outcome.events,
                }
            }
            ItemCategory::BattleEnhancer { kind } => match kind {
                EnhancerKind::CritBoost => {
                    self.set_crit_modifier(user, ENHANCER_CRIT_MODIFIER);
                    ItemOutcome {
                        used: true,
                        heal: 0,
                        events: vec![BattleEvent::CriticalBoosted {
                            target: user.to_string(),
                        }],
                    }
                }
                EnhancerKind::Focus => {
                    let Some(manager) = self.combatants.get_mut(user) else {
                        return ItemOutcome::default();
                    };
                    let outcome = manager.add_effect(StatusEffectType::Focus, turn, None, 1, None);
                    ItemOutcome {
                        used: outcome.applied,
                        heal: 0,
                        events: outcome.events,
                    }
                }
            },
        }
    }

    fn stat_modifiers_of(&self, id: &str) -> StatModifiers {
        self.combatants
            .get(id)
            .map(|m| m.stat_modifiers())
            .unwrap_or_default()
    }
}
