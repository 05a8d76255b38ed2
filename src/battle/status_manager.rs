use std::collections::BTreeMap;

use schema::{CombatantSnapshot, CreatureType, StatusEffectType};

use crate::battle::events::{ActionCheck, ActionFailureReason, BattleEvent, RejectReason};
use crate::battle::rng::BattleRng;
use crate::battle::status::StatusEffect;

/// Fraction-of-max-HP constants for per-turn status damage.
const BURN_DAMAGE_FRACTION: f64 = 0.0625;
const POISON_DAMAGE_FRACTION: f64 = 0.075;
const POISON_AGE_RATE: f64 = 0.1;
const POISON_AGE_CAP: f64 = 1.5;
const LEECH_DAMAGE_FRACTION: f64 = 0.0625;
const CURSE_DAMAGE_FRACTION: f64 = 0.0625;
const CONFUSION_SELF_HIT_FRACTION: f64 = 0.125;

/// Aggregated stat multipliers from every active effect. Multiplicative
/// composition: two sources of +20% attack yield 1.44, not 1.4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatModifiers {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub special: f64,
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
            speed: 1.0,
            special: 1.0,
        }
    }
}

/// Result of trying to add a status effect. Rejections are ordinary
/// outcomes; `events` explains what happened either way.
#[derive(Debug, Clone)]
pub struct AddEffectOutcome {
    pub applied: bool,
    pub events: Vec<BattleEvent>,
}

impl AddEffectOutcome {
    fn applied(event: BattleEvent) -> Self {
        Self {
            applied: true,
            events: vec![event],
        }
    }

    fn rejected(event: BattleEvent) -> Self {
        Self {
            applied: false,
            events: vec![event],
        }
    }
}

/// Incoming-damage adjustment computed before the hit lands. Pure: the
/// caller applies `damage` to the defender and redirects `reflected` to the
/// attacker.
#[derive(Debug, Clone)]
pub struct IncomingDamage {
    pub damage: u16,
    pub reflected: u16,
    pub events: Vec<BattleEvent>,
}

/// Owns every status effect on one combatant: stacking, turn evaluation,
/// action gating, and stat-modifier aggregation. One slot per effect type;
/// iteration order is the enum order, so results are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffectManager {
    owner: String,
    effects: BTreeMap<StatusEffectType, StatusEffect>,
}

impl StatusEffectManager {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            effects: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn has(&self, effect_type: StatusEffectType) -> bool {
        self.effects.contains_key(&effect_type)
    }

    pub fn get(&self, effect_type: StatusEffectType) -> Option<&StatusEffect> {
        self.effects.get(&effect_type)
    }

    pub fn active_types(&self) -> impl Iterator<Item = StatusEffectType> + '_ {
        self.effects.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Remove an effect outright. Returns whether it was present.
    pub fn remove_effect(&mut self, effect_type: StatusEffectType) -> bool {
        self.effects.remove(&effect_type).is_some()
    }

    /// Add or merge an effect per the stacking rules: immunity vetoes every
    /// new application, a second primary ailment is refused, and re-applying
    /// an existing type refreshes it in place.
    pub fn add_effect(
        &mut self,
        effect_type: StatusEffectType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        source: Option<String>,
    ) -> AddEffectOutcome {
        if self.has(StatusEffectType::Immunity) {
            return AddEffectOutcome::rejected(BattleEvent::StatusRejected {
                target: self.owner.clone(),
                status: effect_type,
                reason: RejectReason::ProtectedByImmunity,
            });
        }

        if effect_type.is_primary_ailment()
            && self
                .effects
                .keys()
                .any(|t| t.is_primary_ailment() && *t != effect_type)
        {
            return AddEffectOutcome::rejected(BattleEvent::StatusRejected {
                target: self.owner.clone(),
                status: effect_type,
                reason: RejectReason::AlreadyHasPrimaryAilment,
            });
        }

        match self.effects.get_mut(&effect_type) {
            Some(existing) => {
                existing.merge(turn, duration, intensity, source);
                AddEffectOutcome::applied(BattleEvent::StatusRefreshed {
                    target: self.owner.clone(),
                    status: effect_type,
                })
            }
            None => {
                self.effects.insert(
                    effect_type,
                    StatusEffect::new(effect_type, turn, duration, intensity, source),
                );
                AddEffectOutcome::applied(BattleEvent::StatusApplied {
                    target: self.owner.clone(),
                    status: effect_type,
                })
            }
        }
    }

    /// Evaluate all effects at the start of a turn, in effect-type order.
    /// Expired effects wear off first and skip their turn effect; the rest
    /// tick at most once per turn.
    pub fn process_turn_start(
        &mut self,
        turn: u32,
        snapshot: &CombatantSnapshot,
    ) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let mut expired = Vec::new();
        let max_hp = snapshot.max_hp as f64;

        let types: Vec<StatusEffectType> = self.effects.keys().copied().collect();
        for effect_type in types {
            let Some(effect) = self.effects.get_mut(&effect_type) else {
                continue;
            };

            if effect.is_expired(turn) {
                expired.push(effect_type);
                events.push(BattleEvent::StatusExpired {
                    target: self.owner.clone(),
                    status: effect_type,
                });
                continue;
            }

            if effect.last_proc_turn == Some(turn) {
                continue;
            }

            match effect_type {
                StatusEffectType::Burn => {
                    let damage =
                        (max_hp * BURN_DAMAGE_FRACTION * effect.intensity as f64).floor() as u16;
                    effect.last_proc_turn = Some(turn);
                    events.push(BattleEvent::StatusDamage {
                        target: self.owner.clone(),
                        status: effect_type,
                        damage,
                    });
                }
                StatusEffectType::Poison => {
                    // Poison intensifies with age, capped at x1.5.
                    let age_modifier = (1.0 + POISON_AGE_RATE * effect.turns_active(turn) as f64)
                        .min(POISON_AGE_CAP);
                    let damage = (max_hp
                        * POISON_DAMAGE_FRACTION
                        * effect.intensity as f64
                        * age_modifier)
                        .floor() as u16;
                    effect.last_proc_turn = Some(turn);
                    events.push(BattleEvent::StatusDamage {
                        target: self.owner.clone(),
                        status: effect_type,
                        damage,
                    });
                }
                StatusEffectType::Leech => {
                    let damage =
                        (max_hp * LEECH_DAMAGE_FRACTION * effect.intensity as f64).floor() as u16;
                    effect.last_proc_turn = Some(turn);
                    match effect.source.clone() {
                        Some(to) => events.push(BattleEvent::StatusDrain {
                            target: self.owner.clone(),
                            to,
                            damage,
                        }),
                        None => events.push(BattleEvent::StatusDamage {
                            target: self.owner.clone(),
                            status: effect_type,
                            damage,
                        }),
                    }
                }
                StatusEffectType::Curse => {
                    let damage = (max_hp * CURSE_DAMAGE_FRACTION).floor() as u16;
                    effect.last_proc_turn = Some(turn);
                    events.push(BattleEvent::StatusDamage {
                        target: self.owner.clone(),
                        status: effect_type,
                        damage,
                    });
                }
                _ => {}
            }
        }

        for effect_type in expired {
            self.effects.remove(&effect_type);
        }
        events
    }

    /// End-of-turn bookkeeping: flinch never outlives the turn it landed.
    pub fn process_turn_end(&mut self, _turn: u32) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if self.remove_effect(StatusEffectType::Flinch) {
            events.push(BattleEvent::StatusExpired {
                target: self.owner.clone(),
                status: StatusEffectType::Flinch,
            });
        }
        events
    }

    /// Can this combatant take its chosen action? Evaluated in fixed order;
    /// the first gate that fires wins. A `SelfDamage` result means the actor
    /// still acts, but strikes itself instead of using its move.
    pub fn can_act(&self, snapshot: &CombatantSnapshot, rng: &mut BattleRng) -> ActionCheck {
        if self.has(StatusEffectType::Sleep) {
            return ActionCheck::Blocked {
                reason: ActionFailureReason::IsAsleep,
            };
        }
        if self.has(StatusEffectType::Freeze) {
            return ActionCheck::Blocked {
                reason: ActionFailureReason::IsFrozen,
            };
        }
        if self.has(StatusEffectType::Flinch) {
            return ActionCheck::Blocked {
                reason: ActionFailureReason::IsFlinching,
            };
        }
        if let Some(paralysis) = self.get(StatusEffectType::Paralysis) {
            let block_chance = (0.25 * paralysis.intensity as f64).min(0.75);
            if rng.chance(block_chance, "Full Paralysis Check") {
                return ActionCheck::Blocked {
                    reason: ActionFailureReason::IsFullyParalyzed,
                };
            }
        }
        if let Some(confusion) = self.get(StatusEffectType::Confusion) {
            let self_hit_chance = (0.33 * confusion.intensity as f64).min(0.75);
            if rng.chance(self_hit_chance, "Confusion Self-Hit Check") {
                let damage = (snapshot.max_hp as f64 * CONFUSION_SELF_HIT_FRACTION).floor() as u16;
                return ActionCheck::SelfDamage { damage };
            }
        }
        ActionCheck::Acts
    }

    /// Product of every active effect's per-stat multiplier. Factors floor
    /// at zero; they never go negative.
    pub fn stat_modifiers(&self) -> StatModifiers {
        let mut mods = StatModifiers::default();
        for effect in self.effects.values() {
            let i = effect.intensity as f64;
            match effect.effect_type {
                StatusEffectType::AttackUp => mods.attack *= 1.0 + 0.2 * i,
                StatusEffectType::AttackDown => mods.attack *= 1.0 - 0.2 * i,
                StatusEffectType::DefenseUp => mods.defense *= 1.0 + 0.2 * i,
                StatusEffectType::DefenseDown => mods.defense *= 1.0 - 0.2 * i,
                StatusEffectType::SpeedUp => mods.speed *= 1.0 + 0.2 * i,
                StatusEffectType::SpeedDown => mods.speed *= 1.0 - 0.2 * i,
                StatusEffectType::Burn => mods.attack *= 1.0 - 0.1 * i,
                StatusEffectType::Paralysis => mods.speed *= 1.0 - 0.25 * i,
                _ => {}
            }
        }
        mods.attack = mods.attack.max(0.0);
        mods.defense = mods.defense.max(0.0);
        mods.speed = mods.speed.max(0.0);
        mods.special = mods.special.max(0.0);
        mods
    }

    /// React to a landed hit: wake/thaw/snap-out rolls, shield consumption,
    /// barrier report.
    pub fn on_hit(
        &mut self,
        damage: u16,
        move_type: CreatureType,
        rng: &mut BattleRng,
    ) -> Vec<BattleEvent> {
        let mut events = Vec::new();

        if self.has(StatusEffectType::Sleep)
            && damage > 0
            && rng.chance(0.5, "Wake On Hit Check")
        {
            self.remove_effect(StatusEffectType::Sleep);
            events.push(BattleEvent::WokeUp {
                target: self.owner.clone(),
            });
        }

        if self.has(StatusEffectType::Freeze) {
            let thaws = move_type == CreatureType::Fire
                || (damage > 0 && rng.chance(0.2, "Thaw On Hit Check"));
            if thaws {
                self.remove_effect(StatusEffectType::Freeze);
                events.push(BattleEvent::ThawedOut {
                    target: self.owner.clone(),
                });
            }
        }

        if self.has(StatusEffectType::Confusion)
            && damage > 20
            && rng.chance(0.3, "Snap Out Check")
        {
            self.remove_effect(StatusEffectType::Confusion);
            events.push(BattleEvent::SnappedOutOfConfusion {
                target: self.owner.clone(),
            });
        }

        if self.remove_effect(StatusEffectType::Shield) {
            events.push(BattleEvent::ShieldShattered {
                target: self.owner.clone(),
            });
        }

        if self.has(StatusEffectType::Reflect) {
            events.push(BattleEvent::BarrierHeld {
                target: self.owner.clone(),
            });
        }

        events
    }

    /// Adjust a hit before it lands. Shield soaks part of it; reflect
    /// reports the amount owed back to the attacker without consuming
    /// itself. Does not mutate; consumption happens in `on_hit`.
    pub fn modify_incoming_damage(&self, damage: u16, _move_type: CreatureType) -> IncomingDamage {
        let mut events = Vec::new();
        let mut final_damage = damage;
        let mut reflected = 0;

        if let Some(shield) = self.get(StatusEffectType::Shield) {
            let reduction = (0.25 * shield.intensity as f64).min(0.75);
            final_damage = (damage as f64 * (1.0 - reduction)).floor() as u16;
            events.push(BattleEvent::ShieldAbsorbed {
                target: self.owner.clone(),
                prevented: damage - final_damage,
            });
        }

        if let Some(reflect) = self.get(StatusEffectType::Reflect) {
            let fraction = (0.15 * reflect.intensity as f64).min(0.5);
            reflected = (damage as f64 * fraction).floor() as u16;
            events.push(BattleEvent::DamageReflected {
                target: self.owner.clone(),
                amount: reflected,
            });
        }

        IncomingDamage {
            damage: final_damage,
            reflected,
            events,
        }
    }

    /// Remove every present effect among `types`, reporting what was cured.
    pub fn cure(&mut self, types: &[StatusEffectType]) -> Vec<StatusEffectType> {
        let mut cured = Vec::new();
        for effect_type in types {
            if self.remove_effect(*effect_type) {
                cured.push(*effect_type);
            }
        }
        cured
    }

    // === Persistence ===

    /// Effects as a tagged list for the versioned save schema.
    pub fn effects_for_save(&self) -> Vec<StatusEffect> {
        self.effects.values().cloned().collect()
    }

    /// Rebuild from a saved effect list. Later duplicates of a type win,
    /// preserving whatever the save recorded last.
    pub fn from_saved_effects(owner: impl Into<String>, effects: Vec<StatusEffect>) -> Self {
        let mut manager = Self::new(owner);
        for effect in effects {
            manager.effects.insert(effect.effect_type, effect);
        }
        manager
    }
}
