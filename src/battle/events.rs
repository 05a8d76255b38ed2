use schema::{FieldConditionType, StatusEffectType};
use serde::{Deserialize, Serialize};

/// Why an otherwise well-formed status application was refused. Rule
/// rejections are ordinary outcomes, never errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum RejectReason {
    AlreadyHasPrimaryAilment,
    ProtectedByImmunity,
    BlockedByTerrain(FieldConditionType),
}

/// Why a combatant could not take its chosen action this turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsFlinching,
    IsFullyParalyzed,
}

/// The result of an action-gating check. `SelfDamage` means the actor still
/// acts, but hits itself instead of using its chosen move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionCheck {
    Acts,
    SelfDamage { damage: u16 },
    Blocked { reason: ActionFailureReason },
}

/// Everything the engine reports back to its caller. Each event carries the
/// machine-readable delta (ids, amounts) that the external turn loop applies
/// to stored state; `format` renders the short canned fragment the
/// presentation layer shows, or `None` for silent events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Status effects
    StatusApplied {
        target: String,
        status: StatusEffectType,
    },
    StatusRefreshed {
        target: String,
        status: StatusEffectType,
    },
    StatusRejected {
        target: String,
        status: StatusEffectType,
        reason: RejectReason,
    },
    StatusExpired {
        target: String,
        status: StatusEffectType,
    },
    StatusCured {
        target: String,
        status: StatusEffectType,
    },
    StatusDamage {
        target: String,
        status: StatusEffectType,
        damage: u16,
    },
    /// Leech: damage drained off `target`, owed to `to`.
    StatusDrain {
        target: String,
        to: String,
        damage: u16,
    },
    ConfusionSelfHit {
        target: String,
        damage: u16,
    },
    ActionBlocked {
        target: String,
        reason: ActionFailureReason,
    },
    WokeUp {
        target: String,
    },
    ThawedOut {
        target: String,
    },
    SnappedOutOfConfusion {
        target: String,
    },
    ShieldShattered {
        target: String,
    },
    ShieldAbsorbed {
        target: String,
        prevented: u16,
    },
    /// Reflect: `amount` is owed back to whoever struck `target`.
    DamageReflected {
        target: String,
        amount: u16,
    },
    BarrierHeld {
        target: String,
    },

    // Field conditions
    FieldApplied {
        condition: FieldConditionType,
    },
    FieldRefreshed {
        condition: FieldConditionType,
    },
    FieldExpired {
        condition: FieldConditionType,
    },
    FieldDamage {
        target: String,
        condition: FieldConditionType,
        damage: u16,
    },
    FieldHeal {
        target: String,
        condition: FieldConditionType,
        amount: u16,
    },
    HazardDamage {
        target: String,
        condition: FieldConditionType,
        damage: u16,
    },

    // Attack pipeline
    MoveDamageModified {
        multiplier: f64,
    },
    MoveAccuracyModified {
        multiplier: f64,
    },
    CriticalHit,
    FocusConsumed {
        target: String,
    },
    ChargeReleased {
        target: String,
    },

    // Items
    ItemHealed {
        target: String,
        amount: u16,
    },
    ItemNoEffect {
        item: String,
    },
    CriticalBoosted {
        target: String,
    },
}

impl BattleEvent {
    /// Renders the short user-facing fragment for this event, or `None` for
    /// silent bookkeeping events. Real presentation (names, embeds) is the
    /// external rendering layer's job.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} {}", target, status_applied_text(*status)))
            }
            BattleEvent::StatusRefreshed { .. } => None,
            BattleEvent::StatusRejected { target, reason, .. } => match reason {
                RejectReason::AlreadyHasPrimaryAilment => {
                    Some(format!("{} already has a status condition!", target))
                }
                RejectReason::ProtectedByImmunity => {
                    Some(format!("{} is protected from status effects!", target))
                }
                RejectReason::BlockedByTerrain(condition) => Some(format!(
                    "The {} protected {}!",
                    field_noun(*condition),
                    target
                )),
            },
            BattleEvent::StatusExpired { target, status } => match status {
                // Flinch is cleared silently at end of turn.
                StatusEffectType::Flinch => None,
                _ => Some(format!("{}'s {} wore off.", target, status_noun(*status))),
            },
            BattleEvent::StatusCured { target, status } => Some(format!(
                "{} was cured of its {}!",
                target,
                status_noun(*status)
            )),
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target,
                status_noun(*status),
                damage
            )),
            BattleEvent::StatusDrain { target, damage, .. } => Some(format!(
                "{}'s health is sapped! ({} damage)",
                target, damage
            )),
            BattleEvent::ConfusionSelfHit { target, damage } => Some(format!(
                "{} hurt itself in its confusion! ({} damage)",
                target, damage
            )),
            BattleEvent::ActionBlocked { target, reason } => match reason {
                ActionFailureReason::IsAsleep => Some(format!("{} is fast asleep.", target)),
                ActionFailureReason::IsFrozen => Some(format!("{} is frozen solid!", target)),
                ActionFailureReason::IsFlinching => {
                    Some(format!("{} flinched and couldn't move!", target))
                }
                ActionFailureReason::IsFullyParalyzed => {
                    Some(format!("{} is fully paralyzed!", target))
                }
            },
            BattleEvent::WokeUp { target } => Some(format!("{} woke up!", target)),
            BattleEvent::ThawedOut { target } => Some(format!("{} thawed out!", target)),
            BattleEvent::SnappedOutOfConfusion { target } => {
                Some(format!("{} snapped out of its confusion!", target))
            }
            BattleEvent::ShieldShattered { target } => {
                Some(format!("{}'s shield shattered!", target))
            }
            BattleEvent::ShieldAbsorbed { target, prevented } => Some(format!(
                "{}'s shield absorbed {} damage!",
                target, prevented
            )),
            BattleEvent::DamageReflected { target, amount } => Some(format!(
                "{}'s barrier reflected {} damage!",
                target, amount
            )),
            BattleEvent::BarrierHeld { target } => {
                Some(format!("{}'s barrier shimmered!", target))
            }
            BattleEvent::FieldApplied { condition } => {
                Some(field_applied_text(*condition).to_string())
            }
            BattleEvent::FieldRefreshed { .. } => None,
            BattleEvent::FieldExpired { condition } => {
                Some(format!("The {} faded away.", field_noun(*condition)))
            }
            BattleEvent::FieldDamage {
                target,
                condition,
                damage,
            } => Some(format!(
                "{} is buffeted by the {}! ({} damage)",
                target,
                field_noun(*condition),
                damage
            )),
            BattleEvent::FieldHeal { target, amount, .. } => Some(format!(
                "{} recovered {} HP from the lush terrain!",
                target, amount
            )),
            BattleEvent::HazardDamage {
                target,
                condition,
                damage,
            } => Some(format!(
                "{} was hurt by the {}! ({} damage)",
                target,
                field_noun(*condition),
                damage
            )),
            BattleEvent::MoveDamageModified { multiplier } => {
                if *multiplier > 1.0 {
                    Some("The field strengthened the attack!".to_string())
                } else {
                    Some("The field weakened the attack...".to_string())
                }
            }
            BattleEvent::MoveAccuracyModified { .. } => {
                Some("It's hard to aim in the conditions!".to_string())
            }
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::FocusConsumed { target } => {
                Some(format!("{}'s focus sharpened its strike!", target))
            }
            BattleEvent::ChargeReleased { target } => {
                Some(format!("{} unleashed its stored power!", target))
            }
            BattleEvent::ItemHealed { target, amount } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::ItemNoEffect { .. } => Some("It had no effect...".to_string()),
            BattleEvent::CriticalBoosted { target } => {
                Some(format!("{} is primed for critical hits!", target))
            }
        }
    }
}

fn status_applied_text(status: StatusEffectType) -> &'static str {
    match status {
        StatusEffectType::Burn => "was burned!",
        StatusEffectType::Poison => "was poisoned!",
        StatusEffectType::Paralysis => "is paralyzed! It may be unable to move!",
        StatusEffectType::Sleep => "fell asleep!",
        StatusEffectType::Freeze => "was frozen solid!",
        StatusEffectType::Confusion => "became confused!",
        StatusEffectType::Flinch => "flinched!",
        StatusEffectType::Bound => "was bound tight!",
        StatusEffectType::Leech => "was seeded with leeching spores!",
        StatusEffectType::AttackUp => "felt its attack rise!",
        StatusEffectType::AttackDown => "felt its attack fall!",
        StatusEffectType::DefenseUp => "felt its defense rise!",
        StatusEffectType::DefenseDown => "felt its defense fall!",
        StatusEffectType::SpeedUp => "felt its speed rise!",
        StatusEffectType::SpeedDown => "felt its speed fall!",
        StatusEffectType::Shield => "raised a protective shield!",
        StatusEffectType::Charged => "began storing power!",
        StatusEffectType::Focus => "is tightening its focus!",
        StatusEffectType::Curse => "was cursed!",
        StatusEffectType::Immunity => "became immune to status effects!",
        StatusEffectType::Reflect => "put up a reflective barrier!",
    }
}

fn status_noun(status: StatusEffectType) -> &'static str {
    match status {
        StatusEffectType::Burn => "burn",
        StatusEffectType::Poison => "poison",
        StatusEffectType::Paralysis => "paralysis",
        StatusEffectType::Sleep => "sleep",
        StatusEffectType::Freeze => "freeze",
        StatusEffectType::Confusion => "confusion",
        StatusEffectType::Flinch => "flinch",
        StatusEffectType::Bound => "bind",
        StatusEffectType::Leech => "leeching spores",
        StatusEffectType::AttackUp => "attack boost",
        StatusEffectType::AttackDown => "weakened attack",
        StatusEffectType::DefenseUp => "defense boost",
        StatusEffectType::DefenseDown => "weakened defense",
        StatusEffectType::SpeedUp => "speed boost",
        StatusEffectType::SpeedDown => "weakened speed",
        StatusEffectType::Shield => "shield",
        StatusEffectType::Charged => "stored power",
        StatusEffectType::Focus => "focus",
        StatusEffectType::Curse => "curse",
        StatusEffectType::Immunity => "status immunity",
        StatusEffectType::Reflect => "reflective barrier",
    }
}

fn field_applied_text(condition: FieldConditionType) -> &'static str {
    match condition {
        FieldConditionType::Sunny => "The sunlight turned harsh!",
        FieldConditionType::Rainy => "Rain began to pour!",
        FieldConditionType::Sandstorm => "A sandstorm kicked up!",
        FieldConditionType::Hailstorm => "Hail began to fall!",
        FieldConditionType::Fog => "A thick fog rolled in!",
        FieldConditionType::Grassy => "Grass grew thick across the battlefield!",
        FieldConditionType::Electric => "An electric current ran along the battlefield!",
        FieldConditionType::Misty => "Mist swirled over the battlefield!",
        FieldConditionType::Psychic => "The battlefield began to feel strange!",
        FieldConditionType::Spikes => "Spikes were scattered on the ground!",
        FieldConditionType::ToxicSpikes => "Poisonous spikes were scattered on the ground!",
        FieldConditionType::StealthRock => "Jagged stones rose into the air!",
        FieldConditionType::TrickRoom => "The dimensions of the field were twisted!",
        FieldConditionType::MagicRoom => "A bizarre zone suppressed all items!",
        FieldConditionType::WonderRoom => "A bizarre zone swapped every defense!",
    }
}

fn field_noun(condition: FieldConditionType) -> &'static str {
    match condition {
        FieldConditionType::Sunny => "harsh sunlight",
        FieldConditionType::Rainy => "rain",
        FieldConditionType::Sandstorm => "sandstorm",
        FieldConditionType::Hailstorm => "hail",
        FieldConditionType::Fog => "fog",
        FieldConditionType::Grassy => "grassy terrain",
        FieldConditionType::Electric => "electric terrain",
        FieldConditionType::Misty => "misty terrain",
        FieldConditionType::Psychic => "psychic terrain",
        FieldConditionType::Spikes => "spikes",
        FieldConditionType::ToxicSpikes => "toxic spikes",
        FieldConditionType::StealthRock => "jagged stones",
        FieldConditionType::TrickRoom => "twisted dimensions",
        FieldConditionType::MagicRoom => "item-suppressing zone",
        FieldConditionType::WonderRoom => "defense-swapping zone",
    }
}

/// Accumulator for the events of one action, in emission order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: Vec<BattleEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Print every formatted fragment; falls back to debug for silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
