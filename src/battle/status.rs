use schema::StatusEffectType;
use serde::{Deserialize, Serialize};

pub const MIN_STATUS_INTENSITY: u8 = 1;
pub const MAX_STATUS_INTENSITY: u8 = 5;

/// One timed, stacked alteration on a single combatant.
///
/// `source` is an id only — never a handle into another combatant's state —
/// so a saved battle can be rehydrated without fixing up references.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusEffect {
    pub effect_type: StatusEffectType,
    /// Turns until expiry; `None` means indefinite.
    pub duration: Option<u8>,
    /// Magnitude scalar, clamped to [1, 5]. Distinct from duration.
    pub intensity: u8,
    pub source: Option<String>,
    /// Free-form extras declared by content (e.g. a bind move's flavor key).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub data: serde_json::Map<String, serde_json::Value>,
    pub turn_applied: u32,
    pub last_proc_turn: Option<u32>,
}

impl StatusEffect {
    pub fn new(
        effect_type: StatusEffectType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        source: Option<String>,
    ) -> Self {
        Self {
            effect_type,
            duration,
            intensity: intensity.clamp(MIN_STATUS_INTENSITY, MAX_STATUS_INTENSITY),
            source,
            data: serde_json::Map::new(),
            turn_applied: turn,
            last_proc_turn: None,
        }
    }

    /// Whole turns this effect has been active as of `turn`.
    pub fn turns_active(&self, turn: u32) -> u32 {
        turn.saturating_sub(self.turn_applied)
    }

    pub fn is_expired(&self, turn: u32) -> bool {
        match self.duration {
            None => false,
            Some(duration) => self.turns_active(turn) >= duration as u32,
        }
    }

    /// Merge a re-application into this slot: intensity takes the max,
    /// duration takes the max with indefinite winning, and the application
    /// turn resets so the effect is refreshed rather than duplicated.
    pub fn merge(
        &mut self,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        source: Option<String>,
    ) {
        let intensity = intensity.clamp(MIN_STATUS_INTENSITY, MAX_STATUS_INTENSITY);
        self.intensity = self.intensity.max(intensity);
        self.duration = match (self.duration, duration) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(a.max(b)),
        };
        self.turn_applied = turn;
        if source.is_some() {
            self.source = source;
        }
    }
}
