use schema::FieldConditionType;
use serde::{Deserialize, Serialize};

pub const MIN_CONDITION_INTENSITY: u8 = 1;
pub const MAX_CONDITION_INTENSITY: u8 = 3;

/// Where a field condition applies: the whole battlefield or one side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldScope {
    Global,
    Side(String),
}

impl FieldScope {
    pub fn covers(&self, side_id: &str) -> bool {
        match self {
            FieldScope::Global => true,
            FieldScope::Side(side) => side == side_id,
        }
    }
}

/// One timed environmental modifier: weather, terrain, hazard, or room.
/// For hazards, `intensity` is the layer count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub condition_type: FieldConditionType,
    /// Turns until expiry; `None` means until replaced or toggled off.
    pub duration: Option<u8>,
    pub intensity: u8,
    pub scope: FieldScope,
    pub source: Option<String>,
    pub turn_applied: u32,
    pub last_proc_turn: Option<u32>,
}

impl FieldCondition {
    pub fn new(
        condition_type: FieldConditionType,
        turn: u32,
        duration: Option<u8>,
        intensity: u8,
        scope: FieldScope,
        source: Option<String>,
    ) -> Self {
        Self {
            condition_type,
            duration,
            intensity: intensity.clamp(MIN_CONDITION_INTENSITY, MAX_CONDITION_INTENSITY),
            scope,
            source,
            turn_applied: turn,
            last_proc_turn: None,
        }
    }

    pub fn turns_active(&self, turn: u32) -> u32 {
        turn.saturating_sub(self.turn_applied)
    }

    pub fn is_expired(&self, turn: u32) -> bool {
        match self.duration {
            None => false,
            Some(duration) => self.turns_active(turn) >= duration as u32,
        }
    }

    /// Refresh on identical (type, scope) re-application: max intensity and
    /// duration (indefinite wins), application turn reset.
    pub fn refresh(&mut self, turn: u32, duration: Option<u8>, intensity: u8) {
        let intensity = intensity.clamp(MIN_CONDITION_INTENSITY, MAX_CONDITION_INTENSITY);
        self.intensity = self.intensity.max(intensity);
        self.duration = match (self.duration, duration) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(a.max(b)),
        };
        self.turn_applied = turn;
    }

    /// Hazard stacking: layers add, capped at the intensity ceiling.
    pub fn stack(&mut self, turn: u32, duration: Option<u8>, added_layers: u8) {
        self.intensity = self
            .intensity
            .saturating_add(added_layers.max(MIN_CONDITION_INTENSITY))
            .min(MAX_CONDITION_INTENSITY);
        self.duration = match (self.duration, duration) {
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(a.max(b)),
        };
        self.turn_applied = turn;
    }
}
