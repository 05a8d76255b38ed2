use std::collections::BTreeMap;

use schema::{BaseStats, CombatantSnapshot, CreatureType, MoveData};

use crate::battle::rng::BattleRng;

/// A builder for combatant snapshots with sensible defaults.
///
/// # Example
/// ```rust,ignore
/// let snapshot = TestCombatantBuilder::new("sprig")
///     .with_types(vec![CreatureType::Fire])
///     .with_max_hp(100)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    id: String,
    side_id: String,
    max_hp: u16,
    current_hp: Option<u16>,
    types: Vec<CreatureType>,
}

impl TestCombatantBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            side_id: "side-a".to_string(),
            max_hp: 100,
            current_hp: None,
            types: vec![CreatureType::Normal],
        }
    }

    pub fn with_side(mut self, side_id: &str) -> Self {
        self.side_id = side_id.to_string();
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Sets current HP; if not set, the combatant is at full health.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_types(mut self, types: Vec<CreatureType>) -> Self {
        self.types = types;
        self
    }

    pub fn build(self) -> CombatantSnapshot {
        CombatantSnapshot {
            id: self.id,
            max_hp: self.max_hp,
            current_hp: self.current_hp.unwrap_or(self.max_hp),
            types: self.types,
            side_id: self.side_id,
            stats: BaseStats {
                attack: 50,
                defense: 50,
                speed: 50,
                special: 50,
            },
        }
    }
}

/// A plain damaging move with no secondary effects.
pub fn basic_move(name: &str, power: u16, move_type: CreatureType) -> MoveData {
    MoveData {
        name: name.to_string(),
        power,
        accuracy: Some(100),
        move_type,
        priority: 0,
        effects: Vec::new(),
    }
}

/// Snapshot map keyed by id, as the turn-phase hooks expect.
pub fn snapshot_map(snapshots: Vec<CombatantSnapshot>) -> BTreeMap<String, CombatantSnapshot> {
    snapshots.into_iter().map(|s| (s.id.clone(), s)).collect()
}

/// Every probabilistic check succeeds.
pub fn pass_all_rng() -> BattleRng {
    BattleRng::new_for_test(vec![1; 100])
}

/// Every probabilistic check fails (except certainties).
pub fn fail_all_rng() -> BattleRng {
    BattleRng::new_for_test(vec![10_000; 100])
}

/// Mid-scale outcomes: checks at 50% or better succeed, the rest fail.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![5_000; 100])
}
