#[cfg(test)]
mod tests {
    use crate::battle::events::BattleEvent;
    use crate::battle::field::FieldScope;
    use crate::battle::field_manager::{FieldManager, StatusProc};
    use crate::battle::tests::common::{basic_move, snapshot_map, TestCombatantBuilder};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{CreatureType, FieldConditionType, StatusEffectType};

    fn side(side_id: &str) -> FieldScope {
        FieldScope::Side(side_id.to_string())
    }

    #[test]
    fn new_weather_evicts_the_old_weather() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Sunny, 1, Some(5), 1, FieldScope::Global, None);
        let outcome = field.add_condition(
            FieldConditionType::Rainy,
            2,
            Some(5),
            1,
            FieldScope::Global,
            None,
        );

        assert_eq!(
            outcome.events,
            vec![
                BattleEvent::FieldExpired {
                    condition: FieldConditionType::Sunny
                },
                BattleEvent::FieldApplied {
                    condition: FieldConditionType::Rainy
                },
            ]
        );
        assert!(!field.is_active(FieldConditionType::Sunny));
        assert!(field.is_active(FieldConditionType::Rainy));
    }

    #[test]
    fn new_terrain_evicts_the_old_terrain_but_not_weather() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Sunny, 1, None, 1, FieldScope::Global, None);
        field.add_condition(FieldConditionType::Grassy, 1, None, 1, FieldScope::Global, None);
        field.add_condition(FieldConditionType::Misty, 2, None, 1, FieldScope::Global, None);

        assert!(field.is_active(FieldConditionType::Sunny));
        assert!(!field.is_active(FieldConditionType::Grassy));
        assert!(field.is_active(FieldConditionType::Misty));
        assert_eq!(field.conditions().count(), 2);
    }

    #[test]
    fn readding_identical_condition_never_grows_the_collection() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Sunny, 1, Some(3), 1, FieldScope::Global, None);
        let outcome = field.add_condition(
            FieldConditionType::Sunny,
            4,
            Some(8),
            1,
            FieldScope::Global,
            None,
        );

        assert!(outcome.applied);
        assert_eq!(
            outcome.events,
            vec![BattleEvent::FieldRefreshed {
                condition: FieldConditionType::Sunny
            }]
        );
        assert_eq!(field.conditions().count(), 1);
        let sunny = field.get(FieldConditionType::Sunny, &FieldScope::Global).unwrap();
        assert_eq!(sunny.duration, Some(8));
        assert_eq!(sunny.turn_applied, 4);
    }

    #[rstest]
    #[case(vec![CreatureType::Rock], 0)]
    #[case(vec![CreatureType::Ground], 0)]
    #[case(vec![CreatureType::Normal], 1)]
    fn sandstorm_spares_immune_types(
        #[case] types: Vec<CreatureType>,
        #[case] expected_hits: usize,
    ) {
        let mut field = FieldManager::new();
        field.add_condition(
            FieldConditionType::Sandstorm,
            1,
            Some(5),
            1,
            FieldScope::Global,
            None,
        );
        let combatants = snapshot_map(vec![TestCombatantBuilder::new("sprig")
            .with_max_hp(100)
            .with_types(types)
            .build()]);

        let events = field.process_turn_start(1, &combatants);
        let hits: Vec<&BattleEvent> = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::FieldDamage { .. }))
            .collect();
        assert_eq!(hits.len(), expected_hits);
        if expected_hits == 1 {
            assert_eq!(
                hits[0],
                &BattleEvent::FieldDamage {
                    target: "sprig".to_string(),
                    condition: FieldConditionType::Sandstorm,
                    damage: 6, // floor(100 * 0.0625)
                }
            );
        }
    }

    #[test]
    fn hailstorm_spares_ice_types() {
        let mut field = FieldManager::new();
        field.add_condition(
            FieldConditionType::Hailstorm,
            1,
            Some(5),
            1,
            FieldScope::Global,
            None,
        );
        let combatants = snapshot_map(vec![
            TestCombatantBuilder::new("floe")
                .with_types(vec![CreatureType::Ice])
                .build(),
            TestCombatantBuilder::new("sprig").with_max_hp(80).build(),
        ]);

        let events = field.process_turn_start(1, &combatants);
        assert_eq!(
            events,
            vec![BattleEvent::FieldDamage {
                target: "sprig".to_string(),
                condition: FieldConditionType::Hailstorm,
                damage: 5, // floor(80 * 0.0625)
            }]
        );
    }

    #[test]
    fn grassy_terrain_heals_wounded_combatants_on_its_side() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Grassy, 1, Some(5), 1, side("side-a"), None);
        let combatants = snapshot_map(vec![
            TestCombatantBuilder::new("sprig").with_hp(40).build(),
            TestCombatantBuilder::new("topped-up").build(),
            TestCombatantBuilder::new("enemy").with_side("side-b").with_hp(1).build(),
        ]);

        let events = field.process_turn_start(1, &combatants);
        // Full-HP allies and the other side get nothing.
        assert_eq!(
            events,
            vec![BattleEvent::FieldHeal {
                target: "sprig".to_string(),
                condition: FieldConditionType::Grassy,
                amount: 6,
            }]
        );
    }

    #[test]
    fn conditions_expire_at_turn_boundaries() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Sunny, 1, Some(2), 1, FieldScope::Global, None);
        let combatants = snapshot_map(vec![]);

        assert!(field.process_turn_start(2, &combatants).is_empty());
        let events = field.process_turn_end(3);
        assert_eq!(
            events,
            vec![BattleEvent::FieldExpired {
                condition: FieldConditionType::Sunny
            }]
        );
        assert!(field.is_empty());
    }

    #[rstest]
    #[case(FieldConditionType::Sunny, CreatureType::Fire, 1.5)]
    #[case(FieldConditionType::Sunny, CreatureType::Water, 0.5)]
    #[case(FieldConditionType::Rainy, CreatureType::Water, 1.5)]
    #[case(FieldConditionType::Rainy, CreatureType::Fire, 0.5)]
    #[case(FieldConditionType::Grassy, CreatureType::Grass, 1.3)]
    #[case(FieldConditionType::Electric, CreatureType::Electric, 1.3)]
    #[case(FieldConditionType::Misty, CreatureType::Fairy, 1.3)]
    #[case(FieldConditionType::Psychic, CreatureType::Psychic, 1.3)]
    #[case(FieldConditionType::Sunny, CreatureType::Normal, 1.0)]
    fn move_damage_multipliers_by_condition(
        #[case] condition: FieldConditionType,
        #[case] move_type: CreatureType,
        #[case] expected: f64,
    ) {
        let mut field = FieldManager::new();
        field.add_condition(condition, 1, None, 1, FieldScope::Global, None);
        let move_data = basic_move("Probe", 50, move_type);

        let modifiers = field.move_modifiers(&move_data, "side-a");
        assert!((modifiers.damage - expected).abs() < 1e-9);
    }

    #[test]
    fn fog_cuts_accuracy() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Fog, 1, None, 1, FieldScope::Global, None);
        let move_data = basic_move("Probe", 50, CreatureType::Normal);

        let modifiers = field.move_modifiers(&move_data, "side-a");
        assert!((modifiers.accuracy - 0.7).abs() < 1e-9);
        assert_eq!(modifiers.damage, 1.0);
    }

    #[test]
    fn psychic_terrain_grounds_priority_moves_from_its_side() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Psychic, 1, None, 1, side("side-a"), None);

        let mut quick = basic_move("Quick Jab", 40, CreatureType::Normal);
        quick.priority = 2;

        let modifiers = field.move_modifiers(&quick, "side-a");
        assert_eq!(modifiers.priority_delta, -2);

        // The other side's priority is untouched.
        let modifiers = field.move_modifiers(&quick, "side-b");
        assert_eq!(modifiers.priority_delta, 0);

        // Negative priority is not boosted.
        let mut slow = basic_move("Lumber", 40, CreatureType::Normal);
        slow.priority = -1;
        let modifiers = field.move_modifiers(&slow, "side-a");
        assert_eq!(modifiers.priority_delta, 0);
    }

    #[test]
    fn misty_terrain_blocks_all_status_on_its_side() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Misty, 1, None, 1, side("side-a"), None);

        let ally = TestCombatantBuilder::new("sprig").build();
        let enemy = TestCombatantBuilder::new("fern").with_side("side-b").build();

        assert!(!field.can_apply_status(StatusEffectType::Burn, &ally));
        assert!(!field.can_apply_status(StatusEffectType::Sleep, &ally));
        assert!(field.can_apply_status(StatusEffectType::Burn, &enemy));
    }

    #[test]
    fn electric_terrain_blocks_only_sleep() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Electric, 1, None, 1, side("side-a"), None);

        let ally = TestCombatantBuilder::new("sprig").build();
        assert!(!field.can_apply_status(StatusEffectType::Sleep, &ally));
        assert!(field.can_apply_status(StatusEffectType::Burn, &ally));
    }

    #[rstest]
    #[case(1, 6)] // floor(100 * 0.0625 * 1)
    #[case(2, 12)]
    #[case(3, 18)]
    fn spikes_damage_scales_with_layers(#[case] layers_added: u8, #[case] expected: u16) {
        let mut field = FieldManager::new();
        for _ in 0..layers_added {
            field.add_condition(FieldConditionType::Spikes, 1, None, 1, side("side-a"), None);
        }
        let snapshot = TestCombatantBuilder::new("sprig").with_max_hp(100).build();

        let outcome = field.process_switch_in("sprig", &snapshot);
        assert_eq!(
            outcome.events,
            vec![BattleEvent::HazardDamage {
                target: "sprig".to_string(),
                condition: FieldConditionType::Spikes,
                damage: expected,
            }]
        );
    }

    #[test]
    fn spikes_layers_cap_at_three() {
        let mut field = FieldManager::new();
        for _ in 0..5 {
            field.add_condition(FieldConditionType::Spikes, 1, None, 1, side("side-a"), None);
        }
        let spikes = field
            .get(FieldConditionType::Spikes, &side("side-a"))
            .unwrap();
        assert_eq!(spikes.intensity, 3);
        assert_eq!(field.conditions().count(), 1);
    }

    #[test]
    fn toxic_spikes_queue_poison_for_non_poison_types() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::ToxicSpikes, 1, None, 2, side("side-a"), None);

        let normal = TestCombatantBuilder::new("sprig").build();
        let outcome = field.process_switch_in("sprig", &normal);
        assert_eq!(
            outcome.status_procs,
            vec![StatusProc {
                target: "sprig".to_string(),
                status: StatusEffectType::Poison,
                duration: None,
                intensity: 2,
                source: None,
            }]
        );

        let venomous = TestCombatantBuilder::new("toxin")
            .with_types(vec![CreatureType::Poison])
            .build();
        let outcome = field.process_switch_in("toxin", &venomous);
        assert!(outcome.status_procs.is_empty());
    }

    #[rstest]
    #[case(vec![CreatureType::Fire, CreatureType::Flying], 50)] // x2 x2
    #[case(vec![CreatureType::Steel], 6)] // x0.5
    #[case(vec![CreatureType::Normal], 12)] // x1
    #[case(vec![CreatureType::Fire, CreatureType::Ground], 12)] // x2 x0.5
    fn stealth_rock_damage_follows_typing(
        #[case] types: Vec<CreatureType>,
        #[case] expected: u16,
    ) {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::StealthRock, 1, None, 1, side("side-a"), None);
        let snapshot = TestCombatantBuilder::new("sprig")
            .with_max_hp(100)
            .with_types(types)
            .build();

        let outcome = field.process_switch_in("sprig", &snapshot);
        assert_eq!(
            outcome.events,
            vec![BattleEvent::HazardDamage {
                target: "sprig".to_string(),
                condition: FieldConditionType::StealthRock,
                damage: expected,
            }]
        );
    }

    #[test]
    fn hazards_only_trigger_on_their_own_side() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::Spikes, 1, None, 3, side("side-b"), None);

        let snapshot = TestCombatantBuilder::new("sprig").build();
        let outcome = field.process_switch_in("sprig", &snapshot);
        assert!(outcome.events.is_empty());
        assert!(outcome.status_procs.is_empty());
    }

    #[test]
    fn rooms_toggle_off_on_reapplication() {
        let mut field = FieldManager::new();
        let outcome = field.add_condition(
            FieldConditionType::TrickRoom,
            1,
            Some(5),
            1,
            FieldScope::Global,
            None,
        );
        assert_eq!(
            outcome.events,
            vec![BattleEvent::FieldApplied {
                condition: FieldConditionType::TrickRoom
            }]
        );
        assert!(field.speed_inverted());

        let outcome = field.add_condition(
            FieldConditionType::TrickRoom,
            2,
            Some(5),
            1,
            FieldScope::Global,
            None,
        );
        assert_eq!(
            outcome.events,
            vec![BattleEvent::FieldExpired {
                condition: FieldConditionType::TrickRoom
            }]
        );
        assert!(!field.speed_inverted());
    }

    #[test]
    fn rooms_are_independent_of_each_other() {
        let mut field = FieldManager::new();
        field.add_condition(FieldConditionType::TrickRoom, 1, None, 1, FieldScope::Global, None);
        field.add_condition(FieldConditionType::MagicRoom, 1, None, 1, FieldScope::Global, None);
        field.add_condition(FieldConditionType::WonderRoom, 1, None, 1, FieldScope::Global, None);

        assert!(field.speed_inverted());
        assert!(field.items_suppressed());
        assert!(field.defenses_swapped());
        assert_eq!(field.conditions().count(), 3);
    }
}
