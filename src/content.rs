//! Load-time validation of externally-owned move and item content.
//!
//! Effect names are typed enums, so an unknown name already fails
//! deserialization; these checks catch the remaining out-of-range numbers so
//! a bad content entry errors when the database loads instead of silently
//! misbehaving at battle time.

use schema::{ItemCategory, ItemData, MoveData, MoveEffect};

use crate::errors::{ContentError, ContentResult};

pub fn validate_move(move_data: &MoveData) -> ContentResult<()> {
    let name = &move_data.name;

    if let Some(accuracy) = move_data.accuracy {
        if accuracy == 0 || accuracy > 100 {
            return Err(ContentError::AccuracyOutOfRange {
                name: name.clone(),
                accuracy,
            });
        }
    }

    for effect in &move_data.effects {
        let chance = effect.chance();
        if chance == 0 || chance > 100 {
            return Err(ContentError::ChanceOutOfRange {
                name: name.clone(),
                chance,
            });
        }
        match effect {
            MoveEffect::InflictStatus {
                duration,
                intensity,
                ..
            } => {
                if *intensity == 0 || *intensity > 5 {
                    return Err(ContentError::StatusIntensityOutOfRange {
                        name: name.clone(),
                        intensity: *intensity,
                    });
                }
                if *duration == Some(0) {
                    return Err(ContentError::ZeroDuration { name: name.clone() });
                }
            }
            MoveEffect::StatChange { stages, .. } => {
                if *stages == 0 || stages.unsigned_abs() > 5 {
                    return Err(ContentError::StagesOutOfRange {
                        name: name.clone(),
                        stages: *stages,
                    });
                }
            }
            MoveEffect::ApplyField {
                duration,
                intensity,
                ..
            } => {
                if *intensity == 0 || *intensity > 3 {
                    return Err(ContentError::FieldIntensityOutOfRange {
                        name: name.clone(),
                        intensity: *intensity,
                    });
                }
                if *duration == Some(0) {
                    return Err(ContentError::ZeroDuration { name: name.clone() });
                }
            }
            MoveEffect::BonusCrit { multiplier, .. } => {
                if !multiplier.is_finite() || *multiplier <= 0.0 {
                    return Err(ContentError::InvalidCritMultiplier {
                        name: name.clone(),
                        multiplier: *multiplier,
                    });
                }
            }
            MoveEffect::Drain { percent } | MoveEffect::Recoil { percent } => {
                if *percent == 0 || *percent > 100 {
                    return Err(ContentError::PercentOutOfRange {
                        name: name.clone(),
                        percent: *percent,
                    });
                }
            }
            MoveEffect::Flinch { .. } => {}
        }
    }
    Ok(())
}

pub fn validate_item(item: &ItemData) -> ContentResult<()> {
    let name = &item.name;
    match &item.category {
        ItemCategory::Healing { percent, flat } => {
            if *percent > 100 {
                return Err(ContentError::PercentOutOfRange {
                    name: name.clone(),
                    percent: *percent,
                });
            }
            if *percent == 0 && *flat == 0 {
                return Err(ContentError::PercentOutOfRange {
                    name: name.clone(),
                    percent: 0,
                });
            }
        }
        ItemCategory::StatusCure { statuses } => {
            if statuses.is_empty() {
                return Err(ContentError::EmptyCureList { name: name.clone() });
            }
        }
        ItemCategory::StatBoost { stages, .. } => {
            if *stages == 0 || *stages > 5 {
                return Err(ContentError::StagesOutOfRange {
                    name: name.clone(),
                    stages: *stages as i8,
                });
            }
        }
        ItemCategory::BattleEnhancer { .. } => {}
    }
    Ok(())
}

/// Validate a whole content table, reporting the first offender.
pub fn validate_moves<'a>(moves: impl IntoIterator<Item = &'a MoveData>) -> ContentResult<()> {
    for move_data in moves {
        validate_move(move_data)?;
    }
    Ok(())
}

pub fn validate_items<'a>(items: impl IntoIterator<Item = &'a ItemData>) -> ContentResult<()> {
    for item in items {
        validate_item(item)?;
    }
    Ok(())
}
