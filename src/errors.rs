use std::fmt;

/// Errors raised while validating move/item content at load time. Content
/// problems surface when the database loads, never mid-battle.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    /// A proc chance outside 1..=100.
    ChanceOutOfRange { name: String, chance: u8 },
    /// A declared accuracy outside 1..=100.
    AccuracyOutOfRange { name: String, accuracy: u8 },
    /// A status-effect intensity outside 1..=5.
    StatusIntensityOutOfRange { name: String, intensity: u8 },
    /// A field-condition intensity outside 1..=3.
    FieldIntensityOutOfRange { name: String, intensity: u8 },
    /// A stat change of zero stages or more than five.
    StagesOutOfRange { name: String, stages: i8 },
    /// A drain/recoil/heal percentage outside 1..=100.
    PercentOutOfRange { name: String, percent: u8 },
    /// A crit multiplier that is non-positive or non-finite.
    InvalidCritMultiplier { name: String, multiplier: f64 },
    /// An effect with a declared duration of zero turns.
    ZeroDuration { name: String },
    /// A cure item listing no status types.
    EmptyCureList { name: String },
}

/// Errors raised while rehydrating a saved battle.
#[derive(Debug)]
pub enum SaveDataError {
    /// The save was written by an incompatible schema version.
    UnsupportedVersion { found: u32, supported: u32 },
    /// The save blob did not deserialize.
    Malformed(serde_json::Error),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::ChanceOutOfRange { name, chance } => {
                write!(f, "'{}': effect chance {} outside 1..=100", name, chance)
            }
            ContentError::AccuracyOutOfRange { name, accuracy } => {
                write!(f, "'{}': accuracy {} outside 1..=100", name, accuracy)
            }
            ContentError::StatusIntensityOutOfRange { name, intensity } => {
                write!(f, "'{}': status intensity {} outside 1..=5", name, intensity)
            }
            ContentError::FieldIntensityOutOfRange { name, intensity } => {
                write!(f, "'{}': field intensity {} outside 1..=3", name, intensity)
            }
            ContentError::StagesOutOfRange { name, stages } => {
                write!(f, "'{}': stat change of {} stages", name, stages)
            }
            ContentError::PercentOutOfRange { name, percent } => {
                write!(f, "'{}': percentage {} outside 1..=100", name, percent)
            }
            ContentError::InvalidCritMultiplier { name, multiplier } => {
                write!(f, "'{}': crit multiplier {} is not usable", name, multiplier)
            }
            ContentError::ZeroDuration { name } => {
                write!(f, "'{}': declared effect lasts zero turns", name)
            }
            ContentError::EmptyCureList { name } => {
                write!(f, "'{}': cure item lists no status types", name)
            }
        }
    }
}

impl fmt::Display for SaveDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveDataError::UnsupportedVersion { found, supported } => write!(
                f,
                "save schema version {} is not supported (expected {})",
                found, supported
            ),
            SaveDataError::Malformed(err) => write!(f, "malformed save data: {}", err),
        }
    }
}

impl std::error::Error for ContentError {}

impl std::error::Error for SaveDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveDataError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SaveDataError {
    fn from(err: serde_json::Error) -> Self {
        SaveDataError::Malformed(err)
    }
}

/// Type alias for Results using ContentError
pub type ContentResult<T> = Result<T, ContentError>;

/// Type alias for Results using SaveDataError
pub type SaveResult<T> = Result<T, SaveDataError>;
