//! Blood-sugar banding.
//!
//! A reading maps to exactly one band through a per-context threshold
//! table. Bands are upper-inclusive: a fasting 99 is normal, 99.5 is
//! elevated. The function is total; `NaN` falls through to `High`.

use serde::{Deserialize, Serialize};

use crate::models::enums::ReadingTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Normal,
    Elevated,
    High,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Normal => "normal",
            Band::Elevated => "elevated",
            Band::High => "high",
        }
    }

    /// Whether the reading warrants attention (anything but normal).
    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, Band::Normal)
    }
}

/// Threshold context for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingContext {
    Fasting,
    Other,
}

impl From<ReadingTime> for ReadingContext {
    fn from(time: ReadingTime) -> Self {
        match time {
            ReadingTime::Fasting => ReadingContext::Fasting,
            ReadingTime::BeforeLunch | ReadingTime::BeforeDinner | ReadingTime::Bedtime => {
                ReadingContext::Other
            }
        }
    }
}

/// Band boundaries in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Readings strictly below this are low.
    pub low_below: f64,
    /// Highest normal reading (inclusive).
    pub normal_max: f64,
    /// Highest elevated reading (inclusive).
    pub elevated_max: f64,
}

pub const FASTING_THRESHOLDS: Thresholds = Thresholds {
    low_below: 70.0,
    normal_max: 99.0,
    elevated_max: 125.0,
};

pub const NON_FASTING_THRESHOLDS: Thresholds = Thresholds {
    low_below: 70.0,
    normal_max: 140.0,
    elevated_max: 199.0,
};

pub fn thresholds_for(context: ReadingContext) -> &'static Thresholds {
    match context {
        ReadingContext::Fasting => &FASTING_THRESHOLDS,
        ReadingContext::Other => &NON_FASTING_THRESHOLDS,
    }
}

impl Thresholds {
    pub fn classify(&self, value: f64) -> Band {
        if value < self.low_below {
            Band::Low
        } else if value <= self.normal_max {
            Band::Normal
        } else if value <= self.elevated_max {
            Band::Elevated
        } else {
            Band::High
        }
    }
}

pub fn classify_blood_sugar(value: f64, context: ReadingContext) -> Band {
    thresholds_for(context).classify(value)
}
