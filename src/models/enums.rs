use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + label + std::str::FromStr pattern.
/// The string value is also the persisted serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal, $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Human-readable label for pickers and history rows.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ValidationError::InvalidChoice {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male", "Male",
    Female => "female", "Female",
    Other => "other", "Other",
});

str_enum!(ReadingTime {
    Fasting => "fasting", "Fasting",
    BeforeLunch => "beforeLunch", "Before Lunch",
    BeforeDinner => "beforeDinner", "Before Dinner",
    Bedtime => "bedtime", "Bedtime",
});

str_enum!(WeightUnit {
    Lbs => "lbs", "Pounds (lbs)",
    Kg => "kg", "Kilograms (kg)",
});

str_enum!(MedicationFrequency {
    OnceDaily => "once daily", "Once daily",
    TwiceDaily => "twice daily", "Twice daily (BID)",
    ThreeTimesDaily => "three times daily", "Three times daily (TID)",
    FourTimesDaily => "four times daily", "Four times daily (QID)",
    EveryOtherDay => "every other day", "Every other day",
    Weekly => "weekly", "Weekly",
    AsNeeded => "as needed", "As needed (PRN)",
});

str_enum!(Recipient {
    Physician => "physician", "Primary Physician",
    Nurse => "nurse", "Nurse",
    Dietitian => "dietitian", "Dietitian",
    Pharmacist => "pharmacist", "Pharmacist",
    Endocrinologist => "endocrinologist", "Endocrinologist",
    Other => "other", "Other Healthcare Provider",
});

str_enum!(Priority {
    Normal => "normal", "Normal",
    Urgent => "urgent", "Urgent",
    Emergency => "emergency", "Emergency",
});

str_enum!(MessageStatus {
    Sent => "sent", "Sent",
});

impl Default for ReadingTime {
    fn default() -> Self {
        Self::Fasting
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        Self::Lbs
    }
}

impl Default for Recipient {
    fn default() -> Self {
        Self::Physician
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl Default for MessageStatus {
    fn default() -> Self {
        Self::Sent
    }
}
