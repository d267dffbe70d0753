pub mod blood_sugar;
pub mod enums;
pub mod food_diary;
pub mod medication;
pub mod message;
pub mod profile;
pub mod weight;

pub use blood_sugar::BloodSugarEntry;
pub use enums::*;
pub use food_diary::FoodDiaryEntry;
pub use medication::MedicationEntry;
pub use message::Message;
pub use profile::PatientProfile;
pub use weight::WeightEntry;

/// Optional scalar form values persisted as strings, `""` when unset.
///
/// Any `FromStr + Display` type works (dates, ages, string enums). A blank
/// or `null` payload reads back as `None`.
pub(crate) mod blank_as_none {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(D::Error::custom),
        }
    }
}
