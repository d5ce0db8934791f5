use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Resolves a day heading as printed on the menu page. Spanish labels are
    /// accepted with or without accents, English names in any case.
    pub fn from_label(label: &str) -> Option<Weekday> {
        let label = label.trim().to_lowercase();

        let day = match label.as_str() {
            "lunes" => Weekday::Monday,
            "martes" => Weekday::Tuesday,
            "miércoles" | "miercoles" => Weekday::Wednesday,
            "jueves" => Weekday::Thursday,
            "viernes" => Weekday::Friday,
            "sábado" | "sabado" => Weekday::Saturday,
            "domingo" => Weekday::Sunday,
            other => return other.parse().ok(),
        };

        Some(day)
    }

    pub fn spanish(&self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }

    pub fn all() -> &'static [Weekday] {
        Self::VARIANTS
    }
}
