use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Category, Weekday};

/// One line of the week's shopping list, identified by its display text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MasterItem {
    pub name: String,
    pub category: Category,
}

impl MasterItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// A raw ingredient string found in the recipe section of a given day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DayIngredient {
    pub day: Weekday,
    pub text: String,
}

impl DayIngredient {
    pub fn new(day: Weekday, text: impl Into<String>) -> Self {
        Self {
            day,
            text: text.into(),
        }
    }
}

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Default,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListType {
    #[default]
    General,
    Veggie,
}
