use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
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
pub enum Category {
    /// General grocery aisle
    #[default]
    Supermarket,
    /// Butcher
    Meat,
    /// Health food store: grains, seeds, dried fruit
    HealthFood,
    /// Greengrocer
    Produce,
    /// Optional extras suggested by the menu
    Extra,
    /// Wildcard staples the menu assumes you can always use
    Wildcard,
    /// Things the menu expects you to already have at home
    AlreadyHave,
    Other,
}

/// Heading keywords, checked in order; the first one contained in the heading wins.
const KEYWORDS: &[(&str, Category)] = &[
    ("supermercado", Category::Supermarket),
    ("carnes", Category::Meat),
    ("dietética", Category::HealthFood),
    ("dietetica", Category::HealthFood),
    ("verdulería", Category::Produce),
    ("verduleria", Category::Produce),
    ("yapa", Category::Extra),
    ("comodín", Category::Wildcard),
    ("comodin", Category::Wildcard),
    ("seguro", Category::AlreadyHave),
    ("casa", Category::AlreadyHave),
];

impl Category {
    /// Detects the category announced by a list heading such as "Verdulería 🥬".
    /// Returns `None` when the text is not a known heading.
    pub fn detect(heading: &str) -> Option<Category> {
        let heading = heading.to_lowercase();

        KEYWORDS
            .iter()
            .find(|(keyword, _)| heading.contains(keyword))
            .map(|(_, category)| *category)
    }

    /// Same as [`Category::detect`] but falls back to [`Category::Other`].
    pub fn from_heading(heading: &str) -> Category {
        Self::detect(heading).unwrap_or(Category::Other)
    }

    /// Base categories are always needed, whatever days the user cooks.
    pub fn is_base(&self) -> bool {
        matches!(self, Category::Wildcard | Category::AlreadyHave)
    }

    pub fn order(&self) -> u8 {
        match self {
            Category::Supermarket => 1,
            Category::Meat => 2,
            Category::HealthFood => 3,
            Category::Produce => 4,
            Category::Extra => 5,
            Category::Wildcard => 6,
            Category::AlreadyHave => 7,
            Category::Other => 99,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Supermarket => "Supermercado 🏪",
            Category::Meat => "Carnes 🥩",
            Category::HealthFood => "Dietética 🥗",
            Category::Produce => "Verdulería 🥬",
            Category::Extra => "Yapa ⭐",
            Category::Wildcard => "Comodín 👑",
            Category::AlreadyHave => "Ya tenés en casa ✅",
            Category::Other => "Otros 📦",
        }
    }
}
