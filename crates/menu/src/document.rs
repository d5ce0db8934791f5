use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use weeklist_shared::{Category, MasterItem};

use crate::validate::{clean_label, is_valid_ingredient};

/// One headed group of the shopping list ("Verdulería 🥬": tomate, cebolla…).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// The recipe section of one day, as scraped.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DaySection {
    pub label: String,
    #[serde(default)]
    pub recipe: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Everything the scraper extracts from one menu page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MenuDocument {
    pub title: String,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub week: Option<u32>,
    pub general: Vec<CategoryGroup>,
    /// `None` when the page has no separate veggie list.
    #[serde(default)]
    pub veggie: Option<Vec<CategoryGroup>>,
    #[serde(default)]
    pub days: Vec<DaySection>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

impl MenuDocument {
    pub fn from_json(json: &str) -> weeklist_shared::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> weeklist_shared::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn master_items(&self) -> Vec<MasterItem> {
        flatten_groups(&self.general)
    }

    /// `None` when the page carried no veggie list at all.
    pub fn veggie_items(&self) -> Option<Vec<MasterItem>> {
        self.veggie.as_deref().map(flatten_groups)
    }
}

/// Turns headed groups into master items, ordered by category. Invalid strings
/// and repeats inside a category are dropped.
pub fn flatten_groups(groups: &[CategoryGroup]) -> Vec<MasterItem> {
    let mut groups = groups
        .iter()
        .map(|group| (Category::from_heading(&group.category), group))
        .collect::<Vec<_>>();
    groups.sort_by_key(|(category, _)| category.order());

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for (category, group) in groups {
        for raw in &group.items {
            let name = clean_label(raw);
            if !is_valid_ingredient(name) {
                tracing::debug!(category = %category, text = %raw, "list entry rejected");
                continue;
            }

            if seen.insert((category, name.to_owned())) {
                items.push(MasterItem::new(name, category));
            }
        }
    }

    items
}
