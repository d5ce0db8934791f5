use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use validator::Validate;
use weeklist_shared::{DaySet, ListType};

/// Stable identity of a stored week: `semana_<n>` for numbered menus,
/// `menu_<slug>` otherwise.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WeekId(String);

impl WeekId {
    pub fn for_week(week: u32) -> Self {
        Self(format!("semana_{week}"))
    }

    pub fn for_menu(title: &str) -> Self {
        Self(format!("menu_{}", slug(title)))
    }

    pub fn from_source(source_week: Option<u32>, title: &str) -> Self {
        match source_week {
            Some(week) => Self::for_week(week),
            None => Self::for_menu(title),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same id with a numeric suffix, for keeping two lists of one menu.
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}_{n}", self.0))
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WeekId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WeekId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

fn slug(title: &str) -> String {
    let folded = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();

    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListItem {
    pub bought: bool,
    pub list_type: ListType,
}

pub type Items = BTreeMap<String, ListItem>;

fn to_items(names: impl IntoIterator<Item = String>, list_type: ListType) -> Items {
    names
        .into_iter()
        .map(|name| {
            (
                name,
                ListItem {
                    bought: false,
                    list_type,
                },
            )
        })
        .collect()
}

/// A stored shopping list for one menu.
#[derive(Clone, Debug, PartialEq)]
pub struct Week {
    pub id: WeekId,
    pub name: String,
    pub source_week: Option<u32>,
    pub created_at: OffsetDateTime,
    pub general: Items,
    /// `None` when the menu had no distinct veggie list.
    pub veggie: Option<Items>,
    pub selected_days: DaySet,
}

impl Week {
    pub fn new(id: WeekId, name: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            source_week: None,
            created_at,
            general: Items::new(),
            veggie: None,
            selected_days: DaySet::new(),
        }
    }

    pub fn with_source_week(mut self, week: Option<u32>) -> Self {
        self.source_week = week;
        self
    }

    pub fn with_general(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.general = to_items(names, ListType::General);
        self
    }

    /// Sets the veggie list. A list naming exactly the general items is not a
    /// veggie list and is stored as absent.
    pub fn with_veggie(mut self, names: Option<impl IntoIterator<Item = String>>) -> Self {
        self.veggie = names
            .map(|names| to_items(names, ListType::Veggie))
            .filter(|veggie| !veggie.keys().eq(self.general.keys()) || veggie.is_empty());
        self
    }

    pub fn with_selected_days(mut self, days: DaySet) -> Self {
        self.selected_days = days;
        self
    }

    pub fn items(&self, list_type: ListType) -> Option<&Items> {
        match list_type {
            ListType::General => Some(&self.general),
            ListType::Veggie => self.veggie.as_ref(),
        }
    }

    fn items_mut(&mut self, list_type: ListType) -> Option<&mut Items> {
        match list_type {
            ListType::General => Some(&mut self.general),
            ListType::Veggie => self.veggie.as_mut(),
        }
    }

    fn all_items(&self) -> impl Iterator<Item = &ListItem> {
        self.general
            .values()
            .chain(self.veggie.iter().flat_map(|veggie| veggie.values()))
    }

    pub fn total(&self) -> usize {
        self.all_items().count()
    }

    pub fn bought(&self) -> usize {
        self.all_items().filter(|item| item.bought).count()
    }

    /// No items, or every item bought.
    pub fn is_completed(&self) -> bool {
        self.bought() == self.total()
    }

    /// Flips the `bought` flag of one item and returns its new value.
    pub fn toggle(&mut self, item: &str, list_type: ListType) -> weeklist_shared::Result<bool> {
        let Some(entry) = self
            .items_mut(list_type)
            .and_then(|items| items.get_mut(item))
        else {
            weeklist_shared::not_found!("item '{item}' in {list_type} list");
        };

        entry.bought = !entry.bought;

        Ok(entry.bought)
    }

    pub fn reset(&mut self) {
        for item in self.general.values_mut() {
            item.bought = false;
        }

        for item in self.veggie.iter_mut().flat_map(|veggie| veggie.values_mut()) {
            item.bought = false;
        }
    }

    pub fn summary(&self) -> WeekSummary {
        let total = self.total();
        let bought = self.bought();

        WeekSummary {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            created_at: self.created_at,
            total,
            bought,
            completed: bought == total,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeekSummary {
    pub id: WeekId,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub total: usize,
    pub bought: usize,
    pub completed: bool,
}

/// A filtered list ready to become a [`Week`].
#[derive(Validate, Clone, Debug)]
pub struct ImportInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub source_week: Option<u32>,
    #[validate(length(min = 1))]
    pub selected_days: DaySet,
    pub general: Vec<String>,
    pub veggie: Option<Vec<String>>,
}

impl ImportInput {
    pub fn into_week(self, created_at: OffsetDateTime) -> weeklist_shared::Result<Week> {
        self.validate()?;

        let id = WeekId::from_source(self.source_week, &self.name);

        Ok(Week::new(id, self.name, created_at)
            .with_source_week(self.source_week)
            .with_general(self.general)
            .with_veggie(self.veggie)
            .with_selected_days(self.selected_days))
    }
}

#[derive(Validate, Clone, Debug)]
pub struct ToggleInput {
    #[validate(length(min = 1))]
    pub item: String,
    pub list_type: ListType,
}
