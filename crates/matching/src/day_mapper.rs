use std::collections::BTreeMap;

use weeklist_shared::{DayIngredient, DaySet, MasterItem, Weekday};

use crate::matcher::{MasterIndex, MatchPolicy, MatchTier};

/// Outcome counters of a mapping run, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub exact: usize,
    pub containment: usize,
    pub shared_words: usize,
    pub misses: usize,
    pub unmatchable: usize,
}

impl MatchStats {
    fn record(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::Containment => self.containment += 1,
            MatchTier::SharedWords => self.shared_words += 1,
        }
    }

    pub fn matched(&self) -> usize {
        self.exact + self.containment + self.shared_words
    }
}

/// Which weekdays need each master-list item.
///
/// Only built whole by [`DayMapper::build`], so a filter never sees a partial
/// mapping. Items absent from the mapping are listed by [`DayMapping::unmapped`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayMapping {
    days: BTreeMap<String, DaySet>,
    unmapped: Vec<MasterItem>,
    stats: MatchStats,
}

impl DayMapping {
    pub fn days_for(&self, item: &str) -> Option<&DaySet> {
        self.days.get(item)
    }

    pub fn is_unmapped(&self, item: &str) -> bool {
        !self.days.contains_key(item)
    }

    pub fn unmapped(&self) -> &[MasterItem] {
        &self.unmapped
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Every weekday at least one item is needed on.
    pub fn covered_days(&self) -> DaySet {
        self.days.values().flatten().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DaySet)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DayMapper {
    policy: MatchPolicy,
}

impl DayMapper {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Matches every day ingredient against the master list and unions the
    /// weekdays onto each matched item. All seven days are processed.
    pub fn build(&self, day_ingredients: &[DayIngredient], master: &[MasterItem]) -> DayMapping {
        let index = MasterIndex::with_policy(master, self.policy);
        let mut days: BTreeMap<String, DaySet> = BTreeMap::new();
        let mut stats = MatchStats::default();

        for ingredient in day_ingredients {
            let key = self.policy.normalize(&ingredient.text);
            if key.is_empty() {
                stats.unmatchable += 1;
                tracing::debug!(day = %ingredient.day, text = %ingredient.text, "ingredient has no comparable key");
                continue;
            }

            let Some(found) = index.find(&key) else {
                stats.misses += 1;
                tracing::debug!(day = %ingredient.day, key = %key, "no master item for ingredient");
                continue;
            };

            stats.record(found.tier);
            tracing::debug!(
                day = %ingredient.day,
                key = %key,
                tier = ?found.tier,
                items = found.items.len(),
                "ingredient matched"
            );

            for item in found.items {
                days.entry(item.name.to_owned())
                    .or_default()
                    .insert(ingredient.day);
            }
        }

        let unmapped = master
            .iter()
            .filter(|item| !days.contains_key(&item.name))
            .cloned()
            .collect::<Vec<_>>();

        tracing::info!(
            items = master.len(),
            mapped = days.len(),
            unmapped = unmapped.len(),
            exact = stats.exact,
            containment = stats.containment,
            shared_words = stats.shared_words,
            misses = stats.misses,
            "day mapping built"
        );

        DayMapping {
            days,
            unmapped,
            stats,
        }
    }
}

/// Builds the item → weekdays mapping with the default policy.
pub fn build_item_to_days(day_ingredients: &[DayIngredient], master: &[MasterItem]) -> DayMapping {
    DayMapper::default().build(day_ingredients, master)
}

/// Groups day ingredients per weekday, Monday first. Useful for reporting.
pub fn ingredients_by_day(day_ingredients: &[DayIngredient]) -> BTreeMap<Weekday, Vec<&str>> {
    let mut by_day: BTreeMap<Weekday, Vec<&str>> = BTreeMap::new();
    for ingredient in day_ingredients {
        by_day
            .entry(ingredient.day)
            .or_default()
            .push(ingredient.text.as_str());
    }

    by_day
}
