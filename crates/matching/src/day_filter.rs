use weeklist_shared::{Category, DaySet, MasterItem, Weekday};

use crate::day_mapper::DayMapping;

/// Why an item survived the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kept {
    /// Needed on at least one selected day.
    Scheduled,
    /// Unmapped, but its category is always needed.
    Base,
    /// Unmapped and explicitly included by the user.
    Included,
    /// The whole week is selected, nothing is filtered.
    FullWeek,
}

#[derive(Clone, Debug)]
pub struct DayFilter {
    selected: DaySet,
    include_unmapped: bool,
}

impl DayFilter {
    pub fn new(selected: DaySet) -> Self {
        Self {
            selected,
            include_unmapped: false,
        }
    }

    /// Keeps unmapped items of any category, on the user's explicit request.
    pub fn include_unmapped(mut self, include: bool) -> Self {
        self.include_unmapped = include;
        self
    }

    pub fn selected(&self) -> &DaySet {
        &self.selected
    }

    pub fn is_full_week(&self) -> bool {
        Weekday::all().iter().all(|day| self.selected.contains(day))
    }

    /// Decides a single item. `None` means the item is dropped.
    pub fn decide(&self, item: &MasterItem, category: Category, mapping: &DayMapping) -> Option<Kept> {
        if self.is_full_week() {
            return Some(Kept::FullWeek);
        }

        match mapping.days_for(&item.name) {
            Some(days) if !days.is_empty() => {
                (!days.is_disjoint(&self.selected)).then_some(Kept::Scheduled)
            }
            _ if category.is_base() => Some(Kept::Base),
            _ if self.include_unmapped => Some(Kept::Included),
            _ => None,
        }
    }

    pub fn apply_with<'a, F>(
        &self,
        items: &'a [MasterItem],
        mapping: &DayMapping,
        category_of: F,
    ) -> Vec<&'a MasterItem>
    where
        F: Fn(&MasterItem) -> Category,
    {
        let kept = items
            .iter()
            .filter(|item| self.decide(item, category_of(item), mapping).is_some())
            .collect::<Vec<_>>();

        tracing::info!(
            selected = ?self.selected,
            items = items.len(),
            kept = kept.len(),
            "day filter applied"
        );

        kept
    }

    pub fn apply<'a>(&self, items: &'a [MasterItem], mapping: &DayMapping) -> Vec<&'a MasterItem> {
        self.apply_with(items, mapping, |item| item.category)
    }
}

/// Keeps the items needed on the selected days, plus unmapped items of a base
/// category. Selecting all seven days returns `items` unchanged.
pub fn filter<'a, F>(
    items: &'a [MasterItem],
    mapping: &DayMapping,
    selected: &DaySet,
    category_of: F,
) -> Vec<&'a MasterItem>
where
    F: Fn(&MasterItem) -> Category,
{
    DayFilter::new(selected.clone()).apply_with(items, mapping, category_of)
}
