use std::collections::HashSet;

use weeklist_shared::{DayIngredient, DaySet, Weekday};

use crate::{
    document::DaySection,
    validate::{check_ingredient, clean_label},
};

/// Day ingredients gathered from the recipe sections, plus the days that
/// could not be used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayExtraction {
    pub ingredients: Vec<DayIngredient>,
    pub days: DaySet,
    pub skipped: Vec<String>,
}

/// Resolves every section to a weekday and keeps its valid ingredients.
///
/// A malformed section is logged and skipped; the remaining days still come
/// through so the import degrades to more unmapped items instead of failing.
pub fn collect_day_ingredients(sections: &[DaySection]) -> DayExtraction {
    let mut extraction = DayExtraction::default();
    let mut seen: HashSet<(Weekday, String)> = HashSet::new();

    for section in sections {
        let Some(day) = Weekday::from_label(&section.label) else {
            tracing::warn!(label = %section.label, "day section skipped: label is not a weekday");
            extraction.skipped.push(section.label.to_owned());
            continue;
        };

        let mut kept = 0;
        for raw in &section.ingredients {
            let text = clean_label(raw);

            if Weekday::from_label(text).is_some() {
                continue;
            }

            if let Err(reason) = check_ingredient(text) {
                tracing::debug!(day = %day, text = %raw, reason = ?reason, "day ingredient rejected");
                continue;
            }

            if seen.insert((day, text.to_lowercase())) {
                extraction.ingredients.push(DayIngredient::new(day, text));
                kept += 1;
            }
        }

        if kept == 0 && !extraction.days.contains(&day) {
            tracing::warn!(
                day = %day,
                recipe = section.recipe.as_deref().unwrap_or_default(),
                "day section skipped: no valid ingredient"
            );
            extraction.skipped.push(section.label.to_owned());
            continue;
        }

        extraction.days.insert(day);
    }

    tracing::info!(
        days = extraction.days.len(),
        ingredients = extraction.ingredients.len(),
        skipped = extraction.skipped.len(),
        "day sections collected"
    );

    extraction
}
