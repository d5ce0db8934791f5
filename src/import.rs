use time::OffsetDateTime;
use weeklist_matching::{DayFilter, DayMapper, DayMapping, MatchPolicy};
use weeklist_menu::{DayExtraction, MenuDocument, collect_day_ingredients, extract_date_range};
use weeklist_shared::{DaySet, MasterItem, Result, full_week};
use weeklist_shopping::{
    Decision, ImportInput, ListManager, Proposal, StoreOutcome, Week, WeekStore,
};

#[derive(Clone, Debug)]
pub struct ImportOptions {
    pub selected_days: DaySet,
    /// Keep unmapped items whatever their category.
    pub include_unmapped: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            selected_days: full_week(),
            include_unmapped: false,
        }
    }
}

/// One list (general or veggie) after mapping and filtering.
#[derive(Clone, Debug)]
pub struct ListPlan {
    pub mapping: DayMapping,
    pub kept: Vec<MasterItem>,
    pub dropped: Vec<MasterItem>,
}

impl ListPlan {
    fn names(&self) -> Vec<String> {
        self.kept.iter().map(|item| item.name.to_owned()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct ImportPlan {
    pub title: String,
    pub dates: Option<String>,
    pub source_week: Option<u32>,
    pub selected_days: DaySet,
    pub days: DayExtraction,
    pub general: ListPlan,
    /// `None` when the menu has no veggie list.
    pub veggie: Option<ListPlan>,
}

impl ImportPlan {
    /// Master items no day ingredient matched, general list first.
    pub fn unmapped(&self) -> impl Iterator<Item = &MasterItem> {
        self.general.mapping.unmapped().iter().chain(
            self.veggie
                .iter()
                .flat_map(|veggie| veggie.mapping.unmapped().iter()),
        )
    }

    pub fn into_input(self) -> ImportInput {
        ImportInput {
            general: self.general.names(),
            name: self.title,
            source_week: self.source_week,
            selected_days: self.selected_days,
            veggie: self.veggie.as_ref().map(ListPlan::names),
        }
    }

    pub fn into_week(self, created_at: OffsetDateTime) -> Result<Week> {
        self.into_input().into_week(created_at)
    }
}

/// Menu document in, filtered week out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImportPipeline {
    policy: MatchPolicy,
}

impl ImportPipeline {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    fn plan_list(
        &self,
        master: Vec<MasterItem>,
        days: &DayExtraction,
        filter: &DayFilter,
    ) -> ListPlan {
        let mapping = DayMapper::new(self.policy).build(&days.ingredients, &master);
        let (kept, dropped): (Vec<_>, Vec<_>) = master
            .into_iter()
            .partition(|item| filter.decide(item, item.category, &mapping).is_some());

        ListPlan {
            mapping,
            kept,
            dropped,
        }
    }

    /// Maps and filters both lists. Pure; nothing is stored.
    pub fn plan(&self, doc: &MenuDocument, options: &ImportOptions) -> ImportPlan {
        let days = collect_day_ingredients(&doc.days);
        let filter = DayFilter::new(options.selected_days.clone())
            .include_unmapped(options.include_unmapped);

        let general = self.plan_list(doc.master_items(), &days, &filter);
        let veggie = doc
            .veggie_items()
            .map(|items| self.plan_list(items, &days, &filter));

        let dates = doc
            .dates
            .clone()
            .or_else(|| extract_date_range(&doc.title));

        tracing::info!(
            title = %doc.title,
            selected = ?options.selected_days,
            kept = general.kept.len(),
            dropped = general.dropped.len(),
            unmapped = general.mapping.unmapped().len(),
            veggie = veggie.is_some(),
            "import planned"
        );

        ImportPlan {
            title: doc.title.to_owned(),
            dates,
            source_week: doc.week,
            selected_days: options.selected_days.clone(),
            days,
            general,
            veggie,
        }
    }

    /// Plans the import and checks it against the stored weeks.
    pub async fn propose<S: WeekStore>(
        &self,
        manager: &ListManager<S>,
        doc: &MenuDocument,
        options: &ImportOptions,
        created_at: OffsetDateTime,
    ) -> Result<Proposal> {
        let week = self.plan(doc, options).into_week(created_at)?;
        manager.propose(week).await
    }

    #[tracing::instrument(skip_all, fields(title = %doc.title))]
    pub async fn run<S: WeekStore>(
        &self,
        manager: &ListManager<S>,
        doc: &MenuDocument,
        options: &ImportOptions,
        decision: Option<Decision>,
    ) -> Result<StoreOutcome> {
        let proposal = self
            .propose(manager, doc, options, OffsetDateTime::now_utc())
            .await?;

        manager.commit(proposal, decision).await
    }
}

#[cfg(test)]
mod tests {
    use weeklist_menu::{CategoryGroup, DaySection};
    use weeklist_shared::{Category, Weekday};

    use super::*;

    fn doc() -> MenuDocument {
        MenuDocument {
            title: "Menú semana del 9 al 13 de febrero".to_owned(),
            dates: None,
            week: Some(5),
            general: vec![
                CategoryGroup {
                    category: "Supermercado 🏪".to_owned(),
                    items: vec![
                        "1 kg de puré de tomate".to_owned(),
                        "sal y pimienta a gusto".to_owned(),
                        "film para freezer".to_owned(),
                    ],
                },
                CategoryGroup {
                    category: "Comodín 👑".to_owned(),
                    items: vec!["huevos".to_owned()],
                },
            ],
            veggie: None,
            days: vec![
                DaySection {
                    label: "Lunes".to_owned(),
                    recipe: None,
                    ingredients: vec!["puré de tomate".to_owned()],
                },
                DaySection {
                    label: "Martes".to_owned(),
                    recipe: None,
                    ingredients: vec!["sal".to_owned()],
                },
            ],
            generated_at: None,
        }
    }

    fn monday() -> ImportOptions {
        ImportOptions {
            selected_days: DaySet::from([Weekday::Monday]),
            include_unmapped: false,
        }
    }

    #[test]
    fn test_plan_monday() {
        let plan = ImportPipeline::default().plan(&doc(), &monday());

        let kept = plan.general.kept.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(kept, vec!["1 kg de puré de tomate", "huevos"]);
        assert_eq!(plan.dates.as_deref(), Some("9 al 13 de febrero"));
        assert!(plan.veggie.is_none());

        let unmapped = plan.unmapped().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(unmapped, vec!["film para freezer", "huevos"]);
    }

    #[test]
    fn test_include_unmapped() {
        let options = ImportOptions {
            include_unmapped: true,
            ..monday()
        };
        let plan = ImportPipeline::default().plan(&doc(), &options);

        assert!(
            plan.general
                .kept
                .contains(&MasterItem::new("film para freezer", Category::Supermarket))
        );
        assert_eq!(plan.general.dropped.len(), 1);
    }

    #[test]
    fn test_full_week_keeps_everything() {
        let plan = ImportPipeline::default().plan(&doc(), &ImportOptions::default());

        assert_eq!(plan.general.kept.len(), 4);
        assert!(plan.general.dropped.is_empty());
    }

    #[test]
    fn test_veggie_equal_to_general_is_dropped() {
        let mut doc = doc();
        doc.veggie = Some(doc.general.clone());

        let week = ImportPipeline::default()
            .plan(&doc, &ImportOptions::default())
            .into_week(OffsetDateTime::UNIX_EPOCH)
            .unwrap();

        assert_eq!(week.veggie, None);
        assert_eq!(week.total(), 4);
    }
}
