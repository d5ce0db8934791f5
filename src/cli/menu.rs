use weeklist::{ImportOptions, ImportPipeline, config::Config};
use weeklist_matching::ingredients_by_day;
use weeklist_menu::{JsonDirSource, MenuDocument, MenuSource};

/// Loads `week` from the menu directory, or the latest menu there.
pub async fn load_menu(config: &Config, week: Option<u32>) -> anyhow::Result<MenuDocument> {
    let source = JsonDirSource::new(&config.menu.dir);

    let week = match week {
        Some(week) => week,
        None => match source.latest().await? {
            Some(week) => week,
            None => anyhow::bail!("no menu found in {}", config.menu.dir),
        },
    };

    Ok(source.load(week).await?)
}

pub async fn menus(config: Config) -> anyhow::Result<()> {
    let source = JsonDirSource::new(&config.menu.dir);
    let weeks = source.list_weeks().await?;

    if weeks.is_empty() {
        println!("No menus in {}", config.menu.dir);
        return Ok(());
    }

    for week in weeks.into_iter().rev() {
        let doc = source.load(week).await?;
        let dates = doc.dates.as_deref().unwrap_or("-");
        println!("{week:>3}  {}  ({dates})", doc.title);
    }

    Ok(())
}

/// Diagnostics only: lists what the day mapping could not place.
pub async fn unmapped(config: Config, week: Option<u32>) -> anyhow::Result<()> {
    let doc = load_menu(&config, week).await?;
    let plan = ImportPipeline::new(config.matching.policy()).plan(&doc, &ImportOptions::default());

    for day in &plan.days.skipped {
        println!("skipped section: {day}");
    }

    for (day, ingredients) in ingredients_by_day(&plan.days.ingredients) {
        println!("{:<10} {}", day.spanish(), ingredients.join(", "));
    }

    let stats = plan.general.mapping.stats();
    println!(
        "matched {} (exact {}, containment {}, shared words {}), missed {}",
        stats.matched(),
        stats.exact,
        stats.containment,
        stats.shared_words,
        stats.misses
    );

    let unmapped = plan.unmapped().collect::<Vec<_>>();
    println!("{} items unmapped", unmapped.len());
    for item in unmapped {
        let note = if item.category.is_base() {
            "kept (base category)"
        } else {
            "dropped unless --include-unmapped"
        };
        println!("  {} [{}] {note}", item.name, item.category.label());
    }

    Ok(())
}

pub fn normalize(config: &Config, texts: &[String]) {
    let policy = config.matching.policy();

    for text in texts {
        let key = policy.normalize(text);
        if key.is_empty() {
            println!("{text:?} -> (unmatchable)");
        } else {
            println!("{text:?} -> {key}");
        }
    }
}
