use clap::Args;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use weeklist::{ImportOptions, ImportPipeline, config::Config, open_manager};
use weeklist_shared::{DaySet, ListType, Weekday, full_week};
use weeklist_shopping::{Decision, Proposal, Retention, ToggleInput, WeekId};

fn parse_day(value: &str) -> Result<Weekday, String> {
    Weekday::from_label(value).ok_or_else(|| format!("unknown day '{value}'"))
}

#[derive(Args)]
pub struct ImportArgs {
    /// Menu week number (defaults to the latest menu)
    #[arg(long)]
    week: Option<u32>,

    /// Days you will cook, comma separated (defaults to the whole week)
    #[arg(long, value_delimiter = ',', value_parser = parse_day)]
    days: Vec<Weekday>,

    /// Replace stored lists of the same menu
    #[arg(long, conflicts_with = "keep_both")]
    replace: bool,

    /// Keep stored lists of the same menu and add this one
    #[arg(long)]
    keep_both: bool,

    /// Keep unmapped items of every category
    #[arg(long)]
    include_unmapped: bool,
}

impl ImportArgs {
    fn decision(&self) -> Option<Decision> {
        match (self.replace, self.keep_both) {
            (true, _) => Some(Decision::Replace),
            (_, true) => Some(Decision::KeepBoth),
            _ => None,
        }
    }

    fn selected_days(&self) -> DaySet {
        if self.days.is_empty() {
            full_week()
        } else {
            self.days.iter().copied().collect()
        }
    }
}

#[tracing::instrument(skip(config, args), fields(week = ?args.week))]
pub async fn import(config: Config, args: ImportArgs) -> anyhow::Result<()> {
    let doc = super::menu::load_menu(&config, args.week).await?;
    let options = ImportOptions {
        selected_days: args.selected_days(),
        include_unmapped: args.include_unmapped,
    };

    let plan = ImportPipeline::new(config.matching.policy()).plan(&doc, &options);
    let unmapped = plan
        .unmapped()
        .filter(|item| !item.category.is_base())
        .count();
    if unmapped > 0 && !options.include_unmapped {
        println!("{unmapped} unmapped items left out (see `weeklist unmapped`)");
    }

    let manager = open_manager(&config).await?;
    let proposal = manager
        .propose(plan.into_week(OffsetDateTime::now_utc())?)
        .await?;

    let decision = args.decision();
    if let (Proposal::Duplicate { candidates, .. }, None) = (&proposal, decision) {
        println!("Lists of this menu already exist:");
        for candidate in candidates {
            println!(
                "  {}  {}  {}/{} bought",
                candidate.id, candidate.name, candidate.bought, candidate.total
            );
        }
        println!("Run again with --replace or --keep-both.");
        anyhow::bail!("duplicate lists, no decision given");
    }

    let outcome = manager.commit(proposal, decision).await?;

    println!("Stored {}", outcome.stored);
    for id in &outcome.replaced {
        println!("Replaced {id}");
    }

    match outcome.retention {
        Retention::WithinLimit => {}
        Retention::Evicted(week) => println!("Removed completed list {} ({})", week.id, week.name),
        Retention::LimitReached { count, max } => {
            println!("{count} lists stored, limit is {max}: delete or finish some lists")
        }
        Retention::EvictionFailed { id, reason } => {
            println!("Could not remove completed list {id}: {reason}")
        }
        Retention::Unchecked { reason } => {
            println!("Could not check the list limit: {reason}")
        }
    }

    Ok(())
}

pub async fn list(config: Config) -> anyhow::Result<()> {
    let manager = open_manager(&config).await?;
    let weeks = manager.list().await?;

    if weeks.is_empty() {
        println!("No lists stored");
        return Ok(());
    }

    for week in weeks {
        let mark = if week.completed { "✓" } else { " " };
        println!(
            "{mark} {:<24} {:<40} {:>3}/{:<3} {}",
            week.id.as_str(),
            week.name,
            week.bought,
            week.total,
            week.created_at.format(&Rfc3339)?
        );
    }

    Ok(())
}

pub async fn toggle(config: Config, week_id: String, item: String, veggie: bool) -> anyhow::Result<()> {
    let manager = open_manager(&config).await?;
    let list_type = if veggie {
        ListType::Veggie
    } else {
        ListType::General
    };

    let bought = manager
        .toggle_item(&WeekId::from(week_id), ToggleInput { item: item.to_owned(), list_type })
        .await?;

    println!("{item}: {}", if bought { "bought" } else { "pending" });

    Ok(())
}

pub async fn reset(config: Config, week_id: String) -> anyhow::Result<()> {
    let manager = open_manager(&config).await?;
    manager.reset(&WeekId::from(week_id)).await?;

    Ok(())
}

pub async fn delete(config: Config, week_id: String) -> anyhow::Result<()> {
    let manager = open_manager(&config).await?;
    manager.delete(&WeekId::from(week_id)).await?;

    Ok(())
}
