use temp_dir::TempDir;
use time::macros::datetime;
use weeklist_shared::{DaySet, Error, ListType, Weekday};
use weeklist_shopping::{Decision, ListManager, Retention, SqliteStore, Week, WeekId, WeekStore};

async fn open(dir: &TempDir) -> anyhow::Result<SqliteStore> {
    let path = dir.child("db.sqlite3");
    let url = format!("sqlite:{}", path.display());

    Ok(SqliteStore::open(&url, 1).await?)
}

fn week(n: u32) -> Week {
    Week::new(
        WeekId::for_week(n),
        format!("Menú Semana {n}"),
        datetime!(2026-02-09 10:30:15.250 UTC) + time::Duration::days(i64::from(n)),
    )
    .with_source_week(Some(n))
    .with_general(vec!["arroz".to_owned(), "tomate".to_owned()])
    .with_veggie(Some(vec!["tofu".to_owned()]))
    .with_selected_days(DaySet::from([Weekday::Monday, Weekday::Saturday]))
}

#[tokio::test]
async fn week_survives_a_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = open(&dir).await?;

    let mut stored = week(5);
    stored.toggle("tofu", ListType::Veggie)?;
    store.store_week(&stored).await?;

    let loaded = store.load_week(&WeekId::for_week(5)).await?;
    assert_eq!(loaded, Some(stored));

    let no_veggie = Week::new(WeekId::for_menu("Especial"), "Especial", datetime!(2026-03-01 0:00 UTC))
        .with_general(vec!["pan".to_owned()]);
    store.store_week(&no_veggie).await?;
    let loaded = store.load_week(&no_veggie.id).await?;
    assert_eq!(loaded.and_then(|w| w.veggie), None);

    Ok(())
}

#[tokio::test]
async fn store_overwrites_same_id_and_lists_oldest_first() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = open(&dir).await?;

    store.store_week(&week(7)).await?;
    store.store_week(&week(6)).await?;

    let mut again = week(7);
    again.toggle("arroz", ListType::General)?;
    store.store_week(&again).await?;

    let weeks = store.list_weeks().await?;
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].id, WeekId::for_week(6));
    assert_eq!(weeks[1].bought(), 1);

    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_week_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = open(&dir).await?;

    store.store_week(&week(1)).await?;
    store.delete_week(&WeekId::for_week(1)).await?;

    assert!(matches!(
        store.delete_week(&WeekId::for_week(1)).await,
        Err(Error::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn corrupt_source_week_is_reported() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = open(&dir).await?;

    store.store_week(&week(2)).await?;
    sqlx::query("UPDATE shopping_week SET source_week = -1 WHERE id = ?")
        .bind("semana_2")
        .execute(store.pool())
        .await?;

    let err = store.load_week(&WeekId::for_week(2)).await.unwrap_err();
    assert!(matches!(err, Error::Server(_)));
    assert_eq!(err.to_string(), "week semana_2 has invalid source week -1");

    Ok(())
}

#[tokio::test]
async fn manager_over_sqlite() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let manager = ListManager::new(open(&dir).await?).max_weeks(2);

    manager.import(week(1), None).await?;
    manager.import(week(2), None).await?;
    manager.reset(&WeekId::for_week(1)).await?;

    let outcome = manager.import(week(3), None).await?;
    assert_eq!(outcome.retention, Retention::LimitReached { count: 3, max: 2 });

    let outcome = manager.import(week(3), Some(Decision::Replace)).await?;
    assert_eq!(outcome.replaced, vec![WeekId::for_week(3)]);
    assert_eq!(manager.list().await?.len(), 3);

    Ok(())
}
