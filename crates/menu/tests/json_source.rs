use temp_dir::TempDir;
use weeklist_menu::{CategoryGroup, DaySection, JsonDirSource, MenuDocument, MenuSource};
use weeklist_shared::Error;

fn document(title: &str) -> MenuDocument {
    MenuDocument {
        title: title.to_owned(),
        dates: Some("9 al 13 de febrero".to_owned()),
        week: None,
        general: vec![CategoryGroup {
            category: "Supermercado 🏪".to_owned(),
            items: vec!["arroz".to_owned(), "fideos".to_owned()],
        }],
        veggie: None,
        days: vec![DaySection {
            label: "Lunes".to_owned(),
            recipe: Some("Arroz con pollo".to_owned()),
            ingredients: vec!["arroz".to_owned()],
        }],
        generated_at: None,
    }
}

#[tokio::test]
async fn list_weeks_reads_numbered_files_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = JsonDirSource::new(dir.path());

    source.save(7, &document("Semana 7")).await?;
    source.save(5, &document("Semana 5")).await?;
    tokio::fs::write(dir.child("notes.json"), "{}").await?;
    tokio::fs::write(dir.child("menu_semana_sX.json"), "{}").await?;

    assert_eq!(source.list_weeks().await?, vec![5, 7]);
    assert_eq!(source.latest().await?, Some(7));

    Ok(())
}

#[tokio::test]
async fn load_fills_in_the_week_number() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = JsonDirSource::new(dir.path());
    source.save(5, &document("Semana 5")).await?;

    let doc = source.load(5).await?;
    assert_eq!(doc.week, Some(5));
    assert_eq!(doc.title, "Semana 5");
    assert_eq!(doc.master_items().len(), 2);

    Ok(())
}

#[tokio::test]
async fn missing_week_and_missing_dir_are_not_panics() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = JsonDirSource::new(dir.child("nowhere"));

    assert!(source.list_weeks().await?.is_empty());
    assert!(matches!(source.load(3).await, Err(Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_an_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.child("menu_semana_s2.json"), "{ not json").await?;

    let source = JsonDirSource::new(dir.path());
    assert!(source.load(2).await.is_err());

    Ok(())
}
