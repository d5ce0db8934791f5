use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use weeklist_shared::{Error, Result};

use crate::document::MenuDocument;

static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^menu_semana_s(\d+)\.json$").expect("menu file pattern"));

/// Where scraped menus come from. The fetching itself happens upstream; this
/// side only reads what was extracted.
#[async_trait::async_trait]
pub trait MenuSource: Send + Sync {
    /// Weekly menu numbers available, ascending.
    async fn list_weeks(&self) -> Result<Vec<u32>>;

    async fn load(&self, week: u32) -> Result<MenuDocument>;

    async fn latest(&self) -> Result<Option<u32>> {
        Ok(self.list_weeks().await?.last().copied())
    }
}

/// Reads `menu_semana_s<N>.json` documents from a directory.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(week: u32) -> String {
        format!("menu_semana_s{week}.json")
    }

    pub fn path_for(&self, week: u32) -> PathBuf {
        self.dir.join(Self::file_name(week))
    }

    /// Writes a document under its week number, replacing any previous file.
    pub async fn save(&self, week: u32, doc: &MenuDocument) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(week);
        tokio::fs::write(&path, doc.to_json()?).await?;

        tracing::info!(week, path = %path.display(), "menu saved");

        Ok(path)
    }
}

#[async_trait::async_trait]
impl MenuSource for JsonDirSource {
    async fn list_weeks(&self) -> Result<Vec<u32>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(dir = %self.dir.display(), "menu directory does not exist");
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };

        let mut weeks = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(week) = name
                .to_str()
                .and_then(|name| FILE_RE.captures(name))
                .and_then(|caps| caps[1].parse::<u32>().ok())
            else {
                continue;
            };

            weeks.push(week);
        }

        weeks.sort_unstable();
        weeks.dedup();

        Ok(weeks)
    }

    async fn load(&self, week: u32) -> Result<MenuDocument> {
        let path = self.path_for(week);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("menu week {week}")));
            }
            Err(err) => return Err(err.into()),
        };

        let mut doc = MenuDocument::from_json(&json)?;
        if doc.week.is_none() {
            doc.week = Some(week);
        }

        tracing::debug!(week, path = %path.display(), title = %doc.title, "menu loaded");

        Ok(doc)
    }
}
