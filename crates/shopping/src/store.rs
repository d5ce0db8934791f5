use std::collections::BTreeMap;

use tokio::sync::RwLock;
use weeklist_shared::Result;

use crate::week::{Week, WeekId};

/// Persistence of stored weeks. Every failure is returned to the caller.
#[async_trait::async_trait]
pub trait WeekStore: Send + Sync {
    async fn list_weeks(&self) -> Result<Vec<Week>>;

    /// Inserts the week, or overwrites the one with the same id.
    async fn store_week(&self, week: &Week) -> Result<()>;

    /// Fails with `NotFound` when no week has this id.
    async fn delete_week(&self, id: &WeekId) -> Result<()>;

    async fn load_week(&self, id: &WeekId) -> Result<Option<Week>> {
        Ok(self
            .list_weeks()
            .await?
            .into_iter()
            .find(|week| &week.id == id))
    }
}

/// Keeps weeks in memory; used for dry runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    weeks: RwLock<BTreeMap<WeekId, Week>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weeks(weeks: impl IntoIterator<Item = Week>) -> Self {
        Self {
            weeks: RwLock::new(weeks.into_iter().map(|w| (w.id.to_owned(), w)).collect()),
        }
    }
}

#[async_trait::async_trait]
impl WeekStore for MemoryStore {
    async fn list_weeks(&self) -> Result<Vec<Week>> {
        let mut weeks = self.weeks.read().await.values().cloned().collect::<Vec<_>>();
        weeks.sort_by_key(|week| week.created_at);

        Ok(weeks)
    }

    async fn store_week(&self, week: &Week) -> Result<()> {
        self.weeks
            .write()
            .await
            .insert(week.id.to_owned(), week.clone());

        Ok(())
    }

    async fn delete_week(&self, id: &WeekId) -> Result<()> {
        if self.weeks.write().await.remove(id).is_none() {
            weeklist_shared::not_found!("week {id}");
        }

        Ok(())
    }

    async fn load_week(&self, id: &WeekId) -> Result<Option<Week>> {
        Ok(self.weeks.read().await.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl<S: WeekStore + ?Sized> WeekStore for std::sync::Arc<S> {
    async fn list_weeks(&self) -> Result<Vec<Week>> {
        (**self).list_weeks().await
    }

    async fn store_week(&self, week: &Week) -> Result<()> {
        (**self).store_week(week).await
    }

    async fn delete_week(&self, id: &WeekId) -> Result<()> {
        (**self).delete_week(id).await
    }

    async fn load_week(&self, id: &WeekId) -> Result<Option<Week>> {
        (**self).load_week(id).await
    }
}
