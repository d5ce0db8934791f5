pub mod config;
pub mod import;
pub mod observability;

pub use import::*;

use weeklist_shopping::{ListManager, SqliteStore};

/// Opens the configured database and wraps it in a manager holding the
/// configured retention limit.
pub async fn open_manager(config: &config::Config) -> weeklist_shared::Result<ListManager<SqliteStore>> {
    let store = SqliteStore::open(&config.database.url, config.database.max_connections).await?;

    Ok(ListManager::new(store).max_weeks(config.lists.max_weeks))
}
