use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use weeklist_db::table::ShoppingWeek;
use weeklist_shared::{DaySet, Error, Result};

use crate::{
    store::WeekStore,
    week::{Items, Week, WeekId},
};

#[derive(FromRow)]
struct WeekRow {
    id: String,
    name: String,
    source_week: Option<i64>,
    created_at: i64,
    general: String,
    veggie: Option<String>,
    selected_days: String,
}

impl TryFrom<WeekRow> for Week {
    type Error = Error;

    fn try_from(row: WeekRow) -> Result<Self> {
        let created_at =
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(row.created_at) * 1_000_000)
                .map_err(|err| Error::Unknown(err.into()))?;

        let source_week = match row.source_week {
            None => None,
            Some(n) => match u32::try_from(n) {
                Ok(n) => Some(n),
                Err(_) => weeklist_shared::bail!("week {} has invalid source week {n}", row.id),
            },
        };

        let veggie = row
            .veggie
            .as_deref()
            .map(serde_json::from_str::<Items>)
            .transpose()?;

        Ok(Week {
            id: WeekId::from(row.id),
            name: row.name,
            source_week,
            created_at,
            general: serde_json::from_str(&row.general)?,
            veggie,
            selected_days: serde_json::from_str::<DaySet>(&row.selected_days)?,
        })
    }
}

fn select_weeks() -> SelectStatement {
    Query::select()
        .columns([
            ShoppingWeek::Id,
            ShoppingWeek::Name,
            ShoppingWeek::SourceWeek,
            ShoppingWeek::CreatedAt,
            ShoppingWeek::General,
            ShoppingWeek::Veggie,
            ShoppingWeek::SelectedDays,
        ])
        .from(ShoppingWeek::Table)
        .to_owned()
}

/// Weeks stored as rows of the `shopping_week` table, item maps as JSON text.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database, applying pending migrations.
    pub async fn open(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = weeklist_db::create_pool(database_url, max_connections).await?;
        weeklist_db::migrate(&pool).await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl WeekStore for SqliteStore {
    async fn list_weeks(&self) -> Result<Vec<Week>> {
        let statement = select_weeks()
            .order_by(ShoppingWeek::CreatedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, WeekRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Week::try_from).collect()
    }

    async fn store_week(&self, week: &Week) -> Result<()> {
        let created_at = i64::try_from(week.created_at.unix_timestamp_nanos() / 1_000_000)
            .map_err(|err| Error::Unknown(err.into()))?;
        let veggie = week
            .veggie
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let statement = Query::insert()
            .into_table(ShoppingWeek::Table)
            .columns([
                ShoppingWeek::Id,
                ShoppingWeek::Name,
                ShoppingWeek::SourceWeek,
                ShoppingWeek::CreatedAt,
                ShoppingWeek::General,
                ShoppingWeek::Veggie,
                ShoppingWeek::SelectedDays,
            ])
            .values_panic([
                week.id.as_str().into(),
                week.name.as_str().into(),
                week.source_week.map(i64::from).into(),
                created_at.into(),
                serde_json::to_string(&week.general)?.into(),
                veggie.into(),
                serde_json::to_string(&week.selected_days)?.into(),
            ])
            .on_conflict(
                OnConflict::column(ShoppingWeek::Id)
                    .update_columns([
                        ShoppingWeek::Name,
                        ShoppingWeek::SourceWeek,
                        ShoppingWeek::CreatedAt,
                        ShoppingWeek::General,
                        ShoppingWeek::Veggie,
                        ShoppingWeek::SelectedDays,
                    ])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_week(&self, id: &WeekId) -> Result<()> {
        let statement = Query::delete()
            .from_table(ShoppingWeek::Table)
            .and_where(Expr::col(ShoppingWeek::Id).eq(id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            weeklist_shared::not_found!("week {id}");
        }

        Ok(())
    }

    async fn load_week(&self, id: &WeekId) -> Result<Option<Week>> {
        let statement = select_weeks()
            .and_where(Expr::col(ShoppingWeek::Id).eq(id.as_str()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, WeekRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Week::try_from).transpose()
    }
}
