use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ShoppingWeek;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingWeek::Table)
        .col(
            ColumnDef::new(ShoppingWeek::Id)
                .string()
                .not_null()
                .string_len(80)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingWeek::Name)
                .string()
                .not_null()
                .string_len(120),
        )
        .col(ColumnDef::new(ShoppingWeek::SourceWeek).integer())
        .col(
            ColumnDef::new(ShoppingWeek::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingWeek::General).text().not_null())
        .col(ColumnDef::new(ShoppingWeek::Veggie).text())
        .col(ColumnDef::new(ShoppingWeek::SelectedDays).text().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingWeek::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}

pub struct CreatedAtIdx;

fn create_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_shopping_week_created_at")
        .table(ShoppingWeek::Table)
        .col(ShoppingWeek::CreatedAt)
        .to_owned()
}

fn drop_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_shopping_week_created_at")
        .table(ShoppingWeek::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreatedAtIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
