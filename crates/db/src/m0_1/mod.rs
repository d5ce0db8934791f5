mod shopping_week;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "weeklist",
    "m0_1",
    vec_box![],
    vec_box![shopping_week::CreateTable, shopping_week::CreatedAtIdx]
);
