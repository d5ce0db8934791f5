use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum ShoppingWeek {
    Table,
    Id,
    Name,
    SourceWeek,
    CreatedAt,
    General,
    Veggie,
    SelectedDays,
}
