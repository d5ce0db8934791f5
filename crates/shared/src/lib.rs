mod category;
mod command;
mod item;
mod weekday;

pub use category::*;
pub use command::*;
pub use item::*;
pub use weekday::*;

use std::collections::BTreeSet;

/// Set of weekdays, iterated Monday first.
pub type DaySet = BTreeSet<Weekday>;

pub fn full_week() -> DaySet {
    Weekday::all().iter().copied().collect()
}
