//! Ties free-text recipe ingredients to the lines of a weekly shopping list.
//!
//! The same ingredient reaches us through two independent extractions (the
//! shopping list and the per-day recipe sections), so both sides go through
//! [`normalize`] before a tiered [`MasterIndex::find`] lookup. [`DayMapper`]
//! runs that lookup for a whole week and [`DayFilter`] trims the list to the
//! days the user actually cooks.

mod day_filter;
mod day_mapper;
mod matcher;
mod normalize;

pub use day_filter::*;
pub use day_mapper::*;
pub use matcher::*;
pub use normalize::{MAX_KEY_WORDS, NormalizedKey, normalize, normalize_with};
