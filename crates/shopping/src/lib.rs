//! Stored weekly shopping lists and the manager that owns them.

mod lifecycle;
mod store;
mod week;

pub use lifecycle::*;
pub use store::*;
pub use week::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::*;
    }
}
