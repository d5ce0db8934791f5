pub mod menu;
pub mod week;
