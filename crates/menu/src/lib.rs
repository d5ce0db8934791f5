//! The scraped weekly menu: its JSON document, the day sections it carries,
//! and the directory it is read from.

mod dates;
mod discover;
mod document;
mod sections;
mod source;
mod validate;

pub use dates::*;
pub use discover::*;
pub use document::*;
pub use sections::*;
pub use source::*;
pub use validate::*;
