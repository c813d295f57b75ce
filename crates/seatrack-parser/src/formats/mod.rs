mod catlog;
mod common;
mod igotu;

pub use catlog::CatlogParser;
pub use igotu::IgotuParser;

pub(crate) use common::{locate_columns, parse_fix_rows};
