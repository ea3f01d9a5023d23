pub mod cell;
pub mod converter;
pub mod raw_sheet;

pub use cell::Cell;
pub use converter::{convert, ConvertOptions};
pub use raw_sheet::RawSheet;
