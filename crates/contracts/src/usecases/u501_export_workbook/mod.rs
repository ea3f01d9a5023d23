pub mod response;

pub use response::{Record, SheetResult, WorkbookResult};
