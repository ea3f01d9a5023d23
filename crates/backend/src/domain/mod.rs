pub mod a001_sheet;
