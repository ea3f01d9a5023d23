pub mod u501_export_workbook;
