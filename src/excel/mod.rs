//! Excel export of a workbook plan

mod exporter;

pub use exporter::ExcelExporter;
