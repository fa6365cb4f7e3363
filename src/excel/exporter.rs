//! Excel exporter implementation - WorkbookPlan → .xlsx

use crate::error::{PlanError, PlanResult};
use crate::plan::{SheetPlan, WorkbookPlan};
use crate::types::CellValue;
use rust_xlsxwriter::{Color, DataValidation, Formula, Workbook, Worksheet};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Renders a workbook plan with rust_xlsxwriter
pub struct ExcelExporter<'a> {
    plan: &'a WorkbookPlan,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(plan: &'a WorkbookPlan) -> Self {
        Self { plan }
    }

    /// Render and write to `output_path`
    ///
    /// The file is written next to the destination under a temporary name
    /// and renamed into place, so a failed run never leaves a partial file.
    pub fn export(&self, output_path: &Path) -> PlanResult<()> {
        let buffer = self.to_buffer()?;

        let write_failure = |source: std::io::Error| PlanError::WriteFailure {
            path: output_path.to_path_buf(),
            source,
        };

        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(write_failure)?;
        temp.write_all(&buffer).map_err(write_failure)?;
        temp.as_file().sync_all().map_err(write_failure)?;
        temp.persist(output_path)
            .map_err(|e| write_failure(e.error))?;

        info!("saved workbook to {}", output_path.display());
        Ok(())
    }

    /// Render the workbook to xlsx bytes
    pub fn to_buffer(&self) -> PlanResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        for sheet in &self.plan.sheets {
            self.export_sheet(&mut workbook, sheet)?;
        }

        for name in &self.plan.defined_names {
            workbook
                .define_name(name.name.as_str(), &name.refers_to)
                .map_err(|e| {
                    PlanError::Export(format!("Failed to define name '{}': {}", name.name, e))
                })?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| PlanError::Export(format!("Failed to render workbook: {}", e)))
    }

    /// Export a single sheet: header, widths, rows, then its validations
    fn export_sheet(&self, workbook: &mut Workbook, sheet: &SheetPlan) -> PlanResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet.name())
            .map_err(|e| PlanError::Export(format!("Failed to set worksheet name: {}", e)))?;
        worksheet.set_tab_color(Color::RGB(sheet.id.tab_color()));

        for (col_idx, column) in sheet.schema.columns().iter().enumerate() {
            let col = col_idx as u16;
            worksheet
                .write_string(0, col, &column.header)
                .map_err(|e| PlanError::Export(format!("Failed to write header: {}", e)))?;
            worksheet
                .set_column_width(col, column.width)
                .map_err(|e| PlanError::Export(format!("Failed to set column width: {}", e)))?;
        }

        // Data rows start at worksheet row 2 (index 1)
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let excel_row = row_idx as u32 + 1;
            for (col_idx, cell) in row.cells().enumerate() {
                if let Some(value) = cell {
                    Self::write_cell_value(worksheet, excel_row, col_idx as u16, value)?;
                }
            }
        }

        for rule in self.plan.validations.iter().filter(|v| v.sheet == sheet.id) {
            let col = sheet.schema.position_of(&rule.column)? as u16 - 1;
            let validation = DataValidation::new()
                .allow_list_formula(Formula::new(&rule.source))
                .ignore_blank(rule.allow_blank);
            worksheet
                .add_data_validation(rule.first_row - 1, col, rule.last_row - 1, col, &validation)
                .map_err(|e| PlanError::Export(format!("Failed to add validation: {}", e)))?;
        }

        debug!(sheet = sheet.name(), rows = sheet.rows.len(), "sheet exported");
        Ok(())
    }

    fn write_cell_value(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> PlanResult<()> {
        match value {
            CellValue::Text(text) => {
                worksheet
                    .write_string(row, col, text)
                    .map_err(|e| PlanError::Export(format!("Failed to write text: {}", e)))?;
            }
            CellValue::Number(number) => {
                worksheet
                    .write_number(row, col, *number)
                    .map_err(|e| PlanError::Export(format!("Failed to write number: {}", e)))?;
            }
            CellValue::Boolean(flag) => {
                worksheet
                    .write_boolean(row, col, *flag)
                    .map_err(|e| PlanError::Export(format!("Failed to write boolean: {}", e)))?;
            }
            CellValue::Formula(formula) => {
                worksheet
                    .write_formula(row, col, Formula::new(formula))
                    .map_err(|e| PlanError::Export(format!("Failed to write formula: {}", e)))?;
            }
        }
        Ok(())
    }
}
