//! In-memory workbook plan produced by the layout engine and rendered by the exporter

use crate::layout::{Row, SheetId, SheetSchema};

/// A fully built worksheet: schema plus data rows
///
/// Data rows start at worksheet row 2; row 1 is always the header.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub id: SheetId,
    pub schema: SheetSchema,
    pub rows: Vec<Row>,
}

impl SheetPlan {
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Worksheet row number (1-based) of the last data row, or 1 when empty
    pub fn last_row(&self) -> u32 {
        self.rows.len() as u32 + 1
    }

    /// Data row by worksheet row number (2-based)
    pub fn row(&self, row_number: u32) -> Option<&Row> {
        let idx = row_number.checked_sub(2)?;
        self.rows.get(idx as usize)
    }
}

/// Workbook-scope named range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedName {
    pub name: String,
    /// Reference including the leading `=`, e.g. `='Custom Device'!$A$2:$A$3`
    pub refers_to: String,
}

/// List-type data validation attached to one column over a row span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    pub sheet: SheetId,
    pub column: String,
    pub first_row: u32,
    pub last_row: u32,
    /// List source formula including the leading `=`
    pub source: String,
    pub allow_blank: bool,
}

/// Everything the exporter needs to write the workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookPlan {
    pub sheets: Vec<SheetPlan>,
    pub defined_names: Vec<DefinedName>,
    pub validations: Vec<ValidationRule>,
}

impl WorkbookPlan {
    pub fn sheet(&self, id: SheetId) -> Option<&SheetPlan> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn defined_name(&self, name: &str) -> Option<&DefinedName> {
        self.defined_names.iter().find(|d| d.name == name)
    }
}
