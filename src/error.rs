use std::path::PathBuf;
use thiserror::Error;

pub type PlanResult<T> = Result<T, PlanError>;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed input in {}: {reason}", path.display())]
    InputMalformed { path: PathBuf, reason: String },

    #[error("Column {column} is outside the single-letter range A..Z{}", sheet_suffix(sheet))]
    ColumnOverflow {
        sheet: Option<String>,
        column: usize,
    },

    #[error("Invalid column letter: {0:?}")]
    InvalidColumnLetter(char),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn sheet_suffix(sheet: &Option<String>) -> String {
    match sheet {
        Some(name) => format!(" (sheet '{}')", name),
        None => String::new(),
    }
}

impl PlanError {
    /// Attach the sheet name to a column overflow raised by the codec.
    pub fn in_sheet(self, sheet_name: &str) -> Self {
        match self {
            PlanError::ColumnOverflow { sheet: None, column } => PlanError::ColumnOverflow {
                sheet: Some(sheet_name.to_string()),
                column,
            },
            other => other,
        }
    }
}
