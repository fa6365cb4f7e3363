//! Run configuration

use crate::error::{PlanError, PlanResult};
use crate::layout::LookupSpec;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "Mapping.json";
pub const DEFAULT_OUTPUT: &str = "hieu.xlsx";
pub const DEFAULT_ALLOWED_ROWS: u32 = 100;

/// Excel's row limit minus the header row
pub const MAX_ALLOWED_ROWS: u32 = 1_048_575;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Pre-allocated Product Plan rows, excluding the header
    pub allowed_rows: u32,
    /// How Product Plan rows join into the Mapping sheet
    pub lookup: LookupSpec,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            allowed_rows: DEFAULT_ALLOWED_ROWS,
            lookup: LookupSpec::default(),
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> PlanResult<()> {
        if !(1..=MAX_ALLOWED_ROWS).contains(&self.allowed_rows) {
            return Err(PlanError::Layout(format!(
                "allowed rows must be between 1 and {}, got {}",
                MAX_ALLOWED_ROWS, self.allowed_rows
            )));
        }
        Ok(())
    }
}
