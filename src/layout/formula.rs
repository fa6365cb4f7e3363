//! Formula synthesis for row keys, cross-sheet lookups and list sources

use super::column::letter_to_number;
use super::schema::{keys, SheetSchema};
use crate::error::{PlanError, PlanResult};

/// Where the lookup range on the target sheet ends
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RangeEnd {
    /// Right-most column of the target schema
    #[default]
    LastColumn,
    /// A specific target column
    Column(String),
}

/// Describes a VLOOKUP join into another sheet, in terms of schema keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSpec {
    /// Column matched against the local key (first column of the range)
    pub key_column: String,
    /// Column whose value is returned
    pub return_column: String,
    pub range_end: RangeEnd,
}

impl Default for LookupSpec {
    fn default() -> Self {
        Self {
            key_column: keys::DEV_KEY.to_string(),
            return_column: keys::SIP_DEVICE_ID.to_string(),
            range_end: RangeEnd::LastColumn,
        }
    }
}

/// Builds formula strings against one sheet's schema
///
/// Letters are looked up from the schema on every call so a reordered
/// schema produces matching formulas.
pub struct FormulaSynthesizer<'a> {
    schema: &'a SheetSchema,
}

impl<'a> FormulaSynthesizer<'a> {
    pub fn new(schema: &'a SheetSchema) -> Self {
        Self { schema }
    }

    /// Composite device key for a row
    ///
    /// Example: row 2 → `CONCATENATE(A2,B2)`
    pub fn key_concatenation(&self, row: u32) -> PlanResult<String> {
        let custom = self.schema.letter_of(keys::CUSTOM_DEVICE_NAME)?;
        let device = self.schema.letter_of(keys::DEVICE_NAME)?;
        Ok(format!("CONCATENATE({custom}{row},{device}{row})"))
    }

    /// Look up this row's composite key in another sheet
    ///
    /// Example: row 2 against the Mapping schema →
    /// `VLOOKUP(C2, Mapping!$C:$F, 2, 0)`
    pub fn cross_sheet_lookup(
        &self,
        target: &SheetSchema,
        spec: &LookupSpec,
        row: u32,
    ) -> PlanResult<String> {
        let local_key = self.schema.letter_of(keys::DEV_KEY)?;

        let first = target.letter_of(&spec.key_column)?;
        let last = match &spec.range_end {
            RangeEnd::LastColumn => target.last_letter()?,
            RangeEnd::Column(key) => target.letter_of(key)?,
        };
        let returned = target.letter_of(&spec.return_column)?;

        let first_pos = letter_to_number(first)?;
        let last_pos = letter_to_number(last)?;
        let returned_pos = letter_to_number(returned)?;

        if last_pos < first_pos {
            return Err(PlanError::Layout(format!(
                "lookup range on '{}' ends at {} before its key column {}",
                target.sheet_name(),
                last,
                first
            )));
        }
        if returned_pos < first_pos || returned_pos > last_pos {
            return Err(PlanError::Layout(format!(
                "lookup column '{}' ({}) is outside the range ${}:${} on '{}'",
                spec.return_column,
                returned,
                first,
                last,
                target.sheet_name()
            )));
        }

        let index = returned_pos - first_pos + 1;
        let sheet = sheet_reference(target.sheet_name());
        Ok(format!(
            "VLOOKUP({local_key}{row}, {sheet}!${first}:${last}, {index}, 0)"
        ))
    }

    /// List formula resolving the device range of the label chosen on this
    /// row, found by its position in `listing`
    ///
    /// Example: `INDIRECT("dev_"&MATCH($A2,customdevice,0))`
    pub fn dependent_list(&self, prefix: &str, listing: &str, row: u32) -> PlanResult<String> {
        let custom = self.schema.letter_of(keys::CUSTOM_DEVICE_NAME)?;
        Ok(format!(
            "INDIRECT(\"{prefix}\"&MATCH(${custom}{row},{listing},0))"
        ))
    }
}

/// Sheet name as it appears in a reference, quoted when needed
pub fn sheet_reference(name: &str) -> String {
    let plain = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// Absolute single-column range, e.g. `='Custom Device'!$A$2:$A$3`
pub fn absolute_column_range(sheet: &str, column: char, first_row: u32, last_row: u32) -> String {
    format!(
        "={}!${column}${first_row}:${column}${last_row}",
        sheet_reference(sheet)
    )
}

/// List validation source referencing a named range, e.g. `=customdevice`
pub fn list_source(named_range: &str) -> String {
    format!("={}", named_range)
}
