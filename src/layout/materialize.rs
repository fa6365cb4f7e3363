//! Row materializer: raw records → schema-shaped rows

use super::schema::{keys, SheetSchema};
use crate::error::{PlanError, PlanResult};
use crate::types::{CellValue, MappingRecord};

/// One worksheet row, with a cell slot per schema column in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<(String, Option<CellValue>)>,
}

impl Row {
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Cells in schema order; `None` is a blank cell
    pub fn cells(&self) -> impl Iterator<Item = Option<&CellValue>> {
        self.cells.iter().map(|(_, v)| v.as_ref())
    }

    /// Write a literal; a formula already in the cell is never replaced
    pub fn set_literal(&mut self, key: &str, value: CellValue) -> PlanResult<()> {
        if value.is_formula() {
            return Err(PlanError::Layout(format!(
                "column '{}' expects a literal, got a formula",
                key
            )));
        }
        let slot = self.slot_mut(key)?;
        if slot.as_ref().is_some_and(CellValue::is_formula) {
            return Err(PlanError::Layout(format!(
                "refusing to overwrite formula in column '{}' with a literal",
                key
            )));
        }
        *slot = Some(value);
        Ok(())
    }

    pub fn set_formula(&mut self, key: &str, formula: String) -> PlanResult<()> {
        *self.slot_mut(key)? = Some(CellValue::Formula(formula));
        Ok(())
    }

    fn slot_mut(&mut self, key: &str) -> PlanResult<&mut Option<CellValue>> {
        self.cells
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| PlanError::Layout(format!("row has no column '{}'", key)))
    }
}

/// All-blank row following the schema
pub fn empty_row(schema: &SheetSchema) -> Row {
    Row {
        cells: schema
            .columns()
            .iter()
            .map(|c| (c.key.clone(), None))
            .collect(),
    }
}

/// Project a record onto a schema; absent fields become blank cells
pub fn materialize(record: &MappingRecord, schema: &SheetSchema) -> Row {
    let cells = schema
        .columns()
        .iter()
        .map(|col| {
            (col.key.clone(), record_field(record, &col.key).cloned())
        })
        .collect();
    Row { cells }
}

fn record_field<'a>(record: &'a MappingRecord, key: &str) -> Option<&'a CellValue> {
    let field = match key {
        keys::CUSTOM_DEVICE_NAME => &record.client_name,
        keys::DEVICE_NAME => &record.engine,
        keys::SIP_DEVICE_ID => &record.sip_device_id,
        keys::MAC_ADDRESS => &record.mac_address,
        keys::DEVICE_LOCAL_ID => &record.device_local_id,
        _ => return None,
    };
    field.as_ref()
}
