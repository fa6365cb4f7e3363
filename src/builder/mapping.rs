//! Mapping sheet: one row per record plus the composite device key

use super::sheet::SheetBuilder;
use crate::error::PlanResult;
use crate::layout::{keys, materialize, FormulaSynthesizer, SheetId, SheetSchema};
use crate::plan::SheetPlan;
use crate::types::MappingRecord;

pub fn build_mapping_sheet(records: &[MappingRecord]) -> PlanResult<SheetPlan> {
    let builder = SheetBuilder::new(SheetId::Mapping).apply_schema(SheetSchema::mapping()?)?;

    let rows = records
        .iter()
        .map(|record| materialize(record, builder.schema()))
        .collect();

    let sheet = builder
        .populate(rows)?
        .inject_formulas(|schema, row_number, row| {
            let formula = FormulaSynthesizer::new(schema).key_concatenation(row_number)?;
            row.set_formula(keys::DEV_KEY, formula)
        })?
        .finalize();

    Ok(sheet)
}
