//! Product Plan sheet: pre-allocated rows joined to Mapping by formulas

use super::sheet::SheetBuilder;
use crate::error::PlanResult;
use crate::layout::{keys, FormulaSynthesizer, LookupSpec, SheetId, SheetSchema};
use crate::plan::SheetPlan;

/// Build `allowed_rows` blank rows, each carrying the composite key and the
/// SIP device id lookup into `mapping`
///
/// Row count is independent of the input data: the rows are filled in by
/// hand after export.
pub fn build_product_plan_sheet(
    mapping: &SheetSchema,
    lookup: &LookupSpec,
    allowed_rows: u32,
) -> PlanResult<SheetPlan> {
    let sheet = SheetBuilder::new(SheetId::ProductPlan)
        .apply_schema(SheetSchema::product_plan()?)?
        .populate_empty(allowed_rows)?
        .inject_formulas(|schema, row_number, row| {
            let synth = FormulaSynthesizer::new(schema);
            row.set_formula(keys::DEV_KEY, synth.key_concatenation(row_number)?)?;
            row.set_formula(
                keys::SIP_DEVICE_ID,
                synth.cross_sheet_lookup(mapping, lookup, row_number)?,
            )
        })?
        .finalize();

    Ok(sheet)
}
