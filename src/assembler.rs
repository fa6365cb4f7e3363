//! Workbook assembly in the fixed sheet order

use crate::builder::{
    build_custom_device_sheet, build_mapping_sheet, build_product_plan_sheet, inject_validations,
};
use crate::config::PlanConfig;
use crate::error::PlanResult;
use crate::plan::WorkbookPlan;
use crate::types::{CustomDeviceSet, MappingDocument};
use tracing::debug;

/// Build the full workbook plan
///
/// Order: Mapping → Product Plan → Custom Device → Product Plan validations.
/// Product Plan lookups target the Mapping schema, and the validations
/// reference names defined by the Custom Device sheet.
pub fn assemble(document: &MappingDocument, config: &PlanConfig) -> PlanResult<WorkbookPlan> {
    config.validate()?;
    let mut plan = WorkbookPlan::default();

    let mapping = build_mapping_sheet(&document.data)?;
    let product_plan = build_product_plan_sheet(&mapping.schema, &config.lookup, config.allowed_rows)?;
    plan.sheets.push(mapping);
    plan.sheets.push(product_plan);

    // Derived fresh from the records on every run
    let devices = CustomDeviceSet::from_records(&document.data);
    let custom_device = build_custom_device_sheet(&devices)?;
    plan.sheets.push(custom_device.sheet);
    plan.defined_names.extend(custom_device.defined_names);

    let validations = inject_validations(&plan)?;
    plan.validations.extend(validations);

    debug!(
        sheets = plan.sheets.len(),
        names = plan.defined_names.len(),
        validations = plan.validations.len(),
        "workbook assembled"
    );
    Ok(plan)
}
