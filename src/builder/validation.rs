//! Validation injector for the Product Plan dropdowns

use super::custom_device::{CUSTOM_DEVICE_RANGE, LABEL_RANGE_PREFIX};
use crate::error::{PlanError, PlanResult};
use crate::layout::{keys, list_source, FormulaSynthesizer, SheetId};
use crate::plan::{ValidationRule, WorkbookPlan};
use tracing::debug;

/// Build the list rules for every Product Plan data row
///
/// - custom device column → `=customdevice`
/// - device column → the devices of the label chosen on the same row,
///   looked up by that label's position in `customdevice`
///
/// The Custom Device sheet and its named range must already be in `plan`.
pub fn inject_validations(plan: &WorkbookPlan) -> PlanResult<Vec<ValidationRule>> {
    if plan.sheet(SheetId::CustomDevice).is_none() || plan.defined_name(CUSTOM_DEVICE_RANGE).is_none() {
        return Err(PlanError::Layout(format!(
            "named range '{}' is not defined; build the '{}' sheet before adding validations",
            CUSTOM_DEVICE_RANGE,
            SheetId::CustomDevice.name()
        )));
    }

    let product_plan = plan.sheet(SheetId::ProductPlan).ok_or_else(|| {
        PlanError::Layout(format!(
            "sheet '{}' must be built before adding validations",
            SheetId::ProductPlan.name()
        ))
    })?;

    if product_plan.rows.is_empty() {
        return Ok(Vec::new());
    }

    let first_row = 2;
    let last_row = product_plan.last_row();
    let synth = FormulaSynthesizer::new(&product_plan.schema);

    let rules = vec![
        ValidationRule {
            sheet: SheetId::ProductPlan,
            column: keys::CUSTOM_DEVICE_NAME.to_string(),
            first_row,
            last_row,
            source: list_source(CUSTOM_DEVICE_RANGE),
            allow_blank: true,
        },
        ValidationRule {
            sheet: SheetId::ProductPlan,
            column: keys::DEVICE_NAME.to_string(),
            first_row,
            last_row,
            // Relative to the first row; the spreadsheet shifts it per row
            source: list_source(&synth.dependent_list(
                LABEL_RANGE_PREFIX,
                CUSTOM_DEVICE_RANGE,
                first_row,
            )?),
            allow_blank: true,
        },
    ];

    debug!(rules = rules.len(), first_row, last_row, "validations injected");
    Ok(rules)
}
