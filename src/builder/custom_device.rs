//! Custom Device sheet: dropdown sources for the Product Plan
//!
//! Column A lists each distinct label; every label then gets its own column
//! listing the devices mapped under it. Both are exposed as named ranges.

use super::sheet::SheetBuilder;
use crate::error::PlanResult;
use crate::layout::{absolute_column_range, empty_row, keys, SheetId, SheetSchema};
use crate::plan::{DefinedName, SheetPlan};
use crate::types::CustomDeviceSet;
use tracing::debug;

/// Named range over the label listing column
pub const CUSTOM_DEVICE_RANGE: &str = "customdevice";

/// Prefix of the per-label device ranges; keeps names from parsing as cell references
pub const LABEL_RANGE_PREFIX: &str = "dev_";

/// The built sheet together with the names it defines
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDeviceSheet {
    pub sheet: SheetPlan,
    pub defined_names: Vec<DefinedName>,
}

/// Defined name for the device list of the label at `position` (1-based) in
/// the listing, e.g. `dev_1`
///
/// Names never depend on the label text, so any label gets a valid, unique name.
pub fn label_range_name(position: usize) -> String {
    format!("{}{}", LABEL_RANGE_PREFIX, position)
}

pub fn build_custom_device_sheet(devices: &CustomDeviceSet) -> PlanResult<CustomDeviceSheet> {
    let builder =
        SheetBuilder::new(SheetId::CustomDevice).apply_schema(SheetSchema::custom_device(devices)?)?;

    let depth = devices
        .entries()
        .iter()
        .map(|e| e.devices.len())
        .chain(std::iter::once(devices.len()))
        .max()
        .unwrap_or(0);

    let mut rows = Vec::with_capacity(depth);
    for idx in 0..depth {
        let mut row = empty_row(builder.schema());
        if let Some(entry) = devices.entries().get(idx) {
            row.set_literal(keys::CUSTOM_DEVICE, entry.label.clone())?;
        }
        for (position, entry) in devices.entries().iter().enumerate() {
            if let Some(device) = entry.devices.get(idx) {
                row.set_literal(&keys::label(position + 1), device.clone())?;
            }
        }
        rows.push(row);
    }

    let sheet = builder.populate(rows)?.without_formulas().finalize();
    let defined_names = define_ranges(&sheet.schema, devices)?;

    debug!(
        labels = devices.len(),
        names = defined_names.len(),
        "custom device sheet built"
    );
    Ok(CustomDeviceSheet {
        sheet,
        defined_names,
    })
}

fn define_ranges(schema: &SheetSchema, devices: &CustomDeviceSet) -> PlanResult<Vec<DefinedName>> {
    let sheet_name = schema.sheet_name();

    // An empty set still gets a one-cell range so list rules stay valid
    let listing_end = devices.len().max(1) as u32 + 1;
    let mut names = vec![DefinedName {
        name: CUSTOM_DEVICE_RANGE.to_string(),
        refers_to: absolute_column_range(
            sheet_name,
            schema.letter_of(keys::CUSTOM_DEVICE)?,
            2,
            listing_end,
        ),
    }];

    // Position n in the listing (worksheet row n + 1) owns `dev_<n>`
    for (idx, entry) in devices.entries().iter().enumerate() {
        let position = idx + 1;
        let end = entry.devices.len().max(1) as u32 + 1;
        let column = schema.letter_of(&keys::label(position))?;
        names.push(DefinedName {
            name: label_range_name(position),
            refers_to: absolute_column_range(sheet_name, column, 2, end),
        });
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, MappingRecord};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn set(records: &[MappingRecord]) -> CustomDeviceSet {
        CustomDeviceSet::from_records(records)
    }

    fn name(name: &str, refers_to: &str) -> DefinedName {
        DefinedName {
            name: name.to_string(),
            refers_to: refers_to.to_string(),
        }
    }

    #[test]
    fn test_duplicate_labels_listed_once() {
        let records = vec![
            MappingRecord::new(Some("A"), Some("E1")).with_identifiers("S1", "M1", "D1"),
            MappingRecord::new(Some("A"), Some("E2")).with_identifiers("S2", "M2", "D2"),
        ];
        let built = build_custom_device_sheet(&set(&records)).unwrap();

        let listing: Vec<&CellValue> = built
            .sheet
            .rows
            .iter()
            .filter_map(|r| r.get(keys::CUSTOM_DEVICE))
            .collect();
        assert_eq!(listing, vec![&text("A")]);

        // Label column holds both devices
        let column = keys::label(1);
        assert_eq!(built.sheet.row(2).unwrap().get(&column), Some(&text("E1")));
        assert_eq!(built.sheet.row(3).unwrap().get(&column), Some(&text("E2")));
    }

    #[test]
    fn test_defined_names() {
        let records = vec![
            MappingRecord::new(Some("Line 1"), Some("E1")),
            MappingRecord::new(Some("Line 2"), Some("E2")),
            MappingRecord::new(Some("Line 1"), Some("E3")),
        ];
        let built = build_custom_device_sheet(&set(&records)).unwrap();

        assert_eq!(
            built.defined_names,
            vec![
                name("customdevice", "='Custom Device'!$A$2:$A$3"),
                name("dev_1", "='Custom Device'!$B$2:$B$3"),
                name("dev_2", "='Custom Device'!$C$2:$C$2"),
            ]
        );
    }

    #[test]
    fn test_empty_set_still_defines_listing_range() {
        let built = build_custom_device_sheet(&CustomDeviceSet::default()).unwrap();

        assert!(built.sheet.rows.is_empty());
        assert_eq!(built.sheet.schema.len(), 1);
        assert_eq!(
            built.defined_names,
            vec![name("customdevice", "='Custom Device'!$A$2:$A$2")]
        );
    }

    #[test]
    fn test_similar_and_punctuated_labels_get_their_own_ranges() {
        let long = "L".repeat(300);
        let records = vec![
            MappingRecord::new(Some("Line 1"), Some("E1")),
            MappingRecord::new(Some("line1"), Some("E2")),
            MappingRecord::new(Some("A/B-C"), Some("E3")),
            MappingRecord::new(Some(&long), Some("E4")),
        ];
        let built = build_custom_device_sheet(&set(&records)).unwrap();

        assert_eq!(
            built.defined_names,
            vec![
                name("customdevice", "='Custom Device'!$A$2:$A$5"),
                name("dev_1", "='Custom Device'!$B$2:$B$2"),
                name("dev_2", "='Custom Device'!$C$2:$C$2"),
                name("dev_3", "='Custom Device'!$D$2:$D$2"),
                name("dev_4", "='Custom Device'!$E$2:$E$2"),
            ]
        );

        // Listing row n + 1 pairs with dev_<n>, whose column holds that label's devices
        let sheet = &built.sheet;
        assert_eq!(sheet.row(3).unwrap().get(keys::CUSTOM_DEVICE), Some(&text("line1")));
        assert_eq!(sheet.row(2).unwrap().get(&keys::label(2)), Some(&text("E2")));
        assert_eq!(sheet.row(4).unwrap().get(keys::CUSTOM_DEVICE), Some(&text("A/B-C")));
        assert_eq!(sheet.row(2).unwrap().get(&keys::label(3)), Some(&text("E3")));
    }

    #[test]
    fn test_label_named_like_listing_key() {
        let records = vec![MappingRecord::new(Some("customDevice"), Some("E1"))];
        let built = build_custom_device_sheet(&set(&records)).unwrap();

        let row = built.sheet.row(2).unwrap();
        assert_eq!(row.get(keys::CUSTOM_DEVICE), Some(&text("customDevice")));
        assert_eq!(row.get(&keys::label(1)), Some(&text("E1")));
    }

    #[test]
    fn test_numeric_labels_and_devices_keep_their_type() {
        let records = vec![MappingRecord {
            client_name: Some(CellValue::Number(7.0)),
            engine: Some(CellValue::Number(301.0)),
            ..Default::default()
        }];
        let built = build_custom_device_sheet(&set(&records)).unwrap();

        let row = built.sheet.row(2).unwrap();
        assert_eq!(row.get(keys::CUSTOM_DEVICE), Some(&CellValue::Number(7.0)));
        assert_eq!(row.get(&keys::label(1)), Some(&CellValue::Number(301.0)));
        assert_eq!(built.sheet.schema.columns()[1].header, "7");
    }

    #[test]
    fn test_label_range_name() {
        assert_eq!(label_range_name(1), "dev_1");
        assert_eq!(label_range_name(25), "dev_25");
    }
}
