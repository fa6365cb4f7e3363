//! Sheet schema registry

use super::column::{number_to_letter, MAX_COLUMNS};
use crate::error::{PlanError, PlanResult};
use crate::types::CustomDeviceSet;

/// Widest column Excel accepts
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Column definition: display header, internal key, display width
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    pub key: String,
    pub width: f64,
}

impl ColumnSpec {
    /// Create a column with an explicit width
    pub fn new(header: &str, key: &str, width: f64) -> Self {
        Self {
            header: header.to_string(),
            key: key.to_string(),
            width,
        }
    }

    /// Create a column whose width is twice the header length, capped at
    /// [`MAX_COLUMN_WIDTH`]
    pub fn auto_width(header: &str, key: &str) -> Self {
        let width = ((header.chars().count() * 2) as f64).min(MAX_COLUMN_WIDTH);
        Self::new(header, key, width)
    }
}

/// The generated sheets, in workbook order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    Mapping,
    ProductPlan,
    CustomDevice,
}

impl SheetId {
    /// Worksheet tab name
    pub fn name(self) -> &'static str {
        match self {
            SheetId::Mapping => "Mapping",
            SheetId::ProductPlan => "Product Plan",
            SheetId::CustomDevice => "Custom Device",
        }
    }

    /// Worksheet tab color (RGB)
    pub fn tab_color(self) -> u32 {
        match self {
            SheetId::Mapping => 0xAD9D9D,
            SheetId::ProductPlan => 0xD9ADAD,
            SheetId::CustomDevice => 0xF5A25D,
        }
    }
}

/// Schema keys shared by several sheets
pub mod keys {
    pub const CUSTOM_DEVICE_NAME: &str = "customDeviceName";
    pub const DEVICE_NAME: &str = "deviceName";
    pub const DEV_KEY: &str = "devKey";
    pub const SIP_DEVICE_ID: &str = "sipDeviceId";
    pub const MAC_ADDRESS: &str = "macAddress";
    pub const DEVICE_LOCAL_ID: &str = "deviceLocalId";
    pub const CUSTOM_DEVICE: &str = "customDevice";

    /// Key of the Custom Device column holding the devices of the label at
    /// `position` (1-based) in the listing
    ///
    /// The `:` keeps it apart from every fixed key whatever the label text.
    pub fn label(position: usize) -> String {
        format!("label:{position}")
    }
}

/// Ordered, immutable column list of one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSchema {
    sheet_name: String,
    columns: Vec<ColumnSpec>,
}

impl SheetSchema {
    /// Build a schema, rejecting duplicate keys and more than 26 columns
    pub fn new(sheet_name: &str, columns: Vec<ColumnSpec>) -> PlanResult<Self> {
        if columns.len() > MAX_COLUMNS {
            return Err(PlanError::ColumnOverflow {
                sheet: Some(sheet_name.to_string()),
                column: columns.len(),
            });
        }

        for (idx, col) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.key == col.key) {
                return Err(PlanError::Layout(format!(
                    "duplicate column key '{}' in sheet '{}'",
                    col.key, sheet_name
                )));
            }
        }

        Ok(Self {
            sheet_name: sheet_name.to_string(),
            columns,
        })
    }

    pub fn mapping() -> PlanResult<Self> {
        use keys::*;
        Self::new(
            SheetId::Mapping.name(),
            vec![
                ColumnSpec::new("machine", CUSTOM_DEVICE_NAME, 30.0),
                ColumnSpec::new("engine", DEVICE_NAME, 30.0),
                ColumnSpec::new("dev", DEV_KEY, 20.0),
                ColumnSpec::new("sip_device_id", SIP_DEVICE_ID, 46.0),
                ColumnSpec::new("mac_address", MAC_ADDRESS, 20.0),
                ColumnSpec::new("device_local_id", DEVICE_LOCAL_ID, 20.0),
            ],
        )
    }

    pub fn product_plan() -> PlanResult<Self> {
        use keys::*;
        Self::new(
            SheetId::ProductPlan.name(),
            vec![
                ColumnSpec::new("machine", CUSTOM_DEVICE_NAME, 30.0),
                ColumnSpec::new("engine", DEVICE_NAME, 30.0),
                ColumnSpec::new("dev", DEV_KEY, 20.0),
                ColumnSpec::new("product_name", "productName", 20.0),
                ColumnSpec::new("process", "processName", 20.0),
                ColumnSpec::new("standard_motor_working_time", "motorWorkingTime", 30.0),
                ColumnSpec::new("standard_standby_time", "standbyTime", 30.0),
                ColumnSpec::new("quantity_produced", "quantityProduced", 20.0),
                ColumnSpec::new("start_time", "startTime", 20.0),
                ColumnSpec::new("start_date", "startDate", 20.0),
                ColumnSpec::new("sip_device_id", SIP_DEVICE_ID, 46.0),
            ],
        )
    }

    /// Listing column followed by one column per distinct label
    ///
    /// Label columns are keyed by listing position and headed by the label.
    pub fn custom_device(devices: &CustomDeviceSet) -> PlanResult<Self> {
        let mut columns = vec![ColumnSpec::new("Custom Device", keys::CUSTOM_DEVICE, 30.0)];
        for (idx, label) in devices.labels().enumerate() {
            columns.push(ColumnSpec::auto_width(&label.to_string(), &keys::label(idx + 1)));
        }
        Self::new(SheetId::CustomDevice.name(), columns)
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 1-based position of a column
    pub fn position_of(&self, key: &str) -> PlanResult<usize> {
        self.columns
            .iter()
            .position(|c| c.key == key)
            .map(|idx| idx + 1)
            .ok_or_else(|| {
                PlanError::Layout(format!(
                    "column '{}' is not defined in sheet '{}'",
                    key, self.sheet_name
                ))
            })
    }

    /// Column letter derived from the column's current position
    pub fn letter_of(&self, key: &str) -> PlanResult<char> {
        let position = self.position_of(key)?;
        number_to_letter(position).map_err(|e| e.in_sheet(&self.sheet_name))
    }

    /// Letter of the right-most column
    pub fn last_letter(&self) -> PlanResult<char> {
        number_to_letter(self.columns.len()).map_err(|e| e.in_sheet(&self.sheet_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MappingRecord;

    #[test]
    fn test_auto_width_is_twice_header_length() {
        assert_eq!(ColumnSpec::auto_width("Line 1", "Line 1").width, 12.0);
        assert_eq!(ColumnSpec::auto_width("Máy", "Máy").width, 6.0);
    }

    #[test]
    fn test_auto_width_capped() {
        let long = "x".repeat(200);
        assert_eq!(ColumnSpec::auto_width(&long, "k").width, MAX_COLUMN_WIDTH);
        assert_eq!(ColumnSpec::auto_width(&"x".repeat(127), "k").width, 254.0);
    }

    #[test]
    fn test_mapping_letters() {
        let schema = SheetSchema::mapping().unwrap();
        assert_eq!(schema.letter_of(keys::CUSTOM_DEVICE_NAME).unwrap(), 'A');
        assert_eq!(schema.letter_of(keys::DEVICE_NAME).unwrap(), 'B');
        assert_eq!(schema.letter_of(keys::DEV_KEY).unwrap(), 'C');
        assert_eq!(schema.letter_of(keys::SIP_DEVICE_ID).unwrap(), 'D');
        assert_eq!(schema.last_letter().unwrap(), 'F');
    }

    #[test]
    fn test_product_plan_letters() {
        let schema = SheetSchema::product_plan().unwrap();
        assert_eq!(schema.len(), 11);
        assert_eq!(schema.letter_of(keys::DEV_KEY).unwrap(), 'C');
        assert_eq!(schema.letter_of(keys::SIP_DEVICE_ID).unwrap(), 'K');
    }

    #[test]
    fn test_letters_follow_reordering() {
        let schema = SheetSchema::new(
            "Test",
            vec![
                ColumnSpec::new("engine", keys::DEVICE_NAME, 10.0),
                ColumnSpec::new("machine", keys::CUSTOM_DEVICE_NAME, 10.0),
            ],
        )
        .unwrap();
        assert_eq!(schema.letter_of(keys::CUSTOM_DEVICE_NAME).unwrap(), 'B');
        assert_eq!(schema.letter_of(keys::DEVICE_NAME).unwrap(), 'A');
    }

    #[test]
    fn test_unknown_key() {
        let schema = SheetSchema::mapping().unwrap();
        let err = schema.letter_of("productName").unwrap_err();
        assert!(err.to_string().contains("'productName' is not defined in sheet 'Mapping'"));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = SheetSchema::new(
            "Test",
            vec![
                ColumnSpec::new("a", "same", 10.0),
                ColumnSpec::new("b", "same", 10.0),
            ],
        );
        assert!(matches!(result, Err(PlanError::Layout(_))));
    }

    #[test]
    fn test_custom_device_schema_grows_with_labels() {
        let records = vec![
            MappingRecord::new(Some("Line 1"), Some("E1")),
            MappingRecord::new(Some("Line 2"), Some("E2")),
            MappingRecord::new(Some("Line 1"), Some("E3")),
        ];
        let schema = SheetSchema::custom_device(&CustomDeviceSet::from_records(&records)).unwrap();

        let headers: Vec<&str> = schema.columns().iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Custom Device", "Line 1", "Line 2"]);
        assert_eq!(schema.letter_of(&keys::label(1)).unwrap(), 'B');
        assert_eq!(schema.letter_of(&keys::label(2)).unwrap(), 'C');
    }

    #[test]
    fn test_custom_device_schema_overflow() {
        let records: Vec<MappingRecord> = (0..26)
            .map(|i| MappingRecord::new(Some(&format!("L{}", i)), Some("E")))
            .collect();
        let err = SheetSchema::custom_device(&CustomDeviceSet::from_records(&records)).unwrap_err();

        assert!(matches!(
            err,
            PlanError::ColumnOverflow { ref sheet, column: 27 } if sheet.as_deref() == Some("Custom Device")
        ));
    }

    #[test]
    fn test_label_named_like_listing_key() {
        let records = vec![
            MappingRecord::new(Some("customDevice"), Some("E1")),
            MappingRecord::new(Some("label:1"), Some("E2")),
        ];
        let schema = SheetSchema::custom_device(&CustomDeviceSet::from_records(&records)).unwrap();

        let headers: Vec<&str> = schema.columns().iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Custom Device", "customDevice", "label:1"]);
        assert_eq!(schema.letter_of(keys::CUSTOM_DEVICE).unwrap(), 'A');
        assert_eq!(schema.letter_of(&keys::label(1)).unwrap(), 'B');
        assert_eq!(schema.letter_of(&keys::label(2)).unwrap(), 'C');
    }

    #[test]
    fn test_numeric_label_header() {
        let records = vec![MappingRecord {
            client_name: Some(crate::types::CellValue::Number(42.0)),
            ..Default::default()
        }];
        let schema = SheetSchema::custom_device(&CustomDeviceSet::from_records(&records)).unwrap();
        assert_eq!(schema.columns()[1].header, "42");
        assert_eq!(schema.columns()[1].width, 4.0);
    }
}
