//! Sheet builders and the validation injector

mod custom_device;
mod mapping;
mod product_plan;
mod sheet;
mod validation;

pub use custom_device::{
    build_custom_device_sheet, label_range_name, CustomDeviceSheet, CUSTOM_DEVICE_RANGE,
    LABEL_RANGE_PREFIX,
};
pub use mapping::build_mapping_sheet;
pub use product_plan::build_product_plan_sheet;
pub use sheet::{Created, FormulasInjected, RowsPopulated, SchemaApplied, SheetBuilder};
pub use validation::inject_validations;
