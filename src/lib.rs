//! Product Plan - device mapping workbook generator
//!
//! Reads a JSON device mapping and produces a workbook with three sheets:
//!
//! - **Mapping**: one row per device with a composite key formula
//! - **Product Plan**: a pre-allocated entry template whose key and SIP
//!   device id are computed by formulas joined to the Mapping sheet
//! - **Custom Device**: dropdown sources for the Product Plan
//!
//! Column letters, formulas and validation references are all derived from
//! each sheet's schema, so they stay consistent when columns move.
//!
//! # Example
//!
//! ```no_run
//! use product_plan::assembler::assemble;
//! use product_plan::config::PlanConfig;
//! use product_plan::excel::ExcelExporter;
//! use product_plan::parser::load_mapping;
//!
//! let config = PlanConfig::default();
//! let document = load_mapping(&config.input)?;
//! let plan = assemble(&document, &config)?;
//! ExcelExporter::new(&plan).export(&config.output)?;
//! # Ok::<(), product_plan::error::PlanError>(())
//! ```

pub mod assembler;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod layout;
pub mod parser;
pub mod plan;
pub mod types;

// Re-export commonly used types
pub use config::PlanConfig;
pub use error::{PlanError, PlanResult};
pub use plan::WorkbookPlan;
pub use types::{CellValue, MappingDocument, MappingRecord};
