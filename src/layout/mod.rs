//! Cross-sheet layout engine
//!
//! Column letters are always derived from a sheet's schema position, never
//! stored. Every formula and validation reference is built from these letters,
//! so reordering a schema moves its formulas with it.

mod column;
mod formula;
mod materialize;
mod schema;

pub use column::{letter_to_number, number_to_letter, MAX_COLUMNS};
pub use formula::{
    absolute_column_range, list_source, sheet_reference, FormulaSynthesizer, LookupSpec, RangeEnd,
};
pub use materialize::{empty_row, materialize, Row};
pub use schema::{keys, ColumnSpec, SheetId, SheetSchema};
