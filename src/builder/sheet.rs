//! Per-sheet build pipeline
//!
//! `Created → SchemaApplied → RowsPopulated → FormulasInjected → SheetPlan`.
//! Each stage is its own type, so formulas cannot be written before rows
//! exist and the schema cannot change once rows are in place.

use crate::error::{PlanError, PlanResult};
use crate::layout::{empty_row, Row, SheetId, SheetSchema};
use crate::plan::SheetPlan;
use tracing::debug;

pub struct Created;

pub struct SchemaApplied {
    schema: SheetSchema,
}

pub struct RowsPopulated {
    schema: SheetSchema,
    rows: Vec<Row>,
}

pub struct FormulasInjected {
    schema: SheetSchema,
    rows: Vec<Row>,
}

pub struct SheetBuilder<S> {
    id: SheetId,
    state: S,
}

impl SheetBuilder<Created> {
    pub fn new(id: SheetId) -> Self {
        Self { id, state: Created }
    }

    pub fn apply_schema(self, schema: SheetSchema) -> PlanResult<SheetBuilder<SchemaApplied>> {
        if schema.sheet_name() != self.id.name() {
            return Err(PlanError::Layout(format!(
                "schema for '{}' applied to sheet '{}'",
                schema.sheet_name(),
                self.id.name()
            )));
        }
        debug!(sheet = self.id.name(), columns = schema.len(), "schema applied");
        Ok(SheetBuilder {
            id: self.id,
            state: SchemaApplied { schema },
        })
    }
}

impl SheetBuilder<SchemaApplied> {
    pub fn schema(&self) -> &SheetSchema {
        &self.state.schema
    }

    /// Insert data rows; every row must have one slot per schema column
    pub fn populate(self, rows: Vec<Row>) -> PlanResult<SheetBuilder<RowsPopulated>> {
        let width = self.state.schema.len();
        if let Some(idx) = rows.iter().position(|r| r.cells().count() != width) {
            return Err(PlanError::Layout(format!(
                "row {} of sheet '{}' does not match its {}-column schema",
                idx + 2,
                self.id.name(),
                width
            )));
        }
        debug!(sheet = self.id.name(), rows = rows.len(), "rows populated");
        Ok(SheetBuilder {
            id: self.id,
            state: RowsPopulated {
                schema: self.state.schema,
                rows,
            },
        })
    }

    /// Pre-allocate `count` blank rows
    pub fn populate_empty(self, count: u32) -> PlanResult<SheetBuilder<RowsPopulated>> {
        let rows = (0..count).map(|_| empty_row(&self.state.schema)).collect();
        self.populate(rows)
    }
}

impl SheetBuilder<RowsPopulated> {
    pub fn schema(&self) -> &SheetSchema {
        &self.state.schema
    }

    /// Run `inject` once per data row with its worksheet row number (from 2)
    pub fn inject_formulas<F>(self, mut inject: F) -> PlanResult<SheetBuilder<FormulasInjected>>
    where
        F: FnMut(&SheetSchema, u32, &mut Row) -> PlanResult<()>,
    {
        let RowsPopulated { schema, mut rows } = self.state;
        for (idx, row) in rows.iter_mut().enumerate() {
            let row_number = u32::try_from(idx + 2).map_err(|_| {
                PlanError::Layout(format!("sheet '{}' has too many rows", self.id.name()))
            })?;
            inject(&schema, row_number, row)?;
        }
        debug!(sheet = self.id.name(), "formulas injected");
        Ok(SheetBuilder {
            id: self.id,
            state: FormulasInjected { schema, rows },
        })
    }

    /// For sheets that carry only literals
    pub fn without_formulas(self) -> SheetBuilder<FormulasInjected> {
        let RowsPopulated { schema, rows } = self.state;
        SheetBuilder {
            id: self.id,
            state: FormulasInjected { schema, rows },
        }
    }
}

impl SheetBuilder<FormulasInjected> {
    pub fn finalize(self) -> SheetPlan {
        SheetPlan {
            id: self.id,
            schema: self.state.schema,
            rows: self.state.rows,
        }
    }
}
