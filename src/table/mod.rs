//! In-memory tables: named, typed columns and an ordered sequence of rows.
//!
//! Tables are plain data. Identity is assigned when a table is added to a
//! [`Catalog`], which hands back a [`TableId`]; two tables with identical
//! contents are still different tables.

mod catalog;
mod value;

pub use catalog::{Catalog, ColumnRef, RowRef, TableId};
pub use value::{DataType, Value};

use thiserror::Error;

/// Errors raised while building a table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Row for table '{table}' has {found} values, expected {expected}")]
    ArityMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' of table '{table}' is declared {expected} but got {found} value")]
    TypeMismatch {
        table: String,
        column: String,
        expected: DataType,
        found: &'static str,
    },

    #[error("Cannot add column '{column}' to table '{table}' after rows were inserted")]
    HasRows { table: String, column: String },
}

/// A named, typed column. Its ordinal is its position in the owning table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

/// One record of a table, one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Value at the given column ordinal, `None` when out of range.
    pub fn get(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Builder-style column declaration for a table that has no rows yet.
    pub fn with_column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data_type,
        });
        self
    }

    /// Append a column. Duplicate names are allowed.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
    ) -> Result<usize, TableError> {
        let name = name.into();
        if !self.rows.is_empty() {
            return Err(TableError::HasRows {
                table: self.name.clone(),
                column: name,
            });
        }
        self.columns.push(Column { name, data_type });
        Ok(self.columns.len() - 1)
    }

    /// Append a row, checking arity and declared column types.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<(), TableError> {
        if values.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                found: values.len(),
            });
        }

        let mut checked = Vec::with_capacity(values.len());
        for (column, value) in self.columns.iter().zip(values) {
            if !column.data_type.accepts(&value) {
                return Err(TableError::TypeMismatch {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    expected: column.data_type,
                    found: value.type_name(),
                });
            }
            checked.push(value.coerce_to(column.data_type));
        }

        self.rows.push(Row { values: checked });
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Ordinal of the first column with the given name.
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let ordinal = self.ordinal_of(column)?;
        self.rows.get(row)?.get(ordinal)
    }
}
