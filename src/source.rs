//! JSON table files.
//!
//! A table file declares its columns and lists rows positionally:
//!
//! ```json
//! {
//!   "columns": [{ "name": "Id", "type": "int" }, { "name": "Sku", "type": "string" }],
//!   "rows": [[1, "A"], [2, null]]
//! }
//! ```
//!
//! Cells are converted according to the declared column type.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::table::{DataType, Table, Value};

#[derive(Debug, Deserialize)]
pub struct TableFile {
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
}

impl TableFile {
    /// Build a named table from this file's contents.
    pub fn into_table(self, name: &str) -> Result<Table, ConfigError> {
        let mut table = Table::new(name);
        for column in &self.columns {
            table.add_column(column.name.clone(), column.data_type)?;
        }

        for (row_idx, row) in self.rows.into_iter().enumerate() {
            let mut values = Vec::with_capacity(row.len());
            for (ordinal, cell) in row.into_iter().enumerate() {
                let Some(column) = self.columns.get(ordinal) else {
                    // Arity is reported by push_row below
                    values.push(Value::Null);
                    continue;
                };
                let value = convert_cell(cell, column.data_type).ok_or_else(|| {
                    ConfigError::InvalidCell {
                        table: name.to_string(),
                        row: row_idx,
                        column: column.name.clone(),
                        expected: column.data_type,
                    }
                })?;
                values.push(value);
            }
            table.push_row(values)?;
        }

        Ok(table)
    }
}

/// Convert a JSON cell to a typed value. Strings holding numbers or booleans
/// are parsed for numeric/bool columns, scalars are stringified for string
/// columns. Arrays and objects are never accepted.
pub fn convert_cell(cell: serde_json::Value, data_type: DataType) -> Option<Value> {
    use serde_json::Value as Json;

    match (data_type, cell) {
        (_, Json::Null) => Some(Value::Null),
        (DataType::String, Json::String(s)) => Some(Value::Text(s)),
        (DataType::String, Json::Number(n)) => Some(Value::Text(n.to_string())),
        (DataType::String, Json::Bool(b)) => Some(Value::Text(b.to_string())),
        (DataType::Int, Json::Number(n)) => n.as_i64().map(Value::Int),
        (DataType::Int, Json::String(s)) => s.trim().parse().ok().map(Value::Int),
        (DataType::Float, Json::Number(n)) => n.as_f64().map(Value::Float),
        (DataType::Float, Json::String(s)) => s.trim().parse().ok().map(Value::Float),
        (DataType::Bool, Json::Bool(b)) => Some(Value::Bool(b)),
        (DataType::Bool, Json::String(s)) => s.trim().parse().ok().map(Value::Bool),
        _ => None,
    }
}
