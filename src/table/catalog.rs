//! Arena of tables addressed by stable handles.
//!
//! Every catalog gets a process-unique id that is stamped into the handles it
//! issues, so a handle is only ever honoured by the catalog that minted it.

use std::sync::atomic::{AtomicU32, Ordering};

use super::{Row, Table};

static NEXT_CATALOG: AtomicU32 = AtomicU32::new(0);

/// Handle to a table stored in a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId {
    catalog: u32,
    index: usize,
}

/// Handle to a column of a catalog table.
///
/// Only minted by the catalog, so the ordinal always exists in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: TableId,
    ordinal: usize,
}

impl ColumnRef {
    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Handle to a row of a catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef {
    pub table: TableId,
    pub index: usize,
}

/// Append-only table storage. Ids are never reused.
#[derive(Debug)]
pub struct Catalog {
    id: u32,
    tables: Vec<Table>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            id: NEXT_CATALOG.fetch_add(1, Ordering::Relaxed),
            tables: Vec::new(),
        }
    }

    fn id_at(&self, index: usize) -> TableId {
        TableId {
            catalog: self.id,
            index,
        }
    }

    pub fn add(&mut self, table: Table) -> TableId {
        self.tables.push(table);
        self.id_at(self.tables.len() - 1)
    }

    /// The table behind `id`. `None` for handles minted by another catalog.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        if id.catalog != self.id {
            return None;
        }
        self.tables.get(id.index)
    }

    pub fn contains(&self, id: TableId) -> bool {
        self.table(id).is_some()
    }

    /// First table with the given name.
    pub fn find(&self, name: &str) -> Option<TableId> {
        self.tables
            .iter()
            .position(|t| t.name() == name)
            .map(|index| self.id_at(index))
    }

    /// First column of `table` with the given name.
    pub fn column(&self, table: TableId, name: &str) -> Option<ColumnRef> {
        let ordinal = self.table(table)?.ordinal_of(name)?;
        Some(ColumnRef { table, ordinal })
    }

    pub fn column_at(&self, table: TableId, ordinal: usize) -> Option<ColumnRef> {
        let t = self.table(table)?;
        (ordinal < t.columns().len()).then_some(ColumnRef { table, ordinal })
    }

    /// Display name of a column as `table.column`.
    pub fn column_label(&self, column: ColumnRef) -> String {
        let table = self.table(column.table);
        match table.and_then(|t| t.columns().get(column.ordinal).map(|c| (t, c))) {
            Some((t, c)) => format!("{}.{}", t.name(), c.name),
            None => format!("#{}.{}", column.table.index, column.ordinal),
        }
    }

    pub fn table_name(&self, id: TableId) -> String {
        self.table(id)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| format!("#{}", id.index))
    }

    pub fn row(&self, row: RowRef) -> Option<&Row> {
        self.table(row.table)?.rows().get(row.index)
    }

    /// Handles for every row of `table`, in table order.
    pub fn row_refs(&self, table: TableId) -> impl Iterator<Item = RowRef> + '_ {
        let count = self.table(table).map_or(0, |t| t.rows().len());
        (0..count).map(move |index| RowRef { table, index })
    }

    pub fn iter(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables
            .iter()
            .enumerate()
            .map(|(i, t)| (self.id_at(i), t))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
