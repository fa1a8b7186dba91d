//! Parent → child join declarations.
//!
//! A [`Relation`] says: for a row of the parent table, embed the child rows
//! whose cells equal the parent row's cells on every [`JoinKey`], either as a
//! single nested document or as an array of documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::table::{ColumnRef, Row, Table, TableId};

/// How matched child rows are embedded in the parent document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// At most one child document, `null` when nothing matches
    Single,
    /// All matching child documents, `[]` when nothing matches
    Array,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Single => f.write_str("single"),
            Cardinality::Array => f.write_str("array"),
        }
    }
}

/// A (parent column, child column) equality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinKey {
    pub parent: ColumnRef,
    pub child: ColumnRef,
}

impl JoinKey {
    /// True when both cells are present, non-null and equal under
    /// [`crate::table::Value::key_eq`].
    ///
    /// Type mismatches (e.g. int vs. string) are a non-match, not an error.
    /// Two NaN float cells match.
    pub fn matches(&self, parent_row: &Row, child_row: &Row) -> bool {
        let (Some(left), Some(right)) = (
            parent_row.get(self.parent.ordinal()),
            child_row.get(self.child.ordinal()),
        ) else {
            return false;
        };

        !left.is_null() && !right.is_null() && left.key_eq(right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    parent: TableId,
    child: TableId,
    output_key: String,
    cardinality: Cardinality,
    join_keys: Vec<JoinKey>,
}

impl Relation {
    pub fn new(
        parent: TableId,
        child: TableId,
        output_key: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            parent,
            child,
            output_key: output_key.into(),
            cardinality,
            join_keys: Vec::new(),
        }
    }

    pub fn single(parent: TableId, child: TableId, output_key: impl Into<String>) -> Self {
        Self::new(parent, child, output_key, Cardinality::Single)
    }

    pub fn array(parent: TableId, child: TableId, output_key: impl Into<String>) -> Self {
        Self::new(parent, child, output_key, Cardinality::Array)
    }

    pub fn parent(&self) -> TableId {
        self.parent
    }

    pub fn child(&self) -> TableId {
        self.child
    }

    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn join_keys(&self) -> &[JoinKey] {
        &self.join_keys
    }

    /// Register a join column pair.
    ///
    /// The parent column must belong to the parent table and the child column
    /// to the child table, and the exact pair must not already be present.
    pub fn add_join_column(
        &mut self,
        parent: ColumnRef,
        child: ColumnRef,
    ) -> Result<(), ProfileError> {
        if parent.table() != self.parent {
            return Err(ProfileError::invalid_reference(format!(
                "parent join column #{} does not belong to the parent table of '{}'",
                parent.ordinal(),
                self.output_key
            )));
        }
        if child.table() != self.child {
            return Err(ProfileError::invalid_reference(format!(
                "child join column #{} does not belong to the child table of '{}'",
                child.ordinal(),
                self.output_key
            )));
        }

        let key = JoinKey { parent, child };
        if self.join_keys.contains(&key) {
            return Err(ProfileError::DuplicateJoinKey {
                parent: format!("#{}", parent.ordinal()),
                child: format!("#{}", child.ordinal()),
            });
        }

        self.join_keys.push(key);
        Ok(())
    }

    /// Builder-style [`Relation::add_join_column`].
    pub fn with_join(mut self, parent: ColumnRef, child: ColumnRef) -> Result<Self, ProfileError> {
        self.add_join_column(parent, child)?;
        Ok(self)
    }

    /// Remove a join column pair. Returns false when it was not registered.
    pub fn remove_join_column(&mut self, parent: ColumnRef, child: ColumnRef) -> bool {
        let before = self.join_keys.len();
        self.join_keys
            .retain(|k| !(k.parent == parent && k.child == child));
        self.join_keys.len() != before
    }

    /// True when `child_row` satisfies every join key. With no join keys,
    /// every child row qualifies.
    pub fn joins(&self, parent_row: &Row, child_row: &Row) -> bool {
        self.join_keys
            .iter()
            .all(|key| key.matches(parent_row, child_row))
    }

    /// Indices of the child rows embedded for `parent_row`, in table order.
    ///
    /// `Single` stops at the first qualifying row.
    pub fn matching_rows(&self, parent_row: &Row, child_table: &Table) -> Vec<usize> {
        let mut candidates = child_table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, child_row)| self.joins(parent_row, child_row))
            .map(|(index, _)| index);

        match self.cardinality {
            Cardinality::Single => candidates.next().into_iter().collect(),
            Cardinality::Array => candidates.collect(),
        }
    }
}
