//! The relation registry: participating tables, their relations, and the
//! entry point for turning a root table into documents.
//!
//! # Invariants
//!
//! - Every registered relation's parent and child are registered tables.
//!   Removing a table removes the relations touching it.
//! - The relation graph is acyclic. `add_relation` rejects any relation whose
//!   child can already reach its parent, which covers both the direct reverse
//!   (A→B then B→A) and longer cycles (A→B→C→A), so resolution always
//!   terminates.
//! - Table handles are scoped to the catalog that issued them. A handle from
//!   another catalog is unknown here even when its index is in range.
//! - Document building recurses once per relation level. Very deep chains
//!   (around a thousand nested levels on a 2 MB thread stack in debug builds)
//!   can exhaust the stack; run such profiles on a thread with a larger stack.
//!
//! Relations with no join keys are accepted and match every child row.

use tracing::{debug, warn};

use crate::document::{Document, DocumentBuilder};
use crate::error::ProfileError;
use crate::relation::Relation;
use crate::table::{Catalog, RowRef, Table, TableId};

/// Handle to a registered relation. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(u32);

#[derive(Debug, Default)]
pub struct Profile {
    catalog: Catalog,
    tables: Vec<TableId>,
    relations: Vec<(RelationId, Relation)>,
    next_relation: u32,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Store a table in the catalog and register it.
    pub fn insert_table(&mut self, table: Table) -> TableId {
        let id = self.catalog.add(table);
        self.add_table(id);
        id
    }

    /// Register a catalog table. Ignores ids that address no table and ids
    /// that are already registered; returns whether the table was added.
    pub fn add_table(&mut self, table: TableId) -> bool {
        if !self.catalog.contains(table) {
            debug!(?table, "ignoring unknown table handle");
            return false;
        }
        if self.tables.contains(&table) {
            return false;
        }
        debug!(table = %self.catalog.table_name(table), "registered table");
        self.tables.push(table);
        true
    }

    /// Unregister a table and every relation that touches it.
    pub fn remove_table(&mut self, table: TableId) -> bool {
        let Some(pos) = self.tables.iter().position(|t| *t == table) else {
            return false;
        };
        self.tables.remove(pos);

        let before = self.relations.len();
        self.relations
            .retain(|(_, r)| r.parent() != table && r.child() != table);
        debug!(
            table = %self.catalog.table_name(table),
            cascaded = before - self.relations.len(),
            "removed table"
        );
        true
    }

    pub fn contains_table(&self, table: TableId) -> bool {
        self.tables.contains(&table)
    }

    /// Registered tables in registration order.
    pub fn tables(&self) -> &[TableId] {
        &self.tables
    }

    /// Register a relation after checking membership and acyclicity.
    pub fn add_relation(&mut self, relation: Relation) -> Result<RelationId, ProfileError> {
        for (role, table) in [("parent", relation.parent()), ("child", relation.child())] {
            if !self.contains_table(table) {
                return Err(ProfileError::invalid_reference(format!(
                    "{} table '{}' of relation '{}' is not registered",
                    role,
                    self.catalog.table_name(table),
                    relation.output_key()
                )));
            }
        }

        if self.reaches(relation.child(), relation.parent()) {
            return Err(ProfileError::CycleDetected {
                parent: self.catalog.table_name(relation.parent()),
                child: self.catalog.table_name(relation.child()),
            });
        }

        if relation.join_keys().is_empty() {
            warn!(
                key = relation.output_key(),
                "relation has no join keys and will match every child row"
            );
        }

        let id = RelationId(self.next_relation);
        self.next_relation += 1;
        debug!(
            parent = %self.catalog.table_name(relation.parent()),
            child = %self.catalog.table_name(relation.child()),
            key = relation.output_key(),
            cardinality = %relation.cardinality(),
            "registered relation"
        );
        self.relations.push((id, relation));
        Ok(id)
    }

    /// Unregister a relation, handing it back. `None` when absent.
    pub fn remove_relation(&mut self, id: RelationId) -> Option<Relation> {
        let pos = self.relations.iter().position(|(rid, _)| *rid == id)?;
        Some(self.relations.remove(pos).1)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|(rid, _)| *rid == id)
            .map(|(_, r)| r)
    }

    /// Mutable access for editing join keys after registration. Endpoints
    /// cannot change, so the registry invariants still hold.
    pub fn relation_mut(&mut self, id: RelationId) -> Option<&mut Relation> {
        self.relations
            .iter_mut()
            .find(|(rid, _)| *rid == id)
            .map(|(_, r)| r)
    }

    /// Registered relations in registration order.
    pub fn relations(&self) -> impl Iterator<Item = (RelationId, &Relation)> {
        self.relations.iter().map(|(id, r)| (*id, r))
    }

    /// Relations whose parent is `table`, in registration order.
    pub fn relations_from(&self, table: TableId) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .map(|(_, r)| r)
            .filter(move |r| r.parent() == table)
    }

    /// Child rows joined to `row` by `relation`, shaped by its cardinality.
    pub fn relational_rows(
        &self,
        relation: &Relation,
        row: RowRef,
    ) -> Result<Vec<RowRef>, ProfileError> {
        if row.table != relation.parent() {
            return Err(ProfileError::invalid_reference(format!(
                "row does not belong to the parent table of relation '{}'",
                relation.output_key()
            )));
        }
        let parent_row = self
            .catalog
            .row(row)
            .ok_or(ProfileError::NullInput { what: "parent row" })?;
        let child_table = self
            .catalog
            .table(relation.child())
            .ok_or(ProfileError::NullInput { what: "child table" })?;

        Ok(relation
            .matching_rows(parent_row, child_table)
            .into_iter()
            .map(|index| RowRef {
                table: relation.child(),
                index,
            })
            .collect())
    }

    /// One document per row of `root`, in row order.
    ///
    /// The root does not need to be registered; an unregistered root has no
    /// outgoing relations. Read-only with respect to the profile.
    pub fn resolve(&self, root: TableId) -> Result<Vec<Document>, ProfileError> {
        if !self.catalog.contains(root) {
            return Err(ProfileError::NullInput { what: "root table" });
        }
        debug!(root = %self.catalog.table_name(root), "resolving documents");

        let builder = DocumentBuilder::new(self);
        self.catalog
            .row_refs(root)
            .map(|row| builder.build(row))
            .collect()
    }

    /// Resolve a root table by name.
    pub fn resolve_named(&self, root: Option<&str>) -> Result<Vec<Document>, ProfileError> {
        let name = root.ok_or(ProfileError::NullInput { what: "root table" })?;
        let id = self
            .catalog
            .find(name)
            .ok_or_else(|| ProfileError::invalid_reference(format!("unknown table '{}'", name)))?;
        self.resolve(id)
    }

    /// Whether `to` is reachable from `from` along registered relations.
    /// A table always reaches itself.
    fn reaches(&self, from: TableId, to: TableId) -> bool {
        let mut stack = vec![from];
        let mut seen = Vec::new();
        while let Some(table) = stack.pop() {
            if table == to {
                return true;
            }
            if seen.contains(&table) {
                continue;
            }
            seen.push(table);
            stack.extend(self.relations_from(table).map(Relation::child));
        }
        false
    }
}
