//! tabledoc library - relational tables to nested documents
//!
//! Tables are registered in a [`profile::Profile`] together with parent → child
//! [`relation::Relation`]s. Resolving a root table yields one
//! [`document::Document`] per row, with related rows embedded recursively.
//! The `config`, `commands` and `output` modules provide the profile-file and
//! command-line front end.

pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod output;
pub mod profile;
pub mod relation;
pub mod source;
pub mod table;

pub use document::{DocValue, Document};
pub use error::ProfileError;
pub use profile::{Profile, RelationId};
pub use relation::{Cardinality, JoinKey, Relation};
pub use table::{Catalog, DataType, Table, TableId, Value};

#[macro_use]
pub mod test_macros;
