//! Profile file handling.
//!
//! A profile file (`tabledoc.json` by default) names the participating tables,
//! the relations between them, and optionally the root table to resolve.
//! Table data is either inlined or read from a JSON table file whose path is
//! relative to the profile file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ProfileError;
use crate::profile::Profile;
use crate::relation::{Cardinality, Relation};
use crate::source::{ColumnDef, TableFile};
use crate::table::{Catalog, DataType, Table, TableError, TableId};

/// Default profile file name, looked up in the current directory.
pub const DEFAULT_PROFILE: &str = "tabledoc.json";

const EXAMPLE_PROFILE: &str = r#"{
  "root": "orders",
  "tables": [
    { "name": "orders", "path": "orders.json" },
    { "name": "items", "path": "items.json" }
  ],
  "relations": [
    {
      "parent": "orders",
      "child": "items",
      "key": "items",
      "cardinality": "array",
      "join": [{ "parent": "Id", "child": "OrderId" }]
    }
  ]
}"#;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile file not found: {path}\n\nCreate one, for example:\n{example}")]
    NotFound { path: String, example: &'static str },

    #[error("Failed to read '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Table '{name}' must set either 'path' or 'columns'")]
    MissingSource { name: String },

    #[error("Table '{name}' sets 'path' together with inline 'columns' or 'rows'")]
    ConflictingSource { name: String },

    #[error("Table '{name}' is declared more than once")]
    DuplicateTable { name: String },

    #[error("Unknown table '{name}'")]
    UnknownTable { name: String },

    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Row {row} of table '{table}': '{column}' is not a valid {expected} value")]
    InvalidCell {
        table: String,
        row: usize,
        column: String,
        expected: DataType,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Relation '{relation}': {source}")]
    Relation {
        relation: String,
        #[source]
        source: ProfileError,
    },
}

/// Top-level profile file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Table resolved when the command line does not name one
    #[serde(default)]
    pub root: Option<String>,
    pub tables: Vec<TableConfig>,
    #[serde(default)]
    pub relations: Vec<RelationConfig>,
    /// Directory that relative table paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    /// JSON table file, relative to the profile file
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Inline column declarations, used when `path` is absent
    #[serde(default)]
    pub columns: Option<Vec<ColumnDef>>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
    /// Unregistered tables can be resolved as a root but take no part in relations
    #[serde(default = "default_register")]
    pub register: bool,
}

fn default_register() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationConfig {
    pub parent: String,
    pub child: String,
    /// Output key in the parent document
    pub key: String,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub join: Vec<JoinConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinConfig {
    pub parent: String,
    pub child: String,
}

impl ProfileConfig {
    /// Load a profile file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
                example: EXAMPLE_PROFILE,
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_json(&content).map_err(|e| match e {
            ConfigError::ParseFailed { message, .. } => ConfigError::ParseFailed {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse a profile from a JSON string. Relative table paths resolve
    /// against the current directory.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load every table, register those marked `register`, and register
    /// every relation.
    pub fn build(&self) -> Result<Profile, ConfigError> {
        let mut catalog = Catalog::new();
        let mut registered = Vec::new();

        for table in &self.tables {
            if catalog.find(&table.name).is_some() {
                return Err(ConfigError::DuplicateTable {
                    name: table.name.clone(),
                });
            }
            let loaded = self.load_table(table)?;
            debug!(table = %table.name, rows = loaded.rows().len(), "loaded table");
            let id = catalog.add(loaded);
            if table.register {
                registered.push(id);
            }
        }

        let mut profile = Profile::with_catalog(catalog);
        for id in registered {
            profile.add_table(id);
        }

        for relation in &self.relations {
            let built = Self::build_relation(&profile, relation)?;
            profile
                .add_relation(built)
                .map_err(|source| ConfigError::Relation {
                    relation: relation.key.clone(),
                    source,
                })?;
        }

        Ok(profile)
    }

    fn load_table(&self, table: &TableConfig) -> Result<Table, ConfigError> {
        let file = match (&table.path, &table.columns) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingSource {
                    name: table.name.clone(),
                });
            }
            (Some(_), None) if !table.rows.is_empty() => {
                return Err(ConfigError::ConflictingSource {
                    name: table.name.clone(),
                });
            }
            (Some(path), None) => {
                let full = self.base_dir.join(path);
                let content = fs::read_to_string(&full).map_err(|e| ConfigError::ReadFailed {
                    path: full.display().to_string(),
                    message: e.to_string(),
                })?;
                serde_json::from_str::<TableFile>(&content).map_err(|e| {
                    ConfigError::ParseFailed {
                        path: full.display().to_string(),
                        message: e.to_string(),
                    }
                })?
            }
            (None, Some(columns)) => TableFile {
                columns: columns.clone(),
                rows: table.rows.clone(),
            },
            (None, None) => {
                return Err(ConfigError::MissingSource {
                    name: table.name.clone(),
                });
            }
        };
        file.into_table(&table.name)
    }

    fn build_relation(
        profile: &Profile,
        config: &RelationConfig,
    ) -> Result<Relation, ConfigError> {
        let catalog = profile.catalog();
        let find = |name: &str| -> Result<TableId, ConfigError> {
            catalog.find(name).ok_or_else(|| ConfigError::UnknownTable {
                name: name.to_string(),
            })
        };
        let parent = find(&config.parent)?;
        let child = find(&config.child)?;

        let mut relation = Relation::new(parent, child, config.key.clone(), config.cardinality);
        for join in &config.join {
            let parent_col = catalog.column(parent, &join.parent).ok_or_else(|| {
                ConfigError::UnknownColumn {
                    table: config.parent.clone(),
                    column: join.parent.clone(),
                }
            })?;
            let child_col = catalog.column(child, &join.child).ok_or_else(|| {
                ConfigError::UnknownColumn {
                    table: config.child.clone(),
                    column: join.child.clone(),
                }
            })?;
            relation
                .add_join_column(parent_col, child_col)
                .map_err(|source| ConfigError::Relation {
                    relation: config.key.clone(),
                    source,
                })?;
        }
        Ok(relation)
    }
}
