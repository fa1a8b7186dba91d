use std::error::Error;

use serde::Serialize;

use super::DescribeCmd;
use crate::commands::Execute;
use crate::config::ProfileConfig;
use crate::profile::Profile;
use crate::relation::{Cardinality, Relation};
use crate::table::DataType;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub registered: bool,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

/// One join column pair, as `table.column` labels.
#[derive(Debug, Clone, Serialize)]
pub struct JoinPair {
    pub parent: String,
    pub child: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationSummary {
    pub parent: String,
    pub child: String,
    pub key: String,
    pub cardinality: Cardinality,
    pub join: Vec<JoinPair>,
    /// No join keys: every child row matches every parent row
    pub zero_key: bool,
}

/// Result of the describe command execution
#[derive(Debug, Default, Serialize)]
pub struct DescribeResult {
    pub root: Option<String>,
    pub tables: Vec<TableSummary>,
    pub relations: Vec<RelationSummary>,
}

impl Execute for DescribeCmd {
    type Output = DescribeResult;

    fn execute(self, config: &ProfileConfig) -> Result<Self::Output, Box<dyn Error>> {
        let profile = config.build()?;
        let catalog = profile.catalog();

        let tables = catalog
            .iter()
            .map(|(id, table)| TableSummary {
                name: table.name().to_string(),
                registered: profile.contains_table(id),
                rows: table.rows().len(),
                columns: table
                    .columns()
                    .iter()
                    .map(|c| ColumnSummary {
                        name: c.name.clone(),
                        data_type: c.data_type,
                    })
                    .collect(),
            })
            .collect();

        let relations = profile
            .relations()
            .map(|(_, relation)| summarize(&profile, relation))
            .collect();

        Ok(DescribeResult {
            root: config.root.clone(),
            tables,
            relations,
        })
    }
}

fn summarize(profile: &Profile, relation: &Relation) -> RelationSummary {
    let catalog = profile.catalog();
    RelationSummary {
        parent: catalog.table_name(relation.parent()),
        child: catalog.table_name(relation.child()),
        key: relation.output_key().to_string(),
        cardinality: relation.cardinality(),
        join: relation
            .join_keys()
            .iter()
            .map(|k| JoinPair {
                parent: catalog.column_label(k.parent),
                child: catalog.column_label(k.child),
            })
            .collect(),
        zero_key: relation.join_keys().is_empty(),
    }
}
