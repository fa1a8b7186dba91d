//! Output formatting for describe command results.

use super::execute::DescribeResult;
use crate::output::Outputable;

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Root: {}", self.root.as_deref().unwrap_or("(none)")));
        lines.push(String::new());

        lines.push(format!("Tables ({}):", self.tables.len()));
        for table in &self.tables {
            let flag = if table.registered { "" } else { " [unregistered]" };
            lines.push(format!("  {} ({} row(s)){}", table.name, table.rows, flag));
            for column in &table.columns {
                lines.push(format!("    {}: {}", column.name, column.data_type));
            }
        }

        lines.push(String::new());
        if self.relations.is_empty() {
            lines.push("No relations.".to_string());
        } else {
            lines.push(format!("Relations ({}):", self.relations.len()));
            for relation in &self.relations {
                lines.push(format!(
                    "  {} -> {} as {} ({})",
                    relation.parent, relation.child, relation.key, relation.cardinality
                ));
                if relation.zero_key {
                    lines.push("    (no join keys, every child row matches)".to_string());
                }
                for pair in &relation.join {
                    lines.push(format!("    {} = {}", pair.parent, pair.child));
                }
            }
        }

        lines.join("\n")
    }
}
