//! Outline rendering for convert results.

use super::execute::ConvertResult;
use crate::document::{DocValue, Document};
use crate::output::Outputable;

impl Outputable for ConvertResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Root: {}", self.root));
        lines.push(String::new());

        if self.documents.is_empty() {
            lines.push("No documents.".to_string());
        } else {
            lines.push(format!("Found {} document(s):", self.documents.len()));
            for (i, doc) in self.documents.iter().enumerate() {
                lines.push(format!("  [{}]", i));
                outline(doc, 2, &mut lines);
            }
        }

        lines.join("\n")
    }
}

fn outline(doc: &Document, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (key, value) in doc.iter() {
        match value {
            DocValue::Null => lines.push(format!("{}{}: null", indent, key)),
            DocValue::Scalar(v) => lines.push(format!("{}{}: {}", indent, key, v)),
            DocValue::Object(child) => {
                lines.push(format!("{}{}:", indent, key));
                outline(child, depth + 1, lines);
            }
            DocValue::Array(children) if children.is_empty() => {
                lines.push(format!("{}{}: []", indent, key));
            }
            DocValue::Array(children) => {
                lines.push(format!("{}{}: [{}]", indent, key, children.len()));
                for (i, child) in children.iter().enumerate() {
                    lines.push(format!("{}  [{}]", indent, i));
                    outline(child, depth + 2, lines);
                }
            }
        }
    }
}
