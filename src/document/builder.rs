//! Recursive row → document conversion.

use tracing::trace;

use super::{DocValue, Document};
use crate::error::ProfileError;
use crate::profile::Profile;
use crate::relation::Cardinality;
use crate::table::{RowRef, Value};

/// Builds documents for rows of a profile's catalog.
///
/// For a row, the document holds the row's own cells keyed by column name,
/// followed by one entry per outgoing relation (registration order):
/// a nested document or `null` for `Single`, a list of documents for `Array`.
///
/// Key collisions are resolved by suffixing:
/// - a repeated column name becomes `<name>_col<ordinal>`
/// - a relation key already in use becomes `<key>_col<N+1>`, where `N` is the
///   number of entries at the time of insertion
pub struct DocumentBuilder<'p> {
    profile: &'p Profile,
}

impl<'p> DocumentBuilder<'p> {
    pub fn new(profile: &'p Profile) -> Self {
        Self { profile }
    }

    pub fn build(&self, row: RowRef) -> Result<Document, ProfileError> {
        let catalog = self.profile.catalog();
        let table = catalog
            .table(row.table)
            .ok_or(ProfileError::NullInput { what: "table" })?;
        let cells = catalog
            .row(row)
            .ok_or(ProfileError::NullInput { what: "row" })?;

        let mut doc = Document::new();
        for (ordinal, column) in table.columns().iter().enumerate() {
            let key = doc.unique_key(&column.name, ordinal);
            let value = cells.get(ordinal).cloned().unwrap_or(Value::Null);
            doc.insert(key, value);
        }

        for relation in self.profile.relations_from(row.table) {
            let matches = self.profile.relational_rows(relation, row)?;
            let value = match relation.cardinality() {
                Cardinality::Single => match matches.first() {
                    Some(child) => DocValue::Object(self.build(*child)?),
                    None => DocValue::Null,
                },
                Cardinality::Array => DocValue::Array(
                    matches
                        .iter()
                        .map(|child| self.build(*child))
                        .collect::<Result<_, _>>()?,
                ),
            };

            let key = doc.unique_key(relation.output_key(), doc.len() + 1);
            doc.insert(key, value);
        }

        trace!(table = table.name(), row = row.index, keys = doc.len(), "built document");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relation;
    use crate::table::{DataType, Table, TableId};
    use rstest::rstest;

    fn row(table: TableId, index: usize) -> RowRef {
        RowRef { table, index }
    }

    #[rstest]
    fn test_flat_row_reproduces_cells() {
        let mut people = Table::new("people")
            .with_column("Id", DataType::Int)
            .with_column("Name", DataType::String)
            .with_column("Score", DataType::Float)
            .with_column("Active", DataType::Bool);
        people
            .push_row(vec![Value::Int(1), "Ann".into(), Value::Null, Value::Bool(true)])
            .unwrap();

        let mut profile = Profile::new();
        let id = profile.insert_table(people);
        let doc = DocumentBuilder::new(&profile).build(row(id, 0)).unwrap();

        let table = profile.catalog().table(id).unwrap();
        let flattened: Vec<(String, Value)> = doc
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_scalar().cloned().unwrap_or(Value::Null)))
            .collect();
        let expected: Vec<(String, Value)> = table
            .columns()
            .iter()
            .zip(table.rows()[0].values())
            .map(|(c, v)| (c.name.clone(), v.clone()))
            .collect();
        assert_eq!(flattened, expected);
        assert!(doc.get("Score").unwrap().is_null());
    }

    #[rstest]
    fn test_duplicate_column_names_get_ordinal_suffix() {
        let mut table = Table::new("t");
        table.add_column("X", DataType::Int).unwrap();
        table.add_column("Y", DataType::Int).unwrap();
        table.add_column("X", DataType::Int).unwrap();
        table
            .push_row(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
            .unwrap();

        let mut profile = Profile::new();
        let id = profile.insert_table(table);
        let doc = DocumentBuilder::new(&profile).build(row(id, 0)).unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["X", "Y", "X_col2"]);
        assert_eq!(doc.get("X_col2").and_then(DocValue::as_scalar), Some(&Value::Int(3)));
    }

    #[rstest]
    fn test_relation_key_collision_uses_entry_count() {
        let mut parent = Table::new("parent")
            .with_column("Id", DataType::Int)
            .with_column("child", DataType::String);
        parent.push_row(vec![Value::Int(1), "own".into()]).unwrap();
        let mut child = Table::new("child").with_column("ParentId", DataType::Int);
        child.push_row(vec![Value::Int(1)]).unwrap();

        let mut profile = Profile::new();
        let p = profile.insert_table(parent);
        let c = profile.insert_table(child);
        let join = |profile: &Profile| {
            (
                profile.catalog().column(p, "Id").unwrap(),
                profile.catalog().column(c, "ParentId").unwrap(),
            )
        };
        let (pk, fk) = join(&profile);
        profile
            .add_relation(Relation::single(p, c, "child").with_join(pk, fk).unwrap())
            .unwrap();
        profile
            .add_relation(Relation::array(p, c, "child").with_join(pk, fk).unwrap())
            .unwrap();

        let doc = DocumentBuilder::new(&profile).build(row(p, 0)).unwrap();
        // 2 columns when the first relation lands -> _col3, then 3 entries -> _col4
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            vec!["Id", "child", "child_col3", "child_col4"]
        );
        assert!(doc.get("child_col3").and_then(DocValue::as_object).is_some());
        assert_eq!(doc.get("child_col4").and_then(DocValue::as_array).map(<[_]>::len), Some(1));
    }

    #[rstest]
    fn test_single_without_match_embeds_null() {
        let mut orders = Table::new("orders").with_column("CustomerId", DataType::Int);
        orders.push_row(vec![Value::Int(5)]).unwrap();
        let customers = Table::new("customers").with_column("Id", DataType::Int);

        let mut profile = Profile::new();
        let o = profile.insert_table(orders);
        let c = profile.insert_table(customers);
        let relation = Relation::single(o, c, "customer")
            .with_join(
                profile.catalog().column(o, "CustomerId").unwrap(),
                profile.catalog().column(c, "Id").unwrap(),
            )
            .unwrap();
        profile.add_relation(relation).unwrap();

        let doc = DocumentBuilder::new(&profile).build(row(o, 0)).unwrap();
        assert!(doc.contains_key("customer"));
        assert!(doc.get("customer").unwrap().is_null());
    }

    #[rstest]
    fn test_nested_relations_recurse() {
        let mut sheet1 = Table::new("sheet1")
            .with_column("Code", DataType::String)
            .with_column("Name", DataType::String);
        sheet1.push_row(vec!["M1".into(), "Main".into()]).unwrap();

        let mut sheet2 = Table::new("sheet2")
            .with_column("MainCode", DataType::String)
            .with_column("Code", DataType::String);
        sheet2.push_row(vec!["M1".into(), "T1".into()]).unwrap();
        sheet2.push_row(vec!["M1".into(), "T2".into()]).unwrap();

        let mut sheet3 = Table::new("sheet3")
            .with_column("TitleCode", DataType::String)
            .with_column("Title", DataType::String);
        sheet3.push_row(vec!["T2".into(), "Second".into()]).unwrap();

        let mut profile = Profile::new();
        let s1 = profile.insert_table(sheet1);
        let s2 = profile.insert_table(sheet2);
        let s3 = profile.insert_table(sheet3);
        let catalog = profile.catalog();
        let join1 = Relation::array(s1, s2, "Join1")
            .with_join(
                catalog.column(s1, "Code").unwrap(),
                catalog.column(s2, "MainCode").unwrap(),
            )
            .unwrap();
        let join2 = Relation::single(s2, s3, "Join2")
            .with_join(
                catalog.column(s2, "Code").unwrap(),
                catalog.column(s3, "TitleCode").unwrap(),
            )
            .unwrap();
        profile.add_relation(join1).unwrap();
        profile.add_relation(join2).unwrap();

        let docs = profile.resolve(s1).unwrap();
        let json = serde_json::to_value(&docs).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "Code": "M1",
                "Name": "Main",
                "Join1": [
                    {"MainCode": "M1", "Code": "T1", "Join2": null},
                    {"MainCode": "M1", "Code": "T2", "Join2": {"TitleCode": "T2", "Title": "Second"}}
                ]
            }])
        );
    }

    #[rstest]
    fn test_relation_chain_nests_one_level_per_table() {
        const DEPTH: usize = 64;
        let mut profile = Profile::new();
        let ids: Vec<TableId> = (0..DEPTH)
            .map(|i| {
                let mut t = Table::new(format!("t{}", i)).with_column("K", DataType::Int);
                t.push_row(vec![Value::Int(1)]).unwrap();
                profile.insert_table(t)
            })
            .collect();
        for pair in ids.windows(2) {
            let catalog = profile.catalog();
            let relation = Relation::single(pair[0], pair[1], "next")
                .with_join(
                    catalog.column(pair[0], "K").unwrap(),
                    catalog.column(pair[1], "K").unwrap(),
                )
                .unwrap();
            profile.add_relation(relation).unwrap();
        }

        let doc = DocumentBuilder::new(&profile).build(row(ids[0], 0)).unwrap();
        let mut depth = 1;
        let mut current = &doc;
        while let Some(next) = current.get("next").and_then(DocValue::as_object) {
            current = next;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert!(!current.contains_key("next"));
    }
}
