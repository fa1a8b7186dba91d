//! Output formatting tests for describe command.

#[cfg(test)]
mod tests {
    use super::super::execute::{
        ColumnSummary, DescribeResult, JoinPair, RelationSummary, TableSummary,
    };
    use crate::relation::Cardinality;
    use crate::table::DataType;
    use rstest::{fixture, rstest};
    use serde_json::json;

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const EMPTY_TABLE: &str = "\
Root: (none)

Tables (0):

No relations.";

    const SHOP_TABLE: &str = "\
Root: orders

Tables (2):
  orders (2 row(s))
    Id: int
  items (3 row(s)) [unregistered]
    OrderId: int
    Sku: string

Relations (2):
  orders -> items as items (array)
    orders.Id = items.OrderId
  orders -> items as everything (single)
    (no join keys, every child row matches)";

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn column(name: &str, data_type: DataType) -> ColumnSummary {
        ColumnSummary {
            name: name.to_string(),
            data_type,
        }
    }

    #[fixture]
    fn empty_result() -> DescribeResult {
        DescribeResult::default()
    }

    #[fixture]
    fn shop_result() -> DescribeResult {
        DescribeResult {
            root: Some("orders".to_string()),
            tables: vec![
                TableSummary {
                    name: "orders".to_string(),
                    registered: true,
                    rows: 2,
                    columns: vec![column("Id", DataType::Int)],
                },
                TableSummary {
                    name: "items".to_string(),
                    registered: false,
                    rows: 3,
                    columns: vec![
                        column("OrderId", DataType::Int),
                        column("Sku", DataType::String),
                    ],
                },
            ],
            relations: vec![
                RelationSummary {
                    parent: "orders".to_string(),
                    child: "items".to_string(),
                    key: "items".to_string(),
                    cardinality: Cardinality::Array,
                    join: vec![JoinPair {
                        parent: "orders.Id".to_string(),
                        child: "items.OrderId".to_string(),
                    }],
                    zero_key: false,
                },
                RelationSummary {
                    parent: "orders".to_string(),
                    child: "items".to_string(),
                    key: "everything".to_string(),
                    cardinality: Cardinality::Single,
                    join: vec![],
                    zero_key: true,
                },
            ],
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: DescribeResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_shop,
        fixture: shop_result,
        fixture_type: DescribeResult,
        expected: SHOP_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: shop_result,
        fixture_type: DescribeResult,
        assertions: {
            "/root": json!("orders"),
            "/tables/1/registered": json!(false),
            "/tables/1/columns/1/type": json!("string"),
            "/relations/0/cardinality": json!("array"),
            "/relations/0/join/0/child": json!("items.OrderId"),
            "/relations/1/zero_key": json!(true),
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_empty,
        fixture: empty_result,
        fixture_type: DescribeResult,
        assertions: {
            "/root": json!(null),
            "/tables": json!([]),
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: shop_result,
        fixture_type: DescribeResult,
        contains: ["orders", "OrderId", "everything"],
    }
}
