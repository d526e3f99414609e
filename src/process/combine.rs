use std::collections::HashMap;
use tracing::debug;

use super::Progress;
use crate::error::{PipelineError, Result};
use crate::table::{Row, Table};

/// Union `tables` into one. The schema is every column name in first-seen order;
/// rows are concatenated in input order, with absent values for columns a source lacked.
pub fn combine(tables: Vec<Table>, on_progress: &mut dyn FnMut(Progress)) -> Result<Table> {
    if tables.is_empty() {
        return Err(PipelineError::NoInput);
    }
    on_progress(Progress::Combining);

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for name in tables.iter().flat_map(|t| &t.columns) {
        if !index.contains_key(name) {
            index.insert(name.clone(), columns.len());
            columns.push(name.clone());
        }
    }

    let width = columns.len();
    let total: usize = tables.iter().map(Table::num_rows).sum();
    let mut combined = Table {
        columns,
        rows: Vec::with_capacity(total),
    };

    for table in tables {
        let targets: Vec<usize> = table.columns.iter().map(|c| index[c]).collect();
        if targets.iter().copied().eq(0..width) {
            combined.rows.extend(table.rows.into_iter().map(|mut row| {
                row.resize(width, None);
                row
            }));
            continue;
        }
        // cells past the source schema have no column to land in
        for row in table.rows {
            let mut cells: Row = vec![None; width];
            for (cell, &dst) in row.into_iter().zip(&targets) {
                cells[dst] = cell;
            }
            combined.rows.push(cells);
        }
    }

    debug!(
        rows = combined.num_rows(),
        columns = combined.num_columns(),
        "combined"
    );
    on_progress(Progress::Combined {
        rows: combined.num_rows(),
    });
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        let err = combine(Vec::new(), &mut |_| {}).unwrap_err();
        assert!(matches!(err, PipelineError::NoInput));
    }

    #[test]
    fn same_schema_concatenates_in_order() {
        let a = Table::from_rows(["id", "email"], [["1", "a@x"], ["2", "b@x"]]);
        let b = Table::from_rows(["id", "email"], [["3", "c@x"]]);
        let mut events = Vec::new();
        let t = combine(vec![a, b], &mut |p| events.push(p)).unwrap();
        assert_eq!(t.num_rows(), 3);
        let ids: Vec<_> = t.column_values(0).collect();
        assert_eq!(ids, vec![Some("1"), Some("2"), Some("3")]);
        assert_eq!(events.last(), Some(&Progress::Combined { rows: 3 }));
    }

    #[test]
    fn schemas_union_by_name_first_seen() {
        let a = Table::from_rows(["id", "email"], [["1", "a@x"]]);
        let b = Table::from_rows(["email", "phone", "Id"], [["b@x", "555", "2"]]);
        let t = combine(vec![a, b], &mut |_| {}).unwrap();
        assert_eq!(t.columns, vec!["id", "email", "phone", "Id"]);
        assert_eq!(t.rows[0], vec![Some("1".into()), Some("a@x".into()), None, None]);
        assert_eq!(
            t.rows[1],
            vec![None, Some("b@x".into()), Some("555".into()), Some("2".into())]
        );
    }

    #[test]
    fn rows_wider_or_narrower_than_schema_are_fitted() {
        let a = Table {
            columns: vec!["id".into(), "email".into()],
            rows: vec![vec![Some("1".into())]],
        };
        let b = Table {
            columns: vec!["email".into()],
            rows: vec![vec![Some("b@x".into()), Some("extra".into())]],
        };
        let t = combine(vec![a, b], &mut |_| {}).unwrap();
        assert_eq!(t.rows[0], vec![Some("1".into()), None]);
        assert_eq!(t.rows[1], vec![None, Some("b@x".into())]);
    }

    #[test]
    fn row_count_is_sum_of_inputs() {
        let tables: Vec<Table> = (1..=4)
            .map(|n| Table::from_rows(["a", "b"], (0..n).map(|i| [i.to_string(), "x".into()])))
            .collect();
        let t = combine(tables, &mut |_| {}).unwrap();
        assert_eq!(t.num_rows(), 1 + 2 + 3 + 4);
    }
}
