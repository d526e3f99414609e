use tracing::debug;

use super::Progress;
use crate::table::Table;

/// Remove the columns at `positions` (by current position, not name).
/// If the table is too narrow to hold every position it is returned unchanged
/// and a warning is emitted. Not idempotent: each call removes more columns.
pub fn prune(
    mut table: Table,
    positions: &[usize],
    on_progress: &mut dyn FnMut(Progress),
) -> Table {
    on_progress(Progress::Pruning);

    let mut targets = positions.to_vec();
    targets.sort_unstable();
    targets.dedup();

    let required = targets.last().map_or(0, |p| p + 1);
    if table.num_columns() < required {
        debug!(
            columns = table.num_columns(),
            required, "too few columns to prune"
        );
        on_progress(Progress::PruneSkipped {
            columns: table.num_columns(),
            required,
        });
        return table;
    }

    let keep: Vec<bool> = (0..table.num_columns())
        .map(|i| targets.binary_search(&i).is_err())
        .collect();
    let removed: Vec<String> = targets.iter().map(|&i| table.columns[i].clone()).collect();

    table.columns = retain_by(std::mem::take(&mut table.columns), &keep);
    for row in table.rows.iter_mut() {
        *row = retain_by(std::mem::take(row), &keep);
    }

    debug!(removed = ?removed, remaining = table.num_columns(), "pruned");
    on_progress(Progress::Pruned { columns: removed });
    table
}

fn retain_by<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_PRUNED_COLUMNS;

    fn wide() -> Table {
        Table::from_rows(
            ["a", "b", "c", "d", "email", "x"],
            [["1", "2", "3", "4", "e@x", "6"]],
        )
    }

    #[test]
    fn drops_leading_three() {
        let mut events = Vec::new();
        let t = prune(wide(), &DEFAULT_PRUNED_COLUMNS, &mut |p| events.push(p));
        assert_eq!(t.columns, vec!["d", "email", "x"]);
        assert_eq!(
            t.rows[0],
            vec![Some("4".into()), Some("e@x".into()), Some("6".into())]
        );
        assert_eq!(
            events.last(),
            Some(&Progress::Pruned {
                columns: vec!["a".into(), "b".into(), "c".into()]
            })
        );
    }

    #[test]
    fn exactly_three_columns_leaves_none() {
        let t = Table::from_rows(["a", "b", "c"], [["1", "2", "3"]]);
        let t = prune(t, &DEFAULT_PRUNED_COLUMNS, &mut |_| {});
        assert!(t.columns.is_empty());
        assert_eq!(t.rows, vec![Vec::<Option<String>>::new()]);
    }

    #[test]
    fn narrow_table_passes_through_with_warning() {
        let t = Table::from_rows(["a", "b"], [["1", "2"]]);
        let mut events = Vec::new();
        let out = prune(t.clone(), &DEFAULT_PRUNED_COLUMNS, &mut |p| events.push(p));
        assert_eq!(out, t);
        let last = events.last().unwrap();
        assert!(last.is_warning());
        assert_eq!(
            last,
            &Progress::PruneSkipped {
                columns: 2,
                required: 3
            }
        );
    }

    #[test]
    fn pruning_twice_removes_three_more() {
        let once = prune(wide(), &DEFAULT_PRUNED_COLUMNS, &mut |_| {});
        let twice = prune(once, &DEFAULT_PRUNED_COLUMNS, &mut |_| {});
        assert!(twice.columns.is_empty());
    }

    #[test]
    fn arbitrary_positions() {
        let t = prune(wide(), &[5, 1, 1], &mut |_| {});
        assert_eq!(t.columns, vec!["a", "c", "d", "email"]);
    }
}
