// src/table.rs

/// One record, stored positionally and aligned with its table's `columns`.
/// `None` is an absent value (empty field, or a column the source file lacked).
pub type Row = Vec<Option<String>>;

/// In-memory tabular dataset: an ordered schema plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, unique within the table.
    pub columns: Vec<String>,
    /// Every row has exactly `columns.len()` cells.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals; empty strings become absent values.
    /// Rows shorter than the schema are padded.
    pub fn from_rows<C, R>(columns: C, rows: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: AsRef<str>,
    {
        let mut table = Self::new(columns.into_iter().map(Into::into).collect());
        for row in rows {
            let mut cells: Row = row
                .into_iter()
                .map(|v| {
                    let v = v.as_ref();
                    (!v.is_empty()).then(|| v.to_string())
                })
                .collect();
            cells.resize(table.columns.len(), None);
            table.rows.push(cells);
        }
        table
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of column `name` in row `row`, if both exist and the value is present.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// All values of the column at `position`, in row order.
    pub fn column_values(&self, position: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(position).and_then(Option::as_deref))
    }
}
