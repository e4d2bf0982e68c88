// In-memory table model: ordered rows of opaque text fields.
// Rows may have differing lengths; nothing pads or truncates them.

pub type Row = Vec<String>;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Row count, the envelope's `total_lines`.
    pub fn total_lines(&self) -> u64 {
        self.rows.len() as u64
    }

    /// Sum of row lengths, the envelope's `total_fields`.
    pub fn total_fields(&self) -> u64 {
        self.rows.iter().map(|row| row.len() as u64).sum()
    }

    /// Longest row length, the envelope's `max_columns`. Zero when empty.
    pub fn max_columns(&self) -> u64 {
        self.rows.iter().map(|row| row.len() as u64).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn empty_table_counts() {
        let table = Table::new();
        assert_eq!(table.total_lines(), 0);
        assert_eq!(table.total_fields(), 0);
        assert_eq!(table.max_columns(), 0);
    }

    #[test]
    fn ragged_table_counts() {
        let table = Table::from_rows(vec![row(&["a", "b", "c"]), row(&[]), row(&["d"])]);
        assert_eq!(table.total_lines(), 3);
        assert_eq!(table.total_fields(), 4);
        assert_eq!(table.max_columns(), 3);
    }
}
