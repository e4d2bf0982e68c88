//! Purpose: Delimited-text split/join between tables and CSV text.
//! Exports: `parse`, `render`.
//! Role: External collaborator of the codec core; the binary container is
//! the format contract, this module is plain text glue.
//! Invariants: Comma is the sole field separator, `\n` the sole row
//! separator; no quoting or escaping exists. Fields containing either
//! separator round-trip incorrectly, a documented format limitation.

use crate::core::table::Table;

/// Split text into a table. The whole input splits on `\n`, each line on
/// `,`; an empty input yields one row holding one empty field.
pub fn parse(text: &str) -> Table {
    let mut table = Table::new();
    for line in text.split('\n') {
        table.push_row(line.split(',').map(str::to_string).collect());
    }
    table
}

/// Join a table back into CSV text, with no trailing newline.
pub fn render(table: &Table) -> String {
    table
        .rows()
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{parse, render};

    #[test]
    fn parse_splits_rows_and_fields() {
        let table = parse("a,b\nc");
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0], vec!["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows()[1], vec!["c".to_string()]);
    }

    #[test]
    fn parse_and_render_round_trip() {
        let text = "a,b,c\nd\n,e,";
        assert_eq!(render(&parse(text)), text);
    }

    #[test]
    fn empty_input_is_one_empty_field() {
        let table = parse("");
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0], vec!["".to_string()]);
    }

    #[test]
    fn trailing_newline_becomes_an_empty_row() {
        let table = parse("a\n");
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1], vec!["".to_string()]);
    }

    #[test]
    fn render_adds_no_trailing_newline() {
        let table = parse("x,y");
        assert_eq!(render(&table), "x,y");
    }
}
