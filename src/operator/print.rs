//! [`Print`]: a one-input collaborator that renders a table as aligned text
//! and returns it unchanged. Grounded on `bin/cli.rs`'s `run_query` pretty
//! printer — same column-width sizing rule (`max(min_width, name length,
//! capped cell length)`), same `|`-delimited rows — reshaped into the
//! `=== Columns` / `=== Chunk <id> ===` layout spec.md §6 specifies instead
//! of the teacher's box-drawing borders.

use std::cell::RefCell;
use std::io::Write;
use std::sync::Arc;

use crate::error::Result;
use crate::operator::{Memo, Operator};
use crate::table::Table;

const MIN_WIDTH: usize = 8;
const MAX_WIDTH: usize = 20;

pub struct Print<W> {
    input: Box<dyn Operator>,
    sink: RefCell<W>,
    memo: Memo,
}

impl<W: Write> Print<W> {
    pub fn new(input: Box<dyn Operator>, sink: W) -> Self {
        Self {
            input,
            sink: RefCell::new(sink),
            memo: Memo::new(),
        }
    }

    fn column_widths(table: &Table) -> Vec<usize> {
        let schema = table.schema();
        let mut widths: Vec<usize> = schema
            .iter()
            .map(|column_def| column_def.name.len().max(MIN_WIDTH))
            .collect();

        for chunk in table.chunks() {
            for (col_id, width) in widths.iter_mut().enumerate() {
                let column = chunk.column(col_id);
                for i in 0..chunk.size() {
                    let cell_len = column.element_at(i).to_string().len().min(MAX_WIDTH);
                    *width = (*width).max(cell_len);
                }
            }
        }

        widths
    }

    /// Writing to the sink is treated as infallible: `Print` is used with
    /// in-memory sinks (`Vec<u8>`, `String`) in this engine, and a sink
    /// write failure is not part of spec.md §7's closed error taxonomy.
    fn format(&self, table: &Table) {
        let schema = table.schema();
        let widths = Self::column_widths(table);
        let mut sink = self.sink.borrow_mut();

        writeln!(sink, "=== Columns").expect("write to sink failed");

        for (i, column_def) in schema.iter().enumerate() {
            let sep = if i + 1 == schema.len() { "\n" } else { "|" };
            write!(sink, "{:<width$}{sep}", column_def.name, width = widths[i])
                .expect("write to sink failed");
        }

        for (i, column_def) in schema.iter().enumerate() {
            let sep = if i + 1 == schema.len() { "\n" } else { "|" };
            write!(
                sink,
                "{:<width$}{sep}",
                column_def.ty.type_name(),
                width = widths[i]
            )
            .expect("write to sink failed");
        }

        for (chunk_id, chunk) in table.chunks().iter().enumerate() {
            writeln!(sink, "=== Chunk {chunk_id} ===").expect("write to sink failed");
            if chunk.size() == 0 {
                writeln!(sink, "Empty chunk.").expect("write to sink failed");
                continue;
            }
            for row in 0..chunk.size() {
                for col_id in 0..schema.len() {
                    let sep = if col_id + 1 == schema.len() { "\n" } else { "|" };
                    let cell = chunk.column(col_id).element_at(row).to_string();
                    write!(sink, "{:<width$}{sep}", cell, width = widths[col_id])
                        .expect("write to sink failed");
                }
            }
        }
    }
}

impl<W: Write> Operator for Print<W> {
    fn execute(&self) -> Result<Arc<Table>> {
        self.memo.execute(|| {
            let table = self.input.execute()?;
            self.format(&table);
            Ok(table)
        })
    }

    fn output(&self) -> Result<Arc<Table>> {
        self.memo.output()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::operator::get_table::GetTable;
    use crate::registry::Registry;
    use crate::value::Value;

    fn sample_table() -> Table {
        let mut table = Table::new(0);
        table.add_column("a", "int").unwrap();
        table.append(&[Value::Int32(1)]).unwrap();
        table.append(&[Value::Int32(2)]).unwrap();
        table
    }

    #[test]
    fn formats_header_and_rows() {
        let _guard = crate::registry::lock_for_test();
        Registry::reset();
        Registry::add("t", sample_table()).unwrap();

        let get = Box::new(GetTable::new("t"));
        let print = Print::new(get, Vec::<u8>::new());
        print.execute().unwrap();

        let output = String::from_utf8(print.sink.into_inner()).unwrap();
        assert!(output.starts_with("=== Columns\n"));
        assert!(output.contains("a       \n"));
        assert!(output.contains("int     \n"));
        assert!(output.contains("=== Chunk 0 ===\n"));
        assert!(output.contains("1       \n"));
        assert!(output.contains("2       \n"));

        Registry::reset();
    }

    #[test]
    fn empty_chunk_prints_marker() {
        let _guard = crate::registry::lock_for_test();
        Registry::reset();
        let mut table = Table::new(0);
        table.add_column("a", "int").unwrap();
        Registry::add("empty", table).unwrap();

        let get = Box::new(GetTable::new("empty"));
        let print = Print::new(get, Vec::<u8>::new());
        print.execute().unwrap();

        let output = String::from_utf8(print.sink.into_inner()).unwrap();
        assert!(output.contains("Empty chunk.\n"));

        Registry::reset();
    }
}
