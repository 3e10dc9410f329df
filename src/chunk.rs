//! [`Chunk`]: a horizontal slice across all columns of a table. Every column
//! in a chunk reports the same `size()`; a chunk with zero columns has size
//! 0. Grounded directly on `original_source/src/lib/storage/chunk.cpp`.

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Chunk {
    columns: Vec<Column>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Column) {
        debug_assert!(
            self.columns.is_empty() || column.size() == self.size(),
            "column appended to a chunk must start at the chunk's current size"
        );
        self.columns.push(column);
    }

    pub fn append(&mut self, row: &[Value]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::OutOfBounds {
                index: row.len(),
                len: self.columns.len(),
            });
        }

        for (column, value) in self.columns.iter_mut().zip(row) {
            column.append(value)?;
        }

        Ok(())
    }

    pub fn column(&self, i: usize) -> &Column {
        &self.columns[i]
    }

    pub fn column_mut(&mut self, i: usize) -> &mut Column {
        &mut self.columns[i]
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn size(&self) -> usize {
        self.columns.first().map(Column::size).unwrap_or(0)
    }

    /// Replaces every `ValueColumn` in this chunk with a `DictionaryColumn`
    /// of the same element type, preserving row order and values.
    pub fn compress(&mut self) -> Result<()> {
        for column in &mut self.columns {
            *column = column.compress()?;
        }
        Ok(())
    }
}
