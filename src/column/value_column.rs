//! [`ValueColumn`]: the raw, mutable column encoding — a contiguous sequence
//! of `T`. Rows are appended until the producer stops; this is the only
//! column variant that supports `append`.

use crate::column::element::ColumnElement;
use crate::error::Result;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct ValueColumn<T> {
    values: Vec<T>,
}

impl<T: ColumnElement> ValueColumn<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// The fast path operators use: direct, typed access to the raw values,
    /// no dispatch through `Value`.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn append_value(&mut self, value: &Value) -> Result<()> {
        self.values.push(T::try_from_value(value)?);
        Ok(())
    }

    pub fn append_raw(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn element_at(&self, i: usize) -> Value {
        self.values[i].to_value()
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }
}
