//! [`ColumnElement`]: the per-type bridge between a raw Rust value and the
//! engine's type-tagged [`Value`]/[`ColumnType`], plus an [`Ord`] sort key so
//! dictionary columns can sort and binary-search any of the four supported
//! types — including the floats, which aren't `Ord` on their own.

use ordered_float::OrderedFloat;

use crate::column::{DictionaryColumn, DictionaryColumnData, ValueColumn, ValueColumnData};
use crate::error::Result;
use crate::value::{ColumnType, Value};

/// One of the engine's four closed element types. Implementations exist only
/// for `i32`, `f32`, `f64`, `String` — the dispatch `match` in
/// [`crate::column`] and [`crate::operator::table_scan`] are the only places
/// that enumerate them.
pub trait ColumnElement: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// A total order over the type, used to sort and binary-search a
    /// dictionary. Plain `f32`/`f64` have no such order (NaN), so floats use
    /// `ordered_float::OrderedFloat`.
    type Key: Ord + std::hash::Hash + Clone;

    const COLUMN_TYPE: ColumnType;

    fn to_value(&self) -> Value;
    fn try_from_value(value: &Value) -> Result<Self>;
    fn key(&self) -> Self::Key;

    /// Narrows the outer `ValueColumnData` enum to this type's variant.
    /// Panics if `data` doesn't hold this type — callers only reach for this
    /// once the column's schema type has already confirmed it matches.
    fn value_column_of(data: &ValueColumnData) -> &ValueColumn<Self>;

    /// Narrows the outer `DictionaryColumnData` enum to this type's variant.
    fn dictionary_column_of(data: &DictionaryColumnData) -> &DictionaryColumn<Self>;
}

impl ColumnElement for i32 {
    type Key = i32;
    const COLUMN_TYPE: ColumnType = ColumnType::Int32;

    fn to_value(&self) -> Value {
        Value::Int32(*self)
    }

    fn try_from_value(value: &Value) -> Result<Self> {
        value.as_i32()
    }

    fn key(&self) -> Self::Key {
        *self
    }

    fn value_column_of(data: &ValueColumnData) -> &ValueColumn<Self> {
        match data {
            ValueColumnData::Int32(c) => c,
            _ => unreachable!("column type mismatch: expected Int32"),
        }
    }

    fn dictionary_column_of(data: &DictionaryColumnData) -> &DictionaryColumn<Self> {
        match data {
            DictionaryColumnData::Int32(c) => c,
            _ => unreachable!("column type mismatch: expected Int32"),
        }
    }
}

impl ColumnElement for f32 {
    type Key = OrderedFloat<f32>;
    const COLUMN_TYPE: ColumnType = ColumnType::Float32;

    fn to_value(&self) -> Value {
        Value::Float32(*self)
    }

    fn try_from_value(value: &Value) -> Result<Self> {
        value.as_f32()
    }

    fn key(&self) -> Self::Key {
        OrderedFloat(*self)
    }

    fn value_column_of(data: &ValueColumnData) -> &ValueColumn<Self> {
        match data {
            ValueColumnData::Float32(c) => c,
            _ => unreachable!("column type mismatch: expected Float32"),
        }
    }

    fn dictionary_column_of(data: &DictionaryColumnData) -> &DictionaryColumn<Self> {
        match data {
            DictionaryColumnData::Float32(c) => c,
            _ => unreachable!("column type mismatch: expected Float32"),
        }
    }
}

impl ColumnElement for f64 {
    type Key = OrderedFloat<f64>;
    const COLUMN_TYPE: ColumnType = ColumnType::Float64;

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn try_from_value(value: &Value) -> Result<Self> {
        value.as_f64()
    }

    fn key(&self) -> Self::Key {
        OrderedFloat(*self)
    }

    fn value_column_of(data: &ValueColumnData) -> &ValueColumn<Self> {
        match data {
            ValueColumnData::Float64(c) => c,
            _ => unreachable!("column type mismatch: expected Float64"),
        }
    }

    fn dictionary_column_of(data: &DictionaryColumnData) -> &DictionaryColumn<Self> {
        match data {
            DictionaryColumnData::Float64(c) => c,
            _ => unreachable!("column type mismatch: expected Float64"),
        }
    }
}

impl ColumnElement for String {
    type Key = String;
    const COLUMN_TYPE: ColumnType = ColumnType::Utf8;

    fn to_value(&self) -> Value {
        Value::Utf8(self.clone())
    }

    fn try_from_value(value: &Value) -> Result<Self> {
        value.as_str().map(str::to_string)
    }

    fn key(&self) -> Self::Key {
        self.clone()
    }

    fn value_column_of(data: &ValueColumnData) -> &ValueColumn<Self> {
        match data {
            ValueColumnData::Utf8(c) => c,
            _ => unreachable!("column type mismatch: expected Utf8"),
        }
    }

    fn dictionary_column_of(data: &DictionaryColumnData) -> &DictionaryColumn<Self> {
        match data {
            DictionaryColumnData::Utf8(c) => c,
            _ => unreachable!("column type mismatch: expected Utf8"),
        }
    }
}
