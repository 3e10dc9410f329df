//! The column layer: a closed sum type over three variants (value,
//! dictionary, reference), each itself closed over the engine's four
//! element types. Operators dispatch on the variant and, inside each
//! variant, on the element type — never through a uniform virtual
//! `element_at` alone, since `TableScan` needs structural access to the raw
//! `values` / `attribute_vector` / `pos_list`.

pub mod dictionary_column;
pub mod element;
pub mod reference_column;
pub mod value_column;

use crate::error::{Error, Result};
use crate::value::{ColumnType, Value};

pub use dictionary_column::DictionaryColumn;
pub use reference_column::ReferenceColumn;
pub use value_column::ValueColumn;

/// The four element types crossed with the `ValueColumn` encoding.
#[derive(Debug, Clone)]
pub enum ValueColumnData {
    Int32(ValueColumn<i32>),
    Float32(ValueColumn<f32>),
    Float64(ValueColumn<f64>),
    Utf8(ValueColumn<String>),
}

/// The four element types crossed with the `DictionaryColumn` encoding.
#[derive(Debug, Clone)]
pub enum DictionaryColumnData {
    Int32(DictionaryColumn<i32>),
    Float32(DictionaryColumn<f32>),
    Float64(DictionaryColumn<f64>),
    Utf8(DictionaryColumn<String>),
}

/// The closed sum of the three physical column encodings.
#[derive(Debug, Clone)]
pub enum Column {
    Value(ValueColumnData),
    Dictionary(DictionaryColumnData),
    Reference(ReferenceColumn),
}

impl Column {
    /// A fresh, empty `ValueColumn` for the given element type — used when a
    /// table grows a new chunk or gains a new column.
    pub fn new_value(ty: ColumnType) -> Self {
        Column::Value(match ty {
            ColumnType::Int32 => ValueColumnData::Int32(ValueColumn::new()),
            ColumnType::Float32 => ValueColumnData::Float32(ValueColumn::new()),
            ColumnType::Float64 => ValueColumnData::Float64(ValueColumn::new()),
            ColumnType::Utf8 => ValueColumnData::Utf8(ValueColumn::new()),
        })
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Value(ValueColumnData::Int32(_))
            | Column::Dictionary(DictionaryColumnData::Int32(_)) => ColumnType::Int32,
            Column::Value(ValueColumnData::Float32(_))
            | Column::Dictionary(DictionaryColumnData::Float32(_)) => ColumnType::Float32,
            Column::Value(ValueColumnData::Float64(_))
            | Column::Dictionary(DictionaryColumnData::Float64(_)) => ColumnType::Float64,
            Column::Value(ValueColumnData::Utf8(_))
            | Column::Dictionary(DictionaryColumnData::Utf8(_)) => ColumnType::Utf8,
            Column::Reference(r) => r
                .referenced_table()
                .schema()
                .column(r.referenced_column_id())
                .ty,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Column::Value(ValueColumnData::Int32(c)) => c.size(),
            Column::Value(ValueColumnData::Float32(c)) => c.size(),
            Column::Value(ValueColumnData::Float64(c)) => c.size(),
            Column::Value(ValueColumnData::Utf8(c)) => c.size(),
            Column::Dictionary(DictionaryColumnData::Int32(c)) => c.size(),
            Column::Dictionary(DictionaryColumnData::Float32(c)) => c.size(),
            Column::Dictionary(DictionaryColumnData::Float64(c)) => c.size(),
            Column::Dictionary(DictionaryColumnData::Utf8(c)) => c.size(),
            Column::Reference(c) => c.size(),
        }
    }

    pub fn element_at(&self, i: usize) -> Value {
        match self {
            Column::Value(ValueColumnData::Int32(c)) => c.element_at(i),
            Column::Value(ValueColumnData::Float32(c)) => c.element_at(i),
            Column::Value(ValueColumnData::Float64(c)) => c.element_at(i),
            Column::Value(ValueColumnData::Utf8(c)) => c.element_at(i),
            Column::Dictionary(DictionaryColumnData::Int32(c)) => c.element_at(i),
            Column::Dictionary(DictionaryColumnData::Float32(c)) => c.element_at(i),
            Column::Dictionary(DictionaryColumnData::Float64(c)) => c.element_at(i),
            Column::Dictionary(DictionaryColumnData::Utf8(c)) => c.element_at(i),
            Column::Reference(c) => c.element_at(i),
        }
    }

    pub fn append(&mut self, value: &Value) -> Result<()> {
        match self {
            Column::Value(ValueColumnData::Int32(c)) => c.append_value(value),
            Column::Value(ValueColumnData::Float32(c)) => c.append_value(value),
            Column::Value(ValueColumnData::Float64(c)) => c.append_value(value),
            Column::Value(ValueColumnData::Utf8(c)) => c.append_value(value),
            Column::Dictionary(_) => Err(Error::Immutable),
            Column::Reference(_) => Err(Error::Immutable),
        }
    }

    /// If this is a `ValueColumn`, builds the equivalent `DictionaryColumn`.
    /// Already-compressed or reference columns pass through unchanged.
    pub fn compress(&self) -> Result<Column> {
        Ok(match self {
            Column::Value(ValueColumnData::Int32(c)) => {
                Column::Dictionary(DictionaryColumnData::Int32(
                    DictionaryColumn::from_value_column(c)?,
                ))
            }
            Column::Value(ValueColumnData::Float32(c)) => {
                Column::Dictionary(DictionaryColumnData::Float32(
                    DictionaryColumn::from_value_column(c)?,
                ))
            }
            Column::Value(ValueColumnData::Float64(c)) => {
                Column::Dictionary(DictionaryColumnData::Float64(
                    DictionaryColumn::from_value_column(c)?,
                ))
            }
            Column::Value(ValueColumnData::Utf8(c)) => Column::Dictionary(
                DictionaryColumnData::Utf8(DictionaryColumn::from_value_column(c)?),
            ),
            Column::Dictionary(d) => Column::Dictionary(d.clone()),
            Column::Reference(r) => Column::Reference(r.clone()),
        })
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Column::Value(_))
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Column::Dictionary(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Column::Reference(_))
    }

    pub fn as_reference(&self) -> Option<&ReferenceColumn> {
        match self {
            Column::Reference(r) => Some(r),
            _ => None,
        }
    }
}
