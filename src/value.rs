//! The typed value layer: the closed set of element types the engine can
//! store, and [`Value`], the tagged container ("AllTypeVariant" in the
//! source material) that carries any one of them across the operator
//! pipeline.

use crate::error::{Error, Result};

/// Runtime tag for a column's element type. Drives every type dispatch in
/// the engine — adding a type means touching every `match` on this enum,
/// never working around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int32,
    Float32,
    Float64,
    Utf8,
}

impl ColumnType {
    /// The `type_name` strings accepted by `Table::add_column` (spec §6).
    pub fn from_type_name(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(ColumnType::Int32),
            "float" => Ok(ColumnType::Float32),
            "double" => Ok(ColumnType::Float64),
            "string" => Ok(ColumnType::Utf8),
            other => Err(Error::UnknownType(other.to_string())),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Int32 => "int",
            ColumnType::Float32 => "float",
            ColumnType::Float64 => "double",
            ColumnType::Utf8 => "string",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A dynamically tagged value. Construction from any supported element type
/// is total; extraction (`try_as`) requires a type argument and fails with
/// [`Error::TypeMismatch`] unless the conversion is a permitted numeric
/// widening.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Utf8(String),
}

impl Value {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int32(_) => ColumnType::Int32,
            Value::Float32(_) => ColumnType::Float32,
            Value::Float64(_) => ColumnType::Float64,
            Value::Utf8(_) => ColumnType::Utf8,
        }
    }

    pub fn as_i32(&self) -> Result<i32> {
        match self {
            Value::Int32(v) => Ok(*v),
            other => Err(Error::TypeMismatch {
                expected: ColumnType::Int32,
                found: other.column_type(),
            }),
        }
    }

    pub fn as_f32(&self) -> Result<f32> {
        match self {
            Value::Float32(v) => Ok(*v),
            Value::Int32(v) => Ok(*v as f32),
            other => Err(Error::TypeMismatch {
                expected: ColumnType::Float32,
                found: other.column_type(),
            }),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Float64(v) => Ok(*v),
            Value::Float32(v) => Ok(*v as f64),
            Value::Int32(v) => Ok(*v as f64),
            other => Err(Error::TypeMismatch {
                expected: ColumnType::Float64,
                found: other.column_type(),
            }),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Utf8(v) => Ok(v.as_str()),
            other => Err(Error::TypeMismatch {
                expected: ColumnType::Utf8,
                found: other.column_type(),
            }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}
