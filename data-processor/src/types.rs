//! Core types for the data processor library
//!
//! This module defines the value that flows through a processing stage and the
//! error type a stage can fail with. Processors take a [`Data`] by value and
//! hand a new one back; nothing here tracks where a value came from or where it
//! goes next.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result type for processor operations
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors that can occur while processing a data value
///
/// The adapter in [`crate::processor`] never builds one of these itself. They
/// are produced by user transformation functions and returned untouched.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DataKind, found: DataKind },

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl ProcessError {
    /// Wrap an arbitrary error (or message) raised by a transformation function
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ProcessError::Custom(error.into())
    }

    /// Build a type mismatch error for `found`
    pub fn type_mismatch(expected: DataKind, found: &Data) -> Self {
        ProcessError::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}

/// The variant of a [`Data`] value, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Bool,
    Int,
    Float,
    String,
    List,
    Dict,
    Bytes,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataKind::Bool => "bool",
            DataKind::Int => "int",
            DataKind::Float => "float",
            DataKind::String => "string",
            DataKind::List => "list",
            DataKind::Dict => "dict",
            DataKind::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// A single unit of payload flowing through a processing stage
///
/// `Data` is moved into a processor and a (possibly different) `Data` is moved
/// back out. It is `Clone` so callers can keep an independent copy, but nothing
/// in this crate clones a value on the caller's behalf.
///
/// The serde representation is untagged, so JSON documents map directly onto
/// `Data`. Deserialization never yields [`Data::Bytes`]: a JSON array always
/// becomes a [`Data::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Data>),
    Dict(BTreeMap<String, Data>),
    /// Raw memory block (e.g. an encoded audio segment)
    Bytes(Vec<u8>),
}

impl Data {
    /// Get the variant of this value
    pub fn kind(&self) -> DataKind {
        match self {
            Data::Bool(_) => DataKind::Bool,
            Data::Int(_) => DataKind::Int,
            Data::Float(_) => DataKind::Float,
            Data::String(_) => DataKind::String,
            Data::List(_) => DataKind::List,
            Data::Dict(_) => DataKind::Dict,
            Data::Bytes(_) => DataKind::Bytes,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Data::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Data::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as f64, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Data::Float(v) => Some(*v),
            Data::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Data>> {
        match self {
            Data::Dict(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Data::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Take the elements out of a list value
    pub fn into_list(self) -> Result<Vec<Data>> {
        match self {
            Data::List(v) => Ok(v),
            other => Err(ProcessError::type_mismatch(DataKind::List, &other)),
        }
    }

    /// Take the entries out of a dict value
    pub fn into_dict(self) -> Result<BTreeMap<String, Data>> {
        match self {
            Data::Dict(v) => Ok(v),
            other => Err(ProcessError::type_mismatch(DataKind::Dict, &other)),
        }
    }

    /// Look up `key` if this value is a dict
    pub fn get(&self, key: &str) -> Option<&Data> {
        self.as_dict().and_then(|dict| dict.get(key))
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Bool(v) => write!(f, "{}", v),
            Data::Int(v) => write!(f, "{}", v),
            Data::Float(v) => write!(f, "{:?}", v),
            Data::String(v) => write!(f, "{:?}", v),
            Data::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Data::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Data::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<bool> for Data {
    fn from(v: bool) -> Self {
        Data::Bool(v)
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Self {
        Data::Int(v)
    }
}

impl From<i32> for Data {
    fn from(v: i32) -> Self {
        Data::Int(i64::from(v))
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Self {
        Data::Float(v)
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Self {
        Data::String(v.to_owned())
    }
}

impl From<String> for Data {
    fn from(v: String) -> Self {
        Data::String(v)
    }
}

impl From<Vec<Data>> for Data {
    fn from(v: Vec<Data>) -> Self {
        Data::List(v)
    }
}

impl From<BTreeMap<String, Data>> for Data {
    fn from(v: BTreeMap<String, Data>) -> Self {
        Data::Dict(v)
    }
}
