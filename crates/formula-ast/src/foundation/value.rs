//! Literal payloads.
//!
//! A [`Value`] is always paired with exactly one [`DataType`] once it enters
//! the pipeline. [`Value::Default`] stands for an unset value: the host keeps
//! whatever default its input node or socket has.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DataType;

/// Literal payload carried by constants and `PUSH_VALUE` operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Unset; the host default applies
    Default,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Scalar
    Float(f64),
    /// Color with alpha
    Rgba([f64; 4]),
    /// Vector
    Vec3([f64; 3]),
}

impl Value {
    /// Catalog type the literal has on its own.
    pub fn natural_type(&self) -> DataType {
        match self {
            Value::Default => DataType::Unknown,
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Rgba(_) => DataType::Rgba,
            Value::Vec3(_) => DataType::Vec3,
        }
    }

    /// Scalar view of a bool, int or float.
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Widen this value into `to`.
    ///
    /// Returns `None` when the conversion would narrow or leave the numeric
    /// chain. `Default` converts to every type and stays `Default`.
    pub fn convert(&self, to: DataType) -> Option<Value> {
        if let Value::Default = self {
            return Some(Value::Default);
        }
        let from = self.natural_type();
        if from == to {
            return Some(*self);
        }
        if !(from.is_numeric() && to.is_numeric() && from < to) {
            return None;
        }
        match to {
            DataType::Int => match *self {
                Value::Bool(b) => Some(Value::Int(i64::from(b))),
                _ => None,
            },
            DataType::Float => self.as_scalar().map(Value::Float),
            DataType::Rgba => self.as_scalar().map(|v| Value::Rgba([v, v, v, 1.0])),
            DataType::Vec3 => match *self {
                Value::Rgba([r, g, b, _]) => Some(Value::Vec3([r, g, b])),
                _ => self.as_scalar().map(|v| Value::Vec3([v, v, v])),
            },
            _ => None,
        }
    }

    /// Per-component scalars of a vector value, `Default` for an unset one.
    pub fn components(&self) -> Option<[Value; 3]> {
        match *self {
            Value::Vec3([x, y, z]) => Some([Value::Float(x), Value::Float(y), Value::Float(z)]),
            Value::Default => Some([Value::Default; 3]),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Default => write!(f, "default"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Rgba([r, g, b, a]) => write!(f, "rgba({r:?}, {g:?}, {b:?}, {a:?})"),
            Value::Vec3([x, y, z]) => write!(f, "({x:?}, {y:?}, {z:?})"),
        }
    }
}
