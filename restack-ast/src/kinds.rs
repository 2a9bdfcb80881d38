//! Enumerations carried by catalog nodes.
//!
//! These are language-agnostic descriptions; renderers decide how each one
//! maps to target syntax.

use serde::{Deserialize, Serialize};

/// Primitive kind aliased by a [`TypeDef`](crate::TypeDef).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    /// Unconstrained value (Go: `any`).
    #[default]
    Any,
    Bool,
    Byte,
    Rune,
    String,
    /// Floating point number.
    Decimal,
    Integer,
    Complex,
    /// Point in time (Go: `time.Time`).
    Time,
    /// Error value (Go: `error`).
    Error,
}

impl BaseType {
    /// Get the canonical name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Rune => "rune",
            Self::String => "string",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Complex => "complex",
            Self::Time => "time",
            Self::Error => "error",
        }
    }

    /// Whether a [`MemoryLayout`] changes how this kind is rendered.
    pub fn is_sized(&self) -> bool {
        matches!(self, Self::Decimal | Self::Integer | Self::Complex)
    }
}

/// Memory width of a numeric [`BaseType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLayout {
    /// Platform width (Go: `int`, `float64`, `complex128`).
    #[default]
    Native,
    Bit32,
    Bit64,
}

/// Direction of a [`Channel`](crate::Channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Both,
    /// Receive-only.
    Incoming,
    /// Send-only.
    Outgoing,
}

/// Operators usable in conditions, assignments and operator nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Assign,
    /// Declare and assign.
    Define,
    Equality,
    NotEquality,
    LessThan,
    GreaterThan,
    LessThanEqualTo,
    GreaterThanEqualTo,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Increment,
    Decrement,
    SelfAddition,
    SelfSubtraction,
    SelfMultiplication,
    SelfDivision,
    SelfModulo,
    ConditionalAnd,
    ConditionalOr,
    Not,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    BitClear,
    LeftShift,
    RightShift,
    AddressOf,
    Dereference,
    Receive,
}

/// How an operator binds to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `op x`
    Prefix,
    /// `x op`
    Postfix,
    /// `x op y`
    Binary,
}

impl Operator {
    pub fn arity(&self) -> Arity {
        match self {
            Self::Not | Self::BitwiseNot | Self::AddressOf | Self::Dereference | Self::Receive => {
                Arity::Prefix
            }
            Self::Increment | Self::Decrement => Arity::Postfix,
            _ => Arity::Binary,
        }
    }

    /// Whether the operator stores into its left operand.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Define
                | Self::Increment
                | Self::Decrement
                | Self::SelfAddition
                | Self::SelfSubtraction
                | Self::SelfMultiplication
                | Self::SelfDivision
                | Self::SelfModulo
        )
    }

    /// Whether the operator yields a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equality
                | Self::NotEquality
                | Self::LessThan
                | Self::GreaterThan
                | Self::LessThanEqualTo
                | Self::GreaterThanEqualTo
                | Self::ConditionalAnd
                | Self::ConditionalOr
                | Self::Not
        )
    }
}

/// Opaque scalar payload of a [`Value`](crate::Value) node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(#[serde(with = "crate::serde_helpers::float")] f64),
    Str(String),
    Rune(char),
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Scalar {
    fn from(v: char) -> Self {
        Self::Rune(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}
