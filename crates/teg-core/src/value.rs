//! The tagged value model shared by the expression engine and the simulator.
//!
//! # Promotion rules
//!
//! | lhs ∘ rhs           | result                                        |
//! |---------------------|-----------------------------------------------|
//! | Integer ∘ Integer   | Integer (division truncates)                  |
//! | Integer ∘ Double    | Double (either side promotes both)            |
//! | String + String     | String (concatenation; only `+` and equality) |
//! | Boolean ∘ Boolean   | logical operators and equality only           |
//! | anything else       | `TypeMismatch`                                |
//!
//! Integer division by zero is a hard [`ValueError::DivisionByZero`]; Double
//! division follows IEEE 754 and produces infinities or NaN instead of
//! failing.  Ordering (`< > <= >=`) is defined for numeric operands only.
//!
//! Values are immutable: every operator returns a freshly constructed value.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ValueError, ValueResult};

// ── ValueType ─────────────────────────────────────────────────────────────────

/// The tag of a [`VariableValue`], also used to declare state variables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Boolean,
    Integer,
    Double,
    String,
}

impl ValueType {
    /// The value a freshly declared state variable of this type holds.
    pub fn default_value(self) -> VariableValue {
        match self {
            ValueType::Boolean => VariableValue::Boolean(false),
            ValueType::Integer => VariableValue::Integer(0),
            ValueType::Double  => VariableValue::Double(0.0),
            ValueType::String  => VariableValue::String(String::new()),
        }
    }

    /// `true` for Integer and Double.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Double)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Double  => "double",
            ValueType::String  => "string",
        };
        write!(f, "{name}")
    }
}

// ── VariableValue ─────────────────────────────────────────────────────────────

/// A tagged simulation value: the result of every expression evaluation and
/// the content of every state variable and event parameter.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

/// Both operands of a numeric operator after promotion.
enum NumericPair {
    Integers(i64, i64),
    Doubles(f64, f64),
}

impl VariableValue {
    /// The tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            VariableValue::Boolean(_) => ValueType::Boolean,
            VariableValue::Integer(_) => ValueType::Integer,
            VariableValue::Double(_)  => ValueType::Double,
            VariableValue::String(_)  => ValueType::String,
        }
    }

    /// Numeric view of this value, promoting Integer to Double.
    ///
    /// The simulator uses this for delay and priority expressions, which must
    /// be numeric.
    pub fn as_double(&self, op: &'static str) -> ValueResult<f64> {
        match *self {
            VariableValue::Integer(i) => Ok(i as f64),
            VariableValue::Double(d)  => Ok(d),
            ref other => Err(ValueError::UnaryMismatch {
                op,
                operand: other.value_type(),
            }),
        }
    }

    /// The truth value used by conditions and the logical operators.
    ///
    /// Booleans are themselves; Integer and Double are true iff nonzero;
    /// a String has no truth value.
    pub fn truthy(&self) -> ValueResult<bool> {
        match *self {
            VariableValue::Boolean(b) => Ok(b),
            VariableValue::Integer(i) => Ok(i != 0),
            VariableValue::Double(d)  => Ok(d != 0.0),
            VariableValue::String(_)  => Err(ValueError::NoTruthValue(ValueType::String)),
        }
    }

    fn numeric_pair(&self, rhs: &VariableValue, op: &'static str) -> ValueResult<NumericPair> {
        use VariableValue::*;
        match (self, rhs) {
            (Integer(a), Integer(b)) => Ok(NumericPair::Integers(*a, *b)),
            (Integer(a), Double(b))  => Ok(NumericPair::Doubles(*a as f64, *b)),
            (Double(a), Integer(b))  => Ok(NumericPair::Doubles(*a, *b as f64)),
            (Double(a), Double(b))   => Ok(NumericPair::Doubles(*a, *b)),
            _ => Err(ValueError::TypeMismatch {
                op,
                lhs: self.value_type(),
                rhs: rhs.value_type(),
            }),
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// `self + rhs`: numeric addition or string concatenation.
    pub fn add(&self, rhs: &VariableValue) -> ValueResult<VariableValue> {
        use VariableValue::*;
        if let (String(a), String(b)) = (self, rhs) {
            let mut s = a.clone();
            s.push_str(b);
            return Ok(String(s));
        }
        match self.numeric_pair(rhs, "+")? {
            NumericPair::Integers(a, b) => Ok(Integer(a.wrapping_add(b))),
            NumericPair::Doubles(a, b)  => Ok(Double(a + b)),
        }
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &VariableValue) -> ValueResult<VariableValue> {
        match self.numeric_pair(rhs, "-")? {
            NumericPair::Integers(a, b) => Ok(VariableValue::Integer(a.wrapping_sub(b))),
            NumericPair::Doubles(a, b)  => Ok(VariableValue::Double(a - b)),
        }
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &VariableValue) -> ValueResult<VariableValue> {
        match self.numeric_pair(rhs, "*")? {
            NumericPair::Integers(a, b) => Ok(VariableValue::Integer(a.wrapping_mul(b))),
            NumericPair::Doubles(a, b)  => Ok(VariableValue::Double(a * b)),
        }
    }

    /// `self / rhs`.
    ///
    /// Integer division truncates and fails on a zero divisor; Double
    /// division never fails (IEEE infinities/NaN).
    pub fn div(&self, rhs: &VariableValue) -> ValueResult<VariableValue> {
        match self.numeric_pair(rhs, "/")? {
            NumericPair::Integers(_, 0) => Err(ValueError::DivisionByZero),
            NumericPair::Integers(a, b) => Ok(VariableValue::Integer(a.wrapping_div(b))),
            NumericPair::Doubles(a, b)  => Ok(VariableValue::Double(a / b)),
        }
    }

    /// Arithmetic negation (`-x`).
    pub fn neg(&self) -> ValueResult<VariableValue> {
        match *self {
            VariableValue::Integer(i) => Ok(VariableValue::Integer(i.wrapping_neg())),
            VariableValue::Double(d)  => Ok(VariableValue::Double(-d)),
            ref other => Err(ValueError::UnaryMismatch {
                op:      "-",
                operand: other.value_type(),
            }),
        }
    }

    /// Logical negation (`!x`), via truthiness.
    pub fn not(&self) -> ValueResult<VariableValue> {
        Ok(VariableValue::Boolean(!self.truthy()?))
    }

    // ── Comparison ────────────────────────────────────────────────────────

    /// Value equality for `==`/`!=`: same-tag, or numeric with promotion.
    ///
    /// Comparing a Boolean or String against any other tag fails.
    pub fn equals(&self, rhs: &VariableValue) -> ValueResult<bool> {
        use VariableValue::*;
        match (self, rhs) {
            (Boolean(a), Boolean(b)) => Ok(a == b),
            (String(a), String(b))   => Ok(a == b),
            _ => match self.numeric_pair(rhs, "==")? {
                NumericPair::Integers(a, b) => Ok(a == b),
                NumericPair::Doubles(a, b)  => Ok(a == b),
            },
        }
    }

    /// Ordering for `< > <= >=`: numeric operands only.
    ///
    /// Doubles are ordered with `total_cmp` so a NaN operand still yields a
    /// deterministic (if surprising) answer instead of a platform-dependent
    /// one.
    pub fn compare(&self, rhs: &VariableValue, op: &'static str) -> ValueResult<Ordering> {
        match self.numeric_pair(rhs, op)? {
            NumericPair::Integers(a, b) => Ok(a.cmp(&b)),
            NumericPair::Doubles(a, b)  => Ok(a.total_cmp(&b)),
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Boolean(b) => write!(f, "{b}"),
            VariableValue::Integer(i) => write!(f, "{i}"),
            VariableValue::Double(d)  => write!(f, "{d}"),
            VariableValue::String(s)  => write!(f, "{s}"),
        }
    }
}

// ── Construction conveniences ─────────────────────────────────────────────────

impl From<bool> for VariableValue {
    fn from(b: bool) -> Self {
        VariableValue::Boolean(b)
    }
}

impl From<i64> for VariableValue {
    fn from(i: i64) -> Self {
        VariableValue::Integer(i)
    }
}

impl From<f64> for VariableValue {
    fn from(d: f64) -> Self {
        VariableValue::Double(d)
    }
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::String(s.to_owned())
    }
}

impl From<String> for VariableValue {
    fn from(s: String) -> Self {
        VariableValue::String(s)
    }
}
