//! Runtime values.
//!
//! Slate has exactly three kinds of data: text, numbers and booleans.
//! There is no implicit coercion between them; the only conversion the
//! language performs is parsing numeric literals.

use std::fmt;

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Convenience constructor for text values.
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// The runtime type of this value.
    #[inline]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Text(_) => ValueType::Text,
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Returns the number if this is a `Number`.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Text`.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag if this is a `Boolean`.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Output form used by `SPEAK`.
    ///
    /// Text is emitted as-is, numbers with two decimal places, booleans as
    /// `true`/`false`.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => format!("{n:.2}"),
            Value::Boolean(b) => b.to_string(),
        }
    }

    /// Stringify a value for use as a record identifier.
    ///
    /// Whole numbers drop their fractional part so that `GPA 7` and
    /// `GPA "7"` name the same record.
    pub fn to_identifier(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            Value::Number(n) => n.to_string(),
            Value::Boolean(true) => "True".to_string(),
            Value::Boolean(false) => "False".to_string(),
        }
    }
}

/// Displays the value the way it would be written as a Slate literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
        }
    }
}

/// The declared or observed type of a value.
///
/// Declarations use the keywords `STRING`, `NUM` and `BOOL`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Text,
    Number,
    Boolean,
}

impl ValueType {
    /// Parse a type keyword. Case-sensitive.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "STRING" => Some(ValueType::Text),
            "NUM" => Some(ValueType::Number),
            "BOOL" => Some(ValueType::Boolean),
            _ => None,
        }
    }

    /// The declaration keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            ValueType::Text => "STRING",
            ValueType::Number => "NUM",
            ValueType::Boolean => "BOOL",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
