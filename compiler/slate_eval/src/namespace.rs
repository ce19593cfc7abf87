//! Variable namespace for one interpreter session.
//!
//! Maps names to values. `register` declares a new name and refuses
//! duplicates; `upsert` overwrites or creates. Bindings remember their
//! insertion order, which `dump` reports.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use thiserror::Error;

use slate_diagnostic::ErrorCode;
use slate_ir::{is_valid_identifier, Value};

/// Error returned when a name cannot be bound.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NameError {
    /// Name is empty, does not start with a letter, or contains characters
    /// other than letters, digits and `_`.
    #[error("illegal variable name `{0}`")]
    Illegal(String),
    /// `register` on a name that already exists.
    #[error("variable `{0}` is already registered")]
    Duplicate(String),
}

impl NameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NameError::Illegal(_) => ErrorCode::E2001,
            NameError::Duplicate(_) => ErrorCode::E2002,
        }
    }
}

/// What an [`Namespace::upsert`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Overwrote,
}

/// Name-to-value bindings, owned by exactly one session.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    index: FxHashMap<String, usize>,
    bindings: Vec<(String, Value)>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a new name. Fails without mutating if the name is illegal or
    /// already bound.
    pub fn register(&mut self, name: &str, value: Value) -> Result<(), NameError> {
        if !is_valid_identifier(name) {
            return Err(NameError::Illegal(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(NameError::Duplicate(name.to_string()));
        }
        self.insert_new(name, value);
        Ok(())
    }

    /// Bind or rebind a name. The value's type may change on overwrite.
    pub fn upsert(&mut self, name: &str, value: Value) -> Result<Upsert, NameError> {
        if !is_valid_identifier(name) {
            return Err(NameError::Illegal(name.to_string()));
        }
        match self.index.get(name) {
            Some(&slot) => {
                if let Some(binding) = self.bindings.get_mut(slot) {
                    binding.1 = value;
                }
                Ok(Upsert::Overwrote)
            }
            None => {
                self.insert_new(name, value);
                Ok(Upsert::Created)
            }
        }
    }

    /// Look up a name. Absence is not an error here.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let slot = *self.index.get(name)?;
        self.bindings.get(slot).map(|(_, value)| value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in the order they were first created.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// One `  name = value` line per binding, values in literal syntax.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            let _ = writeln!(out, "  {name} = {value}");
        }
        out
    }

    fn insert_new(&mut self, name: &str, value: Value) {
        self.index.insert(name.to_string(), self.bindings.len());
        self.bindings.push((name.to_string(), value));
    }
}

#[cfg(test)]
mod tests;
