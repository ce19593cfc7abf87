//! Builtin functions.
//!
//! The set is closed: every builtin is a variant of [`Builtin`] and is
//! dispatched through a single match. Builtins receive already-evaluated
//! arguments and the session's [`RuntimeContext`].

use std::fmt;

use tracing::{debug, info};

use slate_ir::{Value, ValueType};

use crate::errors::{EvalError, EvalResult};
use crate::RuntimeContext;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `EQUAL a b`: structural equality, no coercion.
    Equal,
    /// `GREATER a b`: numeric `>`.
    Greater,
    /// `GPA id`: weighted GPA from the record store.
    Gpa,
    /// `OPEN_COURSE "name" credit`: instructors only.
    OpenCourse,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::Equal,
        Builtin::Greater,
        Builtin::Gpa,
        Builtin::OpenCourse,
    ];

    /// Look up a builtin by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|builtin| builtin.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Equal => "EQUAL",
            Builtin::Greater => "GREATER",
            Builtin::Gpa => "GPA",
            Builtin::OpenCourse => "OPEN_COURSE",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Gpa => 1,
            Builtin::Equal | Builtin::Greater | Builtin::OpenCourse => 2,
        }
    }

    /// Invoke the builtin.
    ///
    /// Arity is checked first for every builtin. `OPEN_COURSE` then checks
    /// the caller's role before looking at its arguments, so a student
    /// never reaches the store.
    pub fn call(self, args: &[Value], ctx: &RuntimeContext) -> EvalResult<Value> {
        if args.len() != self.arity() {
            return Err(EvalError::ArityMismatch {
                builtin: self.name(),
                expected: self.arity(),
                found: args.len(),
            });
        }

        match (self, args) {
            (Builtin::Equal, [a, b]) => Ok(Value::Boolean(a == b)),
            (Builtin::Greater, [a, b]) => {
                let lhs = self.number_operand(a)?;
                let rhs = self.number_operand(b)?;
                Ok(Value::Boolean(lhs > rhs))
            }
            (Builtin::Gpa, [student]) => {
                let ident = student.to_identifier();
                let gpa = ctx.store().compute_gpa(&ident)?;
                debug!(student = %ident, gpa, "computed GPA");
                Ok(Value::Number(gpa))
            }
            (Builtin::OpenCourse, [name, credit]) => self.open_course(name, credit, ctx),
            _ => Err(EvalError::ArityMismatch {
                builtin: self.name(),
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }

    fn number_operand(self, value: &Value) -> EvalResult<f64> {
        value.as_number().ok_or(EvalError::NonNumericOperand {
            builtin: self.name(),
            found: value.value_type(),
        })
    }

    fn open_course(self, name: &Value, credit: &Value, ctx: &RuntimeContext) -> EvalResult<Value> {
        if ctx.is_student() {
            return Err(EvalError::NotPermitted {
                builtin: self.name(),
                role: ctx.role(),
            });
        }
        let Some(name) = name.as_text() else {
            return Err(EvalError::TypeMismatch {
                expected: ValueType::Text,
                found: name.value_type(),
            });
        };
        let Some(credit) = credit.as_number() else {
            return Err(EvalError::TypeMismatch {
                expected: ValueType::Number,
                found: credit.value_type(),
            });
        };

        let course = ctx.store().create_course(name, ctx.caller(), credit)?;
        info!(%course, name, credit, owner = %ctx.caller(), "opened course");
        Ok(Value::Boolean(true))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
