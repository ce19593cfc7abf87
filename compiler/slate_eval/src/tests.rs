//! Expression and builtin tests, plus store doubles shared with the
//! interpreter tests.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use slate_ir::{Value, ValueType};
use slate_store::{CourseId, InMemoryStore, RecordStore, Role, StoreError, UserId};

use crate::{evaluate, resolve_token, Builtin, EvalError, Namespace, RuntimeContext};

/// Store double that counts calls and always succeeds.
#[derive(Default)]
pub(crate) struct RecordingStore {
    pub gpa_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl RecordStore for RecordingStore {
    fn compute_gpa(&self, _student: &str) -> Result<f64, StoreError> {
        self.gpa_calls.fetch_add(1, Ordering::SeqCst);
        Ok(2.5)
    }

    fn create_course(
        &self,
        _name: &str,
        _owner: UserId,
        _credit: f64,
    ) -> Result<CourseId, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(CourseId::new(1))
    }
}

pub(crate) fn context_with(
    store: Arc<dyn RecordStore + Send + Sync>,
    caller: u32,
    role: Role,
) -> RuntimeContext {
    RuntimeContext::new(UserId::new(caller), role, store)
}

/// Bob (teacher 1) teaches Python (3.0), Math (4.0) and PE (1.0); Alice
/// (student 1) scored 85, 92 and 0.
pub(crate) fn seeded_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    let bob = store.register_teacher("Bob", "pwd", "bob@x.com").unwrap();
    let alice = store.register_student("Alice", "pwd", "alice@x.com").unwrap();
    for (course, credit, score) in [("Python", 3.0, 85.0), ("Math", 4.0, 92.0), ("PE", 1.0, 0.0)] {
        store.create_course(course, bob, credit).unwrap();
        store.enroll_by_name(alice, course).unwrap();
        store.set_score(course, "Bob", "Alice", score).unwrap();
    }
    Arc::new(store)
}

fn teacher_ctx() -> RuntimeContext {
    context_with(Arc::new(RecordingStore::default()), 1, Role::Teacher)
}

fn namespace() -> Namespace {
    let mut ns = Namespace::new();
    ns.register("name", Value::text("Alice")).unwrap();
    ns.register("x", Value::Number(30.0)).unwrap();
    ns.register("flag", Value::Boolean(true)).unwrap();
    ns
}

// Token resolution

#[test]
fn tokens_resolve_in_rule_order() {
    let ns = namespace();
    assert_eq!(resolve_token("$name", &ns).unwrap(), Value::text("Alice"));
    assert_eq!(resolve_token("True", &ns).unwrap(), Value::Boolean(true));
    assert_eq!(resolve_token("False", &ns).unwrap(), Value::Boolean(false));
    assert_eq!(resolve_token("\"hi\"", &ns).unwrap(), Value::text("hi"));
    assert_eq!(resolve_token("\"\"", &ns).unwrap(), Value::text(""));
    assert_eq!(resolve_token("-2.5", &ns).unwrap(), Value::Number(-2.5));
    assert_eq!(resolve_token("42", &ns).unwrap(), Value::Number(42.0));
}

#[test]
fn boolean_literals_are_case_sensitive() {
    let ns = namespace();
    assert_eq!(
        resolve_token("true", &ns),
        Err(EvalError::UnparseableLiteral {
            token: "true".into()
        })
    );
}

#[test]
fn undefined_variable_is_an_error() {
    let ns = namespace();
    assert_eq!(
        resolve_token("$ghost", &ns),
        Err(EvalError::UndefinedVariable {
            name: "ghost".into()
        })
    );
}

#[test]
fn bare_word_is_unparseable() {
    let ns = namespace();
    assert_eq!(
        resolve_token("hello", &ns),
        Err(EvalError::UnparseableLiteral {
            token: "hello".into()
        })
    );
}

// Expressions

#[test]
fn empty_expression_is_an_error() {
    assert_eq!(
        evaluate("   ", &namespace(), &teacher_ctx()),
        Err(EvalError::EmptyExpression)
    );
}

#[test]
fn single_token_expression() {
    assert_eq!(
        evaluate("$x", &namespace(), &teacher_ctx()).unwrap(),
        Value::Number(30.0)
    );
}

#[test]
fn builtin_names_are_case_insensitive() {
    assert_eq!(
        evaluate("equal $x 30", &namespace(), &teacher_ctx()).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn unknown_function_is_an_error() {
    assert_eq!(
        evaluate("maximum 1 2", &namespace(), &teacher_ctx()),
        Err(EvalError::UnknownFunction {
            name: "MAXIMUM".into()
        })
    );
}

#[test]
fn argument_errors_propagate() {
    assert_eq!(
        evaluate("EQUAL $nope 1", &namespace(), &teacher_ctx()),
        Err(EvalError::UndefinedVariable { name: "nope".into() })
    );
}

// Builtins

#[test]
fn equal_is_structural_without_coercion() {
    let ctx = teacher_ctx();
    let call = |a: Value, b: Value| Builtin::Equal.call(&[a, b], &ctx).unwrap();
    assert_eq!(call(Value::Number(1.0), Value::Number(1.0)), Value::Boolean(true));
    assert_eq!(call(Value::Number(1.0), Value::Boolean(true)), Value::Boolean(false));
    assert_eq!(call(Value::text("1"), Value::Number(1.0)), Value::Boolean(false));
    assert_eq!(call(Value::text("a"), Value::text("a")), Value::Boolean(true));
}

#[test]
fn greater_compares_numbers() {
    let ctx = teacher_ctx();
    assert_eq!(
        evaluate("GREATER 5 3", &Namespace::new(), &ctx).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        evaluate("GREATER 3 3", &Namespace::new(), &ctx).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn greater_rejects_non_numbers() {
    assert_eq!(
        evaluate("GREATER \"a\" 3", &Namespace::new(), &teacher_ctx()),
        Err(EvalError::NonNumericOperand {
            builtin: "GREATER",
            found: ValueType::Text,
        })
    );
}

#[test]
fn arity_is_checked_for_every_builtin() {
    let ctx = teacher_ctx();
    for builtin in Builtin::ALL {
        let args = vec![Value::Number(1.0); builtin.arity() + 1];
        assert_eq!(
            builtin.call(&args, &ctx),
            Err(EvalError::ArityMismatch {
                builtin: builtin.name(),
                expected: builtin.arity(),
                found: builtin.arity() + 1,
            })
        );
    }
}

#[test]
fn builtin_lookup_by_name() {
    assert_eq!(Builtin::from_name("open_course"), Some(Builtin::OpenCourse));
    assert_eq!(Builtin::from_name("Gpa"), Some(Builtin::Gpa));
    assert_eq!(Builtin::from_name("REG"), None);
}

#[test]
fn gpa_uses_the_store() {
    let store = seeded_store();
    let ctx = context_with(store, 1, Role::Student);
    let by_id = evaluate("GPA 1", &Namespace::new(), &ctx).unwrap();
    let by_name = evaluate("GPA \"Alice\"", &Namespace::new(), &ctx).unwrap();
    let gpa = by_id.as_number().unwrap();
    assert!((gpa - 3.750_625).abs() < 1e-9, "gpa was {gpa}");
    assert_eq!(by_id, by_name);
    assert_eq!(
        evaluate("GPA 99", &Namespace::new(), &ctx).unwrap(),
        Value::Number(0.0)
    );
}

#[test]
fn open_course_as_student_never_touches_store() {
    let store = Arc::new(RecordingStore::default());
    let ctx = context_with(store.clone(), 1, Role::Student);
    let result = Builtin::OpenCourse.call(&[Value::text("Python"), Value::Number(3.0)], &ctx);
    assert_eq!(
        result,
        Err(EvalError::NotPermitted {
            builtin: "OPEN_COURSE",
            role: Role::Student,
        })
    );
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn open_course_role_is_checked_before_argument_types() {
    let store = Arc::new(RecordingStore::default());
    let ctx = context_with(store, 1, Role::Student);
    let result = Builtin::OpenCourse.call(&[Value::Number(1.0), Value::text("x")], &ctx);
    assert!(matches!(result, Err(EvalError::NotPermitted { .. })));
}

#[test]
fn open_course_checks_argument_types() {
    let ctx = teacher_ctx();
    assert_eq!(
        Builtin::OpenCourse.call(&[Value::Number(1.0), Value::Number(3.0)], &ctx),
        Err(EvalError::TypeMismatch {
            expected: ValueType::Text,
            found: ValueType::Number,
        })
    );
    assert_eq!(
        Builtin::OpenCourse.call(&[Value::text("Python"), Value::text("3")], &ctx),
        Err(EvalError::TypeMismatch {
            expected: ValueType::Number,
            found: ValueType::Text,
        })
    );
}

#[test]
fn open_course_as_teacher_creates_course() {
    let store = seeded_store();
    let ctx = context_with(store.clone(), 1, Role::Teacher);
    let result = Builtin::OpenCourse
        .call(&[Value::text("Rust"), Value::Number(2.0)], &ctx)
        .unwrap();
    assert_eq!(result, Value::Boolean(true));
    let last = store.list_courses().pop().unwrap();
    assert_eq!(last.name, "Rust");
    assert_eq!(last.teacher.as_deref(), Some("Bob"));
}

#[test]
fn open_course_store_rejection_is_reported() {
    let store = seeded_store();
    let ctx = context_with(store, 42, Role::Teacher);
    assert_eq!(
        Builtin::OpenCourse.call(&[Value::text("Rust"), Value::Number(2.0)], &ctx),
        Err(EvalError::Store(StoreError::InvalidOwner(UserId::new(42))))
    );
}
