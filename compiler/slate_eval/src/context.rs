//! Per-session runtime context.

use std::fmt;

use slate_store::{Role, SharedStore, UserId};

/// Who is running the script, and the store their builtins act on.
///
/// Fixed for the lifetime of one session.
#[derive(Clone)]
pub struct RuntimeContext {
    caller: UserId,
    role: Role,
    store: SharedStore,
}

impl RuntimeContext {
    pub fn new(caller: UserId, role: Role, store: SharedStore) -> Self {
        RuntimeContext { caller, role, store }
    }

    #[inline]
    pub fn caller(&self) -> UserId {
        self.caller
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn is_student(&self) -> bool {
        self.role.is_student()
    }

    #[inline]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

impl fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("caller", &self.caller)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
