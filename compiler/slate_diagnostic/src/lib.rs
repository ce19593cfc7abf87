//! Diagnostic system for Slate.
//!
//! Every error the toolchain reports carries:
//! - an error code for searchability (`slate explain E2004`)
//! - a clear message (what went wrong)
//! - the source line it happened on, when known
//! - optional notes (why, or how to fix it)
//!
//! Structural errors abort a parse; every other diagnostic is reported
//! per line and execution continues.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
