//! Slate IR - shared data types for the Slate scripting language.
//!
//! Everything that more than one phase needs to agree on lives here:
//!
//! - [`Value`] / [`ValueType`]: the only runtime datum and its type tag
//! - [`NodeId`], [`StatementNode`], [`NodeArena`]: the flat, index-linked
//!   statement graph produced by the structural parser
//! - [`StatementKind`]: classification of a statement by its leading keyword
//! - [`is_valid_identifier`]: the variable naming rule

mod ident;
mod node;
mod node_id;
mod value;

pub use ident::is_valid_identifier;
pub use node::{NodeArena, StatementKind, StatementNode, DEFAULT_CAPACITY};
pub use node_id::NodeId;
pub use value::{Value, ValueType};
