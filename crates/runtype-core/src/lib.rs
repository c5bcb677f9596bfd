//! # Runtype Core
//!
//! Runtime type checking for dynamically shaped values.
//!
//! A [`Type`] is a name plus a check. Checks compose: primitives
//! ([`int`], [`string`], ...), polymorphic constructors ([`optional`],
//! [`list_of`], [`map_of`], [`either`]), structural records ([`structure`]),
//! closed enumerations ([`Enumeration`]) and typed function signatures
//! ([`defun`]).
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! Every failure is a [`TypeError`]. A check either accepts, rejects (and the
//! caller reports a mismatch against the checked type), or raises a more
//! specific error of its own which propagates unchanged through enclosing
//! types.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod enumeration;
mod error;
pub mod render;
pub mod signature;
pub mod structure;
pub mod types;
pub mod value;

pub use enumeration::{ActionTable, Enumeration};
pub use error::{ErrorKind, Result, TypeError};
pub use render::{ConfigError, RenderConfig, Renderer};
pub use signature::{defun, Applied, Defun, Signature};
pub use structure::{structure, StructDef, ANONYMOUS};
pub use types::{
    any, boolean, either, float, function, int, list_of, map_of, optional, primitive, resource,
    string, typedef, typedef_checked, Primitive, Type,
};
pub use value::{Function, Kind, Record, Resource, Value};
