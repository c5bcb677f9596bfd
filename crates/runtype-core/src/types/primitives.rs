//! Built-in primitive types
//!
//! The registry is closed: every primitive is a [`Primitive`] variant and
//! can be looked up by its type name. Kinds are matched exactly, so `int`
//! never accepts a `Float` and `float` never accepts an `Int`.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{typedef, Type};
use crate::value::{Kind, Value};

/// The fixed set of built-in types.
#[derive(Debug, Display, EnumIter, EnumString, AsRefStr, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    Any,
    Int,
    Bool,
    Float,
    #[strum(serialize = "string")]
    Str,
    /// Opaque external resource
    Resource,
    Function,
}

impl Primitive {
    /// The value kind this primitive accepts, `None` for `any`.
    pub const fn kind(self) -> Option<Kind> {
        match self {
            Self::Any => None,
            Self::Int => Some(Kind::Int),
            Self::Bool => Some(Kind::Bool),
            Self::Float => Some(Kind::Float),
            Self::Str => Some(Kind::Str),
            Self::Resource => Some(Kind::Resource),
            Self::Function => Some(Kind::Function),
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        self.kind().map_or(true, |kind| value.kind() == kind)
    }

    pub fn ty(self) -> Type {
        typedef(self.as_ref(), move |value| self.accepts(value))
    }
}

/// Look up a primitive type by name (`"int"`, `"string"`, ...).
pub fn primitive(name: &str) -> Option<Type> {
    Primitive::from_str(name).ok().map(Primitive::ty)
}

/// Accepts every value, including the absent marker.
pub fn any() -> Type {
    Primitive::Any.ty()
}

pub fn int() -> Type {
    Primitive::Int.ty()
}

/// The `bool` type.
pub fn boolean() -> Type {
    Primitive::Bool.ty()
}

pub fn float() -> Type {
    Primitive::Float.ty()
}

pub fn string() -> Type {
    Primitive::Str.ty()
}

/// Opaque external handles ([`crate::Resource`]).
pub fn resource() -> Type {
    Primitive::Resource.ty()
}

/// Callables, including typed functions built with [`crate::defun`].
pub fn function() -> Type {
    Primitive::Function.ty()
}
