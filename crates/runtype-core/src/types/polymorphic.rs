//! Polymorphic type constructors
//!
//! Each constructor takes one or two parameter types and derives a new
//! [`Type`] whose name composes the parameter names. Derived types reuse the
//! renderer of their first parameter.
//!
//! Collection checks are fail-fast: the first offending element aborts the
//! scan with a mismatch naming the element and the element type.

use super::{typedef_checked, Type};
use crate::value::Value;
use crate::Result;

/// `option<T>`: the absent marker or any `T`.
pub fn optional(inner: Type) -> Type {
    let renderer = inner.renderer().clone();
    typedef_checked(format!("option<{}>", inner.name()), move |value| {
        Ok(value.is_null() || inner.check(value)?)
    })
    .with_renderer(renderer)
}

/// `list<T>`: a list whose every element is a `T`.
pub fn list_of(inner: Type) -> Type {
    let renderer = inner.renderer().clone();
    typedef_checked(format!("list<{}>", inner.name()), move |value| {
        let Some(items) = value.as_list() else {
            return Ok(false);
        };
        items.iter().try_for_each(|item| element(&inner, item))?;
        Ok(true)
    })
    .with_renderer(renderer)
}

/// `attrs<T>`: a record-like value whose every field value is a `T`.
///
/// Keys are not checked. Which offender is reported when several values fail
/// depends on iteration order, which is unspecified for `Value::Map`.
pub fn map_of(inner: Type) -> Type {
    let renderer = inner.renderer().clone();
    typedef_checked(format!("attrs<{}>", inner.name()), move |value| {
        let Some(mut entries) = value.entries() else {
            return Ok(false);
        };
        entries.try_for_each(|(_, item)| element(&inner, item))?;
        Ok(true)
    })
    .with_renderer(renderer)
}

/// `either<A,B>`: a value satisfying at least one branch.
///
/// Branch failures are not propagated; when both branches reject, the
/// either-type itself reports the mismatch.
pub fn either(left: Type, right: Type) -> Type {
    let renderer = left.renderer().clone();
    typedef_checked(
        format!("either<{},{}>", left.name(), right.name()),
        move |value| Ok(left.accepts(value) || right.accepts(value)),
    )
    .with_renderer(renderer)
}

fn element(inner: &Type, item: &Value) -> Result<()> {
    if inner.check(item)? {
        Ok(())
    } else {
        Err(inner.mismatch(item))
    }
}
