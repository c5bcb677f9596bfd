//! The `Type` abstraction and its constructors
//!
//! A [`Type`] is an immutable named predicate. It is both data (a name that
//! composes into derived names such as `list<int>`) and a validator
//! ([`Type::validate`] returns the value unchanged or a [`TypeError`]).
//!
//! - **primitives**: the fixed registry (`any`, `int`, `bool`, ...)
//! - **polymorphic**: `optional`, `list_of`, `map_of`, `either`
//!
//! Struct, enum and signature types live in their own modules and build on
//! [`typedef_checked`].

pub mod polymorphic;
pub mod primitives;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::render::Renderer;
use crate::value::Value;
use crate::{Result, TypeError};

pub use polymorphic::{either, list_of, map_of, optional};
pub use primitives::{any, boolean, float, function, int, primitive, resource, string, Primitive};

type Check = dyn Fn(&Value) -> Result<bool> + Send + Sync;
type Reject = dyn Fn(&Value) -> TypeError + Send + Sync;

/// A reusable, composable runtime type.
///
/// Cloning is cheap: the name and predicate are shared.
#[derive(Clone)]
pub struct Type {
    name: Arc<str>,
    check: Arc<Check>,
    renderer: Renderer,
    reject: Option<Arc<Reject>>,
}

impl Type {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the raw predicate.
    ///
    /// `Ok(false)` is a plain rejection of the value itself; `Err` is a
    /// descriptive failure from a nested check and takes precedence over the
    /// mismatch.
    pub fn check(&self, value: &Value) -> Result<bool> {
        (self.check)(value)
    }

    /// Whether the value conforms, discarding any failure detail.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(self.check(value), Ok(true))
    }

    /// Validate by reference.
    pub fn validate_ref(&self, value: &Value) -> Result<()> {
        trace!(ty = %self.name, kind = %value.kind(), "validating value");
        let outcome = match self.check(value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.mismatch(value)),
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            debug!(ty = %self.name, error = %err, "validation failed");
        }
        outcome
    }

    /// Validating identity: the value back on success.
    pub fn validate(&self, value: Value) -> Result<Value> {
        self.validate_ref(&value).map(|()| value)
    }

    /// The error this type reports when it rejects `value`.
    pub fn mismatch(&self, value: &Value) -> TypeError {
        self.reject.as_ref().map_or_else(
            || TypeError::mismatch(self.name(), self.render(value), value.kind()),
            |reject| reject(value),
        )
    }

    /// Render a value with this type's renderer.
    pub fn render(&self, value: &Value) -> String {
        self.renderer.render(value)
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Same type, different value renderer for its failure messages.
    pub fn with_renderer(self, renderer: Renderer) -> Self {
        Self { renderer, ..self }
    }

    /// Same type, reporting its own rejections with `reject` instead of a
    /// generic mismatch. Enclosing types still see a plain rejection.
    pub fn with_mismatch<F>(self, reject: F) -> Self
    where
        F: Fn(&Value) -> TypeError + Send + Sync + 'static,
    {
        Self {
            reject: Some(Arc::new(reject)),
            ..self
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type").field("name", &self.name).finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Define a type from a boolean predicate.
///
/// # Examples
///
/// ```
/// use runtype_core::{typedef, Value};
///
/// let positive = typedef("positive", |v| v.as_int().is_some_and(|i| i > 0));
/// assert!(positive.validate(Value::Int(3)).is_ok());
/// assert!(positive.validate(Value::Int(-3)).is_err());
/// ```
pub fn typedef<F>(name: impl Into<String>, predicate: F) -> Type
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    typedef_checked(name, move |value| Ok(predicate(value)))
}

/// Define a type from a check that may fail descriptively.
pub fn typedef_checked<F>(name: impl Into<String>, check: F) -> Type
where
    F: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
{
    Type {
        name: Arc::from(name.into()),
        check: Arc::new(check),
        renderer: Renderer::default(),
        reject: None,
    }
}
