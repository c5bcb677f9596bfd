//! Typed function signatures
//!
//! [`defun`] wraps an implementation so that every positional argument and
//! the final result are validated against a declared type sequence
//! `[T1, ..., Tn, R]`.
//!
//! Two calling styles share the same checks:
//! - [`Defun::call`] takes all remaining arguments at once
//! - [`Defun::apply`] takes one argument and returns either the partially
//!   applied function or, after the last argument, the checked result
//!
//! The implementation only runs once every argument has passed; partial
//! applications are never checked against the result type.

use std::fmt;
use std::sync::Arc;

use either::Either;
use itertools::Itertools;
use tracing::debug;

use crate::types::Type;
use crate::value::{Function, Value};
use crate::{Result, TypeError};

/// Ordered argument types followed by one result type.
#[derive(Debug, Clone)]
pub struct Signature {
    params: Vec<Type>,
    result: Type,
}

impl Signature {
    /// Fails with [`TypeError::InvalidSignature`] for fewer than two types.
    pub fn new(types: impl IntoIterator<Item = Type>) -> Result<Self> {
        let mut params: Vec<Type> = types.into_iter().collect();
        let len = params.len();
        if len < 2 {
            return Err(TypeError::InvalidSignature { len });
        }
        params
            .pop()
            .map(|result| Self { params, result })
            .ok_or(TypeError::InvalidSignature { len })
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub const fn result(&self) -> &Type {
        &self.result
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_arrow(f, &self.params, &self.result)
    }
}

fn write_arrow(f: &mut fmt::Formatter<'_>, params: &[Type], result: &Type) -> fmt::Result {
    let arrow = params
        .iter()
        .chain(std::iter::once(result))
        .map(Type::name)
        .join(" -> ");
    write!(f, "λ :: {arrow}")
}

type Implementation = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Result of applying one argument.
pub type Applied = Either<Defun, Value>;

/// A function wrapped with signature checks.
#[derive(Clone)]
pub struct Defun {
    signature: Signature,
    implementation: Arc<Implementation>,
    applied: Vec<Value>,
}

impl Defun {
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Argument types not yet supplied.
    pub fn remaining(&self) -> &[Type] {
        self.signature
            .params
            .get(self.applied.len()..)
            .unwrap_or_default()
    }

    /// Supply the next argument.
    pub fn apply(&self, arg: Value) -> Result<Applied> {
        let Some(ty) = self.remaining().first() else {
            return Err(self.arity_mismatch(1));
        };
        let arg = ty.validate(arg)?;
        let applied: Vec<Value> = self.applied.iter().cloned().chain([arg]).collect();
        if applied.len() < self.signature.arity() {
            Ok(Either::Left(Self {
                applied,
                ..self.clone()
            }))
        } else {
            self.finish(&applied).map(Either::Right)
        }
    }

    /// Supply every remaining argument at once.
    ///
    /// Arguments are checked left to right and the first failure aborts the
    /// call before the implementation runs.
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        let remaining = self.remaining();
        if args.len() != remaining.len() {
            return Err(self.arity_mismatch(args.len()));
        }
        let checked: Vec<Value> = remaining
            .iter()
            .zip(args)
            .map(|(ty, arg)| ty.validate(arg))
            .try_collect()?;
        let applied: Vec<Value> = self.applied.iter().cloned().chain(checked).collect();
        self.finish(&applied)
    }

    /// Expose as a [`Value::Function`]; calling it goes through [`Defun::call`].
    pub fn into_value(self) -> Value {
        let label = self.to_string();
        Value::Function(Function::native(label, move |args| self.call(args.to_vec())))
    }

    fn finish(&self, args: &[Value]) -> Result<Value> {
        let result = (self.implementation)(args);
        self.signature.result.validate(result)
    }

    fn arity_mismatch(&self, actual: usize) -> TypeError {
        TypeError::ArityMismatch {
            signature: self.to_string(),
            expected: self.remaining().len(),
            actual,
        }
    }
}

impl fmt::Display for Defun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_arrow(f, self.remaining(), &self.signature.result)
    }
}

impl fmt::Debug for Defun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defun")
            .field("signature", &self.to_string())
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

/// Wrap `implementation` with argument and result checks.
///
/// # Examples
///
/// ```
/// use runtype_core::{defun, int, Value};
///
/// let add = defun([int(), int(), int()], |args| {
///     let sum: i64 = args.iter().filter_map(Value::as_int).sum();
///     Value::Int(sum)
/// })?;
/// assert_eq!(add.to_string(), "λ :: int -> int -> int");
/// assert_eq!(add.call(vec![Value::Int(2), Value::Int(3)])?, Value::Int(5));
/// # Ok::<(), runtype_core::TypeError>(())
/// ```
pub fn defun<F>(signature: impl IntoIterator<Item = Type>, implementation: F) -> Result<Defun>
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    let signature = Signature::new(signature)?;
    debug!(%signature, "defining typed function");
    Ok(Defun {
        signature,
        implementation: Arc::new(implementation),
        applied: Vec::new(),
    })
}
