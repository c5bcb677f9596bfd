//! Closed enumerations with exhaustive matching
//!
//! An [`Enumeration`] is a named, ordered set of string members. It acts as a
//! type (membership check) and as a dispatcher: [`Enumeration::match_value`]
//! refuses any action table that does not cover every member, whichever
//! member is actually being matched.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use itertools::{Either, Itertools};
use tracing::debug;

use crate::render::Renderer;
use crate::types::{typedef, Type};
use crate::value::Value;
use crate::{Result, TypeError};

// ============================================================================
// ACTION TABLES
// ============================================================================

/// A lookup from enum member to handler.
///
/// Handlers are whatever the caller wants: plain values, closures, boxed
/// trait objects.
pub trait ActionTable<A> {
    fn action(&self, member: &str) -> Option<&A>;
}

impl<K, A, S> ActionTable<A> for HashMap<K, A, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn action(&self, member: &str) -> Option<&A> {
        self.get(member)
    }
}

impl<K, A> ActionTable<A> for BTreeMap<K, A>
where
    K: Borrow<str> + Ord,
{
    fn action(&self, member: &str) -> Option<&A> {
        self.get(member)
    }
}

impl<K, A, S> ActionTable<A> for im::HashMap<K, A, S>
where
    K: Borrow<str> + Hash + Eq + Clone,
    A: Clone,
    S: BuildHasher,
{
    fn action(&self, member: &str) -> Option<&A> {
        self.get(member)
    }
}

impl<K: AsRef<str>, A> ActionTable<A> for [(K, A)] {
    fn action(&self, member: &str) -> Option<&A> {
        self.iter()
            .find(|(key, _)| key.as_ref() == member)
            .map(|(_, action)| action)
    }
}

impl<K: AsRef<str>, A, const N: usize> ActionTable<A> for [(K, A); N] {
    fn action(&self, member: &str) -> Option<&A> {
        self.as_slice().action(member)
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// A named closed set of string members.
#[derive(Debug, Clone)]
pub struct Enumeration {
    name: String,
    members: Vec<String>,
    renderer: Renderer,
}

impl Enumeration {
    /// Declare an enumeration. Duplicate members collapse onto their first
    /// occurrence.
    pub fn new<I, M>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).unique().collect(),
            renderer: Renderer::default(),
        }
    }

    pub fn with_renderer(self, renderer: Renderer) -> Self {
        Self { renderer, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, value: &Value) -> bool {
        value
            .as_str()
            .is_some_and(|candidate| self.members.iter().any(|member| member == candidate))
    }

    /// This enumeration as a [`Type`].
    ///
    /// Validating through it reports [`TypeError::NotEnumMember`]; as a struct
    /// field or collection element a non-member is a plain rejection.
    pub fn ty(&self) -> Type {
        let this = self.clone();
        let reporter = self.clone();
        typedef(self.name.clone(), move |value| this.contains(value))
            .with_renderer(self.renderer.clone())
            .with_mismatch(move |value| reporter.not_member(value))
    }

    /// Validating identity over membership.
    pub fn validate(&self, value: Value) -> Result<Value> {
        if self.contains(&value) {
            Ok(value)
        } else {
            Err(self.not_member(&value))
        }
    }

    /// Declared members with no entry in `table`, in declaration order.
    pub fn missing_cases<A, T>(&self, table: &T) -> Vec<String>
    where
        T: ActionTable<A> + ?Sized,
    {
        self.members
            .iter()
            .filter(|member| table.action(member).is_none())
            .cloned()
            .collect()
    }

    /// Exhaustive dispatch.
    ///
    /// The table must cover every member (checked on every call, before
    /// `value` is looked at); then `value` must be a member; then its entry is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use runtype_core::{Enumeration, Value};
    ///
    /// let color = Enumeration::new("Color", ["red", "green", "blue"]);
    /// let table = [("red", 1), ("green", 2), ("blue", 3)];
    /// assert_eq!(color.match_value(&Value::from("green"), &table), Ok(&2));
    /// ```
    pub fn match_value<'t, A, T>(&self, value: &Value, table: &'t T) -> Result<&'t A>
    where
        T: ActionTable<A> + ?Sized,
    {
        let (resolved, missing): (Vec<(&str, &'t A)>, Vec<String>) =
            self.members.iter().partition_map(|member| match table.action(member) {
                Some(action) => Either::Left((member.as_str(), action)),
                None => Either::Right(member.clone()),
            });
        if !missing.is_empty() {
            debug!(enumeration = %self.name, ?missing, "incomplete match");
            return Err(TypeError::IncompleteMatch {
                enumeration: self.name.clone(),
                missing,
            });
        }

        let candidate = value.as_str();
        resolved
            .into_iter()
            .find(|(member, _)| candidate == Some(*member))
            .inspect(|(member, _)| debug!(enumeration = %self.name, member, "dispatching"))
            .map(|(_, action)| action)
            .ok_or_else(|| self.not_member(value))
    }

    fn not_member(&self, value: &Value) -> TypeError {
        TypeError::NotEnumMember {
            enumeration: self.name.clone(),
            value: value
                .as_str()
                .map_or_else(|| self.renderer.render(value), str::to_string),
        }
    }
}

impl From<&Enumeration> for Type {
    fn from(enumeration: &Enumeration) -> Self {
        enumeration.ty()
    }
}
