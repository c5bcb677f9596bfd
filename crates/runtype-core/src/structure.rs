//! Structural record types
//!
//! A struct definition maps field names to types. Checking a value against it
//! enforces exact membership:
//!
//! 1. The value must be record-like (`Value::Record` or `Value::Map`).
//! 2. Every declared field, in declaration order, must satisfy its type. An
//!    absent field resolves to `Value::Null`, so `optional(T)` fields may be
//!    omitted.
//! 3. Every field of the value, in the value's order, must be declared.
//!
//! The first violation wins. A field type that plainly rejects its value is
//! reported against the field; a descriptive failure raised inside the field
//! type (a nested struct's own field, a list element) propagates unchanged.
//! A non-record value is a plain rejection too, so a struct used as a field
//! type reports the outer field, while validating it directly reports
//! [`TypeError::NotStruct`].

use tracing::debug;

use crate::render::Renderer;
use crate::types::{typedef_checked, Type};
use crate::value::Value;
use crate::{Result, TypeError};

/// Name reported for structs defined without one.
pub const ANONYMOUS: &str = "anonymous";

/// Builder for struct types.
#[derive(Debug, Clone)]
pub struct StructDef {
    name: Option<String>,
    fields: Vec<(String, Type)>,
    renderer: Renderer,
}

impl StructDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Vec::new(),
            renderer: Renderer::default(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: None,
            fields: Vec::new(),
            renderer: Renderer::default(),
        }
    }

    /// Declare a field. Re-declaring a field replaces its type in place.
    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = ty,
            None => self.fields.push((name, ty)),
        }
        self
    }

    /// Renderer for values quoted in this struct's failures.
    pub fn renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// The reported name, `anonymous` when none was given.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn build(self) -> Type {
        let name = self.name().to_string();
        debug!(structure = %name, fields = self.fields.len(), "defining struct");
        let renderer = self.renderer.clone();
        let structure = name.clone();
        let reporter = renderer.clone();
        typedef_checked(name, move |value| self.check(value))
            .with_renderer(renderer)
            .with_mismatch(move |value| TypeError::NotStruct {
                structure: structure.clone(),
                value: reporter.render(value),
                kind: value.kind(),
            })
    }

    fn check(&self, value: &Value) -> Result<bool> {
        let Some(mut entries) = value.entries() else {
            return Ok(false);
        };

        self.fields
            .iter()
            .try_for_each(|(field, ty)| self.check_field(field, ty, value.get(field)))?;

        match entries.find(|(key, _)| !self.declares(key)) {
            Some((field, _)) => Err(TypeError::UnexpectedField {
                structure: self.name().to_string(),
                field: field.to_string(),
            }),
            None => Ok(true),
        }
    }

    fn check_field(&self, field: &str, ty: &Type, resolved: Option<&Value>) -> Result<()> {
        match resolved {
            None | Some(Value::Null) => {
                if ty.check(&Value::Null)? {
                    Ok(())
                } else {
                    Err(TypeError::MissingField {
                        structure: self.name().to_string(),
                        field: field.to_string(),
                        expected: ty.name().to_string(),
                    })
                }
            }
            Some(present) => {
                if ty.check(present)? {
                    Ok(())
                } else {
                    Err(TypeError::FieldMismatch {
                        structure: self.name().to_string(),
                        field: field.to_string(),
                        kind: present.kind(),
                        expected: ty.name().to_string(),
                    })
                }
            }
        }
    }

    fn declares(&self, key: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == key)
    }
}

impl From<StructDef> for Type {
    fn from(def: StructDef) -> Self {
        def.build()
    }
}

/// Define a struct type from a name (or `None` for anonymous) and ordered
/// field definitions.
///
/// # Examples
///
/// ```
/// use runtype_core::{int, optional, string, structure, Record, Value};
///
/// let point = structure(Some("Point"), [("x", int()), ("label", optional(string()))]);
/// assert!(point.validate(Value::from(Record::new().with("x", 1))).is_ok());
/// ```
pub fn structure<K, I>(name: Option<&str>, fields: I) -> Type
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Type)>,
{
    let def = name.map_or_else(StructDef::anonymous, StructDef::named);
    fields
        .into_iter()
        .fold(def, |def, (field, ty)| def.field(field, ty))
        .build()
}
