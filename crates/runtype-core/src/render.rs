//! Value rendering for error messages
//!
//! Failures quote the offending value. How it is quoted is a pluggable
//! collaborator: a [`Renderer`] wraps any `Fn(&Value) -> String`. The default
//! renders compact JSON, bounded by a [`RenderConfig`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{Record, Value};

const ELLIPSIS: &str = "...";

// ═══════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Bounds for the default renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum rendered length in characters before truncation
    pub max_len: usize,
    /// Maximum list/map entries rendered per level
    pub max_items: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_len: 80,
            max_items: 16,
        }
    }
}

/// Errors raised while loading a [`RenderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse render config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid render config: {0}")]
    Invalid(String),
}

impl RenderConfig {
    /// Parse a config from TOML. Missing keys fall back to defaults.
    ///
    /// ```toml
    /// max_len = 120
    /// max_items = 8
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_len == 0 {
            return Err(ConfigError::Invalid("max_len must be at least 1".into()));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERER
// ═══════════════════════════════════════════════════════════════════════════

/// Shared value → text function used inside failure messages.
#[derive(Clone)]
pub struct Renderer(Arc<dyn Fn(&Value) -> String + Send + Sync>);

impl Renderer {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(render))
    }

    /// The default JSON renderer with custom bounds.
    pub fn from_config(config: RenderConfig) -> Self {
        Self::new(move |value| render_json(value, &config))
    }

    pub fn render(&self, value: &Value) -> String {
        (self.0)(value)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(RenderConfig::default())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer")
    }
}

fn render_json(value: &Value, config: &RenderConfig) -> String {
    let bounded = bound_items(value, config.max_items);
    let text = serde_json::to_string(&bounded).unwrap_or_else(|_| format!("{value:?}"));
    truncate(text, config.max_len)
}

/// Copy of `value` with at most `max_items` entries per collection.
fn bound_items(value: &Value, max_items: usize) -> Value {
    match value {
        Value::List(items) => {
            let mut bounded: Vec<Value> = items
                .iter()
                .take(max_items)
                .map(|item| bound_items(item, max_items))
                .collect();
            if items.len() > max_items {
                bounded.push(Value::from(ELLIPSIS));
            }
            Value::List(bounded)
        }
        Value::Map(_) | Value::Record(_) => {
            let entries: Vec<(&str, &Value)> = value.entries().into_iter().flatten().collect();
            let mut bounded: Record = entries
                .iter()
                .take(max_items)
                .map(|(key, item)| (*key, bound_items(item, max_items)))
                .collect();
            if entries.len() > max_items {
                bounded.insert(ELLIPSIS, ELLIPSIS);
            }
            Value::Record(bounded)
        }
        other => other.clone(),
    }
}

fn truncate(text: String, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text;
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push_str(ELLIPSIS);
    cut
}
