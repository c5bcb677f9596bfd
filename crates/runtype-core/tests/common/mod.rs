//! Common fixtures and relaxed clippy settings for runtype-core integration tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    dead_code
)]

use runtype_core::{int, list_of, optional, string, structure, Enumeration, Record, Type, Value};

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// `{a: int, b: option<string>}` without a name.
pub fn sample_struct() -> Type {
    structure(None, [("a", int()), ("b", optional(string()))])
}

/// A named user record with a nested list of tags.
pub fn user_struct() -> Type {
    structure(
        Some("User"),
        [
            ("id", int()),
            ("name", string()),
            ("tags", list_of(string())),
            ("nickname", optional(string())),
        ],
    )
}

pub fn user(id: i64, name: &str) -> Value {
    Value::from(
        Record::new()
            .with("id", id)
            .with("name", name)
            .with("tags", Vec::<Value>::new()),
    )
}

pub fn color() -> Enumeration {
    Enumeration::new("Color", ["red", "green", "blue"])
}
