//! Shared helpers for integration tests.

#![allow(dead_code)]

use propex_validator::{FieldContext, Rule, Validator};
use serde_json::{Map, Value};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn char_len(value: &Value) -> usize {
    value.as_str().map_or(0, |s| s.chars().count())
}

/// Validator with a `name` rule and a `nested` sub-validator.
pub fn sample_validator() -> Validator {
    let nested = Validator::builder()
        .rule(
            "something",
            Rule::from_test(|value| (char_len(value) < 4).then(|| "no nonono".to_owned())),
        )
        .build();

    Validator::builder()
        .rule(
            "name",
            Rule::new()
                .with_test(|value: &Value| {
                    (char_len(value) < 4).then(|| {
                        format!(
                            "Dude, {}, your name is too short!",
                            value.as_str().unwrap_or_default()
                        )
                    })
                })
                .with_set(|ctx: &FieldContext<'_>, valid: &mut Map<String, Value>| {
                    let name = ctx.raw_value.as_str().unwrap_or_default();
                    valid.insert(
                        ctx.field_name.to_owned(),
                        Value::String(format!("{name} is a suitable name.")),
                    );
                }),
        )
        .nested("nested", nested)
        .build()
}

/// Validator that rejects every `name` except "roojoo".
pub fn kitty_validator() -> Validator {
    Validator::builder()
        .rule(
            "name",
            Rule::from_test(|value| (value != "roojoo").then(|| "Booooo. Bad kitty.".to_owned())),
        )
        .build()
}
