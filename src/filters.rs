//! Built-in, argument-less filters (`{{ name|upper }}`).

use serde_json::Value;

use crate::context::{self, ExecutionContext};
use crate::error::RenderError;

/// A built-in filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Upper,
    Lower,
    Length,
    Escape,
    Safe,
}

/// Registry of filter spellings.
pub const FILTERS: &[(Filter, &str)] = &[
    (Filter::Upper, "upper"),
    (Filter::Lower, "lower"),
    (Filter::Length, "length"),
    (Filter::Escape, "escape"),
    (Filter::Safe, "safe"),
];

impl Filter {
    /// Resolve a filter by name.
    pub fn from_name(name: &str) -> Option<Self> {
        FILTERS.iter().find(|(_, n)| *n == name).map(|(f, _)| *f)
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::Upper => "upper",
            Filter::Lower => "lower",
            Filter::Length => "length",
            Filter::Escape => "escape",
            Filter::Safe => "safe",
        }
    }

    /// Apply this filter to `value`.
    ///
    /// ## Errors
    /// `length` fails on numbers and booleans.
    pub fn apply(self, value: Value, ctx: &ExecutionContext) -> Result<Value, RenderError> {
        match self {
            Filter::Upper => Ok(Value::String(context::to_output(&value).to_uppercase())),
            Filter::Lower => Ok(Value::String(context::to_output(&value).to_lowercase())),
            Filter::Escape => Ok(Value::String(context::html_escape(&context::to_output(&value)))),
            Filter::Safe => Ok(value),
            Filter::Length => {
                let len = match &value {
                    Value::Null => 0,
                    Value::String(s) => s.chars().count(),
                    Value::Array(a) => a.len(),
                    Value::Object(o) => o.len(),
                    other => {
                        return Err(ctx.error(format!(
                            "filter 'length' cannot be applied to a {}",
                            context::type_name(other)
                        )));
                    }
                };
                Ok(Value::from(len))
            }
        }
    }
}
