//! `{{ path }}` placeholder substitution.

use crate::error::{TranslateError, TranslateResult};
use crate::path::walk;
use serde_json::{Map, Number, Value};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Records which parameter paths a single translation consumed.
///
/// The recorded object keeps the nesting of the parameters, holding only
/// the leaves that were actually reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsedParameters {
    used: Map<String, Value>,
}

impl UsedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a top-level parameter as consumed.
    pub fn record_value(&mut self, key: &str, value: &Value) {
        self.used.insert(key.to_string(), value.clone());
    }

    /// Records every segment of `segments` reached inside `params`.
    pub fn record_path(&mut self, params: &Value, segments: &[&str]) {
        if let Value::Object(source) = params {
            record(&mut self.used, source, segments);
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.used
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.used)
    }
}

fn record(used: &mut Map<String, Value>, source: &Map<String, Value>, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let Some(value) = source.get(*first) else {
        return;
    };

    match value {
        Value::Object(inner) if !rest.is_empty() => {
            let slot = used
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(slot) = slot {
                record(slot, inner, rest);
            }
        },
        other => {
            used.insert(first.to_string(), other.clone());
        },
    }
}

/// Replaces every `{{ path }}` in `template` with the parameter it names.
///
/// Substitution is a single pass; inserted values are never rescanned. A
/// `{{` without a matching `}}` on the same line is left as is.
pub fn interpolate(
    template: &str,
    params: &Value,
    used: &mut UsedParameters,
) -> TranslateResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let inner_start = start + OPEN.len();
        let after_open = &rest[inner_start..];

        match after_open.find(CLOSE) {
            Some(end) if !after_open[..end].contains(['\n', '\r']) => {
                output.push_str(&rest[..start]);
                let path = after_open[..end].trim();
                output.push_str(&substitute(path, params, used)?);
                rest = &after_open[end + CLOSE.len()..];
            },
            Some(_) => {
                output.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            },
            None => break,
        }
    }

    output.push_str(rest);
    Ok(output)
}

fn substitute(path: &str, params: &Value, used: &mut UsedParameters) -> TranslateResult<String> {
    let segments: Vec<&str> = path.split('.').collect();

    let value = walk(params, segments.iter().copied()).map_err(|_| {
        TranslateError::ParameterNotFound {
            path: path.to_string(),
        }
    })?;

    used.record_path(params, &segments);

    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(render_number(number)),
        other => Err(TranslateError::InvalidParameterValue {
            path: path.to_string(),
            value: other.clone(),
        }),
    }
}

// Integral values below this bound print without an exponent.
const MAX_PLAIN_INTEGRAL: f64 = 1e21;

/// Integral floats print without a fractional part, so `1.0` reads `1`.
fn render_number(number: &Number) -> String {
    if number.is_f64()
        && let Some(value) = number.as_f64()
        && value.fract() == 0.0
        && value.abs() < MAX_PLAIN_INTEGRAL
    {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", value);
    }

    number.to_string()
}
