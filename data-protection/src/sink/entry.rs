//! The structured entry written per emission, and message template rendering.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::Level;

#[derive(Debug, Serialize)]
pub(crate) struct LogEntry<'a> {
    pub(crate) timestamp: String,
    pub(crate) level: Level,
    pub(crate) category: &'a str,
    pub(crate) message: String,
    pub(crate) template: &'a str,
    pub(crate) fields: JsonValue,
}

/// Renders `template`, replacing `{name}` holes with values from `fields`.
///
/// Holes may use dotted paths into nested objects (`{address.city}`). Holes
/// that do not resolve are kept verbatim. `{{` and `}}` produce literal braces.
pub(crate) fn render_template(template: &str, fields: &JsonValue) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if let (Some(hole), Some(end)) = (tail.strip_prefix('{'), tail.find('}')) {
            let name = &hole[..end - 1];
            match lookup(fields, name) {
                Some(JsonValue::String(value)) => out.push_str(value),
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str(&tail[..=end]),
            }
            rest = &tail[end + 1..];
        } else {
            // lone brace
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(fields: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    if path.is_empty() {
        return None;
    }
    path.split('.')
        .try_fold(fields, |value, segment| value.as_object()?.get(segment))
}
