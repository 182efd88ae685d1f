//! Adapters for emitting redacted records through `slog`.
//!
//! This module connects [`ClassifiedType`] with `slog` by providing a
//! `slog::Value` that serializes the redacted copy of a record as structured JSON
//! via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from a policy-redacted copy,
//!   never from the original value.
//! - Avoiding fallible logging APIs: redaction and serialization failures are
//!   represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or define redaction policy.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{redact, ClassifiedType, RedactionPolicy};

/// Logged in place of a record whose redaction failed.
pub const REDACTION_FAILED: &str = "Failed to redact value";

/// Logged in place of a record whose redacted copy could not be serialized.
pub const SERIALIZATION_FAILED: &str = "Failed to serialize redacted value";

/// A `slog::Value` that emits an owned redacted payload as structured JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts records into a `slog::Value` that logs their redacted form as JSON.
///
/// ```ignore
/// use data_protection::slog::IntoRedactedJson;
///
/// info!(logger, "patient created"; "patient" => patient.clone().into_redacted_json(&policy));
/// ```
pub trait IntoRedactedJson: ClassifiedType + Serialize {
    /// Redacts `self` with `policy` and returns a `slog::Value`.
    ///
    /// If redaction fails the value is [`REDACTION_FAILED`]; if the redacted copy
    /// cannot be converted into JSON it is [`SERIALIZATION_FAILED`].
    fn into_redacted_json(self, policy: &RedactionPolicy) -> RedactedJson {
        let json_value = match redact(self, policy) {
            Ok(redacted) => serde_json::to_value(redacted)
                .unwrap_or_else(|_| JsonValue::String(SERIALIZATION_FAILED.to_string())),
            Err(_) => JsonValue::String(REDACTION_FAILED.to_string()),
        };
        RedactedJson::new(json_value)
    }
}

impl<T> IntoRedactedJson for T where T: ClassifiedType + Serialize {}
