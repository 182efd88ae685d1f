//! Redactors, policies, traversal, and entrypoints.
//!
//! - **`classified`**: Domain layer - what is classified (`ClassifiedType`, `ClassifiedValue`)
//! - **`redactor`**: How a single value is redacted (`Redactor` implementations)
//! - **`policy`**: Which redactor handles which classification (`RedactionPolicy`)
//! - **`redact`**: Application layer - the redaction machinery (`RedactionMapper`, `redact`)
//!
//! Classifications live in `crate::classification`.

mod classified;
mod policy;
mod redact;
mod redactor;

pub use classified::{
    classifications_of, Classifiable, ClassifiedRecord, ClassifiedType, ClassifiedValue,
    FieldClassification,
};
pub use policy::{RedactionPolicy, RedactionPolicyBuilder, UnresolvedClassification};
pub use redact::{redact, PolicyMapper, Redactable, RedactionMapper};
pub use redactor::{ErasingRedactor, MaskingRedactor, NullRedactor, Redactor, ERASED_PLACEHOLDER};
