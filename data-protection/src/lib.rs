//! Classification-driven redaction for structured logs.
//!
//! This crate separates:
//! - **Classification**: what kind of sensitive data a field holds.
//! - **Policy**: how data of that classification is redacted.
//!
//! Field classifications are declared once, at the record's definition site,
//! with `#[derive(Classified)]`. The [`LogSink`] walks a *copy* of each record,
//! applies the policy's redactor to every classified field and writes the result
//! as one structured JSON entry. The caller's value is never modified.
//!
//! Key rules:
//! - Use `#[classified(Marker)]` for string-like leaf values.
//! - Use `#[classified]` for nested `Classified` types.
//! - Unannotated fields pass through unchanged.
//! - `Debug` prints `"[CLASSIFIED]"` for classified fields, except under
//!   `cfg(test)` or the `testing` feature.
//! - A classification with no redactor passes through by default (fail-open);
//!   configure [`UnresolvedClassification::FailClosed`] to refuse the entry.
//!
//! What this crate does:
//! - defines classifications, taxonomies and the [`Classification`] marker trait
//! - defines redactors, redaction policies and the [`redact`] entrypoint
//! - writes redacted JSON log entries ([`LogSink`], feature `sink`)
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - configure a logging framework
//! - validate your policy choices
//!
//! The `Classified` derive macro lives in `data-protection-derive` and is
//! re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use data_protection_derive::Classified;

// Module declarations
mod classification;
#[cfg(feature = "sink")]
mod config;
mod error;
mod redaction;
#[cfg(feature = "sink")]
mod sink;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use classification::{Classification, DataClassification, Taxonomy};
#[cfg(feature = "sink")]
pub use config::{PolicyConfig, RedactorConfig, RedactorEntry};
#[cfg(feature = "sink")]
pub use error::EmitError;
pub use error::RedactionError;
pub use redaction::{
    classifications_of, redact, ClassifiedRecord, ClassifiedType, ClassifiedValue,
    ErasingRedactor, FieldClassification, MaskingRedactor, NullRedactor, PolicyMapper,
    Redactable, RedactionPolicy, RedactionPolicyBuilder, Redactor, UnresolvedClassification,
    ERASED_PLACEHOLDER,
};
#[doc(hidden)]
pub use redaction::{Classifiable, RedactionMapper};
#[cfg(feature = "sink")]
pub use sink::{JsonFormat, Level, LogSink, LogSinkBuilder, ParseLevelError};
