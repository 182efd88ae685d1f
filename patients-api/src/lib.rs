//! HTTP service demonstrating classification-driven log redaction.
//!
//! `POST /patients` accepts a patient, logs it through a [`LogSink`] with
//! every classified field redacted, and returns it unredacted.
//!
//! [`LogSink`]: data_protection::LogSink

pub mod config;
pub mod patient;
pub mod routes;
pub mod state;
pub mod taxonomy;

pub use patient::Patient;
pub use routes::build_router;
pub use state::AppState;
