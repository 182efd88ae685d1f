//! A log sink that redacts classified records before writing them as JSON.
//!
//! The sink is responsible for:
//! - Building the logged representation from a redacted *copy* of the record.
//!   The caller's value is never modified.
//! - Writing one whole entry per emission, so concurrent callers never
//!   interleave partial JSON.
//! - Keeping logging failures away from the caller: [`LogSink::emit`] reports
//!   them on a diagnostic channel and never returns an error.

mod entry;
mod level;

use std::{
    borrow::Cow,
    fmt,
    io::{self, Write},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{redact, ClassifiedType, EmitError, RedactionPolicy};
use entry::{render_template, LogEntry};
pub use level::{Level, ParseLevelError};

type SharedWriter = Mutex<Box<dyn Write + Send>>;

/// Layout of each written entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Indented, multi-line JSON.
    #[default]
    Pretty,
    /// One JSON object per line.
    Compact,
}

/// Writes redacted records as structured JSON entries.
///
/// Entry layout:
///
/// ```json
/// {
///   "timestamp": "2024-05-01T12:00:00.000Z",
///   "level": "Information",
///   "category": "patients_api",
///   "message": "Patient created",
///   "template": "Patient created",
///   "fields": { "Name": "R*E*D*A*C*T*E*D" }
/// }
/// ```
pub struct LogSink {
    policy: Arc<RedactionPolicy>,
    category: Cow<'static, str>,
    format: JsonFormat,
    min_level: Level,
    output: SharedWriter,
    diagnostics: SharedWriter,
    failures: AtomicU64,
}

impl LogSink {
    pub fn builder(policy: Arc<RedactionPolicy>) -> LogSinkBuilder {
        LogSinkBuilder::new(policy)
    }

    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns true if entries at `level` are written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Number of emissions that failed and were reported.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Redacts `record` and writes it at `level` with `template`.
    ///
    /// Never fails: errors go to the diagnostic channel and are counted.
    pub fn emit<T>(&self, record: &T, level: Level, template: &str)
    where
        T: ClassifiedType + Clone + Serialize,
    {
        if let Err(err) = self.try_emit(record, level, template) {
            self.report(&err);
        }
    }

    /// Like [`LogSink::emit`], but returns the failure instead of reporting it.
    ///
    /// Nothing is written when redaction or serialization fails.
    pub fn try_emit<T>(&self, record: &T, level: Level, template: &str) -> Result<(), EmitError>
    where
        T: ClassifiedType + Clone + Serialize,
    {
        if !self.enabled(level) {
            return Ok(());
        }

        let redacted = redact(record.clone(), &self.policy)?;
        let fields = serde_json::to_value(&redacted)?;
        let entry = LogEntry {
            timestamp: now(),
            level,
            category: &self.category,
            message: render_template(template, &fields),
            template,
            fields,
        };
        let mut bytes = match self.format {
            JsonFormat::Pretty => serde_json::to_vec_pretty(&entry)?,
            JsonFormat::Compact => serde_json::to_vec(&entry)?,
        };
        bytes.push(b'\n');

        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        output.write_all(&bytes)?;
        output.flush()?;
        Ok(())
    }

    fn report(&self, err: &EmitError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        let mut diagnostics = self
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Best effort: there is nowhere left to report a failing diagnostic channel.
        let _ = writeln!(
            diagnostics,
            "{} [{}] failed to emit log entry: {err}",
            now(),
            self.category
        );
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("category", &self.category)
            .field("format", &self.format)
            .field("min_level", &self.min_level)
            .field("failures", &self.failure_count())
            .finish_non_exhaustive()
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builder for [`LogSink`]. Defaults: category `"default"`, pretty JSON,
/// minimum level `Trace`, entries on stdout, diagnostics on stderr.
pub struct LogSinkBuilder {
    policy: Arc<RedactionPolicy>,
    category: Cow<'static, str>,
    format: JsonFormat,
    min_level: Level,
    output: Option<Box<dyn Write + Send>>,
    diagnostics: Option<Box<dyn Write + Send>>,
}

impl LogSinkBuilder {
    fn new(policy: Arc<RedactionPolicy>) -> Self {
        Self {
            policy,
            category: Cow::Borrowed("default"),
            format: JsonFormat::default(),
            min_level: Level::Trace,
            output: None,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn category<C>(mut self, category: C) -> Self
    where
        C: Into<Cow<'static, str>>,
    {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn output<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.output = Some(Box::new(writer));
        self
    }

    #[must_use]
    pub fn diagnostics<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.diagnostics = Some(Box::new(writer));
        self
    }

    pub fn build(self) -> LogSink {
        LogSink {
            policy: self.policy,
            category: self.category,
            format: self.format,
            min_level: self.min_level,
            output: Mutex::new(self.output.unwrap_or_else(|| Box::new(io::stdout()))),
            diagnostics: Mutex::new(
                self.diagnostics
                    .unwrap_or_else(|| Box::new(io::stderr())),
            ),
            failures: AtomicU64::new(0),
        }
    }
}
