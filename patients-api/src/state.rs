use std::sync::Arc;

use data_protection::LogSink;

/// Shared request-handling state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub sink: Arc<LogSink>,
}

impl AppState {
    pub fn new(sink: LogSink) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}
