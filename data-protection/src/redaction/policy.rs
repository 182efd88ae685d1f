//! Redaction policy: which redactor handles which classification.
//!
//! A policy is assembled once at startup with [`RedactionPolicyBuilder`] and is
//! read-only afterwards. Lookups are a single hash map access.

use std::{collections::HashMap, sync::Arc};

use super::redactor::{NullRedactor, Redactor};
use crate::{Classification, DataClassification, RedactionError};

static NULL_REDACTOR: NullRedactor = NullRedactor;

/// What happens to a classified value whose classification has neither a
/// registered redactor nor a fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "sink",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum UnresolvedClassification {
    /// Pass the value through unredacted so unrelated logging keeps working.
    #[default]
    FailOpen,
    /// Refuse to produce a redacted copy; the log entry is not written.
    FailClosed,
}

/// Maps classifications to the redactor that handles them.
#[derive(Clone, Debug, Default)]
pub struct RedactionPolicy {
    redactors: HashMap<DataClassification, Arc<dyn Redactor>>,
    fallback: Option<Arc<dyn Redactor>>,
    unresolved: UnresolvedClassification,
}

impl RedactionPolicy {
    pub fn builder() -> RedactionPolicyBuilder {
        RedactionPolicyBuilder::default()
    }

    /// Returns the redactor for `classification`.
    ///
    /// Resolution order: an explicit registration, then the pass-through
    /// redactor for [`DataClassification::NONE`], then the fallback redactor.
    pub fn resolve(&self, classification: &DataClassification) -> Result<&dyn Redactor, RedactionError> {
        if let Some(redactor) = self.redactors.get(classification) {
            return Ok(redactor.as_ref());
        }
        if *classification == DataClassification::NONE {
            return Ok(&NULL_REDACTOR);
        }
        self.fallback
            .as_deref()
            .ok_or_else(|| RedactionError::UnknownClassification(classification.clone()))
    }

    pub fn is_registered(&self, classification: &DataClassification) -> bool {
        self.redactors.contains_key(classification)
    }

    pub fn unresolved(&self) -> UnresolvedClassification {
        self.unresolved
    }

    /// Number of explicitly registered classifications.
    pub fn len(&self) -> usize {
        self.redactors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redactors.is_empty()
    }
}

/// Startup-time builder for [`RedactionPolicy`].
///
/// Registering the same classification twice keeps the last redactor.
#[derive(Debug, Default)]
pub struct RedactionPolicyBuilder {
    redactors: HashMap<DataClassification, Arc<dyn Redactor>>,
    fallback: Option<Arc<dyn Redactor>>,
    unresolved: UnresolvedClassification,
}

impl RedactionPolicyBuilder {
    #[must_use]
    pub fn register<R>(self, classification: DataClassification, redactor: R) -> Self
    where
        R: Redactor + 'static,
    {
        self.register_shared(classification, Arc::new(redactor))
    }

    /// Registers a redactor instance that is shared with other registrations.
    #[must_use]
    pub fn register_shared(
        mut self,
        classification: DataClassification,
        redactor: Arc<dyn Redactor>,
    ) -> Self {
        self.redactors.insert(classification, redactor);
        self
    }

    /// Registers a redactor for the classification carried by marker `C`.
    #[must_use]
    pub fn register_for<C, R>(self, redactor: R) -> Self
    where
        C: Classification,
        R: Redactor + 'static,
    {
        self.register(C::CLASSIFICATION, redactor)
    }

    /// Sets the redactor used for classifications without a registration.
    #[must_use]
    pub fn fallback<R>(self, redactor: R) -> Self
    where
        R: Redactor + 'static,
    {
        self.fallback_shared(Arc::new(redactor))
    }

    #[must_use]
    pub fn fallback_shared(mut self, redactor: Arc<dyn Redactor>) -> Self {
        self.fallback = Some(redactor);
        self
    }

    #[must_use]
    pub fn on_unresolved(mut self, behavior: UnresolvedClassification) -> Self {
        self.unresolved = behavior;
        self
    }

    pub fn build(self) -> RedactionPolicy {
        RedactionPolicy {
            redactors: self.redactors,
            fallback: self.fallback,
            unresolved: self.unresolved,
        }
    }
}
