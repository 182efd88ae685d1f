//! Application layer: applying a policy to a traversable value.

use std::cell::RefCell;

use super::{
    classified::{ClassifiedType, ClassifiedValue},
    policy::{RedactionPolicy, UnresolvedClassification},
};
use crate::{DataClassification, RedactionError};

/// Receives every classified leaf value during traversal.
///
/// Derived `ClassifiedType` impls call into a mapper; they never look at the
/// policy themselves.
pub trait RedactionMapper {
    /// Maps one classified value to its redacted form.
    fn map_value<V: ClassifiedValue>(&self, classification: &DataClassification, value: V) -> V;
}

/// A mapper that redacts with a [`RedactionPolicy`] and remembers the first
/// failure.
///
/// A failing value is replaced with an empty string, never left unredacted.
#[derive(Debug)]
pub struct PolicyMapper<'a> {
    policy: &'a RedactionPolicy,
    failure: RefCell<Option<RedactionError>>,
}

impl<'a> PolicyMapper<'a> {
    pub fn new(policy: &'a RedactionPolicy) -> Self {
        Self {
            policy,
            failure: RefCell::new(None),
        }
    }

    /// Consumes the mapper, returning the first failure seen during traversal.
    pub fn finish(self) -> Result<(), RedactionError> {
        self.failure.into_inner().map_or(Ok(()), Err)
    }

    fn fail(&self, err: RedactionError) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}

impl RedactionMapper for PolicyMapper<'_> {
    fn map_value<V: ClassifiedValue>(&self, classification: &DataClassification, value: V) -> V {
        let redactor = match self.policy.resolve(classification) {
            Ok(redactor) => redactor,
            Err(err) => {
                return match self.policy.unresolved() {
                    UnresolvedClassification::FailOpen => value,
                    UnresolvedClassification::FailClosed => {
                        self.fail(err);
                        V::from_redacted(String::new())
                    }
                };
            }
        };

        let input = value.as_str();
        let max_len = redactor.max_output_len(input.chars().count());
        let redacted = redactor.redact(input);
        let actual_len = redacted.chars().count();
        if actual_len > max_len {
            self.fail(RedactionError::InvariantViolation {
                classification: classification.clone(),
                max_len,
                actual_len,
            });
            return V::from_redacted(String::new());
        }
        V::from_redacted(redacted)
    }
}

/// Redacts `value` with `policy`, returning the redacted copy.
///
/// Fails if a classification is unresolved under a fail-closed policy, or if a
/// redactor breaks its declared length bound.
pub fn redact<T: ClassifiedType>(value: T, policy: &RedactionPolicy) -> Result<T, RedactionError> {
    let mapper = PolicyMapper::new(policy);
    let redacted = value.redact_with(&mapper);
    mapper.finish().map(|()| redacted)
}

/// Public entrypoint for redaction on traversable types.
///
/// Blanket-implemented for every [`ClassifiedType`].
pub trait Redactable: ClassifiedType {
    /// Consumes `self` and returns a redacted copy.
    fn redact(self, policy: &RedactionPolicy) -> Result<Self, RedactionError> {
        redact(self, policy)
    }
}

impl<T> Redactable for T where T: ClassifiedType {}
