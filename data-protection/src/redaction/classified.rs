//! Domain layer: types that contain or are classified data.
//!
//! - [`ClassifiedValue`]: types that *are* classified data (`String`, `Cow<str>`)
//! - [`ClassifiedType`]: types that *contain* classified data (derived records,
//!   and `Option`/`Vec`/`Box`/map containers of them)
//! - [`ClassifiedRecord`]: derived records, with their static field table
//! - [`Classifiable`]: values a `#[classified(Marker)]` field may hold
//!
//! ## Field Handling
//!
//! | Annotation | Generated Code | Behavior |
//! |------------|----------------|----------|
//! | None | Pass through | Field copied verbatim |
//! | `#[classified]` | `ClassifiedType::redact_with` | Walk nested record |
//! | `#[classified(Marker)]` | `Classifiable::apply_classification` | Apply the policy's redactor |

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use super::redact::RedactionMapper;
use crate::{Classification, DataClassification};

// =============================================================================
// ClassifiedValue - Types that ARE classified data (leaf values)
// =============================================================================

/// String-like payloads that redactors operate on.
///
/// If the classified field type comes from another crate, define a local
/// newtype and implement `ClassifiedValue` and [`Classifiable`] for it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ClassifiedValue`",
    label = "this type cannot carry a classification directly",
    note = "classifications like `#[classified(PersonalData)]` are for string-like values",
    note = "if `{Self}` derives `Classified`, use bare `#[classified]` to walk into it"
)]
pub trait ClassifiedValue: Sized {
    /// Returns a read-only view of the value.
    fn as_str(&self) -> &str;
    /// Reconstructs the value from redacted text.
    #[must_use]
    fn from_redacted(redacted: String) -> Self;
}

impl ClassifiedValue for String {
    fn as_str(&self) -> &str {
        self.as_str()
    }

    fn from_redacted(redacted: String) -> Self {
        redacted
    }
}

impl ClassifiedValue for Cow<'_, str> {
    fn as_str(&self) -> &str {
        self.as_ref()
    }

    fn from_redacted(redacted: String) -> Self {
        Cow::Owned(redacted)
    }
}

// =============================================================================
// Classifiable - What a `#[classified(Marker)]` field may hold
// =============================================================================

/// Values that can have a classification applied, at any wrapper depth.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot carry a classification",
    label = "expected a string-like value or a container of them",
    note = "use bare `#[classified]` to walk into a type that derives `Classified`"
)]
#[doc(hidden)]
pub trait Classifiable: Sized {
    #[must_use]
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper;
}

impl Classifiable for String {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        mapper.map_value(&C::CLASSIFICATION, self)
    }
}

impl Classifiable for Cow<'_, str> {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        mapper.map_value(&C::CLASSIFICATION, self)
    }
}

impl<T: Classifiable> Classifiable for Option<T> {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        self.map(|value| value.apply_classification::<C, M>(mapper))
    }
}

impl<T: Classifiable> Classifiable for Vec<T> {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        self.into_iter()
            .map(|value| value.apply_classification::<C, M>(mapper))
            .collect()
    }
}

impl<T: Classifiable> Classifiable for Box<T> {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        Box::new((*self).apply_classification::<C, M>(mapper))
    }
}

impl<K: Ord, V: Classifiable> Classifiable for BTreeMap<K, V> {
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        self.into_iter()
            .map(|(k, v)| (k, v.apply_classification::<C, M>(mapper)))
            .collect()
    }
}

impl<K, V, S> Classifiable for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Classifiable,
    S: BuildHasher + Clone,
{
    fn apply_classification<C, M>(self, mapper: &M) -> Self
    where
        C: Classification,
        M: RedactionMapper,
    {
        let mut result = HashMap::with_hasher(self.hasher().clone());
        result.extend(
            self.into_iter()
                .map(|(k, v)| (k, v.apply_classification::<C, M>(mapper))),
        );
        result
    }
}

// =============================================================================
// ClassifiedType - Types that CONTAIN classified data
// =============================================================================

/// A type that contains classified data and can be traversed for redaction.
///
/// Implemented by `#[derive(Classified)]`. Traversal consumes the value and
/// returns a redacted copy; callers that must keep the original clone first.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ClassifiedType`",
    label = "this type cannot be walked for classified data",
    note = "use `#[derive(Classified)]` on the type definition",
    note = "or use `#[classified(Marker)]` if this is a string-like leaf value"
)]
pub trait ClassifiedType: Sized {
    /// Applies redaction to this value using the provided mapper.
    #[must_use]
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self;
}

impl<T: ClassifiedType> ClassifiedType for Option<T> {
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self {
        self.map(|value| value.redact_with(mapper))
    }
}

impl<T: ClassifiedType> ClassifiedType for Vec<T> {
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self {
        self.into_iter()
            .map(|value| value.redact_with(mapper))
            .collect()
    }
}

impl<T: ClassifiedType> ClassifiedType for Box<T> {
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self {
        Box::new((*self).redact_with(mapper))
    }
}

impl<K: Ord, V: ClassifiedType> ClassifiedType for BTreeMap<K, V> {
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self {
        self.into_iter()
            .map(|(k, v)| (k, v.redact_with(mapper)))
            .collect()
    }
}

impl<K, V, S> ClassifiedType for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: ClassifiedType,
    S: BuildHasher + Clone,
{
    fn redact_with<M: RedactionMapper>(self, mapper: &M) -> Self {
        let mut result = HashMap::with_hasher(self.hasher().clone());
        result.extend(self.into_iter().map(|(k, v)| (k, v.redact_with(mapper))));
        result
    }
}

// =============================================================================
// ClassifiedRecord - Static field metadata
// =============================================================================

/// Associates a record field with the classification declared on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldClassification {
    field: &'static str,
    classification: DataClassification,
}

impl FieldClassification {
    pub const fn new(field: &'static str, classification: DataClassification) -> Self {
        Self {
            field,
            classification,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn classification(&self) -> &DataClassification {
        &self.classification
    }
}

/// A record type with field classifications declared at its definition site.
///
/// The table is a `'static` slice generated once per type; inspecting it costs
/// nothing per instance.
pub trait ClassifiedRecord: ClassifiedType {
    /// The record's type name.
    const RECORD_NAME: &'static str;

    /// Directly classified fields, in declaration order. Fields walked with a
    /// bare `#[classified]` are described by their own type's table.
    fn field_classifications() -> &'static [FieldClassification];
}

/// Returns the classified fields of `T`, in declaration order.
pub fn classifications_of<T: ClassifiedRecord>() -> &'static [FieldClassification] {
    T::field_classifications()
}
