//! Data classifications: "what kind of sensitive data is this?"
//!
//! A [`DataClassification`] is a plain value naming a sensitivity category
//! inside a [`Taxonomy`]. Marker types implementing [`Classification`] carry one
//! as an associated constant so field annotations can name it at the type level
//! without storing anything per instance.

use std::{borrow::Cow, fmt};

/// A sensitivity category, unique within its taxonomy.
///
/// Equality and hashing are by value: two classifications built from the same
/// taxonomy and classification names are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataClassification {
    taxonomy_name: Cow<'static, str>,
    classification_name: Cow<'static, str>,
}

impl DataClassification {
    /// Data explicitly known not to be sensitive. Always resolves to a
    /// pass-through redactor.
    pub const NONE: Self = Self::from_static("", "None");

    /// Data whose sensitivity is not known.
    pub const UNKNOWN: Self = Self::from_static("", "Unknown");

    /// Defines a classification from runtime strings.
    pub fn new<T, C>(taxonomy_name: T, classification_name: C) -> Self
    where
        T: Into<Cow<'static, str>>,
        C: Into<Cow<'static, str>>,
    {
        Self {
            taxonomy_name: taxonomy_name.into(),
            classification_name: classification_name.into(),
        }
    }

    /// Defines a classification from static strings, usable in `const` items.
    pub const fn from_static(taxonomy_name: &'static str, classification_name: &'static str) -> Self {
        Self {
            taxonomy_name: Cow::Borrowed(taxonomy_name),
            classification_name: Cow::Borrowed(classification_name),
        }
    }

    pub fn taxonomy_name(&self) -> &str {
        &self.taxonomy_name
    }

    pub fn classification_name(&self) -> &str {
        &self.classification_name
    }
}

impl fmt::Display for DataClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.taxonomy_name.is_empty() {
            f.write_str(&self.classification_name)
        } else {
            write!(f, "{}:{}", self.taxonomy_name, self.classification_name)
        }
    }
}

/// A named grouping of classifications.
///
/// ```rust
/// use data_protection::{Classification, DataClassification, Taxonomy};
///
/// pub const CLINIC: Taxonomy = Taxonomy::new("clinic");
///
/// pub struct HealthRecord;
///
/// impl Classification for HealthRecord {
///     const CLASSIFICATION: DataClassification = CLINIC.classification("HealthRecord");
/// }
///
/// assert!(CLINIC.owns(&HealthRecord::CLASSIFICATION));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Taxonomy {
    name: &'static str,
}

impl Taxonomy {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Defines a classification of this taxonomy at compile time.
    pub const fn classification(&self, classification_name: &'static str) -> DataClassification {
        DataClassification::from_static(self.name, classification_name)
    }

    /// Defines a classification of this taxonomy from a runtime name.
    pub fn define<C>(&self, classification_name: C) -> DataClassification
    where
        C: Into<Cow<'static, str>>,
    {
        DataClassification::new(self.name, classification_name)
    }

    /// Returns true if `classification` belongs to this taxonomy.
    pub fn owns(&self, classification: &DataClassification) -> bool {
        classification.taxonomy_name() == self.name
    }
}

/// Marker trait for classification categories usable in field annotations.
///
/// Implement this for zero-sized marker types (unit structs) and name them in
/// `#[classified(Marker)]`.
pub trait Classification {
    /// The classification this marker stands for.
    const CLASSIFICATION: DataClassification;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Classification, DataClassification, Taxonomy};

    const CLINIC: Taxonomy = Taxonomy::new("clinic");

    struct HealthRecord;

    impl Classification for HealthRecord {
        const CLASSIFICATION: DataClassification = CLINIC.classification("HealthRecord");
    }

    #[test]
    fn equal_names_produce_equal_classifications() {
        let runtime = DataClassification::new("clinic".to_string(), "HealthRecord".to_string());
        assert_eq!(runtime, HealthRecord::CLASSIFICATION);
        assert_eq!(CLINIC.define("HealthRecord"), runtime);

        let mut set = HashSet::new();
        set.insert(runtime);
        assert!(set.contains(&HealthRecord::CLASSIFICATION));
    }

    #[test]
    fn different_taxonomies_do_not_collide() {
        let other = Taxonomy::new("billing").classification("HealthRecord");
        assert_ne!(other, HealthRecord::CLASSIFICATION);
        assert!(!CLINIC.owns(&other));
        assert!(CLINIC.owns(&HealthRecord::CLASSIFICATION));
    }

    #[test]
    fn display_includes_taxonomy() {
        assert_eq!(HealthRecord::CLASSIFICATION.to_string(), "clinic:HealthRecord");
        assert_eq!(DataClassification::NONE.to_string(), "None");
    }

    #[test]
    fn well_known_classifications_are_distinct() {
        assert_ne!(DataClassification::NONE, DataClassification::UNKNOWN);
        assert_eq!(DataClassification::UNKNOWN.classification_name(), "Unknown");
        assert_eq!(DataClassification::NONE.taxonomy_name(), "");
    }
}
