//! Classifications used by the patients service.

use data_protection::{Classification, DataClassification, Taxonomy};

pub const PATIENT_TAXONOMY: Taxonomy = Taxonomy::new("DataProtection");

/// Data that identifies a person: names, contact details.
#[derive(Debug, Clone, Copy)]
pub struct PersonalData;

impl Classification for PersonalData {
    const CLASSIFICATION: DataClassification = PATIENT_TAXONOMY.classification("PersonalData");
}

/// Data whose disclosure causes harm on its own: government identifiers.
#[derive(Debug, Clone, Copy)]
pub struct SensitiveData;

impl Classification for SensitiveData {
    const CLASSIFICATION: DataClassification = PATIENT_TAXONOMY.classification("SensitiveData");
}
