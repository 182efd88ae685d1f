use data_protection::Classified;
use serde::{Deserialize, Serialize};

use crate::taxonomy::{PersonalData, SensitiveData};

/// A patient as submitted to `POST /patients`.
#[derive(Clone, PartialEq, Eq, Classified, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Patient {
    #[classified(PersonalData)]
    pub name: String,
    #[classified(PersonalData)]
    pub email: String,
    #[classified(SensitiveData)]
    pub social_security_number: String,
}

#[cfg(test)]
mod tests {
    use data_protection::{classifications_of, Classification};

    use super::Patient;
    use crate::taxonomy::{PersonalData, SensitiveData};

    #[test]
    fn fields_carry_their_classifications() {
        let fields = classifications_of::<Patient>();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].field(), "name");
        assert_eq!(*fields[1].classification(), PersonalData::CLASSIFICATION);
        assert_eq!(fields[2].field(), "social_security_number");
        assert_eq!(*fields[2].classification(), SensitiveData::CLASSIFICATION);
    }

    #[test]
    fn wire_names_are_pascal_case() {
        let patient: Patient = serde_json::from_str(
            r#"{"Name":"Ada","Email":"ada@example.com","SocialSecurityNumber":"123-45-6789"}"#,
        )
        .unwrap();
        assert_eq!(patient.social_security_number, "123-45-6789");
    }
}
