//! Serializable policy configuration.
//!
//! Deserialize a [`PolicyConfig`] with any serde format and turn it into a
//! [`RedactionPolicy`] with [`RedactionPolicy::from_config`]. In TOML:
//!
//! ```toml
//! unresolved = "fail_closed"
//!
//! [fallback]
//! kind = "erase"
//!
//! [[redactors]]
//! taxonomy = "clinic"
//! classification = "PersonalData"
//! redactor = { kind = "keep_last", count = 4 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    DataClassification, ErasingRedactor, MaskingRedactor, NullRedactor, RedactionPolicy,
    Redactor, UnresolvedClassification,
};

/// A whole redaction policy as configuration data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default)]
    pub unresolved: UnresolvedClassification,
    #[serde(default)]
    pub fallback: Option<RedactorConfig>,
    #[serde(default)]
    pub redactors: Vec<RedactorEntry>,
}

/// One `classification -> redactor` registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedactorEntry {
    pub taxonomy: String,
    pub classification: String,
    pub redactor: RedactorConfig,
}

impl RedactorEntry {
    pub fn data_classification(&self) -> DataClassification {
        DataClassification::new(self.taxonomy.clone(), self.classification.clone())
    }
}

/// A redactor and its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum RedactorConfig {
    Erase {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Null,
    KeepFirst {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_char: Option<char>,
    },
    KeepLast {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_char: Option<char>,
    },
    MaskFirst {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_char: Option<char>,
    },
    MaskLast {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask_char: Option<char>,
    },
}

impl RedactorConfig {
    /// Builds the configured redactor.
    pub fn build(&self) -> Box<dyn Redactor> {
        use RedactorConfig::*;

        let masking = |redactor: MaskingRedactor, mask_char: Option<char>| -> Box<dyn Redactor> {
            match mask_char {
                Some(c) => Box::new(redactor.with_mask_char(c)),
                None => Box::new(redactor),
            }
        };

        match self {
            Erase { placeholder: None } => Box::new(ErasingRedactor::new()),
            Erase {
                placeholder: Some(placeholder),
            } => Box::new(ErasingRedactor::with_placeholder(placeholder.clone())),
            Null => Box::new(NullRedactor),
            KeepFirst { count, mask_char } => masking(MaskingRedactor::keep_first(*count), *mask_char),
            KeepLast { count, mask_char } => masking(MaskingRedactor::keep_last(*count), *mask_char),
            MaskFirst { count, mask_char } => masking(MaskingRedactor::mask_first(*count), *mask_char),
            MaskLast { count, mask_char } => masking(MaskingRedactor::mask_last(*count), *mask_char),
        }
    }
}

impl RedactionPolicy {
    /// Builds a policy from configuration. Later entries for the same
    /// classification replace earlier ones.
    pub fn from_config(config: &PolicyConfig) -> Self {
        let builder = config
            .redactors
            .iter()
            .fold(Self::builder(), |builder, entry| {
                builder.register_shared(entry.data_classification(), entry.redactor.build().into())
            })
            .on_unresolved(config.unresolved);

        match &config.fallback {
            Some(fallback) => builder.fallback_shared(fallback.build().into()),
            None => builder,
        }
        .build()
    }
}
