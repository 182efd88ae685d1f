//! Command-line configuration and redaction policy loading.

use std::{fs, net::SocketAddr, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use data_protection::{
    ErasingRedactor, JsonFormat, Level, PolicyConfig, RedactionPolicy,
};

use crate::taxonomy::{PersonalData, SensitiveData};

/// HTTP service that logs created patients with their personal data redacted
#[derive(Parser, Debug)]
#[command(name = "patients-api")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000", env = "PATIENTS_API_BIND")]
    pub bind: SocketAddr,

    /// TOML redaction policy; both patient classifications are erased when omitted
    #[arg(long, env = "PATIENTS_API_POLICY")]
    pub policy: Option<PathBuf>,

    /// Layout of redacted log entries
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Minimum level of redacted log entries
    #[arg(long, default_value = "information", env = "PATIENTS_API_SINK_LEVEL")]
    pub sink_level: Level,

    /// Filter directive for service diagnostics (e.g. info, patients_api=debug)
    #[arg(long, env = "PATIENTS_API_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl From<LogFormat> for JsonFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => JsonFormat::Pretty,
            LogFormat::Compact => JsonFormat::Compact,
        }
    }
}

/// Erases every patient classification.
pub fn default_policy() -> RedactionPolicy {
    RedactionPolicy::builder()
        .register_for::<PersonalData, _>(ErasingRedactor::new())
        .register_for::<SensitiveData, _>(ErasingRedactor::new())
        .build()
}

/// Loads the policy at `path`, or the default policy when there is none.
pub fn load_policy(path: Option<&Path>) -> Result<RedactionPolicy> {
    let Some(path) = path else {
        return Ok(default_policy());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    let config: PolicyConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse policy file {}", path.display()))?;
    Ok(RedactionPolicy::from_config(&config))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;
    use data_protection::{Classification, Level, UnresolvedClassification};

    use super::{load_policy, Args, LogFormat};
    use crate::taxonomy::{PersonalData, SensitiveData};

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["patients-api"]);
        assert_eq!(args.bind.to_string(), "127.0.0.1:5000");
        assert_eq!(args.log_format, LogFormat::Pretty);
        assert_eq!(args.sink_level, Level::Information);
        assert!(args.policy.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "patients-api",
            "--bind",
            "0.0.0.0:8080",
            "--log-format",
            "compact",
            "--sink-level",
            "warn",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.log_format, LogFormat::Compact);
        assert_eq!(args.sink_level, Level::Warning);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_default_policy_erases_both_classifications() {
        let policy = load_policy(None).unwrap();
        for classification in [PersonalData::CLASSIFICATION, SensitiveData::CLASSIFICATION] {
            let redactor = policy.resolve(&classification).unwrap();
            assert_eq!(redactor.redact("x"), "R*E*D*A*C*T*E*D");
        }
    }

    #[test]
    fn test_policy_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("patients-api-policy-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
            unresolved = "fail_closed"

            [[redactors]]
            taxonomy = "DataProtection"
            classification = "SensitiveData"
            redactor = {{ kind = "keep_last", count = 4 }}
            "#
        )
        .unwrap();

        let policy = load_policy(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(policy.unresolved(), UnresolvedClassification::FailClosed);
        let redactor = policy.resolve(&SensitiveData::CLASSIFICATION).unwrap();
        assert_eq!(redactor.redact("123-45-6789"), "*******6789");
        assert!(policy.resolve(&PersonalData::CLASSIFICATION).is_err());
    }

    #[test]
    fn test_missing_policy_file_names_the_path() {
        let err = load_policy(Some("/nonexistent/policy.toml".as_ref())).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/policy.toml"));
    }
}
