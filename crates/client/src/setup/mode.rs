//! Operator-selected ingestion mode and its validation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::setup::capabilities::CapabilityProfile;
use crate::setup::error::{ConfigurationError, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Rolling indices behind a write alias, managed by a legacy template.
    Legacy,
    /// A data stream backed by a composable index template.
    Datastream,
}

impl IndexMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Legacy => "legacy",
            IndexMode::Datastream => "datastream",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(IndexMode::Legacy),
            "datastream" => Ok(IndexMode::Datastream),
            _ => Err(ConfigurationError::InvalidIndexMode(s.to_string())),
        }
    }
}

/// Reject modes the cluster cannot host. Makes no network calls.
pub fn validate(mode: IndexMode, profile: &CapabilityProfile) -> Result<(), SetupError> {
    match mode {
        IndexMode::Legacy if !profile.supports_legacy_templates => {
            Err(ConfigurationError::LegacyModeUnsupported.into())
        }
        IndexMode::Legacy | IndexMode::Datastream => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::capabilities::{ClusterDescriptor, Version, resolve};

    #[test]
    fn test_parse_modes() {
        assert_eq!("datastream".parse::<IndexMode>().unwrap(), IndexMode::Datastream);
        assert_eq!("legacy".parse::<IndexMode>().unwrap(), IndexMode::Legacy);
        assert_eq!(" Legacy ".parse::<IndexMode>().unwrap(), IndexMode::Legacy);
        assert_eq!("DATASTREAM".parse::<IndexMode>().unwrap(), IndexMode::Datastream);
    }

    #[test]
    fn test_parse_invalid_mode() {
        let err = "invalid_mode".parse::<IndexMode>().unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidIndexMode("invalid_mode".to_string()));
        assert!("".parse::<IndexMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [IndexMode::Legacy, IndexMode::Datastream] {
            assert_eq!(mode.to_string().parse::<IndexMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_legacy_rejected_on_serverless() {
        let descriptor = ClusterDescriptor::serverless(Version::new(8, 11, 0));
        let err = validate(IndexMode::Legacy, &resolve(&descriptor)).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Configuration(ConfigurationError::LegacyModeUnsupported)
        ));
    }

    #[test]
    fn test_datastream_allowed_everywhere() {
        for descriptor in [
            ClusterDescriptor::serverless(Version::new(8, 11, 0)),
            ClusterDescriptor::self_managed(Version::new(7, 11, 0)),
            ClusterDescriptor::self_managed(Version::new(8, 11, 0)),
        ] {
            assert!(validate(IndexMode::Datastream, &resolve(&descriptor)).is_ok());
        }
    }

    #[test]
    fn test_legacy_allowed_self_managed() {
        let descriptor = ClusterDescriptor::self_managed(Version::new(7, 11, 0));
        assert!(validate(IndexMode::Legacy, &resolve(&descriptor)).is_ok());
    }
}
