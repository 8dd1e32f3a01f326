//! Capability profile resolution.
//!
//! A [`ClusterDescriptor`] (version + serverless flag) maps to a
//! [`CapabilityProfile`] through one ordered table. Adding a version
//! threshold means adding one row to [`CAPABILITY_TABLE`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Semantic version triple. Ordering is numeric, field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{input}': {reason}")]
pub struct VersionParseError {
    input: String,
    reason: &'static str,
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Accepts `8`, `8.11`, `8.11.1` and pre-release forms like
    /// `8.12.0-SNAPSHOT`; missing components default to zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| VersionParseError {
            input: s.to_string(),
            reason,
        };

        let core = s.trim().split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return Err(err("empty version"));
        }

        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in core.split('.') {
            if count == parts.len() {
                return Err(err("too many components"));
            }
            parts[count] = piece.parse().map_err(|_| err("non-numeric component"))?;
            count += 1;
        }

        Ok(Version::new(parts[0], parts[1], parts[2]))
    }
}

/// Oldest self-managed line this tool knows how to provision.
pub const MIN_SUPPORTED_VERSION: Version = Version::new(7, 11, 0);

/// Input fact supplied by the gateway once per setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClusterDescriptor {
    pub version: Version,
    pub is_serverless: bool,
}

impl ClusterDescriptor {
    pub const fn new(version: Version, is_serverless: bool) -> Self {
        Self {
            version,
            is_serverless,
        }
    }

    pub const fn self_managed(version: Version) -> Self {
        Self::new(version, false)
    }

    /// Serverless projects report a placeholder version; it is kept for
    /// display only.
    pub const fn serverless(reported_version: Version) -> Self {
        Self::new(reported_version, true)
    }

    /// Whether the cluster is inside the range the capability table was
    /// written for. Resolution still works outside it.
    pub fn is_supported(&self) -> bool {
        self.is_serverless || self.version >= MIN_SUPPORTED_VERSION
    }
}

impl fmt::Display for ClusterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_serverless {
            write!(f, "serverless (reports {})", self.version)
        } else {
            write!(f, "{}", self.version)
        }
    }
}

/// Which mechanism governs retention of datastream backing indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStrategy {
    /// `template.lifecycle.data_retention`
    DataStreamLifecycle,
    /// `index.lifecycle.name` pointing at the ILM policy
    Ilm,
    /// Neither; retention is managed by the platform.
    None,
}

/// What the connected cluster can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CapabilityProfile {
    pub supports_ilm: bool,
    pub supports_datastream_lifecycle: bool,
    pub supports_time_series_datastream: bool,
    pub supports_component_template_composition: bool,
    pub supports_max_primary_shard_size_rollover: bool,
    pub supports_legacy_templates: bool,
}

impl CapabilityProfile {
    /// DLM wins over ILM when both are available.
    pub fn lifecycle_strategy(&self) -> LifecycleStrategy {
        if self.supports_datastream_lifecycle {
            LifecycleStrategy::DataStreamLifecycle
        } else if self.supports_ilm {
            LifecycleStrategy::Ilm
        } else {
            LifecycleStrategy::None
        }
    }
}

pub const SERVERLESS_PROFILE: CapabilityProfile = CapabilityProfile {
    supports_ilm: false,
    supports_datastream_lifecycle: false,
    supports_time_series_datastream: true,
    supports_component_template_composition: true,
    supports_max_primary_shard_size_rollover: true,
    supports_legacy_templates: false,
};

const fn self_managed(
    dlm: bool,
    tsds_and_composition: bool,
    max_primary_shard_size: bool,
) -> CapabilityProfile {
    CapabilityProfile {
        supports_ilm: true,
        supports_datastream_lifecycle: dlm,
        supports_time_series_datastream: tsds_and_composition,
        supports_component_template_composition: tsds_and_composition,
        supports_max_primary_shard_size_rollover: max_primary_shard_size,
        supports_legacy_templates: true,
    }
}

/// Profile of the oldest supported line, also used for anything older.
pub const LEAST_CAPABLE_PROFILE: CapabilityProfile = self_managed(false, false, false);

/// Inclusive lower bounds, highest first. The first row whose threshold is
/// at or below the cluster version wins.
pub static CAPABILITY_TABLE: &[(Version, CapabilityProfile)] = &[
    (Version::new(8, 11, 0), self_managed(true, true, true)),
    (Version::new(8, 0, 0), self_managed(false, true, true)),
    (Version::new(7, 17, 0), self_managed(false, false, true)),
    (MIN_SUPPORTED_VERSION, LEAST_CAPABLE_PROFILE),
];

/// Map a descriptor to its capability profile. Pure and total.
pub fn resolve(descriptor: &ClusterDescriptor) -> CapabilityProfile {
    if descriptor.is_serverless {
        return SERVERLESS_PROFILE;
    }

    CAPABILITY_TABLE
        .iter()
        .find(|(threshold, _)| descriptor.version >= *threshold)
        .map(|(_, profile)| *profile)
        .unwrap_or(LEAST_CAPABLE_PROFILE)
}
