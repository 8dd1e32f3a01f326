//! Cluster root endpoint (`GET /`) models.

use serde::{Deserialize, Serialize};

/// Response body of `GET /`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClusterInfo {
    pub name: Option<String>,
    pub cluster_name: Option<String>,
    pub cluster_uuid: Option<String>,
    pub version: VersionInfo,
    pub tagline: Option<String>,
}

/// Version block of the root endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VersionInfo {
    pub number: String,
    /// `default` for self-managed clusters, `serverless` for the managed offering.
    /// Absent on some older and OSS builds.
    pub build_flavor: Option<String>,
    pub build_type: Option<String>,
    pub build_hash: Option<String>,
    pub lucene_version: Option<String>,
    pub minimum_wire_compatibility_version: Option<String>,
}

impl VersionInfo {
    /// Whether the build flavor identifies a serverless project.
    pub fn is_serverless(&self) -> bool {
        self.build_flavor
            .as_deref()
            .is_some_and(|flavor| flavor.eq_ignore_ascii_case("serverless"))
    }
}
