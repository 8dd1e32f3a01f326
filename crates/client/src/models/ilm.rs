//! Index lifecycle management policy documents (`PUT /_ilm/policy/{name}`).

use serde::{Deserialize, Serialize};

/// Request body for creating or replacing an ILM policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IlmPolicy {
    pub policy: PolicyBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyBody {
    pub phases: IlmPhases,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IlmPhases {
    pub hot: HotPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeletePhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotPhase {
    pub min_age: String,
    pub actions: HotActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotActions {
    pub rollover: RolloverAction,
}

/// Rollover conditions. `max_primary_shard_size` is rejected by clusters
/// older than 7.13, so it is omitted entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverAction {
    pub max_age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_primary_shard_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePhase {
    pub min_age: String,
    pub actions: DeleteActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteActions {
    pub delete: DeleteAction,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAction {}
