//! ILM policy rendering.

use crate::models::{
    DeleteAction, DeleteActions, DeletePhase, HotActions, HotPhase, IlmPhases, IlmPolicy,
    PolicyBody, RolloverAction,
};
use crate::setup::capabilities::{CapabilityProfile, LifecycleStrategy};
use crate::setup::mode::IndexMode;
use crate::setup::names::{DELETE_AFTER, ROLLOVER_MAX_AGE, ROLLOVER_MAX_PRIMARY_SHARD_SIZE};

/// Whether setup manages the ILM policy for this mode on this cluster.
///
/// Datastream mode only uses ILM when no data stream lifecycle is
/// available. Legacy rollover always needs ILM when the cluster has it.
pub fn applies(mode: IndexMode, profile: &CapabilityProfile) -> bool {
    match mode {
        IndexMode::Datastream => profile.lifecycle_strategy() == LifecycleStrategy::Ilm,
        IndexMode::Legacy => profile.supports_ilm,
    }
}

/// Render the metrics retention policy for a cluster.
///
/// `max_primary_shard_size` is only emitted when the cluster accepts it;
/// the 7.11 line rejects the whole policy otherwise.
pub fn render(profile: &CapabilityProfile) -> IlmPolicy {
    let max_primary_shard_size = profile
        .supports_max_primary_shard_size_rollover
        .then(|| ROLLOVER_MAX_PRIMARY_SHARD_SIZE.to_string());

    IlmPolicy {
        policy: PolicyBody {
            phases: IlmPhases {
                hot: HotPhase {
                    min_age: "0ms".to_string(),
                    actions: HotActions {
                        rollover: RolloverAction {
                            max_age: ROLLOVER_MAX_AGE.to_string(),
                            max_primary_shard_size,
                        },
                    },
                },
                delete: Some(DeletePhase {
                    min_age: DELETE_AFTER.to_string(),
                    actions: DeleteActions {
                        delete: DeleteAction::default(),
                    },
                }),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::capabilities::{ClusterDescriptor, Version, resolve};
    use serde_json::json;

    fn render_for(version: Version) -> serde_json::Value {
        let profile = resolve(&ClusterDescriptor::self_managed(version));
        serde_json::to_value(render(&profile)).unwrap()
    }

    #[test]
    fn test_applies_per_mode() {
        let dlm = resolve(&ClusterDescriptor::self_managed(Version::new(8, 11, 0)));
        let ilm_only = resolve(&ClusterDescriptor::self_managed(Version::new(8, 8, 0)));
        let serverless = resolve(&ClusterDescriptor::serverless(Version::new(8, 11, 0)));

        assert!(!applies(IndexMode::Datastream, &dlm));
        assert!(applies(IndexMode::Legacy, &dlm));
        assert!(applies(IndexMode::Datastream, &ilm_only));
        assert!(!applies(IndexMode::Datastream, &serverless));
        assert!(!applies(IndexMode::Legacy, &serverless));
    }

    #[test]
    fn test_policy_with_shard_size() {
        let body = render_for(Version::new(8, 8, 0));
        assert_eq!(
            body["policy"]["phases"]["hot"]["actions"]["rollover"],
            json!({"max_age": "30d", "max_primary_shard_size": "50gb"})
        );
    }

    #[test]
    fn test_policy_without_shard_size_on_7_11() {
        let body = render_for(Version::new(7, 11, 2));
        let rollover = &body["policy"]["phases"]["hot"]["actions"]["rollover"];
        assert!(rollover.get("max_primary_shard_size").is_none());
        assert_eq!(rollover["max_age"], "30d");
    }

    #[test]
    fn test_policy_full_shape() {
        let body = render_for(Version::new(7, 17, 0));
        assert_eq!(
            body,
            json!({
                "policy": {
                    "phases": {
                        "hot": {
                            "min_age": "0ms",
                            "actions": {
                                "rollover": {"max_age": "30d", "max_primary_shard_size": "50gb"}
                            }
                        },
                        "delete": {"min_age": "365d", "actions": {"delete": {}}}
                    }
                }
            })
        );
    }
}
