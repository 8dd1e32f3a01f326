//! Data models for Elasticsearch API requests and responses.

mod cluster;
mod error;
mod ilm;
mod template;

pub use cluster::{ClusterInfo, VersionInfo};
pub use error::{ErrorBody, ErrorDetail};
pub use ilm::{
    DeleteAction, DeleteActions, DeletePhase, HotActions, HotPhase, IlmPhases, IlmPolicy,
    PolicyBody, RolloverAction,
};
pub use template::{
    AliasDefinition, CreateIndexBody, DataStreamConfig, DataStreamLifecycle, IndexTemplate,
    LegacyTemplate, TemplateBody, TemplateMeta, TemplateSettings,
};
