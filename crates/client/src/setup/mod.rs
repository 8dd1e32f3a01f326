//! Capability-aware provisioning of the ILM policy and index template.
//!
//! The flow is one-directional: cluster descriptor → [`CapabilityProfile`]
//! → validated [`IndexMode`] → rendered documents → gateway calls.
//!
//! # Submodules
//! - [`capabilities`]: version parsing and the capability table
//! - [`mode`]: index mode parsing and validation
//! - [`policy`]: ILM policy rendering
//! - [`template`]: modern and legacy template rendering
//! - [`names`]: fixed resource names and thresholds
//! - `manager`: the [`IndexManager`] orchestrator

pub mod capabilities;
mod error;
mod manager;
pub mod mode;
pub mod names;
pub mod policy;
pub mod template;

pub use capabilities::{
    CapabilityProfile, ClusterDescriptor, LifecycleStrategy, Version, VersionParseError, resolve,
};
pub use error::{ConfigurationError, SetupError};
pub use manager::{IndexManager, PhaseOutcome, SetupReport};
pub use mode::{IndexMode, validate};
pub use template::TemplateSpec;
