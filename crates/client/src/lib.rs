//! Elasticsearch client and capability-aware index setup.
//!
//! This crate talks to an Elasticsearch cluster (self-managed 7.11+ or
//! serverless) and provisions the ILM policy and index template a telemetry
//! pipeline writes into. What gets created depends on the cluster version,
//! its flavor, and the selected [`setup::IndexMode`].

mod auth;
pub mod client;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod setup;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::AuthStrategy;
pub use client::EsClient;
pub use client::builder::EsClientBuilder;
pub use error::{ClientError, Result};
pub use gateway::{Gateway, GatewayRequest, GatewayResponse};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{ClusterInfo, IlmPolicy, IndexTemplate, LegacyTemplate};
pub use setup::{
    CapabilityProfile, ClusterDescriptor, ConfigurationError, IndexManager, IndexMode,
    PhaseOutcome, SetupError, SetupReport, Version,
};
