pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::ReqwestTransport;
pub use crate::config::AtlasConfig;
pub use crate::core::client::Client;
pub use crate::core::definition::FillReport;
pub use crate::domain::model::{
    Definition, MeasurementRequest, MeasurementResp, MeasurementType, Probe, ProbeSet,
};
pub use crate::utils::error::{AtlasError, Result};
