pub mod client;
pub mod definition;
pub mod probes;
pub mod request;
pub mod tags;

pub use crate::domain::model::{
    Definition, MeasurementRequest, MeasurementResp, MeasurementType, Probe, ProbeSet,
};
pub use crate::domain::ports::{ApiRequest, ApiResponse, ConfigProvider, HttpMethod, Transport};
pub use crate::utils::error::Result;
