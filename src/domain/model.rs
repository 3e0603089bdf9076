use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::AtlasError;

/// Measurement kinds the Atlas API can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    Dns,
    Http,
    Ntp,
    Ping,
    SslCert,
    Traceroute,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 6] = [
        MeasurementType::Dns,
        MeasurementType::Http,
        MeasurementType::Ntp,
        MeasurementType::Ping,
        MeasurementType::SslCert,
        MeasurementType::Traceroute,
    ];

    /// Tag used both in the `type` field of a definition and in the endpoint path.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Dns => "dns",
            MeasurementType::Http => "http",
            MeasurementType::Ntp => "ntp",
            MeasurementType::Ping => "ping",
            MeasurementType::SslCert => "sslcert",
            MeasurementType::Traceroute => "traceroute",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AtlasError::InvalidMeasurementType {
                expected: MeasurementType::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join("|"),
                found: s.to_string(),
            })
    }
}

/// Probe selection rule attached to a measurement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSet {
    pub requested: u32,
    #[serde(rename = "type")]
    pub set_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tags_include: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tags_exclude: String,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Parameters of a single measurement, mirroring the Atlas v2 definition schema.
///
/// `description`, `type` and `af` are always sent; every other field is omitted
/// from the JSON body while it holds its zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub description: String,
    #[serde(rename = "type")]
    pub measurement_type: String,
    pub af: i32,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub group_id: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub in_wifi_group: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub spread: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub packets: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub packet_interval: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub extra_wait: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_oneoff: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub resolve_on_probe: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub interval: i32,

    // dns
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_argument: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_class: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_type: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub set_cd_bit: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub set_do_bit: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub set_nsid_bit: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub set_rd_bit: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub udp_payload_size: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_probe_resolver: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub retry: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_qbuf: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_abuf: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub prepend_probe_id: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_macros: bool,

    // http
    #[serde(default, skip_serializing_if = "is_false")]
    pub extended_timing: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub header_bytes: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub more_extended_timing: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_string: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    // ping
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: i32,

    // sslcert
    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: i32,

    // traceroute
    #[serde(default, skip_serializing_if = "is_zero")]
    pub destination_option_size: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dont_fragment: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub duplicate_timeout: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_hop: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub hop_by_hop_option_size: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_hops: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub paris: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub response_timeout: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub timeout: i32,
}

impl Definition {
    /// Parsed form of the `type` field, if it names a known measurement.
    pub fn kind(&self) -> Option<MeasurementType> {
        self.measurement_type.parse().ok()
    }
}

/// Body of `POST /measurements/{type}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRequest {
    pub definitions: Vec<Definition>,
    pub is_oneoff: bool,
    pub probes: Vec<ProbeSet>,
}

/// Identifiers the API assigned to the submitted definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementResp {
    pub measurements: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeStatus {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTag {
    pub name: String,
    pub slug: String,
}

/// Probe details as returned by `GET /probes/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub id: u32,
    #[serde(default)]
    pub address_v4: Option<String>,
    #[serde(default)]
    pub address_v6: Option<String>,
    #[serde(default)]
    pub asn_v4: Option<u32>,
    #[serde(default)]
    pub asn_v6: Option<u32>,
    #[serde(default)]
    pub prefix_v4: Option<String>,
    #[serde(default)]
    pub prefix_v6: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_anchor: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub status: Option<ProbeStatus>,
    #[serde(default)]
    pub tags: Vec<ProbeTag>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub first_connected: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_connected: Option<DateTime<Utc>>,
}

impl Probe {
    /// `IPv4: <addr> IPv6: <addr>`, empty where the probe has no address.
    pub fn ip_summary(&self) -> String {
        format!(
            "IPv4: {} IPv6: {}",
            self.address_v4.as_deref().unwrap_or(""),
            self.address_v6.as_deref().unwrap_or("")
        )
    }
}
