use crate::core::tags::split_tags;
use crate::domain::model::ProbeSet;

pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_AREA_TYPE: &str = "area";
pub const DEFAULT_AREA_VALUE: &str = "WW";

/// Selection types the probe-set `type` field accepts.
pub const AREA_TYPES: [&str; 6] = ["area", "country", "prefix", "asn", "probes", "msm"];

impl ProbeSet {
    /// Builds a probe set, falling back to 10 worldwide probes for zero/empty inputs.
    pub fn new(requested: u32, set_type: &str, value: &str, tags: &str) -> Self {
        let requested = if requested == 0 {
            DEFAULT_POOL_SIZE
        } else {
            requested
        };
        let set_type = if set_type.is_empty() {
            DEFAULT_AREA_TYPE
        } else {
            set_type
        };
        let value = if value.is_empty() {
            DEFAULT_AREA_VALUE
        } else {
            value
        };

        let (tags_include, tags_exclude) = split_tags(tags);

        ProbeSet {
            requested,
            set_type: set_type.to_string(),
            value: value.to_string(),
            tags_include,
            tags_exclude,
        }
    }
}
