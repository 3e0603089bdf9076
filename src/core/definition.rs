use crate::domain::model::{Definition, MeasurementType};
use crate::utils::error::{AtlasError, Result};

/// Typed write access to one `Definition` field.
#[derive(Clone, Copy)]
enum Setter {
    Str(fn(&mut Definition) -> &mut String),
    Int(fn(&mut Definition) -> &mut i32),
    Bool(fn(&mut Definition) -> &mut bool),
    List(fn(&mut Definition) -> &mut Vec<String>),
}

struct FieldSpec {
    /// Field name as used by field maps (`ResolveOnProbe`).
    name: &'static str,
    /// JSON key of the same field (`resolve_on_probe`).
    wire: &'static str,
    setter: Setter,
}

macro_rules! field {
    ($name:literal, $wire:literal, $kind:ident, $field:ident) => {
        FieldSpec {
            name: $name,
            wire: $wire,
            setter: Setter::$kind(|d| &mut d.$field),
        }
    };
}

const COMMON_FIELDS: &[FieldSpec] = &[
    field!("Description", "description", Str, description),
    field!("Type", "type", Str, measurement_type),
    field!("AF", "af", Int, af),
    field!("Target", "target", Str, target),
    field!("GroupID", "group_id", Int, group_id),
    field!("Group", "group", Str, group),
    field!("InWifiGroup", "in_wifi_group", Bool, in_wifi_group),
    field!("Spread", "spread", Int, spread),
    field!("Packets", "packets", Int, packets),
    field!("PacketInterval", "packet_interval", Int, packet_interval),
    field!("Tags", "tags", List, tags),
    field!("ExtraWait", "extra_wait", Int, extra_wait),
    field!("IsOneoff", "is_oneoff", Bool, is_oneoff),
    field!("IsPublic", "is_public", Bool, is_public),
    field!("ResolveOnProbe", "resolve_on_probe", Bool, resolve_on_probe),
    field!("Interval", "interval", Int, interval),
    field!("Timeout", "timeout", Int, timeout),
];

const DNS_FIELDS: &[FieldSpec] = &[
    field!("QueryArgument", "query_argument", Str, query_argument),
    field!("QueryClass", "query_class", Str, query_class),
    field!("QueryType", "query_type", Str, query_type),
    field!("SetCDBit", "set_cd_bit", Bool, set_cd_bit),
    field!("SetDOBit", "set_do_bit", Bool, set_do_bit),
    field!("SetNSIDBit", "set_nsid_bit", Bool, set_nsid_bit),
    field!("SetRDBit", "set_rd_bit", Bool, set_rd_bit),
    field!("UDPPayloadSize", "udp_payload_size", Int, udp_payload_size),
    field!("UseProbeResolver", "use_probe_resolver", Bool, use_probe_resolver),
    field!("Protocol", "protocol", Str, protocol),
    field!("Retry", "retry", Int, retry),
    field!("IncludeQbuf", "include_qbuf", Bool, include_qbuf),
    field!("IncludeAbuf", "include_abuf", Bool, include_abuf),
    field!("PrependProbeID", "prepend_probe_id", Bool, prepend_probe_id),
    field!("UseMacros", "use_macros", Bool, use_macros),
];

const HTTP_FIELDS: &[FieldSpec] = &[
    field!("ExtendedTiming", "extended_timing", Bool, extended_timing),
    field!("HeaderBytes", "header_bytes", Int, header_bytes),
    field!("Method", "method", Str, method),
    field!("MoreExtendedTiming", "more_extended_timing", Bool, more_extended_timing),
    field!("Path", "path", Str, path),
    field!("QueryString", "query_string", Str, query_string),
    field!("UserAgent", "user_agent", Str, user_agent),
    field!("Version", "version", Str, version),
];

const PING_FIELDS: &[FieldSpec] = &[field!("Size", "size", Int, size)];

const SSLCERT_FIELDS: &[FieldSpec] = &[field!("Port", "port", Int, port)];

const TRACEROUTE_FIELDS: &[FieldSpec] = &[
    field!("DestinationOptionSize", "destination_option_size", Int, destination_option_size),
    field!("DontFragment", "dont_fragment", Bool, dont_fragment),
    field!("DuplicateTimeout", "duplicate_timeout", Int, duplicate_timeout),
    field!("FirstHop", "first_hop", Int, first_hop),
    field!("HopByHopOptionSize", "hop_by_hop_option_size", Int, hop_by_hop_option_size),
    field!("MaxHops", "max_hops", Int, max_hops),
    field!("Paris", "paris", Int, paris),
    field!("ResponseTimeout", "response_timeout", Int, response_timeout),
];

static FIELD_TABLES: [&[FieldSpec]; 6] = [
    COMMON_FIELDS,
    DNS_FIELDS,
    HTTP_FIELDS,
    PING_FIELDS,
    SSLCERT_FIELDS,
    TRACEROUTE_FIELDS,
];

fn lookup(key: &str) -> Option<&'static FieldSpec> {
    FIELD_TABLES
        .iter()
        .flat_map(|table| table.iter())
        .find(|spec| spec.name == key || spec.wire == key)
}

/// `1/t/T/TRUE/true/True` and their false counterparts, nothing else.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// What happened to the entries of a field map that were not applied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Keys that match no definition field.
    pub ignored: Vec<String>,
    /// Keys whose value did not parse and were set to zero.
    pub coerced: Vec<String>,
}

impl FillReport {
    pub fn is_clean(&self) -> bool {
        self.ignored.is_empty() && self.coerced.is_empty()
    }
}

impl Definition {
    /// Assigns every known key from `fields`, by field name or wire name.
    ///
    /// Unknown keys are skipped and unparsable numbers/booleans become zero,
    /// both only reported through the returned `FillReport`.
    pub fn set_params<I, K, V>(&mut self, fields: I) -> FillReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut report = FillReport::default();

        for (key, value) in fields {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(spec) = lookup(key) else {
                tracing::debug!("Ignoring unknown definition field: {}", key);
                report.ignored.push(key.to_string());
                continue;
            };

            let parsed = match spec.setter {
                Setter::Str(slot) => {
                    *slot(self) = value.to_string();
                    true
                }
                Setter::Int(slot) => {
                    let parsed = value.parse::<i32>().ok();
                    *slot(self) = parsed.unwrap_or_default();
                    parsed.is_some()
                }
                Setter::Bool(slot) => {
                    let parsed = parse_bool(value);
                    *slot(self) = parsed.unwrap_or_default();
                    parsed.is_some()
                }
                Setter::List(slot) => {
                    *slot(self) = value
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(str::to_string)
                        .collect();
                    true
                }
            };

            if !parsed {
                tracing::warn!("Invalid value {:?} for {}, using zero", value, spec.name);
                report.coerced.push(key.to_string());
            }
        }

        report
    }

    /// Builds a definition from a field map; the result must name a known measurement type.
    pub fn from_fields<I, K, V>(fields: I) -> Result<(Definition, FillReport)>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut def = Definition::default();
        fill_definition(&mut def, fields).map(|report| (def, report))
    }
}

/// Fills `def` in place and checks that its `type` is a measurement the API knows.
pub fn fill_definition<I, K, V>(def: &mut Definition, fields: I) -> Result<FillReport>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let report = def.set_params(fields);

    if def.measurement_type.parse::<MeasurementType>().is_err() {
        return Err(AtlasError::InvalidDefinition {
            message: format!("unknown measurement type {:?}", def.measurement_type),
        });
    }

    Ok(report)
}
