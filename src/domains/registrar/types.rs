//! Wire types for the Reg.ru zone API.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Literal value of `result` on a failed call.
pub const RESULT_ERROR: &str = "error";

// ============================================================================
// Response envelope
// ============================================================================

/// Top-level JSON envelope returned by every API call.
///
/// Only the fields the server reads are typed; everything else is kept in
/// `extra` so callers get the envelope back unchanged. Scalars are read
/// leniently: a number where text is expected becomes its decimal string and
/// `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `"success"` or `"error"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub result: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub error_code: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub error_text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `answer` object of a successful envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<DomainAnswer>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-domain result nested inside `answer.domains`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainAnswer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub dname: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub result: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub rrs: Vec<DnsRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa: Option<SoaSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Value>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub error_code: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub error_text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Project a raw envelope onto the typed view.
    ///
    /// A body whose nested values cannot be typed at all (say, `answer` sent
    /// as a string) is still kept whole: `result` and the error fields are read out
    /// and every other key lands in `extra`.
    pub fn from_envelope(envelope: Map<String, Value>) -> Self {
        match serde_json::from_value(Value::Object(envelope.clone())) {
            Ok(response) => response,
            Err(_) => {
                let mut extra = envelope;
                let result = extra.remove("result");
                let error_code = extra.remove("error_code");
                let error_text = extra.remove("error_text");
                Self {
                    result: result.as_ref().and_then(scalar_text).unwrap_or_default(),
                    answer: None,
                    error_code: error_code.as_ref().and_then(scalar_text),
                    error_text: error_text.as_ref().and_then(scalar_text),
                    extra,
                }
            }
        }
    }

    /// The first domain answer, which is the one single-domain calls target.
    pub fn first_domain(&self) -> Option<&DomainAnswer> {
        self.answer.as_ref().and_then(|a| a.domains.first())
    }

    /// Records of the first domain answer (empty when absent).
    pub fn records(&self) -> &[DnsRecord] {
        self.first_domain().map(|d| d.rrs.as_slice()).unwrap_or_default()
    }

    /// SOA settings of the first domain answer, if reported.
    pub fn soa(&self) -> Option<&SoaSettings> {
        self.first_domain().and_then(|d| d.soa.as_ref())
    }
}

/// One resource record as listed by `zone/get_resource_records`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record type (A, MX, ...).
    #[serde(
        rename(deserialize = "rectype"),
        default,
        deserialize_with = "lenient_string"
    )]
    pub record_type: String,

    /// Subdomain the record belongs to (`@` for the apex).
    #[serde(
        rename(deserialize = "subname"),
        default,
        deserialize_with = "lenient_string"
    )]
    pub subdomain: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    #[serde(rename(deserialize = "prio"), default, deserialize_with = "lenient_u32")]
    pub priority: u32,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_u32"
    )]
    pub ttl: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub state: Option<String>,
}

/// Zone-wide TTL defaults from the SOA record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoaSettings {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub ttl: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub minimum_ttl: Option<String>,
}

/// Text of a scalar JSON value; `None` for null, arrays and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Numbers from the API arrive either as JSON numbers or as numeric strings.
fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_u32(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Request-side types
// ============================================================================

/// DNS record types accepted by the zone API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    Soa,
}

impl RecordType {
    /// Wire representation of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Soa => "SOA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a bulk action adds or removes a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Add,
    Remove,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CAA property tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaaTag {
    /// Authorizes a CA to issue certificates.
    Issue,
    /// Authorizes a CA to issue wildcard certificates.
    Issuewild,
    /// Where CAs report policy violations.
    Iodef,
}

impl CaaTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Issuewild => "issuewild",
            Self::Iodef => "iodef",
        }
    }
}

impl fmt::Display for CaaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a bulk `zone/update_records` call.
///
/// The order of actions in a batch is the order the API applies them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ZoneAction {
    /// "add" or "remove".
    pub action: ActionKind,

    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SRV, CAA).
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Subdomain name ("@" for the root).
    pub subdomain: String,

    /// Record content (IP address, hostname, text, ...).
    pub content: String,

    /// Priority, for MX and SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// TTL in seconds (60-86400).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_records_envelope() {
        let response: ApiResponse = serde_json::from_value(json!({
            "result": "success",
            "answer": {
                "domains": [{
                    "dname": "example.com",
                    "result": "success",
                    "rrs": [
                        {"rectype": "A", "subname": "www", "content": "1.2.3.4", "prio": 0, "state": "A"},
                        {"rectype": "MX", "subname": "@", "content": "mx.example.com", "prio": "10"}
                    ],
                    "soa": {"ttl": "1d", "minimum_ttl": "3h"}
                }]
            }
        }))
        .unwrap();

        assert_eq!(response.result, "success");
        let records = response.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_type, "A");
        assert_eq!(records[0].subdomain, "www");
        assert_eq!(records[0].state.as_deref(), Some("A"));
        assert_eq!(records[1].priority, 10);
        assert_eq!(response.soa().unwrap().minimum_ttl.as_deref(), Some("3h"));
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let raw = json!({
            "result": "success",
            "charset": "utf-8",
            "answer": {"domains": [{"dname": "example.com", "result": "success", "service_id": "42"}]}
        });
        let response: ApiResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.extra["charset"], "utf-8");
        assert_eq!(response.first_domain().unwrap().service_id, Some(json!("42")));
    }

    #[test]
    fn test_missing_answer_yields_no_records() {
        let response: ApiResponse = serde_json::from_value(json!({"result": "success"})).unwrap();
        assert!(response.records().is_empty());
        assert!(response.soa().is_none());
    }

    #[test]
    fn test_unexpected_scalar_types_are_read_leniently() {
        let response: ApiResponse = serde_json::from_value(json!({
            "result": "success",
            "answer": {
                "domains": [{
                    "dname": "example.com",
                    "result": "success",
                    "rrs": [{"rectype": "A", "subname": "www", "content": "1.2.3.4", "state": 1}],
                    "soa": {"ttl": 3600, "minimum_ttl": null}
                }]
            }
        }))
        .unwrap();

        assert_eq!(response.records()[0].state.as_deref(), Some("1"));
        assert_eq!(response.soa().unwrap().ttl.as_deref(), Some("3600"));
        assert_eq!(response.soa().unwrap().minimum_ttl, None);
    }

    #[test]
    fn test_null_result_and_lists_are_empty() {
        let response: ApiResponse = serde_json::from_value(json!({
            "result": null,
            "answer": {"domains": [{"dname": "example.com", "rrs": null}]}
        }))
        .unwrap();
        assert_eq!(response.result, "");
        assert!(response.records().is_empty());
    }

    #[test]
    fn test_untypable_envelope_is_kept_whole() {
        let raw = json!({"result": "success", "answer": "queued"});
        let Value::Object(map) = raw.clone() else {
            unreachable!()
        };
        let response = ApiResponse::from_envelope(map);
        assert_eq!(response.result, "success");
        assert!(response.answer.is_none());
        assert_eq!(response.extra["answer"], "queued");
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }

    #[test]
    fn test_record_type_wire_names() {
        let parsed: RecordType = serde_json::from_value(json!("AAAA")).unwrap();
        assert_eq!(parsed, RecordType::Aaaa);
        assert_eq!(RecordType::Cname.to_string(), "CNAME");
        assert!(serde_json::from_value::<RecordType>(json!("PTR")).is_err());
    }

    #[test]
    fn test_zone_action_deserialization() {
        let action: ZoneAction = serde_json::from_value(json!({
            "action": "remove",
            "type": "MX",
            "subdomain": "@",
            "content": "mx.example.com",
            "priority": 10
        }))
        .unwrap();
        assert_eq!(action.action, ActionKind::Remove);
        assert_eq!(action.record_type, RecordType::Mx);
        assert_eq!(action.priority, Some(10));
        assert_eq!(action.ttl, None);
    }
}
