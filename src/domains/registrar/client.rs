//! Reg.ru API client.
//!
//! [`RegistrarApi`] is the seam the tools talk to: one raw `request` method
//! plus a convenience method per zone operation, each a fixed mapping from
//! typed arguments to an endpoint and a flat parameter list. [`RegruClient`]
//! implements `request` over HTTPS.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::error::{RegistrarError, RegistrarResult, TransportFailure, TransportKind};
use super::form::{FormParams, encode_action_list};
use super::types::{ApiResponse, CaaTag, RESULT_ERROR, RecordType, ZoneAction, scalar_text};
use crate::core::config::Credentials;

/// Default base URL of the Reg.ru API v2.
pub const DEFAULT_BASE_URL: &str = "https://api.reg.ru/api/regru2";

/// Every request is abandoned after this long; there is no retry.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ask the API for plain JSON output.
const OUTPUT_CONTENT_TYPE: &str = "plain";

/// Response bodies longer than this are truncated in debug logs.
const LOG_BODY_LIMIT: usize = 256;

/// Endpoint paths, relative to the base URL.
pub mod endpoints {
    pub const GET_RESOURCE_RECORDS: &str = "zone/get_resource_records";
    pub const ADD_ALIAS: &str = "zone/add_alias";
    pub const ADD_AAAA: &str = "zone/add_aaaa";
    pub const ADD_CNAME: &str = "zone/add_cname";
    pub const ADD_MX: &str = "zone/add_mx";
    pub const ADD_TXT: &str = "zone/add_txt";
    pub const ADD_NS: &str = "zone/add_ns";
    pub const ADD_SRV: &str = "zone/add_srv";
    pub const ADD_CAA: &str = "zone/add_caa";
    pub const REMOVE_RECORD: &str = "zone/remove_record";
    pub const UPDATE_RECORDS: &str = "zone/update_records";
    pub const UPDATE_SOA: &str = "zone/update_soa";
    pub const CLEAR: &str = "zone/clear";
}

/// Operations offered by the registrar's zone API.
///
/// Implementors only provide [`request`](Self::request); the remaining
/// methods build their parameters and delegate to it.
#[async_trait]
pub trait RegistrarApi: Send + Sync {
    /// Call `endpoint` with `params` and return the checked envelope.
    async fn request(&self, endpoint: &str, params: FormParams) -> RegistrarResult<ApiResponse>;

    async fn get_resource_records(&self, domain: &str) -> RegistrarResult<ApiResponse> {
        self.request(endpoints::GET_RESOURCE_RECORDS, FormParams::for_domain(domain))
            .await
    }

    /// Add an A record.
    async fn add_alias(
        &self,
        domain: &str,
        subdomain: &str,
        ipaddr: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("ipaddr", ipaddr)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_ALIAS, params).await
    }

    async fn add_aaaa(
        &self,
        domain: &str,
        subdomain: &str,
        ipaddr: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("ipaddr", ipaddr)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_AAAA, params).await
    }

    async fn add_cname(
        &self,
        domain: &str,
        subdomain: &str,
        canonical_name: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("canonical_name", canonical_name)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_CNAME, params).await
    }

    async fn add_mx(
        &self,
        domain: &str,
        subdomain: &str,
        mail_server: &str,
        priority: u16,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("mail_server", mail_server)
            .with("priority", priority)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_MX, params).await
    }

    async fn add_txt(
        &self,
        domain: &str,
        subdomain: &str,
        text: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("text", text)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_TXT, params).await
    }

    async fn add_ns(
        &self,
        domain: &str,
        subdomain: &str,
        dns_server: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("dns_server", dns_server)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_NS, params).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn add_srv(
        &self,
        domain: &str,
        service: &str,
        priority: u16,
        weight: u16,
        port: u16,
        target: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("service", service)
            .with("priority", priority)
            .with("weight", weight)
            .with("port", port)
            .with("target", target)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_SRV, params).await
    }

    async fn add_caa(
        &self,
        domain: &str,
        subdomain: &str,
        flags: u8,
        tag: CaaTag,
        value: &str,
        ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("flags", flags)
            .with("tag", tag)
            .with("value", value)
            .with_opt("ttl", ttl);
        self.request(endpoints::ADD_CAA, params).await
    }

    /// Remove the record matching type, subdomain, content and (for MX) priority.
    async fn remove_record(
        &self,
        domain: &str,
        subdomain: &str,
        record_type: RecordType,
        content: &str,
        priority: Option<u16>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with("subdomain", subdomain)
            .with("record_type", record_type)
            .with("content", content)
            .with_opt("priority", priority);
        self.request(endpoints::REMOVE_RECORD, params).await
    }

    /// Submit a batch of add/remove actions in one call.
    ///
    /// The batch is sent as-is; callers enforce the 50-action ceiling.
    async fn update_records(
        &self,
        domain: &str,
        actions: &[ZoneAction],
    ) -> RegistrarResult<ApiResponse> {
        self.request(endpoints::UPDATE_RECORDS, encode_action_list(domain, actions))
            .await
    }

    async fn update_soa(
        &self,
        domain: &str,
        ttl: Option<u32>,
        minimum_ttl: Option<u32>,
    ) -> RegistrarResult<ApiResponse> {
        let params = FormParams::for_domain(domain)
            .with_opt("ttl", ttl)
            .with_opt("minimum_ttl", minimum_ttl);
        self.request(endpoints::UPDATE_SOA, params).await
    }

    /// Delete every record in the zone.
    async fn clear_zone(&self, domain: &str) -> RegistrarResult<ApiResponse> {
        self.request(endpoints::CLEAR, FormParams::for_domain(domain))
            .await
    }
}

/// HTTPS client for the Reg.ru API.
///
/// Holds the account credentials for the lifetime of the process. It keeps
/// no other state, so one instance is shared by all concurrent tool calls.
#[derive(Debug, Clone)]
pub struct RegruClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl RegruClient {
    /// Create a client for the production API.
    pub fn new(credentials: Credentials) -> RegistrarResult<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> RegistrarResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Parameters injected ahead of every caller-supplied set.
    fn auth_params(&self) -> FormParams {
        FormParams::new()
            .with("username", &self.credentials.username)
            .with("password", &self.credentials.password)
            .with("output_content_type", OUTPUT_CONTENT_TYPE)
    }
}

#[async_trait]
impl RegistrarApi for RegruClient {
    #[instrument(skip(self, params), fields(params = params.len()))]
    async fn request(&self, endpoint: &str, params: FormParams) -> RegistrarResult<ApiResponse> {
        let url = self.endpoint_url(endpoint);
        let body = params
            .merged_over(self.auth_params())
            .encode()
            .map_err(|e| RegistrarError::transport(format!("Failed to encode request: {e}")))?;

        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(RegistrarError::Transport(TransportFailure::with_kind(
                TransportKind::Other,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                ),
            )));
        }

        let bytes = response.bytes().await?;
        debug!(
            "Response body: {}",
            truncate_for_log(&String::from_utf8_lossy(&bytes))
        );

        interpret_response(&bytes)
    }
}

/// Parse a 2xx response body and check it for API errors.
///
/// Errors are read from the raw JSON before any typing, so an unexpected
/// value elsewhere in the body cannot mask the error code.
pub fn interpret_response(body: &[u8]) -> RegistrarResult<ApiResponse> {
    let envelope: Value = serde_json::from_slice(body)
        .map_err(|e| invalid_envelope(format!("Invalid JSON in Reg.ru API response: {e}")))?;
    let Value::Object(envelope) = envelope else {
        return Err(invalid_envelope(
            "Invalid JSON in Reg.ru API response: expected an object".to_string(),
        ));
    };
    check_envelope(&envelope)?;
    Ok(ApiResponse::from_envelope(envelope))
}

/// Turn an error envelope into [`RegistrarError::Api`].
///
/// The top-level `result` is checked first. When it reports success, the
/// first domain answer is checked too: a batch can succeed as a request while
/// the operation on the domain itself failed.
pub fn check_envelope(envelope: &Map<String, Value>) -> RegistrarResult<()> {
    if reports_error(envelope) {
        return Err(api_error(envelope));
    }

    let first_domain = envelope
        .get("answer")
        .and_then(|answer| answer.get("domains"))
        .and_then(|domains| domains.get(0))
        .and_then(Value::as_object);

    if let Some(domain) = first_domain.filter(|d| reports_error(d)) {
        return Err(api_error(domain));
    }

    Ok(())
}

fn reports_error(object: &Map<String, Value>) -> bool {
    object.get("result").and_then(Value::as_str) == Some(RESULT_ERROR)
}

fn api_error(object: &Map<String, Value>) -> RegistrarError {
    let code = object.get("error_code").and_then(scalar_text);
    let text = object.get("error_text").and_then(scalar_text);
    RegistrarError::api(code.as_deref(), text.as_deref())
}

fn invalid_envelope(message: String) -> RegistrarError {
    RegistrarError::Transport(TransportFailure::with_kind(TransportKind::Other, message))
}

fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(LOG_BODY_LIMIT) {
        Some((cut, _)) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
        None => s.to_string(),
    }
}
