//! Single-record creation tools.
//!
//! One parameter struct per record type. Each maps onto one `zone/add_*`
//! endpoint and renders a one-line confirmation of what was added.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{preview_text, record_line, success_message};
use super::operation::{ToolHints, ZoneOperation};
use super::validation::{self, Check, MAX_TXT_LEN, default_ttl};
use crate::domains::registrar::{ApiResponse, CaaTag, RegistrarApi, RegistrarResult};

// ============================================================================
// A
// ============================================================================

/// Parameters for adding an A record.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddARecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain name. Use '@' for the root domain, '*' for a wildcard.
    pub subdomain: String,

    /// IPv4 address (e.g., 192.168.1.1).
    pub ipaddr: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddARecordParams {
    const NAME: &'static str = "regru_add_a_record";
    const TITLE: &'static str = "Add A Record";
    const DESCRIPTION: &'static str = "Add an A record (IPv4) to a domain's DNS zone on Reg.ru. \
Points a subdomain to an IPv4 address. Multiple A records for the same subdomain create round-robin DNS. \
Example: domain=\"example.com\", subdomain=\"www\", ipaddr=\"1.2.3.4\".";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::ipv4("ipaddr", &self.ipaddr)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_alias(&self.domain, &self.subdomain, &self.ipaddr, Some(self.ttl))
            .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let line = record_line(&self.subdomain, &self.ipaddr, &[], self.ttl);
        success_message("added A record", &self.domain, Some(&line))
    }
}

// ============================================================================
// AAAA
// ============================================================================

/// Parameters for adding an AAAA record.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddAaaaRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain name. Use '@' for the root domain, '*' for a wildcard.
    pub subdomain: String,

    /// IPv6 address (e.g., 2001:db8::1).
    pub ipaddr: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddAaaaRecordParams {
    const NAME: &'static str = "regru_add_aaaa_record";
    const TITLE: &'static str = "Add AAAA Record";
    const DESCRIPTION: &'static str = "Add an AAAA record (IPv6) to a domain's DNS zone on Reg.ru. \
Points a subdomain to an IPv6 address.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::ipv6("ipaddr", &self.ipaddr)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_aaaa(&self.domain, &self.subdomain, &self.ipaddr, Some(self.ttl))
            .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let line = record_line(&self.subdomain, &self.ipaddr, &[], self.ttl);
        success_message("added AAAA record", &self.domain, Some(&line))
    }
}

// ============================================================================
// CNAME
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddCnameRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain to alias (e.g., blog). Use '*' for a wildcard.
    pub subdomain: String,

    /// Target hostname (e.g., example.github.io).
    pub canonical_name: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddCnameRecordParams {
    const NAME: &'static str = "regru_add_cname_record";
    const TITLE: &'static str = "Add CNAME Record";
    const DESCRIPTION: &'static str = "Add a CNAME record (alias) to a domain's DNS zone on Reg.ru. \
Creates a canonical name alias. CNAME records cannot coexist with other record types for the same subdomain.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("canonical_name", &self.canonical_name)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_cname(
            &self.domain,
            &self.subdomain,
            &self.canonical_name,
            Some(self.ttl),
        )
        .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let line = record_line(&self.subdomain, &self.canonical_name, &[], self.ttl);
        success_message("added CNAME record", &self.domain, Some(&line))
    }
}

// ============================================================================
// MX
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddMxRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain receiving mail. Use '@' for the root domain.
    pub subdomain: String,

    /// Mail server hostname (e.g., mx1.example.com).
    pub mail_server: String,

    /// Priority value (0-65535, lower = higher priority).
    pub priority: u16,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddMxRecordParams {
    const NAME: &'static str = "regru_add_mx_record";
    const TITLE: &'static str = "Add MX Record";
    const DESCRIPTION: &'static str = "Add an MX record (mail exchange) to a domain's DNS zone on Reg.ru. \
Configures mail delivery for the domain. Lower priority values mean higher preference.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("mail_server", &self.mail_server)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_mx(
            &self.domain,
            &self.subdomain,
            &self.mail_server,
            self.priority,
            Some(self.ttl),
        )
        .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let extras = [format!("priority: {}", self.priority)];
        let line = record_line(&self.subdomain, &self.mail_server, &extras, self.ttl);
        success_message("added MX record", &self.domain, Some(&line))
    }
}

// ============================================================================
// TXT
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddTxtRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain name (e.g., '@', '_dmarc').
    pub subdomain: String,

    /// Text record content (e.g., SPF, DKIM, verification strings). At most 4096 characters.
    pub text: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddTxtRecordParams {
    const NAME: &'static str = "regru_add_txt_record";
    const TITLE: &'static str = "Add TXT Record";
    const DESCRIPTION: &'static str = "Add a TXT record to a domain's DNS zone on Reg.ru. \
Used for domain verification, SPF, DKIM, DMARC, and other text-based DNS records.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("text", &self.text)?;
        validation::max_len("text", &self.text, MAX_TXT_LEN)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_txt(&self.domain, &self.subdomain, &self.text, Some(self.ttl))
            .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let target = format!("`{}`", preview_text(&self.text));
        let line = record_line(&self.subdomain, &target, &[], self.ttl);
        success_message("added TXT record", &self.domain, Some(&line))
    }
}

// ============================================================================
// NS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddNsRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain to delegate.
    pub subdomain: String,

    /// Nameserver hostname (e.g., ns1.example.net).
    pub dns_server: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddNsRecordParams {
    const NAME: &'static str = "regru_add_ns_record";
    const TITLE: &'static str = "Add NS Record";
    const DESCRIPTION: &'static str = "Add an NS record (nameserver) to a domain's DNS zone on Reg.ru. \
Delegates DNS resolution for a subdomain to another nameserver.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("dns_server", &self.dns_server)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_ns(&self.domain, &self.subdomain, &self.dns_server, Some(self.ttl))
            .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let line = record_line(&self.subdomain, &self.dns_server, &[], self.ttl);
        success_message("added NS record", &self.domain, Some(&line))
    }
}

// ============================================================================
// SRV
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddSrvRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Service name including protocol (e.g., _sip._tcp).
    pub service: String,

    /// Priority value (0-65535, lower = higher priority).
    pub priority: u16,

    /// Weight for load balancing (0-65535).
    pub weight: u16,

    /// Port number (0-65535).
    pub port: u16,

    /// Target hostname (e.g., sip.example.com).
    pub target: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddSrvRecordParams {
    const NAME: &'static str = "regru_add_srv_record";
    const TITLE: &'static str = "Add SRV Record";
    const DESCRIPTION: &'static str = "Add an SRV record (service) to a domain's DNS zone on Reg.ru. \
Specifies the location of a service (host and port) for service discovery.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::required("service", &self.service)?;
        validation::required("target", &self.target)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_srv(
            &self.domain,
            &self.service,
            self.priority,
            self.weight,
            self.port,
            &self.target,
            Some(self.ttl),
        )
        .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let target = format!("{}:{}", self.target, self.port);
        let extras = [
            format!("priority: {}", self.priority),
            format!("weight: {}", self.weight),
        ];
        let line = record_line(&self.service, &target, &extras, self.ttl);
        success_message("added SRV record", &self.domain, Some(&line))
    }
}

// ============================================================================
// CAA
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddCaaRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain name. Use '@' for the root domain.
    pub subdomain: String,

    /// CAA flags (0-255, typically 0).
    #[serde(default)]
    pub flags: u8,

    /// CAA tag: 'issue', 'issuewild', or 'iodef'.
    pub tag: CaaTag,

    /// CAA value (e.g., 'letsencrypt.org' or 'mailto:security@example.com').
    pub value: String,

    /// Time to live in seconds (60-86400, default: 3600).
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

#[async_trait]
impl ZoneOperation for AddCaaRecordParams {
    const NAME: &'static str = "regru_add_caa_record";
    const TITLE: &'static str = "Add CAA Record";
    const DESCRIPTION: &'static str = "Add a CAA record (Certificate Authority Authorization) to a domain's DNS zone on Reg.ru. \
Controls which certificate authorities can issue SSL certificates for the domain.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("value", &self.value)?;
        validation::ttl("ttl", self.ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.add_caa(
            &self.domain,
            &self.subdomain,
            self.flags,
            self.tag,
            &self.value,
            Some(self.ttl),
        )
        .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let target = format!("{} {} \"{}\"", self.flags, self.tag, self.value);
        let line = record_line(&self.subdomain, &target, &[], self.ttl);
        success_message("added CAA record", &self.domain, Some(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::endpoints;
    use crate::domains::registrar::mock::MockRegistrar;
    use crate::domains::tools::definitions::operation::ZoneTool;
    use crate::domains::tools::definitions::operation::test_support::{args, is_error, text};
    use serde_json::json;

    #[tokio::test]
    async fn test_add_a_record_end_to_end() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddARecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "www", "ipaddr": "1.2.3.4"})),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        let message = text(&result);
        assert!(message.contains("www"));
        assert!(message.contains("1.2.3.4"));
        assert!(message.contains("3600s"));

        let (endpoint, params) = mock.last_call().unwrap();
        assert_eq!(endpoint, endpoints::ADD_ALIAS);
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("domain_name"), Some("example.com"));
        assert_eq!(params.get("subdomain"), Some("www"));
        assert_eq!(params.get("ipaddr"), Some("1.2.3.4"));
        assert_eq!(params.get("ttl"), Some("3600"));
    }

    #[tokio::test]
    async fn test_add_a_record_domain_not_found() {
        let mock = MockRegistrar::answering(json!({
            "result": "error",
            "error_code": "DOMAIN_NOT_FOUND",
            "error_text": "Domain not found"
        }));
        let result = ZoneTool::<AddARecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "www", "ipaddr": "1.2.3.4"})),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Error: Domain not found in your Reg.ru account. Verify domain ownership and spelling."
        );
    }

    #[tokio::test]
    async fn test_invalid_ip_never_reaches_registrar() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddARecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "www", "ipaddr": "1.2.3"})),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert!(text(&result).contains("ipaddr"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddAaaaRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "ipaddr": "2001:db8::1",
                "comment": "extra"
            })),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert!(text(&result).starts_with("Error: Invalid arguments"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ttl_out_of_range() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddCnameRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "blog",
                "canonical_name": "example.github.io",
                "ttl": 30
            })),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Error: ttl must be between 60 and 86400 seconds"
        );
    }

    #[tokio::test]
    async fn test_add_mx_record_summary() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddMxRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "mail_server": "mx.example.com",
                "priority": 10,
                "ttl": 600
            })),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        assert!(text(&result).contains("**@** → mx.example.com (priority: 10, TTL: 600s)"));
    }

    #[tokio::test]
    async fn test_priority_out_of_u16_range() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddMxRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "mail_server": "mx.example.com",
                "priority": 70000
            })),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_txt_record_truncates_preview() {
        let mock = MockRegistrar::succeeding();
        let long = "v=DKIM1; k=rsa; p=".to_string() + &"A".repeat(100);
        let result = ZoneTool::<AddTxtRecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "_domainkey", "text": long})),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        assert!(text(&result).contains("...` (TTL: 3600s)"));
        let (_, params) = mock.last_call().unwrap();
        assert_eq!(params.get("text"), Some(long.as_str()));
    }

    #[tokio::test]
    async fn test_add_txt_record_too_long() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddTxtRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "text": "x".repeat(MAX_TXT_LEN + 1)
            })),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_ns_record() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddNsRecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "dev", "dns_server": "ns1.example.net"})),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        let (endpoint, params) = mock.last_call().unwrap();
        assert_eq!(endpoint, endpoints::ADD_NS);
        assert_eq!(params.get("dns_server"), Some("ns1.example.net"));
    }

    #[tokio::test]
    async fn test_add_srv_record_summary() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddSrvRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "service": "_sip._tcp",
                "priority": 10,
                "weight": 5,
                "port": 5060,
                "target": "sip.example.com"
            })),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        assert!(text(&result).contains(
            "**_sip._tcp** → sip.example.com:5060 (priority: 10, weight: 5, TTL: 3600s)"
        ));
    }

    #[tokio::test]
    async fn test_add_caa_record_defaults_flags() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddCaaRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "tag": "issue",
                "value": "letsencrypt.org"
            })),
            &mock,
        )
        .await;

        assert!(!is_error(&result));
        assert!(text(&result).contains("0 issue \"letsencrypt.org\""));
        let (endpoint, params) = mock.last_call().unwrap();
        assert_eq!(endpoint, endpoints::ADD_CAA);
        assert_eq!(params.get("flags"), Some("0"));
        assert_eq!(params.get("tag"), Some("issue"));
    }

    #[tokio::test]
    async fn test_add_caa_record_rejects_unknown_tag() {
        let mock = MockRegistrar::succeeding();
        let result = ZoneTool::<AddCaaRecordParams>::call(
            args(json!({
                "domain": "example.com",
                "subdomain": "@",
                "tag": "contact",
                "value": "x"
            })),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_connect_failure_message() {
        use crate::domains::registrar::error::TransportKind;

        let mock = MockRegistrar::succeeding()
            .then_transport_failure(TransportKind::Connect, "connection refused");
        let result = ZoneTool::<AddARecordParams>::call(
            args(json!({"domain": "example.com", "subdomain": "www", "ipaddr": "1.2.3.4"})),
            &mock,
        )
        .await;

        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Error: Cannot connect to Reg.ru API. Check your internet connection."
        );
    }
}
