//! Zone-wide tools: listing, removal, bulk update, SOA settings, clearing.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{records_markdown, success_message};
use super::operation::{ToolHints, ZoneOperation};
use super::validation::{self, Check};
use crate::domains::registrar::{
    ActionKind, ApiResponse, DnsRecord, RecordType, RegistrarApi, RegistrarResult, ZoneAction,
};
use crate::domains::tools::ToolError;

/// Largest batch the bulk update endpoint accepts.
pub const MAX_BULK_ACTIONS: usize = 50;

// ============================================================================
// Get records
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetRecordsParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,
}

/// Structured copy of a zone listing.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RecordListing {
    pub domain: String,
    pub total: usize,
    pub records: Vec<RecordRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa: Option<SoaRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RecordRow {
    /// Record type (A, MX, ...).
    pub record_type: String,
    pub subdomain: String,
    pub content: String,
    pub priority: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Zone TTL defaults as reported by the registrar (e.g. "1d", "3h").
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SoaRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ttl: Option<String>,
}

impl From<&DnsRecord> for RecordRow {
    fn from(record: &DnsRecord) -> Self {
        Self {
            record_type: record.record_type.clone(),
            subdomain: record.subdomain.clone(),
            content: record.content.clone(),
            priority: record.priority,
            ttl: record.ttl,
            state: record.state.clone(),
        }
    }
}

impl RecordListing {
    pub fn from_response(domain: &str, response: &ApiResponse) -> Self {
        let records: Vec<RecordRow> = response.records().iter().map(RecordRow::from).collect();
        Self {
            domain: domain.to_string(),
            total: records.len(),
            records,
            soa: response.soa().map(|soa| SoaRow {
                ttl: soa.ttl.clone(),
                minimum_ttl: soa.minimum_ttl.clone(),
            }),
        }
    }
}

#[async_trait]
impl ZoneOperation for GetRecordsParams {
    const NAME: &'static str = "regru_get_dns_records";
    const TITLE: &'static str = "Get DNS Records";
    const DESCRIPTION: &'static str = "Retrieve all DNS records for a domain from Reg.ru. \
Returns a markdown table of the zone (type, subdomain, content, priority) with the zone's SOA TTLs, \
plus the same records as structured content. \
Example: \"Show DNS records for example.com\" -> domain=\"example.com\".";
    const HINTS: ToolHints = ToolHints::READ_ONLY;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.get_resource_records(&self.domain).await
    }

    fn summary(&self, response: &ApiResponse) -> String {
        records_markdown(&self.domain, response.records(), response.soa())
    }

    fn structured(&self, response: &ApiResponse) -> Option<serde_json::Value> {
        serde_json::to_value(RecordListing::from_response(&self.domain, response)).ok()
    }

    fn output_schema() -> Option<Arc<JsonObject>> {
        Some(schema_for_type::<RecordListing>().into())
    }
}

// ============================================================================
// Remove record
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RemoveRecordParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Subdomain of the record to remove ('@' for the root).
    pub subdomain: String,

    /// DNS record type.
    pub record_type: RecordType,

    /// Record content to match for deletion (e.g., IP address, hostname).
    pub content: String,

    /// Priority value (required for MX records).
    #[serde(default)]
    pub priority: Option<u16>,
}

#[async_trait]
impl ZoneOperation for RemoveRecordParams {
    const NAME: &'static str = "regru_remove_record";
    const TITLE: &'static str = "Remove DNS Record";
    const DESCRIPTION: &'static str = "Remove a specific DNS record from a domain's zone on Reg.ru. \
Deletes a single record matching the specified type, subdomain, and content (and priority for MX). \
Use regru_get_dns_records first to see exact record values.";
    const HINTS: ToolHints = ToolHints::DESTRUCTIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::subdomain("subdomain", &self.subdomain)?;
        validation::required("content", &self.content)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.remove_record(
            &self.domain,
            &self.subdomain,
            self.record_type,
            &self.content,
            self.priority,
        )
        .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let details = format!(
            "Removed {} record: **{}** → {}",
            self.record_type, self.subdomain, self.content
        );
        success_message("removed DNS record", &self.domain, Some(&details))
    }
}

// ============================================================================
// Bulk update
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateRecordsParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// Ordered add/remove actions (1-50). They are applied in the order given.
    pub actions: Vec<ZoneAction>,
}

impl UpdateRecordsParams {
    fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.action == kind).count()
    }
}

#[async_trait]
impl ZoneOperation for UpdateRecordsParams {
    const NAME: &'static str = "regru_update_records";
    const TITLE: &'static str = "Bulk Update DNS Records";
    const DESCRIPTION: &'static str = "Perform bulk add/remove operations on DNS records for a domain on Reg.ru. \
Executes up to 50 add and remove actions in a single API call, in the order given. \
Useful for migrating DNS configurations or making coordinated changes. \
The batch is not guaranteed to be atomic: if the call fails, some leading actions may already have been applied, \
so check the zone with regru_get_dns_records before retrying. \
Example (replace an A record): actions=[{action:\"remove\", type:\"A\", subdomain:\"www\", content:\"1.1.1.1\"}, \
{action:\"add\", type:\"A\", subdomain:\"www\", content:\"2.2.2.2\"}]";
    const HINTS: ToolHints = ToolHints {
        read_only: false,
        destructive: true,
        idempotent: false,
    };

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;

        if self.actions.is_empty() || self.actions.len() > MAX_BULK_ACTIONS {
            return Err(ToolError::validation(
                "actions",
                format!("must contain between 1 and {MAX_BULK_ACTIONS} actions"),
            ));
        }

        self.actions.iter().enumerate().try_for_each(|(i, action)| {
            validation::required(&format!("actions[{i}].subdomain"), &action.subdomain)?;
            validation::required(&format!("actions[{i}].content"), &action.content)?;
            validation::optional_ttl(&format!("actions[{i}].ttl"), action.ttl)
        })
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.update_records(&self.domain, &self.actions).await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let parts: Vec<String> = [
            (self.count(ActionKind::Add), "added"),
            (self.count(ActionKind::Remove), "removed"),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}"))
        .collect();

        let details = format!(
            "{} actions performed ({})",
            self.actions.len(),
            parts.join(", ")
        );
        success_message("updated DNS records", &self.domain, Some(&details))
    }
}

// ============================================================================
// SOA
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSoaParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,

    /// SOA TTL in seconds (60-86400).
    #[serde(default)]
    pub ttl: Option<u32>,

    /// Minimum TTL for negative caching in seconds (60-86400).
    #[serde(default)]
    pub minimum_ttl: Option<u32>,
}

#[async_trait]
impl ZoneOperation for UpdateSoaParams {
    const NAME: &'static str = "regru_update_soa";
    const TITLE: &'static str = "Update SOA Record";
    const DESCRIPTION: &'static str = "Update the SOA (Start of Authority) record TTL settings for a domain on Reg.ru. \
Modifies TTL values in the SOA record, which controls DNS caching behavior for the zone. \
Only the values provided are changed.";
    const HINTS: ToolHints = ToolHints::ADDITIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)?;
        validation::optional_ttl("ttl", self.ttl)?;
        validation::optional_ttl("minimum_ttl", self.minimum_ttl)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.update_soa(&self.domain, self.ttl, self.minimum_ttl)
            .await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        let details: Vec<String> = [("TTL", self.ttl), ("Minimum TTL", self.minimum_ttl)]
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}s")))
            .collect();
        success_message("updated SOA record", &self.domain, Some(&details.join(", ")))
    }
}

// ============================================================================
// Clear zone
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ClearZoneParams {
    /// Fully qualified domain name (e.g., example.com).
    pub domain: String,
}

#[async_trait]
impl ZoneOperation for ClearZoneParams {
    const NAME: &'static str = "regru_clear_zone";
    const TITLE: &'static str = "Clear DNS Zone";
    const DESCRIPTION: &'static str = "Remove ALL DNS records for a domain on Reg.ru. \
WARNING: This is a destructive and irreversible operation. It deletes every DNS record in the zone. \
Use regru_get_dns_records first to back up the current configuration.";
    const HINTS: ToolHints = ToolHints::DESTRUCTIVE;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn validate(&self) -> Check {
        validation::domain(&self.domain)
    }

    async fn submit(&self, api: &dyn RegistrarApi) -> RegistrarResult<ApiResponse> {
        api.clear_zone(&self.domain).await
    }

    fn summary(&self, _response: &ApiResponse) -> String {
        success_message(
            "cleared all DNS records",
            &self.domain,
            Some("All DNS records have been removed from the zone."),
        )
    }
}
