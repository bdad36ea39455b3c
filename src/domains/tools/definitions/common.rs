//! Response formatting shared by the zone tools.

use rmcp::model::{CallToolResult, Content};

use crate::domains::registrar::types::{DnsRecord, SoaSettings};

/// TXT content longer than this is shortened in confirmations.
pub const TXT_PREVIEW_LEN: usize = 60;

/// Confirmation for a successful mutation.
pub fn success_message(action: &str, domain: &str, details: Option<&str>) -> String {
    let mut message = format!("Successfully {action} for **{domain}**");
    if let Some(details) = details.filter(|d| !d.is_empty()) {
        message.push_str("\n\n");
        message.push_str(details);
    }
    message
}

/// One-line description of a record: `**<sub>** → <target> (<extras>TTL: <ttl>s)`.
pub fn record_line(subdomain: &str, target: &str, extras: &[String], ttl: u32) -> String {
    let mut annotations = extras.to_vec();
    annotations.push(format!("TTL: {ttl}s"));
    format!("**{subdomain}** → {target} ({})", annotations.join(", "))
}

/// Shorten long TXT content for display.
pub fn preview_text(text: &str) -> String {
    match text.char_indices().nth(TXT_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Markdown table of a zone's records, followed by its SOA TTLs when known.
pub fn records_markdown(domain: &str, records: &[DnsRecord], soa: Option<&SoaSettings>) -> String {
    if records.is_empty() {
        return format!("No DNS records found for **{domain}**.");
    }

    let mut lines = vec![
        format!("# DNS Records for {domain}"),
        String::new(),
        format!("Total records: {}", records.len()),
        String::new(),
        "| Type | Subdomain | Content | Priority |".to_string(),
        "|------|-----------|---------|----------|".to_string(),
    ];

    lines.extend(records.iter().map(|r| {
        format!(
            "| {} | {} | {} | {} |",
            r.record_type,
            r.subdomain,
            escape_cell(&r.content),
            r.priority
        )
    }));

    if let Some(soa) = soa {
        let soa_lines: Vec<String> = [("TTL", &soa.ttl), ("Minimum TTL", &soa.minimum_ttl)]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("- {label}: {v}")))
            .collect();
        if !soa_lines.is_empty() {
            lines.push(String::new());
            lines.push("SOA settings:".to_string());
            lines.extend(soa_lines);
        }
    }

    lines.join("\n")
}

// TXT values may contain pipes, which would split the table row.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// A failed call, reported as an error result rather than a protocol error.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}
