//! Argument checks shared by the zone tools.
//!
//! Each check returns a [`ToolError::Validation`] naming the offending field,
//! so a rejected call never reaches the registrar.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use crate::domains::tools::ToolError;

pub const MIN_TTL: u32 = 60;
pub const MAX_TTL: u32 = 86_400;
pub const DEFAULT_TTL: u32 = 3_600;

/// Longest name DNS allows, for both domains and subdomains.
pub const MAX_NAME_LEN: usize = 253;

/// Longest TXT content accepted in one record.
pub const MAX_TXT_LEN: usize = 4_096;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("domain pattern compiles")
});

// Leading underscore allowed for service labels such as _dmarc or _acme-challenge.
static SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@|\*|[a-zA-Z0-9_]([a-zA-Z0-9._-]{0,61}[a-zA-Z0-9])?)$")
        .expect("subdomain pattern compiles")
});

pub type Check = Result<(), ToolError>;

/// Serde default for record TTLs.
pub fn default_ttl() -> u32 {
    DEFAULT_TTL
}

pub fn required(field: &str, value: &str) -> Check {
    if value.is_empty() {
        return Err(ToolError::validation(field, "is required"));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize) -> Check {
    if value.chars().count() > max {
        return Err(ToolError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub fn domain(value: &str) -> Check {
    required("domain", value)?;
    max_len("domain", value, MAX_NAME_LEN)?;
    if !DOMAIN_RE.is_match(value) {
        return Err(ToolError::validation(
            "domain",
            "must be a fully qualified name like example.com",
        ));
    }
    Ok(())
}

pub fn subdomain(field: &str, value: &str) -> Check {
    required(field, value)?;
    max_len(field, value, MAX_NAME_LEN)?;
    if !SUBDOMAIN_RE.is_match(value) {
        return Err(ToolError::validation(
            field,
            "must be '@' for the root, '*' for a wildcard, or a host name",
        ));
    }
    Ok(())
}

pub fn ipv4(field: &str, value: &str) -> Check {
    value.parse::<Ipv4Addr>().map(|_| ()).map_err(|_| {
        ToolError::validation(field, "must be an IPv4 address like 192.168.1.1")
    })
}

pub fn ipv6(field: &str, value: &str) -> Check {
    value.parse::<Ipv6Addr>().map(|_| ()).map_err(|_| {
        ToolError::validation(field, "must be an IPv6 address like 2001:db8::1")
    })
}

pub fn ttl(field: &str, value: u32) -> Check {
    if !(MIN_TTL..=MAX_TTL).contains(&value) {
        return Err(ToolError::validation(
            field,
            format!("must be between {MIN_TTL} and {MAX_TTL} seconds"),
        ));
    }
    Ok(())
}

pub fn optional_ttl(field: &str, value: Option<u32>) -> Check {
    value.map_or(Ok(()), |v| ttl(field, v))
}
