// src/tenancy/hostname.rs
use crate::config::tenancy::TenancySettings;
use crate::models::tenant::is_valid_slug;

/// Result of classifying an incoming host header.
#[derive(Debug, Clone, PartialEq)]
pub enum HostClass {
    /// One of the configured root/marketing hostnames.
    Root,
    /// A manually mapped legacy hostname; the slug comes verbatim from
    /// the configuration table.
    Legacy(String),
    /// A `<slug>.<wildcard-suffix>` hostname.
    Wildcard(String),
    /// Anything we could not derive a tenant from. The middleware
    /// treats this as pass-through rather than an error.
    Unrecognized,
}

impl HostClass {
    pub fn slug(&self) -> Option<&str> {
        match self {
            HostClass::Legacy(slug) | HostClass::Wildcard(slug) => Some(slug),
            _ => None,
        }
    }
}

/// Classify a host header against the static tenancy configuration.
///
/// Precedence: root set, then the legacy mapping table, then wildcard
/// suffix stripping. The legacy table is checked before suffix
/// stripping on purpose so a manual mapping always wins.
pub fn classify(host: &str, settings: &TenancySettings) -> HostClass {
    if host.is_empty() {
        return HostClass::Unrecognized;
    }

    if settings.is_root_host(host) {
        return HostClass::Root;
    }

    if let Some(slug) = settings.legacy_slug(host) {
        return HostClass::Legacy(slug.to_string());
    }

    for suffix in &settings.wildcard_suffixes {
        if let Some(candidate) = host.strip_suffix(suffix.as_str()) {
            // IPv6 literals, port-bearing labels and dotted labels are
            // never tenant slugs.
            if candidate.contains(':')
                || candidate.contains('[')
                || candidate.contains(']')
                || candidate.contains('.')
            {
                return HostClass::Unrecognized;
            }
            if candidate == host || !is_valid_slug(candidate) {
                return HostClass::Unrecognized;
            }
            return HostClass::Wildcard(candidate.to_string());
        }
    }

    HostClass::Unrecognized
}
