use std::collections::HashMap;

use serde::Deserialize;

/// Static host-resolution configuration for the tenant router.
///
/// Loaded once at startup from the layered configuration files; none of
/// this is runtime-mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct TenancySettings {
    /// Hostnames that serve the marketing/root site (no tenant).
    pub root_hosts: Vec<String>,
    /// Manually mapped legacy hostnames, checked before suffix stripping.
    pub legacy_hosts: HashMap<String, String>,
    /// Wildcard suffixes stripped to obtain the tenant slug, e.g.
    /// ".localhost:3000" for local development and ".pitchside.app"
    /// for platform hosting.
    pub wildcard_suffixes: Vec<String>,
}

impl TenancySettings {
    pub fn is_root_host(&self, host: &str) -> bool {
        self.root_hosts.iter().any(|h| h == host)
    }

    pub fn legacy_slug(&self, host: &str) -> Option<&str> {
        self.legacy_hosts.get(host).map(String::as_str)
    }
}

impl Default for TenancySettings {
    fn default() -> Self {
        Self {
            root_hosts: vec![
                "pitchside.app".to_string(),
                "www.pitchside.app".to_string(),
                "localhost:3000".to_string(),
            ],
            legacy_hosts: HashMap::new(),
            wildcard_suffixes: vec![
                ".localhost:3000".to_string(),
                ".pitchside.app".to_string(),
            ],
        }
    }
}
