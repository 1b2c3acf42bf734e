//! Trusted domain registry.
//!
//! The fixed allow-list of Andhra Pradesh government domains. Loaded once at
//! process start and never mutated afterwards, so it is safe for unlimited
//! concurrent readers.

/// Curated Andhra Pradesh government domain suffixes, in display order.
pub const AP_GOV_DOMAINS: &[&str] = &[
    "ap.gov.in",
    "apland.ap.gov.in",
    "webland.ap.gov.in",
    "registration.ap.gov.in",
    "aponline.ap.gov.in",
    "appolice.gov.in",
    "aptransport.org",
    "aphrdi.ap.gov.in",
    "apgenco.gov.in",
    "aptransco.gov.in",
    "apspdcl.in",
    "apepdcl.in",
    "apcpdcl.gov.in",
    "apssb.gov.in",
    "appsc.gov.in",
    "aptet.apcfss.in",
    "school9.ap.gov.in",
    "apfinance.gov.in",
    "apwater.gov.in",
    "aphorticulture.gov.in",
    "apagri.gov.in",
    "apforest.gov.in",
    "aptourism.gov.in",
    "apithelp.gov.in",
    "village.ap.gov.in",
    "creditplus.ap.gov.in",
    "epass.ap.gov.in",
    "apmepma.gov.in",
    "appost.in",
    "andhrapradesh.gov.in",
];

/// Ordered set of trusted domain suffixes.
///
/// Matching is case-insensitive substring containment against a result URL,
/// the same rule the original service applied.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    domains: Vec<String>,
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self {
            domains: AP_GOV_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl DomainRegistry {
    /// Build the registry from the built-in list plus configured extras,
    /// preserving order and skipping duplicates.
    pub fn with_extra_domains(extra: &[String]) -> Self {
        let mut registry = Self::default();
        for domain in extra {
            let normalized = domain.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            if !registry.domains.iter().any(|d| d == &normalized) {
                registry.domains.push(normalized);
            }
        }
        registry
    }

    /// Whether the URL falls under any registry entry.
    pub fn contains_url(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.domains.iter().any(|domain| url.contains(domain))
    }

    /// Registry entries in order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Number of registry entries.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the registry is empty (never the case for the built-in list).
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list_has_no_duplicates() {
        let registry = DomainRegistry::default();
        let mut seen = std::collections::HashSet::new();
        for domain in registry.domains() {
            assert!(seen.insert(domain.clone()), "duplicate entry: {}", domain);
        }
    }

    #[test]
    fn test_contains_url_matches_registry_domain() {
        let registry = DomainRegistry::default();
        assert!(registry.contains_url("https://webland.ap.gov.in/records/123"));
        assert!(registry.contains_url("https://appsc.gov.in/notifications"));
    }

    #[test]
    fn test_contains_url_is_case_insensitive() {
        let registry = DomainRegistry::default();
        assert!(registry.contains_url("https://WEBLAND.AP.GOV.IN/Records"));
    }

    #[test]
    fn test_contains_url_rejects_unknown_domain() {
        let registry = DomainRegistry::default();
        assert!(!registry.contains_url("https://example.com/ap-government-news"));
    }

    #[test]
    fn test_extra_domains_are_appended_once() {
        let extra = vec![
            "apdairy.gov.in".to_string(),
            "APDAIRY.GOV.IN".to_string(),
            "ap.gov.in".to_string(), // already built in
        ];
        let registry = DomainRegistry::with_extra_domains(&extra);

        assert_eq!(registry.len(), AP_GOV_DOMAINS.len() + 1);
        assert!(registry.contains_url("https://apdairy.gov.in/schemes"));
    }
}
