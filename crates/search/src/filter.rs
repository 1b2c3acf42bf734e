//! Confidence and trust filtering.
//!
//! Both filters share one filter-with-fallback primitive: when a predicate
//! would empty a non-empty set, the input is kept unchanged. Preferring
//! something over nothing at both stages is a deliberate product policy,
//! not a bug.

use crate::registry::DomainRegistry;
use crate::types::{RawResult, SearchScope};

/// Apply a predicate, preserving order. If the surviving set would be empty
/// while the input was not, the input is returned unchanged; the second
/// element reports whether that fallback fired.
pub fn filter_with_fallback<T, P>(items: Vec<T>, predicate: P) -> (Vec<T>, bool)
where
    P: Fn(&T) -> bool,
{
    if items.is_empty() {
        return (items, false);
    }

    let survivors = items.iter().filter(|item| predicate(item)).count();
    if survivors == 0 {
        return (items, true);
    }

    let filtered = items.into_iter().filter(|item| predicate(item)).collect();
    (filtered, false)
}

/// Prune low-confidence hits using the scope's threshold.
///
/// Results lacking a score pass unconditionally (treated as 1.0). A filter
/// that would remove everything falls back to the unfiltered input.
pub fn confidence_filter(results: Vec<RawResult>, scope: SearchScope) -> Vec<RawResult> {
    let threshold = scope.policy().confidence_threshold;
    let input_len = results.len();

    let (kept, fell_back) =
        filter_with_fallback(results, |result| result.confidence() >= threshold);

    if fell_back {
        tracing::debug!(
            "All {} results scored below {:.2}; keeping the unfiltered set",
            input_len,
            threshold
        );
    } else {
        tracing::debug!(
            "Confidence filter kept {}/{} results (threshold {:.2})",
            kept.len(),
            input_len,
            threshold
        );
    }

    kept
}

/// Restrict results to the trusted registry in strict scope.
///
/// Other scopes pass through untouched. As with the confidence filter, an
/// empty match set falls back to the prior set rather than returning nothing.
pub fn trust_filter(
    results: Vec<RawResult>,
    scope: SearchScope,
    registry: &DomainRegistry,
) -> Vec<RawResult> {
    if !scope.policy().restrict_to_registry {
        return results;
    }

    let input_len = results.len();
    let (kept, fell_back) =
        filter_with_fallback(results, |result| registry.contains_url(&result.url));

    if fell_back {
        tracing::debug!(
            "No result URL matched the trusted registry; keeping all {} results",
            input_len
        );
    } else {
        tracing::debug!("Trust filter kept {}/{} results", kept.len(), input_len);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, score: Option<f32>) -> RawResult {
        RawResult {
            url: url.to_string(),
            title: "Title".to_string(),
            content: "Content".to_string(),
            score,
        }
    }

    #[test]
    fn test_filter_with_fallback_keeps_matches() {
        let (kept, fell_back) = filter_with_fallback(vec![1, 2, 3, 4], |n| n % 2 == 0);
        assert_eq!(kept, vec![2, 4]);
        assert!(!fell_back);
    }

    #[test]
    fn test_filter_with_fallback_returns_input_when_emptied() {
        let (kept, fell_back) = filter_with_fallback(vec![1, 3, 5], |n| n % 2 == 0);
        assert_eq!(kept, vec![1, 3, 5]);
        assert!(fell_back);
    }

    #[test]
    fn test_filter_with_fallback_empty_input() {
        let (kept, fell_back) = filter_with_fallback(Vec::<i32>::new(), |_| true);
        assert!(kept.is_empty());
        assert!(!fell_back);
    }

    #[test]
    fn test_confidence_filter_strict_threshold() {
        let results = vec![
            result("https://a", Some(0.9)),
            result("https://b", Some(0.4)),
            result("https://c", Some(0.5)),
        ];

        let kept = confidence_filter(results, SearchScope::StrictTrusted);
        let urls: Vec<&str> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a", "https://c"]);
    }

    #[test]
    fn test_confidence_filter_open_threshold() {
        let results = vec![
            result("https://a", Some(0.9)),
            result("https://b", Some(0.6)),
        ];

        let kept = confidence_filter(results, SearchScope::Unrestricted);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://a");
    }

    #[test]
    fn test_confidence_filter_unscored_results_pass() {
        let results = vec![result("https://a", None), result("https://b", Some(0.1))];

        let kept = confidence_filter(results, SearchScope::Unrestricted);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://a");
    }

    #[test]
    fn test_confidence_filter_never_empties_nonempty_input() {
        let results = vec![
            result("https://a", Some(0.1)),
            result("https://b", Some(0.2)),
        ];

        let kept = confidence_filter(results, SearchScope::StrictTrusted);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_trust_filter_strict_keeps_registry_matches() {
        let registry = DomainRegistry::default();
        let results = vec![
            result("https://webland.ap.gov.in/records", Some(0.9)),
            result("https://example.com/blog", Some(0.9)),
        ];

        let kept = trust_filter(results, SearchScope::StrictTrusted, &registry);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://webland.ap.gov.in/records");
    }

    #[test]
    fn test_trust_filter_falls_back_when_nothing_matches() {
        let registry = DomainRegistry::default();
        let results = vec![
            result("https://example.com/a", Some(0.9)),
            result("https://example.org/b", Some(0.9)),
        ];

        let kept = trust_filter(results, SearchScope::StrictTrusted, &registry);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_trust_filter_is_noop_for_open_scopes() {
        let registry = DomainRegistry::default();
        let results = vec![result("https://example.com/a", Some(0.9))];

        for scope in [SearchScope::Inclusive, SearchScope::Unrestricted] {
            let kept = trust_filter(results.clone(), scope, &registry);
            assert_eq!(kept.len(), 1);
        }
    }

    #[test]
    fn test_filters_preserve_provider_order() {
        let results = vec![
            result("https://b", Some(0.6)),
            result("https://a", Some(0.9)),
            result("https://c", Some(0.8)),
        ];

        let kept = confidence_filter(results, SearchScope::StrictTrusted);
        let urls: Vec<&str> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://b", "https://a", "https://c"]);
    }
}
