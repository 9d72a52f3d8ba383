use crate::config::KeywordConfig;

/// Financial-services vocabulary, the highest-priority group (+3).
pub const DEFAULT_FINANCIAL_TERMS: &[&str] = &[
    "bank",
    "banking",
    "financial",
    "credit union",
    "payment",
    "fintech",
    "wall street",
    "trading",
    "investment",
    "mortgage",
    "loan",
    "credit card",
    "financial services",
    "financial institution",
    "swift",
    "fedwire",
    "ach",
];

/// Broad industry impact / big-vendor vocabulary (+2).
pub const DEFAULT_BROAD_IMPACT_TERMS: &[&str] = &[
    "fortune 500",
    "enterprise",
    "all industries",
    "widespread",
    "global",
    "supply chain",
    "critical infrastructure",
    "healthcare",
    "government",
    "microsoft",
    "google",
    "amazon",
    "cloud",
    "saas",
    "zero-day",
    "ransomware",
];

/// Generic business relevance (+1).
pub const DEFAULT_BUSINESS_TERMS: &[&str] = &["corporate", "business", "company", "organization"];

/// Integer business-impact weight in 0..=6, used only to highlight
/// items, never to exclude them.
///
/// Each group contributes its increment at most once: the first match
/// within a group short-circuits that group only, while independent
/// groups stack (3+2+1 max). This asymmetry is preserved exactly as
/// observed in production behavior.
pub struct PriorityScorer {
    groups: Vec<(Vec<String>, u8)>,
}

impl PriorityScorer {
    pub fn new(keywords: &KeywordConfig) -> Self {
        let groups = vec![
            (lowercase_all(&keywords.financial_terms), 3),
            (lowercase_all(&keywords.broad_impact_terms), 2),
            (lowercase_all(&keywords.business_terms), 1),
        ];
        Self { groups }
    }

    /// Pure, order-independent function of which keyword groups match.
    pub fn score(&self, title: &str, description: &str) -> u8 {
        let text = format!("{} {}", title, description).to_lowercase();

        self.groups
            .iter()
            .filter(|(terms, _)| terms.iter().any(|term| text.contains(term)))
            .map(|(_, increment)| increment)
            .sum()
    }
}

fn lowercase_all(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> PriorityScorer {
        PriorityScorer::new(&KeywordConfig::default())
    }

    #[test]
    fn test_groups_stack_independently() {
        let s = scorer();
        // financial (+3) and broad-impact (+2) match, generic business
        // terms are absent: 3 + 2 + 0 = 5.
        assert_eq!(s.score("bank ransomware attack on enterprise cloud", ""), 5);
    }

    #[test]
    fn test_multiple_matches_within_a_group_count_once() {
        let s = scorer();
        // Three financial terms, nothing else: still just +3.
        assert_eq!(s.score("bank payment fintech outage", ""), 3);
    }

    #[test]
    fn test_maximum_score_is_six() {
        let s = scorer();
        assert_eq!(s.score("banking ransomware cripples corporate networks", ""), 6);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let s = scorer();
        assert_eq!(s.score("New phishing kit spotted", "targets webmail users"), 0);
    }

    #[test]
    fn test_score_is_within_range() {
        let s = scorer();
        for (title, desc) in [
            ("bank breach", "global corporate fallout"),
            ("router botnet", ""),
            ("Fortune 500 company loan fraud", "business impact"),
        ] {
            assert!(s.score(title, desc) <= 6);
        }
    }
}
