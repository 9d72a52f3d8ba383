use crate::config::KeywordConfig;
use crate::feed::Category;

pub const DEFAULT_AI_TERMS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "ai ",
    " ai",
    "llm",
    "chatgpt",
    "openai",
    "neural network",
    "deepfake",
    "ai model",
    "generative ai",
    "large language model",
    "ai security",
    "ai vulnerability",
    "ai attack",
    "prompt injection",
    "ai bias",
    "grok",
    "claude",
    "gemini",
    "copilot",
    "bard",
    "ai-powered",
    "ai tool",
    "algorithmic",
    "automated decision",
    "ai system",
];

pub const DEFAULT_REGULATION_TERMS: &[&str] = &[
    "regulatory",
    "compliance fine",
    "gdpr violation",
    "gdpr",
    "ccpa",
    "sec filing",
    "sec charges",
    "ftc action",
    "ftc",
    "cisa directive",
    "cisa advisory",
    "nist framework",
    "government mandate",
    "new law",
    "policy change",
    "court ruling",
    "lawsuit",
    "regulatory fine",
    "compliance requirement",
    "data protection law",
    "privacy regulation",
    "privacy law",
    "investigation",
    "enforcement action",
    "penalty",
    "sanctions",
    "court order",
    "legal settlement",
    "doj",
    "department of justice",
    "attorney general",
];

pub const DEFAULT_REGULATION_PHRASES: &[&str] = &[
    "ordered to pay",
    "fined for",
    "fined ",
    "regulatory action",
    "compliance violation",
    "government investigation",
    "legal action",
    "court orders",
    "settlement agreement",
    "consent decree",
    "agrees to pay",
    "must pay",
    "penalty of",
    "violating",
];

pub const DEFAULT_AGENCY_TERMS: &[&str] = &[
    "cisa ",
    "fbi ",
    "nsa ",
    "sec ",
    "ftc ",
    "doj ",
    "treasury",
    "homeland security",
    "cyber command",
    "federal",
    "government",
    "congress",
    "senate",
    "house of representatives",
];

/// Routes an article into a digest category by evaluating an ordered
/// decision list, first match wins.
///
/// AI rules run strictly before regulation rules, so an article
/// mentioning both (e.g. an FTC action on an LLM vendor) always lands
/// in the AI section — a deterministic tie-break, not an accident.
pub struct Categorizer {
    rules: Vec<(Vec<String>, Category)>,
}

impl Categorizer {
    pub fn new(keywords: &KeywordConfig) -> Self {
        let rules = vec![
            (lowercase_all(&keywords.ai_topics), Category::Ai),
            (lowercase_all(&keywords.regulation_topics), Category::Regulation),
            (lowercase_all(&keywords.regulation_phrases), Category::Regulation),
            (lowercase_all(&keywords.agency_names), Category::Regulation),
        ];
        Self { rules }
    }

    /// Pure function of (title, description).
    pub fn categorize(&self, title: &str, description: &str) -> Category {
        let text = format!("{} {}", title, description).to_lowercase();

        for (terms, category) in &self.rules {
            if terms.iter().any(|term| text.contains(term)) {
                return *category;
            }
        }

        Category::Cybersecurity
    }
}

fn lowercase_all(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::new(&KeywordConfig::default())
    }

    #[test]
    fn test_ai_rules_precede_regulation_rules() {
        let c = categorizer();
        // Matches both rule groups; AI wins because it runs first.
        assert_eq!(c.categorize("New LLM regulation from FTC", ""), Category::Ai);
    }

    #[test]
    fn test_regulation_terms_and_phrases() {
        let c = categorizer();
        assert_eq!(
            c.categorize("Hospital operator fined for HIPAA lapses", ""),
            Category::Regulation
        );
        assert_eq!(
            c.categorize("Broker agrees to pay millions over breach disclosure", ""),
            Category::Regulation
        );
        assert_eq!(
            c.categorize("Telecom giant under government investigation", ""),
            Category::Regulation
        );
    }

    #[test]
    fn test_default_is_cybersecurity() {
        let c = categorizer();
        assert_eq!(
            c.categorize("Botnet resurfaces with new loader", "spreads via phishing"),
            Category::Cybersecurity
        );
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let c = categorizer();
        let title = "Deepfake scam hits payment processor";
        let first = c.categorize(title, "");
        for _ in 0..3 {
            assert_eq!(c.categorize(title, ""), first);
        }
        assert_eq!(first, Category::Ai);
    }
}
