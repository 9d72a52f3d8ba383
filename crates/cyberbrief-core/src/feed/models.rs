use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Digest section an article is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cybersecurity,
    Regulation,
    Ai,
}

impl Default for Category {
    fn default() -> Self {
        Self::Cybersecurity
    }
}

/// A single RSS/Atom item as extracted by the parser, before any
/// filtering or classification.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Parsed publication time, None when the feed's date string could
    /// not be parsed (the recency filter decides what that means).
    pub published: Option<DateTime<Local>>,
}

/// A categorized, scored article ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: Option<DateTime<Local>>,
    pub source: String,
    pub category: Category,
    pub priority: u8,
}

impl Article {
    /// Derive a short reader-facing summary from the raw description.
    ///
    /// Strips HTML, normalizes whitespace, breaks near 200 characters at
    /// a sentence boundary when one exists, and falls back to a canned
    /// keyword-driven line when the description is too thin to use.
    pub fn summary(&self) -> String {
        let clean = html_to_text(&self.description);
        let clean = clean.split_whitespace().collect::<Vec<_>>().join(" ");

        let summary = if clean.chars().count() > 250 {
            match clean[..floor_char_boundary(&clean, 200)].rfind(". ") {
                Some(pos) if pos > 100 => clean[..pos + 1].to_string(),
                _ => {
                    let head = &clean[..floor_char_boundary(&clean, 200)];
                    let trimmed = head.rsplit_once(' ').map(|(s, _)| s).unwrap_or(head);
                    format!("{}...", trimmed)
                }
            }
        } else {
            clean
        };

        if summary.chars().count() >= 40 {
            return summary.trim().to_string();
        }

        // Description missing or too short; fall back to a generic line
        // keyed on the headline.
        let title = self.title.to_lowercase();
        let fallback = if title.contains("ransomware") || title.contains("ransom") {
            "Ransomware attack or campaign identified with potential business impact on targeted organizations."
        } else if title.contains("vulnerability") || title.contains("flaw") || title.contains("bug") {
            "Security vulnerability discovered that could allow unauthorized access or system compromise."
        } else if title.contains("breach") || title.contains("hack") || title.contains("compromise") {
            "Cybersecurity incident reported with potential data exposure or system compromise."
        } else if title.contains("ai") || title.contains("artificial intelligence") || title.contains("machine learning") {
            "AI-related security development affecting enterprise systems or security practices."
        } else if title.contains("regulation") || title.contains("compliance") || title.contains("legal") || title.contains("court") {
            "Regulatory or legal development affecting cybersecurity compliance requirements."
        } else if title.contains("malware") || title.contains("trojan") || title.contains("virus") {
            "Malicious software discovered targeting business or enterprise environments."
        } else {
            "Cybersecurity development with potential implications for business operations."
        };
        fallback.to_string()
    }
}

/// One recent post from a security blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
}

/// A blog with at least one recent post, for the activity section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDigest {
    pub name: String,
    pub posts: Vec<BlogPost>,
}

/// Convert HTML content to plain text.
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 80).unwrap_or_else(|_| html.to_string())
}

/// Largest byte index <= max that falls on a char boundary.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: title.to_string(),
            link: "https://example.com/post".to_string(),
            description: description.to_string(),
            published: None,
            source: "Test".to_string(),
            category: Category::default(),
            priority: 0,
        }
    }

    #[test]
    fn test_summary_strips_html_and_keeps_short_text() {
        let a = article(
            "Patch now",
            "<p>A critical flaw in the gateway allows <b>remote code execution</b> on exposed appliances.</p>",
        );
        let summary = a.summary();
        assert!(!summary.contains('<'));
        assert!(summary.contains("remote code execution"));
    }

    #[test]
    fn test_summary_truncates_long_text_at_sentence() {
        let body = "Attackers exploited the bug across several managed service providers this week. \
                    The vendor confirmed active exploitation and released an emergency fix. \
                    Administrators are urged to apply the update immediately, and a long tail of \
                    additional detail follows that pushes this well past the truncation budget.";
        let summary = article("Exploited bug", body).summary();
        assert!(summary.chars().count() <= 210);
        assert!(summary.ends_with('.') || summary.ends_with("..."));
    }

    #[test]
    fn test_summary_fallback_for_thin_description() {
        let summary = article("New ransomware gang emerges", "").summary();
        assert!(summary.contains("Ransomware"));

        let summary = article("Quarterly roundup", "").summary();
        assert!(summary.contains("Cybersecurity development"));
    }

    #[test]
    fn test_category_default_is_cybersecurity() {
        assert_eq!(Category::default(), Category::Cybersecurity);
    }
}
