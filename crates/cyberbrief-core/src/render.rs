//! Plain-text digest rendering.
//!
//! Section order is fixed and every section header is always emitted;
//! an empty input degrades to that section's "none found" sentence
//! rather than dropping the header.

use chrono::{DateTime, Local};

use crate::config::ContentConfig;
use crate::digest::Digest;
use crate::feed::{Article, BlogDigest, Category};
use crate::kev::Vulnerability;

/// Headline marker for high-priority (financial-services) items.
const PRIORITY_GLYPH: &str = " 🏦";
const PRIORITY_THRESHOLD: u8 = 3;

const RISK_BUDGET: usize = 120;
const ACTION_BUDGET: usize = 100;

pub fn render_digest(digest: &Digest, content: &ContentConfig) -> String {
    render_digest_at(digest, content, Local::now())
}

fn render_digest_at(digest: &Digest, content: &ContentConfig, now: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str("CYBERBRIEF DAILY\n");
    out.push_str("Executive Cyber Threat Intelligence\n");
    out.push_str(&format!("{}\n\n", now.format("%B %d, %Y")));

    if let Some(summary) = &digest.executive_summary {
        out.push_str("EXECUTIVE SUMMARY\n");
        out.push_str(&"=".repeat(17));
        out.push_str("\n\n");
        out.push_str(summary.trim());
        out.push_str("\n\n");
    }

    render_article_section(
        &mut out,
        "CYBERSECURITY NEWS",
        digest.in_category(Category::Cybersecurity),
        content.max_articles,
        "No major cybersecurity news found in current feeds.",
    );

    render_article_section(
        &mut out,
        "CYBERSECURITY REGULATION NEWS",
        digest.in_category(Category::Regulation),
        content.max_regulation,
        "No cybersecurity regulation news found in current feeds.",
    );

    render_article_section(
        &mut out,
        "AI NEWS",
        digest.in_category(Category::Ai),
        content.max_ai,
        "No AI-related cybersecurity news found in current feeds.",
    );

    render_vulnerability_section(&mut out, &digest.vulnerabilities, content.max_vulns);
    render_blog_section(&mut out, &digest.blogs, content.blog_posts_per_blog);

    out.push_str(&"=".repeat(40));
    out.push('\n');
    out.push_str("CyberBrief Daily\n");
    out.push_str(&format!("Generated: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    out.push_str("Sources: live security news feeds and the CISA KEV catalog\n");
    out.push_str(&format!("{} = Financial services priority\n", PRIORITY_GLYPH.trim()));

    out
}

fn render_article_section(
    out: &mut String,
    header: &str,
    articles: Vec<&Article>,
    limit: usize,
    empty_text: &str,
) {
    out.push_str(header);
    out.push('\n');
    out.push_str(&"=".repeat(header.chars().count()));
    out.push_str("\n\n");

    if articles.is_empty() {
        out.push_str(empty_text);
        out.push_str("\n\n");
        return;
    }

    for article in articles.into_iter().take(limit) {
        let glyph = if article.priority >= PRIORITY_THRESHOLD {
            PRIORITY_GLYPH
        } else {
            ""
        };
        out.push_str(&format!("• {}{}\n", article.title, glyph));
        out.push_str(&format!("  {}\n", article.summary()));
        out.push_str(&format!("  Source: {} | {}\n\n", article.source, article.link));
    }
}

fn render_vulnerability_section(out: &mut String, vulns: &[Vulnerability], limit: usize) {
    let header = "NOTABLE VULNERABILITIES";
    out.push_str(header);
    out.push('\n');
    out.push_str(&"=".repeat(header.chars().count()));
    out.push_str("\n\n");

    if vulns.is_empty() {
        out.push_str("No new notable vulnerabilities in recent weeks.\n\n");
        return;
    }

    for vuln in vulns.iter().take(limit) {
        out.push_str(&format!(
            "• {} - {} {}\n",
            vuln.cve_id, vuln.vendor, vuln.product
        ));
        out.push_str(&format!("  Added: {}\n", vuln.date_added.format("%Y-%m-%d")));
        out.push_str(&format!(
            "  Risk: {}\n",
            truncate_ellipsis(&vuln.short_description, RISK_BUDGET)
        ));
        if let Some(action) = &vuln.required_action {
            out.push_str(&format!(
                "  Action: {}\n",
                truncate_ellipsis(action, ACTION_BUDGET)
            ));
        }
        out.push('\n');
    }
}

fn render_blog_section(out: &mut String, blogs: &[BlogDigest], posts_per_blog: usize) {
    let header = "ACTIVE SECURITY BLOGS";
    out.push_str(header);
    out.push('\n');
    out.push_str(&"=".repeat(header.chars().count()));
    out.push_str("\n\n");

    if blogs.is_empty() {
        out.push_str("Unable to retrieve active security blog content at this time.\n\n");
        return;
    }

    for (i, blog) in blogs.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, blog.name));
        for post in blog.posts.iter().take(posts_per_blog) {
            out.push_str(&format!("   • {}\n", post.title));
            out.push_str(&format!("     {}\n", post.link));
        }
        out.push('\n');
    }
}

/// Truncate to a character budget, marking truncation with an ellipsis.
fn truncate_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}
