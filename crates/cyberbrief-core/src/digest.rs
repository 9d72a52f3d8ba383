//! Digest generation: the fetch → filter → categorize → score pipeline,
//! run fully sequentially over the configured sources.

use std::collections::HashSet;

use crate::ai::ExecutiveSummarizer;
use crate::config::AppConfig;
use crate::feed::{parse_items, Article, BlogDigest, BlogPost, Category, FeedFetcher, FeedItem};
use crate::kev::{parse_kev_csv, Vulnerability};
use crate::pipeline::{Categorizer, DateFallback, PriorityScorer, RecencyFilter, RelevanceFilter};
use crate::Result;

/// Cap on items considered per source before filtering.
const MAX_ITEMS_PER_SOURCE: usize = 20;

/// Headlines handed to the optional AI summary step.
const MAX_SUMMARY_HEADLINES: usize = 10;

#[derive(Debug, Clone)]
pub struct Digest {
    /// All accepted articles, deduplicated and sorted by priority
    /// descending (stable: configured source order among equals).
    pub articles: Vec<Article>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub blogs: Vec<BlogDigest>,
    pub executive_summary: Option<String>,
}

impl Digest {
    pub fn in_category(&self, category: Category) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.category == category).collect()
    }
}

/// Run the whole ingestion pipeline and return the assembled digest.
///
/// Sources are fetched one at a time in configured order; a failing
/// source contributes zero records and never aborts the run.
pub async fn generate(config: &AppConfig) -> Result<Digest> {
    let fetcher = FeedFetcher::new(config)?;

    let recency = RecencyFilter::hours(config.content.recency_hours, DateFallback::AssumeRecent);
    let relevance = RelevanceFilter::new(&config.keywords);
    let categorizer = Categorizer::new(&config.keywords);
    let scorer = PriorityScorer::new(&config.keywords);

    let mut articles = Vec::new();
    for source in config.sources.news.iter().filter(|s| s.enabled) {
        tracing::info!("Fetching articles from {}...", source.name);
        let content = fetcher.fetch_text(&source.url).await;
        if content.is_empty() {
            continue;
        }

        let items = match parse_items(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Error parsing feed from {}: {}", source.name, e);
                continue;
            }
        };

        let accepted = process_items(
            items,
            &source.name,
            &recency,
            &relevance,
            &categorizer,
            &scorer,
        );
        tracing::info!("Found {} relevant articles from {}", accepted.len(), source.name);
        articles.extend(accepted);
    }

    let articles = finalize_articles(articles);
    tracing::info!("Total articles accepted from all sources: {}", articles.len());

    let vulnerabilities = fetch_vulnerabilities(&fetcher, config).await;
    let blogs = fetch_blog_digests(&fetcher, config, &recency).await;

    let executive_summary = if config.openai.is_configured() {
        let headlines: Vec<String> = articles
            .iter()
            .take(MAX_SUMMARY_HEADLINES)
            .map(|a| a.title.clone())
            .collect();
        match ExecutiveSummarizer::new(&config.openai).summarize(&headlines).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Executive summary unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(Digest {
        articles,
        vulnerabilities,
        blogs,
        executive_summary,
    })
}

/// Filter, categorize and score one source's items.
fn process_items(
    items: Vec<FeedItem>,
    source_name: &str,
    recency: &RecencyFilter,
    relevance: &RelevanceFilter,
    categorizer: &Categorizer,
    scorer: &PriorityScorer,
) -> Vec<Article> {
    items
        .into_iter()
        .take(MAX_ITEMS_PER_SOURCE)
        .filter(|item| recency.is_recent(item.published))
        .filter(|item| relevance.is_relevant(&item.title, &item.description))
        .map(|item| {
            let category = categorizer.categorize(&item.title, &item.description);
            let priority = scorer.score(&item.title, &item.description);
            Article {
                title: item.title,
                link: item.link,
                description: item.description,
                published: item.published,
                source: source_name.to_string(),
                category,
                priority,
            }
        })
        .collect()
}

/// Deduplicate by link (first occurrence wins, i.e. the higher-priority
/// source) and sort by priority descending. The sort is stable, so
/// configured source order is preserved among equal scores.
fn finalize_articles(mut articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles.retain(|a| seen.insert(a.link.clone()));
    articles.sort_by(|a, b| b.priority.cmp(&a.priority));
    articles
}

async fn fetch_vulnerabilities(fetcher: &FeedFetcher, config: &AppConfig) -> Vec<Vulnerability> {
    tracing::info!("Fetching CISA KEV data...");
    let content = fetcher.fetch_text(&config.sources.kev_url).await;
    if content.is_empty() {
        return Vec::new();
    }
    parse_kev_csv(&content, config.content.kev_window_days, config.content.max_vulns)
}

/// Collect recent posts per configured blog; a blog appears only when
/// it has at least one post inside the recency window.
async fn fetch_blog_digests(
    fetcher: &FeedFetcher,
    config: &AppConfig,
    recency: &RecencyFilter,
) -> Vec<BlogDigest> {
    let mut blogs = Vec::new();

    for blog in config.sources.blogs.iter().filter(|b| b.enabled) {
        tracing::info!("Checking {}...", blog.name);
        let content = fetcher.fetch_text(&blog.url).await;
        if content.is_empty() {
            continue;
        }

        let items = match parse_items(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Error parsing blog feed from {}: {}", blog.name, e);
                continue;
            }
        };

        let posts: Vec<BlogPost> = items
            .into_iter()
            .filter(|item| recency.is_recent(item.published))
            .take(config.content.blog_posts_per_blog)
            .map(|item| BlogPost {
                title: item.title,
                link: item.link,
            })
            .collect();

        if !posts.is_empty() {
            tracing::info!("Found {} posts from {}", posts.len(), blog.name);
            blogs.push(BlogDigest {
                name: blog.name.clone(),
                posts,
            });
        }
    }

    blogs.truncate(config.content.max_blogs);
    blogs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfig;

    fn article(title: &str, link: &str, priority: u8) -> Article {
        Article {
            title: title.to_string(),
            link: link.to_string(),
            description: String::new(),
            published: None,
            source: "Test".to_string(),
            category: Category::Cybersecurity,
            priority,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let articles = vec![
            article("From primary source", "https://example.com/story", 2),
            article("Same story, later source", "https://example.com/story", 4),
            article("Different story", "https://example.com/other", 1),
        ];

        let out = finalize_articles(articles);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|a| a.title == "From primary source"));
        assert!(!out.iter().any(|a| a.title == "Same story, later source"));
    }

    #[test]
    fn test_sort_is_priority_descending_and_stable() {
        let articles = vec![
            article("b-first", "https://example.com/1", 2),
            article("a-high", "https://example.com/2", 5),
            article("b-second", "https://example.com/3", 2),
        ];

        let out = finalize_articles(articles);
        let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a-high", "b-first", "b-second"]);
    }

    #[test]
    fn test_process_items_classifies_and_scores() {
        let keywords = KeywordConfig::default();
        let recency = RecencyFilter::hours(36, DateFallback::AssumeRecent);
        let relevance = RelevanceFilter::new(&keywords);
        let categorizer = Categorizer::new(&keywords);
        let scorer = PriorityScorer::new(&keywords);

        let items = vec![
            FeedItem {
                title: "Bank ransomware attack on enterprise cloud".to_string(),
                link: "https://example.com/bank".to_string(),
                description: String::new(),
                published: None,
            },
            FeedItem {
                title: "Best mobile game releases".to_string(),
                link: "https://example.com/games".to_string(),
                description: String::new(),
                published: None,
            },
        ];

        let out = process_items(items, "Feed", &recency, &relevance, &categorizer, &scorer);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].priority, 5);
        assert_eq!(out[0].category, Category::Cybersecurity);
        assert_eq!(out[0].source, "Feed");
    }

    #[test]
    fn test_digest_in_category_partitions() {
        let mut cyber = article("c", "https://example.com/c", 0);
        cyber.category = Category::Cybersecurity;
        let mut ai = article("a", "https://example.com/a", 0);
        ai.category = Category::Ai;

        let digest = Digest {
            articles: vec![cyber, ai],
            vulnerabilities: Vec::new(),
            blogs: Vec::new(),
            executive_summary: None,
        };

        assert_eq!(digest.in_category(Category::Cybersecurity).len(), 1);
        assert_eq!(digest.in_category(Category::Ai).len(), 1);
        assert!(digest.in_category(Category::Regulation).is_empty());
    }
}
