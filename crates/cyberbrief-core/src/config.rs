use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::{categorize, relevance, score};

/// Default CISA Known Exploited Vulnerabilities catalog endpoint.
pub const DEFAULT_KEV_URL: &str =
    "https://www.cisa.gov/sites/default/files/csv/known_exploited_vulnerabilities.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username; may be an env-var placeholder (e.g. "GMAIL_USER").
    #[serde(default)]
    pub username: String,
    /// SMTP password; may be an env-var placeholder (e.g. "GMAIL_APP_PASSWORD").
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from_addr: String,
    #[serde(default)]
    pub to_addrs: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_addr: String::new(),
            to_addrs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Enable the optional AI executive summary.
    #[serde(default)]
    pub enabled: bool,
    /// API key; may be an env-var placeholder (e.g. "OPENAI_API_KEY").
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            model: default_openai_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Threat news feeds, in priority order.
    #[serde(default = "default_news_sources")]
    pub news: Vec<SourceConfig>,
    /// Security blogs for the activity digest section.
    #[serde(default = "default_blog_sources")]
    pub blogs: Vec<SourceConfig>,
    #[serde(default = "default_kev_url")]
    pub kev_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            news: default_news_sources(),
            blogs: default_blog_sources(),
            kev_url: default_kev_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Section caps per rendered digest.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    #[serde(default = "default_max_regulation")]
    pub max_regulation: usize,
    #[serde(default = "default_max_ai")]
    pub max_ai: usize,
    #[serde(default = "default_max_vulns")]
    pub max_vulns: usize,
    #[serde(default = "default_max_blogs")]
    pub max_blogs: usize,
    #[serde(default = "default_blog_posts")]
    pub blog_posts_per_blog: usize,
    /// Trailing window for news articles, in hours.
    #[serde(default = "default_recency_hours")]
    pub recency_hours: u64,
    /// Trailing window for KEV entries, in days.
    #[serde(default = "default_kev_window_days")]
    pub kev_window_days: u64,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_articles: default_max_articles(),
            max_regulation: default_max_regulation(),
            max_ai: default_max_ai(),
            max_vulns: default_max_vulns(),
            max_blogs: default_max_blogs(),
            blog_posts_per_blog: default_blog_posts(),
            recency_hours: default_recency_hours(),
            kev_window_days: default_kev_window_days(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Keyword lists driving relevance, categorization and scoring.
///
/// Every list has a built-in default matching the broadest production
/// configuration; overriding any of them in config.json replaces that
/// list wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default = "default_exclude_topics")]
    pub exclude_topics: Vec<String>,
    #[serde(default = "default_focus_topics")]
    pub focus_topics: Vec<String>,
    #[serde(default = "default_ai_topics")]
    pub ai_topics: Vec<String>,
    #[serde(default = "default_regulation_topics")]
    pub regulation_topics: Vec<String>,
    #[serde(default = "default_regulation_phrases")]
    pub regulation_phrases: Vec<String>,
    #[serde(default = "default_agency_names")]
    pub agency_names: Vec<String>,
    #[serde(default = "default_financial_terms")]
    pub financial_terms: Vec<String>,
    #[serde(default = "default_broad_impact_terms")]
    pub broad_impact_terms: Vec<String>,
    #[serde(default = "default_business_terms")]
    pub business_terms: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            exclude_topics: default_exclude_topics(),
            focus_topics: default_focus_topics(),
            ai_topics: default_ai_topics(),
            regulation_topics: default_regulation_topics(),
            regulation_phrases: default_regulation_phrases(),
            agency_names: default_agency_names(),
            financial_terms: default_financial_terms(),
            broad_impact_terms: default_broad_impact_terms(),
            business_terms: default_business_terms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one timestamped report file per run.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
        }
    }
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_true() -> bool {
    true
}

fn default_kev_url() -> String {
    DEFAULT_KEV_URL.to_string()
}

fn default_news_sources() -> Vec<SourceConfig> {
    [
        ("BleepingComputer", "https://www.bleepingcomputer.com/feed/"),
        ("Krebs on Security", "https://krebsonsecurity.com/feed/"),
        ("Schneier on Security", "https://www.schneier.com/blog/atom.xml"),
        ("SANS ISC Diary", "https://isc.sans.edu/rssfeed.xml"),
        ("Threatpost", "https://threatpost.com/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| SourceConfig {
        name: name.to_string(),
        url: url.to_string(),
        enabled: true,
    })
    .collect()
}

fn default_blog_sources() -> Vec<SourceConfig> {
    [
        ("Krebs on Security", "https://krebsonsecurity.com/feed/"),
        ("Schneier on Security", "https://www.schneier.com/blog/atom.xml"),
        ("SANS ISC Diary", "https://isc.sans.edu/rssfeed.xml"),
        ("Threatpost", "https://threatpost.com/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| SourceConfig {
        name: name.to_string(),
        url: url.to_string(),
        enabled: true,
    })
    .collect()
}

fn default_max_articles() -> usize {
    5
}

fn default_max_regulation() -> usize {
    4
}

fn default_max_ai() -> usize {
    4
}

fn default_max_vulns() -> usize {
    6
}

fn default_max_blogs() -> usize {
    5
}

fn default_blog_posts() -> usize {
    3
}

fn default_recency_hours() -> u64 {
    36
}

fn default_kev_window_days() -> u64 {
    14
}

fn default_timeout() -> u64 {
    15
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("newsletters")
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn default_exclude_topics() -> Vec<String> {
    owned(relevance::DEFAULT_EXCLUDE_TERMS)
}

fn default_focus_topics() -> Vec<String> {
    owned(relevance::DEFAULT_INCLUDE_TERMS)
}

fn default_ai_topics() -> Vec<String> {
    owned(categorize::DEFAULT_AI_TERMS)
}

fn default_regulation_topics() -> Vec<String> {
    owned(categorize::DEFAULT_REGULATION_TERMS)
}

fn default_regulation_phrases() -> Vec<String> {
    owned(categorize::DEFAULT_REGULATION_PHRASES)
}

fn default_agency_names() -> Vec<String> {
    owned(categorize::DEFAULT_AGENCY_TERMS)
}

fn default_financial_terms() -> Vec<String> {
    owned(score::DEFAULT_FINANCIAL_TERMS)
}

fn default_broad_impact_terms() -> Vec<String> {
    owned(score::DEFAULT_BROAD_IMPACT_TERMS)
}

fn default_business_terms() -> Vec<String> {
    owned(score::DEFAULT_BUSINESS_TERMS)
}

/// Placeholder tokens that always read from the environment, matching
/// the conventional config.json shipped with the tool.
const KNOWN_PLACEHOLDERS: &[&str] = &["GMAIL_USER", "GMAIL_APP_PASSWORD", "OPENAI_API_KEY"];

/// True when a config value looks like an environment-variable name
/// rather than a literal secret, e.g. "SMTP_PASSWORD".
fn is_env_placeholder(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && value.chars().any(|c| c.is_ascii_uppercase())
}

/// Replace a placeholder value with the named environment variable.
///
/// The well-known tokens always substitute (unset resolves to empty,
/// which downstream code treats as "not configured"). Any other
/// all-caps value substitutes only when such a variable actually
/// exists, so a literal all-caps secret is never blanked.
fn resolve_placeholder(value: &str) -> String {
    if KNOWN_PLACEHOLDERS.contains(&value) {
        return match std::env::var(value) {
            Ok(resolved) => resolved,
            Err(_) => {
                tracing::warn!("Environment variable {} is not set", value);
                String::new()
            }
        };
    }

    if is_env_placeholder(value) {
        if let Ok(resolved) = std::env::var(value) {
            return resolved;
        }
    }

    value.to_string()
}

/// Load KEY=VALUE pairs from a .env file in the working directory,
/// if one exists. Lines starting with '#' are skipped. A .env entry
/// takes precedence over an existing environment variable.
fn load_dotenv() {
    let path = Path::new(".env");
    if !path.exists() {
        return;
    }

    match std::fs::read_to_string(path) {
        Ok(content) => apply_env_lines(&content),
        Err(e) => tracing::warn!("Failed to read .env file: {}", e),
    }
}

fn apply_env_lines(content: &str) {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                std::env::set_var(key, value.trim());
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// Any load problem — missing, unreadable or malformed file — is
    /// logged and degrades to built-in defaults, unless `strict` is
    /// set, in which case it is a fatal configuration error.
    pub fn load(path: &Path, strict: bool) -> crate::Result<Self> {
        load_dotenv();

        if !path.exists() {
            if strict {
                return Err(crate::Error::Config(format!(
                    "Config file {} not found",
                    path.display()
                )));
            }
            tracing::warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|content| {
                serde_json::from_str::<Self>(&content)
                    .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))
            });

        let mut config = match parsed {
            Ok(config) => config,
            Err(e) if strict => return Err(e),
            Err(e) => {
                tracing::error!("Error loading config: {}", e);
                Self::default()
            }
        };

        config.resolve_secrets();
        Ok(config)
    }

    /// Substitute env-var placeholders in credential-bearing fields.
    fn resolve_secrets(&mut self) {
        self.email.username = resolve_placeholder(&self.email.username);
        self.email.password = resolve_placeholder(&self.email.password);
        self.email.from_addr = resolve_placeholder(&self.email.from_addr);
        self.openai.api_key = resolve_placeholder(&self.openai.api_key);
    }
}

impl EmailConfig {
    /// Delivery requires both a username and a password; everything
    /// else has workable defaults.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.to_addrs.is_empty()
    }
}

impl OpenAiConfig {
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}
