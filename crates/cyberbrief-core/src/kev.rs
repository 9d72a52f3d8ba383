//! CISA Known Exploited Vulnerabilities catalog ingestion.
//!
//! The KEV feed is a header-keyed CSV maintained upstream with
//! well-formed `YYYY-MM-DD` dates, so unlike RSS timestamps a row with
//! an unparseable date is dropped rather than assumed recent.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vulnerability {
    pub cve_id: String,
    pub vendor: String,
    pub product: String,
    pub vulnerability_name: String,
    pub date_added: NaiveDate,
    pub short_description: String,
    pub required_action: Option<String>,
    pub due_date: Option<String>,
}

/// Raw CSV row; column names follow the upstream schema. Columns the
/// digest does not use (CWEs, ransomware campaign flags, notes) are
/// ignored during deserialization.
#[derive(Debug, Deserialize)]
struct KevRow {
    #[serde(rename = "cveID")]
    cve_id: String,
    #[serde(rename = "vendorProject")]
    vendor_project: String,
    #[serde(rename = "product")]
    product: String,
    #[serde(rename = "vulnerabilityName")]
    vulnerability_name: String,
    #[serde(rename = "dateAdded")]
    date_added: String,
    #[serde(rename = "shortDescription")]
    short_description: String,
    #[serde(rename = "requiredAction", default)]
    required_action: Option<String>,
    #[serde(rename = "dueDate", default)]
    due_date: Option<String>,
}

/// Parse the KEV CSV and keep entries added within the trailing window,
/// newest first, capped at `limit`. Malformed rows are skipped
/// individually; one bad row never aborts the batch.
pub fn parse_kev_csv(content: &str, window_days: u64, limit: usize) -> Vec<Vulnerability> {
    let today = Local::now().date_naive();
    parse_kev_csv_at(content, window_days, limit, today)
}

fn parse_kev_csv_at(
    content: &str,
    window_days: u64,
    limit: usize,
    today: NaiveDate,
) -> Vec<Vulnerability> {
    let cutoff = today - Duration::days(window_days as i64);
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut vulnerabilities = Vec::new();

    for result in reader.deserialize::<KevRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::error!("Error parsing KEV row: {}", e);
                continue;
            }
        };

        // Strict date handling: a row with a bad dateAdded is dropped.
        let date_added = match NaiveDate::parse_from_str(row.date_added.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::error!("Error parsing KEV dateAdded '{}': {}", row.date_added, e);
                continue;
            }
        };

        if date_added <= cutoff {
            continue;
        }

        vulnerabilities.push(Vulnerability {
            cve_id: row.cve_id,
            vendor: row.vendor_project,
            product: row.product,
            vulnerability_name: row.vulnerability_name,
            date_added,
            short_description: row.short_description,
            required_action: row.required_action.filter(|a| !a.trim().is_empty()),
            due_date: row.due_date.filter(|d| !d.trim().is_empty()),
        });
    }

    vulnerabilities.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    vulnerabilities.truncate(limit);

    tracing::info!("Found {} recent vulnerabilities from CISA KEV", vulnerabilities.len());
    vulnerabilities
}
