//! Report delivery: local file persistence plus optional SMTP email.
//!
//! Email is strictly best-effort. The report is always persisted first,
//! and neither missing credentials nor a transport failure is an error
//! to the caller; both surface as `Ok(false)`.

use std::path::{Path, PathBuf};

use chrono::Local;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::Result;

pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Send the rendered digest to every configured recipient, one
    /// message each, over SMTP with STARTTLS.
    pub async fn send(&self, report: &str) -> Result<bool> {
        if !self.config.is_configured() {
            tracing::info!("Email not configured - report saved to file only");
            return Ok(false);
        }

        let from: Mailbox = match self.config.from_addr.parse() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!("Invalid from address '{}': {}", self.config.from_addr, e);
                return Ok(false);
            }
        };

        let subject = format!("CyberBrief Daily - {}", Local::now().format("%B %d, %Y"));

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
            &self.config.smtp_server,
        ) {
            Ok(builder) => builder
                .port(self.config.smtp_port)
                .credentials(Credentials::new(
                    self.config.username.clone(),
                    self.config.password.clone(),
                ))
                .build(),
            Err(e) => {
                tracing::error!("Failed to build SMTP transport: {}", e);
                return Ok(false);
            }
        };

        let mut sent = 0usize;
        for to_addr in &self.config.to_addrs {
            let to: Mailbox = match to_addr.parse() {
                Ok(addr) => addr,
                Err(e) => {
                    tracing::error!("Invalid recipient address '{}': {}", to_addr, e);
                    continue;
                }
            };

            let message = match Message::builder()
                .from(from.clone())
                .to(to)
                .subject(subject.clone())
                .header(ContentType::TEXT_PLAIN)
                .body(report.to_string())
            {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!("Failed to build message for {}: {}", to_addr, e);
                    continue;
                }
            };

            match transport.send(message).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    tracing::error!("Error sending to {}: {}", to_addr, e);
                }
            }
        }

        if sent > 0 {
            tracing::info!("Report sent successfully to {} recipients", sent);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Persist the rendered report as a timestamped UTF-8 text file,
/// creating the report directory when needed.
pub fn save_report(dir: &Path, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let filename = format!("cyberbrief_{}.txt", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);
    std::fs::write(&path, content)?;

    tracing::info!("Report saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_return_false_without_error() {
        let mailer = Mailer::new(&EmailConfig::default());
        let result = mailer.send("digest body").await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn test_invalid_from_address_is_not_fatal() {
        let config = EmailConfig {
            username: "user".to_string(),
            password: "pass".to_string(),
            from_addr: "not an address".to_string(),
            to_addrs: vec!["ops@example.com".to_string()],
            ..EmailConfig::default()
        };
        let result = Mailer::new(&config).send("digest body").await;
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn test_save_report_writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(dir.path(), "CYBERBRIEF DAILY\n").unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("cyberbrief_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "CYBERBRIEF DAILY\n");
    }

    #[test]
    fn test_save_report_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("daily");
        let path = save_report(&nested, "body").unwrap();
        assert!(path.exists());
    }
}
