use anyhow::Result;

use cyberbrief_core::{
    delivery::{save_report, Mailer},
    digest, render, AppConfig,
};

pub async fn run(config: &AppConfig) -> Result<()> {
    tracing::info!("Starting CyberBrief Daily generation");

    let digest = digest::generate(config).await?;
    let report = render::render_digest(&digest, &config.content);

    // Always persist before attempting delivery; email is best-effort.
    let path = save_report(&config.output.report_dir, &report)?;

    let sent = Mailer::new(&config.email).send(&report).await?;
    if sent {
        println!("Digest generated, saved to {} and emailed.", path.display());
    } else {
        println!("Digest generated and saved to {} (email not sent).", path.display());
    }

    Ok(())
}
