use anyhow::Result;

use cyberbrief_core::{digest, render, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let digest = digest::generate(config).await?;
    let report = render::render_digest(&digest, &config.content);

    println!("{}", report);

    Ok(())
}
