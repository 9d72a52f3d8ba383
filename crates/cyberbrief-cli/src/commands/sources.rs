use anyhow::Result;

use cyberbrief_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    println!("News sources:");
    for source in &config.sources.news {
        let marker = if source.enabled { "*" } else { " " };
        println!("  [{}] {} - {}", marker, source.name, source.url);
    }

    println!("\nBlog sources:");
    for blog in &config.sources.blogs {
        let marker = if blog.enabled { "*" } else { " " };
        println!("  [{}] {} - {}", marker, blog.name, blog.url);
    }

    println!("\nKEV catalog: {}", config.sources.kev_url);

    Ok(())
}
