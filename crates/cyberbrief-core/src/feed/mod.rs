mod fetcher;
mod models;
mod parser;

pub use fetcher::FeedFetcher;
pub use models::{Article, BlogDigest, BlogPost, Category, FeedItem};
pub use parser::parse_items;
