pub mod ai;
pub mod config;
pub mod delivery;
pub mod digest;
pub mod error;
pub mod feed;
pub mod kev;
pub mod pipeline;
pub mod render;

pub use config::AppConfig;
pub use error::{Error, Result};
