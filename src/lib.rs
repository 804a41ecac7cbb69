pub mod delay_manager;
pub mod export;
pub mod extractor;
pub mod logger;
pub mod scraper;

// Exporting types for convenience
pub use crate::extractor::{Extractor, HackerProfile};
pub use crate::scraper::Scraper;
