use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;

use crate::delay_manager;
use crate::extractor::{Extractor, HackerProfile};

pub const SITE_ORIGIN: &str = "https://top.mlh.io";

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct Scraper {
    client: Client,
    extractor: Extractor,
    year: String,
}

impl Scraper {
    pub fn new(year: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        Scraper {
            client,
            extractor: Extractor::new(),
            year: year.to_string(),
        }
    }

    fn fetch_page(&self, url: &str) -> Result<String, reqwest::Error> {
        let resp = self.client.get(url).header(USER_AGENT, BROWSER_UA).send()?;
        resp.error_for_status()?.text()
    }

    /// Fetch the listing page and collect all profile links for the year.
    /// A failure here is fatal; without the listing there is nothing to do.
    pub fn get_profile_links(&self) -> Result<HashSet<String>, Box<dyn Error>> {
        info!("Getting profile links...");
        let listing_url = format!("{}/{}", SITE_ORIGIN, self.year);
        let html = self.fetch_page(&listing_url)?;

        let links = self.extractor.profile_links(&html, &self.year);
        info!("Found {} profile links", links.len());
        Ok(links)
    }

    pub fn scrape_profile(&self, url: &str) -> Result<HackerProfile, reqwest::Error> {
        info!("Scraping {}", url);
        let html = self.fetch_page(url)?;
        let record = self.extractor.profile_data(&html, url);
        info!("Extracted data for {}", record.name);
        Ok(record)
    }

    /// Discover, then scrape every profile in turn. One bad profile is
    /// logged and skipped; the batch keeps going.
    pub fn scrape_all(&self) -> Result<Vec<HackerProfile>, Box<dyn Error>> {
        let links = self.get_profile_links()?;
        Ok(collect_profiles(&links, |url| {
            self.scrape_profile(url).map_err(Into::into)
        }))
    }
}

fn collect_profiles<F>(links: &HashSet<String>, mut scrape: F) -> Vec<HackerProfile>
where
    F: FnMut(&str) -> Result<HackerProfile, Box<dyn Error>>,
{
    let mut hackers = Vec::new();

    for url in links {
        match scrape(url) {
            Ok(record) => hackers.push(record),
            Err(e) => warn!("Error scraping {}: {}", url, e),
        }
        delay_manager::courtesy_delay();
    }

    hackers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_profile_does_not_stop_the_batch() {
        let good = "https://top.mlh.io/2020/profiles/jane-doe";
        let bad = "https://top.mlh.io/2020/profiles/broken";
        let links: HashSet<String> = [good.to_string(), bad.to_string()].into();

        let hackers = collect_profiles(&links, |url| {
            if url == bad {
                return Err("connection reset".into());
            }
            Ok(HackerProfile {
                url: url.to_string(),
                ..HackerProfile::default()
            })
        });

        assert_eq!(hackers.len(), 1);
        assert_eq!(hackers[0].url, good);
    }
}
