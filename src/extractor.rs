use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

use crate::scraper::SITE_ORIGIN;

/// One scraped hacker profile. Every field except `url` defaults to an
/// empty string so the CSV header is identical for every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HackerProfile {
    pub name: String,
    pub age: String,
    pub devpost: String,
    pub github: String,
    pub linkedin: String,
    pub website: String,
    pub about: String,
    pub url: String,
}

pub struct Extractor {
    // Probe: does this text look like a "Name, Age" entry at all?
    name_age_probe: Regex,
    // Capture: split a heading into the name and age parts.
    name_age_parts: Regex,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            name_age_probe: Regex::new(r"[A-Za-z\s]+,\s+\d+").unwrap(),
            name_age_parts: Regex::new(r"(.*?),\s*(\d+)").unwrap(),
        }
    }

    /// Find all profile links on the listing page for `year`.
    ///
    /// Hacker entries render as "Name, Age" text somewhere inside an anchor.
    /// We scan every element for that pattern, climb to the nearest enclosing
    /// anchor, and keep links whose path sits under `/{year}/profiles/`.
    /// Several text nodes inside one anchor match the same pattern, hence the
    /// set.
    pub fn profile_links(&self, html: &str, year: &str) -> HashSet<String> {
        let document = Html::parse_document(html);
        let every = Selector::parse("*").unwrap();

        let prefix = format!("/{}/profiles/", year);
        let profiles_base = Url::parse(&format!("{}{}", SITE_ORIGIN, prefix))
            .expect("Failed to build profiles base URL");

        let mut links = HashSet::new();

        for element in document.select(&every) {
            let text = element.text().collect::<String>();
            if !self.name_age_probe.is_match(&text) {
                continue;
            }

            // Not every name-like fragment is a profile entry; anything
            // without an enclosing anchor is skipped.
            let anchor = match nearest_ancestor(&element, "a") {
                Some(a) => a,
                None => continue,
            };
            let href = match anchor.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            if href.starts_with(&prefix) {
                links.insert(format!("{}{}", SITE_ORIGIN, href));
            } else if let Ok(resolved) = profiles_base.join(href) {
                if resolved.path().starts_with(&prefix) {
                    links.insert(resolved.to_string());
                }
            }
        }

        links
    }

    /// Parse one profile page into a record. Missing fields are not errors;
    /// they stay empty.
    pub fn profile_data(&self, html: &str, url: &str) -> HackerProfile {
        let document = Html::parse_document(html);
        let mut record = HackerProfile {
            url: url.to_string(),
            ..HackerProfile::default()
        };

        // Name and age come from the page title, e.g. "Jane Doe, 21".
        let h1 = Selector::parse("h1").unwrap();
        if let Some(heading) = document.select(&h1).next() {
            let title = element_text(&heading);
            if let Some(caps) = self.name_age_parts.captures(&title) {
                record.name = caps[1].trim().to_string();
                record.age = caps[2].trim().to_string();
            }
        }

        self.fill_link_fields(&document, &mut record);
        record.about = self.about_text(&document);

        record
    }

    /// Labeled social links live in small blocks under the "Links" heading.
    /// The field value is the visible text of the block's first anchor.
    fn fill_link_fields(&self, document: &Html, record: &mut HackerProfile) {
        let h4 = Selector::parse("h4").unwrap();
        let block = Selector::parse("div.mb-1").unwrap();
        let anchor = Selector::parse("a").unwrap();

        let heading = match document
            .select(&h4)
            .find(|h| element_text(h).contains("Links"))
        {
            Some(h) => h,
            None => return,
        };
        let container = match nearest_ancestor(&heading, "div") {
            Some(c) => c,
            None => return,
        };

        for entry in container.select(&block) {
            let text = element_text(&entry);
            let link_text = entry
                .select(&anchor)
                .next()
                .map(|a| element_text(&a))
                .unwrap_or_default();

            if text.contains("Devpost:") {
                record.devpost = link_text;
            } else if text.contains("GitHub:") {
                record.github = link_text;
            } else if text.contains("LinkedIn:") {
                record.linkedin = link_text;
            } else if text.contains("Website:") {
                record.website = link_text;
            }
            // Any other label is ignored.
        }
    }

    /// The biography. Strategy one: a content container (class carries
    /// "mt-4" or "w-md-60") holding at least one paragraph. Strategy two,
    /// best effort: every paragraph in the document except those under the
    /// "Quick Facts" / "Links" sections and those that look like another
    /// hacker's "Name, Age" summary line.
    fn about_text(&self, document: &Html) -> String {
        let div = Selector::parse("div").unwrap();
        let para = Selector::parse("p").unwrap();

        let content_div = document.select(&div).find(|d| {
            let class = d.value().attr("class").unwrap_or("");
            (class.contains("mt-4") || class.contains("w-md-60"))
                && d.select(&para).next().is_some()
        });

        let mut paragraphs = Vec::new();
        match content_div {
            Some(container) => {
                for p in container.select(&para) {
                    let text = element_text(&p);
                    if !text.is_empty() {
                        paragraphs.push(text);
                    }
                }
            }
            None => {
                for p in document.select(&para) {
                    if self.under_facts_or_links(&p) {
                        continue;
                    }
                    let text = element_text(&p);
                    if text.is_empty() || self.name_age_probe.is_match(&text) {
                        continue;
                    }
                    paragraphs.push(text);
                }
            }
        }

        paragraphs.join("\n\n")
    }

    // True when the paragraph's nearest div carries a "Quick Facts" or
    // "Links" heading. Only the nearest div counts.
    fn under_facts_or_links(&self, paragraph: &ElementRef) -> bool {
        let h4 = Selector::parse("h4").unwrap();
        match nearest_ancestor(paragraph, "div") {
            Some(container) => container
                .select(&h4)
                .any(|h| matches!(element_text(&h).as_str(), "Quick Facts" | "Links")),
            None => false,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn nearest_ancestor<'a>(element: &ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}
