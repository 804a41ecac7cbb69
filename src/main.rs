use log::info;
use mlh_top_hackers_lib::{export, logger, Scraper};
use std::error::Error;
use std::path::PathBuf;

// Target season. Past runs: 2023, 2022, 2021.
const YEAR: &str = "2020";

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting MLH Top Hackers scraper for {}...", YEAR);

    let scraper = Scraper::new(YEAR);
    let hackers = scraper.scrape_all()?;

    let out_dir = PathBuf::from("extracted_data").join(YEAR);
    export::save_json(&hackers, &out_dir.join(format!("mlh_top_hackers_{}.json", YEAR)))?;
    export::save_csv(&hackers, &out_dir.join(format!("mlh_top_hackers_{}.csv", YEAR)))?;

    info!("Scraped {} hacker profiles successfully!", hackers.len());
    Ok(())
}
