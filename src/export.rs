use log::info;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::extractor::HackerProfile;

pub fn save_json(hackers: &[HackerProfile], path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(hackers)?;
    fs::write(path, json)?;

    info!("Saved data to {}", path.display());
    Ok(())
}

/// Write the records as CSV. The header row comes from the record's field
/// set, which is identical for every record. An empty collection is a no-op.
pub fn save_csv(hackers: &[HackerProfile], path: &Path) -> Result<(), Box<dyn Error>> {
    if hackers.is_empty() {
        info!("No data to save");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for hacker in hackers {
        writer.serialize(hacker)?;
    }
    writer.flush()?;

    info!("Saved data to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mlh_top_hackers_{}", std::process::id()))
            .join(name)
    }

    fn sample_records() -> Vec<HackerProfile> {
        vec![
            HackerProfile {
                name: "Jane Doe".to_string(),
                age: "21".to_string(),
                github: "janedoe".to_string(),
                about: "Hello.\n\nWorld.".to_string(),
                url: "https://top.mlh.io/2020/profiles/jane-doe".to_string(),
                ..HackerProfile::default()
            },
            HackerProfile {
                url: "https://top.mlh.io/2020/profiles/anonymous".to_string(),
                ..HackerProfile::default()
            },
        ]
    }

    #[test]
    fn json_round_trips() {
        let path = temp_path("round_trip.json");
        let records = sample_records();

        save_json(&records, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let decoded: Vec<HackerProfile> = serde_json::from_str(&content).unwrap();

        assert_eq!(decoded, records);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_json_writes_empty_array() {
        let path = temp_path("empty.json");

        save_json(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_round_trips_with_stable_header() {
        let path = temp_path("round_trip.csv");
        let records = sample_records();

        save_csv(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(
            header,
            ["name", "age", "devpost", "github", "linkedin", "website", "about", "url"]
        );

        let decoded: Vec<HackerProfile> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded, records);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_csv_is_skipped() {
        let path = temp_path("empty.csv");

        save_csv(&[], &path).unwrap();

        assert!(!path.exists());
    }
}
