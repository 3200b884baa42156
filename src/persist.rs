use crate::common::error::Result;
use crate::common::types::AttractionRecord;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the records as a pretty-printed JSON array. Non-ASCII text is
/// written as UTF-8, not as `\u` escapes.
pub fn save_json(path: &Path, records: &[AttractionRecord]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json_content = serde_json::to_string_pretty(records)?;
    fs::write(path, json_content)?;
    info!("Saved {} attractions to {}", records.len(), path.display());
    Ok(())
}

pub fn load_json(path: &Path) -> Result<Vec<AttractionRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_is_indented_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("china_attractions.json");
        let records = vec![AttractionRecord::new("布达拉宫", "西藏自治区", "中国", "世界遗产")];

        save_json(&path, &records).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"name\": \"布达拉宫\""));
        assert!(!text.contains("\\u"));
        assert!(text.starts_with("[\n  {\n    \"name\""));
    }

    #[test]
    fn test_field_order_and_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_json(&path, &[AttractionRecord::new("泰山", "", "中国", "名山")]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let object = value[0].as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["name", "province", "country", "source"] {
            assert!(keys.contains(&key));
        }
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output").join("attractions.json");
        save_json(&path, &[]).unwrap();
        assert_eq!(load_json(&path).unwrap(), Vec::<AttractionRecord>::new());
    }
}
