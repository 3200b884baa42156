use crate::common::constants::{
    ANCIENT_TOWNS_ID, ANCIENT_TOWN_SOURCE, MOUNTAINS_ID, MOUNTAIN_SOURCE, PROVINCIAL_ID,
    PROVINCIAL_TAG_SUFFIX, SCENIC_5A_ID, SCENIC_5A_SOURCE, WORLD_HERITAGE_ID,
    WORLD_HERITAGE_SOURCE,
};
use crate::common::types::AttractionRecord;
use indexmap::IndexMap;
use std::fmt;

const SUMMARY_RULE_WIDTH: usize = 80;
const TABLE_RULE_WIDTH: usize = 100;
const TOP_PROVINCES: usize = 10;

/// Records tagged by the extractor `extractor_id`. Provincial tags vary per
/// province, so they are matched on the shared `景点` marker.
pub fn count_for_source(records: &[AttractionRecord], extractor_id: &str) -> usize {
    records
        .iter()
        .filter(|r| match extractor_id {
            WORLD_HERITAGE_ID => r.source == WORLD_HERITAGE_SOURCE,
            SCENIC_5A_ID => r.source == SCENIC_5A_SOURCE,
            MOUNTAINS_ID => r.source == MOUNTAIN_SOURCE,
            ANCIENT_TOWNS_ID => r.source == ANCIENT_TOWN_SOURCE,
            PROVINCIAL_ID => r.source.contains(PROVINCIAL_TAG_SUFFIX),
            _ => false,
        })
        .count()
}

/// Counts per key, largest first. Equal counts keep first-seen order.
fn ranked<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub by_source: Vec<(String, usize)>,
    /// Non-empty provinces only, at most ten
    pub top_provinces: Vec<(String, usize)>,
}

impl Summary {
    pub fn from_records(records: &[AttractionRecord]) -> Self {
        let by_source = ranked(records.iter().map(|r| r.source.as_str()));
        let mut top_provinces = ranked(
            records
                .iter()
                .map(|r| r.province.as_str())
                .filter(|p| !p.is_empty()),
        );
        top_provinces.truncate(TOP_PROVINCES);
        Self {
            total: records.len(),
            by_source,
            top_provinces,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(SUMMARY_RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "爬取结果统计")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "总景点数: {}", self.total)?;

        writeln!(f, "\n按来源分布:")?;
        for (source, count) in &self.by_source {
            writeln!(f, "  {source}: {count} 个")?;
        }

        if !self.top_provinces.is_empty() {
            writeln!(f, "\n按省份分布（前10）:")?;
            for (province, count) in &self.top_provinces {
                writeln!(f, "  {province}: {count} 个")?;
            }
        }

        writeln!(f, "\n{rule}")
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Fixed-width table of the first `limit` records, with a note counting
/// the rows left out.
pub fn sample_table(records: &[AttractionRecord], limit: usize) -> String {
    let rule = "=".repeat(TABLE_RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{:<6}{:<35}{:<20}{:<25}\n", "序号", "景点名称", "省份", "来源"));
    out.push_str(&rule);
    out.push('\n');

    for (idx, record) in records.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "{:<6}{:<35}{:<20}{:<25}\n",
            idx + 1,
            truncate_chars(&record.name, 33),
            truncate_chars(&record.province, 18),
            truncate_chars(&record.source, 23),
        ));
    }

    if records.len() > limit {
        out.push_str(&format!("... (还有 {} 个景点未显示)\n", records.len() - limit));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, province: &str, source: &str) -> AttractionRecord {
        AttractionRecord::new(name, province, "中国", source)
    }

    fn many(n: usize) -> Vec<AttractionRecord> {
        (0..n)
            .map(|i| record(&format!("景点{i}"), "浙江省", "5A级景区"))
            .collect()
    }

    #[test]
    fn test_sample_table_caps_rows() {
        let records = many(120);
        let table = sample_table(&records, 50);
        let lines: Vec<&str> = table.lines().collect();

        let rows = lines
            .iter()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(rows, 50);
        assert!(table.contains("... (还有 70 个景点未显示)"));
        // rule, header, rule, 50 rows, remainder, rule
        assert_eq!(lines.len(), 55);
    }

    #[test]
    fn test_sample_table_without_remainder() {
        let table = sample_table(&many(3), 50);
        assert!(!table.contains("还有"));
        // rule, header, rule, 3 rows, rule
        assert_eq!(table.lines().count(), 7);
    }

    #[test]
    fn test_sample_table_truncates_columns() {
        let long_name = "长".repeat(40);
        let records = vec![record(&long_name, "新疆维吾尔自治区巴音郭楞蒙古自治州和静县", "名山")];
        let table = sample_table(&records, 50);
        let row = table.lines().nth(3).unwrap();

        assert!(row.contains(&"长".repeat(33)));
        assert!(!row.contains(&"长".repeat(34)));
        assert!(row.contains("新疆维吾尔自治区巴音郭楞蒙古自治州和"));
        assert!(!row.contains("和静"));
        assert!(row.starts_with("1     "));
    }

    #[test]
    fn test_summary_groups_and_orders() {
        let records = vec![
            record("长城", "北京市", "世界遗产"),
            record("故宫", "北京市", "世界遗产"),
            record("西湖", "浙江省", "5A级景区"),
            record("泰山", "", "名山"),
            record("华山", "", "名山"),
            record("衡山", "", "名山"),
        ];
        let summary = Summary::from_records(&records);

        assert_eq!(summary.total, 6);
        assert_eq!(
            summary.by_source,
            vec![
                ("名山".to_string(), 3),
                ("世界遗产".to_string(), 2),
                ("5A级景区".to_string(), 1)
            ]
        );
        assert_eq!(
            summary.top_provinces,
            vec![("北京市".to_string(), 2), ("浙江省".to_string(), 1)]
        );

        let text = summary.to_string();
        assert!(text.contains("总景点数: 6"));
        assert!(text.contains("  名山: 3 个"));
    }

    #[test]
    fn test_summary_keeps_ten_provinces() {
        let records: Vec<AttractionRecord> = (0..15)
            .map(|i| record(&format!("景点{i}"), &format!("省份{i}"), "世界遗产"))
            .collect();
        assert_eq!(Summary::from_records(&records).top_provinces.len(), 10);
    }

    #[test]
    fn test_count_for_provincial_source() {
        let records = vec![
            record("西湖", "浙江省", "浙江省景点"),
            record("鼓浪屿", "福建省", "福建省景点"),
            record("黄山", "安徽省", "5A级景区"),
        ];
        assert_eq!(count_for_source(&records, PROVINCIAL_ID), 2);
        assert_eq!(count_for_source(&records, SCENIC_5A_ID), 1);
    }
}
