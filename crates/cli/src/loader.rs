//! Metric file loading (CSV or JSON).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use insight_facade::TimeSeries;

const TIMESTAMP_COLUMNS: [&str; 4] = ["timestamp", "date", "time", "ds"];
const VALUE_COLUMNS: [&str; 3] = ["value", "y", "metric"];

/// Parse an RFC 3339 timestamp, `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Unrecognized timestamp '{}'", raw))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| anyhow!("Invalid date '{}'", raw))
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.iter().any(|c| h.trim().eq_ignore_ascii_case(c)))
}

/// Read `(timestamp, value)` rows from CSV with a header row.
pub fn read_csv<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<(DateTime<Utc>, f64)>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("Failed to read headers")?.clone();

    let ts_idx = find_column(&headers, &TIMESTAMP_COLUMNS)
        .ok_or_else(|| anyhow!("No timestamp column (expected one of {:?})", TIMESTAMP_COLUMNS))?;
    let value_idx = match column {
        Some(col) => find_column(&headers, &[col])
            .ok_or_else(|| anyhow!("Column '{}' not found", col))?,
        None => find_column(&headers, &VALUE_COLUMNS)
            .or_else(|| (0..headers.len()).find(|&i| i != ts_idx))
            .ok_or_else(|| anyhow!("No value column found"))?,
    };

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read record {}", row + 1))?;
        let (Some(ts), Some(value)) = (record.get(ts_idx), record.get(value_idx)) else {
            bail!("Record {} is missing fields", row + 1);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Record {}: '{}' is not a number", row + 1, value))?;
        points.push((parse_timestamp(ts)?, value));
    }
    Ok(points)
}

/// Read `(timestamp, value)` pairs from a JSON array of objects.
pub fn read_json<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<(DateTime<Utc>, f64)>> {
    let json: serde_json::Value =
        serde_json::from_reader(reader).context("Failed to parse JSON")?;
    let rows = json
        .as_array()
        .ok_or_else(|| anyhow!("Expected a JSON array of points"))?;

    rows.iter()
        .enumerate()
        .map(|(row, obj)| {
            let ts = TIMESTAMP_COLUMNS
                .iter()
                .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
                .ok_or_else(|| anyhow!("Point {} has no timestamp", row))?;
            let value = match column {
                Some(col) => obj.get(col).and_then(|v| v.as_f64()),
                None => VALUE_COLUMNS
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(|v| v.as_f64())),
            }
            .ok_or_else(|| anyhow!("Point {} has no numeric value", row))?;
            Ok((parse_timestamp(ts)?, value))
        })
        .collect()
}

/// Load a metric file, choosing the format from its extension.
///
/// The metric is named after the file stem.
pub fn load_series(path: &Path, column: Option<&str>) -> Result<TimeSeries> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let points = match ext.as_str() {
        "json" => read_json(reader, column)?,
        _ => read_csv(reader, column)?,
    };
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("metric");

    TimeSeries::from_points(name, points)
        .with_context(|| format!("Invalid series in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-02").unwrap(), midnight);
        assert_eq!(parse_timestamp("2024-01-02T00:00:00Z").unwrap(), midnight);
        assert_eq!(parse_timestamp("2024-01-02T02:00:00+02:00").unwrap(), midnight);
        assert_eq!(parse_timestamp(" 2024-01-02 00:00:00 ").unwrap(), midnight);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_read_csv_default_columns() {
        let csv = "date,value\n2024-01-01,10\n2024-01-02,12.5\n";
        let points = read_csv(csv.as_bytes(), None).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].1, 12.5);
    }

    #[test]
    fn test_read_csv_named_column() {
        let csv = "timestamp,revenue,churn\n2024-01-01,100,3\n2024-01-02,110,4\n";
        let points = read_csv(csv.as_bytes(), Some("churn")).unwrap();
        assert_eq!(points.iter().map(|p| p.1).collect::<Vec<_>>(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_read_csv_falls_back_to_first_other_column() {
        let csv = "signups,ds\n7,2024-01-01\n";
        let points = read_csv(csv.as_bytes(), None).unwrap();
        assert_eq!(points[0].1, 7.0);
    }

    #[test]
    fn test_read_csv_rejects_bad_number() {
        let csv = "date,value\n2024-01-01,abc\n";
        assert!(read_csv(csv.as_bytes(), None).is_err());
    }

    #[test]
    fn test_read_csv_requires_timestamp_column() {
        let csv = "a,b\n1,2\n";
        assert!(read_csv(csv.as_bytes(), None).is_err());
    }

    #[test]
    fn test_read_json_points() {
        let json = r#"[{"timestamp":"2024-01-01","value":1.5},{"date":"2024-01-02","value":2}]"#;
        let points = read_json(json.as_bytes(), None).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].1, 2.0);
    }

    #[test]
    fn test_read_json_rejects_missing_value() {
        let json = r#"[{"timestamp":"2024-01-01"}]"#;
        assert!(read_json(json.as_bytes(), None).is_err());
        assert!(read_json(r#"{"values":[1,2]}"#.as_bytes(), None).is_err());
    }
}
